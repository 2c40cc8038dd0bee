//! Plaintext and gzip-compressed table input and output.
//!
//! Chromosome size tables and region tables are small TSV-like files that are
//! frequently distributed gzip-compressed (e.g. `hg38.chrom.sizes.gz` from
//! UCSC). [`InputFile`] detects compression from the magic number rather than
//! the extension; [`OutputFile`] compresses when the output path ends in `.gz`.
//!
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Write;
use std::io::{self, BufWriter};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error: {0}")]
    IOError(#[from] io::Error),
    #[error("file '{0}' does not exist")]
    NotFound(PathBuf),
}

/// Check if a file is a gzipped by looking for the magic numbers
fn is_gzipped_file(file_path: &Path) -> io::Result<bool> {
    let mut file = File::open(file_path)?;
    let mut buffer = [0; 2];
    // files shorter than the magic number cannot be gzipped
    match file.read_exact(&mut buffer) {
        Ok(()) => Ok(buffer == [0x1f, 0x8b]),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

/// Represents an input table file.
///
/// This abstracts how data is read in, allowing for both plaintext and
/// gzip-compressed input to be read through a common interface.
#[derive(Clone, Debug)]
pub struct InputFile {
    pub filepath: PathBuf,
}

impl InputFile {
    /// Constructs a new `InputFile`.
    ///
    /// # Arguments
    ///
    /// * `filepath` - the path to the file. Gzip-compressed files are
    /// uncompressed automatically, whatever their extension.
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            filepath: filepath.into(),
        }
    }

    /// Opens the file and returns a buffered reader.
    ///
    /// # Returns
    ///
    /// A result containing a `BufReader<Box<dyn Read>>` on success, or a `FileError` on failure.
    ///
    pub fn reader(&self) -> Result<BufReader<Box<dyn Read>>, FileError> {
        if !self.filepath.exists() {
            return Err(FileError::NotFound(self.filepath.clone()));
        }
        let file = File::open(&self.filepath)?;
        let is_gzipped = is_gzipped_file(&self.filepath)?;
        let reader: Box<dyn Read> = if is_gzipped {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };
        Ok(BufReader::new(reader))
    }

    /// Checks if the first line of the file starts with the expected header prefix.
    ///
    /// # Arguments
    ///
    /// * `expect` - the prefix the header line starts with, e.g. `"chrom"`.
    ///
    pub fn has_header(&self, expect: &str) -> Result<bool, FileError> {
        Ok(self.first_line()?.starts_with(expect))
    }

    /// Reads the first line of the file, without its line ending.
    pub fn first_line(&self) -> Result<String, FileError> {
        let mut buf_reader = self.reader()?;
        let mut first_line = String::new();
        buf_reader.read_line(&mut first_line)?;
        Ok(first_line.trim_end_matches(['\n', '\r']).to_string())
    }
}

/// Represents an output file.
///
/// This abstracts writing both plaintext and gzip-compressed files.
pub struct OutputFile {
    pub filepath: PathBuf,
    pub header: Option<Vec<String>>,
}

impl OutputFile {
    /// Constructs a new `OutputFile`.
    ///
    /// # Arguments
    ///
    /// * `filepath` - the output path. If the file extension is `.gz`,
    /// `OutputFile` will write gzip-compressed output.
    /// * `header` - optional lines written first, each prefixed with `#`.
    pub fn new(filepath: impl Into<PathBuf>, header: Option<Vec<String>>) -> Self {
        Self {
            filepath: filepath.into(),
            header,
        }
    }

    /// Opens the file and returns a writer, writing the commented header if set.
    pub fn writer(&self) -> Result<Box<dyn Write>, io::Error> {
        let outfile = &self.filepath;
        let is_gzip = outfile.extension().map_or(false, |ext| ext == "gz");
        let mut writer: Box<dyn Write> = if is_gzip {
            Box::new(BufWriter::new(GzEncoder::new(
                File::create(outfile)?,
                Compression::default(),
            )))
        } else {
            Box::new(BufWriter::new(File::create(outfile)?))
        };
        if let Some(entries) = &self.header {
            for entry in entries {
                writeln!(writer, "#{}", entry)?;
            }
        }
        Ok(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::tempdir;

    #[test]
    fn test_reader_plaintext_and_gzip_agree() {
        let mut plain = String::new();
        InputFile::new("tests/data/regions.bed")
            .reader()
            .unwrap()
            .read_to_string(&mut plain)
            .unwrap();
        let mut gz = String::new();
        InputFile::new("tests/data/regions.bed.gz")
            .reader()
            .unwrap()
            .read_to_string(&mut gz)
            .unwrap();
        assert_eq!(plain, gz);
    }

    #[test]
    fn test_missing_file() {
        let result = InputFile::new("tests/data/no_such_file.bed").reader();
        assert!(matches!(result, Err(FileError::NotFound(_))));
    }

    #[test]
    fn test_has_header() {
        assert!(InputFile::new("tests/data/regions_header.bed")
            .has_header("chrom")
            .unwrap());
        assert!(!InputFile::new("tests/data/regions.bed")
            .has_header("chrom")
            .unwrap());
        assert_eq!(
            InputFile::new("tests/data/regions_space.txt")
                .first_line()
                .unwrap(),
            "chr3 1000 2000"
        );
    }

    #[test]
    fn test_gzip_output_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.tsv.gz");
        {
            let output = OutputFile::new(&path, Some(vec!["karyopype".to_string()]));
            let mut writer = output.writer().unwrap();
            writeln!(writer, "chr1\t0\t10").unwrap();
        }
        let mut contents = String::new();
        InputFile::new(&path)
            .reader()
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "#karyopype\nchr1\t0\t10\n");
    }
}
