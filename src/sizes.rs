//! Chromosome size tables.
//!
//! A [`ChromSizes`] is an ordered map of chromosome names to lengths, read
//! from a headerless, tab-delimited *genome file* such as UCSC's
//! `hg38.chrom.sizes`:
//!
//! ```text
//! chr1    248956422
//! chr2    242193529
//! chrUn_KI270742v1        186739
//! ```
//!
//! The order of the file is kept, since it determines the top-to-bottom order
//! of the chromosome tracks in the rendered figure.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use log::debug;
use plotters::style::RGBColor;
use regex::Regex;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::error::KaryopypeError;
use crate::file::{InputFile, OutputFile};
use crate::Position;

lazy_static! {
    /// Primary assembled chromosomes: autosomes, X and Y, with an optional
    /// `a`/`b` suffix for split chromosomes (e.g. gibbon `chr1a`).
    static ref CANONICAL_CHROM: Regex =
        Regex::new(r"^chr([0-9]+|X|Y)[ab]?$").expect("canonical chromosome pattern is valid");
}

/// Whether `chrom` is a canonical chromosome name, i.e. not an unplaced
/// scaffold, alt contig, or the mitochondrial genome.
pub fn is_canonical(chrom: &str) -> bool {
    CANONICAL_CHROM.is_match(chrom)
}

/// An immutable, ordered table of chromosome names and their lengths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChromSizes {
    sizes: IndexMap<String, Position>,
}

/// A size table with a display color attached to every chromosome.
pub type ColoredChromSizes = IndexMap<String, (Position, RGBColor)>;

impl ChromSizes {
    /// Read a size table from any reader over the two-column TSV format.
    ///
    /// If `canonical` is set, rows whose name is not a canonical chromosome
    /// are dropped before the table is built. Duplicated names and zero
    /// lengths are errors.
    pub fn from_reader<R: Read>(reader: R, canonical: bool) -> Result<Self, KaryopypeError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut sizes = IndexMap::new();
        let mut dropped = 0usize;
        for result in rdr.records() {
            let record = result?;
            let chrom = record.get(0).ok_or_else(|| {
                KaryopypeError::InvalidSizesTable("missing chromosome column".to_string())
            })?;
            let length_str = record.get(1).ok_or_else(|| {
                KaryopypeError::InvalidSizesTable(format!("missing length for '{}'", chrom))
            })?;
            let length: Position = length_str.trim().parse().map_err(|_| {
                KaryopypeError::ParseError(format!(
                    "Failed to parse length from string: {}",
                    length_str
                ))
            })?;

            if canonical && !is_canonical(chrom) {
                dropped += 1;
                continue;
            }
            if length == 0 {
                return Err(KaryopypeError::InvalidSizesTable(format!(
                    "chromosome '{}' has zero length",
                    chrom
                )));
            }
            if sizes.contains_key(chrom) {
                return Err(KaryopypeError::InvalidSizesTable(format!(
                    "chromosome '{}' is duplicated",
                    chrom
                )));
            }
            sizes.insert(chrom.to_string(), length);
        }
        if dropped > 0 {
            debug!("dropped {} non-canonical sequences from size table", dropped);
        }
        Ok(ChromSizes { sizes })
    }

    /// Read a (possibly gzip-compressed) size table file.
    pub fn from_path(filepath: impl AsRef<Path>, canonical: bool) -> Result<Self, KaryopypeError> {
        let input_file = InputFile::new(filepath.as_ref());
        debug!("reading chromosome sizes from {}", filepath.as_ref().display());
        Self::from_reader(input_file.reader()?, canonical)
    }

    /// Return the number of chromosomes.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Return if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Length of a chromosome, if present.
    pub fn get(&self, chrom: &str) -> Option<Position> {
        self.sizes.get(chrom).copied()
    }

    pub fn contains(&self, chrom: &str) -> bool {
        self.sizes.contains_key(chrom)
    }

    /// Chromosome names, in table order.
    pub fn names(&self) -> Vec<&str> {
        self.sizes.keys().map(String::as_str).collect()
    }

    /// Iterate over `(name, length)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Position)> {
        self.sizes.iter()
    }

    /// The length of the longest chromosome.
    pub fn max_length(&self) -> Option<Position> {
        self.sizes.values().copied().max()
    }

    /// Derive a copy of this table with `color` attached to every chromosome.
    ///
    /// The table itself is left untouched, so the same [`ChromSizes`] can be
    /// reused across several figures.
    pub fn with_color(&self, color: RGBColor) -> ColoredChromSizes {
        self.sizes
            .iter()
            .map(|(chrom, &length)| (chrom.clone(), (length, color)))
            .collect()
    }

    /// Write the table as a two-column TSV, to standard out if `filepath` is `None`.
    pub fn write_tsv(&self, filepath: Option<&Path>) -> Result<(), KaryopypeError> {
        let mut writer: Box<dyn Write> = match filepath {
            Some(path) => OutputFile::new(path, None).writer()?,
            None => Box::new(io::stdout()),
        };
        for (chrom, length) in self.sizes.iter() {
            writeln!(writer, "{}\t{}", chrom, length)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl From<IndexMap<String, Position>> for ChromSizes {
    fn from(sizes: IndexMap<String, Position>) -> Self {
        ChromSizes { sizes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::WHITESMOKE;

    #[test]
    fn test_is_canonical() {
        for name in ["chr1", "chr22", "chrX", "chrY", "chr1a", "chr22b", "chr100"] {
            assert!(is_canonical(name), "{} should be canonical", name);
        }
        for name in [
            "chrM",
            "chrUn_KI270742v1",
            "chr1_KI270706v1_random",
            "chr6_apd_hap1",
            "chrXY",
            "chr1c",
            "1",
            "chrA",
        ] {
            assert!(!is_canonical(name), "{} should not be canonical", name);
        }
    }

    #[test]
    fn test_canonical_filter_keeps_lengths() {
        let all = ChromSizes::from_path("tests/data/custom.chrom.sizes", false).unwrap();
        let canonical = ChromSizes::from_path("tests/data/custom.chrom.sizes", true).unwrap();
        assert_eq!(all.len(), 6);
        assert_eq!(canonical.names(), vec!["chr1", "chr2", "chrY", "chr3b"]);
        for (chrom, length) in canonical.iter() {
            assert_eq!(all.get(chrom), Some(*length));
        }
        let dropped: Vec<&str> = all
            .names()
            .into_iter()
            .filter(|name| !canonical.contains(name))
            .collect();
        assert_eq!(dropped, vec!["chrA", "chr2_random"]);
    }

    #[test]
    fn test_gzipped_sizes() {
        let plain = ChromSizes::from_path("tests/data/custom.chrom.sizes", true).unwrap();
        let gz = ChromSizes::from_path("tests/data/custom.chrom.sizes.gz", true).unwrap();
        assert_eq!(plain, gz);
    }

    #[test]
    fn test_duplicated_chromosome() {
        let result = ChromSizes::from_path("tests/data/duplicated.chrom.sizes", true);
        assert!(matches!(result, Err(KaryopypeError::InvalidSizesTable(_))));
    }

    #[test]
    fn test_unparseable_length() {
        let result = ChromSizes::from_reader("chr1\tlong\n".as_bytes(), true);
        assert!(matches!(result, Err(KaryopypeError::ParseError(_))));
    }

    #[test]
    fn test_with_color_copies() {
        let sizes = ChromSizes::from_reader("chr1\t100\nchr2\t50\n".as_bytes(), true).unwrap();
        let before = sizes.clone();
        let colored = sizes.with_color(WHITESMOKE);
        assert_eq!(sizes, before);
        assert_eq!(colored.len(), 2);
        for (chrom, (length, color)) in colored.iter() {
            assert_eq!(sizes.get(chrom), Some(*length));
            assert_eq!(*color, WHITESMOKE);
        }
        assert_eq!(sizes.max_length(), Some(100));
    }
}
