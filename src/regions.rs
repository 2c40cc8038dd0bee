//! Region tables and their normalization into [`RegionSet`]s.
//!
//! Regions can be given as BED-like files, as in-memory [`Table`]s, or as
//! already-parsed intervals, alone or as a list of overlays. Whatever the
//! source, only the first three columns are used and they are read
//! positionally as chromosome, start and end; any further columns (names,
//! scores, strands) are dropped.

use log::{debug, info};
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::color::{palette_color, parse_color};
use crate::error::KaryopypeError;
use crate::file::{InputFile, OutputFile};
use crate::Position;

/// The column names of a normalized region table.
pub const REGION_COLUMNS: [&str; 3] = ["chrom", "start", "end"];

/// A single genomic interval, `[start, end)` on `chrom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionInterval {
    pub chrom: String,
    pub start: Position,
    pub end: Position,
}

impl RegionInterval {
    /// Create a new interval, checking `start <= end`.
    pub fn new(chrom: &str, start: Position, end: Position) -> Result<Self, KaryopypeError> {
        if start > end {
            return Err(KaryopypeError::InvalidInterval(chrom.to_string(), start, end));
        }
        Ok(Self {
            chrom: chrom.to_string(),
            start,
            end,
        })
    }

    /// The width of the interval in basepairs.
    pub fn width(&self) -> Position {
        self.end - self.start
    }
}

/// A column separator for region tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    /// A single tab, as in BED files.
    #[default]
    Tab,
    /// A single space.
    Space,
    Comma,
    /// Any run of spaces or tabs.
    Whitespace,
}

impl Separator {
    fn delimiter(&self) -> Option<u8> {
        match self {
            Separator::Tab => Some(b'\t'),
            Separator::Space => Some(b' '),
            Separator::Comma => Some(b','),
            Separator::Whitespace => None,
        }
    }
}

impl FromStr for Separator {
    type Err = KaryopypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tab" | "\t" | "\\t" => Ok(Separator::Tab),
            "space" | " " => Ok(Separator::Space),
            "comma" | "," => Ok(Separator::Comma),
            "whitespace" => Ok(Separator::Whitespace),
            _ => Err(KaryopypeError::InvalidInputKind(format!(
                "unknown separator '{}' (expected tab, space, comma, or whitespace)",
                s
            ))),
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Separator::Tab => "tab",
            Separator::Space => "space",
            Separator::Comma => "comma",
            Separator::Whitespace => "whitespace",
        };
        write!(f, "{}", name)
    }
}

/// Options for reading region tables.
#[derive(Debug, Clone, Default)]
pub struct RegionOptions {
    /// The column separator of region files; tab by default.
    pub separator: Separator,
}

/// A generic in-memory table of string cells.
///
/// Column names are optional and never used for interpretation: the first
/// three cells of each row are taken as chromosome, start and end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Option<Vec<String>>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Build a headerless table from rows of anything string-like.
    pub fn from_rows<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Self {
            columns: None,
            rows,
        }
    }

    /// The number of columns, taken from the header or the widest row.
    pub fn ncols(&self) -> usize {
        match &self.columns {
            Some(columns) => columns.len(),
            None => self.rows.iter().map(Vec::len).max().unwrap_or(0),
        }
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }
}

/// One reference to a table of regions.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionSource {
    /// A BED-like file, possibly gzip-compressed.
    Path(PathBuf),
    /// An in-memory table with at least three columns.
    Table(Table),
    /// Already-parsed intervals.
    Intervals(Vec<RegionInterval>),
}

impl From<PathBuf> for RegionSource {
    fn from(path: PathBuf) -> Self {
        RegionSource::Path(path)
    }
}

impl From<&Path> for RegionSource {
    fn from(path: &Path) -> Self {
        RegionSource::Path(path.to_path_buf())
    }
}

impl From<&str> for RegionSource {
    fn from(path: &str) -> Self {
        RegionSource::Path(PathBuf::from(path))
    }
}

impl From<Table> for RegionSource {
    fn from(table: Table) -> Self {
        RegionSource::Table(table)
    }
}

impl From<Vec<RegionInterval>> for RegionSource {
    fn from(intervals: Vec<RegionInterval>) -> Self {
        RegionSource::Intervals(intervals)
    }
}

/// The region argument of a plot: nothing, one table, or several overlays.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RegionInput {
    #[default]
    Absent,
    Single(RegionSource),
    List(Vec<RegionSource>),
}

impl RegionInput {
    /// Build the input from a list of region files; none is [`RegionInput::Absent`].
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut sources: Vec<RegionSource> = paths
            .into_iter()
            .map(|p| RegionSource::Path(p.into()))
            .collect();
        match sources.len() {
            0 => RegionInput::Absent,
            1 => RegionInput::Single(sources.remove(0)),
            _ => RegionInput::List(sources),
        }
    }
}

impl From<RegionSource> for RegionInput {
    fn from(source: RegionSource) -> Self {
        RegionInput::Single(source)
    }
}

impl From<Vec<RegionSource>> for RegionInput {
    fn from(sources: Vec<RegionSource>) -> Self {
        RegionInput::List(sources)
    }
}

impl From<Option<RegionSource>> for RegionInput {
    fn from(source: Option<RegionSource>) -> Self {
        source.map_or(RegionInput::Absent, RegionInput::Single)
    }
}

/// An ordered set of intervals drawn with one fill and one outline color.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSet {
    /// A label for the set, the file name for file sources.
    pub label: String,
    pub intervals: Vec<RegionInterval>,
    pub color: RGBColor,
    pub outline: RGBColor,
}

impl RegionSet {
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// The set as a three-column `(chrom, start, end)` table.
    pub fn to_table(&self) -> Table {
        let columns = REGION_COLUMNS.iter().map(|c| c.to_string()).collect();
        let rows = self
            .intervals
            .iter()
            .map(|r| vec![r.chrom.clone(), r.start.to_string(), r.end.to_string()])
            .collect();
        Table::new(Some(columns), rows)
    }

    /// Write the set as BED3 to `writer`.
    pub fn write_bed<W: Write>(&self, writer: &mut W) -> Result<(), KaryopypeError> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(writer);
        for interval in &self.intervals {
            wtr.serialize(interval)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// The normalized overlays of one plot, in input order.
pub type NormalizedRegions = Vec<RegionSet>;

/// Write region sets as BED3, to standard out if `filepath` is `None`.
pub fn write_regions(sets: &[RegionSet], filepath: Option<&Path>) -> Result<(), KaryopypeError> {
    let mut writer: Box<dyn Write> = match filepath {
        Some(path) => OutputFile::new(path, None).writer()?,
        None => Box::new(io::stdout()),
    };
    for set in sets {
        set.write_bed(&mut writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Replace the palette colors of `sets` with user colors, in order.
///
/// Sets beyond the end of `colors` keep their palette color. More colors
/// than sets is an error.
pub fn recolor_region_sets<S: AsRef<str>>(
    sets: &mut [RegionSet],
    colors: &[S],
) -> Result<(), KaryopypeError> {
    if colors.len() > sets.len() {
        return Err(KaryopypeError::InvalidColor(format!(
            "{} color(s) given for {} region set(s)",
            colors.len(),
            sets.len()
        )));
    }
    for (set, color) in sets.iter_mut().zip(colors) {
        let color = parse_color(color.as_ref())?;
        set.color = color;
        set.outline = color;
    }
    Ok(())
}

/// Normalize any region input into a list of [`RegionSet`]s.
///
/// Returns `(None, true)` when there are no regions (absent input or an empty
/// list); otherwise `(Some(sets), false)` with one set per reference, colored
/// by position from the overlay palette.
pub fn normalize_regions(
    input: &RegionInput,
    options: &RegionOptions,
) -> Result<(Option<NormalizedRegions>, bool), KaryopypeError> {
    match input {
        RegionInput::Absent => Ok(normalize_absent()),
        RegionInput::Single(source) => normalize_single(source, options),
        RegionInput::List(sources) => normalize_list(sources, options),
    }
}

fn normalize_absent() -> (Option<NormalizedRegions>, bool) {
    info!("No additional regions, only showing chromosome sizes");
    (None, true)
}

fn normalize_single(
    source: &RegionSource,
    options: &RegionOptions,
) -> Result<(Option<NormalizedRegions>, bool), KaryopypeError> {
    let set = normalize_source(source, 0, options)?;
    Ok((Some(vec![set]), false))
}

fn normalize_list(
    sources: &[RegionSource],
    options: &RegionOptions,
) -> Result<(Option<NormalizedRegions>, bool), KaryopypeError> {
    if sources.is_empty() {
        return Ok(normalize_absent());
    }
    let sets = sources
        .iter()
        .enumerate()
        .map(|(index, source)| normalize_source(source, index, options))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((Some(sets), false))
}

/// Normalize one region reference, coloring it for overlay position `index`.
pub fn normalize_source(
    source: &RegionSource,
    index: usize,
    options: &RegionOptions,
) -> Result<RegionSet, KaryopypeError> {
    let (label, intervals) = match source {
        RegionSource::Path(path) => {
            let label = path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            (label, read_regions(path, options.separator)?)
        }
        RegionSource::Table(table) => (format!("table {}", index + 1), table_intervals(table)?),
        RegionSource::Intervals(intervals) => {
            for r in intervals {
                if r.start > r.end {
                    return Err(KaryopypeError::InvalidInterval(r.chrom.clone(), r.start, r.end));
                }
            }
            (format!("regions {}", index + 1), intervals.clone())
        }
    };
    let color = palette_color(index);
    Ok(RegionSet {
        label,
        intervals,
        color,
        outline: color,
    })
}

/// Parse the first three cells of a row into an interval.
fn row_interval<'a, I>(fields: I, line: impl Fn() -> String) -> Result<RegionInterval, KaryopypeError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut fields = fields.into_iter();
    let mut next = || fields.next().ok_or_else(|| KaryopypeError::TooFewColumns(line()));
    let chrom = next()?.trim();
    let start_str = next()?;
    let end_str = next()?;
    let parse = |s: &str, column: &str| -> Result<Position, KaryopypeError> {
        s.trim().parse().map_err(|_| {
            KaryopypeError::ParseError(format!("Failed to parse {} from string: {}", column, s))
        })
    };
    let start = parse(start_str, "start")?;
    let end = parse(end_str, "end")?;
    RegionInterval::new(chrom, start, end)
}

/// Extract intervals from an in-memory table.
pub fn table_intervals(table: &Table) -> Result<Vec<RegionInterval>, KaryopypeError> {
    if !table.rows.is_empty() && table.ncols() < 3 {
        return Err(KaryopypeError::TooFewColumns(format!(
            "table has {} column(s)",
            table.ncols()
        )));
    }
    table
        .rows
        .iter()
        .map(|row| row_interval(row.iter().map(String::as_str), || row.join("\t")))
        .collect()
}

/// Whether the first line of a region file is a header: it starts with
/// `chrom` and its start and end cells are not integers.
fn detect_header(input_file: &InputFile, separator: Separator) -> Result<bool, KaryopypeError> {
    if !input_file.has_header("chrom")? {
        return Ok(false);
    }
    let line = input_file.first_line()?;
    let fields: Vec<&str> = match separator.delimiter() {
        Some(delimiter) => line.split(char::from(delimiter)).collect(),
        None => line.split_whitespace().collect(),
    };
    let is_position = |i: usize| {
        fields
            .get(i)
            .map_or(false, |s| s.trim().parse::<Position>().is_ok())
    };
    Ok(!(is_position(1) && is_position(2)))
}

/// Read the intervals of a BED-like file.
///
/// Lines starting with `#` are comments. A first line starting with `chrom`
/// whose start and end cells are not integers is taken to be a header.
/// Cells are never quoted.
pub fn read_regions(
    filepath: impl AsRef<Path>,
    separator: Separator,
) -> Result<Vec<RegionInterval>, KaryopypeError> {
    let input_file = InputFile::new(filepath.as_ref());
    let has_header = detect_header(&input_file, separator)?;
    debug!(
        "reading regions from {} (separator: {}, header: {})",
        filepath.as_ref().display(),
        separator,
        has_header
    );

    let Some(delimiter) = separator.delimiter() else {
        let mut intervals = Vec::new();
        for (i, result) in input_file.reader()?.lines().enumerate() {
            let line = result?;
            if (i == 0 && has_header) || line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            intervals.push(row_interval(line.split_whitespace(), || line.clone())?);
        }
        return Ok(intervals);
    };

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(has_header)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .from_reader(input_file.reader()?);

    let mut intervals = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = || record.iter().collect::<Vec<_>>().join("\t");
        intervals.push(row_interval(record.iter(), line)?);
    }
    Ok(intervals)
}
