//! The bundled catalog of per-species chromosome size tables.
//!
//! Each entry is a UCSC assembly name (e.g. `hg38`) with the contents of its
//! `data/chromsizes/<species>.chrom.sizes` file, compiled into the library.

use log::debug;
use std::ffi::OsStr;
use std::fmt;
use std::path::Path;

use crate::error::KaryopypeError;
use crate::sizes::ChromSizes;

macro_rules! chromsizes {
    ($($species:literal),* $(,)?) => {
        &[$(
            (
                $species,
                include_str!(concat!(
                    env!("CARGO_MANIFEST_DIR"),
                    "/data/chromsizes/",
                    $species,
                    ".chrom.sizes"
                )),
            ),
        )*]
    };
}

/// Species name and size table contents, sorted by name.
const CATALOG: &[(&str, &str)] = chromsizes!["hg19", "hg38", "mm10", "nomLeu3"];

/// List the species available in the bundled catalog.
pub fn list_species() -> Vec<&'static str> {
    CATALOG.iter().map(|(name, _)| *name).collect()
}

/// Whether `species` has a bundled size table.
pub fn is_known_species(species: &str) -> bool {
    CATALOG.iter().any(|(name, _)| *name == species)
}

/// A species identifier, e.g. `hg38` or `nomLeu3`.
///
/// Identifiers are non-empty and made of ASCII letters, digits, `_`, `-` and
/// `.`; anything else (including non-UTF-8 OS strings) is rejected with
/// [`KaryopypeError::InvalidInputKind`]. A valid identifier need not be in
/// the catalog, since it also labels figures built from custom size tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Species(String);

impl Species {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Species {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&Species> for Species {
    fn from(species: &Species) -> Self {
        species.clone()
    }
}

impl TryFrom<&str> for Species {
    type Error = KaryopypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let valid_char = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.');
        if value.is_empty() || !value.chars().all(valid_char) {
            return Err(KaryopypeError::InvalidInputKind(format!(
                "species name should be an assembly identifier, e.g. 'hg38' (got {:?})",
                value
            )));
        }
        Ok(Species(value.to_string()))
    }
}

impl TryFrom<String> for Species {
    type Error = KaryopypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Species::try_from(value.as_str())
    }
}

impl TryFrom<&String> for Species {
    type Error = KaryopypeError;

    fn try_from(value: &String) -> Result<Self, Self::Error> {
        Species::try_from(value.as_str())
    }
}

impl TryFrom<&OsStr> for Species {
    type Error = KaryopypeError;

    fn try_from(value: &OsStr) -> Result<Self, Self::Error> {
        let value = value.to_str().ok_or_else(|| {
            KaryopypeError::InvalidInputKind(format!(
                "species name should be a string, e.g. 'hg38' (got {:?})",
                value
            ))
        })?;
        Species::try_from(value)
    }
}

/// Load the chromosome size table for a species.
///
/// # Arguments
///  * `species`: the species identifier, e.g. `"hg38"`.
///  * `chromsizes`: an optional size table file; if given it is read instead
///      of the catalog and `species` is only validated.
///  * `canonical`: keep only canonical chromosomes (the usual choice).
///
/// # Errors
/// [`KaryopypeError::InvalidInputKind`] if `species` is not a valid
/// identifier, [`KaryopypeError::UnknownSpecies`] if it is not in the catalog
/// and no `chromsizes` file was given.
pub fn load_sizes<S>(
    species: S,
    chromsizes: Option<&Path>,
    canonical: bool,
) -> Result<ChromSizes, KaryopypeError>
where
    S: TryInto<Species>,
    KaryopypeError: From<S::Error>,
{
    let species: Species = species.try_into()?;
    if let Some(path) = chromsizes {
        return ChromSizes::from_path(path, canonical);
    }
    let (_, contents) = CATALOG
        .iter()
        .find(|(name, _)| *name == species.as_str())
        .ok_or_else(|| KaryopypeError::UnknownSpecies(species.to_string()))?;
    debug!("loading bundled chromosome sizes for {}", species);
    ChromSizes::from_reader(contents.as_bytes(), canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_species() {
        let species = list_species();
        assert_eq!(species, vec!["hg19", "hg38", "mm10", "nomLeu3"]);
        assert!(is_known_species("mm10"));
        assert!(!is_known_species("equCab2"));
    }

    #[test]
    fn test_get_chromosomes_hg38() {
        let cs = load_sizes("hg38", None, true).unwrap();
        assert_eq!(cs.len(), 24);
        assert_eq!(cs.get("chr1"), Some(248_956_422));
        assert!(!cs.contains("chrM"));
    }

    #[test]
    fn test_get_chromosomes_nomleu3() {
        let cs = load_sizes("nomLeu3", None, true).unwrap();
        assert_eq!(cs.len(), 26);
        assert!(cs.contains("chr1a"));
        assert!(cs.contains("chr22b"));
    }

    #[test]
    fn test_get_chromosomes_x() {
        let cs = load_sizes("mm10", None, true).unwrap();
        assert!(cs.names().contains(&"chrX"));
    }

    #[test]
    fn test_whole_catalog_parses() {
        for species in list_species() {
            let canonical = load_sizes(species, None, true).unwrap();
            let all = load_sizes(species, None, false).unwrap();
            assert!(!canonical.is_empty());
            assert!(all.len() > canonical.len(), "{} has no non-canonical rows", species);
        }
    }

    #[test]
    fn test_unknown_species() {
        let result = load_sizes("equCab2", None, true);
        assert!(matches!(result, Err(KaryopypeError::UnknownSpecies(s)) if s == "equCab2"));
    }

    #[test]
    fn test_unknown_species_with_chromsizes() {
        let cs = load_sizes(
            "equCab2",
            Some(Path::new("tests/data/custom.chrom.sizes")),
            true,
        )
        .unwrap();
        assert_eq!(cs.len(), 4);
    }

    #[test]
    fn test_invalid_species_kind() {
        for bad in ["", "hg 38", "../hg38", "hg38\n"] {
            let result = load_sizes(bad, None, true);
            assert!(
                matches!(result, Err(KaryopypeError::InvalidInputKind(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_load_sizes_from_species() {
        let species = Species::try_from("mm10").unwrap();
        let by_ref = load_sizes(&species, None, true).unwrap();
        let by_str = load_sizes("mm10", None, true).unwrap();
        assert_eq!(by_ref, by_str);
        let by_value = load_sizes(species, None, true).unwrap();
        assert_eq!(by_value, by_str);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_species() {
        use std::os::unix::ffi::OsStrExt;
        let species = OsStr::from_bytes(&[0x68, 0x67, 0xff]);
        let result = load_sizes(species, None, true);
        assert!(matches!(result, Err(KaryopypeError::InvalidInputKind(_))));
    }
}
