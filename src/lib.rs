//! Chromosome-level karyotype diagrams ("karyopypes") with region overlays.
//!
//! A karyopype draws every chromosome of a genome as a horizontal bar scaled
//! to its length, one track per chromosome, and overlays sets of genomic
//! regions (breakpoints, genes, ...) as colored sub-bars.
//!
//! Chromosome sizes come from a bundled catalog of UCSC assemblies
//! ([`list_species`]) or from a user-supplied *genome file* of chromosome
//! names and lengths. Regions can be BED-like files, in-memory tables, or
//! lists of either; only their first three columns are used.
//!
//! Here is an example that plots the human genome with one set of
//! breakpoints and saves it to `hg38_karyopype.png`:
//!
//! ```no_run
//! use karyopype::prelude::*;
//!
//! let regions = RegionInput::from_paths(["breakpoints.bed"]);
//! let figure = plot_karyopype("hg38", None, &regions, PlotConfig::default())
//!                  .expect("could not build figure");
//!
//! for (chrom, count) in figure.skipped() {
//!     eprintln!("{} intervals on {} were not plotted", count, chrom);
//! }
//! figure.save_default().expect("could not save figure");
//! ```
//!
//! The pieces can also be used one at a time:
//!
//! ```no_run
//! use karyopype::prelude::*;
//!
//! let sizes = load_sizes("nomLeu3", None, true).expect("unknown species");
//! let layout = compute_layout(&sizes.names(), &TrackGeometry::default());
//!
//! let (sets, _is_empty) = normalize_regions(
//!     &RegionInput::from_paths(["genes.bed"]),
//!     &RegionOptions::default(),
//! ).expect("could not read regions");
//!
//! for set in sets.unwrap_or_default() {
//!     let grouped = group_segments(&set.intervals, &layout, 1.0, set.color, set.outline)
//!                       .expect("grouping failed");
//!     println!("{}: {} tracks", set.label, grouped.groups.len());
//! }
//! ```

pub mod catalog;
pub mod color;
pub mod error;
pub mod file;
pub mod layout;
mod numeric;
pub mod plot;
pub mod regions;
pub mod segments;
pub mod sizes;

/// The integer type for genomic positions.
///
/// # Developer Notes
/// The longest assembled chromosomes are well under `u32::MAX`, but plant
/// and amphibian genomes come close, so positions are 64-bit.
pub type Position = u64;

pub use catalog::{list_species, load_sizes, Species};
pub use error::KaryopypeError;
pub use layout::{compute_layout, Layout, TrackGeometry};
pub use plot::{plot_karyopype, Figure, PlotConfig};
pub use regions::{normalize_regions, RegionInput, RegionOptions, RegionSet, RegionSource};
pub use segments::{group_segments, BarGroup, GroupedSegments};
pub use sizes::ChromSizes;

pub mod prelude {
    pub use crate::catalog::{list_species, load_sizes, Species};
    pub use crate::color::{palette_color, parse_color};
    pub use crate::error::KaryopypeError;
    pub use crate::layout::{compute_layout, Layout, TrackGeometry};
    pub use crate::plot::{plot_karyopype, Figure, PlotConfig};
    pub use crate::regions::{
        normalize_regions, RegionInput, RegionInterval, RegionOptions, RegionSet, RegionSource,
        Separator, Table,
    };
    pub use crate::segments::{group_segments, BarGroup, GroupedSegments};
    pub use crate::sizes::ChromSizes;
}
