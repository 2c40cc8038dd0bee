//! Vertical layout of stacked chromosome tracks.
//!
//! Tracks are placed bottom-up: the *last* chromosome of the input order gets
//! baseline `0.0` and each earlier chromosome sits `height + spacing` above the
//! previous one. On a y axis that grows upward, this puts the first chromosome
//! at the top of the figure.
//!
//! ```
//! use karyopype::layout::{compute_layout, TrackGeometry};
//!
//! let layout = compute_layout(&["chr1", "chr2", "chr3"], &TrackGeometry::default());
//! assert_eq!(layout.get("chr1").unwrap().baseline, 4.0);
//! assert_eq!(layout.get("chr3").unwrap().center, 0.5);
//! ```

use indexmap::IndexMap;

use crate::error::KaryopypeError;
use crate::numeric::tight_range;

/// The height of each track and the gap between consecutive tracks, in y-axis units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    pub height: f64,
    pub spacing: f64,
}

impl TrackGeometry {
    /// Create a new geometry; both values must be finite, the height positive
    /// and the spacing non-negative.
    pub fn new(height: f64, spacing: f64) -> Result<Self, KaryopypeError> {
        if !height.is_finite() || height <= 0.0 {
            return Err(KaryopypeError::InvalidGeometry(format!(
                "track height must be positive (got {})",
                height
            )));
        }
        if !spacing.is_finite() || spacing < 0.0 {
            return Err(KaryopypeError::InvalidGeometry(format!(
                "track spacing must be non-negative (got {})",
                spacing
            )));
        }
        Ok(Self { height, spacing })
    }

    /// The distance between the baselines of consecutive tracks.
    pub fn step(&self) -> f64 {
        self.height + self.spacing
    }
}

impl Default for TrackGeometry {
    fn default() -> Self {
        Self {
            height: 1.0,
            spacing: 1.0,
        }
    }
}

/// Where one chromosome's track sits on the y axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPosition {
    /// The bottom edge of the track.
    pub baseline: f64,
    /// The vertical center of the track, where its label goes.
    pub center: f64,
}

/// The y positions of all chromosome tracks, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    positions: IndexMap<String, TrackPosition>,
    geometry: TrackGeometry,
}

impl Layout {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn get(&self, chrom: &str) -> Option<&TrackPosition> {
        self.positions.get(chrom)
    }

    pub fn contains(&self, chrom: &str) -> bool {
        self.positions.contains_key(chrom)
    }

    pub fn geometry(&self) -> &TrackGeometry {
        &self.geometry
    }

    /// Iterate over `(name, position)` pairs, in the input order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TrackPosition)> {
        self.positions.iter()
    }

    /// Label positions and names for the y axis, top track first.
    pub fn ticks(&self) -> Vec<(f64, &str)> {
        self.positions
            .iter()
            .map(|(chrom, pos)| (pos.center, chrom.as_str()))
            .collect()
    }

    /// The `(bottom, top)` extent covered by the tracks, or `None` if empty.
    pub fn extent(&self) -> Option<(f64, f64)> {
        let edges: Vec<f64> = self
            .positions
            .values()
            .flat_map(|pos| [pos.baseline, pos.baseline + self.geometry.height])
            .collect();
        tight_range(&edges)
    }
}

/// Compute the track positions for chromosomes in display order.
///
/// Iterates `names` in reverse, so the first name gets the largest baseline.
/// A repeated name keeps the position of its first occurrence.
pub fn compute_layout<S: AsRef<str>>(names: &[S], geometry: &TrackGeometry) -> Layout {
    let mut placed = Vec::with_capacity(names.len());
    let mut ybase = 0.0;
    for chrom in names.iter().rev() {
        placed.push((
            chrom.as_ref(),
            TrackPosition {
                baseline: ybase,
                center: ybase + geometry.height / 2.0,
            },
        ));
        ybase += geometry.step();
    }

    let mut positions = IndexMap::with_capacity(placed.len());
    for (chrom, pos) in placed.into_iter().rev() {
        positions.entry(chrom.to_string()).or_insert(pos);
    }
    Layout {
        positions,
        geometry: *geometry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::assert_floats_eq;

    fn baselines(layout: &Layout, names: &[&str]) -> Vec<f64> {
        names.iter().map(|n| layout.get(n).unwrap().baseline).collect()
    }

    fn centers(layout: &Layout, names: &[&str]) -> Vec<f64> {
        names.iter().map(|n| layout.get(n).unwrap().center).collect()
    }

    #[test]
    fn test_layout_reverse_order() {
        let layout = compute_layout(&["A", "B", "C"], &TrackGeometry::default());
        assert_floats_eq(&baselines(&layout, &["A", "B", "C"]), &[4.0, 2.0, 0.0], 1e-12);
        assert_floats_eq(&centers(&layout, &["A", "B", "C"]), &[4.5, 2.5, 0.5], 1e-12);
    }

    #[test]
    fn test_layout_order_sensitive() {
        let forward = compute_layout(&["A", "B", "C"], &TrackGeometry::default());
        let reverse = compute_layout(&["C", "B", "A"], &TrackGeometry::default());
        assert_eq!(forward.get("C").unwrap().baseline, 0.0);
        assert_eq!(reverse.get("A").unwrap().baseline, 0.0);
        assert_eq!(forward.get("A"), reverse.get("C"));
    }

    #[test]
    fn test_layout_ticks_in_input_order() {
        let layout = compute_layout(&["chr1", "chr2"], &TrackGeometry::default());
        assert_eq!(layout.ticks(), vec![(2.5, "chr1"), (0.5, "chr2")]);
    }

    #[test]
    fn test_layout_geometry() {
        let geometry = TrackGeometry::new(0.5, 0.25).unwrap();
        let layout = compute_layout(&["x", "y", "z"], &geometry);
        assert_floats_eq(&baselines(&layout, &["x", "y", "z"]), &[1.5, 0.75, 0.0], 1e-12);
        assert_floats_eq(&centers(&layout, &["x", "y", "z"]), &[1.75, 1.0, 0.25], 1e-12);
        assert_eq!(layout.extent(), Some((0.0, 2.0)));
    }

    #[test]
    fn test_tracks_never_overlap() {
        let names: Vec<String> = (1..=22).map(|i| format!("chr{}", i)).collect();
        let geometry = TrackGeometry::new(0.8, 0.1).unwrap();
        let layout = compute_layout(&names, &geometry);
        let mut bases: Vec<f64> = layout.iter().map(|(_, pos)| pos.baseline).collect();
        bases.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for pair in bases.windows(2) {
            assert!(pair[1] - pair[0] >= geometry.height);
        }
    }

    #[test]
    fn test_layout_idempotent() {
        let names = ["chr1", "chr2", "chrX"];
        let geometry = TrackGeometry::new(0.3, 0.7).unwrap();
        let first = compute_layout(&names, &geometry);
        let second = compute_layout(&names, &geometry);
        assert_eq!(first, second);
        for ((n1, p1), (n2, p2)) in first.iter().zip(second.iter()) {
            assert_eq!(n1, n2);
            assert_eq!(p1.baseline.to_bits(), p2.baseline.to_bits());
            assert_eq!(p1.center.to_bits(), p2.center.to_bits());
        }
    }

    #[test]
    fn test_empty_layout() {
        let layout = compute_layout::<&str>(&[], &TrackGeometry::default());
        assert!(layout.is_empty());
        assert_eq!(layout.extent(), None);
    }

    #[test]
    fn test_invalid_geometry() {
        assert!(TrackGeometry::new(0.0, 1.0).is_err());
        assert!(TrackGeometry::new(1.0, -0.5).is_err());
        assert!(TrackGeometry::new(f64::NAN, 1.0).is_err());
    }
}
