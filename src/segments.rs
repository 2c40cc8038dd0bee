//! Grouping of intervals into drawable horizontal bar groups.
//!
//! A [`BarGroup`] is all the bars of one chromosome track: a shared y range
//! and a list of `(start, width)` x ranges, drawn in order so that later bars
//! cover earlier ones.

use genomap::GenomeMap;
use indexmap::IndexMap;
use log::warn;
use plotters::style::RGBColor;

use crate::error::KaryopypeError;
use crate::layout::Layout;
use crate::regions::{RegionInterval, RegionSet};
use crate::sizes::ColoredChromSizes;
use crate::Position;

/// The bars of one chromosome track.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    pub chrom: String,
    /// The `(baseline, height)` of the bars.
    pub y_range: (f64, f64),
    /// The `(start, width)` of each bar, in input order.
    pub xranges: Vec<(Position, Position)>,
    pub fill: RGBColor,
    pub outline: RGBColor,
}

/// Bar groups, plus the intervals that could not be placed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedSegments {
    pub groups: Vec<BarGroup>,
    /// Chromosomes missing from the layout, with the number of intervals
    /// dropped for each, in order of first occurrence.
    pub skipped: IndexMap<String, usize>,
}

impl GroupedSegments {
    pub fn get(&self, chrom: &str) -> Option<&BarGroup> {
        self.groups.iter().find(|group| group.chrom == chrom)
    }

    /// The total number of dropped intervals.
    pub fn num_skipped(&self) -> usize {
        self.skipped.values().sum()
    }
}

/// Group intervals by chromosome into bar groups anchored on the layout.
///
/// Intervals on chromosomes missing from `layout` are left out of the groups
/// and counted in [`GroupedSegments::skipped`]. No group is emitted for a
/// chromosome without intervals.
pub fn group_segments(
    intervals: &[RegionInterval],
    layout: &Layout,
    track_height: f64,
    fill: RGBColor,
    outline: RGBColor,
) -> Result<GroupedSegments, KaryopypeError> {
    let mut xranges: GenomeMap<Vec<(Position, Position)>> = GenomeMap::new();
    let mut skipped = IndexMap::new();

    for interval in intervals {
        if !layout.contains(&interval.chrom) {
            *skipped.entry(interval.chrom.clone()).or_insert(0) += 1;
            continue;
        }
        let bar = (interval.start, interval.width());
        if let Some(chrom_bars) = xranges.get_mut(&interval.chrom) {
            chrom_bars.push(bar);
        } else {
            xranges.insert(&interval.chrom, vec![bar])?;
        }
    }

    for (chrom, count) in skipped.iter() {
        warn!(
            "skipping {} interval(s) on '{}', which is not in the chromosome sizes",
            count, chrom
        );
    }

    let mut groups = Vec::with_capacity(xranges.len());
    for (chrom, bars) in xranges.iter() {
        let baseline = match layout.get(chrom) {
            Some(pos) => pos.baseline,
            None => continue,
        };
        groups.push(BarGroup {
            chrom: chrom.clone(),
            y_range: (baseline, track_height),
            xranges: bars.clone(),
            fill,
            outline,
        });
    }
    Ok(GroupedSegments { groups, skipped })
}

/// Group a region set, using its own colors.
pub fn group_region_set(
    set: &RegionSet,
    layout: &Layout,
    track_height: f64,
) -> Result<GroupedSegments, KaryopypeError> {
    group_segments(&set.intervals, layout, track_height, set.color, set.outline)
}

/// One full-length bar per chromosome, filled with its attached color.
pub fn ideogram_groups(
    sizes: &ColoredChromSizes,
    layout: &Layout,
    track_height: f64,
    outline: RGBColor,
) -> GroupedSegments {
    let mut grouped = GroupedSegments::default();
    for (chrom, &(length, fill)) in sizes.iter() {
        match layout.get(chrom) {
            Some(pos) => grouped.groups.push(BarGroup {
                chrom: chrom.clone(),
                y_range: (pos.baseline, track_height),
                xranges: vec![(0, length)],
                fill,
                outline,
            }),
            None => {
                grouped.skipped.insert(chrom.clone(), 1);
            }
        }
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{OUTLINE, PALETTE, WHITESMOKE};
    use crate::layout::{compute_layout, TrackGeometry};
    use crate::sizes::ChromSizes;

    fn interval(chrom: &str, start: Position, end: Position) -> RegionInterval {
        RegionInterval::new(chrom, start, end).unwrap()
    }

    fn layout() -> Layout {
        compute_layout(&["chr1", "chr2", "chr3"], &TrackGeometry::default())
    }

    #[test]
    fn test_group_by_chromosome() {
        let intervals = vec![
            interval("chr1", 10, 20),
            interval("chr2", 5, 50),
            interval("chr1", 100, 130),
            interval("chr1", 15, 15),
        ];
        let grouped = group_segments(&intervals, &layout(), 1.0, PALETTE[0], PALETTE[0]).unwrap();
        assert_eq!(grouped.groups.len(), 2);
        assert!(grouped.skipped.is_empty());

        let chr1 = grouped.get("chr1").unwrap();
        assert_eq!(chr1.xranges, vec![(10, 10), (100, 30), (15, 0)]);
        assert_eq!(chr1.y_range, (4.0, 1.0));
        assert_eq!(chr1.fill, PALETTE[0]);

        let chr2 = grouped.get("chr2").unwrap();
        assert_eq!(chr2.xranges, vec![(5, 45)]);
        assert_eq!(chr2.y_range, (2.0, 1.0));
    }

    #[test]
    fn test_group_skips_and_reports_unknown() {
        let intervals = vec![
            interval("chr1", 10, 20),
            interval("chrUn_foo", 0, 10),
            interval("chr9", 0, 10),
            interval("chrUn_foo", 20, 30),
        ];
        let grouped = group_segments(&intervals, &layout(), 1.0, PALETTE[1], PALETTE[1]).unwrap();
        assert_eq!(grouped.groups.len(), 1);
        assert!(grouped.get("chrUn_foo").is_none());
        assert!(grouped.get("chr9").is_none());
        assert_eq!(grouped.skipped.get("chrUn_foo"), Some(&2));
        assert_eq!(grouped.skipped.get("chr9"), Some(&1));
        assert_eq!(grouped.num_skipped(), 3);
    }

    #[test]
    fn test_no_empty_groups() {
        let grouped = group_segments(&[], &layout(), 1.0, PALETTE[0], PALETTE[0]).unwrap();
        assert!(grouped.groups.is_empty());

        let grouped = group_segments(
            &[interval("chr3", 0, 1)],
            &layout(),
            1.0,
            PALETTE[0],
            PALETTE[0],
        )
        .unwrap();
        assert_eq!(grouped.groups.len(), 1);
        assert!(grouped.groups.iter().all(|g| !g.xranges.is_empty()));
    }

    #[test]
    fn test_ideograms() {
        let sizes = ChromSizes::from_reader("chr1\t300\nchr2\t200\nchr3\t100\n".as_bytes(), true)
            .unwrap();
        let layout = compute_layout(&sizes.names(), &TrackGeometry::default());
        let ideograms = ideogram_groups(&sizes.with_color(WHITESMOKE), &layout, 1.0, OUTLINE);
        assert_eq!(ideograms.groups.len(), 3);
        assert_eq!(ideograms.groups[0].chrom, "chr1");
        assert_eq!(ideograms.groups[0].xranges, vec![(0, 300)]);
        assert_eq!(ideograms.groups[2].y_range, (0.0, 1.0));
        assert!(ideograms.groups.iter().all(|g| g.fill == WHITESMOKE));
    }
}
