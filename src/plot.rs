//! Building and rendering karyopype figures.
//!
//! A [`Figure`] is created explicitly from a size table and then receives
//! region overlays one set at a time; nothing is drawn until it is saved or
//! rendered, at which point the whole scene is drawn with `plotters` onto a
//! PNG or SVG backend.
//!
//! ```no_run
//! use karyopype::prelude::*;
//!
//! let regions = RegionInput::from_paths(["breakpoints.bed"]);
//! let figure = plot_karyopype("hg38", None, &regions, PlotConfig::default())
//!                  .expect("could not build figure");
//! figure.save_default().expect("could not save figure");
//! ```

use indexmap::IndexMap;
use log::info;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};

use crate::catalog::{load_sizes, Species};
use crate::color::{OUTLINE, WHITESMOKE};
use crate::error::KaryopypeError;
use crate::layout::{compute_layout, Layout, TrackGeometry};
use crate::numeric::bp_to_mbp;
use crate::regions::{normalize_regions, RegionInput, RegionOptions, RegionSet};
use crate::segments::{group_region_set, ideogram_groups, GroupedSegments};
use crate::sizes::ChromSizes;
use crate::Position;

/// Figure settings.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    pub geometry: TrackGeometry,
    pub ideogram_color: RGBColor,
    pub ideogram_outline: RGBColor,
    /// Title override; the default is `"{species} Karyopype"`.
    pub title: Option<String>,
    /// Keep only canonical chromosomes of the size table.
    pub canonical: bool,
    pub region_options: RegionOptions,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 700,
            height: 500,
            geometry: TrackGeometry::default(),
            ideogram_color: WHITESMOKE,
            ideogram_outline: OUTLINE,
            title: None,
            canonical: true,
            region_options: RegionOptions::default(),
        }
    }
}

/// One region set placed on a figure.
#[derive(Debug, Clone)]
pub struct Overlay {
    pub label: String,
    pub segments: GroupedSegments,
}

/// A karyopype figure: chromosome ideograms plus any region overlays.
#[derive(Debug, Clone)]
pub struct Figure {
    label: String,
    config: PlotConfig,
    layout: Layout,
    max_length: Position,
    ideograms: GroupedSegments,
    overlays: Vec<Overlay>,
    skipped: IndexMap<String, usize>,
}

impl Figure {
    /// Create a figure with one ideogram per chromosome of `sizes`.
    ///
    /// `label` names the figure (usually the species) and is used for the
    /// title, the y axis description, and the default file name.
    pub fn new(label: &str, sizes: &ChromSizes, config: PlotConfig) -> Result<Self, KaryopypeError> {
        if sizes.is_empty() {
            return Err(KaryopypeError::InvalidSizesTable(
                "no chromosomes to plot".to_string(),
            ));
        }
        let layout = compute_layout(&sizes.names(), &config.geometry);
        let colored = sizes.with_color(config.ideogram_color);
        let ideograms = ideogram_groups(
            &colored,
            &layout,
            config.geometry.height,
            config.ideogram_outline,
        );
        Ok(Figure {
            label: label.to_string(),
            max_length: sizes.max_length().unwrap_or(0),
            config,
            layout,
            ideograms,
            overlays: Vec::new(),
            skipped: IndexMap::new(),
        })
    }

    /// Place a region set on the figure, on top of earlier overlays.
    pub fn add_regions(&mut self, set: &RegionSet) -> Result<&Overlay, KaryopypeError> {
        let segments = group_region_set(set, &self.layout, self.config.geometry.height)?;
        for (chrom, count) in segments.skipped.iter() {
            *self.skipped.entry(chrom.clone()).or_insert(0) += count;
        }
        self.overlays.push(Overlay {
            label: set.label.clone(),
            segments,
        });
        Ok(&self.overlays[self.overlays.len() - 1])
    }

    /// Place several region sets, in order.
    pub fn add_region_sets(&mut self, sets: &[RegionSet]) -> Result<(), KaryopypeError> {
        for set in sets {
            self.add_regions(set)?;
        }
        Ok(())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn ideograms(&self) -> &GroupedSegments {
        &self.ideograms
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    /// Chromosomes named by overlays but missing from the size table, with
    /// the number of intervals dropped for each.
    pub fn skipped(&self) -> &IndexMap<String, usize> {
        &self.skipped
    }

    pub fn title(&self) -> String {
        self.config
            .title
            .clone()
            .unwrap_or_else(|| format!("{} Karyopype", self.label))
    }

    /// The default output file, `{label}_karyopype.png`.
    pub fn default_filename(&self) -> PathBuf {
        PathBuf::from(format!("{}_karyopype.png", self.label))
    }

    /// Save the figure to the default file in the working directory.
    pub fn save_default(&self) -> Result<PathBuf, KaryopypeError> {
        let path = self.default_filename();
        self.save(&path)?;
        Ok(path)
    }

    /// Save the figure as PNG or SVG, chosen by the file extension.
    pub fn save(&self, filepath: impl AsRef<Path>) -> Result<(), KaryopypeError> {
        let path = filepath.as_ref();
        let size = (self.config.width, self.config.height);
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
        match extension.as_deref() {
            Some("png") => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                self.draw(&root)?;
            }
            Some("svg") => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                self.draw(&root)?;
            }
            _ => {
                return Err(KaryopypeError::UnsupportedImageFormat(
                    path.display().to_string(),
                ))
            }
        }
        info!("wrote {}", path.display());
        Ok(())
    }

    /// Render the figure to an SVG document.
    pub fn to_svg_string(&self) -> Result<String, KaryopypeError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.config.width, self.config.height))
                .into_drawing_area();
            self.draw(&root)?;
        }
        Ok(svg)
    }

    /// Draw the figure onto any `plotters` drawing area.
    pub fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), KaryopypeError> {
        let plot_err =
            |e: DrawingAreaErrorKind<DB::ErrorType>| KaryopypeError::PlotError(e.to_string());

        root.fill(&WHITE).map_err(plot_err)?;

        let (y_min, y_max) = self.layout.extent().unwrap_or((0.0, 1.0));
        let x_max = self.max_length.max(1) as f64;

        let mut chart = ChartBuilder::on(root)
            .caption(self.title(), ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(0f64..x_max, y_min..y_max)
            .map_err(plot_err)?;

        let mbp = |x: &f64| bp_to_mbp(*x).map_or_else(String::new, |m| m.to_string());
        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .y_labels(0)
            .x_label_formatter(&mbp)
            .x_desc("Chromosome Position (Mbp)")
            .y_desc(format!("{} Chromosome", self.label))
            .draw()
            .map_err(plot_err)?;

        let layers = std::iter::once(&self.ideograms)
            .chain(self.overlays.iter().map(|overlay| &overlay.segments));
        for layer in layers {
            for group in layer.groups.iter() {
                let (baseline, height) = group.y_range;
                let bar = |&(start, width): &(Position, Position)| {
                    [(start as f64, baseline), ((start + width) as f64, baseline + height)]
                };
                chart
                    .draw_series(
                        group
                            .xranges
                            .iter()
                            .map(|x| Rectangle::new(bar(x), group.fill.filled())),
                    )
                    .map_err(plot_err)?;
                chart
                    .draw_series(
                        group
                            .xranges
                            .iter()
                            .map(|x| Rectangle::new(bar(x), group.outline.stroke_width(1))),
                    )
                    .map_err(plot_err)?;
            }
        }

        // chromosome names go in the y label area, left of each track center
        let label_style = ("sans-serif", 12)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Center));
        for (center, chrom) in self.layout.ticks() {
            let (x, y) = chart.backend_coord(&(0.0, center));
            root.draw(&Text::new(chrom.to_string(), (x - 6, y), label_style.clone()))
                .map_err(plot_err)?;
        }

        root.present().map_err(plot_err)?;
        Ok(())
    }
}

/// Build the karyopype figure of a species with zero or more region overlays.
///
/// # Arguments
///  * `species`: the species identifier, e.g. `"hg38"` or `"nomLeu3"`.
///  * `chromsizes`: an optional size table file used instead of the catalog.
///  * `regions`: the region overlays, if any.
///  * `config`: figure settings.
pub fn plot_karyopype<S>(
    species: S,
    chromsizes: Option<&Path>,
    regions: &RegionInput,
    config: PlotConfig,
) -> Result<Figure, KaryopypeError>
where
    S: TryInto<Species>,
    KaryopypeError: From<S::Error>,
{
    let species: Species = species.try_into()?;
    let sizes = load_sizes::<&Species>(&species, chromsizes, config.canonical)?;
    let (sets, _is_empty) = normalize_regions(regions, &config.region_options)?;
    let mut figure = Figure::new(species.as_str(), &sizes, config)?;
    if let Some(sets) = sets {
        info!("Writing {} region set(s) to figure", sets.len());
        figure.add_region_sets(&sets)?;
    }
    Ok(figure)
}
