use clap::Parser;
use karyopype::prelude::*;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// The species to plot, e.g. hg38
    #[clap(long, value_parser)]
    species: String,

    /// Region files to overlay
    #[clap(value_parser)]
    regions: Vec<String>,
}

fn main() -> Result<(), KaryopypeError> {
    let args = Args::parse();
    let regions = RegionInput::from_paths(&args.regions);
    let figure = plot_karyopype(args.species.as_str(), None, &regions, PlotConfig::default())?;

    for (chrom, pos) in figure.layout().iter() {
        println!("{}\t{}\t{}", chrom, pos.baseline, pos.center);
    }
    for overlay in figure.overlays() {
        println!("{}\t{} track(s)", overlay.label, overlay.segments.groups.len());
    }

    let path = figure.save_default()?;
    println!("wrote {}", path.display());
    Ok(())
}
