use clap::{Parser, Subcommand};
use karyopype::prelude::*;
use karyopype::regions::{recolor_region_sets, write_regions};
use log::LevelFilter;
use std::ffi::OsString;
use std::path::PathBuf;

const INFO: &str = "\
karyopype: chromosome-level karyotype plots with region overlays
usage: karyopype [--help] <subcommand>

Subcommands:

  species: list the species with bundled chromosome sizes.
  sizes:   print the chromosome sizes of a species.
  regions: normalize region files to BED3.
  plot:    plot a karyopype, optionally with region overlays.

";

#[derive(Parser)]
#[clap(name = "karyopype")]
#[clap(about = INFO)]
struct Cli {
    /// increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the species with bundled chromosome sizes.
    Species,
    /// Print the chromosome sizes of a species as a two-column TSV.
    Sizes {
        /// the species name, e.g. hg38
        #[arg(long, required = true)]
        species: OsString,
        /// a TSV file of chromosome names and their lengths, used instead of the bundled sizes
        #[arg(long)]
        chromsizes: Option<PathBuf>,
        /// keep non-canonical sequences (unplaced scaffolds, alt contigs, chrM)
        #[arg(long, default_value_t = false)]
        all: bool,
        /// the output file path (if not set, uses standard out)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Normalize BED-like region files to BED3 (chrom, start, end).
    Regions {
        /// the column separator: tab, space, comma, or whitespace
        #[arg(long, default_value = "tab")]
        sep: String,
        /// the output file path (if not set, uses standard out)
        #[arg(long)]
        output: Option<PathBuf>,
        /// BED-like files whose first three columns are chromosome, start, and end
        #[arg(required = true)]
        regions: Vec<PathBuf>,
    },
    /// Plot a karyopype of a species.
    ///
    /// Each region file is drawn as its own overlay, colored in order from
    /// the palette (red, blue, green, ...) unless --colors is given.
    ///
    /// Example:
    ///
    ///  $ karyopype plot --species hg38 breakpoints.bed genes.bed
    Plot {
        /// the species name, e.g. hg38
        #[arg(long, required = true)]
        species: OsString,
        /// a TSV file of chromosome names and their lengths, used instead of the bundled sizes
        #[arg(long)]
        chromsizes: Option<PathBuf>,
        /// keep non-canonical sequences (unplaced scaffolds, alt contigs, chrM)
        #[arg(long, default_value_t = false)]
        all: bool,
        /// the column separator of region files: tab, space, comma, or whitespace
        #[arg(long, default_value = "tab")]
        sep: String,
        /// overlay colors, by name or #rrggbb, one per region file
        #[arg(long, value_delimiter = ',')]
        colors: Vec<String>,
        /// the figure title (default: "<species> Karyopype")
        #[arg(long)]
        title: Option<String>,
        /// image width in pixels
        #[arg(long, default_value_t = 700)]
        width: u32,
        /// image height in pixels
        #[arg(long, default_value_t = 500)]
        height: u32,
        /// the output image, .png or .svg (default: <species>_karyopype.png)
        #[arg(long)]
        output: Option<PathBuf>,
        /// BED-like region files to overlay
        regions: Vec<PathBuf>,
    },
}

fn init_logging(debug: u8) {
    let level = match debug {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_secs()
        .init();
}

fn print_sizes(
    species: &OsString,
    chromsizes: Option<&PathBuf>,
    all: bool,
    output: Option<&PathBuf>,
) -> Result<(), KaryopypeError> {
    let sizes = load_sizes(species.as_os_str(), chromsizes.map(PathBuf::as_path), !all)?;
    sizes.write_tsv(output.map(PathBuf::as_path))
}

fn normalize(
    regions: &[PathBuf],
    sep: &str,
    output: Option<&PathBuf>,
) -> Result<(), KaryopypeError> {
    let options = RegionOptions {
        separator: sep.parse()?,
    };
    let input = RegionInput::from_paths(regions.iter().cloned());
    let (sets, _is_empty) = normalize_regions(&input, &options)?;
    write_regions(&sets.unwrap_or_default(), output.map(PathBuf::as_path))
}

struct PlotArgs<'a> {
    species: &'a OsString,
    chromsizes: Option<&'a PathBuf>,
    all: bool,
    sep: &'a str,
    colors: &'a [String],
    title: Option<&'a String>,
    width: u32,
    height: u32,
    output: Option<&'a PathBuf>,
    regions: &'a [PathBuf],
}

fn plot(args: PlotArgs) -> Result<(), KaryopypeError> {
    let species = Species::try_from(args.species.as_os_str())?;
    let config = PlotConfig {
        width: args.width,
        height: args.height,
        title: args.title.cloned(),
        canonical: !args.all,
        region_options: RegionOptions {
            separator: args.sep.parse()?,
        },
        ..PlotConfig::default()
    };

    let sizes = load_sizes(&species, args.chromsizes.map(PathBuf::as_path), config.canonical)?;
    let input = RegionInput::from_paths(args.regions.iter().cloned());
    let (sets, _is_empty) = normalize_regions(&input, &config.region_options)?;

    let mut sets = sets.unwrap_or_default();
    recolor_region_sets(&mut sets, args.colors)?;

    let mut figure = Figure::new(species.as_str(), &sizes, config)?;
    figure.add_region_sets(&sets)?;

    for (chrom, count) in figure.skipped() {
        eprintln!(
            "Warning: {} interval(s) on '{}' not plotted (not in chromosome sizes)",
            count, chrom
        );
    }

    let path = match args.output {
        Some(path) => {
            figure.save(path)?;
            path.clone()
        }
        None => figure.save_default()?,
    };
    eprintln!("Wrote {}", path.display());
    Ok(())
}

fn run() -> Result<(), KaryopypeError> {
    let cli = Cli::parse();
    init_logging(cli.debug);
    match &cli.command {
        Some(Commands::Species) => {
            for species in list_species() {
                println!("{}", species);
            }
            Ok(())
        }
        Some(Commands::Sizes {
            species,
            chromsizes,
            all,
            output,
        }) => print_sizes(species, chromsizes.as_ref(), *all, output.as_ref()),
        Some(Commands::Regions {
            sep,
            output,
            regions,
        }) => normalize(regions, sep, output.as_ref()),
        Some(Commands::Plot {
            species,
            chromsizes,
            all,
            sep,
            colors,
            title,
            width,
            height,
            output,
            regions,
        }) => plot(PlotArgs {
            species,
            chromsizes: chromsizes.as_ref(),
            all: *all,
            sep,
            colors,
            title: title.as_ref(),
            width: *width,
            height: *height,
            output: output.as_ref(),
            regions,
        }),
        None => {
            println!("{}\n", INFO);
            std::process::exit(1);
        }
    }
}

fn main() {
    match run() {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
