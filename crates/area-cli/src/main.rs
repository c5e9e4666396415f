//! Coordinates to areas: computes bisecting borders for an n-dimensional node
//! file and assigns an ID prefix to each resulting area.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use area_tree::io::{read_nodes, write_area_list, write_dump, write_plot_areas, write_plot_points};
use area_tree::{
    AreaList, Partition, PartitionConfig, DEFAULT_FIELD_SIZE, DEFAULT_MAX_PREFIX_LEN,
    DEFAULT_MIN_POINTS_PER_LEAF,
};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "c2a", about = "Partition node coordinates into prefix-labelled areas")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute areas for a node list file.
    Partition {
        /// Node list XML file to process.
        nodefile: PathBuf,
        /// Don't split an area holding this many nodes or fewer.
        #[arg(short = 'n', long = "minnodes", default_value_t = DEFAULT_MIN_POINTS_PER_LEAF)]
        min_nodes: usize,
        /// Maximum prefix length in bits.
        #[arg(short = 'p', long = "maxprefix", default_value_t = DEFAULT_MAX_PREFIX_LEN)]
        max_prefix: usize,
        /// Half extent of the field in every dimension.
        #[arg(short = 'f', long = "fieldsize", default_value_t = DEFAULT_FIELD_SIZE)]
        field_size: f64,
        /// Print the calculated borders on stdout.
        #[arg(short = 'd', long)]
        debug: bool,
        /// Don't write the area list file.
        #[arg(short = 'X', long = "noxml")]
        no_xml: bool,
        /// Write Gnuplot compatible files (2D and 3D only).
        #[arg(short = 'P', long)]
        plot: bool,
        /// Directory for output files (default: next to the node file).
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Print the prefix of the area containing the given coordinates.
    Lookup {
        /// Area list XML file.
        areafile: PathBuf,
        /// Coordinates, one value per dimension.
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        coords: Vec<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Partition {
            nodefile,
            min_nodes,
            max_prefix,
            field_size,
            debug,
            no_xml,
            plot,
            out_dir,
        } => {
            let config = PartitionConfig::new()
                .with_max_prefix_len(max_prefix)
                .with_min_points_per_leaf(min_nodes)
                .with_field_size(field_size);
            let outputs = Outputs {
                debug,
                xml: !no_xml,
                plot,
                out_dir,
            };
            run_partition(&nodefile, &config, &outputs)?
        }
        Commands::Lookup { areafile, coords } => run_lookup(&areafile, &coords)?,
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Which outputs a partition run produces.
#[derive(Debug)]
struct Outputs {
    debug: bool,
    xml: bool,
    plot: bool,
    out_dir: Option<PathBuf>,
}

fn run_partition(nodefile: &Path, config: &PartitionConfig, outputs: &Outputs) -> Result<()> {
    info!(
        max_prefix = config.max_prefix_len,
        min_nodes = config.min_points_per_leaf,
        field_size = config.field_size,
        "partition settings"
    );

    let points = read_nodes(nodefile)
        .with_context(|| format!("failed to load node list {}", nodefile.display()))?;

    info!("calculating areas");
    let partition = Partition::build(points, config).context("failed to build partition")?;
    let stats = partition.stats();
    info!(
        areas = stats.leaves,
        empty = stats.empty_leaves,
        max_depth = stats.max_depth,
        max_leaf_nodes = stats.max_leaf_points,
        "areas calculated"
    );

    if outputs.debug {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_dump(&partition, &mut out).context("failed to print areas")?;
        out.flush()?;
    }

    if outputs.plot {
        if matches!(partition.dimensions(), 2 | 3) {
            let areas_path = output_path(nodefile, outputs.out_dir.as_deref(), "plot_areas_")?;
            let coords_path = output_path(nodefile, outputs.out_dir.as_deref(), "plot_coords_")?;
            info!(areas = %areas_path.display(), coords = %coords_path.display(), "writing plot files");
            write_file(&areas_path, |out| write_plot_areas(&partition, out))?;
            write_file(&coords_path, |out| write_plot_points(&partition, out))?;
        } else {
            warn!(
                dimensions = partition.dimensions(),
                "plot files only for 2D and 3D, skipping"
            );
        }
    }

    if outputs.xml {
        let path = output_path(nodefile, outputs.out_dir.as_deref(), "areas_")?;
        info!(path = %path.display(), "writing area list");
        write_file(&path, |out| write_area_list(&partition, out))?;
    }

    Ok(())
}

fn run_lookup(areafile: &Path, coords: &[f64]) -> Result<()> {
    let areas = AreaList::read(areafile)
        .with_context(|| format!("failed to read area list {}", areafile.display()))?;

    if coords.len() != areas.dimensions() {
        bail!(
            "expected {} coordinates, got {}",
            areas.dimensions(),
            coords.len()
        );
    }
    match areas.prefix_for(coords) {
        Some(prefix) => println!("{prefix}"),
        None => bail!("no area contains {:?}", coords),
    }
    Ok(())
}

/// Output file name: `prefix` + the node file's name, placed in `out_dir` or
/// next to the node file.
fn output_path(nodefile: &Path, out_dir: Option<&Path>, prefix: &str) -> Result<PathBuf> {
    let name = nodefile
        .file_name()
        .with_context(|| format!("{} has no file name", nodefile.display()))?;
    let dir = out_dir.or_else(|| nodefile.parent()).unwrap_or(Path::new(""));

    let mut file_name = prefix.to_owned();
    file_name.push_str(&name.to_string_lossy());
    Ok(dir.join(file_name))
}

fn write_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> area_tree::Result<()>,
{
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write(&mut out).with_context(|| format!("failed to write {}", path.display()))?;
    out.flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
