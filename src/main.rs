//! rdf-edgelist - command-line front end of the converter.
//!
//! Usage:
//!   rdf-edgelist convert -i redirects_en.ttl.bz2 page_links_en.ttl.bz2 \
//!       -v graph_v.edgelist -e graph_e.edgelist -j graph.json -t instance_types.bin -o
//!   rdf-edgelist convert --config run.json
//!   rdf-edgelist vertex-set -i labels_en.ttl.bz2 -o vertex_set.bin
//!   rdf-edgelist instance-types -i instance_types_en.ttl.bz2 -o instance_types.bin -s vertex_set.bin

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rdf_edgelist::builders::{build_instance_types, build_vertex_set, ScanOptions};
use rdf_edgelist::config::{
    ConversionConfig, LiteralPolicy, MalformedLinePolicy, OutputMode, PairTracking,
    PipelineConfig, ResourceExtraction,
};
use rdf_edgelist::pipeline::Pipeline;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rdf-edgelist")]
#[command(about = "Convert DBPedia RDF triple dumps into an edge-list graph")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert triple files into vertex and edge files plus a loader descriptor
    Convert(ConvertArgs),
    /// Build the set of resource names found as subjects of a triple dump
    VertexSet(VertexSetArgs),
    /// Build the resource to RDF-type dictionary from an instance-types dump
    InstanceTypes(InstanceTypesArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// JSON run description; replaces all other conversion flags
    #[arg(long, conflicts_with = "input")]
    config: Option<PathBuf>,

    /// Triple files (plain, .gz or .bz2), processed in the given order
    #[arg(short, long, num_args = 1.., required_unless_present = "config")]
    input: Vec<PathBuf>,

    /// Vertex output file
    #[arg(short = 'v', long = "output-v", required_unless_present = "config")]
    output_v: Option<PathBuf>,

    /// Edge output file
    #[arg(short = 'e', long = "output-e", required_unless_present = "config")]
    output_e: Option<PathBuf>,

    /// Loader descriptor output file (JSON)
    #[arg(short = 'j', long = "output-j", required_unless_present = "config")]
    output_j: Option<PathBuf>,

    /// Instance-type dictionary built by `instance-types`
    #[arg(short = 't', long)]
    instance_dict: Option<PathBuf>,

    /// Vertex set built by `vertex-set`
    #[arg(short = 's', long)]
    vertex_set: Option<PathBuf>,

    /// Only admit triples whose endpoints are both in the instance dictionary
    #[arg(short = 'o', long)]
    instance_dict_vertices_only: bool,

    /// Ignore triples whose object is a literal
    #[arg(short = 'r', long)]
    ignore_literals: bool,

    /// Add every instance-dictionary entry as a vertex, even without edges
    #[arg(short = 'a', long)]
    add_orphan_vertices: bool,

    /// Maximum number of lines read per file (0 or negative = all)
    #[arg(short = 'n', long, default_value_t = 0, allow_negative_numbers = true)]
    max_lines: i64,

    /// Overwrite the output files instead of appending to them
    #[arg(long)]
    truncate: bool,

    /// Track only redirect and disambiguation edges for page-links deduplication
    #[arg(long)]
    track_redirects_only: bool,

    /// Abort on lines that do not hold three fields
    #[arg(long)]
    fail_on_malformed: bool,

    /// Name resources by their last URI path segment even for DBPedia URIs
    #[arg(long)]
    last_path_segment: bool,
}

#[derive(Args, Debug)]
struct VertexSetArgs {
    /// Triple dump whose subjects become vertices
    #[arg(short, long)]
    input: PathBuf,

    /// Where the vertex set is stored
    #[arg(short, long)]
    output: PathBuf,

    /// Maximum number of lines read (0 = all)
    #[arg(short = 'n', long, default_value_t = 0)]
    max_lines: u64,
}

#[derive(Args, Debug)]
struct InstanceTypesArgs {
    /// Instance-types dump
    #[arg(short, long)]
    input: PathBuf,

    /// Where the dictionary is stored
    #[arg(short, long)]
    output: PathBuf,

    /// Vertex set restricting and completing the dictionary
    #[arg(short = 's', long)]
    vertex_set: Option<PathBuf>,

    /// Maximum number of lines read (0 = all)
    #[arg(short = 'n', long, default_value_t = 0)]
    max_lines: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Convert(args) => convert(args),
        Command::VertexSet(args) => {
            let options = ScanOptions { max_lines: args.max_lines, ..Default::default() };
            let vertices = build_vertex_set(&args.input, &args.output, options)
                .with_context(|| format!("building vertex set from {}", args.input.display()))?;
            println!("Number of vertices: {}", vertices.len());
            Ok(())
        }
        Command::InstanceTypes(args) => {
            let options = ScanOptions { max_lines: args.max_lines, ..Default::default() };
            let types = build_instance_types(
                &args.input,
                &args.output,
                args.vertex_set.as_deref(),
                options,
            )
            .with_context(|| format!("building instance dictionary from {}", args.input.display()))?;
            println!("Number of entries: {}", types.len());
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn convert(args: ConvertArgs) -> Result<()> {
    let config = match args.config.clone() {
        Some(path) => PipelineConfig::from_json_file(&path)
            .with_context(|| format!("reading run description {}", path.display()))?,
        None => pipeline_config_from_args(args)?,
    };

    let pipeline = Pipeline::new(config)?;
    let report = pipeline.run()?;
    let metrics = &report.metrics;

    println!("\nConversion Complete!");
    println!("====================");
    for file in &metrics.files {
        println!(
            "{}: {} lines, {} edges, {} new vertices",
            file.path.display(),
            file.lines_read,
            file.edges_written,
            file.vertices_added
        );
    }
    println!("Lines read:         {}", metrics.lines_read);
    println!("Vertices:           {}", metrics.vertices);
    println!("Edges:              {}", metrics.edges_written);
    println!("Edge pairs tracked: {}", metrics.tracked_pairs);
    println!("Self loops skipped: {}", metrics.self_loops_skipped);
    println!("Malformed lines:    {}", metrics.malformed_lines);
    println!("Elapsed time:       {:.2}s", metrics.elapsed_seconds);
    println!("Throughput:         {:.1} lines/sec", metrics.lines_per_second());
    println!("Edge rate:          {:.1} edges/sec", metrics.edges_per_second());

    Ok(())
}

fn pipeline_config_from_args(args: ConvertArgs) -> Result<PipelineConfig> {
    let vertex_output = args.output_v.context("missing --output-v")?;
    let edge_output = args.output_e.context("missing --output-e")?;
    let loader_config_output = args.output_j.context("missing --output-j")?;

    let conversion = ConversionConfig {
        literals: if args.ignore_literals { LiteralPolicy::Ignore } else { LiteralPolicy::Keep },
        extraction: if args.last_path_segment {
            ResourceExtraction::LastPathSegment
        } else {
            ResourceExtraction::StripDbpediaPrefix
        },
        pair_tracking: if args.track_redirects_only {
            PairTracking::RedirectsAndDisambiguations
        } else {
            PairTracking::All
        },
        malformed_lines: if args.fail_on_malformed {
            MalformedLinePolicy::Fail
        } else {
            MalformedLinePolicy::Skip
        },
        output_mode: if args.truncate { OutputMode::Truncate } else { OutputMode::Append },
        restrict_to_known_instances: args.instance_dict_vertices_only,
        add_orphan_vertices: args.add_orphan_vertices,
        ..ConversionConfig::default()
    }
    .with_line_limit(args.max_lines);

    let mut config =
        PipelineConfig::new(args.input, vertex_output, edge_output, loader_config_output);
    config.instance_types = args.instance_dict;
    config.vertex_set = args.vertex_set;
    config.conversion = conversion;
    Ok(config)
}
