use clap::{Parser, Subcommand};
use std::path::PathBuf;

use fp_app::{AppResult, load_model_set, resolve_keys, summarize};
use fp_model::{TypeFilter, center, filter_by_type, load_boundary, load_model};

#[derive(Parser)]
#[command(name = "fp-cli")]
#[command(about = "FlowPywr CLI - River-basin model inspection tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate model files: load, normalize, and report counts
    Validate {
        /// Directory holding models/ and model-boundaries/
        data_dir: PathBuf,
        /// Model names (display name or short basin name)
        models: Vec<String>,
    },
    /// List a model's nodes, optionally filtered by component type
    Nodes {
        /// Directory holding models/ and model-boundaries/
        data_dir: PathBuf,
        /// Model name
        model: String,
        /// Component type filter ("All" or a type label)
        #[arg(long = "type", default_value = "All")]
        type_filter: String,
    },
    /// Print the combined aggregate center of one or more models
    Center {
        /// Directory holding models/ and model-boundaries/
        data_dir: PathBuf,
        /// Model names
        models: Vec<String>,
    },
    /// Summarize a model's edges: total, renderable, dangling
    Edges {
        /// Directory holding models/ and model-boundaries/
        data_dir: PathBuf,
        /// Model name
        model: String,
    },
    /// Parse a model's boundary resource and report its shape
    Boundary {
        /// Directory holding models/ and model-boundaries/
        data_dir: PathBuf,
        /// Model name
        model: String,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { data_dir, models } => cmd_validate(&data_dir, &models),
        Commands::Nodes {
            data_dir,
            model,
            type_filter,
        } => cmd_nodes(&data_dir, &model, &type_filter),
        Commands::Center { data_dir, models } => cmd_center(&data_dir, &models),
        Commands::Edges { data_dir, model } => cmd_edges(&data_dir, &model),
        Commands::Boundary { data_dir, model } => cmd_boundary(&data_dir, &model),
    }
}

fn cmd_validate(data_dir: &std::path::Path, models: &[String]) -> AppResult<()> {
    let keys = resolve_keys(models)?;
    for key in keys {
        let model = load_model(data_dir, key)?;
        let summary = summarize(&model);
        println!("{} - \"{}\"", key, summary.title);
        println!(
            "  nodes: {} ({} placeable)",
            summary.node_count, summary.placeable_nodes
        );
        println!(
            "  edges: {} ({} renderable, {} dangling)",
            summary.edge_count, summary.renderable_edges, summary.dangling_edges
        );
    }
    Ok(())
}

fn cmd_nodes(data_dir: &std::path::Path, model: &str, type_filter: &str) -> AppResult<()> {
    let key = model.parse::<fp_model::ModelKey>()?;
    let model = load_model(data_dir, key)?;
    let filter = TypeFilter::parse(type_filter);

    let nodes = filter_by_type(&model.nodes, filter);
    println!(
        "{} - {} node(s), filter: {}",
        key,
        nodes.len(),
        filter.label()
    );
    for node in nodes {
        match node.position() {
            Some(p) => println!("  {} [{}] {}", node.name, node.node_type, p),
            None => println!("  {} [{}] (no coordinates)", node.name, node.node_type),
        }
    }
    Ok(())
}

fn cmd_center(data_dir: &std::path::Path, models: &[String]) -> AppResult<()> {
    let keys = resolve_keys(models)?;
    let set = load_model_set(data_dir, &keys);
    let nodes = set.combined_nodes();
    let c = center(&nodes);
    if !set.title.is_empty() {
        println!("{}", set.title);
    }
    println!("center: {}", c);
    Ok(())
}

fn cmd_edges(data_dir: &std::path::Path, model: &str) -> AppResult<()> {
    let key = model.parse::<fp_model::ModelKey>()?;
    let model = load_model(data_dir, key)?;
    let summary = summarize(&model);
    println!("{} - {} edge(s)", key, summary.edge_count);
    println!("  renderable: {}", summary.renderable_edges);
    println!("  dangling: {}", summary.dangling_edges);
    Ok(())
}

fn cmd_boundary(data_dir: &std::path::Path, model: &str) -> AppResult<()> {
    let key = model.parse::<fp_model::ModelKey>()?;
    let fc = load_boundary(data_dir, key)?;
    println!(
        "{} - {} feature(s), {} polygon ring(s)",
        key,
        fc.features.len(),
        fc.polygon_rings().count()
    );
    Ok(())
}
