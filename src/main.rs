use anyhow::{Context, Result};
use clap::Parser;
use ordered_float::OrderedFloat;
use tracing_subscriber::EnvFilter;

use geograph::io::{read_catalog, write_edges, write_route_file};
use geograph::{BuildOptions, GeoGraph, NodeIndex};

#[derive(Parser, Debug)]
#[command(name = "geograph")]
#[command(about = "Build a complete haversine-weighted graph from a location CSV and write the distances along a visiting order.", long_about = None)]
struct Cli {
    /// Path to the locations CSV (name,region,latitude,longitude with a header row)
    #[arg(short, long)]
    csv: String,

    /// Visiting order as comma-separated catalog indices. Defaults to file order.
    #[arg(long, value_delimiter = ',')]
    order: Option<Vec<NodeIndex>>,

    /// Return to the first stop at the end of the order
    #[arg(long, default_value_t = false)]
    closed: bool,

    /// Output route file (name, region, lat, lon, distance-from-previous). If omitted, prints a summary to stdout.
    #[arg(short, long)]
    out: Option<String>,

    /// Also write every edge (from, to, distance_km) to this CSV
    #[arg(long)]
    edges: Option<String>,

    /// Build on all cores once the catalog has at least this many locations
    #[arg(long, default_value_t = BuildOptions::default().parallel_threshold)]
    parallel_threshold: usize,
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let catalog = read_catalog(&cli.csv).with_context(|| format!("reading {}", &cli.csv))?;
    let graph = GeoGraph::with_options(
        catalog,
        BuildOptions {
            parallel_threshold: cli.parallel_threshold,
        },
    );

    let order = cli
        .order
        .clone()
        .unwrap_or_else(|| (0..graph.node_count()).collect());
    let route = if cli.closed {
        graph.closed_route(&order)
    } else {
        graph.route(&order)
    }
    .context("evaluating visiting order")?;

    if let Some(edges_path) = &cli.edges {
        write_edges(edges_path, &graph).with_context(|| format!("creating CSV {}", edges_path))?;
        println!("Wrote {} edges to {}", graph.edge_count(), edges_path);
    }

    if let Some(out_path) = &cli.out {
        write_route_file(out_path, &route).with_context(|| format!("creating {}", out_path))?;
        println!("Wrote {} stops to {}", route.len(), out_path);
    } else {
        println!("Nodes: {}", graph.node_count());
        println!("Edges: {}", graph.edge_count());
        let by_weight = |edge: &geograph::EdgeRef| OrderedFloat(graph.weight(*edge));
        if let (Some(shortest), Some(longest)) = (
            graph.edges().min_by_key(by_weight),
            graph.edges().max_by_key(by_weight),
        ) {
            let names = graph.names();
            println!(
                "Shortest edge (km): {:.2} ({} - {})",
                graph.weight(shortest),
                names[shortest.from()],
                names[shortest.to()]
            );
            println!(
                "Longest edge (km): {:.2} ({} - {})",
                graph.weight(longest),
                names[longest.from()],
                names[longest.to()]
            );
        }
        let length: f64 = route.iter().map(|stop| stop.distance).sum();
        println!("Route stops: {}", route.len());
        println!("Route length (km): {:.2}", length);
    }

    Ok(())
}
