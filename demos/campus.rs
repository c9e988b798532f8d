use itertools::Itertools;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wayfinder::{error::GraphError, graph::Graph};

// Walking paths between buildings, weighted by the walk in minutes.
const BUILDINGS: [&str; 5] = [
    "Gates Hillman Center",
    "Wean Hall",
    "Hunt Library",
    "Cohon Center",
    "Tepper Building",
];

const PATHS: [(&str, &str, f64); 6] = [
    ("Gates Hillman Center", "Wean Hall", 2.0),
    ("Wean Hall", "Hunt Library", 3.0),
    ("Hunt Library", "Cohon Center", 2.0),
    ("Cohon Center", "Tepper Building", 1.0),
    ("Tepper Building", "Gates Hillman Center", 2.0),
    // Alternative longer path.
    ("Wean Hall", "Cohon Center", 4.0),
];

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wayfinder=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

fn main() -> Result<(), GraphError> {
    init_tracing();

    let mut graph = Graph::new();
    graph.add_nodes_from(BUILDINGS);
    println!("Added {} buildings to the network", graph.node_count());

    graph.add_edges_from(PATHS)?;
    println!("Added {} walking paths", graph.edge_count());

    let (start, end) = ("Gates Hillman Center", "Hunt Library");

    let route = graph.shortest_path(&start, &end)?;
    println!("\nShortest route from {start} to {end}:");
    println!("  Route: {}", route.nodes().iter().join(" -> "));
    println!("  Walking time: {} minutes", route.length());

    println!("\nConnections per building:");
    for building in graph.nodes() {
        println!("  {building:25}: {} connections", graph.degree(building)?);
    }

    if let Some(most_central) = graph.most_central() {
        println!("\nMost central building: {most_central}");
    }

    println!("\nAll possible paths from {start} to {end}:");
    for path in graph.all_simple_paths(&start, &end)? {
        println!("  {}", path.iter().join(" -> "));
    }

    println!("\nWhat if Wean Hall is closed for construction?");
    let mut closed = graph.copy();
    closed.remove_node(&"Wean Hall")?;

    match closed.shortest_path(&start, &end) {
        Ok(route) => {
            println!("  New shortest path: {}", route.nodes().iter().join(" -> "));
            println!("  Walking time: {} minutes", route.length());
        }
        Err(GraphError::NoPath { .. }) => println!("  No available path without Wean Hall."),
        Err(err) => return Err(err),
    }

    let average = graph.average_shortest_path_length()?;
    println!("\nAverage walking time between any two buildings: {average:.2} minutes");

    Ok(())
}
