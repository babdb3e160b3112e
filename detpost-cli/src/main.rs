use clap::Parser;
use detpost::{
    find_clusters, non_max_suppression_aabb, BoxesView, MergeConfig, PointsView, SuppressConfig,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "detpost CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct SuppressJson {
    thresh: f64,
    eps: f64,
    pre_max_size: Option<usize>,
    post_max_size: Option<usize>,
}

impl Default for SuppressJson {
    fn default() -> Self {
        Self {
            thresh: 0.5,
            eps: 0.0,
            pre_max_size: None,
            post_max_size: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ClusterJson {
    iterations: usize,
    bandwidth: f64,
    convergence_eps: f64,
}

impl Default for ClusterJson {
    fn default() -> Self {
        let cfg = MergeConfig::<f64>::default();
        Self {
            iterations: cfg.iterations,
            bandwidth: cfg.bandwidth,
            convergence_eps: cfg.convergence_eps,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    boxes: Option<Vec<Vec<f64>>>,
    points: Option<Vec<Vec<Vec<f64>>>>,
    output_path: Option<String>,
    suppress: SuppressJson,
    cluster: ClusterJson,
}

#[derive(Debug, Serialize)]
struct ClusterRecord {
    center: Vec<f64>,
    count: usize,
}

#[derive(Debug, Serialize)]
struct Output {
    kept: Option<Vec<usize>>,
    clusters: Option<Vec<Vec<ClusterRecord>>>,
}

fn flatten_boxes(rows: &[Vec<f64>]) -> Result<(Vec<f64>, usize), Box<dyn std::error::Error>> {
    let row_len = rows.first().map(|row| row.len()).unwrap_or(5);
    let mut flat = Vec::with_capacity(rows.len() * row_len);
    for row in rows {
        if row.len() != row_len {
            return Err("all box rows must have the same length".into());
        }
        flat.extend_from_slice(row);
    }
    Ok((flat, row_len))
}

fn flatten_points(
    batches: &[Vec<Vec<f64>>],
) -> Result<(Vec<f64>, usize, usize), Box<dyn std::error::Error>> {
    let points = batches.first().map(|batch| batch.len()).unwrap_or(0);
    let dims = batches
        .first()
        .and_then(|batch| batch.first())
        .map(|point| point.len())
        .unwrap_or(1);
    let mut flat = Vec::with_capacity(batches.len() * points * dims);
    for batch in batches {
        if batch.len() != points {
            return Err("all point batches must hold the same number of points".into());
        }
        for point in batch {
            if point.len() != dims {
                return Err("all points must have the same dimensionality".into());
            }
            flat.extend_from_slice(point);
        }
    }
    Ok((flat, points, dims))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("detpost=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.boxes.is_none() && config.points.is_none() {
        return Err("config must provide boxes, points, or both".into());
    }

    let mut output = Output {
        kept: None,
        clusters: None,
    };

    if let Some(rows) = &config.boxes {
        let (flat, row_len) = flatten_boxes(rows)?;
        let view = BoxesView::from_slice(&flat, rows.len(), row_len)?;
        let cfg = SuppressConfig {
            thresh: config.suppress.thresh,
            eps: config.suppress.eps,
            pre_max_size: config.suppress.pre_max_size,
            post_max_size: config.suppress.post_max_size,
        };
        output.kept = Some(non_max_suppression_aabb(view, &cfg)?);
    }

    if let Some(batches) = &config.points {
        let (flat, points, dims) = flatten_points(batches)?;
        let view = PointsView::from_slice(&flat, batches.len(), points, dims)?;
        let cfg = MergeConfig {
            iterations: config.cluster.iterations,
            bandwidth: config.cluster.bandwidth,
            convergence_eps: config.cluster.convergence_eps,
        };
        let cluster_sets = find_clusters(view, &cfg)?;
        output.clusters = Some(
            cluster_sets
                .iter()
                .map(|set| {
                    (0..set.len())
                        .map(|i| ClusterRecord {
                            center: set.center(i).expect("index within bounds").to_vec(),
                            count: set.count(i).expect("index within bounds"),
                        })
                        .collect()
                })
                .collect(),
        );
    }

    let json = serde_json::to_string_pretty(&output)?;
    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
