use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stepmeans::{
    Dataset, Frame, InitMethod, JsonLinesSink, PlaybackError, Point, RenderSink, Session,
    SessionError, Settings, Snapshot, TextSink, UniformSource,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Watch K-Means converge one iteration at a time.
#[derive(Debug, Parser)]
#[command(name = "stepmeans", version, about)]
struct Cli {
    /// JSON settings file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON dataset file (a list of [x, y] pairs) instead of generated points
    #[arg(long)]
    data: Option<PathBuf>,

    /// Number of points to generate
    #[arg(short = 'n', long)]
    points: Option<usize>,

    /// Number of clusters
    #[arg(short, long)]
    k: Option<usize>,

    /// Centroid initialization method
    #[arg(long, value_enum)]
    init: Option<InitMethod>,

    /// Manual seed centroid as "x,y"; repeat once per cluster
    #[arg(long = "centroid", value_parser = parse_point)]
    centroids: Vec<Point>,

    /// Seed for centroid initialization
    #[arg(long)]
    seed: Option<u64>,

    /// Seed for dataset generation
    #[arg(long)]
    data_seed: Option<u64>,

    /// Iteration cap
    #[arg(long)]
    max_iters: Option<usize>,

    /// Centroid movement still counted as converged
    #[arg(long)]
    tolerance: Option<f64>,

    /// Advance this many steps instead of running to the end
    #[arg(long)]
    steps: Option<usize>,

    /// Show every step up to convergence
    #[arg(long, conflicts_with = "steps")]
    all: bool,

    /// Output format for frames
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got \"{}\"", s))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x in \"{}\": {}", s, e))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y in \"{}\": {}", s, e))?;
    Ok(Point::new(x, y))
}

fn settings_from(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    if let Some(points) = cli.points {
        settings.points = points;
    }
    if let Some(data_seed) = cli.data_seed {
        settings.data_seed = Some(data_seed);
    }

    let cluster = &mut settings.cluster;
    if let Some(k) = cli.k {
        cluster.k = k;
    }
    if let Some(init) = cli.init {
        cluster.init = init;
    }
    if !cli.centroids.is_empty() {
        cluster.seed_centroids = cli.centroids.clone();
        if cli.init.is_none() {
            cluster.init = InitMethod::Manual;
        }
        if cli.k.is_none() {
            cluster.k = cli.centroids.len();
        }
    }
    if let Some(max_iters) = cli.max_iters {
        cluster.max_iters = max_iters;
    }
    if let Some(tolerance) = cli.tolerance {
        cluster.tolerance = tolerance;
    }
    if let Some(seed) = cli.seed {
        cluster.seed = seed;
    }

    Ok(settings)
}

/// A settings file pins both seeds (0 unless given) so file-driven runs
/// replay exactly. Without one, missing seeds are drawn at random and logged.
fn fill_missing_seeds(cli: &Cli, settings: &mut Settings) {
    if cli.config.is_some() {
        settings.data_seed.get_or_insert(0);
        return;
    }

    if cli.seed.is_none() {
        settings.cluster.seed = rand::random();
        info!(seed = settings.cluster.seed, "no --seed given, picked one");
    }
    if settings.data_seed.is_none() {
        let data_seed = rand::random();
        settings.data_seed = Some(data_seed);
        info!(data_seed, "no --data-seed given, picked one");
    }
}

fn load_dataset(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid dataset in {}", path.display()))
}

fn show(sink: &mut dyn RenderSink, session: &Session, snapshot: &Snapshot) -> Result<()> {
    let player = session.player();
    let (dataset, log) = match (session.dataset(), player.log()) {
        (Some(d), Some(l)) => (d, l),
        _ => return Ok(()),
    };

    let frame = Frame {
        step: player.current_step(),
        total_steps: log.len(),
        converged: log.converged(),
        snapshot,
    };
    sink.render(dataset, &frame)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = settings_from(&cli)?;

    fill_missing_seeds(&cli, &mut settings);

    let cluster = settings.cluster.clone();
    let mut session = Session::new(cluster.clone());

    match &cli.data {
        Some(path) => {
            session.load_dataset(load_dataset(path)?);
        }
        None => {
            let data_seed = settings.data_seed.unwrap_or_default();
            info!(data_seed, points = settings.points, "generating dataset");
            session.generate(&mut UniformSource::new(data_seed), settings.points);
        }
    }

    let seeds = (!cluster.seed_centroids.is_empty()).then(|| cluster.seed_centroids.clone());
    session.configure(cluster.k, cluster.init, seeds);

    let stdout = io::stdout();
    let mut sink: Box<dyn RenderSink> = match cli.format {
        Format::Text => Box::new(TextSink::new(stdout.lock())),
        Format::Json => Box::new(JsonLinesSink::new(stdout.lock())),
    };

    let step_limit = if cli.all { Some(usize::MAX) } else { cli.steps };
    match step_limit {
        Some(limit) => {
            for _ in 0..limit {
                match session.step() {
                    Ok(snapshot) => show(sink.as_mut(), &session, &snapshot)?,
                    Err(SessionError::Playback(PlaybackError::AlreadyConverged { step })) => {
                        if !cli.all {
                            eprintln!("Algorithm has converged after {} steps.", step);
                        }
                        break;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
        None => {
            let snapshot = session.run()?;
            show(sink.as_mut(), &session, &snapshot)?;
        }
    }
    drop(sink);

    if let Some(summary) = session.summary() {
        if !summary.converged {
            warn!(
                iterations = summary.iterations,
                "stopped at the iteration cap without converging"
            );
        }
        match cli.format {
            Format::Text => {
                let mut out = io::stdout().lock();
                writeln!(
                    out,
                    "{} after {} iterations (showing step {}, run {})",
                    if summary.converged { "Converged" } else { "Not converged" },
                    summary.iterations,
                    summary.current_step,
                    &summary.fingerprint[..12]
                )?;
            }
            Format::Json => {
                let json = serde_json::to_string(&summary).context("Failed to serialize summary")?;
                println!("{}", json);
            }
        }
    }

    Ok(())
}
