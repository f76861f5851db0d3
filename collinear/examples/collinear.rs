//! Reads a list of points and prints every line through four or more of them.
//!
//! The input is whitespace-separated integers: the number of points, followed by the `x`
//! and `y` coordinates of each point. For example,
//!
//! ```text
//! 4
//! 1000 17000  13000 17000
//! 17000 17000  29000 17000
//! ```

use std::{io::Read, path::PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use collinear::{brute, DetectorConfig, FastCollinear, Point, Segments};
use ordered_float::NotNan;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Args {
    /// The point file. Reads from stdin if this is missing.
    input: Option<PathBuf>,

    /// Compare slopes in floating point instead of exactly.
    #[arg(long)]
    float: bool,

    /// The slope tolerance for `--float`.
    #[arg(long, requires = "float")]
    epsilon: Option<f64>,

    /// Use the brute-force detector.
    #[arg(long, conflicts_with = "float")]
    brute: bool,

    /// Print the segments as JSON.
    #[arg(long)]
    json: bool,
}

fn parse_points(text: &str) -> anyhow::Result<Vec<Point>> {
    let mut numbers = text.split_whitespace().map(|word| {
        word.parse::<i32>()
            .with_context(|| format!("invalid number {word:?}"))
    });

    let n = match numbers.next() {
        Some(n) => usize::try_from(n?).context("negative point count")?,
        None => bail!("empty input"),
    };

    let mut points = Vec::with_capacity(n);
    for i in 0..n {
        let (Some(x), Some(y)) = (numbers.next(), numbers.next()) else {
            bail!("expected {n} points, but only found {i}");
        };
        points.push(Point::new(x?, y?));
    }
    if numbers.next().is_some() {
        bail!("trailing input after {n} points");
    }
    Ok(points)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();
    let args = Args::parse();

    let text = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    let points = parse_points(&text)?;
    tracing::info!(points = points.len(), "read input");

    let segments: Segments = if args.brute {
        brute::detect(&points)?
    } else if args.float {
        let mut config = DetectorConfig::default();
        if let Some(eps) = args.epsilon {
            config.tolerance = eps;
        }
        FastCollinear::<NotNan<f64>>::new(&config)?.detect(&points)?
    } else {
        collinear::detect(&points)?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&segments)?);
    } else {
        for seg in &segments {
            println!("{seg}");
        }
        println!("{} segments", segments.len());
    }
    Ok(())
}
