use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

const DEFAULT_STATIONS: &[(&str, f64)] = &[
    ("Abidjan", 26.0),
    ("Berlin", 10.3),
    ("Berlin-Mitte", 10.5),
    ("Bāgepalli", 24.2),
    ("Cardinal", 7.1),
    ("Hamburg", 9.7),
    ("Kika", 24.5),
    ("Konibodom", 13.3),
    ("Melbourne", 15.1),
    ("Pālakodu", 27.0),
    ("Poyo", 19.4),
    ("San Fernando", 26.8),
    ("Thiruvananthapuram", 27.2),
    ("Ur", 23.5),
    ("Wolsey", 8.9),
];

#[derive(Parser, Debug)]
#[command(name = "create_measurements")]
#[command(about = "Writes synthetic `station;reading` lines to stdout")]
struct Args {
    /// Number of lines to generate, underscores allowed (1_000_000)
    rows: String,

    /// `name;mean` CSV of stations, `#` lines are comments
    #[arg(long)]
    stations: Option<PathBuf>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug)]
struct City {
    name: String,
    distribution: Normal<f64>,
}

impl City {
    fn new(name: &str, mean: f64) -> Result<Self> {
        let distribution = Normal::new(mean, 10.0)
            .with_context(|| format!("could not create normal distribution for {name}"))?;
        Ok(Self {
            name: name.to_string(),
            distribution,
        })
    }

    fn sample(&self, rng: &mut impl Rng) -> f64 {
        self.distribution.sample(rng).clamp(-99.9, 99.9)
    }
}

impl FromStr for City {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, mean) = s
            .split_once(';')
            .with_context(|| format!("missing ';' in {s:?}"))?;
        let mean: f64 = mean
            .trim()
            .parse()
            .with_context(|| format!("bad mean in {s:?}"))?;
        City::new(name, mean)
    }
}

fn load_cities(path: Option<&PathBuf>) -> Result<Vec<City>> {
    let Some(path) = path else {
        return DEFAULT_STATIONS
            .iter()
            .map(|&(name, mean)| City::new(name, mean))
            .collect();
    };

    let cities = fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::parse)
        .collect::<Result<Vec<City>>>()?;

    if cities.is_empty() {
        bail!("no stations in {}", path.display());
    }

    Ok(cities)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let rows: u64 = args
        .rows
        .replace('_', "")
        .parse()
        .context("expected an integer row count")?;

    let cities = load_cities(args.stations.as_ref())?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let mut out = BufWriter::new(io::stdout().lock());
    for _ in 0..rows {
        let city = &cities[rng.random_range(0..cities.len())];
        let temp = city.sample(&mut rng);
        writeln!(out, "{};{:.1}", city.name, temp)?;
    }
    out.flush()?;

    Ok(())
}
