//! KML Chart CLI
//!
//! Usage:
//!   kml-chart [OPTIONS] [FILE]
//!
//! Options:
//!   -o, --output <FILE>  Write KML to a file instead of stdout
//!   -c, --compact        Write KML without indentation
//!   -t, --ticks          Print legend ticks of every series instead of KML
//!   -v, --verbose        Increase log verbosity (repeatable)
//!   -h, --help           Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kml_chart::{ChartDescription, KmlConfig};

#[derive(Parser)]
#[command(name = "kml-chart")]
#[command(about = "Render TOML chart descriptions to KML")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Output file (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write single-line KML
    #[arg(short, long)]
    compact: bool,

    /// Print legend ticks instead of KML
    #[arg(short, long)]
    ticks: bool,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "kml_chart=warn",
        1 => "kml_chart=debug",
        _ => "kml_chart=trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn fail(message: String) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let description = match &cli.input {
        Some(path) => ChartDescription::from_file(path)
            .unwrap_or_else(|e| fail(format!("'{}': {}", path.display(), e))),
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                fail(format!("reading from stdin: {}", e));
            }
            ChartDescription::from_str(&buffer).unwrap_or_else(|e| fail(e.to_string()))
        }
    };

    let text = if cli.ticks {
        let legends = description
            .legends()
            .unwrap_or_else(|e| fail(e.to_string()));
        legends
            .iter()
            .map(|(name, legend)| {
                let labels: Vec<_> = legend.ticks().iter().map(|t| t.label.as_str()).collect();
                format!("{}: {}\n", name, labels.join(" "))
            })
            .collect::<String>()
    } else {
        let config = if cli.compact {
            KmlConfig::compact()
        } else {
            KmlConfig::default()
        };
        let chart = description.build().unwrap_or_else(|e| fail(e.to_string()));
        let mut kml = chart.to_kml_string_with_config(&config);
        kml.push('\n');
        kml
    };

    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, text) {
                fail(format!("writing '{}': {}", path.display(), e));
            }
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => print!("{}", text),
    }
}
