use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use teleport::SessionConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

/// Simulates quantum teleportation of a single-qubit state and reports both
/// Bloch vectors and the measurement histogram.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON session configuration. Flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Amplitude of |0⟩ in [0, 1].
    #[arg(short, long)]
    alpha: Option<f64>,

    /// Phase of the |1⟩ amplitude in radians.
    #[arg(short, long)]
    phase: Option<f64>,

    /// Number of measurement shots.
    #[arg(short, long)]
    shots: Option<u32>,

    /// Seed for reproducible measurement outcomes.
    #[arg(long)]
    seed: Option<u64>,

    /// The output file to write results to. If not provided, writes to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

impl Cli {
    fn session_config(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::from_file(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?,
            None => SessionConfig::default(),
        };
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if let Some(phase) = self.phase {
            config.phase = phase;
        }
        if let Some(shots) = self.shots {
            config.shots = shots;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.session_config()?;
    let report = teleport::run(&config).context("Teleportation run failed")?;

    let rendered = match cli.format {
        Format::Text => report.render_text(),
        Format::Json => serde_json::to_string_pretty(&report)
            .context("Failed to serialize report to JSON")?,
    };

    if let Some(output_path) = cli.output {
        let file = File::create(&output_path)
            .with_context(|| format!("Failed to create {}", output_path.display()))?;
        let mut writer = BufWriter::new(file);
        writer.write_all(rendered.as_bytes())?;
        writer.flush()?;
        info!(path = %output_path.display(), "report written");
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from(["teleport", "-a", "0.3", "--phase", "1.5", "--seed", "4"]);
        let config = cli.session_config().unwrap();
        assert_eq!(config.alpha, 0.3);
        assert_eq!(config.phase, 1.5);
        assert_eq!(config.seed, Some(4));
        assert_eq!(config.shots, 1024);
        assert_eq!(cli.format, Format::Text);
    }

    #[test]
    fn json_format_is_selectable() {
        let cli = Cli::parse_from(["teleport", "--format", "json", "-s", "10"]);
        assert_eq!(cli.format, Format::Json);
        assert_eq!(cli.session_config().unwrap().shots, 10);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::parse_from(["teleport", "--config", "/no/such/session.json"]);
        assert!(cli.session_config().is_err());
    }
}
