//! ChurnShield entrypoint: loads the model once, then evaluates one profile per
//! stdin line (each line is one form change) and writes one JSON line per input.
//! Artifact problems abort start-up; a bad line only rejects that line.

use churnshield::{config::ChurnConfig, logging::StructuredLogger, pipeline::ChurnPipeline};
use tracing::{info, warn};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("CHURNSHIELD_CONFIG_PATH")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let (config, config_error) = match ChurnConfig::try_load(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (ChurnConfig::default(), Some(e)),
    };

    StructuredLogger::init(config.log.json, &config.log.level);
    if let Some(e) = config_error {
        warn!(path = %config_path.display(), error = %e, "config unreadable; using defaults");
    }

    info!(
        model = ?config.model.model_path,
        schema = ?config.model.schema_path,
        "ChurnShield starting"
    );
    let pipeline = ChurnPipeline::from_config(&config)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let stats = pipeline.run_lines(stdin.lock(), stdout.lock(), config.input.out_of_range)?;

    info!(evaluated = stats.evaluated, rejected = stats.rejected, "ChurnShield stopping");
    Ok(())
}
