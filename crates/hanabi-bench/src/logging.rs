use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LoggingConfig, ResolvedOutputs};

pub const TELEMETRY_FILE: &str = "telemetry.jsonl";

pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub telemetry_path: PathBuf,
}

/// Routes every tracing event of the run into `telemetry.jsonl` beside the summary.
pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    if logging.decision_details {
        unsafe {
            std::env::set_var("HANABI_DECISION_DETAILS", "1");
        }
    }

    let telemetry_dir = outputs.telemetry_dir();
    fs::create_dir_all(&telemetry_dir).with_context(|| {
        format!(
            "creating telemetry directory at {}",
            telemetry_dir.display()
        )
    })?;

    let telemetry_path = telemetry_dir.join(TELEMETRY_FILE);
    let file = File::create(&telemetry_path)
        .with_context(|| format!("creating telemetry file at {}", telemetry_path.display()))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);

    let level = logging.level().unwrap_or(Level::INFO);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();

    // A subscriber may already be installed when several runs share a process.
    let _ = tracing::subscriber::set_global_default(subscriber);

    Ok(Some(LoggingGuard {
        _guard: guard,
        telemetry_path,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn outputs_in(dir: &std::path::Path) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: dir.join("games.jsonl"),
            summary_md: dir.join("summary.md"),
        }
    }

    #[test]
    fn structured_logging_writes_telemetry_beside_the_summary() {
        let dir = tempdir().expect("temp dir");
        let outputs = outputs_in(dir.path());

        let disabled = init_logging(&LoggingConfig::default(), &outputs).expect("disabled init");
        assert!(disabled.is_none());
        assert!(!dir.path().join(TELEMETRY_FILE).exists());

        let enabled = LoggingConfig {
            enable_structured: true,
            ..LoggingConfig::default()
        };
        let guard = init_logging(&enabled, &outputs)
            .expect("enabled init")
            .expect("guard returned");
        assert_eq!(guard.telemetry_path, dir.path().join(TELEMETRY_FILE));
        assert!(guard.telemetry_path.exists());
        assert!(std::env::var_os("HANABI_BENCH_RUN_ID").is_none());
    }
}
