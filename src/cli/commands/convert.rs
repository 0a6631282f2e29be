//! Conversion command handler.
//!
//! Merges the settings file with command-line flags, picks the engine and
//! runs the site conversion.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::cli::args::Cli;
use crate::config::{self, EngineSettings, Settings};
use crate::engine::CommandEngine;
use crate::error::DokumdError;
use crate::pipeline::ConversionPipeline;
use crate::site::{RunReport, SiteOptions, convert_site};

/// Execute a conversion run.
///
/// # Errors
///
/// Returns an error if settings are invalid, the engine command cannot be
/// parsed, the conversion fails or the report cannot be written.
pub fn run(cli: &Cli) -> Result<RunReport, DokumdError> {
    let settings = resolve_settings(cli)?;
    let pipeline = build_pipeline(&settings)?;

    let options = SiteOptions {
        pages_dir: cli.pages_dir.clone(),
        output_dir: cli.output_dir.clone(),
        media_dir: settings.media_dir.clone(),
        force: settings.force,
        jobs: settings.jobs,
    };

    info!(
        pages = %options.pages_dir.display(),
        output = %options.output_dir.display(),
        force = options.force,
        "starting conversion"
    );

    let report = convert_site(&options, &pipeline)?;

    if let Some(path) = &cli.report {
        write_report(path, &report)?;
    }

    if !cli.quiet {
        eprintln!("Converted {} pages", report.pages_converted);
        if report.pages_skipped > 0 {
            eprintln!("Skipped {} pages with invalid names", report.pages_skipped);
        }
        if let Some(media) = &report.media {
            eprintln!(
                "Copied {} media files ({} already present)",
                media.copied, media.skipped
            );
        }
    }

    Ok(report)
}

/// Loads the settings file, if any, and applies command-line overrides.
///
/// # Errors
///
/// Returns a configuration error if the file cannot be loaded or the merged
/// settings are invalid.
pub fn resolve_settings(cli: &Cli) -> Result<Settings, DokumdError> {
    let mut settings = match &cli.config {
        Some(path) => config::load_settings(path)?,
        None => Settings::default(),
    };

    if cli.force {
        settings.force = true;
    }
    if let Some(jobs) = cli.jobs {
        settings.jobs = jobs;
    }
    if let Some(media_dir) = &cli.media_dir {
        settings.media_dir = Some(media_dir.clone());
    }
    if let Some(command) = &cli.engine_command {
        settings.engine = Some(EngineSettings {
            command: command.clone(),
        });
    }

    config::validate(&settings)?;
    Ok(settings)
}

/// Builds the pipeline for the configured engine.
///
/// # Errors
///
/// Returns an engine error if the external command line is invalid.
pub fn build_pipeline(settings: &Settings) -> Result<ConversionPipeline, DokumdError> {
    match &settings.engine {
        Some(engine) => {
            let engine = CommandEngine::parse(&engine.command)?;
            Ok(ConversionPipeline::new(Box::new(engine)))
        }
        None => Ok(ConversionPipeline::builtin()),
    }
}

/// Writes the run report as pretty JSON.
fn write_report(path: &Path, report: &RunReport) -> Result<(), DokumdError> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).map_err(|e| {
        DokumdError::Io(std::io::Error::new(
            e.kind(),
            format!("failed to write report {}: {e}", path.display()),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["dokumd"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn flags_override_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("dokumd.yaml");
        fs::write(
            &config,
            "jobs: 2\nmedia_dir: /from/file\nengine:\n  command: from-file\n",
        )
        .unwrap();

        let settings = resolve_settings(&cli(&[
            "p",
            "o",
            "--config",
            config.to_str().unwrap(),
            "--force",
            "--jobs",
            "8",
            "--media-dir",
            "/from/cli",
        ]))
        .unwrap();

        assert!(settings.force);
        assert_eq!(settings.jobs, 8);
        assert_eq!(settings.media_dir, Some("/from/cli".into()));
        assert_eq!(settings.engine.unwrap().command, "from-file");
    }

    #[test]
    fn zero_jobs_on_command_line_rejected() {
        let err = resolve_settings(&cli(&["p", "o", "--jobs", "0"])).unwrap_err();
        assert!(matches!(err, DokumdError::Config(_)));
    }

    #[test]
    fn builtin_pipeline_without_engine() {
        let pipeline = build_pipeline(&Settings::default()).unwrap();
        assert_eq!(pipeline.engine_name(), "builtin");
    }

    #[test]
    fn command_pipeline_with_engine() {
        let settings = Settings {
            engine: Some(EngineSettings {
                command: "pandoc -f dokuwiki".to_string(),
            }),
            ..Settings::default()
        };
        let pipeline = build_pipeline(&settings).unwrap();
        assert_eq!(pipeline.engine_name(), "pandoc");
    }

    #[test]
    fn run_writes_report() {
        let pages = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(pages.path().join("start.txt"), "== Hi ==").unwrap();
        let report_path = out.path().join("report.json");

        let report = run(&cli(&[
            pages.path().to_str().unwrap(),
            out.path().join("md").to_str().unwrap(),
            "--quiet",
            "--report",
            report_path.to_str().unwrap(),
        ]))
        .unwrap();

        assert_eq!(report.pages_converted, 1);
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(report_path).unwrap()).unwrap();
        assert_eq!(json["pages_converted"], 1);
        assert_eq!(json["engine"], "builtin");
    }
}
