//! Settings file loading and validation.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::schema::Settings;
use crate::error::ConfigError;

/// Reads, parses and validates a settings file.
///
/// # Errors
///
/// Returns `ConfigError::MissingFile` if `path` does not exist,
/// `ConfigError::Read` if it cannot be read, `ConfigError::ParseError` on
/// malformed YAML or unknown fields, and `ConfigError::InvalidValue` if a
/// value fails validation.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let settings = parse_settings(&content, path)?;
    debug!(path = %path.display(), ?settings, "settings loaded");
    Ok(settings)
}

/// Parses and validates settings text. `path` is only used in errors.
///
/// # Errors
///
/// See [`load_settings`].
pub fn parse_settings(content: &str, path: &Path) -> Result<Settings, ConfigError> {
    // An empty document deserializes to unit, not a mapping.
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings: Settings =
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            line: e.location().map(|loc| loc.line()),
            message: e.to_string(),
        })?;

    validate(&settings)?;
    Ok(settings)
}

/// Checks values the schema alone cannot express.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for the first invalid field.
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.jobs == 0 {
        return Err(ConfigError::InvalidValue {
            field: "jobs".to_string(),
            value: "0".to_string(),
            expected: "a positive number of worker threads".to_string(),
        });
    }

    if let Some(engine) = &settings.engine {
        let argv = shlex::split(&engine.command).unwrap_or_default();
        if argv.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "engine.command".to_string(),
                value: engine.command.clone(),
                expected: "a non-empty command line with balanced quotes".to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::EngineSettings;
    use std::path::PathBuf;

    fn parse(content: &str) -> Result<Settings, ConfigError> {
        parse_settings(content, Path::new("dokumd.yaml"))
    }

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse("").unwrap(), Settings::default());
        assert_eq!(parse("\n  \n").unwrap(), Settings::default());
    }

    #[test]
    fn defaults_are_sequential_and_safe() {
        let settings = Settings::default();
        assert!(!settings.force);
        assert_eq!(settings.jobs, 1);
        assert!(settings.engine.is_none());
    }

    #[test]
    fn full_file() {
        let settings = parse(
            "force: true\njobs: 4\nmedia_dir: /srv/media\nengine:\n  command: \"pandoc -f dokuwiki -t gfm\"\n",
        )
        .unwrap();
        assert!(settings.force);
        assert_eq!(settings.jobs, 4);
        assert_eq!(settings.media_dir, Some(PathBuf::from("/srv/media")));
        assert_eq!(
            settings.engine,
            Some(EngineSettings {
                command: "pandoc -f dokuwiki -t gfm".to_string()
            })
        );
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        let err = parse("colour: blue\n").unwrap_err();
        match err {
            ConfigError::ParseError { path, message, .. } => {
                assert_eq!(path, PathBuf::from("dokumd.yaml"));
                assert!(message.contains("colour"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_jobs_rejected() {
        let err = parse("jobs: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "jobs"));
    }

    #[test]
    fn blank_engine_command_rejected() {
        let err = parse("engine:\n  command: \"  \"\n").unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "engine.command")
        );
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_settings(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dokumd.yaml");
        fs::write(&path, "jobs: 2\n").unwrap();
        assert_eq!(load_settings(&path).unwrap().jobs, 2);
    }
}
