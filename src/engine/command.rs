//! External converter subprocess engine.
//!
//! Runs a configured command once per page with the DokuWiki source on
//! stdin and reads Markdown from stdout. The page identifier is passed both
//! as the last argument and in `DOKUMD_PAGE_ID`. Failures are reported as
//! they are; the built-in rules are never used as a fallback.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, warn};

use crate::document::PageIdentifier;
use crate::error::EngineError;

use super::Engine;

/// Environment variable carrying the page identifier.
pub const PAGE_ID_ENV: &str = "DOKUMD_PAGE_ID";

/// Engine that delegates each page to an external program.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    argv: Vec<String>,
}

impl CommandEngine {
    /// Creates an engine from a program and its arguments.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidCommand` if `argv` is empty.
    pub fn new(argv: Vec<String>) -> Result<Self, EngineError> {
        if argv.first().is_none_or(String::is_empty) {
            return Err(EngineError::InvalidCommand("empty command".to_string()));
        }
        Ok(Self { argv })
    }

    /// Creates an engine from a shell-style command line such as
    /// `pandoc -f dokuwiki -t gfm`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidCommand` if the line has unbalanced
    /// quotes or is empty.
    pub fn parse(command_line: &str) -> Result<Self, EngineError> {
        let argv = shlex::split(command_line).ok_or_else(|| {
            EngineError::InvalidCommand(format!("unbalanced quoting in '{command_line}'"))
        })?;
        Self::new(argv)
    }

    /// Program and arguments, without the per-page identifier.
    #[must_use]
    pub fn argv(&self) -> &[String] {
        &self.argv
    }
}

impl Engine for CommandEngine {
    fn name(&self) -> &str {
        &self.argv[0]
    }

    fn convert(&self, source: &str, page: &PageIdentifier) -> Result<String, EngineError> {
        let page_id = page.to_string();
        debug!(cmd = ?self.argv, page = %page_id, "executing engine command");

        let mut child = Command::new(&self.argv[0])
            .args(&self.argv[1..])
            .arg(&page_id)
            .env(PAGE_ID_ENV, &page_id)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| EngineError::SpawnFailed(format!("{}: {e}", self.argv[0])))?;

        let stdin = child.stdin.take();

        // stdin is fed while stdout is drained; both pipes can fill up
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(source.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            (writer.join(), output)
        });

        let output = output.map_err(|e| EngineError::SpawnFailed(e.to_string()))?;

        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.kind() == ErrorKind::BrokenPipe => {
                debug!(page = %page_id, "engine closed stdin before reading all input");
            }
            Ok(Err(e)) => {
                return Err(EngineError::SpawnFailed(format!(
                    "failed to write to stdin: {e}"
                )));
            }
            Err(_) => {
                return Err(EngineError::SpawnFailed(
                    "stdin writer thread panicked".to_string(),
                ));
            }
        }

        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            return Err(EngineError::NonZeroExit {
                page: page_id,
                code: output.status.code(),
                stderr,
            });
        }

        if !stderr.is_empty() {
            warn!(
                cmd = ?self.argv,
                page = %page_id,
                stderr = %stderr.trim_end(),
                "engine command produced stderr output"
            );
        }

        String::from_utf8(output.stdout).map_err(|e| EngineError::InvalidOutput {
            page: page_id,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PageIdentifier {
        "ns:page".parse().unwrap()
    }

    #[test]
    fn test_empty_command_rejected() {
        assert!(matches!(
            CommandEngine::parse("").unwrap_err(),
            EngineError::InvalidCommand(_)
        ));
        assert!(matches!(
            CommandEngine::new(Vec::new()).unwrap_err(),
            EngineError::InvalidCommand(_)
        ));
    }

    #[test]
    fn test_unbalanced_quotes_rejected() {
        assert!(matches!(
            CommandEngine::parse("convert 'oops").unwrap_err(),
            EngineError::InvalidCommand(_)
        ));
    }

    #[test]
    fn test_parse_splits_arguments() {
        let engine = CommandEngine::parse("pandoc -f dokuwiki -t 'gfm'").unwrap();
        assert_eq!(engine.argv(), ["pandoc", "-f", "dokuwiki", "-t", "gfm"]);
        assert_eq!(engine.name(), "pandoc");
    }

    #[test]
    fn test_spawn_failure() {
        let engine = CommandEngine::parse("/nonexistent/dokumd-engine").unwrap();
        let err = engine.convert("text", &page()).unwrap_err();
        assert!(matches!(err, EngineError::SpawnFailed(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_is_used_verbatim() {
        let engine = CommandEngine::new(vec!["sh".into(), "-c".into(), "cat".into()]).unwrap();
        let out = engine.convert("== kept as is ==", &page()).unwrap();
        assert_eq!(out, "== kept as is ==");
    }

    #[cfg(unix)]
    #[test]
    fn test_page_id_passed_as_argument_and_env() {
        let engine = CommandEngine::new(vec![
            "sh".into(),
            "-c".into(),
            r#"printf '%s|%s' "$0" "$DOKUMD_PAGE_ID""#.into(),
        ])
        .unwrap();
        let out = engine.convert("", &page()).unwrap();
        assert_eq!(out, "ns:page|ns:page");
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit() {
        let engine = CommandEngine::new(vec![
            "sh".into(),
            "-c".into(),
            "echo broken >&2; exit 3".into(),
        ])
        .unwrap();
        match engine.convert("x", &page()).unwrap_err() {
            EngineError::NonZeroExit { page, code, stderr } => {
                assert_eq!(page, "ns:page");
                assert_eq!(code, Some(3));
                assert!(stderr.contains("broken"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_engine_ignoring_stdin_still_succeeds() {
        let engine =
            CommandEngine::new(vec!["sh".into(), "-c".into(), "printf done".into()]).unwrap();
        let big = "x".repeat(1 << 20);
        let out = engine.convert(&big, &page()).unwrap();
        assert_eq!(out, "done");
    }

    #[cfg(unix)]
    #[test]
    fn test_invalid_utf8_output() {
        let engine =
            CommandEngine::new(vec!["sh".into(), "-c".into(), r"printf '\377'".into()]).unwrap();
        assert!(matches!(
            engine.convert("", &page()).unwrap_err(),
            EngineError::InvalidOutput { .. }
        ));
    }
}
