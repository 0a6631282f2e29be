//! Shared integration-test harness for running the `dokumd` binary against a
//! scratch DokuWiki tree.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// A scratch site: `data/pages`, `data/media` and an output root.
pub struct Site {
    dir: TempDir,
}

impl Site {
    /// Creates an empty site with a page root and no media root.
    #[allow(clippy::missing_panics_doc)]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        fs::create_dir_all(dir.path().join("data/pages")).expect("failed to create page root");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn pages(&self) -> PathBuf {
        self.root().join("data/pages")
    }

    pub fn media(&self) -> PathBuf {
        self.root().join("data/media")
    }

    pub fn out(&self) -> PathBuf {
        self.root().join("out")
    }

    /// Writes a page below `data/pages`.
    #[allow(clippy::missing_panics_doc)]
    pub fn page(&self, rel: &str, text: &str) -> &Self {
        write(&self.pages().join(rel), text);
        self
    }

    /// Writes a media file below `data/media`.
    #[allow(clippy::missing_panics_doc)]
    pub fn media_file(&self, rel: &str, bytes: &[u8]) -> &Self {
        write(&self.media().join(rel), bytes);
        self
    }

    /// Reads a file below the output root.
    #[allow(clippy::missing_panics_doc)]
    pub fn read_out(&self, rel: &str) -> String {
        fs::read_to_string(self.out().join(rel))
            .unwrap_or_else(|e| panic!("failed to read out/{rel}: {e}"))
    }

    /// Runs `dokumd <pages> <out> <extra...>`.
    pub fn convert(&self, extra: &[&str]) -> Output {
        let pages = self.pages();
        let out = self.out();
        let mut args = vec![
            pages.to_str().expect("non-UTF-8 path"),
            out.to_str().expect("non-UTF-8 path"),
        ];
        args.extend_from_slice(extra);
        run(&args)
    }
}

fn write(path: &Path, contents: impl AsRef<[u8]>) {
    fs::create_dir_all(path.parent().expect("path has parent")).expect("failed to create dir");
    fs::write(path, contents).expect("failed to write file");
}

/// Runs the `dokumd` binary with the given arguments and a clean log env.
#[allow(clippy::missing_panics_doc)]
pub fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dokumd"))
        .args(args)
        .env_remove("DOKUMD_LOG_LEVEL")
        .env_remove("DOKUMD_CONFIG")
        .env_remove("DOKUMD_ENGINE_COMMAND")
        .env_remove("DOKUMD_JOBS")
        .env_remove("DOKUMD_COLOR")
        .output()
        .expect("failed to run dokumd")
}

/// Formats stderr for assertion messages.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
