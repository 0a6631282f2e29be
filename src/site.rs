//! Whole-site conversion driver.
//!
//! Converts every page below the page root, then relocates media. The first
//! failing page stops the run; pages written before it stay on disk.

use std::fs;
use std::path::PathBuf;

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::document::SourceDocument;
use crate::emit::PageEmitter;
use crate::error::{DokumdError, Result, SourceRoot};
use crate::media::{MediaRelocator, MediaReport};
use crate::pipeline::ConversionPipeline;
use crate::scan::{PageEntry, SOURCE_EXTENSION, scan_pages};

/// Inputs of a site conversion.
#[derive(Debug, Clone)]
pub struct SiteOptions {
    /// DokuWiki `data/pages` directory.
    pub pages_dir: PathBuf,
    /// Destination root for Markdown files.
    pub output_dir: PathBuf,
    /// DokuWiki `data/media` directory, if media should be copied.
    pub media_dir: Option<PathBuf>,
    /// Overwrite existing pages and media.
    pub force: bool,
    /// Worker threads for page conversion (1 = sequential).
    pub jobs: usize,
}

impl SiteOptions {
    /// Sequential, non-destructive options without media.
    #[must_use]
    pub fn new(pages_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            pages_dir: pages_dir.into(),
            output_dir: output_dir.into(),
            media_dir: None,
            force: false,
            jobs: 1,
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Engine that converted the pages.
    pub engine: String,
    /// Pages written.
    pub pages_converted: usize,
    /// Page files whose path did not form a valid identifier.
    pub pages_skipped: usize,
    /// Media outcome, when a media root was given.
    pub media: Option<MediaReport>,
}

/// Converts a DokuWiki page tree (and optionally its media) into Markdown.
///
/// # Errors
///
/// Returns `DokumdError::MissingSourceRoot` before converting anything if
/// the page root or the media root does not exist. Otherwise returns the
/// first read, engine, emit or media error encountered.
pub fn convert_site(options: &SiteOptions, pipeline: &ConversionPipeline) -> Result<RunReport> {
    if !options.pages_dir.exists() {
        return Err(DokumdError::MissingSourceRoot {
            kind: SourceRoot::Pages,
            path: options.pages_dir.clone(),
        });
    }
    if let Some(media_dir) = &options.media_dir {
        if !media_dir.exists() {
            return Err(DokumdError::MissingSourceRoot {
                kind: SourceRoot::Media,
                path: media_dir.clone(),
            });
        }
    }

    let scan = scan_pages(&options.pages_dir, SOURCE_EXTENSION)?;
    let emitter = PageEmitter::new(&options.output_dir, options.force);

    info!(
        pages = scan.pages.len(),
        engine = pipeline.engine_name(),
        jobs = options.jobs,
        "converting pages"
    );

    if options.jobs <= 1 {
        for entry in &scan.pages {
            convert_page(entry, pipeline, &emitter)?;
        }
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.jobs)
            .build()
            .map_err(|e| DokumdError::Io(std::io::Error::other(e)))?;
        pool.install(|| {
            scan.pages
                .par_iter()
                .try_for_each(|entry| convert_page(entry, pipeline, &emitter))
        })?;
    }

    let media = match &options.media_dir {
        Some(media_dir) => {
            info!(media_dir = %media_dir.display(), "copying media");
            let report =
                MediaRelocator::new(media_dir, &options.output_dir, options.force).relocate()?;
            Some(report)
        }
        None => None,
    };

    Ok(RunReport {
        engine: pipeline.engine_name().to_string(),
        pages_converted: scan.pages.len(),
        pages_skipped: scan.skipped.len(),
        media,
    })
}

/// Reads, converts and writes a single page.
fn convert_page(
    entry: &PageEntry,
    pipeline: &ConversionPipeline,
    emitter: &PageEmitter,
) -> Result<()> {
    let text = fs::read_to_string(&entry.source).map_err(|source| DokumdError::ReadPage {
        path: entry.source.clone(),
        source,
    })?;

    let doc = SourceDocument::new(entry.id.clone(), text);
    let converted = pipeline.convert(&doc)?;
    info!(page = %entry.id, path = %converted.path(), "converting");
    emitter.emit(&converted)?;
    Ok(())
}
