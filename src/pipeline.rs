//! Page conversion pipeline.
//!
//! Holds the engine chosen for the run and turns [`SourceDocument`]s into
//! [`ConvertedDocument`]s. The pipeline does not know which engine it
//! holds; an engine failure is returned to the caller untouched.

use tracing::debug;

use crate::document::{ConvertedDocument, SourceDocument};
use crate::engine::{BuiltinEngine, Engine};
use crate::error::EngineError;

/// Converts pages with a single engine.
pub struct ConversionPipeline {
    engine: Box<dyn Engine>,
}

impl ConversionPipeline {
    /// Creates a pipeline around `engine`.
    #[must_use]
    pub fn new(engine: Box<dyn Engine>) -> Self {
        Self { engine }
    }

    /// Pipeline using the built-in rewrite rules.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(Box::new(BuiltinEngine))
    }

    /// Name of the configured engine.
    #[must_use]
    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Converts one page.
    ///
    /// # Errors
    ///
    /// Returns the engine's error unchanged if conversion fails.
    pub fn convert(&self, doc: &SourceDocument) -> Result<ConvertedDocument, EngineError> {
        let text = self.engine.convert(doc.text(), doc.id())?;
        let converted = ConvertedDocument::new(doc.id().clone(), text);
        debug!(
            page = %doc.id(),
            engine = self.engine.name(),
            bytes_in = doc.text().len(),
            bytes_out = converted.text().len(),
            "page converted"
        );
        Ok(converted)
    }
}

impl Default for ConversionPipeline {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for ConversionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionPipeline")
            .field("engine", &self.engine.name())
            .finish()
    }
}
