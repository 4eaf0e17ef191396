//! @ai:module:intent Per-run accumulators for extracted functions, skipped names and errors
//! @ai:module:layer domain
//! @ai:module:public_api ExtractionContext, ExtractionReport
//! @ai:module:depends_on metadata
//! @ai:module:stateless false

use crate::metadata::{FunctionRecord, MetadataDocument};
use serde::{Deserialize, Serialize};

/// @ai:intent Mutable state owned by exactly one extraction run
/// @ai:invariant created fresh for every run and consumed by `finish`
#[derive(Debug, Default)]
pub struct ExtractionContext {
    functions: Vec<FunctionRecord>,
    skipped: Vec<String>,
    errors: Vec<String>,
}

/// @ai:intent Everything a run produced, returned to the caller for inspection
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ExtractionReport {
    pub functions: Vec<FunctionRecord>,
    pub skipped: Vec<String>,
    pub errors: Vec<String>,
}

impl ExtractionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Record a problem; the walk continues but the run will emit nothing
    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!("extraction error: {}", message);
        self.errors.push(message);
    }

    pub fn skip(&mut self, name: &str) {
        tracing::debug!("skipping function without @customfunction: {}", name);
        self.skipped.push(name.to_string());
    }

    pub fn emit(&mut self, record: FunctionRecord) {
        self.functions.push(record);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn finish(self) -> ExtractionReport {
        ExtractionReport {
            functions: self.functions,
            skipped: self.skipped,
            errors: self.errors,
        }
    }
}

impl ExtractionReport {
    /// @ai:intent A run succeeds only when no error was recorded
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// @ai:intent The document to persist, or None when the run failed
    /// @ai:effects pure
    pub fn document(&self) -> Option<MetadataDocument> {
        self.is_success().then(|| MetadataDocument {
            functions: self.functions.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_suppress_document() {
        let mut ctx = ExtractionContext::new();
        ctx.emit(FunctionRecord::new("add"));
        ctx.error("Invalid type: Date");

        assert!(ctx.has_errors());
        let report = ctx.finish();
        assert!(!report.is_success());
        assert_eq!(report.document(), None);
        assert_eq!(report.functions.len(), 1);
    }

    #[test]
    fn test_fresh_contexts_share_nothing() {
        let mut first = ExtractionContext::new();
        first.skip("notAdded");
        first.error("boom");

        let second = ExtractionContext::new().finish();
        assert!(second.skipped.is_empty());
        assert!(second.errors.is_empty());
        assert_eq!(
            second.document(),
            Some(MetadataDocument { functions: vec![] })
        );
    }
}
