//! Recording reporter

use std::sync::{Arc, Mutex};

use crate::composer::ComposerError;
use crate::reporter::ResultReporter;
use crate::result::CompletedBuild;

/// Reporter that captures every call for later assertions
#[derive(Clone, Default)]
pub struct RecordingReporter {
    results: Arc<Mutex<Vec<CompletedBuild>>>,
    errors: Arc<Mutex<Vec<String>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result_count(&self) -> usize {
        self.results.lock().unwrap().len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.lock().unwrap().len()
    }

    pub fn last_result(&self) -> Option<CompletedBuild> {
        self.results.lock().unwrap().last().cloned()
    }

    pub fn last_error(&self) -> Option<String> {
        self.errors.lock().unwrap().last().cloned()
    }
}

impl ResultReporter for RecordingReporter {
    fn show_result(&self, result: &CompletedBuild) {
        self.results.lock().unwrap().push(result.clone());
    }

    fn show_error(&self, reason: &ComposerError) {
        self.errors.lock().unwrap().push(reason.to_string());
    }
}
