//! Mock collaborators
//!
//! Scripted implementations of the composer's collaborator traits for
//! unit and integration tests:
//!
//! - `MockEditor` / `MockGateway`: editor state with recorded saves
//! - `MockBuilder`: scripted run outcome and log-parse result
//! - `RecordingReporter`: captures every reporter call
//!
//! Mocks that share a `CallLog` record their calls in one ordered
//! sequence, so tests can assert cross-collaborator ordering (save
//! before run, run before parse).

mod builder;
mod editor;
mod reporter;

use std::sync::{Arc, Mutex};

/// Ordered record of collaborator calls shared between mocks
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub use builder::MockBuilder;
pub use editor::{MockEditor, MockGateway};
pub use reporter::RecordingReporter;
