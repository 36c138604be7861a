//! Mock editor gateway

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::CallLog;
use crate::editor::{DocumentHandle, EditorDetails, EditorGateway};

#[derive(Debug, Default)]
struct MockEditorState {
    modified: bool,
    fail_save: bool,
    save_count: usize,
}

/// Scripted document handle with recorded saves
#[derive(Clone)]
pub struct MockEditor {
    state: Arc<Mutex<MockEditorState>>,
    log: CallLog,
}

impl MockEditor {
    pub fn new(log: CallLog) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockEditorState::default())),
            log,
        }
    }

    /// Script whether the document reports unsaved modifications
    pub fn set_modified(&self, modified: bool) {
        self.state.lock().unwrap().modified = modified;
    }

    /// Make the next save fail with a permission error
    pub fn set_fail_save(&self, fail: bool) {
        self.state.lock().unwrap().fail_save = fail;
    }

    /// How many times `save` was invoked
    pub fn save_count(&self) -> usize {
        self.state.lock().unwrap().save_count
    }
}

impl DocumentHandle for MockEditor {
    fn is_modified(&self) -> bool {
        self.state.lock().unwrap().modified
    }

    fn save(&self) -> io::Result<()> {
        let mut state = self.state.lock().unwrap();
        state.save_count += 1;
        self.log.lock().unwrap().push("save".to_string());
        if state.fail_save {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "scripted save failure",
            ));
        }
        Ok(())
    }
}

/// Scripted editor gateway
///
/// Three shapes: no active editor at all, an editor on a never-saved
/// document, or an editor on a file.
pub struct MockGateway {
    editor: Option<MockEditor>,
    file_path: Option<PathBuf>,
}

impl MockGateway {
    /// No suitable active document
    pub fn no_editor() -> Self {
        Self {
            editor: None,
            file_path: None,
        }
    }

    /// An editor on a document that has never been saved
    pub fn unsaved(editor: MockEditor) -> Self {
        Self {
            editor: Some(editor),
            file_path: None,
        }
    }

    /// An editor on the given file
    pub fn file(editor: MockEditor, file_path: PathBuf) -> Self {
        Self {
            editor: Some(editor),
            file_path: Some(file_path),
        }
    }
}

impl EditorGateway for MockGateway {
    fn editor_details(&self) -> Option<EditorDetails> {
        let editor = self.editor.clone()?;
        Some(EditorDetails {
            editor: Box::new(editor),
            file_path: self.file_path.clone(),
        })
    }
}
