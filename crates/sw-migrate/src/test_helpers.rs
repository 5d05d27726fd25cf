//! Shared fixtures for engine unit tests.

use crate::events::EventSink;
use std::cell::RefCell;
use std::path::Path;
use sw_core::{catalog, Direction, MigrationFile};

/// Event sink that keeps every message for later assertions.
#[derive(Default)]
pub(crate) struct RecordingEvents {
    pub(crate) infos: RefCell<Vec<String>>,
    pub(crate) warnings: RefCell<Vec<String>>,
    pub(crate) errors: RefCell<Vec<String>>,
}

impl EventSink for RecordingEvents {
    fn info(&self, message: &str) {
        self.infos.borrow_mut().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}

pub(crate) fn write_files(dir: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        std::fs::write(dir.join(name), content).unwrap();
    }
}

pub(crate) fn list(dir: &Path, direction: Direction) -> Vec<MigrationFile> {
    catalog::list_by_direction(dir, direction).unwrap()
}
