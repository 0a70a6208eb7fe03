//! Common test utilities.

use std::cell::Cell;
use std::path::PathBuf;

use subtrack::page::ConfirmPrompt;

/// Loads a canned response body from the responses directory.
pub fn get_response(filename: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/responses");
    path.push(filename);
    std::fs::read_to_string(path).expect("Failed to read response file")
}

/// Confirmation prompt with a fixed answer, counting how often it was asked.
pub struct StubPrompt {
    answer: bool,
    asked: Cell<usize>,
}

#[allow(dead_code)]
impl StubPrompt {
    pub fn yes() -> Self {
        Self {
            answer: true,
            asked: Cell::new(0),
        }
    }

    pub fn no() -> Self {
        Self {
            answer: false,
            asked: Cell::new(0),
        }
    }

    pub fn asked(&self) -> usize {
        self.asked.get()
    }
}

impl ConfirmPrompt for StubPrompt {
    fn confirm(&self, _message: &str) -> bool {
        self.asked.set(self.asked.get() + 1);
        self.answer
    }
}
