mod case;
mod runner;
mod source;

pub use case::{ExpectedReply, TestCase, Turn, TESTCASE_FILE, TESTCASE_SCHEMA_V1};
pub use runner::{assert_case, run_case, RunReport};
pub use source::{discover_case_dirs, read_test_case};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TdToolError {
    #[error("Failed to read file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse testcase {path}: {source}")]
    ParseCase {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid testcase schema version \"{found}\", expected \"{expected}\".")]
    InvalidSchemaVersion { expected: String, found: String },
    #[error("No {file} found under {path}.")]
    CasesEmpty { file: String, path: PathBuf },
    #[error("Script load failed: {0}")]
    Load(td_core::DialogError),
    #[error("Engine error at turn {turn} (input {input:?}): {source}")]
    Engine {
        turn: usize,
        input: String,
        source: td_core::DialogError,
    },
    #[error("Expected diagnostics {expected:?}, actual {actual:?}.")]
    DiagnosticsMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },
    #[error("Reply mismatch at turn {turn} (input {input:?}). expected={expected} actual={actual}")]
    ReplyMismatch {
        turn: usize,
        input: String,
        expected: String,
        actual: String,
    },
    #[error("Failed to serialize reply for diff: {0}")]
    ReplySerialize(serde_json::Error),
}
