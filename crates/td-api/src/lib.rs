use std::fs;
use std::path::{Path, PathBuf};

use log::error;
use td_compiler::compile_script;
use td_core::DialogError;
use td_runtime::{Dialog, DialogOptions};
use thiserror::Error;

pub const DEFAULT_SCRIPT_FILE: &str = "dialog.txt";

/// A script source that could not be read. The inert dialog built in its
/// place is handed back so the caller can decide whether to keep going.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct LoadFailure {
    pub error: DialogError,
    pub inert: Dialog,
}

impl LoadFailure {
    pub fn into_inert(self) -> Dialog {
        self.inert
    }
}

pub fn load_dialog_from_str(source: &str, options: DialogOptions) -> Dialog {
    Dialog::new(compile_script(source), options)
}

pub fn load_dialog_from_path(path: &Path, options: DialogOptions) -> Result<Dialog, LoadFailure> {
    let script_path = resolve_script_path(path);
    match fs::read_to_string(&script_path) {
        Ok(source) => Ok(load_dialog_from_str(&source, options)),
        Err(source_error) => {
            let error = DialogError::new(
                "SCRIPT_READ_FAILED",
                format!(
                    "Unable to open \"{}\": {}",
                    script_path.display(),
                    source_error
                ),
            );
            error!("{}", error);
            Err(LoadFailure {
                error,
                inert: Dialog::inert(options),
            })
        }
    }
}

/// A directory stands for the default script file inside it.
pub fn resolve_script_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(DEFAULT_SCRIPT_FILE)
    } else {
        path.to_path_buf()
    }
}
