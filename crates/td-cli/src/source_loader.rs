use std::path::Path;

use log::warn;
use td_api::load_dialog_from_path;
use td_core::DialogError;
use td_runtime::{Dialog, DialogOptions};

use crate::ScriptArgs;

fn options(args: &ScriptArgs) -> DialogOptions {
    DialogOptions {
        random_seed: args.seed,
    }
}

/// An unreadable script is an error.
pub(crate) fn load_dialog_strict(args: &ScriptArgs) -> Result<Dialog, DialogError> {
    load_dialog_from_path(Path::new(&args.script), options(args)).map_err(|failure| failure.error)
}

/// An unreadable script leaves an inert dialog that never replies.
pub(crate) fn load_dialog_lenient(args: &ScriptArgs) -> Dialog {
    match load_dialog_from_path(Path::new(&args.script), options(args)) {
        Ok(dialog) => dialog,
        Err(failure) => {
            warn!("continuing without commands: {}", failure.error);
            failure.into_inert()
        }
    }
}

pub(crate) fn normalize_input(raw: &str, lowercase: bool) -> String {
    let line = raw.trim_end_matches(&['\r', '\n'][..]);
    if lowercase {
        line.to_lowercase()
    } else {
        line.to_string()
    }
}
