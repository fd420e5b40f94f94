use std::ffi::OsString;
use std::io;

use clap::Parser;
use log::info;
use td_core::DialogError;

mod ask;
mod cli_args;
mod describe;
mod error_map;
mod line_chat;
mod logging;
mod models;
mod source_loader;

pub(crate) use cli_args::{AskArgs, ChatArgs, Cli, DescribeArgs, Mode, ScriptArgs};
pub(crate) use error_map::{emit_error, map_chat_io, map_cli_json, map_cli_output};
pub(crate) use line_chat::run_chat;
#[cfg(test)]
pub(crate) use line_chat::{handle_chat_command, run_chat_with_io};
pub(crate) use models::{ChatCommandAction, CHAT_HELP};
pub(crate) use source_loader::{load_dialog_lenient, load_dialog_strict, normalize_input};

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    logging::init_logging(cli.verbose);
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, DialogError> {
    match cli.command {
        Mode::Chat(args) => run_chat_mode(args),
        Mode::Ask(args) => ask::run_ask(args, &mut io::stdout()),
        Mode::Describe(args) => describe::run_describe(args, &mut io::stdout()),
    }
}

fn run_chat_mode(args: ChatArgs) -> Result<i32, DialogError> {
    let mut dialog = load_dialog_lenient(&args.source);
    info!(
        "chat started with {} commands from {}",
        dialog.tree().len(),
        args.source.script
    );
    run_chat(&mut dialog, args.lowercase)
}
