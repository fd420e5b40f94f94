use std::io::{self, BufRead, Write};

use log::{debug, warn};
use td_core::DialogError;
use td_runtime::Dialog;

use crate::{map_chat_io, normalize_input, ChatCommandAction, CHAT_HELP};

pub(crate) fn run_chat(dialog: &mut Dialog, lowercase: bool) -> Result<i32, DialogError> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout();
    run_chat_with_io(dialog, lowercase, &mut reader, &mut writer)
}

pub(crate) fn run_chat_with_io(
    dialog: &mut Dialog,
    lowercase: bool,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<i32, DialogError> {
    writeln!(writer, "Tango dialog").map_err(map_chat_io)?;
    writeln!(writer, "{}", CHAT_HELP).map_err(map_chat_io)?;

    loop {
        let Some(raw) = prompt_input_from(" > ", reader, writer)? else {
            writeln!(writer).map_err(map_chat_io)?;
            debug!("input closed");
            return Ok(0);
        };
        let mut lines = Vec::new();
        let action = handle_chat_command(raw.as_str(), dialog, &mut |line| lines.push(line));
        for line in lines {
            writeln!(writer, "{}", line).map_err(map_chat_io)?;
        }
        match action {
            ChatCommandAction::Continue => continue,
            ChatCommandAction::Quit => return Ok(0),
            ChatCommandAction::NotHandled => {}
        }

        let text = normalize_input(&raw, lowercase);
        match dialog.handle_input(&text) {
            Ok(Some(reply)) => writeln!(writer, "{}", reply).map_err(map_chat_io)?,
            Ok(None) => {}
            Err(error) => {
                warn!("reply failed for {:?}: {}", text, error);
                writeln!(writer, "[{}] {}", error.code, error.message).map_err(map_chat_io)?;
            }
        }
    }
}

pub(crate) fn handle_chat_command(
    raw: &str,
    dialog: &mut Dialog,
    emit: &mut dyn FnMut(String),
) -> ChatCommandAction {
    match raw.trim() {
        ":help" => {
            emit(CHAT_HELP.to_string());
            ChatCommandAction::Continue
        }
        ":describe" => {
            for line in dialog.describe().lines() {
                emit(line.to_string());
            }
            ChatCommandAction::Continue
        }
        ":reset" => {
            dialog.reset();
            emit("context cleared".to_string());
            ChatCommandAction::Continue
        }
        ":quit" => {
            emit("bye".to_string());
            ChatCommandAction::Quit
        }
        _ => ChatCommandAction::NotHandled,
    }
}

/// `None` once the reader is exhausted.
pub(crate) fn prompt_input_from(
    prefix: &str,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<Option<String>, DialogError> {
    write!(writer, "{}", prefix).map_err(map_chat_io)?;
    writer.flush().map_err(map_chat_io)?;
    let mut input = String::new();
    let read = reader.read_line(&mut input).map_err(map_chat_io)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim_end_matches(&['\r', '\n'][..]).to_string()))
}
