use std::fmt::Display;

use td_core::DialogError;

fn map_error(code: &'static str, error: impl Display) -> DialogError {
    DialogError::new(code, error.to_string())
}

pub(crate) fn emit_error(error: DialogError) -> i32 {
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    println!(
        "ERROR_MSG_JSON:{}",
        serde_json::to_string(&error.message).unwrap_or_else(|_| "\"\"".to_string())
    );
    1
}

pub(crate) fn map_chat_io(error: std::io::Error) -> DialogError {
    map_error("CHAT_IO", error)
}

pub(crate) fn map_cli_output(error: std::io::Error) -> DialogError {
    map_error("CLI_OUTPUT", error)
}

pub(crate) fn map_cli_json(error: serde_json::Error) -> DialogError {
    map_error("CLI_JSON", error)
}
