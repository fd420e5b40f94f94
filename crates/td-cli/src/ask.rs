use std::io::Write;

use td_core::DialogError;

use crate::{load_dialog_strict, map_cli_json, map_cli_output, normalize_input, AskArgs};

/// Runs every `--text` turn against one dialog. Output is line-oriented:
/// `RESULT:OK`, one `REPLY_JSON:` per turn (`null` when nothing matched),
/// then the final context.
pub(crate) fn run_ask(args: AskArgs, writer: &mut dyn Write) -> Result<i32, DialogError> {
    let mut dialog = load_dialog_strict(&args.source)?;
    let mut replies = Vec::with_capacity(args.texts.len());
    for text in &args.texts {
        let reply = dialog.handle_input(&normalize_input(text, args.lowercase))?;
        replies.push(reply);
    }

    writeln!(writer, "RESULT:OK").map_err(map_cli_output)?;
    for reply in &replies {
        let encoded = serde_json::to_string(reply).map_err(map_cli_json)?;
        writeln!(writer, "REPLY_JSON:{}", encoded).map_err(map_cli_output)?;
    }
    let context = serde_json::to_string(&dialog.summary().context).map_err(map_cli_json)?;
    writeln!(writer, "CONTEXT_JSON:{}", context).map_err(map_cli_output)?;
    Ok(0)
}
