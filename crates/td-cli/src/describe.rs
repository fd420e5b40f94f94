use std::io::Write;

use td_core::DialogError;

use crate::{load_dialog_strict, map_cli_json, map_cli_output, DescribeArgs};

pub(crate) fn run_describe(args: DescribeArgs, writer: &mut dyn Write) -> Result<i32, DialogError> {
    let dialog = load_dialog_strict(&args.source)?;
    if args.json {
        let encoded = serde_json::to_string_pretty(&dialog.summary()).map_err(map_cli_json)?;
        writeln!(writer, "{}", encoded).map_err(map_cli_output)?;
    } else {
        write!(writer, "{}", dialog.describe()).map_err(map_cli_output)?;
    }
    for diagnostic in dialog.diagnostics() {
        writeln!(writer, "DIAGNOSTIC:{}", diagnostic).map_err(map_cli_output)?;
    }
    Ok(0)
}
