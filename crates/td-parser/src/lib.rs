mod line;
mod script;

pub use line::{parse_line, unwrap_response, ScriptStatement};
pub use script::{parse_script, strip_comments, ParsedScript};
