use log::warn;
use td_core::{DialogError, SourceLine};

use crate::line::{parse_line, ScriptStatement};

#[derive(Debug, Clone, Default)]
pub struct ParsedScript {
    pub statements: Vec<ScriptStatement>,
    pub diagnostics: Vec<DialogError>,
}

/// Splits raw script text into instruction lines.
///
/// Each physical line is trimmed. A `#` in first position drops the line; a
/// later `#` cuts the line there. Lines left empty are discarded.
pub fn strip_comments(source: &str) -> Vec<SourceLine> {
    let mut lines = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let trimmed = raw.trim();
        let kept = match trimmed.find('#') {
            Some(0) => continue,
            Some(position) => trimmed[..position].trim_end(),
            None => trimmed,
        };
        if kept.is_empty() {
            continue;
        }
        lines.push(SourceLine {
            number: index + 1,
            text: kept.to_string(),
        });
    }

    lines
}

/// Classifies every instruction line of `source`. Lines matching neither
/// grammar are logged, recorded as diagnostics and skipped.
pub fn parse_script(source: &str) -> ParsedScript {
    let mut parsed = ParsedScript::default();

    for line in strip_comments(source) {
        match parse_line(&line) {
            Ok(statement) => parsed.statements.push(statement),
            Err(error) => {
                warn!("line {}: {}", line.number, error);
                parsed.diagnostics.push(error);
            }
        }
    }

    parsed
}
