use std::sync::OnceLock;

use regex::Regex;
use td_core::{DialogError, SourceLine};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStatement {
    Variable {
        name: String,
        value_text: String,
        line: usize,
    },
    Command {
        level: usize,
        trigger: String,
        response: String,
        line: usize,
    },
}

/// Tries the variable grammar `~NAME : VALUE`, then the command grammar
/// `u<LEVEL?> : ( TRIGGER ) : RESPONSE`.
pub fn parse_line(line: &SourceLine) -> Result<ScriptStatement, DialogError> {
    if let Some(caps) = variable_regex().captures(&line.text) {
        return Ok(ScriptStatement::Variable {
            name: caps[1].to_string(),
            value_text: caps[2].trim().to_string(),
            line: line.number,
        });
    }

    let Some(caps) = command_regex().captures(&line.text) else {
        return Err(DialogError::at_line(
            "LINE_SYNTAX_INVALID",
            format!("Invalid command: {}", line.text),
            line.number,
        ));
    };

    let level = match &caps[1] {
        "" => 0,
        digits => digits.parse::<usize>().map_err(|error| {
            DialogError::at_line(
                "LINE_LEVEL_INVALID",
                format!("Invalid level \"{}\": {}", digits, error),
                line.number,
            )
        })?,
    };

    let trigger = caps[2].trim();
    if trigger.is_empty() {
        return Err(DialogError::at_line(
            "LINE_TRIGGER_EMPTY",
            format!("Command has an empty trigger: {}", line.text),
            line.number,
        ));
    }

    Ok(ScriptStatement::Command {
        level,
        trigger: trigger.to_string(),
        response: unwrap_response(&caps[3]).to_string(),
        line: line.number,
    })
}

/// Removes one pair of parentheses enclosing the whole response, so
/// `(Hi there)` and `Hi there` mean the same thing.
pub fn unwrap_response(raw: &str) -> &str {
    let trimmed = raw.trim();
    if !(trimmed.starts_with('(') && trimmed.ends_with(')')) {
        return trimmed;
    }

    let mut depth = 0usize;
    for (index, ch) in trimmed.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 && index != trimmed.len() - 1 {
                    return trimmed;
                }
            }
            _ => {}
        }
    }

    trimmed[1..trimmed.len() - 1].trim()
}

fn variable_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^~(\w+)\s*:\s*(.+)$").expect("variable line regex"))
}

fn command_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^u(\d*)\s*:\s*\(([\w\s~]+)\)\s*:\s*(.+)$").expect("command line regex")
    })
}

#[cfg(test)]
mod line_tests {
    use super::*;

    fn source(text: &str) -> SourceLine {
        SourceLine {
            number: 3,
            text: text.to_string(),
        }
    }

    #[test]
    fn parse_line_reads_variable_declarations() {
        let statement = parse_line(&source("~greetings :  [hello howdy \"hi there\"]"))
            .expect("variable should parse");
        assert_eq!(
            statement,
            ScriptStatement::Variable {
                name: "greetings".to_string(),
                value_text: "[hello howdy \"hi there\"]".to_string(),
                line: 3,
            }
        );
    }

    #[test]
    fn parse_line_defaults_missing_level_to_zero() {
        let statement = parse_line(&source("u: (hello) : (Hi there)")).expect("command");
        assert_eq!(
            statement,
            ScriptStatement::Command {
                level: 0,
                trigger: "hello".to_string(),
                response: "Hi there".to_string(),
                line: 3,
            }
        );
    }

    #[test]
    fn parse_line_reads_explicit_levels_and_variable_triggers() {
        let statement = parse_line(&source("u12:(~greetings):~greetings")).expect("command");
        assert_eq!(
            statement,
            ScriptStatement::Command {
                level: 12,
                trigger: "~greetings".to_string(),
                response: "~greetings".to_string(),
                line: 3,
            }
        );
    }

    #[test]
    fn parse_line_rejects_unknown_shapes() {
        for text in [
            "hello there",
            "u: hello : hi",
            "u: (what?) : no punctuation in triggers",
            "x1: (hi) : hello",
            "u: (hi) :",
        ] {
            let error = parse_line(&source(text)).expect_err("line should fail");
            assert_eq!(error.code, "LINE_SYNTAX_INVALID", "line: {}", text);
            assert_eq!(error.line, Some(3));
        }
    }

    #[test]
    fn parse_line_rejects_blank_trigger() {
        let error = parse_line(&source("u: (   ) : hi")).expect_err("blank trigger");
        assert_eq!(error.code, "LINE_TRIGGER_EMPTY");
    }

    #[test]
    fn parse_line_rejects_level_overflow() {
        let error = parse_line(&source("u99999999999999999999999: (hi) : hello"))
            .expect_err("overflow should fail");
        assert_eq!(error.code, "LINE_LEVEL_INVALID");
    }

    #[test]
    fn unwrap_response_only_strips_one_enclosing_pair() {
        assert_eq!(unwrap_response("(Hi there)"), "Hi there");
        assert_eq!(unwrap_response("  ( spaced )  "), "spaced");
        assert_eq!(unwrap_response("((nested))"), "(nested)");
        assert_eq!(unwrap_response("(a) and (b)"), "(a) and (b)");
        assert_eq!(unwrap_response("[yes no]"), "[yes no]");
    }
}
