use std::sync::OnceLock;

use regex::Regex;
use td_core::{DialogError, Trigger};

const WILDCARD_TOKEN: &str = "_";
const WILDCARD_CAPTURE: &str = r"(\w+)";

/// Decides a trigger's shape once, at load time.
///
/// `~NAME` alone is a variable reference. A trigger with at least one
/// standalone `_` word becomes a pattern anchored at the start of the input,
/// where each `_` captures one run of word characters and each whitespace
/// run matches any whitespace run. Words after the pattern are ignored, so
/// `my name is _` accepts "my name is Alex Smith" and captures "Alex".
/// Everything else is compared literally.
pub fn compile_trigger(text: &str) -> Result<Trigger, DialogError> {
    if let Some(caps) = variable_ref_regex().captures(text) {
        return Ok(Trigger::VariableRef(caps[1].to_string()));
    }

    let words = text.split_whitespace().collect::<Vec<_>>();
    if !words.contains(&WILDCARD_TOKEN) {
        return Ok(Trigger::Literal(text.to_string()));
    }

    let body = words
        .iter()
        .map(|word| {
            if *word == WILDCARD_TOKEN {
                WILDCARD_CAPTURE.to_string()
            } else {
                regex::escape(word)
            }
        })
        .collect::<Vec<_>>()
        .join(r"\s+");
    let pattern = Regex::new(&format!("^{}", body)).map_err(|error| {
        DialogError::new(
            "TRIGGER_PATTERN_INVALID",
            format!("Trigger \"{}\" does not compile: {}", text, error),
        )
    })?;

    Ok(Trigger::Wildcard {
        source: text.to_string(),
        pattern,
    })
}

fn variable_ref_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^~(\w+)$").expect("variable trigger regex"))
}

#[cfg(test)]
mod trigger_tests {
    use super::*;

    #[test]
    fn exact_variable_reference_is_classified_as_variable() {
        let trigger = compile_trigger("~greetings").expect("trigger");
        assert!(matches!(trigger, Trigger::VariableRef(ref name) if name == "greetings"));
    }

    #[test]
    fn variable_marker_inside_longer_text_stays_literal() {
        let trigger = compile_trigger("say ~greetings").expect("trigger");
        assert!(matches!(trigger, Trigger::Literal(ref text) if text == "say ~greetings"));
    }

    #[test]
    fn standalone_underscore_builds_start_anchored_capture_pattern() {
        let trigger = compile_trigger("my name is _").expect("trigger");
        let Trigger::Wildcard { source, pattern } = trigger else {
            panic!("expected wildcard trigger");
        };
        assert_eq!(source, "my name is _");
        let caps = pattern.captures("my name is Alex").expect("should match");
        assert_eq!(&caps[1], "Alex");
        assert!(!pattern.is_match("well my name is Alex"));
        assert!(!pattern.is_match("my name is"));
        assert!(pattern.is_match("my  name is Alex"));
    }

    #[test]
    fn trailing_words_after_wildcard_are_ignored() {
        let Trigger::Wildcard { pattern, .. } = compile_trigger("my name is _").expect("trigger")
        else {
            panic!("expected wildcard trigger");
        };
        let caps = pattern
            .captures("my name is Alex Smith")
            .expect("trailing words should still match");
        assert_eq!(caps.len(), 2);
        assert_eq!(&caps[1], "Alex");
    }

    #[test]
    fn several_placeholders_capture_left_to_right() {
        let Trigger::Wildcard { pattern, .. } = compile_trigger("_ likes _").expect("trigger")
        else {
            panic!("expected wildcard trigger");
        };
        let caps = pattern.captures("Kyler likes robots").expect("should match");
        assert_eq!(&caps[1], "Kyler");
        assert_eq!(&caps[2], "robots");
    }

    #[test]
    fn underscore_inside_a_word_is_not_a_placeholder() {
        let trigger = compile_trigger("snake_case please").expect("trigger");
        assert!(matches!(trigger, Trigger::Literal(_)));
    }
}
