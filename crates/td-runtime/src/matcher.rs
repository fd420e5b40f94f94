use std::sync::OnceLock;

use regex::Regex;
use td_core::{Trigger, VarValue};

use crate::store::VariableStore;

/// Variable assignments a successful wildcard match asks for.
pub(crate) type Bindings = Vec<(String, String)>;

/// Decides whether `input` satisfies `trigger`, without touching the store.
///
/// Comparison is case-sensitive; literals must be equal and wildcards only
/// need to match from the start of the input. A wildcard match pairs the i-th
/// captured word with the i-th `$NAME` placeholder of `response`; surplus
/// captures or placeholders are ignored.
pub(crate) fn match_trigger(
    trigger: &Trigger,
    response: &str,
    input: &str,
    store: &VariableStore,
) -> Option<Bindings> {
    match trigger {
        Trigger::VariableRef(name) => match store.get(name)? {
            VarValue::Scalar(_) => Some(Vec::new()),
            VarValue::List(values) => values
                .iter()
                .any(|value| value == input)
                .then(Vec::new),
        },
        Trigger::Literal(text) => (text == input).then(Vec::new),
        Trigger::Wildcard { pattern, .. } => {
            let caps = pattern.captures(input)?;
            let captured = caps
                .iter()
                .skip(1)
                .flatten()
                .map(|capture| capture.as_str().to_string());
            let bindings = placeholder_names(response)
                .into_iter()
                .zip(captured)
                .collect();
            Some(bindings)
        }
    }
}

pub(crate) fn placeholder_names(response: &str) -> Vec<String> {
    placeholder_regex()
        .captures_iter(response)
        .map(|caps| caps[1].to_string())
        .collect()
}

fn placeholder_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\$(\w+)").expect("placeholder regex"))
}
