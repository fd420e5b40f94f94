use std::sync::OnceLock;

use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::{Captures, Regex};
use td_core::{bracketed_inner, split_choice_list, DialogError, VarValue};

use crate::store::VariableView;

/// Turns a response template into the text handed back to the caller.
///
/// When a `~NAME` reference names a defined variable, or the template has no
/// bracketed list, `~NAME` and `$NAME` are filled in one left-to-right pass
/// over the template; inserted values are never scanned again. `~NAME` takes
/// a scalar verbatim or a random element of a list and is left as written
/// when undefined. `$NAME` only accepts scalars. Otherwise a bracketed list
/// resolves to one random token.
pub(crate) fn resolve_response<R: Rng + ?Sized>(
    template: &str,
    vars: VariableView<'_>,
    rng: &mut R,
) -> Result<String, DialogError> {
    let references_defined = variable_ref_regex()
        .captures_iter(template)
        .any(|caps| vars.get(&caps[1]).is_some());

    if !references_defined {
        if let Some(inner) = bracketed_inner(template) {
            let choices = split_choice_list(inner);
            return pick(&choices, rng).map(str::to_string).ok_or_else(|| {
                DialogError::new(
                    "RESPONSE_CHOICES_EMPTY",
                    format!("Response \"{}\" lists no choices.", template),
                )
            });
        }
    }

    replace_all(reference_regex(), template, |caps| {
        let name = &caps[2];
        match (&caps[1], vars.get(name)) {
            ("~", None) => {
                warn!("response references undefined variable ~{}", name);
                Ok(caps[0].to_string())
            }
            ("~", Some(VarValue::Scalar(value))) => Ok(value.clone()),
            ("~", Some(VarValue::List(values))) => pick(values, &mut *rng)
                .map(str::to_string)
                .ok_or_else(|| {
                    DialogError::new(
                        "RESPONSE_CHOICES_EMPTY",
                        format!("List variable \"{}\" has no values to choose from.", name),
                    )
                }),
            (_, None) => Err(DialogError::new(
                "RESPONSE_VARIABLE_UNDEFINED",
                format!("Variable \"{}\" is not defined.", name),
            )),
            (_, Some(VarValue::Scalar(value))) => Ok(value.clone()),
            (_, Some(VarValue::List(_))) => Err(DialogError::new(
                "RESPONSE_LIST_SUBSTITUTION",
                format!("List variable \"{}\" cannot fill a $ placeholder.", name),
            )),
        }
    })
}

fn pick<'a, R: Rng + ?Sized>(values: &'a [String], rng: &mut R) -> Option<&'a str> {
    values.choose(rng).map(String::as_str)
}

fn replace_all<F>(regex: &Regex, text: &str, mut replacement: F) -> Result<String, DialogError>
where
    F: FnMut(&Captures<'_>) -> Result<String, DialogError>,
{
    let mut output = String::with_capacity(text.len());
    let mut last = 0usize;
    for caps in regex.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        output.push_str(&text[last..whole.start()]);
        output.push_str(&replacement(&caps)?);
        last = whole.end();
    }
    output.push_str(&text[last..]);
    Ok(output)
}

fn variable_ref_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"~(\w+)").expect("variable reference regex"))
}

/// `~NAME` or `$NAME`; group 1 is the sigil.
fn reference_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"([~$])(\w+)").expect("reference regex"))
}
