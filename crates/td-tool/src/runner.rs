use std::path::Path;

use td_api::load_dialog_from_path;
use td_runtime::DialogOptions;

use crate::source::read_test_case;
use crate::{TdToolError, TestCase};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub replies: Vec<Option<String>>,
    pub diagnostics: Vec<String>,
}

/// Feeds every turn of `case` to a fresh dialog loaded from `case_dir`.
pub fn run_case(case_dir: &Path, case: &TestCase) -> Result<RunReport, TdToolError> {
    let mut dialog = load_dialog_from_path(
        &case_dir.join(&case.script),
        DialogOptions {
            random_seed: Some(case.random_seed),
        },
    )
    .map_err(|failure| TdToolError::Load(failure.error))?;

    let diagnostics = dialog
        .diagnostics()
        .iter()
        .map(|diagnostic| diagnostic.code.clone())
        .collect();

    let mut replies = Vec::with_capacity(case.turns.len());
    for (turn, step) in case.turns.iter().enumerate() {
        let reply = dialog
            .handle_input(&step.input)
            .map_err(|source| TdToolError::Engine {
                turn,
                input: step.input.clone(),
                source,
            })?;
        replies.push(reply);
    }

    Ok(RunReport {
        replies,
        diagnostics,
    })
}

pub fn assert_case(case_dir: &Path, case_path: &Path) -> Result<(), TdToolError> {
    let case = read_test_case(case_path)?;
    let report = run_case(case_dir, &case)?;

    if report.diagnostics != case.expected_diagnostics {
        return Err(TdToolError::DiagnosticsMismatch {
            expected: case.expected_diagnostics,
            actual: report.diagnostics,
        });
    }

    for (turn, (step, actual)) in case.turns.iter().zip(report.replies.iter()).enumerate() {
        if step.expect.accepts(actual.as_deref()) {
            continue;
        }
        let expected = serde_json::to_string(&step.expect).map_err(TdToolError::ReplySerialize)?;
        let actual = serde_json::to_string(actual).map_err(TdToolError::ReplySerialize)?;
        return Err(TdToolError::ReplyMismatch {
            turn,
            input: step.input.clone(),
            expected,
            actual,
        });
    }

    Ok(())
}
