use std::collections::BTreeMap;

use log::{info, warn};
use td_core::{parse_value, CommandNode, CompiledScript, DialogError};
use td_parser::{parse_script, ScriptStatement};

use crate::hierarchy::HierarchyBuilder;
use crate::trigger::compile_trigger;

pub fn compile_script(source: &str) -> CompiledScript {
    let parsed = parse_script(source);
    let mut compiled = compile_statements(&parsed.statements);

    let mut diagnostics = parsed.diagnostics;
    diagnostics.append(&mut compiled.diagnostics);
    diagnostics.sort_by_key(|diagnostic| diagnostic.line);
    compiled.diagnostics = diagnostics;

    info!(
        "compiled {} commands ({} roots), {} variables, {} diagnostics",
        compiled.tree.len(),
        compiled.tree.root_count(),
        compiled.variables.len(),
        compiled.diagnostics.len()
    );
    compiled
}

pub fn compile_statements(statements: &[ScriptStatement]) -> CompiledScript {
    let mut variables = BTreeMap::new();
    let mut diagnostics = Vec::new();
    let mut builder = HierarchyBuilder::new();

    for statement in statements {
        match statement {
            ScriptStatement::Variable {
                name, value_text, ..
            } => {
                variables.insert(name.clone(), parse_value(value_text));
            }
            ScriptStatement::Command {
                level,
                trigger,
                response,
                line,
            } => {
                let added = compile_trigger(trigger)
                    .map(|trigger| CommandNode::new(*level, trigger, response.clone(), *line))
                    .and_then(|node| builder.add(node));
                if let Err(error) = added {
                    let error = DialogError::at_line(error.code, error.message, *line);
                    warn!("line {}: {}", line, error);
                    diagnostics.push(error);
                }
            }
        }
    }

    let (tree, mut hierarchy_diagnostics) = builder.finish();
    diagnostics.append(&mut hierarchy_diagnostics);

    CompiledScript {
        tree,
        variables,
        diagnostics,
    }
}
