use std::collections::BTreeMap;

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use td_core::{CommandId, CommandTree, CompiledScript, DialogError, VarValue};

use crate::matcher::{match_trigger, Bindings};
use crate::resolve::resolve_response;
use crate::store::VariableStore;

#[derive(Debug, Clone, Default)]
pub struct DialogOptions {
    pub random_seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogState {
    AtRoot,
    InContext { id: CommandId, trigger: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandSummary {
    pub id: usize,
    pub level: usize,
    pub kind: String,
    pub trigger: String,
    pub response: String,
    pub line: usize,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogSummary {
    pub commands: Vec<CommandSummary>,
    pub roots: Vec<usize>,
    pub variables: BTreeMap<String, VarValue>,
    pub context: Option<String>,
}

/// One conversation: the command tree built at load time, the variable
/// store, and the command whose children are tried first on the next turn.
#[derive(Debug)]
pub struct Dialog {
    tree: CommandTree,
    store: VariableStore,
    active_context: Option<CommandId>,
    diagnostics: Vec<DialogError>,
    rng: StdRng,
}

impl Dialog {
    pub fn new(script: CompiledScript, options: DialogOptions) -> Self {
        let rng = match options.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            tree: script.tree,
            store: VariableStore::from(script.variables),
            active_context: None,
            diagnostics: script.diagnostics,
            rng,
        }
    }

    /// A dialog with no commands and no variables; it never matches.
    pub fn inert(options: DialogOptions) -> Self {
        Self::new(CompiledScript::default(), options)
    }

    /// Runs one turn. Children of the active context are tried first, then
    /// every root in order. `Ok(None)` means nothing matched and nothing
    /// changed. Captures are stored only once the response resolved, so an
    /// `Err` also leaves the dialog as it was.
    pub fn handle_input(&mut self, text: &str) -> Result<Option<String>, DialogError> {
        let contextual = self
            .active_context
            .and_then(|context| self.find_match(self.tree.children(context).iter().copied(), text));
        let found = contextual.or_else(|| self.find_match(self.tree.roots(), text));

        let Some((id, bindings)) = found else {
            debug!("no match for input \"{}\"", text);
            return Ok(None);
        };

        let Some(node) = self.tree.get(id) else {
            return Err(DialogError::new(
                "TREE_NODE_MISSING",
                format!("Matched command {} is missing from the tree.", id.0),
            ));
        };
        let pending = bindings
            .into_iter()
            .map(|(name, value)| (name, VarValue::Scalar(value)))
            .collect::<Vec<_>>();
        let response = resolve_response(
            &node.response,
            self.store.view().with_pending(&pending),
            &mut self.rng,
        )?;

        for (name, value) in pending {
            debug!("captured {} = {:?}", name, value);
            self.store.set(name, value);
        }

        self.active_context = node.has_children().then_some(id);
        debug!(
            "matched \"{}\" (line {}); context is now {}",
            node.trigger.source_text(),
            node.line,
            self.context_label()
        );
        Ok(Some(response))
    }

    fn find_match(
        &self,
        candidates: impl Iterator<Item = CommandId>,
        input: &str,
    ) -> Option<(CommandId, Bindings)> {
        for id in candidates {
            let Some(node) = self.tree.get(id) else {
                continue;
            };
            if let Some(bindings) = match_trigger(&node.trigger, &node.response, input, &self.store)
            {
                return Some((id, bindings));
            }
        }
        None
    }

    pub fn state(&self) -> DialogState {
        match self.active_context.and_then(|id| self.tree.get(id).map(|node| (id, node))) {
            Some((id, node)) => DialogState::InContext {
                id,
                trigger: node.trigger.source_text(),
            },
            None => DialogState::AtRoot,
        }
    }

    /// Drops the active context; variables are kept.
    pub fn reset(&mut self) {
        self.active_context = None;
    }

    pub fn variable(&self, name: &str) -> Option<&VarValue> {
        self.store.get(name)
    }

    pub fn variables(&self) -> &VariableStore {
        &self.store
    }

    pub fn tree(&self) -> &CommandTree {
        &self.tree
    }

    pub fn diagnostics(&self) -> &[DialogError] {
        &self.diagnostics
    }

    pub fn is_inert(&self) -> bool {
        self.tree.is_empty() && self.store.is_empty()
    }

    fn context_label(&self) -> String {
        match self.state() {
            DialogState::AtRoot => "<root>".to_string(),
            DialogState::InContext { trigger, .. } => format!("\"{}\"", trigger),
        }
    }

    /// Human-readable dump of the command tree, the variables and the
    /// current context.
    pub fn describe(&self) -> String {
        let mut lines = vec!["Commands:".to_string()];
        lines.extend(self.tree.iter().map(|(id, node)| {
            format!(
                "{} - [{}] Level: {}, Trigger: {} ({}), Response: {}, Children: {}",
                "  ".repeat(node.level),
                id.0,
                node.level,
                node.trigger.source_text(),
                node.trigger.kind_name(),
                node.response,
                node.children.len()
            )
        }));
        lines.push("Variables:".to_string());
        lines.extend(
            self.store
                .iter()
                .map(|(name, value)| format!(" - Name: \"{}\", Value: {}", name, format_value(value))),
        );
        lines.push(format!("Context: {}", self.context_label()));

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    pub fn summary(&self) -> DialogSummary {
        let commands = self
            .tree
            .iter()
            .map(|(id, node)| CommandSummary {
                id: id.0,
                level: node.level,
                kind: node.trigger.kind_name().to_string(),
                trigger: node.trigger.source_text(),
                response: node.response.clone(),
                line: node.line,
                parent: node.parent.map(|parent| parent.0),
                children: node.children.iter().map(|child| child.0).collect(),
            })
            .collect();
        let context = match self.state() {
            DialogState::AtRoot => None,
            DialogState::InContext { trigger, .. } => Some(trigger),
        };

        DialogSummary {
            commands,
            roots: self.tree.roots().map(|id| id.0).collect(),
            variables: self.store.to_map(),
            context,
        }
    }
}

fn format_value(value: &VarValue) -> String {
    match value {
        VarValue::Scalar(value) => format!("\"{}\"", value),
        VarValue::List(values) => format!("{:?}", values),
    }
}
