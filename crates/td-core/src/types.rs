use std::collections::BTreeMap;

use regex::Regex;

use crate::error::DialogError;
use crate::value::VarValue;

/// One instruction line left after comment stripping, with its 1-based
/// physical line number in the script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

/// The shape a command's trigger was compiled into.
#[derive(Debug, Clone)]
pub enum Trigger {
    Literal(String),
    /// `source` is the trigger as written; `pattern` is anchored at the start
    /// of the input and holds one capture group per `_` placeholder.
    Wildcard { source: String, pattern: Regex },
    VariableRef(String),
}

impl Trigger {
    /// Trigger text as written in the script, also used as the root key.
    pub fn source_text(&self) -> String {
        match self {
            Self::Literal(text) => text.clone(),
            Self::Wildcard { source, .. } => source.clone(),
            Self::VariableRef(name) => format!("~{}", name),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Literal(_) => "literal",
            Self::Wildcard { .. } => "wildcard",
            Self::VariableRef(_) => "variable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommandId(pub usize);

#[derive(Debug, Clone)]
pub struct CommandNode {
    pub level: usize,
    pub trigger: Trigger,
    pub response: String,
    pub line: usize,
    pub children: Vec<CommandId>,
    pub parent: Option<CommandId>,
}

impl CommandNode {
    pub fn new(level: usize, trigger: Trigger, response: impl Into<String>, line: usize) -> Self {
        Self {
            level,
            trigger,
            response: response.into(),
            line,
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

#[derive(Debug, Clone)]
struct RootEntry {
    key: String,
    id: CommandId,
}

/// Arena of every compiled command in declaration order, plus the ordered
/// root mapping. Parent and child links are indices into the arena.
#[derive(Debug, Clone, Default)]
pub struct CommandTree {
    nodes: Vec<CommandNode>,
    roots: Vec<RootEntry>,
}

impl CommandTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: CommandNode) -> CommandId {
        self.nodes.push(node);
        CommandId(self.nodes.len() - 1)
    }

    /// Registers `id` under `key`. An existing key keeps its position in
    /// iteration order and now points at `id`; the displaced command is
    /// returned.
    pub fn insert_root(&mut self, key: impl Into<String>, id: CommandId) -> Option<CommandId> {
        let key = key.into();
        if let Some(entry) = self.roots.iter_mut().find(|entry| entry.key == key) {
            return Some(std::mem::replace(&mut entry.id, id));
        }
        self.roots.push(RootEntry { key, id });
        None
    }

    pub fn attach_child(&mut self, parent: CommandId, child: CommandId) -> Result<(), DialogError> {
        if parent.0 >= self.nodes.len() || child.0 >= self.nodes.len() {
            return Err(DialogError::new(
                "TREE_NODE_MISSING",
                format!("Cannot attach command {} to {}.", child.0, parent.0),
            ));
        }
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    pub fn get(&self, id: CommandId) -> Option<&CommandNode> {
        self.nodes.get(id.0)
    }

    pub fn roots(&self) -> impl Iterator<Item = CommandId> + '_ {
        self.roots.iter().map(|entry| entry.id)
    }

    pub fn root(&self, key: &str) -> Option<CommandId> {
        self.roots
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.id)
    }

    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    pub fn children(&self, id: CommandId) -> &[CommandId] {
        self.nodes
            .get(id.0)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Every command in declaration order, including ones no longer
    /// reachable from a root.
    pub fn iter(&self) -> impl Iterator<Item = (CommandId, &CommandNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (CommandId(index), node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Output of compiling one script: the immutable command tree, the declared
/// variables, and every non-fatal problem found while loading.
#[derive(Debug, Clone, Default)]
pub struct CompiledScript {
    pub tree: CommandTree,
    pub variables: BTreeMap<String, VarValue>,
    pub diagnostics: Vec<DialogError>,
}
