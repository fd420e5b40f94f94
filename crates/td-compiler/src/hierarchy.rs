use log::warn;
use td_core::{CommandId, CommandNode, CommandTree, DialogError};

/// Assembles declaration-ordered commands into the command forest.
///
/// `ancestors` holds the chain of most recent commands with strictly
/// increasing levels; its top is always the nearest preceding command whose
/// level is below the next one after popping entries at or above it.
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    tree: CommandTree,
    ancestors: Vec<(usize, CommandId)>,
    diagnostics: Vec<DialogError>,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: CommandNode) -> Result<Option<CommandId>, DialogError> {
        let level = node.level;
        let line = node.line;
        let key = node.trigger.source_text();

        while matches!(self.ancestors.last(), Some((top_level, _)) if *top_level >= level) {
            self.ancestors.pop();
        }

        if level == 0 {
            let id = self.tree.push(node);
            if let Some(previous) = self.tree.insert_root(key.clone(), id) {
                let previous_line = self.tree.get(previous).map(|node| node.line).unwrap_or(0);
                let diagnostic = DialogError::at_line(
                    "ROOT_TRIGGER_DUPLICATE",
                    format!(
                        "Root trigger \"{}\" redefined; replaces the one from line {}.",
                        key, previous_line
                    ),
                    line,
                );
                warn!("{}", diagnostic);
                self.diagnostics.push(diagnostic);
            }
            self.ancestors.push((level, id));
            return Ok(Some(id));
        }

        let Some(&(_, parent)) = self.ancestors.last() else {
            let diagnostic = DialogError::at_line(
                "COMMAND_PARENT_MISSING",
                format!(
                    "Level {} command \"{}\" has no preceding lower-level command.",
                    level, key
                ),
                line,
            );
            warn!("{}", diagnostic);
            self.diagnostics.push(diagnostic);
            return Ok(None);
        };

        let id = self.tree.push(node);
        self.tree.attach_child(parent, id)?;
        self.ancestors.push((level, id));
        Ok(Some(id))
    }

    pub fn finish(self) -> (CommandTree, Vec<DialogError>) {
        (self.tree, self.diagnostics)
    }
}

#[cfg(test)]
mod hierarchy_tests {
    use super::*;
    use td_core::Trigger;

    fn node(level: usize, text: &str, line: usize) -> CommandNode {
        CommandNode::new(level, Trigger::Literal(text.to_string()), text, line)
    }

    fn build(nodes: Vec<CommandNode>) -> (CommandTree, Vec<DialogError>, Vec<Option<CommandId>>) {
        let mut builder = HierarchyBuilder::new();
        let ids = nodes
            .into_iter()
            .map(|node| builder.add(node).expect("add should pass"))
            .collect();
        let (tree, diagnostics) = builder.finish();
        (tree, diagnostics, ids)
    }

    #[test]
    fn children_attach_to_nearest_lower_level_in_source_order() {
        let (tree, diagnostics, ids) = build(vec![
            node(0, "a", 1),
            node(1, "a1", 2),
            node(2, "a1x", 3),
            node(1, "a2", 4),
            node(0, "b", 5),
            node(1, "b1", 6),
        ]);
        let ids = ids.into_iter().flatten().collect::<Vec<_>>();
        assert!(diagnostics.is_empty());
        assert_eq!(tree.roots().collect::<Vec<_>>(), vec![ids[0], ids[4]]);
        assert_eq!(tree.children(ids[0]), &[ids[1], ids[3]]);
        assert_eq!(tree.children(ids[1]), &[ids[2]]);
        assert_eq!(tree.children(ids[4]), &[ids[5]]);
        assert_eq!(tree.get(ids[3]).and_then(|node| node.parent), Some(ids[0]));
        assert_eq!(tree.get(ids[0]).and_then(|node| node.parent), None);
    }

    #[test]
    fn level_gaps_skip_absent_intermediate_levels() {
        let (tree, diagnostics, ids) = build(vec![
            node(0, "root", 1),
            node(3, "deep", 2),
            node(5, "deeper", 3),
            node(4, "between", 4),
            node(2, "mid", 5),
        ]);
        let ids = ids.into_iter().flatten().collect::<Vec<_>>();
        assert!(diagnostics.is_empty());
        assert_eq!(tree.children(ids[0]), &[ids[1], ids[4]]);
        assert_eq!(tree.children(ids[1]), &[ids[2], ids[3]]);
    }

    #[test]
    fn duplicate_root_warns_and_overwrites_in_place() {
        let (tree, diagnostics, ids) = build(vec![
            node(0, "hello", 1),
            node(0, "bye", 2),
            node(0, "hello", 3),
            node(1, "again", 4),
        ]);
        let ids = ids.into_iter().flatten().collect::<Vec<_>>();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "ROOT_TRIGGER_DUPLICATE");
        assert_eq!(diagnostics[0].line, Some(3));
        assert_eq!(tree.roots().collect::<Vec<_>>(), vec![ids[2], ids[1]]);
        assert_eq!(tree.children(ids[2]), &[ids[3]]);
        assert!(tree.children(ids[0]).is_empty());
    }

    #[test]
    fn command_without_possible_parent_is_reported_and_skipped() {
        let (tree, diagnostics, ids) = build(vec![node(2, "orphan", 1), node(0, "root", 2)]);
        assert_eq!(ids[0], None);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "COMMAND_PARENT_MISSING");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root_count(), 1);
    }
}
