//! Help text generation for command trees.

use super::dispatch::Dispatcher;
use super::node::CommandNode;

/// Shown when a command has no help text.
pub const NO_HELP: &str = "no help available";

struct HelpRow {
    depth: usize,
    label: String,
    help: String,
}

/// Help lines for `node` and its whole subtree, children sorted by name.
pub fn help_lines<C>(node: &CommandNode<C>) -> Vec<String> {
    let mut rows = Vec::new();
    collect_rows(node, 0, &mut rows);
    format_rows(rows)
}

/// Help lines for every root registered with `dispatcher`.
pub fn help_lines_for_roots<C>(dispatcher: &Dispatcher<C>) -> Vec<String> {
    let mut roots = dispatcher.roots();
    roots.sort_by(|a, b| a.name().cmp(b.name()));

    let mut rows = Vec::new();
    for root in &roots {
        collect_rows(root.as_ref(), 0, &mut rows);
    }
    format_rows(rows)
}

/// One-line usage listing a node's subcommands, e.g. `inv <give|take>`.
pub fn usage_hint<C>(node: &CommandNode<C>) -> String {
    if !node.has_children() {
        return node.name().to_string();
    }
    let mut names: Vec<String> = node
        .children()
        .iter()
        .map(|child| child.name().to_string())
        .collect();
    names.sort();
    format!("{} <{}>", node.name(), names.join("|"))
}

fn collect_rows<C>(node: &CommandNode<C>, depth: usize, rows: &mut Vec<HelpRow>) {
    let aliases = node
        .signature()
        .map(|sig| {
            sig.aliases
                .iter()
                .filter(|alias| **alias != sig.name)
                .cloned()
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    let label = if aliases.is_empty() {
        node.name().to_string()
    } else {
        format!("{} ({})", node.name(), aliases.join(", "))
    };

    rows.push(HelpRow {
        depth,
        label,
        help: node.help().unwrap_or(NO_HELP).to_string(),
    });

    let mut children = node.children();
    children.sort_by(|a, b| a.name().cmp(b.name()));
    for child in &children {
        collect_rows(child.as_ref(), depth + 1, rows);
    }
}

fn format_rows(rows: Vec<HelpRow>) -> Vec<String> {
    let longest = rows
        .iter()
        .map(|row| row.depth * 2 + row.label.len())
        .max()
        .unwrap_or(0);

    rows.into_iter()
        .map(|row| {
            let label = format!("{}{}", "  ".repeat(row.depth), row.label);
            format!("{:<width$}  {}", label, row.help, width = longest)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{root, sub};

    #[test]
    fn help_lines_cover_subtree_in_name_order() {
        let mut inv = root("inv", &[]).with_help("Manage items");
        inv.attach(sub("take", &["t"]).with_help("Take an item"))
            .unwrap()
            .attach(sub("give", &["g", "hand"]).with_help("Give an item"))
            .unwrap();

        let lines = help_lines(&inv);
        assert_eq!(
            lines,
            vec![
                "inv               Manage items",
                "  give (g, hand)  Give an item",
                "  take (t)        Take an item",
            ]
        );
    }

    #[test]
    fn missing_help_uses_placeholder() {
        let lines = help_lines(&sub("list", &["list", "ls"]));
        assert_eq!(lines, vec![format!("list (ls)  {NO_HELP}")]);
    }

    #[test]
    fn help_lines_for_roots_sorted() {
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register(root("quit", &["q"]))
            .unwrap()
            .register(root("inv", &[]))
            .unwrap();

        let lines = help_lines_for_roots(&dispatcher);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("inv "));
        assert!(lines[1].starts_with("quit (q)"));
    }

    #[test]
    fn usage_hint_lists_children() {
        let mut inv = root("inv", &[]);
        inv.attach(sub("take", &[])).unwrap();
        inv.attach(sub("give", &[])).unwrap();
        assert_eq!(usage_hint(&inv), "inv <give|take>");
        assert_eq!(usage_hint(&sub("list", &[])), "list");
    }
}
