//! Routing input tokens through a command tree.
//!
//! The dispatcher owns the root commands. A label selects a root, then each
//! following token descends into the child it names until a token matches
//! no child. The node reached runs with the tokens that are left.

use std::sync::Arc;

use super::error::DispatchError;
use super::node::CommandNode;
use super::types::CommandType;

/// A node reached by walking the tree.
pub struct Resolved<'a, C> {
    pub node: &'a CommandNode<C>,
    /// Token that invoked `node`.
    pub label: &'a str,
    /// Tokens after the last matched one.
    pub args: &'a [String],
    /// Canonical names from the root down to `node`.
    pub path: Vec<&'a str>,
}

/// Set of root commands reachable by label.
pub struct Dispatcher<C> {
    roots: Vec<Arc<CommandNode<C>>>,
}

impl<C> Dispatcher<C> {
    pub fn new() -> Self {
        Self { roots: Vec::new() }
    }

    /// Register a root command. Its name and aliases must not collide with
    /// any label of an already registered root.
    pub fn register(&mut self, root: CommandNode<C>) -> Result<&mut Self, DispatchError> {
        let sig = root
            .signature()
            .filter(|sig| !sig.name.is_empty())
            .ok_or(DispatchError::MissingSignature)?;
        if sig.aliases.contains("") {
            return Err(DispatchError::EmptyAlias {
                name: sig.name.clone(),
            });
        }

        if sig.kind != CommandType::Root {
            return Err(DispatchError::NotRoot {
                name: sig.name.clone(),
            });
        }

        for existing in &self.roots {
            if let Some(label) = sig.labels().find(|label| existing.matches(label)) {
                return Err(DispatchError::LabelConflict {
                    name: sig.name.clone(),
                    label: label.to_string(),
                    existing: existing.name().to_string(),
                });
            }
        }

        tracing::debug!(root = %sig.name, "registered root command");
        self.roots.push(Arc::new(root));
        Ok(self)
    }

    /// Snapshot of the registered roots.
    pub fn roots(&self) -> Vec<Arc<CommandNode<C>>> {
        self.roots.clone()
    }

    pub fn find_root(&self, label: &str) -> Option<&Arc<CommandNode<C>>> {
        self.roots.iter().find(|root| root.matches(label))
    }

    /// Walk from the root named by `label` as deep as `args` allow.
    pub fn resolve<'a>(
        &'a self,
        label: &'a str,
        args: &'a [String],
    ) -> Result<Resolved<'a, C>, DispatchError> {
        let root = self
            .find_root(label)
            .ok_or_else(|| DispatchError::UnknownCommand(label.to_string()))?;

        let mut node: &CommandNode<C> = root.as_ref();
        let mut label = label;
        let mut rest = args;
        let mut path = vec![node.name()];

        while let Some((token, tail)) = rest.split_first() {
            let Some(child) = node.find_child(token) else {
                break;
            };
            node = child.as_ref();
            label = token.as_str();
            rest = tail;
            path.push(node.name());
        }

        Ok(Resolved {
            node,
            label,
            args: rest,
            path,
        })
    }

    /// Run the command named by `input`, where the first token is the root
    /// label and the rest are its arguments.
    pub fn dispatch(&self, ctx: &C, input: &[String]) -> Result<(), DispatchError> {
        let (label, args) = input.split_first().ok_or(DispatchError::EmptyInput)?;
        let resolved = self.resolve(label, args)?;
        tracing::debug!(
            path = %resolved.path.join(" "),
            args = resolved.args.len(),
            "dispatching command"
        );
        resolved.node.execute(ctx, resolved.label, resolved.args);
        Ok(())
    }

    /// Completion candidates for the last token of `input`.
    ///
    /// The node reached by the tokens before the last one is asked first.
    /// When it defers, its subcommand labels starting with the partial token
    /// are offered.
    pub fn complete(&self, ctx: &C, input: &[String]) -> Vec<String> {
        let Some((label, args)) = input.split_first() else {
            return self.root_labels("");
        };
        let Some((_partial, walked)) = args.split_last() else {
            return self.root_labels(label);
        };

        let Ok(resolved) = self.resolve(label, walked) else {
            return Vec::new();
        };
        let consumed = walked.len() - resolved.args.len();
        let remaining = &args[consumed..];

        if let Some(candidates) = resolved.node.tab_complete(ctx, resolved.label, remaining) {
            return candidates;
        }
        // Only offer subcommands when the partial token directly follows
        // the resolved node.
        match remaining {
            [partial] => child_labels(resolved.node, partial),
            _ => Vec::new(),
        }
    }

    fn root_labels(&self, prefix: &str) -> Vec<String> {
        sorted_labels(
            self.roots
                .iter()
                .filter_map(|root| root.signature())
                .flat_map(|sig| sig.labels()),
            prefix,
        )
    }
}

impl<C> Default for Dispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Names and aliases of `node`'s children starting with `prefix`.
pub fn child_labels<C>(node: &CommandNode<C>, prefix: &str) -> Vec<String> {
    sorted_labels(
        node.children_slice()
            .iter()
            .filter_map(|child| child.signature())
            .flat_map(|sig| sig.labels()),
        prefix,
    )
}

fn sorted_labels<'a>(labels: impl Iterator<Item = &'a str>, prefix: &str) -> Vec<String> {
    let mut candidates: Vec<String> = labels
        .filter(|label| label.starts_with(prefix))
        .map(str::to_string)
        .collect();
    candidates.sort();
    candidates.dedup();
    candidates
}
