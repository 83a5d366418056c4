//! Command nodes and the behavior they carry.

use std::fmt;
use std::sync::Arc;

use super::error::RegistrationError;
use super::registry;
use super::types::CommandSignature;

/// Behavior of a single command.
///
/// `C` is the host's invocation context, opaque to the tree.
pub trait Command<C>: Send + Sync {
    /// Run the command. `label` is the token that invoked it and `args`
    /// are the tokens left after it.
    fn execute(&self, ctx: &C, label: &str, args: &[String]);

    /// Completion candidates for the last argument. `None` defers to the
    /// default completion (the command's subcommand labels).
    fn tab_complete(&self, _ctx: &C, _alias: &str, _args: &[String]) -> Option<Vec<String>> {
        None
    }
}

impl<C, F> Command<C> for F
where
    F: Fn(&C, &str, &[String]) + Send + Sync,
{
    fn execute(&self, ctx: &C, label: &str, args: &[String]) {
        self(ctx, label, args)
    }
}

/// One command in a tree, with its subcommands.
pub struct CommandNode<C> {
    signature: Option<CommandSignature>,
    help: Option<String>,
    handler: Box<dyn Command<C>>,
    children: Vec<Arc<CommandNode<C>>>,
}

impl<C> CommandNode<C> {
    /// Create a node with no children.
    pub fn new(signature: CommandSignature, handler: impl Command<C> + 'static) -> Self {
        Self {
            signature: Some(signature),
            help: None,
            handler: Box::new(handler),
            children: Vec::new(),
        }
    }

    /// Create a node that has no identity. It can never be attached.
    pub fn unsigned(handler: impl Command<C> + 'static) -> Self {
        Self {
            signature: None,
            help: None,
            handler: Box::new(handler),
            children: Vec::new(),
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn signature(&self) -> Option<&CommandSignature> {
        self.signature.as_ref()
    }

    /// Name from the signature, or `"<unsigned>"`.
    pub fn name(&self) -> &str {
        self.signature
            .as_ref()
            .map(|sig| sig.name.as_str())
            .unwrap_or("<unsigned>")
    }

    /// Help text, `None` when no help is available.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Attach a subcommand, returning `self` for chaining.
    ///
    /// The candidate is checked against the current children first; on error
    /// nothing is added.
    pub fn attach(&mut self, child: CommandNode<C>) -> Result<&mut Self, RegistrationError> {
        if let Err(err) = registry::validate_attach(&self.children, &child) {
            tracing::warn!(parent = %self.name(), error = %err, "rejected subcommand");
            return Err(err);
        }
        tracing::debug!(parent = %self.name(), child = %child.name(), "attached subcommand");
        self.children.push(Arc::new(child));
        Ok(self)
    }

    /// Snapshot of the current children. Later attaches do not affect it.
    pub fn children(&self) -> Vec<Arc<CommandNode<C>>> {
        self.children.clone()
    }

    /// Direct child invoked by `token` (name or alias).
    pub fn find_child(&self, token: &str) -> Option<&Arc<CommandNode<C>>> {
        self.children.iter().find(|child| child.matches(token))
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// True if `token` invokes this node.
    pub fn matches(&self, token: &str) -> bool {
        self.signature
            .as_ref()
            .is_some_and(|sig| sig.matches(token))
    }

    pub fn execute(&self, ctx: &C, label: &str, args: &[String]) {
        self.handler.execute(ctx, label, args)
    }

    pub fn tab_complete(&self, ctx: &C, alias: &str, args: &[String]) -> Option<Vec<String>> {
        self.handler.tab_complete(ctx, alias, args)
    }

    pub(crate) fn children_slice(&self) -> &[Arc<CommandNode<C>>] {
        &self.children
    }
}

impl<C> fmt::Debug for CommandNode<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("signature", &self.signature)
            .field("help", &self.help)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{Calls, Recorder, sub};

    #[test]
    fn new_node_has_no_children_or_help() {
        let node = sub("give", &[]);
        assert!(!node.has_children());
        assert_eq!(node.help(), None);
    }

    #[test]
    fn with_help_sets_text() {
        let node = sub("give", &[]).with_help("Give an item");
        assert_eq!(node.help(), Some("Give an item"));
    }

    #[test]
    fn attach_chains() {
        let mut parent = sub("inv", &[]);
        parent
            .attach(sub("give", &["g"]))
            .unwrap()
            .attach(sub("take", &["t"]))
            .unwrap();
        assert_eq!(parent.children().len(), 2);
    }

    #[test]
    fn children_returns_snapshot() {
        let mut parent = sub("inv", &[]);
        parent.attach(sub("give", &[])).unwrap();

        let snapshot = parent.children();
        parent.attach(sub("take", &[])).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name(), "give");
        assert_eq!(parent.children().len(), 2);
    }

    #[test]
    fn find_child_by_name_or_alias() {
        let mut parent = sub("inv", &[]);
        parent.attach(sub("give", &["g"])).unwrap();

        assert_eq!(parent.find_child("give").map(|c| c.name()), Some("give"));
        assert_eq!(parent.find_child("g").map(|c| c.name()), Some("give"));
        assert!(parent.find_child("gi").is_none());
    }

    #[test]
    fn unsigned_node_matches_nothing() {
        let node: CommandNode<Calls> = CommandNode::unsigned(Recorder::default());
        assert!(node.signature().is_none());
        assert_eq!(node.name(), "<unsigned>");
        assert!(!node.matches("<unsigned>"));
    }

    #[test]
    fn closures_are_commands() {
        let node: CommandNode<Calls> = CommandNode::new(
            CommandSignature::sub("echo"),
            |ctx: &Calls, _label: &str, args: &[String]| {
                ctx.lock().unwrap().push(args.join(" "));
            },
        );
        let out = Calls::default();
        node.execute(&out, "echo", &["hi".to_string(), "there".to_string()]);
        assert_eq!(out.lock().unwrap().as_slice(), ["hi there"]);
        assert_eq!(node.tab_complete(&out, "echo", &[]), None);
    }
}
