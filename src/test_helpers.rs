use std::sync::Mutex;

use crate::commands::{Command, CommandNode, CommandSignature};

/// Context that records every execution as `tag:label:args`.
pub type Calls = Mutex<Vec<String>>;

#[derive(Default)]
pub struct Recorder {
    tag: String,
    completions: Option<Vec<String>>,
}

impl Recorder {
    pub fn tagged(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            completions: None,
        }
    }

    pub fn completing(values: &[&str]) -> Self {
        Self {
            tag: String::new(),
            completions: Some(values.iter().map(|v| v.to_string()).collect()),
        }
    }
}

impl Command<Calls> for Recorder {
    fn execute(&self, ctx: &Calls, label: &str, args: &[String]) {
        ctx.lock()
            .unwrap()
            .push(format!("{}:{}:{}", self.tag, label, args.join(" ")));
    }

    fn tab_complete(&self, _ctx: &Calls, _alias: &str, _args: &[String]) -> Option<Vec<String>> {
        self.completions.clone()
    }
}

pub fn root(name: &str, aliases: &[&str]) -> CommandNode<Calls> {
    CommandNode::new(
        CommandSignature::root(name).with_aliases(aliases.iter().copied()),
        Recorder::tagged(name),
    )
}

pub fn sub(name: &str, aliases: &[&str]) -> CommandNode<Calls> {
    CommandNode::new(
        CommandSignature::sub(name).with_aliases(aliases.iter().copied()),
        Recorder::tagged(name),
    )
}

pub fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}
