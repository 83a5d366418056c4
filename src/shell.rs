//! The interactive shell's command set.
//!
//! Registers `inv`, `help` and `quit` as root commands on one dispatcher so
//! every line the shell reads goes through the tree.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use crate::commands::{
    Command, CommandNode, CommandSignature, DispatchError, Dispatcher, RegistrationError,
    help_lines_for_roots,
};
use crate::config::ShellConfig;
use crate::inventory::{SharedInventory, build_inventory, lock};

/// Invocation context: who ran the command and what it printed.
pub struct Session {
    pub user: String,
    output: Mutex<Vec<String>>,
    quit: AtomicBool,
}

impl Session {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            output: Mutex::new(Vec::new()),
            quit: AtomicBool::new(false),
        }
    }

    pub fn say(&self, message: impl Into<String>) {
        lock(&self.output).push(message.into());
    }

    /// Drain everything printed since the last call.
    pub fn take_output(&self) -> Vec<String> {
        std::mem::take(&mut *lock(&self.output))
    }

    pub fn request_quit(&self) {
        self.quit.store(true, Ordering::Relaxed);
    }

    pub fn should_quit(&self) -> bool {
        self.quit.load(Ordering::Relaxed)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Prints help for every root, computed once registration is done.
struct HelpCommand {
    lines: Arc<OnceLock<Vec<String>>>,
}

impl Command<Session> for HelpCommand {
    fn execute(&self, ctx: &Session, _label: &str, _args: &[String]) {
        ctx.say("Commands:");
        for line in self.lines.get().into_iter().flatten() {
            ctx.say(format!("  {line}"));
        }
    }

    fn tab_complete(&self, _ctx: &Session, _alias: &str, _args: &[String]) -> Option<Vec<String>> {
        Some(Vec::new())
    }
}

struct QuitCommand;

impl Command<Session> for QuitCommand {
    fn execute(&self, ctx: &Session, _label: &str, _args: &[String]) {
        ctx.request_quit();
    }

    fn tab_complete(&self, _ctx: &Session, _alias: &str, _args: &[String]) -> Option<Vec<String>> {
        Some(Vec::new())
    }
}

fn root_signature(config: &ShellConfig, name: &str, aliases: &[&str]) -> CommandSignature {
    CommandSignature::root(name)
        .with_aliases(aliases.iter().copied())
        .with_extra_aliases(config.aliases_for(name).iter().cloned())
}

/// Build the dispatcher with all shell commands registered.
pub fn build_shell(
    config: &ShellConfig,
    store: &SharedInventory,
) -> Result<Dispatcher<Session>, ShellError> {
    let help_lines = Arc::new(OnceLock::new());

    let mut dispatcher = Dispatcher::new();
    dispatcher
        .register(build_inventory(config, store)?)?
        .register(
            CommandNode::new(
                root_signature(config, "help", &["?"]),
                HelpCommand {
                    lines: help_lines.clone(),
                },
            )
            .with_help("Show this help"),
        )?
        .register(
            CommandNode::new(root_signature(config, "quit", &["exit", "q"]), QuitCommand)
                .with_help("Exit"),
        )?;

    help_lines.get_or_init(|| help_lines_for_roots(&dispatcher));
    Ok(dispatcher)
}
