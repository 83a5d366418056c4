//! Inventory commands for the interactive shell.
//!
//! `inv give|take|list|clear` built as a command tree over a shared item
//! store. Output goes to the invoking [`Session`] so the shell decides how
//! to print it.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use crate::commands::{Command, CommandNode, CommandSignature, RegistrationError, usage_hint};
use crate::config::ShellConfig;
use crate::shell::Session;

/// Items offered by tab completion.
pub const KNOWN_ITEMS: &[&str] = &["apple", "arrow", "bread", "shield", "sword", "torch"];

#[derive(Debug, Default)]
pub struct Inventory {
    items: BTreeMap<String, u32>,
}

impl Inventory {
    pub fn add(&mut self, item: &str, count: u32) -> u32 {
        let entry = self.items.entry(item.to_string()).or_insert(0);
        *entry = entry.saturating_add(count);
        *entry
    }

    /// Remove `count` of `item`. Returns the amount held when there is not
    /// enough.
    pub fn remove(&mut self, item: &str, count: u32) -> Result<u32, u32> {
        let held = self.count(item);
        if held < count {
            return Err(held);
        }
        let left = held - count;
        if left == 0 {
            self.items.remove(item);
        } else {
            self.items.insert(item.to_string(), left);
        }
        Ok(left)
    }

    pub fn count(&self, item: &str) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    pub fn items(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

pub type SharedInventory = Arc<Mutex<Inventory>>;

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Parse `<item> [count]`.
fn item_and_count(args: &[String]) -> Result<(&str, u32), String> {
    let Some(item) = args.first() else {
        return Err("Missing item".to_string());
    };
    let count = match args.get(1) {
        None => 1,
        Some(raw) => match raw.parse::<u32>() {
            Ok(0) | Err(_) => return Err(format!("Invalid count: {raw}")),
            Ok(n) => n,
        },
    };
    Ok((item, count))
}

fn complete_items(args: &[String]) -> Option<Vec<String>> {
    match args {
        [partial] => Some(
            KNOWN_ITEMS
                .iter()
                .filter(|item| item.starts_with(partial.as_str()))
                .map(|item| item.to_string())
                .collect(),
        ),
        _ => Some(Vec::new()),
    }
}

/// Usage is filled in once the subcommands are attached.
struct InvCommand {
    usage: Arc<OnceLock<String>>,
}

impl Command<Session> for InvCommand {
    fn execute(&self, ctx: &Session, label: &str, args: &[String]) {
        if let Some(unknown) = args.first() {
            ctx.say(format!("Unknown subcommand: {label} {unknown}"));
        }
        let usage = self.usage.get().map(String::as_str).unwrap_or(label);
        ctx.say(format!("Usage: {usage}"));
    }
}

struct GiveCommand {
    store: SharedInventory,
}

impl Command<Session> for GiveCommand {
    fn execute(&self, ctx: &Session, label: &str, args: &[String]) {
        match item_and_count(args) {
            Ok((item, count)) => {
                let total = lock(&self.store).add(item, count);
                ctx.say(format!("Gave {count} {item} to {} ({total} total)", ctx.user));
            }
            Err(e) => ctx.say(format!("{e}. Usage: {label} <item> [count]")),
        }
    }

    fn tab_complete(&self, _ctx: &Session, _alias: &str, args: &[String]) -> Option<Vec<String>> {
        complete_items(args)
    }
}

struct TakeCommand {
    store: SharedInventory,
}

impl Command<Session> for TakeCommand {
    fn execute(&self, ctx: &Session, label: &str, args: &[String]) {
        let (item, count) = match item_and_count(args) {
            Ok(parsed) => parsed,
            Err(e) => {
                ctx.say(format!("{e}. Usage: {label} <item> [count]"));
                return;
            }
        };
        match lock(&self.store).remove(item, count) {
            Ok(left) => ctx.say(format!("Took {count} {item} from {} ({left} left)", ctx.user)),
            Err(held) => ctx.say(format!("{} only has {held} {item}", ctx.user)),
        }
    }

    fn tab_complete(&self, _ctx: &Session, _alias: &str, args: &[String]) -> Option<Vec<String>> {
        if args.len() != 1 {
            return Some(Vec::new());
        }
        let store = lock(&self.store);
        Some(
            store
                .items()
                .map(|(name, _)| name)
                .filter(|name| name.starts_with(args[0].as_str()))
                .map(str::to_string)
                .collect(),
        )
    }
}

struct ListCommand {
    store: SharedInventory,
}

impl Command<Session> for ListCommand {
    fn execute(&self, ctx: &Session, _label: &str, _args: &[String]) {
        let store = lock(&self.store);
        if store.is_empty() {
            ctx.say(format!("{} has nothing", ctx.user));
            return;
        }
        for (item, count) in store.items() {
            ctx.say(format!("{count:>4} {item}"));
        }
    }

    fn tab_complete(&self, _ctx: &Session, _alias: &str, _args: &[String]) -> Option<Vec<String>> {
        Some(Vec::new())
    }
}

struct ClearCommand {
    store: SharedInventory,
}

impl Command<Session> for ClearCommand {
    fn execute(&self, ctx: &Session, _label: &str, _args: &[String]) {
        lock(&self.store).clear();
        ctx.say("Inventory cleared");
    }
}

/// Build the `inv` root command over `store`, with aliases from `config`.
pub fn build_inventory(
    config: &ShellConfig,
    store: &SharedInventory,
) -> Result<CommandNode<Session>, RegistrationError> {
    let sub = |name: &str, aliases: &[&str]| {
        CommandSignature::sub(name)
            .with_aliases(aliases.iter().copied())
            .with_extra_aliases(config.aliases_for(&format!("inv {name}")).iter().cloned())
    };

    let children = vec![
        CommandNode::new(
            sub("give", &["g"]),
            GiveCommand {
                store: store.clone(),
            },
        )
        .with_help("Add items: give <item> [count]"),
        CommandNode::new(
            sub("take", &["t"]),
            TakeCommand {
                store: store.clone(),
            },
        )
        .with_help("Remove items: take <item> [count]"),
        CommandNode::new(
            sub("list", &["ls"]),
            ListCommand {
                store: store.clone(),
            },
        )
        .with_help("Show held items"),
        CommandNode::new(
            sub("clear", &[]),
            ClearCommand {
                store: store.clone(),
            },
        ),
    ];

    let usage = Arc::new(OnceLock::new());
    let signature = CommandSignature::root("inv")
        .with_aliases(["i"])
        .with_extra_aliases(config.aliases_for("inv").iter().cloned());
    let mut inv = CommandNode::new(
        signature,
        InvCommand {
            usage: usage.clone(),
        },
    )
    .with_help("Manage items");
    for child in children {
        inv.attach(child)?;
    }
    usage.get_or_init(|| usage_hint(&inv));
    Ok(inv)
}
