//! Hierarchical command trees.
//!
//! Commands are nodes carrying a signature (name, aliases, type), a handler
//! and their subcommands. Attaching a subcommand validates it against its
//! future siblings so a tree never holds ambiguous labels.
//!
//! # Architecture
//!
//! - `types`: Signatures and command types
//! - `node`: Command nodes and the `Command` behavior trait
//! - `registry`: Checks run when a subcommand is attached
//! - `dispatch`: Routing input tokens to nodes, completion
//! - `render`: Help text generation
//! - `error`: Registration and dispatch errors

mod dispatch;
mod error;
mod node;
mod registry;
mod render;
mod types;

pub use dispatch::{Dispatcher, Resolved, child_labels};
pub use error::{DispatchError, RegistrationError};
pub use node::{Command, CommandNode};
pub use render::{NO_HELP, help_lines, help_lines_for_roots, usage_hint};
pub use types::{CommandSignature, CommandType};
