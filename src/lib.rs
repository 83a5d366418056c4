pub mod commands;
pub mod config;
pub mod inventory;
pub mod shell;

#[cfg(test)]
pub mod test_helpers;
