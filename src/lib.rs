pub mod builtins;
pub mod config;
pub mod literal;
pub mod runtime;
