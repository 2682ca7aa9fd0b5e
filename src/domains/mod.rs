//! Domains module containing business logic organized by bounded contexts.
//!
//! The prompts domain holds the prompt registry and everything it renders;
//! the server in `core` is a thin protocol adapter around it.

pub mod prompts;
