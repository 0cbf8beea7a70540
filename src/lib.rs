//! Blockdrop (workspace facade crate).
//!
//! Re-exports the workspace crates as `blockdrop::{core,input,term,types}` and
//! hosts the terminal runner's argument parsing.

pub mod args;

pub use blockdrop_core as core;
pub use blockdrop_input as input;
pub use blockdrop_term as term;
pub use blockdrop_types as types;
