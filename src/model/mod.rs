//! Data model for notebook configuration extraction.
//!
//! A [`Notebook`] is the read-only cell sequence loaded from disk. A
//! [`ConfigTree`] is the two-level section → key → [`Value`] mapping built
//! from it, and the input to every serializer.

mod config;
mod notebook;
mod value;

pub use config::{ConfigTree, Section};
pub use notebook::{Cell, CellKind, Notebook};
pub use value::Value;
