//! Listener lifecycle.

pub mod listener;

pub use listener::{bind, run, serve};
