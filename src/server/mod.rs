//! Connection acceptance.

pub mod listener;

pub use listener::{Listener, run};
