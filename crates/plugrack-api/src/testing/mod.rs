//! Testing utilities for plugin and host developers

pub mod mocks;

pub use mocks::{FailingPlugin, MismatchedPlugin, MockPlugin};
