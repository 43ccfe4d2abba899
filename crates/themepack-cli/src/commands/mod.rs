//! Command implementations.

pub mod build;
pub mod eject;
pub(crate) mod utils;

pub use build::execute as build_execute;
pub use eject::execute as eject_execute;
