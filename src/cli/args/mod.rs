//! Shared argument types

pub mod common;
pub mod filters;
pub mod global;

pub use common::{OutputFormat, Surface};
pub use filters::AlertFilterArgs;
pub use global::GlobalOptions;
