//! Console display rows
//!
//! Flattened views of wire models for table and JSON output. Each
//! derives `Tabled` for the table renderer and `Serialize` for the JSON
//! envelope, with placeholders substituted up front.

pub mod account;
pub mod alert;
pub mod collection;
pub mod tag;

pub use account::AccountDisplay;
pub use alert::AlertDisplay;
pub use collection::CollectionDisplay;
pub use tag::TagDisplay;
