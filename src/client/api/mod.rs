//! API trait definitions
//!
//! The concrete [`crate::client::PrismaClient`] implements all of these;
//! the mock client implements them for unit tests. Splitting by concern
//! keeps callers depending only on the surface they use.

pub mod auth;
pub mod collections;
pub mod export;
pub mod listing;

pub use auth::AuthApi;
pub use collections::CollectionApi;
pub use export::ExportApi;
pub use listing::ListingApi;
