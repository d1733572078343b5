//! Prisma Cloud API client

pub mod api;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod prisma;

pub use api::{AuthApi, CollectionApi, ExportApi, ListingApi};
#[cfg(test)]
#[allow(unused_imports)]
pub use mock::MockPrismaClient;
pub use pagination::{PageOutcome, PageQuery};
pub use prisma::{ApiBase, PrismaClient};
