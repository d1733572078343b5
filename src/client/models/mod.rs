//! Serde models for the vendor API wire formats

pub mod account;
pub mod alert;
pub mod collection;
pub mod defender;
pub mod discovery;
pub mod image;
pub mod tag;

pub use account::CloudAccount;
pub use alert::{Alert, AlertCsvJob, AlertQuery};
pub use collection::{
    CspmCollection, CspmCollectionPage, CspmCollectionSpec, CwpCollection, CwpCollectionSpec,
};
pub use defender::{CloudMetadata, Defender};
pub use discovery::DiscoveryEntity;
pub use image::{Image, ImageInstance, ImageVulnerability, RepoTag};
pub use tag::{ConfigItem, ConfigSearchRequest, ConfigSearchResponse, ResourceTag};
