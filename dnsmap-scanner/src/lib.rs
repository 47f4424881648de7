pub mod discovery;
pub mod engine;
pub mod error;
pub mod resolver;
pub mod strategies;
pub mod strategy;
pub mod target;

#[cfg(test)]
pub(crate) mod test_util;

pub use discovery::{
    AdjacencyEntry, Discovery, DiscoveryKind, Relationship, ResultGraph, ScanContext, ScanStats,
};
pub use engine::{DiscoveryEngine, ProgressCallback};
pub use error::ScanError;
pub use resolver::{RecordType, Resolver, SystemResolver};
pub use strategy::{ExcludeList, Strategy};
