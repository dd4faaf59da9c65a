pub mod attributes;
pub mod confidence;
pub mod config;
pub mod engine;
pub mod export;
pub mod http_client;
pub mod normalize;
pub mod rating;
pub mod reliability;
pub mod sheet;

pub use config::EngineConfig;
pub use engine::{DerivedPlayerProfile, RawPlayerRecord, derive_profiles};
