pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

#[cfg(feature = "lambda")]
pub use config::lambda::{LambdaConfig, S3Storage};

pub use crate::adapters::{StorageSink, TombaClient};
pub use crate::core::{
    batch::{BatchProcessor, SearchErrorPolicy},
    runner::ActorRunner,
};
pub use crate::domain::model::{ActorInput, Summary};
pub use crate::utils::error::{ActorError, Result};
