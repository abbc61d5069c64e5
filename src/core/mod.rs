pub mod batch;
pub mod runner;

pub use crate::domain::model::{ActorInput, SearchQuery, SearchResponse, Summary};
pub use crate::domain::ports::{ConfigProvider, DomainSearch, OutputSink, Storage};
pub use crate::utils::error::Result;
