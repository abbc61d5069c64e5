use crate::domain::model::{SearchQuery, SearchResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Hosting platform outputs: an append-only dataset and a key-value store.
pub trait OutputSink: Send + Sync {
    fn push_data(
        &self,
        records: &[serde_json::Value],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn set_value(
        &self,
        key: &str,
        value: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn request_timeout_secs(&self) -> u64;
    fn record_search_errors(&self) -> bool;
}

/// Remote email discovery lookup for a single domain.
#[async_trait]
pub trait DomainSearch: Send + Sync {
    async fn domain_search(&self, query: &SearchQuery) -> Result<SearchResponse>;
}
