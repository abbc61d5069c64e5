use crate::domain::model::{ErrorRecord, SearchParams, SearchQuery};
use crate::domain::ports::{ConfigProvider, DomainSearch};
use crate::utils::error::Result;
use std::time::Duration;

/// Tomba 的 Domain Search 上限是每秒 15 次，每個網域之後固定等 1 秒
pub const RATE_LIMIT_DELAY: Duration = Duration::from_millis(1000);

/// What to do when the remote lookup itself fails for a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchErrorPolicy {
    /// Log a warning and leave no entry for the domain.
    #[default]
    Skip,
    /// Append an error record, the same as any other per-domain failure.
    Record,
}

impl SearchErrorPolicy {
    pub fn from_config<P: ConfigProvider>(config: &P) -> Self {
        if config.record_search_errors() {
            Self::Record
        } else {
            Self::Skip
        }
    }
}

/// Sequential, rate-limited domain search over an ordered list of domains.
pub struct BatchProcessor<C: DomainSearch> {
    client: C,
    delay: Duration,
    policy: SearchErrorPolicy,
}

impl<C: DomainSearch> BatchProcessor<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            delay: RATE_LIMIT_DELAY,
            policy: SearchErrorPolicy::default(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_policy(mut self, policy: SearchErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Searches every domain in order and returns the collected results.
    ///
    /// One call is in flight at a time and every domain, including the last
    /// and failed ones, is followed by the fixed delay.
    pub async fn process(&self, domains: &[String], params: &SearchParams) -> Vec<serde_json::Value> {
        let mut results = Vec::new();

        for domain in domains {
            match self.process_domain(domain, params).await {
                Ok(Some(payload)) => results.push(payload),
                Ok(None) => {}
                Err(e) => {
                    tracing::error!("❌ Error processing domain {}: {}", domain, e);
                    let record = ErrorRecord::new(domain.as_str(), &e);
                    match serde_json::to_value(&record) {
                        Ok(value) => results.push(value),
                        Err(e) => tracing::error!("❌ Could not record error for {}: {}", domain, e),
                    }
                }
            }

            tokio::time::sleep(self.delay).await;
        }

        results
    }

    async fn process_domain(
        &self,
        domain: &str,
        params: &SearchParams,
    ) -> Result<Option<serde_json::Value>> {
        tracing::info!("🔍 Searching emails for domain: {}", domain);

        let query = SearchQuery::new(domain, params.clone());
        if !params.is_empty() {
            tracing::info!("📋 Search parameters: {}", serde_json::to_string(&query)?);
        }

        match self.client.domain_search(&query).await {
            Ok(response) => {
                if response.data.is_none() {
                    tracing::debug!("No data returned for {}", domain);
                }
                Ok(response.data)
            }
            Err(e) => match self.policy {
                SearchErrorPolicy::Skip => {
                    tracing::warn!("⚠️ Domain search failed for {}: {}", domain, e);
                    Ok(None)
                }
                SearchErrorPolicy::Record => Err(e),
            },
        }
    }
}
