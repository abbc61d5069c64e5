use crate::domain::ports::{OutputSink, Storage};
use crate::utils::error::{ActorError, Result};

pub const DATASET_FILE: &str = "dataset.json";
pub const KEY_VALUE_DIR: &str = "key_value_store";

/// Dataset and key-value store laid out as JSON files on any [`Storage`].
#[derive(Debug, Clone)]
pub struct StorageSink<S: Storage> {
    storage: S,
}

impl<S: Storage> StorageSink<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn value_path(key: &str) -> String {
        format!("{}/{}.json", KEY_VALUE_DIR, key)
    }

    async fn existing_records(&self) -> Result<Vec<serde_json::Value>> {
        let bytes = match self.storage.read_file(DATASET_FILE).await {
            Ok(bytes) => bytes,
            Err(e) if e.is_not_found() => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        // 讀不懂就停下來，不要蓋掉舊資料
        serde_json::from_slice(&bytes).map_err(|e| ActorError::ProcessingError {
            message: format!("Existing {} is not a JSON array: {}", DATASET_FILE, e),
        })
    }
}

impl<S: Storage> OutputSink for StorageSink<S> {
    async fn push_data(&self, records: &[serde_json::Value]) -> Result<()> {
        // dataset 只能追加
        let mut dataset = self.existing_records().await?;
        dataset.extend_from_slice(records);

        let json_data = serde_json::to_vec_pretty(&dataset)?;
        tracing::debug!(
            "Writing {} records ({} bytes) to {}",
            dataset.len(),
            json_data.len(),
            DATASET_FILE
        );
        self.storage.write_file(DATASET_FILE, &json_data).await
    }

    async fn set_value(&self, key: &str, value: &serde_json::Value) -> Result<()> {
        let path = Self::value_path(key);
        let json_data = serde_json::to_vec_pretty(value)?;
        tracing::debug!("Writing key-value record {} to {}", key, path);
        self.storage.write_file(&path, &json_data).await
    }
}
