use crate::adapters::tomba::DEFAULT_API_BASE_URL;
use crate::core::{ConfigProvider, Storage};
use crate::utils::error::{ActorError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::Client as S3Client;
use std::env;

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub api_base_url: String,
    pub s3_bucket: String,
    pub s3_prefix: String,
    pub s3_region: String,
    pub timeout_secs: u64,
    pub record_search_errors: bool,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_base_url: env::var("TOMBA_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            s3_bucket: env::var("S3_BUCKET").map_err(|_| ActorError::MissingConfigError {
                field: "S3_BUCKET".to_string(),
            })?,
            s3_prefix: env::var("S3_PREFIX").unwrap_or_else(|_| "tomba-etl".to_string()),
            s3_region: env::var("S3_REGION").unwrap_or_else(|_| "ap-southeast-2".to_string()),
            timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            record_search_errors: env::var("RECORD_SEARCH_ERRORS")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }
}

impl ConfigProvider for LambdaConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn output_path(&self) -> &str {
        &self.s3_prefix
    }

    fn request_timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    fn record_search_errors(&self) -> bool {
        self.record_search_errors
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base_url", &self.api_base_url)?;
        validate_s3_bucket_name("s3_bucket", &self.s3_bucket)?;
        validate_non_empty_string("s3_prefix", &self.s3_prefix)?;
        validate_non_empty_string("s3_region", &self.s3_region)?;
        validate_range("timeout_secs", self.timeout_secs, 1, 300)?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    let invalid = |reason: &str| ActorError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: bucket_name.to_string(),
        reason: reason.to_string(),
    };

    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(invalid("S3 bucket name must be between 3 and 63 characters"));
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(invalid(
            "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots",
        ));
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(invalid("S3 bucket name cannot start or end with a hyphen"));
    }

    Ok(())
}

/// Objects under `prefix/` in one bucket.
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
    prefix: String,
}

impl S3Storage {
    pub fn new(client: S3Client, bucket: String, prefix: String) -> Self {
        Self {
            client,
            bucket,
            prefix: prefix.trim_matches('/').to_string(),
        }
    }

    fn key(&self, path: &str) -> String {
        if self.prefix.is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", self.prefix, path)
        }
    }
}

impl Storage for S3Storage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let key = self.key(path);
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .map_err(|err| match err.into_service_error() {
                GetObjectError::NoSuchKey(_) => {
                    ActorError::not_found(format!("s3://{}/{}", self.bucket, key))
                }
                err => ActorError::storage(format!(
                    "Failed to read s3://{}/{}: {}",
                    self.bucket, key, err
                )),
            })?;

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| ActorError::storage(format!("Failed to collect S3 data: {}", e)))?;

        Ok(data.into_bytes().to_vec())
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let key = self.key(path);
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type("application/json")
            .body(data.to_vec().into())
            .send()
            .await
            .map_err(|e| {
                ActorError::storage(format!("Failed to write s3://{}/{}: {}", self.bucket, key, e))
            })?;

        tracing::debug!("Wrote {} bytes to s3://{}/{}", data.len(), self.bucket, key);
        Ok(())
    }
}
