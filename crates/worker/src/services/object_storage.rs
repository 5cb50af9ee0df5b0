//! S3-compatible archive storage.

use async_trait::async_trait;
use aws_sdk_s3::{
    config::{Credentials, Region},
    primitives::ByteStream,
    Client,
};
use domain::services::{ObjectStore, StoreError};
use std::path::Path;
use tracing::{debug, info};

use crate::config::StorageConfig;

pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Build a client from static credentials. An endpoint override plus
    /// path-style addressing covers self-hosted S3-compatible stores.
    pub fn new(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "export-worker",
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .credentials_provider(credentials)
            .region(Region::new(config.region.clone()))
            .force_path_style(config.path_style);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_file(&self, key: &str, path: &Path) -> Result<(), StoreError> {
        debug!(key, path = %path.display(), "Uploading archive");

        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| StoreError::ObjectStorage(e.to_string()))?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("application/zip")
            .body(body)
            .send()
            .await
            .map_err(|e| StoreError::ObjectStorage(e.to_string()))?;

        info!(key, bucket = %self.bucket, "Archive uploaded");
        Ok(())
    }
}
