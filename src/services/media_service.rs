use async_trait::async_trait;
use aws_sdk_s3 as s3;
use aws_sdk_s3::{error::DisplayErrorContext, primitives::ByteStream};
use futures::future::{join_all, try_join_all};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::ImageFile,
};

const PRODUCT_FOLDER: &str = "products";

/// Third-party image storage.
#[async_trait]
pub trait MediaHost: Send + Sync {
    /// Stores the file and returns its public URL.
    async fn upload(&self, file: &ImageFile) -> Result<String>;

    /// Removes the object behind a URL previously returned by `upload`.
    async fn delete(&self, url: &str) -> Result<()>;
}

/// Per-item result of a best-effort batch. Failures are recorded, never raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub attempted: usize,
    pub failures: Vec<(String, String)>,
}

impl BatchOutcome {
    pub fn succeeded(&self) -> usize {
        self.attempted - self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Uploads every file concurrently. URLs come back in submission order; any
/// failure aborts the whole batch.
pub async fn upload_all<M>(media: &M, files: &[ImageFile]) -> Result<Vec<String>>
where
    M: MediaHost + ?Sized,
{
    try_join_all(files.iter().map(|file| media.upload(file))).await
}

/// Deletes every URL concurrently, tolerating individual failures.
pub async fn delete_all<M>(media: &M, urls: &[String]) -> BatchOutcome
where
    M: MediaHost + ?Sized,
{
    let results = join_all(urls.iter().map(|url| media.delete(url))).await;

    let failures: Vec<(String, String)> = urls
        .iter()
        .zip(results)
        .filter_map(|(url, result)| result.err().map(|e| (url.clone(), e.to_string())))
        .collect();

    for (url, error) in &failures {
        tracing::warn!(%url, %error, "Failed to delete stored image");
    }

    BatchOutcome {
        attempted: urls.len(),
        failures,
    }
}

pub struct S3MediaHost {
    client: s3::Client,
    bucket: String,
    assets_url: String,
}

impl S3MediaHost {
    pub fn new(client: s3::Client, bucket: String, assets_url: String) -> Self {
        Self {
            client,
            bucket,
            assets_url,
        }
    }
}

#[async_trait]
impl MediaHost for S3MediaHost {
    async fn upload(&self, file: &ImageFile) -> Result<String> {
        let extension = file.extension().unwrap_or_else(|| "jpg".to_string());
        let key = format!("{}/{}.{}", PRODUCT_FOLDER, Uuid::new_v4(), extension);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(&file.content_type)
            .body(ByteStream::from(file.bytes.clone()))
            .send()
            .await
            .map_err(|e| {
                AppError::UpstreamError(format!("Image upload failed: {}", DisplayErrorContext(&e)))
            })?;

        Ok(format!("{}/{}", self.assets_url, key))
    }

    async fn delete(&self, url: &str) -> Result<()> {
        let key = key_from_url(url).ok_or_else(|| {
            AppError::UpstreamError(format!("Cannot derive storage key from {}", url))
        })?;

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                AppError::UpstreamError(format!("Image delete failed: {}", DisplayErrorContext(&e)))
            })?;

        Ok(())
    }
}

/// Storage key of a product image URL: everything from the `products/`
/// segment on, without query string.
pub fn key_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next()?;
    let marker = format!("/{}/", PRODUCT_FOLDER);
    let start = path.find(&marker)? + 1;
    let key = &path[start..];

    (key.len() > marker.len() - 1).then(|| key.to_string())
}
