use anyhow::{Context, Result};
use rand::{distributions::Alphanumeric, thread_rng, Rng};
use s3::creds::Credentials;
use s3::region::Region;
use s3::Bucket;
use tracing::debug;

use crate::config::Config;

/// Media store backed by an S3-compatible bucket.
///
/// Plays the role of the external media host: posts carry only the URL
/// returned from [`Self::upload`].
#[derive(Clone)]
pub struct MediaStore {
    bucket: Box<Bucket>,
    endpoint: Option<String>,
    prefix: String,
}

impl MediaStore {
    /// Create a new media store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if client initialization fails.
    pub async fn new(config: &Config) -> Result<Self> {
        let access_key = std::env::var("AWS_ACCESS_KEY_ID").context("AWS_ACCESS_KEY_ID not set")?;
        let secret_key =
            std::env::var("AWS_SECRET_ACCESS_KEY").context("AWS_SECRET_ACCESS_KEY not set")?;

        let credentials = Credentials::new(Some(&access_key), Some(&secret_key), None, None, None)
            .context("Failed to create S3 credentials")?;

        let region = if let Some(ref endpoint) = config.s3_endpoint {
            Region::Custom {
                region: config.s3_region.clone(),
                endpoint: endpoint.clone(),
            }
        } else {
            config.s3_region.parse().unwrap_or(Region::UsEast1)
        };

        let bucket = Bucket::new(&config.s3_bucket, region, credentials)
            .context("Failed to create S3 bucket")?;

        // Use path-style for custom endpoints (MinIO, R2, etc.)
        let bucket = if config.s3_endpoint.is_some() {
            bucket.with_path_style()
        } else {
            bucket
        };

        Ok(Self {
            bucket,
            endpoint: config.s3_endpoint.clone(),
            prefix: config.media_prefix.clone(),
        })
    }

    /// Upload a media file and return the URL to store on the post record.
    ///
    /// The object key is the configured prefix plus a random token and the
    /// sanitized original filename. The returned URL is served through
    /// `/media/*path`, which redirects to the bucket's public URL when the
    /// endpoint is public.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails.
    pub async fn upload(&self, data: &[u8], filename: &str) -> Result<String> {
        let key = self.object_key(filename);
        let content_type = mime_guess::from_path(filename)
            .first_or_octet_stream()
            .to_string();

        debug!(key = %key, content_type = %content_type, size = data.len(), "Uploading media");

        self.bucket
            .put_object_with_content_type(&key, data, &content_type)
            .await
            .context("Failed to upload media")?;

        Ok(format!("/media/{key}"))
    }

    /// Get an object, returning data and content type, or `None` if the
    /// key does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the get request fails for reasons other than
    /// not found.
    pub async fn get_object(&self, key: &str) -> Result<Option<(Vec<u8>, String)>> {
        debug!(key = %key, "Getting media object");

        match self.bucket.get_object(key).await {
            Ok(response) => {
                let content_type = response
                    .headers()
                    .get("content-type")
                    .map_or("application/octet-stream", |v| v.as_str())
                    .to_string();
                Ok(Some((response.to_vec(), content_type)))
            }
            Err(s3::error::S3Error::HttpFailWithBody(404, _)) => Ok(None),
            Err(s3::error::S3Error::HttpFail) => Ok(None),
            Err(e) => Err(anyhow::anyhow!("S3 get object failed: {e}")),
        }
    }

    /// Delete an object.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete request fails.
    pub async fn delete_object(&self, key: &str) -> Result<()> {
        debug!(key = %key, "Deleting media object");

        self.bucket
            .delete_object(key)
            .await
            .context("Failed to delete media object")?;

        Ok(())
    }

    /// Whether the bucket is directly reachable by browsers (AWS S3, R2)
    /// rather than a private endpoint (MinIO).
    #[must_use]
    pub fn is_public(&self) -> bool {
        match &self.endpoint {
            None => true,
            Some(endpoint) => !endpoint.to_lowercase().contains("minio"),
        }
    }

    /// Public URL for an object key.
    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        format!("https://{}.s3.amazonaws.com/{}", self.bucket.name(), key)
    }

    fn object_key(&self, filename: &str) -> String {
        let token: String = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(12)
            .map(char::from)
            .collect();

        let safe_name: String = filename
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
            .collect();
        let safe_name = if safe_name.is_empty() {
            "upload.bin".to_string()
        } else {
            safe_name
        };

        format!("{}{token}-{safe_name}", self.prefix)
    }
}

impl std::fmt::Debug for MediaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaStore")
            .field("bucket", &self.bucket.name())
            .field("prefix", &self.prefix)
            .finish()
    }
}
