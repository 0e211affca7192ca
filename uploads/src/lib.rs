use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Builder, Region};
use aws_sdk_s3::primitives::ByteStream;
use uuid::Uuid;

use common::env_config::UploadConfig;
use common::error::{AppError, Res};

/// Object-storage adapter: turns an in-memory file buffer into a hosted
/// public URL. Works against any S3-compatible endpoint.
#[derive(Clone)]
pub struct Uploader {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl Uploader {
    /// Builds the client once at startup; cloning is cheap.
    pub fn new(config: &UploadConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "uploads",
        );

        let sdk_config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(&config.endpoint_url)
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Uploader {
            client: Client::from_conf(sdk_config),
            bucket: config.bucket.clone(),
            public_base_url: config.public_base_url.clone(),
        }
    }

    /// Uploads the buffer under `key` and returns the public URL it will be
    /// served from. Callers treat any failure as an internal error; the
    /// detail only goes to the log.
    pub async fn upload(&self, data: Vec<u8>, key: &str, content_type: &str) -> Res<String> {
        log::debug!("uploading {} bytes to {}", data.len(), key);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("upload of {} failed: {}", key, e)))?;

        Ok(format!("{}/{}", self.public_base_url, key))
    }

    /// Convenience wrapper for multipart form files: derives the object key
    /// from the client's filename and forwards the declared content type.
    pub async fn upload_form_file(
        &self,
        file: &actix_multipart::form::bytes::Bytes,
    ) -> Res<String> {
        let key = object_key(file.file_name.as_deref().unwrap_or("upload"));
        let content_type = file
            .content_type
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        self.upload(file.data.to_vec(), &key, &content_type).await
    }
}

/// Derives a collision-free object key from the uploaded file's name,
/// keeping the extension so the store serves a sensible content type.
pub fn object_key(original_name: &str) -> String {
    match original_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && ext.len() <= 8 => {
            format!("{}.{}", Uuid::new_v4(), ext.to_lowercase())
        }
        _ => Uuid::new_v4().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_keeps_extension() {
        let key = object_key("resume.PDF");
        assert!(key.ends_with(".pdf"));
        assert_ne!(object_key("resume.PDF"), key);
    }

    #[test]
    fn object_key_without_extension_is_bare_uuid() {
        let key = object_key("README");
        assert!(!key.contains('.'));
    }

    #[test]
    fn object_key_ignores_oversized_extensions() {
        let key = object_key("archive.tar.gz.backup-of-backup");
        assert!(!key.contains('.'));
    }
}
