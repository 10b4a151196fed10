//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from coldstore-core.

use async_trait::async_trait;
use tokio::fs::File;

use coldstore_core::{CredentialBundle, Error, ObjectStore, RemotePath, Result};

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a new S3 client from a decoded credential bundle.
    ///
    /// The bundle is used once here and not retained.
    pub async fn new(credentials: &CredentialBundle) -> Result<Self> {
        // Build credentials provider
        let provider = aws_credential_types::Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            credentials.session_token.clone(),
            None, // expiry
            "coldstore-static-credentials",
        );

        // Build SDK config
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(provider);

        if let Some(region) = &credentials.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        if let Some(endpoint) = &credentials.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;

        // Path-style addressing for S3-compatible stores behind a custom
        // endpoint
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(credentials.endpoint.is_some())
            .build();

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }

    /// Format AWS SDK error into a detailed error message
    fn format_sdk_error<E: std::fmt::Display>(error: &aws_sdk_s3::error::SdkError<E>) -> String {
        match error {
            aws_sdk_s3::error::SdkError::ServiceError(service_err) => {
                let err = service_err.err();
                let meta = service_err.raw();
                let mut msg = format!("Service error: {}", err);
                // Try to extract additional error information from headers
                if let Some(code) = meta.headers().get("x-amz-error-code")
                    && let Ok(code_str) = std::str::from_utf8(code.as_bytes())
                {
                    msg.push_str(&format!(" (code: {})", code_str));
                }
                msg
            }
            aws_sdk_s3::error::SdkError::ConstructionFailure(err) => {
                format!("Request construction failed: {:?}", err)
            }
            aws_sdk_s3::error::SdkError::TimeoutError(_) => "Request timeout".to_string(),
            aws_sdk_s3::error::SdkError::DispatchFailure(err) => {
                format!("Network dispatch error: {:?}", err)
            }
            aws_sdk_s3::error::SdkError::ResponseError(err) => {
                format!("Response error: {:?}", err)
            }
            _ => error.to_string(),
        }
    }

    /// True when the service rejected a create-only write because the object
    /// already exists (If-None-Match precondition)
    fn is_precondition_failure<E: std::fmt::Display>(
        error: &aws_sdk_s3::error::SdkError<E>,
    ) -> bool {
        if let aws_sdk_s3::error::SdkError::ServiceError(service_err) = error
            && service_err.raw().status().as_u16() == 412
        {
            return true;
        }
        error.to_string().contains("PreconditionFailed")
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn create_object(&self, path: &RemotePath, body: File, len: u64) -> Result<()> {
        let stream = aws_sdk_s3::primitives::ByteStream::read_from()
            .file(body)
            .build()
            .await
            .map_err(|e| Error::Transfer {
                key: path.key.clone(),
                reason: format!("failed to open body stream: {e}"),
            })?;

        self.inner
            .put_object()
            .bucket(&path.bucket)
            .key(&path.key)
            .if_none_match("*")
            .content_length(len as i64)
            .body(stream)
            .send()
            .await
            .map_err(|e| {
                if Self::is_precondition_failure(&e) {
                    Error::Conflict {
                        key: path.key.clone(),
                    }
                } else {
                    Error::Transfer {
                        key: path.key.clone(),
                        reason: Self::format_sdk_error(&e),
                    }
                }
            })?;

        Ok(())
    }

    async fn delete_object(&self, path: &RemotePath) -> Result<()> {
        self.inner
            .delete_object()
            .bucket(&path.bucket)
            .key(&path.key)
            .send()
            .await
            .map_err(|e| Error::Remote {
                name: path.to_string(),
                reason: Self::format_sdk_error(&e),
            })?;

        Ok(())
    }
}
