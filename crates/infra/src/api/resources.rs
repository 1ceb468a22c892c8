//! Binary resource transfer
//!
//! Uploads local files or remote images to a group, and downloads group
//! resources, through the authenticated HTTP client.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use psnlink_core::AccessTokenProvider;
use psnlink_domain::constants::CONTENT_TYPE_IMAGE;
use psnlink_domain::{
    DownloadedResource, MessagingTarget, PsnError, ResourceSource, Result, Token,
    UploadedResource,
};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument, warn};

use super::path_segment;
use crate::http::{HttpClient, RequestDescriptor};

/// Upload and download of group resources
pub struct ResourceTransferManager {
    http: HttpClient,
    auth: Arc<dyn AccessTokenProvider>,
    messaging_base_url: String,
    temp_dir: PathBuf,
}

impl ResourceTransferManager {
    /// # Arguments
    /// * `temp_dir` - Directory for URL-sourced uploads; created on demand
    pub fn new(
        http: HttpClient,
        auth: Arc<dyn AccessTokenProvider>,
        messaging_base_url: impl Into<String>,
        temp_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            http,
            auth,
            messaging_base_url: messaging_base_url.into(),
            temp_dir: temp_dir.into(),
        }
    }

    #[must_use]
    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Upload a resource to the target's group and return its id
    ///
    /// Remote images are staged in a temporary file that lives exactly as
    /// long as this call. Local paths are read directly.
    ///
    /// # Errors
    /// - `UnsupportedVariant` for URLs that are not png/jpg/jpeg images
    /// - `IoFailure` if the local file or temp file cannot be read/written
    /// - `MalformedResponse` if the response carries no `resourceId`
    /// - Token and transport errors from the underlying call
    #[instrument(skip(self, source), fields(group_id = %target.group_id()))]
    pub async fn upload(
        &self,
        target: &MessagingTarget,
        source: &ResourceSource,
    ) -> Result<String> {
        let tokens = self.auth.access_token().await?;

        match source {
            ResourceSource::UnsupportedUrl(url) => Err(PsnError::UnsupportedVariant(format!(
                "only png/jpg/jpeg URLs can be uploaded: {url}"
            ))),
            ResourceSource::LocalPath(path) => {
                debug!(path = %path.display(), "uploading local file");
                let bytes = tokio::fs::read(path).await.map_err(|err| {
                    PsnError::IoFailure(format!("failed to read {}: {err}", path.display()))
                })?;
                self.post_upload(target, bytes, &tokens.access).await
            }
            ResourceSource::RemoteImage(url) => {
                let staged = self.stage_remote_image(url).await?;
                let bytes = tokio::fs::read(staged.path()).await?;
                let result = self.post_upload(target, bytes, &tokens.access).await;

                if let Err(err) = staged.close() {
                    warn!(error = %err, "failed to remove staged upload");
                }
                result
            }
        }
    }

    /// Download a resource's raw bytes and content type
    ///
    /// # Errors
    /// Token and transport errors; `RemoteRejected` keeps status and body
    #[instrument(skip(self))]
    pub async fn download(&self, group_id: &str, resource_id: &str) -> Result<DownloadedResource> {
        let tokens = self.auth.access_token().await?;

        let url = format!(
            "{}/v1/groups/{}/resources/{}",
            self.messaging_base_url,
            path_segment(group_id),
            path_segment(resource_id)
        );
        let descriptor = RequestDescriptor::get(url).header("Accept", "*/*");
        let payload = self.http.call(&descriptor, &tokens.access).await?;

        Ok(DownloadedResource {
            content_type: payload
                .content_type
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| CONTENT_TYPE_IMAGE.to_string()),
            bytes: payload.body,
        })
    }

    async fn stage_remote_image(&self, url: &str) -> Result<NamedTempFile> {
        let payload = self.http.fetch_public(url).await?;

        tokio::fs::create_dir_all(&self.temp_dir).await?;
        let staged = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(".img")
            .tempfile_in(&self.temp_dir)?;
        tokio::fs::write(staged.path(), &payload.body).await?;

        debug!(
            url,
            path = %staged.path().display(),
            bytes = payload.body.len(),
            "staged remote image"
        );
        Ok(staged)
    }

    async fn post_upload(
        &self,
        target: &MessagingTarget,
        bytes: Vec<u8>,
        token: &Token,
    ) -> Result<String> {
        let url = format!(
            "{}/v1/groups/{}/resources",
            self.messaging_base_url,
            path_segment(target.group_id())
        );
        let descriptor =
            RequestDescriptor::post(url).content_type(CONTENT_TYPE_IMAGE).binary(bytes);

        let uploaded: UploadedResource = self.http.call(&descriptor, token).await?.json()?;
        if uploaded.resource_id.trim().is_empty() {
            return Err(PsnError::MalformedResponse("upload returned an empty resourceId".into()));
        }

        info!(resource_id = %uploaded.resource_id, "resource uploaded");
        Ok(uploaded.resource_id)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use psnlink_domain::{SessionHandle, TokenPair};
    use tempfile::TempDir;
    use wiremock::matchers::{body_bytes, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    struct StaticToken(&'static str);

    #[async_trait]
    impl AccessTokenProvider for StaticToken {
        async fn access_token(&self) -> Result<TokenPair> {
            if self.0.is_empty() {
                return Err(PsnError::Unauthenticated("no session handle configured".into()));
            }
            Ok(TokenPair::new(Token::new(self.0, 3600), Token::new("refresh", 86_400)))
        }

        async fn fetch_session_handle(&self) -> Result<SessionHandle> {
            Ok(SessionHandle::new("unused"))
        }

        async fn replace_session_handle(&self, _session: SessionHandle) {}
    }

    fn manager(
        server: &MockServer,
        temp: &TempDir,
        token: &'static str,
    ) -> ResourceTransferManager {
        ResourceTransferManager::new(
            HttpClient::new().unwrap(),
            Arc::new(StaticToken(token)),
            format!("{}/api/gamingLoungeGroups", server.uri()),
            temp.path().join("resources"),
        )
    }

    fn staged_files(dir: &Path) -> usize {
        std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
    }

    #[tokio::test]
    async fn remote_image_is_staged_uploaded_and_removed() {
        let server = MockServer::start().await;
        let temp = TempDir::new().unwrap();
        let staging = temp.path().join("resources");
        let seen_during_upload = Arc::new(AtomicUsize::new(0));

        Mock::given(method("GET"))
            .and(path("/pic.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![9, 8, 7]))
            .expect(1)
            .mount(&server)
            .await;

        let seen = seen_during_upload.clone();
        let staging_watch = staging.clone();
        Mock::given(method("POST"))
            .and(path("/api/gamingLoungeGroups/v1/groups/g1/resources"))
            .and(header("content-type", "image/jpeg"))
            .and(header("authorization", "Bearer A1"))
            .and(body_bytes(vec![9, 8, 7]))
            .respond_with(move |_req: &wiremock::Request| {
                seen.store(staged_files(&staging_watch), Ordering::SeqCst);
                ResponseTemplate::new(200).set_body_string(r#"{"resourceId":"res-1"}"#)
            })
            .expect(1)
            .mount(&server)
            .await;

        let source = ResourceSource::RemoteImage(format!("{}/pic.png", server.uri()));
        let id = manager(&server, &temp, "A1")
            .upload(&MessagingTarget::main_thread("g1"), &source)
            .await
            .unwrap();

        assert_eq!(id, "res-1");
        assert_eq!(seen_during_upload.load(Ordering::SeqCst), 1);
        assert_eq!(staged_files(&staging), 0);
    }

    #[tokio::test]
    async fn staged_file_is_removed_when_upload_is_rejected() {
        let server = MockServer::start().await;
        let temp = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/pic.JPG"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1]))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let source = ResourceSource::RemoteImage(format!("{}/pic.JPG", server.uri()));
        let err = manager(&server, &temp, "A1")
            .upload(&MessagingTarget::main_thread("g1"), &source)
            .await
            .unwrap_err();

        assert_eq!(err, PsnError::rejected(500, "boom"));
        assert_eq!(staged_files(&temp.path().join("resources")), 0);
    }

    #[tokio::test]
    async fn local_file_is_read_without_staging() {
        let server = MockServer::start().await;
        let temp = TempDir::new().unwrap();
        let local = temp.path().join("pic.jpg");
        std::fs::write(&local, [4, 5, 6]).unwrap();

        Mock::given(method("POST"))
            .and(body_bytes(vec![4, 5, 6]))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"resourceId":"res-2"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let id = manager(&server, &temp, "A1")
            .upload(&MessagingTarget::main_thread("g1"), &ResourceSource::LocalPath(local))
            .await
            .unwrap();

        assert_eq!(id, "res-2");
        assert!(!temp.path().join("resources").exists());
    }

    #[tokio::test]
    async fn missing_local_file_is_io_failure() {
        let server = MockServer::start().await;
        let temp = TempDir::new().unwrap();

        let err = manager(&server, &temp, "A1")
            .upload(
                &MessagingTarget::main_thread("g1"),
                &ResourceSource::LocalPath(temp.path().join("missing.jpg")),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, PsnError::IoFailure(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_resource_id_is_malformed() {
        let server = MockServer::start().await;
        let temp = TempDir::new().unwrap();
        let local = temp.path().join("pic.png");
        std::fs::write(&local, [1]).unwrap();

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"resourceId":""}"#))
            .mount(&server)
            .await;

        let err = manager(&server, &temp, "A1")
            .upload(&MessagingTarget::main_thread("g1"), &ResourceSource::LocalPath(local))
            .await
            .unwrap_err();

        assert!(matches!(err, PsnError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn unsupported_url_and_missing_token_make_no_calls() {
        let server = MockServer::start().await;
        let temp = TempDir::new().unwrap();
        let target = MessagingTarget::main_thread("g1");

        let err = manager(&server, &temp, "A1")
            .upload(&target, &ResourceSource::UnsupportedUrl("https://x.test/clip.mp4".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, PsnError::UnsupportedVariant(_)));

        let err = manager(&server, &temp, "")
            .upload(&target, &ResourceSource::RemoteImage(format!("{}/a.png", server.uri())))
            .await
            .unwrap_err();
        assert!(matches!(err, PsnError::Unauthenticated(_)));

        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn download_returns_bytes_and_content_type() {
        let server = MockServer::start().await;
        let temp = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/api/gamingLoungeGroups/v1/groups/g1/resources/r1"))
            .and(header("accept", "*/*"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/png")
                    .set_body_bytes(vec![1, 2]),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/gamingLoungeGroups/v1/groups/g1/resources/r2"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![3]))
            .mount(&server)
            .await;

        let transfers = manager(&server, &temp, "A1");
        let png = transfers.download("g1", "r1").await.unwrap();
        assert_eq!(png, DownloadedResource { bytes: vec![1, 2], content_type: "image/png".into() });

        let fallback = transfers.download("g1", "r2").await.unwrap();
        assert_eq!(fallback.content_type, "image/jpeg");
    }

    #[tokio::test]
    async fn download_failure_keeps_status_and_body() {
        let server = MockServer::start().await;
        let temp = TempDir::new().unwrap();
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such resource"))
            .mount(&server)
            .await;

        let err = manager(&server, &temp, "A1").download("g1", "missing").await.unwrap_err();
        assert_eq!(err, PsnError::rejected(404, "no such resource"));
    }
}
