use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::{info, warn};

use super::error::StorageError;
use super::path::{check_relative, extension_of, normalize_folder, object_key, object_name};
use super::traits::{StorageBackend, StoredFile};

const OBJECT_PREFIX: &str = "storage/v1/object";
/// Marker separating the host part of a public URL from `{bucket}/{key}`.
const PUBLIC_MARKER: &str = "storage/v1/object/public/";

/// Object storage reached over authenticated HTTP (Supabase-style API).
///
/// Uploads go to `{base}/storage/v1/object/{bucket}/{key}` and are served
/// from `{base}/storage/v1/object/public/{bucket}/{key}`.
pub struct RemoteStorage {
    client: Client,
    base_url: String,
    bucket: String,
    api_key: String,
}

impl fmt::Debug for RemoteStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteStorage")
            .field("base_url", &self.base_url)
            .field("bucket", &self.bucket)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl RemoteStorage {
    pub fn new(
        base_url: &str,
        bucket: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, StorageError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(StorageError::Config("remote storage url is empty".into()));
        }
        let bucket = bucket.trim().trim_matches('/');
        if bucket.is_empty() || bucket.contains('/') {
            return Err(StorageError::Config(format!(
                "invalid remote storage bucket: {bucket:?}"
            )));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
            bucket: bucket.to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{OBJECT_PREFIX}/{}/{key}", self.base_url, self.bucket)
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{PUBLIC_MARKER}{}/{key}", self.base_url, self.bucket)
    }

    /// Extract the object key from a public URL of this bucket.
    fn key_from_url(&self, url: &str) -> Result<String, StorageError> {
        let invalid = || StorageError::InvalidUrl(url.to_string());

        let start = url.find(PUBLIC_MARKER).ok_or_else(invalid)? + PUBLIC_MARKER.len();
        let rest = &url[start..];
        let rest = rest.split(['?', '#']).next().unwrap_or(rest);

        let (bucket, key) = rest.split_once('/').ok_or_else(invalid)?;
        if bucket != self.bucket || check_relative(key).is_err() {
            return Err(invalid());
        }
        Ok(key.to_string())
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(&self.api_key).header("apikey", &self.api_key)
    }

    /// POST the object; on any failure retry once as an upserting PUT.
    async fn put_object(
        &self,
        key: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<(), StorageError> {
        let url = self.object_url(key);

        let primary = self
            .authorized(self.client.post(&url))
            .header(CONTENT_TYPE, content_type)
            .header(CACHE_CONTROL, "no-cache")
            .body(content.to_vec())
            .send()
            .await;

        match primary {
            Ok(res) if res.status().is_success() => return Ok(()),
            Ok(res) => {
                let status = res.status().as_u16();
                warn!(key, status, "Primary upload rejected, retrying as upsert");
            }
            Err(e) => warn!(key, error = %e, "Primary upload failed, retrying as upsert"),
        }

        let res = self
            .authorized(self.client.put(&url))
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "true")
            .body(content.to_vec())
            .send()
            .await?;
        ensure_success(res).await.map(|_| ())
    }
}

async fn ensure_success(res: Response) -> Result<Response, StorageError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    Err(StorageError::Remote {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl StorageBackend for RemoteStorage {
    async fn upload(
        &self,
        content: &[u8],
        original_name: &str,
        folder: &str,
    ) -> Result<StoredFile, StorageError> {
        let folder = normalize_folder(folder)?;
        let name = object_name(original_name);
        let key = object_key(&folder, &name);

        let content_type = mime_guess::from_ext(&extension_of(&name))
            .first_or_octet_stream()
            .to_string();

        self.put_object(&key, content, &content_type).await?;

        let url = self.public_url(&key);
        info!(
            bucket = %self.bucket,
            key = %key,
            size = content.len(),
            url = %url,
            "Stored upload"
        );

        Ok(StoredFile { name, folder, url })
    }

    async fn delete(&self, url: &str) -> Result<(), StorageError> {
        let key = self.key_from_url(url)?;

        let res = self
            .authorized(self.client.delete(self.object_url(&key)))
            .send()
            .await?;
        if res.status() == StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(url.to_string()));
        }
        ensure_success(res).await?;

        info!(bucket = %self.bucket, key = %key, "Deleted upload");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::body::Bytes;
    use axum::extract::{Path, State};
    use axum::http::{HeaderMap, Method, StatusCode as AxumStatus};
    use axum::routing::post;

    use super::*;

    #[derive(Debug, Clone)]
    struct Call {
        method: Method,
        key: String,
        content_type: Option<String>,
        upsert: bool,
    }

    #[derive(Clone, Default)]
    struct FakeBucket {
        objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        calls: Arc<Mutex<Vec<Call>>>,
        reject_post: bool,
    }

    fn header(headers: &HeaderMap, name: &str) -> Option<String> {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    async fn store_object(
        State(bucket): State<FakeBucket>,
        method: Method,
        Path((name, key)): Path<(String, String)>,
        headers: HeaderMap,
        body: Bytes,
    ) -> AxumStatus {
        bucket.calls.lock().unwrap().push(Call {
            method: method.clone(),
            key: key.clone(),
            content_type: header(&headers, "content-type"),
            upsert: header(&headers, "x-upsert").as_deref() == Some("true"),
        });
        if header(&headers, "authorization").as_deref() != Some("Bearer secret-key") {
            return AxumStatus::UNAUTHORIZED;
        }
        if method == Method::POST && bucket.reject_post {
            return AxumStatus::BAD_REQUEST;
        }
        bucket
            .objects
            .lock()
            .unwrap()
            .insert(format!("{name}/{key}"), body.to_vec());
        AxumStatus::OK
    }

    async fn remove_object(
        State(bucket): State<FakeBucket>,
        Path((name, key)): Path<(String, String)>,
    ) -> AxumStatus {
        match bucket.objects.lock().unwrap().remove(&format!("{name}/{key}")) {
            Some(_) => AxumStatus::OK,
            None => AxumStatus::NOT_FOUND,
        }
    }

    async fn spawn_bucket(bucket: FakeBucket) -> SocketAddr {
        let app = Router::new()
            .route(
                "/storage/v1/object/{bucket}/{*key}",
                post(store_object).put(store_object).delete(remove_object),
            )
            .with_state(bucket);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn client_for(addr: SocketAddr) -> RemoteStorage {
        RemoteStorage::new(
            &format!("http://{addr}/"),
            "portfolio",
            "secret-key",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn upload_posts_object_and_returns_public_url() {
        let bucket = FakeBucket::default();
        let addr = spawn_bucket(bucket.clone()).await;
        let store = client_for(addr);

        let stored = store.upload(b"png-bytes", "me.PNG", "projects").await.unwrap();

        assert_eq!(
            stored.url,
            format!(
                "http://{addr}/storage/v1/object/public/portfolio/projects/{}",
                stored.name
            )
        );
        let key = format!("portfolio/projects/{}", stored.name);
        assert_eq!(
            bucket.objects.lock().unwrap().get(&key).map(Vec::as_slice),
            Some(&b"png-bytes"[..])
        );

        let calls = bucket.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::POST);
        assert_eq!(calls[0].content_type.as_deref(), Some("image/png"));
    }

    #[tokio::test]
    async fn rejected_post_falls_back_to_upsert_put() {
        let bucket = FakeBucket {
            reject_post: true,
            ..Default::default()
        };
        let addr = spawn_bucket(bucket.clone()).await;
        let store = client_for(addr);

        let stored = store.upload(b"svg", "icon.svg", "skills").await.unwrap();

        let calls = bucket.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].method, Method::PUT);
        assert!(calls[1].upsert);
        assert_eq!(calls[1].key, format!("skills/{}", stored.name));
    }

    #[tokio::test]
    async fn failing_fallback_surfaces_remote_error() {
        let bucket = FakeBucket::default();
        let addr = spawn_bucket(bucket).await;
        let store =
            RemoteStorage::new(&format!("http://{addr}"), "portfolio", "wrong", Duration::from_secs(5))
                .unwrap();

        let err = store.upload(b"x", "a.png", "projects").await.unwrap_err();
        assert!(matches!(err, StorageError::Remote { status: 401, .. }));
    }

    #[tokio::test]
    async fn delete_resolves_key_from_public_url() {
        let bucket = FakeBucket::default();
        let addr = spawn_bucket(bucket.clone()).await;
        let store = client_for(addr);

        let stored = store.upload(b"x", "a.webp", "certificates").await.unwrap();
        store.delete(&stored.url).await.unwrap();
        assert!(bucket.objects.lock().unwrap().is_empty());

        let err = store.delete(&stored.url).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[test]
    fn key_parsing_requires_marker_and_matching_bucket() {
        let store = RemoteStorage::new(
            "https://x.supabase.co",
            "portfolio",
            "k",
            Duration::from_secs(1),
        )
        .unwrap();

        assert_eq!(
            store
                .key_from_url("https://x.supabase.co/storage/v1/object/public/portfolio/skills/a.png")
                .unwrap(),
            "skills/a.png"
        );
        assert_eq!(
            store
                .key_from_url("https://cdn.other/storage/v1/object/public/portfolio/a.png?v=2")
                .unwrap(),
            "a.png"
        );
        for url in [
            "https://x.supabase.co/uploads/a.png",
            "https://x.supabase.co/storage/v1/object/public/other/a.png",
            "https://x.supabase.co/storage/v1/object/public/portfolio/../a.png",
            "https://x.supabase.co/storage/v1/object/public/portfolio",
        ] {
            assert!(
                matches!(store.key_from_url(url), Err(StorageError::InvalidUrl(_))),
                "{url}"
            );
        }
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let store =
            RemoteStorage::new("https://x", "b", "super-secret", Duration::from_secs(1)).unwrap();
        assert!(!format!("{store:?}").contains("super-secret"));
    }

    #[test]
    fn rejects_missing_url_or_bucket() {
        assert!(matches!(
            RemoteStorage::new("", "b", "k", Duration::from_secs(1)),
            Err(StorageError::Config(_))
        ));
        assert!(matches!(
            RemoteStorage::new("https://x", " ", "k", Duration::from_secs(1)),
            Err(StorageError::Config(_))
        ));
    }
}
