use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{owner}/{repo}/{path} not found")]
    NotFound {
        owner: String,
        repo: String,
        path: String,
    },
    #[error("revision conflict writing {owner}/{repo}/{path}")]
    Conflict {
        owner: String,
        repo: String,
        path: String,
    },
    #[error("unexpected status {status} for {owner}/{repo}/{path}")]
    Status {
        status: StatusCode,
        owner: String,
        repo: String,
        path: String,
    },
    #[error("content is not valid base64")]
    Base64(#[from] base64::DecodeError),
    #[error("content is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("access token is not a valid header value")]
    Token(#[from] reqwest::header::InvalidHeaderValue),
}

/// Capability interface over the hosted file store. Reads return decoded
/// UTF-8 text; writes are revision-tagged upserts.
#[allow(async_fn_in_trait)]
pub trait ContentStore {
    async fn read(&self, owner: &str, repo: &str, path: &str) -> Result<String, StoreError>;

    /// Current revision tag of a file, `None` when the path does not exist.
    async fn revision(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Option<String>, StoreError>;

    /// Create or update a file. Pass the revision tag returned by
    /// [`ContentStore::revision`] when the file already exists; the store
    /// rejects stale tags. Returns the new revision tag.
    async fn write(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        message: &str,
        content: &str,
        revision: Option<&str>,
    ) -> Result<String, StoreError>;
}

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("landbot/", env!("CARGO_PKG_VERSION"));

/// GitHub contents API client.
pub struct GithubStore {
    client: reqwest::Client,
    base_url: String,
}

impl GithubStore {
    pub fn new(token: &str) -> Result<Self, StoreError> {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        // The API serves cached contents responses; the bot needs fresh state
        // every tick.
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn contents_url(&self, owner: &str, repo: &str, path: &str) -> String {
        format!("{}/repos/{}/{}/contents/{}", self.base_url, owner, repo, path)
    }

    async fn contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<ContentsResponse, StoreError> {
        let response = self
            .client
            .get(self.contents_url(owner, repo, path))
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(StoreError::NotFound {
                owner: owner.to_string(),
                repo: repo.to_string(),
                path: path.to_string(),
            }),
            status => Err(StoreError::Status {
                status,
                owner: owner.to_string(),
                repo: repo.to_string(),
                path: path.to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    sha: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct WriteResponse {
    content: WrittenContent,
}

#[derive(Debug, Deserialize)]
struct WrittenContent {
    sha: String,
}

impl ContentStore for GithubStore {
    async fn read(&self, owner: &str, repo: &str, path: &str) -> Result<String, StoreError> {
        let contents = self.contents(owner, repo, path).await?;
        decode_content(&contents.content)
    }

    async fn revision(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Option<String>, StoreError> {
        match self.contents(owner, repo, path).await {
            Ok(contents) => Ok(Some(contents.sha)),
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn write(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        message: &str,
        content: &str,
        revision: Option<&str>,
    ) -> Result<String, StoreError> {
        let mut body = serde_json::json!({
            "message": message,
            "content": BASE64.encode(content),
        });
        if let Some(revision) = revision {
            body["sha"] = serde_json::json!(revision);
        }

        let response = self
            .client
            .put(self.contents_url(owner, repo, path))
            .json(&body)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let written: WriteResponse = response.json().await?;
                Ok(written.content.sha)
            }
            StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(StoreError::Conflict {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                    path: path.to_string(),
                })
            }
            status => Err(StoreError::Status {
                status,
                owner: owner.to_string(),
                repo: repo.to_string(),
                path: path.to_string(),
            }),
        }
    }
}

/// File content arrives base64-encoded with embedded newlines.
fn decode_content(raw: &str) -> Result<String, StoreError> {
    let cleaned: String = raw.split_whitespace().collect();
    let bytes = BASE64.decode(cleaned)?;
    Ok(String::from_utf8(bytes)?)
}
