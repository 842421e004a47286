use std::time::Duration;

use bytes::BytesMut;
use futures_util::StreamExt;
use postlist_core::{Page, PageRequest, PageToken, Post, PostId};
use postlist_logging::{postlist_info, postlist_warn};
use serde::Deserialize;
use url::Url;

use crate::{ApiError, FailureKind};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Remote side of the post list: paged reads and deletes.
#[async_trait::async_trait]
pub trait PostsApi: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page, ApiError>;

    async fn delete_post(&self, post_id: &PostId) -> Result<(), ApiError>;
}

#[derive(Debug, Deserialize)]
struct PageBody {
    items: Vec<PostBody>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PostBody {
    id: String,
    title: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    created_at: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl From<PostBody> for Post {
    fn from(body: PostBody) -> Self {
        Post {
            id: PostId::new(body.id),
            title: body.title,
            body: body.body,
            author: body.author,
            created_at: body.created_at,
        }
    }
}

/// `PostsApi` over HTTP/JSON.
///
/// `GET {base}/posts?limit=&sort=&q=&cursor=` and `DELETE {base}/posts/{id}`.
#[derive(Debug, Clone)]
pub struct ReqwestPostsApi {
    settings: ApiSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestPostsApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("{base} cannot carry a path"),
            ));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            base,
            client,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // `new` rejected cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn page_url(&self, request: &PageRequest) -> Url {
        let mut url = self.endpoint(&["posts"]);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", &request.page_size.to_string());
            query.append_pair("sort", request.criteria.sort.as_str());
            if !request.criteria.query.is_empty() {
                query.append_pair("q", &request.criteria.query);
            }
            if let Some(token) = &request.page_token {
                query.append_pair("cursor", token.as_str());
            }
        }
        url
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<BytesMut, ApiError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }

    async fn status_error(&self, response: reqwest::Response) -> ApiError {
        let status = response.status();
        let code = self
            .read_body(response)
            .await
            .ok()
            .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
            .map(|body| body.error);
        ApiError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string()).with_code(code)
    }
}

#[async_trait::async_trait]
impl PostsApi for ReqwestPostsApi {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page, ApiError> {
        let url = self.page_url(request);
        postlist_info!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        if !response.status().is_success() {
            let err = self.status_error(response).await;
            postlist_warn!("page fetch failed: {}", err);
            return Err(err);
        }

        let body = self.read_body(response).await?;
        let page: PageBody = serde_json::from_slice(&body)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
        Ok(Page {
            items: page.items.into_iter().map(Post::from).collect(),
            next_page_token: page
                .next_page_token
                .filter(|token| !token.is_empty())
                .map(PageToken::new),
        })
    }

    async fn delete_post(&self, post_id: &PostId) -> Result<(), ApiError> {
        let url = self.endpoint(&["posts", post_id.as_str()]);
        postlist_info!("DELETE {}", url);
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        if response.status().is_success() {
            return Ok(());
        }
        let err = self.status_error(response).await;
        postlist_warn!("delete of {} failed: {}", post_id, err);
        Err(err)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
