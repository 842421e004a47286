use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use postlist_core::{Page, PageRequest, PageToken, Post, PostId, Sort};

use crate::{ApiError, FailureKind, PostsApi};

/// In-process `PostsApi` over a fixed collection. Page tokens are decimal
/// offsets into the filtered, sorted result.
#[derive(Debug, Default)]
pub struct MemoryPostsApi {
    posts: Mutex<Vec<Post>>,
    latency: Duration,
}

impl MemoryPostsApi {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts: Mutex::new(posts),
            latency: Duration::ZERO,
        }
    }

    /// Demo data set, including a repeated id as real feeds sometimes have.
    pub fn seeded() -> Self {
        let authors = ["Lucía Romero", "Tomás Vidal", "Ada", "Kenji Mori"];
        let topics = [
            "Borrowing without tears",
            "Cats and async runtimes",
            "Pagination cursors explained",
            "Debouncing search boxes",
            "A tour of error enums",
            "Why my cat ignores lifetimes",
        ];
        let posts = (0..32)
            .map(|n: usize| {
                let topic = topics[n % topics.len()];
                Post {
                    id: PostId::new(format!("p{}", if n == 17 { 3 } else { n })),
                    title: format!("{topic} #{n}"),
                    body: format!("Notes on {} from week {}.", topic.to_lowercase(), n + 1),
                    author: authors[n % authors.len()].to_string(),
                    created_at: format!("2024-{:02}-{:02}T09:00:00Z", 1 + n / 28, 1 + n % 28),
                }
            })
            .collect();
        Self::new(posts)
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Post>> {
        self.posts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

fn matches_query(post: &Post, needle: &str) -> bool {
    needle.is_empty()
        || [&post.title, &post.body, &post.author]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}

#[async_trait::async_trait]
impl PostsApi for MemoryPostsApi {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page, ApiError> {
        self.simulate_latency().await;

        let start = match &request.page_token {
            Some(token) => token.as_str().parse::<usize>().map_err(|_| {
                ApiError::new(FailureKind::HttpStatus(400), "malformed cursor")
                    .with_code(Some("invalid_cursor".to_string()))
            })?,
            None => 0,
        };

        let needle = request.criteria.query.trim().to_lowercase();
        let mut matching: Vec<Post> = self
            .lock()
            .iter()
            .filter(|post| matches_query(post, &needle))
            .cloned()
            .collect();
        // Stable sort keeps insertion order among equal timestamps.
        match request.criteria.sort {
            Sort::Newest => matching.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            Sort::Oldest => matching.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        }

        let end = start.saturating_add(request.page_size).min(matching.len());
        let items = matching.get(start..end).map(<[Post]>::to_vec).unwrap_or_default();
        let next_page_token = (end < matching.len()).then(|| PageToken::new(end.to_string()));
        Ok(Page {
            items,
            next_page_token,
        })
    }

    async fn delete_post(&self, post_id: &PostId) -> Result<(), ApiError> {
        self.simulate_latency().await;
        let mut posts = self.lock();
        match posts.iter().position(|post| &post.id == post_id) {
            Some(index) => {
                posts.remove(index);
                Ok(())
            }
            None => Err(
                ApiError::new(FailureKind::HttpStatus(404), format!("no post {post_id}"))
                    .with_code(Some("post_not_found".to_string())),
            ),
        }
    }
}
