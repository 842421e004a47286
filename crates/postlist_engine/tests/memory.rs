use postlist_core::{PageRequest, PageToken, Post, PostId, SearchCriteria, Sort};
use postlist_engine::{FailureKind, MemoryPostsApi, PostsApi};
use pretty_assertions::assert_eq;

fn post(id: &str, title: &str, created_at: &str) -> Post {
    Post {
        id: PostId::new(id),
        title: title.to_string(),
        body: String::new(),
        author: "Ana".to_string(),
        created_at: created_at.to_string(),
    }
}

fn sample() -> MemoryPostsApi {
    MemoryPostsApi::new(vec![
        post("a", "Cats at dawn", "2024-01-01T00:00:00Z"),
        post("b", "Dogs at noon", "2024-01-02T00:00:00Z"),
        post("c", "More CATS", "2024-01-03T00:00:00Z"),
        post("d", "Birds", "2024-01-04T00:00:00Z"),
        post("e", "cat naps", "2024-01-05T00:00:00Z"),
    ])
}

fn request(query: &str, sort: Sort, token: Option<&str>, page_size: usize) -> PageRequest {
    PageRequest {
        criteria: SearchCriteria::new(query, sort),
        page_token: token.map(PageToken::new),
        offset: 0,
        page_size,
    }
}

fn ids(posts: &[Post]) -> Vec<&str> {
    posts.iter().map(|p| p.id.as_str()).collect()
}

#[tokio::test]
async fn pages_through_newest_first() {
    let api = sample();

    let first = api
        .fetch_page(&request("", Sort::Newest, None, 2))
        .await
        .expect("first");
    assert_eq!(ids(&first.items), vec!["e", "d"]);
    assert_eq!(first.next_page_token, Some(PageToken::new("2")));

    let second = api
        .fetch_page(&request("", Sort::Newest, Some("2"), 2))
        .await
        .expect("second");
    assert_eq!(ids(&second.items), vec!["c", "b"]);

    let last = api
        .fetch_page(&request("", Sort::Newest, Some("4"), 2))
        .await
        .expect("last");
    assert_eq!(ids(&last.items), vec!["a"]);
    assert_eq!(last.next_page_token, None);
}

#[tokio::test]
async fn query_filters_case_insensitively() {
    let api = sample();
    let page = api
        .fetch_page(&request("cat", Sort::Oldest, None, 10))
        .await
        .expect("page");
    assert_eq!(ids(&page.items), vec!["a", "c", "e"]);
    assert_eq!(page.next_page_token, None);
}

#[tokio::test]
async fn cursor_past_the_end_yields_empty_page() {
    let api = sample();
    let page = api
        .fetch_page(&request("", Sort::Newest, Some("40"), 2))
        .await
        .expect("page");
    assert!(page.items.is_empty());
    assert_eq!(page.next_page_token, None);
}

#[tokio::test]
async fn malformed_cursor_is_rejected() {
    let api = sample();
    let err = api
        .fetch_page(&request("", Sort::Newest, Some("abc"), 2))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(400));
    assert_eq!(err.code.as_deref(), Some("invalid_cursor"));
}

#[tokio::test]
async fn delete_removes_first_match_only() {
    let api = MemoryPostsApi::new(vec![
        post("dup", "One", "2024-01-01T00:00:00Z"),
        post("dup", "Two", "2024-01-02T00:00:00Z"),
    ]);
    api.delete_post(&PostId::new("dup")).await.expect("deleted");
    assert_eq!(api.len(), 1);

    let page = api
        .fetch_page(&request("", Sort::Newest, None, 10))
        .await
        .expect("page");
    assert_eq!(page.items[0].title, "Two");
}

#[tokio::test]
async fn deleting_unknown_post_reports_not_found() {
    let api = sample();
    let err = api.delete_post(&PostId::new("zzz")).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert_eq!(err.code.as_deref(), Some("post_not_found"));
    assert_eq!(api.len(), 5);
}

#[test]
fn seeded_data_contains_a_repeated_id() {
    let api = MemoryPostsApi::seeded();
    assert_eq!(api.len(), 32);
    assert!(!api.is_empty());
}
