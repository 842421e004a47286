use postlist_core::{
    update, AppState, CoreConfig, Effect, ErrorKind, FetchFailure, Msg, Page, PageFetch,
    PageToken, Post, PostId, QueryParams, DEFAULT_DEBOUNCE,
};

fn post(id: &str) -> Post {
    Post {
        id: PostId::new(id),
        title: id.to_uppercase(),
        body: String::new(),
        author: "Iker".to_string(),
        created_at: "2024-02-02T08:30:00Z".to_string(),
    }
}

fn page(ids: &[&str], token: Option<&str>) -> Page {
    Page {
        items: ids.iter().map(|id| post(id)).collect(),
        next_page_token: token.map(PageToken::new),
    }
}

fn fetch_of(effects: &[Effect]) -> PageFetch {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchPage(fetch) => Some(fetch.clone()),
            _ => None,
        })
        .expect("fetch effect")
}

fn mounted(page_size: usize) -> (AppState, PageFetch) {
    let state = AppState::with_config(CoreConfig {
        debounce_delay: DEFAULT_DEBOUNCE,
        page_size,
    });
    let (state, effects) = update(state, Msg::Mounted(QueryParams::new()));
    (state, fetch_of(&effects))
}

fn apply(state: AppState, fetch: &PageFetch, page: Page) -> AppState {
    update(
        state,
        Msg::PageLoaded {
            generation: fetch.generation,
            result: Ok(page),
        },
    )
    .0
}

fn assert_fetch_more_is_noop(state: AppState) {
    let before = state.clone();
    let (after, effects) = update(state, Msg::LoadMoreRequested);
    assert!(effects.is_empty());
    assert_eq!(after.list(), before.list());
    assert_eq!(after.list().items().len(), before.list().items().len());
}

#[test]
fn fetch_more_is_noop_while_loading() {
    let (state, _fetch) = mounted(2);
    assert!(state.list().loading());
    assert_fetch_more_is_noop(state);
}

#[test]
fn fetch_more_is_noop_while_loading_more() {
    let (state, fetch) = mounted(2);
    let state = apply(state, &fetch, page(&["a", "b"], Some("2")));
    let (state, effects) = update(state, Msg::LoadMoreRequested);
    assert_eq!(effects.len(), 1);
    assert!(state.list().loading_more());
    assert!(state.view().show_more_skeleton);
    assert_fetch_more_is_noop(state);
}

#[test]
fn fetch_more_is_noop_after_error() {
    let (state, fetch) = mounted(2);
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            generation: fetch.generation,
            result: Err(FetchFailure::new(ErrorKind::Timeout, "timed out")),
        },
    );
    assert_fetch_more_is_noop(state);
}

#[test]
fn fetch_more_is_noop_at_end_of_data() {
    let (state, fetch) = mounted(2);
    let state = apply(state, &fetch, page(&["a", "b"], None));
    assert!(!state.list().has_more());
    assert!(state.view().show_end_message);
    assert_fetch_more_is_noop(state);
}

#[test]
fn short_page_ends_pagination() {
    let (state, fetch) = mounted(3);
    let state = apply(state, &fetch, page(&["a", "b", "c"], Some("3")));
    assert!(state.list().has_more());

    let (state, effects) = update(state, Msg::LoadMoreRequested);
    let next = fetch_of(&effects);
    assert_eq!(next.request.offset, 3);
    assert_eq!(next.request.page_token, Some(PageToken::new("3")));

    // Fewer than page_size items, even with a token, means no more data.
    let state = apply(state, &next, page(&["d"], Some("4")));
    let ids: Vec<_> = state.list().items().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d"]);
    assert!(!state.list().has_more());

    let (state, effects) = update(state, Msg::SentinelVisibilityChanged(true));
    assert!(effects.is_empty());
    assert_fetch_more_is_noop(state);
}

#[test]
fn empty_next_page_ends_pagination() {
    let (state, fetch) = mounted(2);
    let state = apply(state, &fetch, page(&["a", "b"], Some("2")));
    let (state, effects) = update(state, Msg::LoadMoreRequested);
    let next = fetch_of(&effects);
    let state = apply(state, &next, page(&[], Some("4")));
    assert!(!state.list().has_more());
    assert_eq!(state.list().items().len(), 2);
}

#[test]
fn sentinel_fires_once_per_visibility_period() {
    let (state, fetch) = mounted(2);
    let state = apply(state, &fetch, page(&["a", "b"], Some("2")));

    let (state, effects) = update(state, Msg::SentinelVisibilityChanged(true));
    let next = fetch_of(&effects);
    let state = apply(state, &next, page(&["c", "d"], Some("4")));

    // Still visible after the load: no second trigger.
    let (state, effects) = update(state, Msg::SentinelVisibilityChanged(true));
    assert!(effects.is_empty());

    // New rows pushed it away; scrolling back down triggers again.
    let (state, _) = update(state, Msg::SentinelVisibilityChanged(false));
    let (state, effects) = update(state, Msg::SentinelVisibilityChanged(true));
    let third = fetch_of(&effects);
    assert_eq!(third.request.offset, 4);
    assert!(state.list().loading_more());
}

#[test]
fn sentinel_seen_while_loading_fires_when_enabled() {
    let (state, fetch) = mounted(2);
    let (state, effects) = update(state, Msg::SentinelVisibilityChanged(true));
    assert!(effects.is_empty(), "disabled while the first page loads");

    let state = apply(state, &fetch, page(&["a", "b"], Some("2")));
    let (state, effects) = update(state, Msg::SentinelVisibilityChanged(true));
    let next = fetch_of(&effects);
    assert_eq!(next.request.offset, 2);
    assert!(state.list().loading_more());
}

#[test]
fn remove_by_id_does_not_move_the_cursor() {
    let (state, fetch) = mounted(2);
    let state = apply(state, &fetch, page(&["a", "b"], Some("cursor-2")));
    let (state, _) = update(state, Msg::DeleteRequested(PostId::new("a")));
    let (state, _) = update(state, Msg::DeleteConfirmed);
    let (state, _) = update(
        state,
        Msg::DeleteCompleted {
            post_id: PostId::new("a"),
            result: Ok(()),
        },
    );
    assert!(state.list().has_more());

    let (_state, effects) = update(state, Msg::LoadMoreRequested);
    let next = fetch_of(&effects);
    assert_eq!(next.request.page_token, Some(PageToken::new("cursor-2")));
    assert_eq!(next.request.offset, 1);
}
