use crate::{PageFetch, Post, PostId, SettleTimer};

/// Work the host performs on behalf of the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch a page; answer with `Msg::PageLoaded` carrying the same generation.
    FetchPage(PageFetch),
    /// Start a timer; answer with `Msg::SettleElapsed` when it fires.
    ScheduleSettle(SettleTimer),
    /// Replace (never push) a query parameter. `None` removes it.
    SetQueryParam {
        name: &'static str,
        value: Option<String>,
    },
    /// Hand the post over to whatever edits posts. Nothing is answered.
    EditPost(Post),
    /// Run the remote delete; answer with `Msg::DeleteCompleted`.
    DeletePost { post_id: PostId },
    /// Abandon in-flight requests and timers; their results are ignored anyway.
    CancelPending,
}
