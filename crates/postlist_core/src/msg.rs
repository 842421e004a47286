use crate::{DeleteFailure, FetchFailure, Generation, Page, PostId, QueryParams, Sort, TimerToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The list view appeared; carries the parameters currently stored.
    Mounted(QueryParams),
    /// The list view went away. Everything still in flight is discarded.
    Unmounted,
    /// User edited the search field (raw, undebounced text).
    SearchTextChanged(String),
    /// User pressed the clear button of the search field.
    SearchCleared,
    /// A settle timer fired.
    SettleElapsed(TimerToken),
    /// User picked a sort order.
    SortSelected(Sort),
    /// Parameters changed outside the search bar (e.g. history navigation).
    ParamsChanged(QueryParams),
    /// A page fetch finished.
    PageLoaded {
        generation: Generation,
        result: Result<Page, FetchFailure>,
    },
    /// The scroll sentinel was reported visible or hidden.
    SentinelVisibilityChanged(bool),
    /// Explicit load-more request, bypassing the sentinel.
    LoadMoreRequested,
    /// User asked to retry after a fetch failure.
    RetryRequested,
    /// User asked to edit a post. The list itself does not change.
    EditRequested(PostId),
    /// User asked to delete a post; opens the confirmation dialog.
    DeleteRequested(PostId),
    /// User accepted the confirmation dialog.
    DeleteConfirmed,
    /// User cancelled the confirmation dialog.
    DeleteDismissed,
    /// The remote delete finished.
    DeleteCompleted {
        post_id: PostId,
        result: Result<(), DeleteFailure>,
    },
    /// Notifications were shown and can be dropped.
    NotificationsDismissed,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
