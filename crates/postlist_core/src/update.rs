use postlist_logging::postlist_debug;

use crate::criteria::{PARAM_QUERY, PARAM_SORT};
use crate::{
    AppState, ConfirmDialog, DialogAction, Effect, Msg, Notification, PageOutcome, ScrollSentinel,
    SearchCriteria,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if !state.mounted && !matches!(msg, Msg::Mounted(_) | Msg::Tick | Msg::NoOp) {
        postlist_debug!("ignoring {:?} while unmounted", msg);
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Mounted(params) => {
            state.search = state.search.successor(&params);
            state.params = params;
            state.list = state.list.successor();
            state.sentinel = ScrollSentinel::new();
            state.dialog = None;
            state.mounted = true;
            state.mark_dirty();
            reconcile_criteria(&mut state)
        }
        Msg::Unmounted => {
            state.list.dispose();
            state.mounted = false;
            state.dialog = None;
            state.mark_dirty();
            vec![Effect::CancelPending]
        }
        Msg::SearchTextChanged(text) => match state.search.text_changed(text) {
            Some(timer) => {
                state.mark_dirty();
                vec![Effect::ScheduleSettle(timer)]
            }
            None => Vec::new(),
        },
        Msg::SettleElapsed(token) => match state.search.settle_elapsed(token) {
            Some(query) => write_query(&mut state, query),
            None => Vec::new(),
        },
        Msg::SearchCleared => {
            state.search.clear();
            state.mark_dirty();
            write_query(&mut state, String::new())
        }
        Msg::SortSelected(sort) => {
            if state.search.select_sort(sort) {
                state.mark_dirty();
            }
            let mut effects = write_param(&mut state, PARAM_SORT, sort.as_str().to_string());
            effects.extend(reconcile_criteria(&mut state));
            effects
        }
        Msg::ParamsChanged(params) => {
            state.search.sync_from_params(&params);
            state.params = params;
            state.mark_dirty();
            reconcile_criteria(&mut state)
        }
        Msg::PageLoaded { generation, result } => {
            if state.list.apply_page(generation, result) != PageOutcome::Stale {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SentinelVisibilityChanged(visible) => {
            let disabled = state.list.load_more_blocked();
            if state.sentinel.visibility_changed(visible, disabled) {
                fetch_more(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::LoadMoreRequested => fetch_more(&mut state),
        Msg::RetryRequested => match state.list.criteria().cloned() {
            Some(criteria) if state.list.error().is_some() => reset(&mut state, criteria),
            _ => Vec::new(),
        },
        Msg::EditRequested(post_id) => {
            match state.list.items().iter().find(|post| post.id == post_id) {
                Some(post) => vec![Effect::EditPost(post.clone())],
                None => {
                    postlist_debug!("edit requested for unknown post {}", post_id);
                    Vec::new()
                }
            }
        }
        Msg::DeleteRequested(post_id) => {
            if state.dialog.is_some() {
                return (state, Vec::new());
            }
            let title = state
                .list
                .items()
                .iter()
                .find(|post| post.id == post_id)
                .map(|post| post.title.clone());
            match title {
                Some(title) => {
                    state.dialog = Some(ConfirmDialog::delete_post(post_id, &title));
                    state.mark_dirty();
                }
                None => postlist_debug!("delete requested for unknown post {}", post_id),
            }
            Vec::new()
        }
        Msg::DeleteDismissed => {
            if state.dialog.as_ref().is_some_and(|d| !d.is_running()) {
                state.dialog = None;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DeleteConfirmed => match state.dialog.as_mut().and_then(ConfirmDialog::accept) {
            Some(DialogAction::DeletePost(post_id)) => {
                state.mark_dirty();
                vec![Effect::DeletePost { post_id }]
            }
            None => Vec::new(),
        },
        Msg::DeleteCompleted { post_id, result } => {
            if state
                .dialog
                .as_ref()
                .is_some_and(|d| d.is_running() && d.targets(&post_id))
            {
                state.dialog = None;
            }
            match result {
                Ok(()) => {
                    state.list.remove_by_id(&post_id);
                    state.push_notification(Notification::PostDeleted);
                }
                Err(failure) => {
                    state.push_notification(Notification::DeleteFailed(failure));
                }
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::NotificationsDismissed => {
            if !state.notifications.is_empty() {
                state.notifications.clear();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn write_query(state: &mut AppState, query: String) -> Vec<Effect> {
    let mut effects = write_param(state, PARAM_QUERY, query);
    effects.extend(reconcile_criteria(state));
    effects
}

/// Updates the core's parameter copy and emits the matching store write.
fn write_param(state: &mut AppState, name: &'static str, value: String) -> Vec<Effect> {
    let value = Some(value).filter(|v| !v.is_empty());
    if state.params.set(name, value.as_deref()) {
        vec![Effect::SetQueryParam { name, value }]
    } else {
        Vec::new()
    }
}

/// Resets the list when the criteria derived from the parameters differ
/// from the ones it was last loaded with.
fn reconcile_criteria(state: &mut AppState) -> Vec<Effect> {
    let criteria = SearchCriteria::from_params(&state.params);
    if state.list.criteria() == Some(&criteria) {
        return Vec::new();
    }
    reset(state, criteria)
}

fn reset(state: &mut AppState, criteria: SearchCriteria) -> Vec<Effect> {
    state.sentinel.rearm();
    state.mark_dirty();
    state
        .list
        .reset(criteria)
        .map(Effect::FetchPage)
        .into_iter()
        .collect()
}

fn fetch_more(state: &mut AppState) -> Vec<Effect> {
    match state.list.fetch_more() {
        Some(fetch) => {
            state.mark_dirty();
            vec![Effect::FetchPage(fetch)]
        }
        None => Vec::new(),
    }
}
