use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use crate::debounce::DEFAULT_DEBOUNCE;
use crate::view_model::{DialogView, PostListViewModel, PostRowView};
use crate::{
    ConfirmDialog, DeleteFailure, ListController, QueryParams, ScrollSentinel, SearchBar,
};

/// Default number of posts requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Notifications kept at once; older ones are dropped first.
pub const NOTIFICATION_LIMIT: usize = 3;

const EXCERPT_CHARS: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreConfig {
    pub debounce_delay: Duration,
    pub page_size: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            debounce_delay: DEFAULT_DEBOUNCE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    PostDeleted,
    DeleteFailed(DeleteFailure),
}

impl Notification {
    pub fn level(&self) -> NoticeLevel {
        match self {
            Notification::PostDeleted => NoticeLevel::Info,
            Notification::DeleteFailed(_) => NoticeLevel::Danger,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::PostDeleted => write!(f, "Post deleted"),
            Notification::DeleteFailed(failure) => match failure.code.as_deref() {
                Some(code) if !code.is_empty() => {
                    write!(f, "Could not delete the post: {code}")
                }
                _ => write!(f, "Something went wrong, please try again"),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub(crate) config: CoreConfig,
    pub(crate) params: QueryParams,
    pub(crate) search: SearchBar,
    pub(crate) list: ListController,
    pub(crate) sentinel: ScrollSentinel,
    pub(crate) dialog: Option<ConfirmDialog>,
    pub(crate) notifications: VecDeque<Notification>,
    pub(crate) mounted: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(CoreConfig::default())
    }

    pub fn with_config(config: CoreConfig) -> Self {
        Self {
            config,
            params: QueryParams::new(),
            search: SearchBar::new(config.debounce_delay),
            list: ListController::new(config.page_size),
            sentinel: ScrollSentinel::new(),
            dialog: None,
            notifications: VecDeque::new(),
            mounted: false,
            dirty: false,
        }
    }

    pub fn config(&self) -> CoreConfig {
        self.config
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn list(&self) -> &ListController {
        &self.list
    }

    pub fn search(&self) -> &SearchBar {
        &self.search
    }

    /// The core's copy of the parameters it last wrote or was told about.
    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn dialog(&self) -> Option<&ConfirmDialog> {
        self.dialog.as_ref()
    }

    pub fn view(&self) -> PostListViewModel {
        let list = &self.list;
        let items = list.items();
        let rows = items
            .iter()
            .enumerate()
            .map(|(index, post)| PostRowView {
                index,
                id: post.id.clone(),
                title: post.title.clone(),
                author: post.author.clone(),
                created_at: post.created_at.clone(),
                excerpt: excerpt(&post.body),
            })
            .collect();
        let has_error = list.error().is_some();

        PostListViewModel {
            search_input: self.search.text().to_string(),
            sort: self.search.sort(),
            rows,
            show_skeleton: list.loading(),
            show_more_skeleton: !list.loading() && list.loading_more(),
            error: list.error().cloned(),
            is_empty: !list.loading() && items.is_empty() && !has_error,
            show_end_message: !items.is_empty() && !list.has_more(),
            load_more_disabled: list.load_more_blocked(),
            dialog: self.dialog.as_ref().map(|dialog| DialogView {
                title: dialog.title.clone(),
                message: dialog.message.clone(),
                confirm_text: dialog.confirm_text.clone(),
                cancel_text: dialog.cancel_text.clone(),
                running: dialog.is_running(),
            }),
            notifications: self
                .notifications
                .iter()
                .map(|n| (n.level(), n.to_string()))
                .collect(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a redraw is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn push_notification(&mut self, notification: Notification) {
        if self.notifications.len() == NOTIFICATION_LIMIT {
            self.notifications.pop_front();
        }
        self.notifications.push_back(notification);
    }
}

fn excerpt(body: &str) -> String {
    let line = body.lines().next().unwrap_or_default().trim();
    if line.chars().count() <= EXCERPT_CHARS {
        return line.to_string();
    }
    let mut cut: String = line.chars().take(EXCERPT_CHARS - 1).collect();
    cut.push('…');
    cut
}
