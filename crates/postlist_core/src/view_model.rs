use crate::{FetchFailure, NoticeLevel, PostId, Sort};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostListViewModel {
    pub search_input: String,
    pub sort: Sort,
    /// Keyed by position; ids may repeat.
    pub rows: Vec<PostRowView>,
    pub show_skeleton: bool,
    pub show_more_skeleton: bool,
    pub error: Option<FetchFailure>,
    pub is_empty: bool,
    pub show_end_message: bool,
    pub load_more_disabled: bool,
    pub dialog: Option<DialogView>,
    pub notifications: Vec<(NoticeLevel, String)>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRowView {
    pub index: usize,
    pub id: PostId,
    pub title: String,
    pub author: String,
    pub created_at: String,
    pub excerpt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogView {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
    pub running: bool,
}
