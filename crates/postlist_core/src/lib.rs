//! Post list core: pure state machine for a searchable, sortable,
//! infinitely scrolled post list, plus view-model helpers.
mod criteria;
mod debounce;
mod dialog;
mod effect;
mod list;
mod msg;
mod params;
mod post;
mod search;
mod sentinel;
mod state;
mod update;
mod view_model;

pub use criteria::{SearchCriteria, Sort, UnknownSort, PARAM_QUERY, PARAM_SORT};
pub use debounce::{Debounced, SettleTimer, TimerToken, DEFAULT_DEBOUNCE};
pub use dialog::{ConfirmDialog, DialogAction};
pub use effect::Effect;
pub use list::{Generation, ListController, PageFetch, PageOutcome};
pub use msg::Msg;
pub use params::{MemoryParamStore, ParamStore, QueryParams, UrlParamStore};
pub use post::{
    DeleteFailure, ErrorKind, FetchFailure, Page, PageRequest, PageToken, Post, PostId,
};
pub use search::SearchBar;
pub use sentinel::ScrollSentinel;
pub use state::{
    AppState, CoreConfig, NoticeLevel, Notification, DEFAULT_PAGE_SIZE, NOTIFICATION_LIMIT,
};
pub use update::update;
pub use view_model::{DialogView, PostListViewModel, PostRowView};
