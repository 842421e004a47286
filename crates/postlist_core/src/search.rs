use std::time::Duration;

use crate::criteria::{PARAM_QUERY, PARAM_SORT};
use crate::debounce::{Debounced, SettleTimer, TimerToken};
use crate::params::QueryParams;
use crate::Sort;

/// Search text field plus sort selector.
///
/// The field text updates on every keystroke; only its settled value is
/// meant to reach the parameter store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBar {
    input: Debounced<String>,
    sort: Sort,
}

impl SearchBar {
    pub fn new(delay: Duration) -> Self {
        Self {
            input: Debounced::new(String::new(), delay),
            sort: Sort::default(),
        }
    }

    /// Rebuilds the bar from `params` for a new mount. Timer tokens keep
    /// counting from this bar, so settles scheduled before are ignored.
    pub fn successor(&self, params: &QueryParams) -> Self {
        let query = params.get(PARAM_QUERY).unwrap_or_default().to_string();
        Self {
            input: self.input.successor(query),
            sort: Sort::parse_lenient(params.get(PARAM_SORT)),
        }
    }

    /// Text currently shown in the field.
    pub fn text(&self) -> &str {
        self.input.raw()
    }

    pub fn settled_text(&self) -> &str {
        self.input.settled()
    }

    pub fn sort(&self) -> Sort {
        self.sort
    }

    pub fn settle_pending(&self) -> bool {
        self.input.is_pending()
    }

    pub fn text_changed(&mut self, text: String) -> Option<SettleTimer> {
        self.input.observe(text)
    }

    pub fn settle_elapsed(&mut self, token: TimerToken) -> Option<String> {
        self.input.elapsed(token)
    }

    /// Empties the field and settles at once. Returns `true` when the
    /// settled text changed.
    pub fn clear(&mut self) -> bool {
        self.input.force_settle(String::new())
    }

    /// Returns `true` when the selection changed.
    pub fn select_sort(&mut self, sort: Sort) -> bool {
        let changed = self.sort != sort;
        self.sort = sort;
        changed
    }

    /// Adopts parameters changed from outside (history navigation, another
    /// writer). Any pending settle is dropped.
    pub fn sync_from_params(&mut self, params: &QueryParams) {
        self.input
            .force_settle(params.get(PARAM_QUERY).unwrap_or_default().to_string());
        self.sort = Sort::parse_lenient(params.get(PARAM_SORT));
    }
}
