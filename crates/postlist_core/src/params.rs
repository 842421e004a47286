//! Query parameter state and the stores that persist it.
//!
//! Parameters are plain name/value strings. An empty value is never kept:
//! setting a parameter to `""` or `None` removes it.

use url::form_urlencoded;
use url::Url;

/// Ordered set of named string parameters, as found in a URL query string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `a=1&b=2` (a leading `?` is accepted). Empty values are dropped,
    /// and only the first occurrence of a repeated name is kept.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::new();
        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            if params.get(&name).is_none() {
                params.set(&name, Some(value.as_ref()));
            }
        }
        params
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets or removes `name`. Returns `true` when the stored state changed.
    pub fn set(&mut self, name: &str, value: Option<&str>) -> bool {
        match value.filter(|v| !v.is_empty()) {
            Some(value) => match self.pairs.iter_mut().find(|(key, _)| key == name) {
                Some((_, existing)) if existing == value => false,
                Some((_, existing)) => {
                    *existing = value.to_string();
                    true
                }
                None => {
                    self.pairs.push((name.to_string(), value.to_string()));
                    true
                }
            },
            None => {
                let before = self.pairs.len();
                self.pairs.retain(|(key, _)| key != name);
                before != self.pairs.len()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serializes without a leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.pairs {
            serializer.append_pair(name, value);
        }
        serializer.finish()
    }
}

/// External sink for query parameters.
///
/// Writes replace the current state in place; they never add history
/// entries.
pub trait ParamStore {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&mut self, name: &str, value: Option<&str>);
    fn snapshot(&self) -> QueryParams;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryParamStore {
    params: QueryParams,
    writes: usize,
}

impl MemoryParamStore {
    pub fn new(params: QueryParams) -> Self {
        Self { params, writes: 0 }
    }

    /// Number of `set` calls that changed the stored state.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ParamStore for MemoryParamStore {
    fn get(&self, name: &str) -> Option<String> {
        self.params.get(name).map(ToOwned::to_owned)
    }

    fn set(&mut self, name: &str, value: Option<&str>) {
        if self.params.set(name, value) {
            self.writes += 1;
        }
    }

    fn snapshot(&self) -> QueryParams {
        self.params.clone()
    }
}

/// Parameter store backed by a navigable URL history.
///
/// `set` rewrites the query of the current entry; only [`navigate`] adds
/// entries, and [`back`] walks them.
///
/// [`navigate`]: UrlParamStore::navigate
/// [`back`]: UrlParamStore::back
#[derive(Debug, Clone)]
pub struct UrlParamStore {
    history: Vec<Url>,
}

impl UrlParamStore {
    pub fn new(url: Url) -> Self {
        Self { history: vec![url] }
    }

    pub fn current(&self) -> &Url {
        // `history` is never empty: `back` keeps the first entry.
        &self.history[self.history.len() - 1]
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn navigate(&mut self, url: Url) {
        self.history.push(url);
    }

    /// Steps back one entry. Returns the parameters now in effect, or `None`
    /// when already at the first entry.
    pub fn back(&mut self) -> Option<QueryParams> {
        if self.history.len() <= 1 {
            return None;
        }
        self.history.pop();
        Some(self.snapshot())
    }

    fn replace_query(&mut self, params: &QueryParams) {
        let last = self.history.len() - 1;
        let url = &mut self.history[last];
        if params.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&params.to_query_string()));
        }
    }
}

impl ParamStore for UrlParamStore {
    fn get(&self, name: &str) -> Option<String> {
        self.snapshot().get(name).map(ToOwned::to_owned)
    }

    fn set(&mut self, name: &str, value: Option<&str>) {
        let mut params = self.snapshot();
        if params.set(name, value) {
            self.replace_query(&params);
        }
    }

    fn snapshot(&self) -> QueryParams {
        QueryParams::parse(self.current().query().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_never_stored() {
        let mut params = QueryParams::parse("q=&sort=oldest");
        assert_eq!(params.get("q"), None);
        assert!(params.set("q", Some("cats")));
        assert!(params.set("q", Some("")));
        assert_eq!(params.get("q"), None);
        assert_eq!(params.to_query_string(), "sort=oldest");
    }

    #[test]
    fn setting_the_same_value_is_not_a_change() {
        let mut params = QueryParams::new();
        assert!(params.set("sort", Some("newest")));
        assert!(!params.set("sort", Some("newest")));
        assert!(!params.set("q", None));
    }

    #[test]
    fn query_strings_round_trip_with_encoding() {
        let mut params = QueryParams::new();
        params.set("q", Some("cats & dogs"));
        let encoded = params.to_query_string();
        assert_eq!(encoded, "q=cats+%26+dogs");
        assert_eq!(QueryParams::parse(&format!("?{encoded}")), params);
    }

    #[test]
    fn url_store_replaces_instead_of_pushing() {
        let url = Url::parse("https://blog.example/posts?sort=oldest").unwrap();
        let mut store = UrlParamStore::new(url);
        store.set("q", Some("c"));
        store.set("q", Some("ca"));
        store.set("q", Some("cat"));
        assert_eq!(store.history_len(), 1);
        assert_eq!(store.current().query(), Some("sort=oldest&q=cat"));

        store.set("q", None);
        store.set("sort", None);
        assert_eq!(store.current().as_str(), "https://blog.example/posts");
    }

    #[test]
    fn url_store_back_returns_previous_params() {
        let mut store = UrlParamStore::new(Url::parse("https://blog.example/posts?q=a").unwrap());
        store.navigate(Url::parse("https://blog.example/posts?q=b").unwrap());
        assert_eq!(store.get("q").as_deref(), Some("b"));
        let previous = store.back().unwrap();
        assert_eq!(previous.get("q"), Some("a"));
        assert!(store.back().is_none());
    }
}
