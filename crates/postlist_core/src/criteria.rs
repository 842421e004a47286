use std::fmt;
use std::str::FromStr;

use crate::params::QueryParams;

/// Parameter carrying the free-text search.
pub const PARAM_QUERY: &str = "q";
/// Parameter carrying the sort order.
pub const PARAM_SORT: &str = "sort";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sort {
    #[default]
    Newest,
    Oldest,
}

impl Sort {
    pub fn as_str(self) -> &'static str {
        match self {
            Sort::Newest => "newest",
            Sort::Oldest => "oldest",
        }
    }

    /// Lenient parse: anything unrecognized falls back to `Newest`.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSort(pub String);

impl fmt::Display for UnknownSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sort order `{}`", self.0)
    }
}

impl std::error::Error for UnknownSort {}

impl FromStr for Sort {
    type Err = UnknownSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Sort::Newest),
            "oldest" => Ok(Sort::Oldest),
            other => Err(UnknownSort(other.to_string())),
        }
    }
}

/// What the list is filtered and ordered by. Derived from query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SearchCriteria {
    pub query: String,
    pub sort: Sort,
}

impl SearchCriteria {
    pub fn new(query: impl Into<String>, sort: Sort) -> Self {
        Self {
            query: query.into(),
            sort,
        }
    }

    pub fn from_params(params: &QueryParams) -> Self {
        Self {
            query: params.get(PARAM_QUERY).unwrap_or_default().to_string(),
            sort: Sort::parse_lenient(params.get(PARAM_SORT)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_params_are_absent() {
        let criteria = SearchCriteria::from_params(&QueryParams::new());
        assert_eq!(criteria, SearchCriteria::new("", Sort::Newest));
    }

    #[test]
    fn unknown_sort_falls_back_to_newest() {
        let params = QueryParams::parse("q=cats&sort=sideways");
        let criteria = SearchCriteria::from_params(&params);
        assert_eq!(criteria.query, "cats");
        assert_eq!(criteria.sort, Sort::Newest);
    }

    #[test]
    fn sort_parses_case_insensitively() {
        assert_eq!("Oldest".parse::<Sort>(), Ok(Sort::Oldest));
        assert!("".parse::<Sort>().is_err());
    }
}
