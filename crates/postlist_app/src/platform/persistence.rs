use std::path::Path;

use postlist_core::{ParamStore, QueryParams};
use postlist_engine::StateFile;
use postlist_logging::{postlist_error, postlist_info, postlist_warn};
use serde::{Deserialize, Serialize};

pub const STATE_FILENAME: &str = ".postlist_state.ron";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedParams {
    params: Vec<(String, String)>,
}

/// Query parameters kept in a RON file under the state directory.
///
/// Stands in for the address bar of a browser: every write replaces the
/// stored parameters, so they survive a restart.
pub struct FileParamStore {
    params: QueryParams,
    file: StateFile,
}

impl FileParamStore {
    /// Loads the stored parameters; a missing or unreadable file starts empty.
    pub fn open(state_dir: &Path) -> Self {
        let file = StateFile::new(state_dir, STATE_FILENAME);
        Self {
            params: load_params(&file),
            file,
        }
    }

    /// Swaps in a whole new parameter set, as when following a link.
    pub fn replace_all(&mut self, params: QueryParams) {
        if self.params != params {
            self.params = params;
            self.save();
        }
    }

    fn save(&self) {
        let state = PersistedParams {
            params: self
                .params
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        };
        let pretty = ron::ser::PrettyConfig::new();
        let content = match ron::ser::to_string_pretty(&state, pretty) {
            Ok(text) => text,
            Err(err) => {
                postlist_error!("Failed to serialize query parameters: {}", err);
                return;
            }
        };
        if let Err(err) = self.file.replace(&content) {
            postlist_error!("Failed to store query parameters: {}", err);
        }
    }
}

impl ParamStore for FileParamStore {
    fn get(&self, name: &str) -> Option<String> {
        self.params.get(name).map(ToOwned::to_owned)
    }

    fn set(&mut self, name: &str, value: Option<&str>) {
        if self.params.set(name, value) {
            self.save();
        }
    }

    fn snapshot(&self) -> QueryParams {
        self.params.clone()
    }
}

fn load_params(file: &StateFile) -> QueryParams {
    let path = file.path();
    let content = match file.read() {
        Ok(Some(text)) => text,
        Ok(None) => return QueryParams::new(),
        Err(err) => {
            postlist_warn!("Failed to read query parameters: {}", err);
            return QueryParams::new();
        }
    };

    let state: PersistedParams = match ron::from_str(&content) {
        Ok(state) => state,
        Err(err) => {
            postlist_warn!("Failed to parse query parameters from {:?}: {}", path, err);
            return QueryParams::new();
        }
    };

    let mut params = QueryParams::new();
    for (name, value) in &state.params {
        if params.get(name).is_none() {
            params.set(name, Some(value.as_str()));
        }
    }
    postlist_info!("Loaded query parameters from {:?}", path);
    params
}
