use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use serde_json::Value;

pub const MIN_MAX_FILE_SIZE_KB: u64 = 16;
pub const MAX_MAX_FILE_SIZE_KB: u64 = 1024 * 64;

/// What happens to a file's previously indexed locations when it is
/// reindexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StaleLocationPolicy {
    /// Keep them; the index only grows.
    #[default]
    Retain,
    /// Drop every location of the file before merging its new symbols.
    Purge,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexingSettings {
    pub enable: bool,
    pub max_file_size_kb: u64,
    pub exclude_paths: Vec<String>,
    pub stale_locations: StaleLocationPolicy,
}

impl Default for IndexingSettings {
    fn default() -> Self {
        Self {
            enable: true,
            max_file_size_kb: 512,
            exclude_paths: Vec::new(),
            stale_locations: StaleLocationPolicy::Retain,
        }
    }
}

impl IndexingSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: IndexingSettingsPatch,
    ) {
        if let Some(v) = patch.enable {
            self.enable = v;
        }
        if let Some(v) = patch.max_file_size_kb {
            self.max_file_size_kb = v;
        }
        if let Some(v) = patch.exclude_paths {
            self.exclude_paths = v;
        }
        if let Some(v) = patch.stale_locations {
            self.stale_locations = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.max_file_size_kb = self.max_file_size_kb.clamp(MIN_MAX_FILE_SIZE_KB, MAX_MAX_FILE_SIZE_KB);
        let mut seen = HashSet::new();
        self.exclude_paths = self
            .exclude_paths
            .iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .filter(|p| seen.insert(p.clone()))
            .collect();
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_kb.saturating_mul(1024)
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct IndexingSettingsPatch {
    pub(crate) enable: Option<bool>,
    pub(crate) max_file_size_kb: Option<u64>,
    pub(crate) exclude_paths: Option<Vec<String>>,
    pub(crate) stale_locations: Option<StaleLocationPolicy>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
