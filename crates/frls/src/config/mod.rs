//! Server configuration.
//!
//! Settings are split into one file per category. [`ServerSettings`]
//! aggregates the categories and handles JSON deserialization from LSP
//! initialization options and `didChangeConfiguration` payloads. Per-project
//! ignore lists live in [`project`].

pub(crate) mod indexing;
pub(crate) mod logging;
pub(crate) mod project;

use std::collections::HashMap;

use indexing::IndexingSettingsPatch;
pub use indexing::{IndexingSettings, MAX_MAX_FILE_SIZE_KB, MIN_MAX_FILE_SIZE_KB, StaleLocationPolicy};
use logging::LoggingSettingsPatch;
pub use logging::{LogLevel, LoggingSettings};
pub use project::{
    DEFAULT_IGNORE_DIRECTORIES, DEFAULT_IGNORE_FILES, IgnorePolicy, PROJECT_CONFIG_FILENAME, ProjectConfigError,
    load_ignore_policy,
};
use serde::Deserialize;
use serde_json::Value;

pub const SETTINGS_SECTION_KEY: &str = "frls";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServerSettings {
    pub indexing: IndexingSettings,
    pub logging: LoggingSettings,
}

impl ServerSettings {
    pub fn from_lsp_payload(payload: Option<&Value>) -> Self {
        let mut settings = Self::default();
        if let Some(payload) = payload {
            settings = settings.merged_with_payload(payload);
        }
        settings
    }

    pub fn merged_with_payload(
        &self,
        payload: &Value,
    ) -> Self {
        let mut merged = self.clone();

        for candidate in payload_candidates(payload) {
            if let Ok(patch) = serde_json::from_value::<ServerSettingsPatch>(candidate.clone()) {
                merged.apply_patch(patch);
            }
        }

        merged.normalize();
        merged
    }

    fn apply_patch(
        &mut self,
        patch: ServerSettingsPatch,
    ) {
        if let Some(p) = patch.indexing {
            self.indexing.apply_patch(p);
        }
        if let Some(p) = patch.logging {
            self.logging.apply_patch(p);
        }
    }

    fn normalize(&mut self) {
        self.indexing.normalize();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ServerSettingsPatch {
    indexing: Option<IndexingSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

fn payload_candidates(payload: &Value) -> Vec<Value> {
    let mut candidates = Vec::new();
    candidates.push(payload.clone());
    if let Some(scoped) = payload.get(SETTINGS_SECTION_KEY) {
        candidates.push(scoped.clone());
    }
    candidates
}

#[cfg(test)]
#[path = "../../tests/src/config/settings_tests.rs"]
mod tests;
