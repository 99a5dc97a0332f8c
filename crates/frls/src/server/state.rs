use std::{panic::AssertUnwindSafe, path::PathBuf, sync::Arc};

use futures::FutureExt;
use tokio::sync::RwLock;
use tower_lsp::{
    Client,
    lsp_types::{MessageType, WorkspaceFolder},
};
use tracing::{error, info, warn};

use crate::{
    analysis::Analysis,
    config::ServerSettings,
    progress::IndexingProgress,
    server::discovery::discover_ruby_files,
    vfs::FileId,
};

const CLIENT_NOTIFICATION_PREFIX: &str = "frls:";

/// The frls backend that implements the Language Server Protocol.
pub struct RubyLanguageServer {
    /// The LSP client handle, used to send notifications back.
    pub(crate) client: Client,

    /// Sources, symbol index and grammar. Notifications that mutate take the
    /// write lock; queries take the read lock.
    pub(crate) analysis: Arc<RwLock<Analysis>>,

    /// Workspace root folders, populated during `initialize`.
    pub(crate) workspace_roots: RwLock<Vec<WorkspaceFolder>>,

    /// Runtime server settings updated from LSP configuration.
    pub(crate) settings: Arc<RwLock<ServerSettings>>,
}

impl RubyLanguageServer {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            analysis: Arc::new(RwLock::new(Analysis::new())),
            workspace_roots: RwLock::new(Vec::new()),
            settings: Arc::new(RwLock::new(ServerSettings::default())),
        }
    }

    pub(crate) async fn settings_snapshot(&self) -> ServerSettings {
        self.settings.read().await.clone()
    }

    pub(crate) async fn apply_settings(
        &self,
        settings: ServerSettings,
    ) {
        self.analysis.write().await.set_stale_locations(settings.indexing.stale_locations);
        *self.settings.write().await = settings;
    }

    pub(crate) async fn workspace_root_paths(&self) -> Vec<PathBuf> {
        self.workspace_roots.read().await.iter().filter_map(|folder| folder.uri.to_file_path().ok()).collect()
    }

    /// Discover and ingest every Ruby file under the workspace roots.
    ///
    /// The disk walk runs on the blocking pool; ingestion then happens under a
    /// single write lock so queries never see a half-indexed workspace.
    pub(crate) async fn index_workspace(&self) {
        let settings = self.settings_snapshot().await;
        if !settings.indexing.enable {
            info!("skipping workspace discovery because frls.indexing.enable=false");
            return;
        }
        let roots = self.workspace_root_paths().await;
        if roots.is_empty() {
            info!("no workspace roots; skipping discovery");
            return;
        }

        let progress = IndexingProgress::begin(&self.client).await;
        let indexing = settings.indexing.clone();
        let files = match tokio::task::spawn_blocking(move || discover_ruby_files(&roots, &indexing)).await {
            Ok(files) => files,
            Err(err) => {
                error!("workspace discovery failed: {err}");
                progress.finish("Discovery failed").await;
                return;
            },
        };

        let total = files.len();
        let mut indexed = 0usize;
        {
            let mut analysis = self.analysis.write().await;
            for (done, file) in files.into_iter().enumerate() {
                if analysis.discover(FileId::from_path(&file.path), file.text) {
                    indexed += 1;
                }
                progress.files_indexed(done + 1, total).await;
            }
            info!(
                "workspace indexed: {indexed} file(s), {} name(s), {} location(s)",
                analysis.index().len(),
                analysis.index().location_count()
            );
        }

        progress.finish(format!("{indexed} file(s) indexed")).await;
        self.log_to_client(MessageType::INFO, format!("Indexed {indexed} Ruby file(s)")).await;
    }

    /// `window/logMessage`, filtered by `frls.logging.level`.
    pub(crate) async fn log_to_client(
        &self,
        typ: MessageType,
        message: impl AsRef<str>,
    ) {
        let level = self.settings.read().await.logging.level;
        if !level.allows(typ) {
            return;
        }
        let result =
            AssertUnwindSafe(self.client.log_message(typ, prefixed_client_message(message))).catch_unwind().await;
        if result.is_err() {
            warn!("log_message panicked (client may have disconnected)");
        }
    }
}

pub(crate) fn prefixed_client_message(message: impl AsRef<str>) -> String {
    format!("{CLIENT_NOTIFICATION_PREFIX} {}", message.as_ref())
}
