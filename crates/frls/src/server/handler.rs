use tower_lsp::{LanguageServer, jsonrpc::Result, lsp_types::*};
use tracing::{debug, info, warn};

use crate::{
    config::ServerSettings,
    ide::lsp::{locations_to_lsp, lsp_position_to_ide},
    server::state::RubyLanguageServer,
    vfs::FileId,
};

#[tower_lsp::async_trait]
impl LanguageServer for RubyLanguageServer {
    async fn initialize(
        &self,
        params: InitializeParams,
    ) -> Result<InitializeResult> {
        info!("Initializing frls...");

        let initial_settings = ServerSettings::from_lsp_payload(params.initialization_options.as_ref());
        self.apply_settings(initial_settings).await;

        if let Some(folders) = params.workspace_folders {
            *self.workspace_roots.write().await = folders;
        } else if let Some(root) = params.root_uri {
            *self.workspace_roots.write().await = vec![WorkspaceFolder {
                uri: root,
                name: "root".to_string(),
            }];
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(TextDocumentSyncOptions {
                    open_close: Some(true),
                    change: Some(TextDocumentSyncKind::FULL),
                    ..Default::default()
                })),
                definition_provider: Some(OneOf::Left(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "frls".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(
        &self,
        _: InitializedParams,
    ) {
        info!("frls initialized");
        self.index_workspace().await;
    }

    async fn did_change_configuration(
        &self,
        params: DidChangeConfigurationParams,
    ) {
        let current = self.settings_snapshot().await;
        let merged = current.merged_with_payload(&params.settings);
        if merged == current {
            return;
        }
        self.apply_settings(merged).await;
        info!("Applied updated frls settings");
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down frls");
        Ok(())
    }

    async fn did_open(
        &self,
        params: DidOpenTextDocumentParams,
    ) {
        let document = params.text_document;
        let file = FileId::from_url(&document.uri);
        let opened = self.analysis.write().await.open(file.clone(), &document.language_id, document.text);
        if opened {
            self.log_to_client(MessageType::INFO, format!("Opened {}", short_name(&file))).await;
        }
    }

    async fn did_change(
        &self,
        params: DidChangeTextDocumentParams,
    ) {
        let file = FileId::from_url(&params.text_document.uri);
        let texts: Vec<String> = params
            .content_changes
            .into_iter()
            .map(|change| {
                if change.range.is_some() {
                    warn!("ranged change for {file} treated as a full replacement");
                }
                change.text
            })
            .collect();

        let applied = self.analysis.write().await.apply_changes(&file, texts);
        debug!("applied {applied} change(s) to {file}");
    }

    async fn did_close(
        &self,
        params: DidCloseTextDocumentParams,
    ) {
        let file = FileId::from_url(&params.text_document.uri);
        self.analysis.write().await.close(&file);
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let file = FileId::from_url(&params.text_document_position_params.text_document.uri);
        let position = lsp_position_to_ide(params.text_document_position_params.position);

        let locations = self.analysis.read().await.resolve_definition(&file, position);
        debug!(
            "goto-def {}:{}:{} -> {} location(s)",
            short_name(&file),
            position.line + 1,
            position.character + 1,
            locations.len()
        );
        Ok(locations_to_lsp(locations))
    }
}

fn short_name(file: &FileId) -> &str {
    file.as_str().rsplit('/').next().unwrap_or(file.as_str())
}
