#![allow(dead_code)]

use std::{path::PathBuf, time::Duration};

use frls::RubyLanguageServer;
use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tower::{Service, ServiceExt};
use tower_lsp::{
    ClientSocket, LspService,
    jsonrpc::{Request, Response},
    lsp_types::{
        GotoDefinitionParams, GotoDefinitionResponse, InitializedParams, Location, PartialResultParams, Position,
        TextDocumentIdentifier, TextDocumentPositionParams, Url, WorkDoneProgressParams,
    },
};

pub fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/project")
}

pub fn fixture_root_uri() -> Url {
    Url::from_directory_path(fixture_root()).expect("fixture root is valid file:// URI")
}

pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixture_root().join(relative_path)
}

pub fn fixture_uri(relative_path: &str) -> Url {
    Url::from_file_path(fixture_path(relative_path)).expect("fixture path is valid file:// URI")
}

pub fn read_fixture(relative_path: &str) -> String {
    std::fs::read_to_string(fixture_path(relative_path)).expect("fixture must exist")
}

/// Position of the first byte of `needle`. Columns are bytes, which equals
/// UTF-16 units for the ASCII fixtures.
pub fn position_of(
    source: &str,
    needle: &str,
) -> Position {
    position_of_nth(source, needle, 0)
}

pub fn position_of_nth(
    source: &str,
    needle: &str,
    nth: usize,
) -> Position {
    assert!(!needle.is_empty(), "needle must not be empty");
    let mut from = 0usize;
    let mut current = 0usize;

    loop {
        let Some(idx) = source[from..].find(needle) else {
            panic!("needle not found: {needle}");
        };
        let absolute = from + idx;
        if current == nth {
            let before = &source[..absolute];
            let line = before.as_bytes().iter().filter(|&&b| b == b'\n').count() as u32;
            let col = before.rsplit_once('\n').map(|(_, tail)| tail.len() as u32).unwrap_or(before.len() as u32);
            return Position::new(line, col);
        }
        current += 1;
        from = absolute + needle.len();
    }
}

/// In-process server plus the client half of its socket. Every call pumps
/// the socket so server-to-client traffic never blocks the handler.
pub struct LspHarness {
    pub service: LspService<RubyLanguageServer>,
    pub socket: ClientSocket,
    /// Notifications the server sent to the client, in order.
    pub notifications: Vec<Request>,
    /// Methods of requests the server sent to the client.
    pub server_requests: Vec<String>,
    next_id: i64,
}

impl LspHarness {
    pub async fn initialize(initialize_params: Value) -> Self {
        let (service, socket) = LspService::new(RubyLanguageServer::new);
        let mut harness = Self {
            service,
            socket,
            notifications: Vec::new(),
            server_requests: Vec::new(),
            next_id: 1,
        };

        let response = harness.request("initialize", initialize_params).await;
        let (_, result) = response.into_parts();
        let result = result.expect("initialize should succeed");
        assert_eq!(result["serverInfo"]["name"], json!("frls"));

        harness.notify("initialized", InitializedParams {}).await;
        harness
    }

    /// Initialize with the fixture project as the only workspace folder.
    pub async fn with_fixture_workspace(settings: Value) -> Self {
        Self::initialize(json!({
            "capabilities": {},
            "workspaceFolders": [{ "uri": fixture_root_uri(), "name": "project" }],
            "initializationOptions": { "frls": settings }
        }))
        .await
    }

    pub async fn notify<P: serde::Serialize>(
        &mut self,
        method: &'static str,
        params: P,
    ) {
        let request =
            Request::build(method).params(serde_json::to_value(params).expect("serialize notification params")).finish();
        let response = self.call(request).await;
        assert!(response.is_none(), "{method} should be handled as notification");
    }

    pub async fn request<P: serde::Serialize>(
        &mut self,
        method: &'static str,
        params: P,
    ) -> Response {
        let id = self.next_id;
        self.next_id += 1;
        let request = Request::build(method)
            .params(serde_json::to_value(params).expect("serialize request params"))
            .id(id)
            .finish();
        self.call(request).await.expect("request should return response")
    }

    pub async fn goto_definition(
        &mut self,
        relative_path: &str,
        position: Position,
    ) -> Option<GotoDefinitionResponse> {
        let params = GotoDefinitionParams {
            text_document_position_params: TextDocumentPositionParams {
                text_document: TextDocumentIdentifier {
                    uri: fixture_uri(relative_path),
                },
                position,
            },
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
        };
        let response = self.request("textDocument/definition", params).await;
        let (_, result) = response.into_parts();
        serde_json::from_value(result.expect("definition should succeed")).expect("definition response shape")
    }

    /// Drain server messages that were queued after the last call returned.
    pub async fn settle(&mut self) {
        while let Ok(Some(req)) = tokio::time::timeout(Duration::from_millis(200), self.socket.next()).await {
            if let Some(id) = req.id().cloned() {
                self.server_requests.push(req.method().to_string());
                self.socket.send(Response::from_ok(id, json!(null))).await.expect("failed to send synthetic client response");
            } else {
                self.notifications.push(req);
            }
        }
    }

    pub fn notification_methods(&self) -> Vec<&str> {
        self.notifications.iter().map(Request::method).collect()
    }

    async fn call(
        &mut self,
        request: Request,
    ) -> Option<Response> {
        let Self {
            service,
            socket,
            notifications,
            server_requests,
            ..
        } = self;
        let mut call_fut =
            Box::pin(async { service.ready().await.expect("service ready").call(request).await.expect("service call") });

        loop {
            tokio::select! {
                response = &mut call_fut => return response,
                maybe_req = tokio::time::timeout(Duration::from_secs(20), socket.next()) => {
                    let maybe_req = maybe_req.expect("timed out waiting for server message");
                    let req = maybe_req.expect("client socket unexpectedly closed");
                    if let Some(id) = req.id().cloned() {
                        server_requests.push(req.method().to_string());
                        socket
                            .send(Response::from_ok(id, json!(null)))
                            .await
                            .expect("failed to send synthetic client response");
                    } else {
                        notifications.push(req);
                    }
                }
            }
        }
    }
}

pub fn locations(response: Option<GotoDefinitionResponse>) -> Vec<Location> {
    match response {
        None => Vec::new(),
        Some(GotoDefinitionResponse::Scalar(location)) => vec![location],
        Some(GotoDefinitionResponse::Array(locations)) => locations,
        Some(GotoDefinitionResponse::Link(links)) => links
            .into_iter()
            .map(|link| Location {
                uri: link.target_uri,
                range: link.target_selection_range,
            })
            .collect(),
    }
}
