//! `$/progress` reporting for workspace indexing.
//!
//! ```ignore
//! let progress = IndexingProgress::begin(&client).await;
//! progress.files_indexed(25, 40).await;
//! progress.finish("40 file(s) indexed").await;
//! ```

use std::{
    panic::AssertUnwindSafe,
    sync::atomic::{AtomicU64, Ordering},
};

use futures::FutureExt;
use tower_lsp::{Client, lsp_types::*};
use tracing::{debug, warn};

static NEXT_PROGRESS_ID: AtomicU64 = AtomicU64::new(1);
const PROGRESS_TITLE: &str = "frls: Indexing";
const REPORT_EVERY_FILES: usize = 25;

/// One indexing run shown in the editor's activity indicator. Dropping it
/// without [`finish`](Self::finish) ends the run as cancelled.
pub struct IndexingProgress {
    session: Option<(Client, NumberOrString)>,
}

impl IndexingProgress {
    /// Creates the token and sends `Begin`. `Begin` goes out even when the
    /// editor rejects `window/workDoneProgress/create`.
    pub async fn begin(client: &Client) -> Self {
        let token = NumberOrString::String(format!("frls/indexing/{}", NEXT_PROGRESS_ID.fetch_add(1, Ordering::Relaxed)));

        // Detached: the response receiver has to outlive this call.
        let create_client = client.clone();
        let create_token = token.clone();
        tokio::spawn(async move {
            let params = WorkDoneProgressCreateParams {
                token: create_token,
            };
            match AssertUnwindSafe(create_client.send_request::<request::WorkDoneProgressCreate>(params))
                .catch_unwind()
                .await
            {
                Ok(Ok(())) => {},
                Ok(Err(error)) => {
                    debug!("workDoneProgress/create rejected: {error}");
                },
                Err(_) => {
                    warn!("workDoneProgress/create panicked");
                },
            }
        });

        let begin = WorkDoneProgress::Begin(WorkDoneProgressBegin {
            title: PROGRESS_TITLE.to_string(),
            cancellable: Some(false),
            message: Some("Discovering Ruby files".to_string()),
            percentage: None,
        });
        if !send(client, &token, begin).await {
            return Self {
                session: None,
            };
        }
        Self {
            session: Some((client.clone(), token)),
        }
    }

    /// Reports `done` of `total` files, throttled by [`file_count_report`].
    pub async fn files_indexed(
        &self,
        done: usize,
        total: usize,
    ) {
        if let (Some((client, token)), Some(report)) = (&self.session, file_count_report(done, total)) {
            send(client, token, WorkDoneProgress::Report(report)).await;
        }
    }

    pub async fn finish(
        mut self,
        message: impl Into<String>,
    ) {
        if let Some((client, token)) = self.session.take() {
            let end = WorkDoneProgress::End(WorkDoneProgressEnd {
                message: Some(message.into()),
            });
            send(&client, &token, end).await;
        }
    }
}

impl Drop for IndexingProgress {
    fn drop(&mut self) {
        if let Some((client, token)) = self.session.take() {
            tokio::spawn(async move {
                let end = WorkDoneProgress::End(WorkDoneProgressEnd {
                    message: Some("Cancelled".to_string()),
                });
                send(&client, &token, end).await;
            });
        }
    }
}

/// The report for `done` of `total` files, or `None` between reporting
/// steps. Every 25th file and the last one are reported.
fn file_count_report(
    done: usize,
    total: usize,
) -> Option<WorkDoneProgressReport> {
    if total == 0 || done == 0 || (done % REPORT_EVERY_FILES != 0 && done < total) {
        return None;
    }
    let done = done.min(total);
    Some(WorkDoneProgressReport {
        cancellable: Some(false),
        message: Some(format!("{done} / {total} files")),
        percentage: Some((done * 100 / total) as u32),
    })
}

/// Sends one `$/progress` notification. `false` when the client is gone.
async fn send(
    client: &Client,
    token: &NumberOrString,
    value: WorkDoneProgress,
) -> bool {
    debug!("progress {token:?}: {value:?}");
    let params = ProgressParams {
        token: token.clone(),
        value: ProgressParamsValue::WorkDone(value),
    };
    let sent = AssertUnwindSafe(client.send_notification::<notification::Progress>(params)).catch_unwind().await;
    if sent.is_err() {
        warn!("progress notification panicked (client may have disconnected)");
    }
    sent.is_ok()
}

#[cfg(test)]
#[path = "../tests/src/progress_tests.rs"]
mod tests;
