//! services/client/src/adapters/score.rs
//!
//! This module contains the adapter for the shared score document held in the
//! hosted document store. It implements the `ScoreStore` port and provides the
//! polling watcher that feeds live snapshots to subscribers.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::json;
use skimmly_core::ports::{PortError, PortResult, ScoreSnapshot, ScoreStore};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Collection and document id of the score document.
pub const SCORE_DOCUMENT_PATH: &str = "app-data/scores";
const SCORE_FIELD: &str = "totalScore";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

pub struct FirestoreScoreAdapter {
    client: Client,
    document_url: Option<String>,
    api_key: Option<String>,
    snapshots: watch::Sender<Option<ScoreSnapshot>>,
}

impl FirestoreScoreAdapter {
    /// Creates an adapter for `app-data/scores` in the given project.
    pub fn new(
        client: Client,
        base_url: &str,
        project_id: Option<&str>,
        api_key: Option<String>,
    ) -> Self {
        let document_url = project_id.map(|project| {
            format!(
                "{}/v1/projects/{}/databases/(default)/documents/{}",
                base_url, project, SCORE_DOCUMENT_PATH
            )
        });
        let (snapshots, _) = watch::channel(None);
        Self {
            client,
            document_url,
            api_key,
            snapshots,
        }
    }

    /// Polls the document until `cancel` fires, publishing every change.
    pub fn watch(self: Arc<Self>, interval: Duration, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            info!("Watching {} every {:?}", SCORE_DOCUMENT_PATH, interval);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        match self.read_total().await {
                            Ok(Some(total)) => self.publish(ScoreSnapshot::Present(total)),
                            Ok(None) => self.publish(ScoreSnapshot::Missing),
                            Err(e) => warn!("Failed to poll score: {}", e),
                        }
                    }
                }
            }
            debug!("Score watcher stopped");
        })
    }

    fn publish(&self, snapshot: ScoreSnapshot) {
        self.snapshots.send_if_modified(|current| {
            if *current == Some(snapshot) {
                return false;
            }
            *current = Some(snapshot);
            true
        });
    }

    fn document_url(&self) -> PortResult<&str> {
        self.document_url
            .as_deref()
            .ok_or_else(|| PortError::Unexpected("FIREBASE_PROJECT_ID is not configured".to_string()))
    }

    fn with_key(&self, request: RequestBuilder) -> RequestBuilder {
        match self.api_key.as_deref() {
            Some(key) => request.query(&[("key", key)]),
            None => request,
        }
    }

    /// Writes the total. With `must_exist`, a missing document is an error
    /// instead of being created.
    async fn put_total(&self, total: i64, must_exist: bool) -> PortResult<()> {
        let mut request = self.client.patch(self.document_url()?);
        if must_exist {
            request = request.query(&[
                ("updateMask.fieldPaths", SCORE_FIELD),
                ("currentDocument.exists", "true"),
            ]);
        }
        let body = json!({ "fields": { SCORE_FIELD: { "integerValue": total.to_string() } } });
        let response = self
            .with_key(request)
            .json(&body)
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                self.publish(ScoreSnapshot::Present(total));
                Ok(())
            }
            StatusCode::NOT_FOUND => Err(PortError::NotFound(SCORE_DOCUMENT_PATH.to_string())),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(PortError::Unexpected(format!("{} {}", status, body)))
            }
        }
    }
}

//=========================================================================================
// Wire Records
//=========================================================================================

#[derive(Deserialize)]
struct DocumentRecord {
    #[serde(default)]
    fields: HashMap<String, ValueRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValueRecord {
    /// Integers travel as decimal strings.
    integer_value: Option<String>,
    double_value: Option<f64>,
}

impl DocumentRecord {
    fn total(&self) -> PortResult<i64> {
        let value = self
            .fields
            .get(SCORE_FIELD)
            .ok_or_else(|| PortError::Unexpected(format!("score document has no {}", SCORE_FIELD)))?;
        match (&value.integer_value, value.double_value) {
            (Some(text), _) => text
                .parse()
                .map_err(|_| PortError::Unexpected(format!("invalid {}: {}", SCORE_FIELD, text))),
            (None, Some(number)) => Ok(number as i64),
            (None, None) => Err(PortError::Unexpected(format!("{} is not a number", SCORE_FIELD))),
        }
    }
}

//=========================================================================================
// `ScoreStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl ScoreStore for FirestoreScoreAdapter {
    async fn read_total(&self) -> PortResult<Option<i64>> {
        let request = self.client.get(self.document_url()?);
        let response = self
            .with_key(request)
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let record: DocumentRecord = response
                    .json()
                    .await
                    .map_err(|e| PortError::Unexpected(e.to_string()))?;
                record.total().map(Some)
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(PortError::Unexpected(format!("{} {}", status, body)))
            }
        }
    }

    async fn write_total(&self, total: i64) -> PortResult<()> {
        self.put_total(total, true).await
    }

    async fn create(&self, total: i64) -> PortResult<()> {
        self.put_total(total, false).await
    }

    fn subscribe(&self) -> watch::Receiver<Option<ScoreSnapshot>> {
        self.snapshots.subscribe()
    }
}
