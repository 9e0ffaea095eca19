//! Client for the item and persistence REST endpoints consumed by the
//! export pipeline.
//!
//! The wire contract is fixed:
//!
//! - `GET {base}/rest/items/{itemName}` -> `{ "unitSymbol": "...", ... }`
//! - `GET {base}/rest/persistence/items/{itemName}?starttime={ISO}&endtime={ISO}`
//!   -> `{ "data": [{ "time": <ISO or epoch ms>, "state": <scalar> }, ...] }`
//!
//! Path segments and query values are URL-encoded; both calls send
//! `Accept: application/json` and pass credentials through opaquely.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::domain::timestamp::format_utc_iso;
use crate::domain::{Datapoint, ItemName, UtcInstant};
use crate::error::{ExportError, Stage, ValidationError};
use crate::http_client::{Credentials, HttpClient, HttpRequest};

pub struct PersistenceClient {
    base_url: String,
    credentials: Credentials,
    http: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl PersistenceClient {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Credentials,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            base_url,
            credentials,
            http,
            timeout_ms: 10_000,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Fetch item metadata and extract the optional unit symbol. An empty
    /// symbol is treated the same as an absent one.
    pub async fn unit_symbol(&self, item: &ItemName) -> Result<Option<String>, ExportError> {
        let url = format!(
            "{}/rest/items/{}",
            self.base_url,
            urlencoding::encode(item.as_str())
        );
        let body = self.get_json(Stage::UnitLookup, item, url).await?;

        let metadata: ItemMetadata =
            serde_json::from_str(&body).map_err(|error| ExportError::Malformed {
                stage: Stage::UnitLookup,
                item: item.to_string(),
                message: error.to_string(),
            })?;

        Ok(metadata.unit_symbol.filter(|unit| !unit.is_empty()))
    }

    /// Fetch historical datapoints for the inclusive UTC instant span, in the
    /// order the backend returns them.
    pub async fn history(
        &self,
        item: &ItemName,
        start: UtcInstant,
        end: UtcInstant,
    ) -> Result<Vec<Datapoint>, ExportError> {
        let url = format!(
            "{}/rest/persistence/items/{}?starttime={}&endtime={}",
            self.base_url,
            urlencoding::encode(item.as_str()),
            urlencoding::encode(&format_utc_iso(start)),
            urlencoding::encode(&format_utc_iso(end)),
        );
        let body = self.get_json(Stage::HistoryFetch, item, url).await?;

        let response: HistoryResponse =
            serde_json::from_str(&body).map_err(|error| ExportError::Malformed {
                stage: Stage::HistoryFetch,
                item: item.to_string(),
                message: error.to_string(),
            })?;

        response
            .data
            .into_iter()
            .map(|record| record.into_datapoint(item))
            .collect()
    }

    async fn get_json(
        &self,
        stage: Stage,
        item: &ItemName,
        url: String,
    ) -> Result<String, ExportError> {
        tracing::debug!(stage = stage.as_str(), item = %item, url = %url, "requesting backend");

        let request = HttpRequest::get(url)
            .accept_json()
            .with_credentials(&self.credentials)
            .with_timeout_ms(self.timeout_ms);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|error| ExportError::Transport {
                stage,
                item: item.to_string(),
                message: error.message().to_owned(),
            })?;

        if !response.is_success() {
            return Err(ExportError::Status {
                stage,
                item: item.to_string(),
                status: response.status,
            });
        }

        Ok(response.body)
    }
}

#[derive(Debug, Deserialize)]
struct ItemMetadata {
    #[serde(rename = "unitSymbol", default)]
    unit_symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    data: Vec<HistoryRecord>,
}

/// One record of the persistence response. `time` arrives as either an
/// RFC3339 string or epoch milliseconds depending on the backend version.
#[derive(Debug, Deserialize)]
struct HistoryRecord {
    time: Value,
    state: Value,
}

impl HistoryRecord {
    fn into_datapoint(self, item: &ItemName) -> Result<Datapoint, ExportError> {
        let ts = parse_instant(&self.time).map_err(|error| ExportError::Malformed {
            stage: Stage::HistoryFetch,
            item: item.to_string(),
            message: error.to_string(),
        })?;
        Ok(Datapoint::new(ts, self.state))
    }
}

fn parse_instant(value: &Value) -> Result<UtcInstant, ValidationError> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .ok_or_else(|| ValidationError::InvalidTimestamp {
                value: number.to_string(),
            })
            .and_then(UtcInstant::from_unix_millis),
        Value::String(text) => UtcInstant::parse(text),
        other => Err(ValidationError::InvalidTimestamp {
            value: other.to_string(),
        }),
    }
}
