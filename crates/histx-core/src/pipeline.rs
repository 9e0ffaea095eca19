//! Export pipeline: unit lookup, history fetch, serialization.

use serde::Serialize;
use serde_json::Value;
use time::UtcOffset;

use crate::backend::PersistenceClient;
use crate::csv::escape_csv_field;
use crate::domain::timestamp::{day_end_utc, day_start_utc, format_local_iso, format_utc_iso};
use crate::domain::{render_scalar, Datapoint, ExportRequest, ExportResult, FileFormat};
use crate::error::{ExportError, Stage};

const CSV_DELIMITER: char = ',';

const CSV_HEADER_FIELDS: [&str; 5] = ["Item Name", "UTC Time", "Local Time", "Value", "Unit"];

/// Orchestrates one export invocation end to end.
///
/// The three stages run strictly in order; any failure aborts the whole
/// export and a failed run produces no [`ExportResult`]. The unit lookup is
/// fail-fast: a backend that cannot answer item metadata is treated as unable
/// to answer history either, so the second call is never issued. Revisit here
/// if a missing-unit export should ever be acceptable.
///
/// Each invocation is self-contained and reentrant; there is no shared state
/// across concurrent exports.
pub struct ExportPipeline {
    client: PersistenceClient,
    local_offset: UtcOffset,
}

impl ExportPipeline {
    /// The local offset is injected once here rather than read from ambient
    /// environment state inside the formatter.
    pub fn new(client: PersistenceClient, local_offset: UtcOffset) -> Self {
        Self {
            client,
            local_offset,
        }
    }

    /// Run all three stages and hand back the finished file content.
    pub async fn run(&self, request: &ExportRequest) -> Result<ExportResult, ExportError> {
        let start = day_start_utc(request.begin);
        let end = day_end_utc(request.end);

        let unit = self.client.unit_symbol(&request.item).await?;
        let datapoints = self.client.history(&request.item, start, end).await?;

        if datapoints.is_empty() {
            return Err(ExportError::EmptyHistory {
                item: request.item.to_string(),
                start: format_utc_iso(start),
                end: format_utc_iso(end),
            });
        }

        tracing::info!(
            item = %request.item,
            rows = datapoints.len(),
            format = %request.format,
            "serializing export"
        );

        let content = match request.format {
            FileFormat::Csv => self
                .serialize_csv(request, unit.as_deref(), &datapoints)
                .into_bytes(),
            FileFormat::Json => self
                .serialize_json(request, unit, &datapoints)?
                .into_bytes(),
        };

        Ok(ExportResult {
            content,
            mime_type: request.format.mime_type(),
            filename: request.filename(),
        })
    }

    /// Emit UTF-8, comma-delimited, LF-terminated rows in backend order. All
    /// fields go through the RFC 4180 escaper except the raw scalar value,
    /// which is written verbatim and unquoted.
    fn serialize_csv(
        &self,
        request: &ExportRequest,
        unit: Option<&str>,
        datapoints: &[Datapoint],
    ) -> String {
        let mut out = String::new();

        let header = CSV_HEADER_FIELDS
            .map(|field| escape_csv_field(Some(field), CSV_DELIMITER))
            .join(",");
        out.push_str(&header);
        out.push('\n');

        for point in datapoints {
            let row = [
                escape_csv_field(Some(request.item.as_str()), CSV_DELIMITER),
                escape_csv_field(Some(&format_utc_iso(point.ts)), CSV_DELIMITER),
                escape_csv_field(
                    Some(&format_local_iso(point.ts, self.local_offset)),
                    CSV_DELIMITER,
                ),
                render_scalar(&point.value),
                escape_csv_field(unit, CSV_DELIMITER),
            ]
            .join(",");
            out.push_str(&row);
            out.push('\n');
        }

        out
    }

    /// Emit a single pretty-printed object with 2-space indentation. Struct
    /// field order below is the wire key order.
    fn serialize_json(
        &self,
        request: &ExportRequest,
        unit: Option<String>,
        datapoints: &[Datapoint],
    ) -> Result<String, ExportError> {
        let document = ExportDocument {
            item_name: request.item.as_str(),
            unit,
            begin_date: request.begin.to_string(),
            end_date: request.end.to_string(),
            datapoints: datapoints.len(),
            data: datapoints
                .iter()
                .map(|point| ExportRecord {
                    time: point.ts.unix_millis(),
                    time_utc: format_utc_iso(point.ts),
                    time_local: format_local_iso(point.ts, self.local_offset),
                    value: point.value.clone(),
                })
                .collect(),
        };

        serde_json::to_string_pretty(&document).map_err(|error| ExportError::Serialization {
            stage: Stage::Serialize,
            item: request.item.to_string(),
            source: error,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    item_name: &'a str,
    unit: Option<String>,
    begin_date: String,
    end_date: String,
    datapoints: usize,
    data: Vec<ExportRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRecord {
    /// Raw instant as epoch milliseconds.
    time: i64,
    time_utc: String,
    time_local: String,
    value: Value,
}
