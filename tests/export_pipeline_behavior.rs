//! Behavior tests for the three-stage export pipeline: strict stage order,
//! whole-day UTC bounds, all-or-nothing failure semantics, and exact output
//! bytes.

use std::sync::Arc;

use histx_core::{
    Credentials, ExportError, ExportPipeline, ExportRequest, FileFormat, HttpError, HttpResponse,
    ItemName, PersistenceClient, Stage,
};
use histx_tests::{unit_response, unitless_response, ScriptedHttpClient};
use time::macros::date;
use time::UtcOffset;

fn pipeline(client: Arc<ScriptedHttpClient>, offset: UtcOffset) -> ExportPipeline {
    let backend = PersistenceClient::new("http://backend.test", Credentials::None, client);
    ExportPipeline::new(backend, offset)
}

fn request(format: FileFormat) -> ExportRequest {
    ExportRequest::new(
        ItemName::parse("Temperature").expect("valid item"),
        date!(2024 - 01 - 01),
        date!(2024 - 01 - 03),
        format,
    )
    .expect("valid request")
}

fn two_point_history() -> HttpResponse {
    HttpResponse::ok_json(
        "{\"name\":\"Temperature\",\"data\":[\
         {\"time\":1704103200000,\"state\":21.5},\
         {\"time\":1704106800000,\"state\":22}]}",
    )
}

#[tokio::test]
async fn csv_export_matches_expected_bytes() {
    let client = Arc::new(ScriptedHttpClient::new(vec![
        Ok(unit_response("°C")),
        Ok(two_point_history()),
    ]));
    let pipeline = pipeline(Arc::clone(&client), UtcOffset::UTC);

    let result = pipeline
        .run(&request(FileFormat::Csv))
        .await
        .expect("export should succeed");

    let expected = "Item Name,UTC Time,Local Time,Value,Unit\n\
                    Temperature,2024-01-01T10:00:00.000Z,2024-01-01T10:00:00+00:00,21.5,°C\n\
                    Temperature,2024-01-01T11:00:00.000Z,2024-01-01T11:00:00+00:00,22,°C\n";
    assert_eq!(String::from_utf8(result.content).expect("utf-8"), expected);
    assert_eq!(result.mime_type, "text/csv");
    assert_eq!(result.filename, "Temperature_2024-01-01_to_2024-01-03");
}

#[tokio::test]
async fn history_request_carries_whole_day_utc_bounds() {
    let client = Arc::new(ScriptedHttpClient::new(vec![
        Ok(unit_response("°C")),
        Ok(two_point_history()),
    ]));
    let pipeline = pipeline(Arc::clone(&client), UtcOffset::UTC);

    pipeline
        .run(&request(FileFormat::Csv))
        .await
        .expect("export should succeed");

    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url, "http://backend.test/rest/items/Temperature");
    assert_eq!(
        requests[1].url,
        "http://backend.test/rest/persistence/items/Temperature\
         ?starttime=2024-01-01T00%3A00%3A00.000Z&endtime=2024-01-03T23%3A59%3A59.999Z"
    );
}

#[tokio::test]
async fn json_export_has_stable_shape_and_local_projection() {
    let history = HttpResponse::ok_json(
        "{\"data\":[{\"time\":\"2024-01-01T10:00:00.000Z\",\"state\":\"ON\"}]}",
    );
    let client = Arc::new(ScriptedHttpClient::new(vec![
        Ok(unitless_response()),
        Ok(history),
    ]));
    let east = UtcOffset::from_hms(2, 0, 0).expect("valid offset");
    let pipeline = pipeline(client, east);

    let result = pipeline
        .run(&request(FileFormat::Json))
        .await
        .expect("export should succeed");
    assert_eq!(result.mime_type, "application/json");

    let text = String::from_utf8(result.content).expect("utf-8");
    // 2-space pretty printing with the documented key order.
    assert!(text.starts_with("{\n  \"itemName\""), "got: {text}");
    let position = |key: &str| text.find(key).unwrap_or_else(|| panic!("missing {key}"));
    assert!(position("\"itemName\"") < position("\"unit\""));
    assert!(position("\"unit\"") < position("\"beginDate\""));
    assert!(position("\"beginDate\"") < position("\"endDate\""));
    assert!(position("\"endDate\"") < position("\"datapoints\""));
    assert!(position("\"datapoints\"") < position("\"data\""));

    let document: serde_json::Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(document["itemName"], "Temperature");
    assert_eq!(document["unit"], serde_json::Value::Null);
    assert_eq!(document["beginDate"], "2024-01-01");
    assert_eq!(document["endDate"], "2024-01-03");
    assert_eq!(document["datapoints"], 1);
    assert_eq!(document["data"][0]["time"], 1_704_103_200_000_i64);
    assert_eq!(document["data"][0]["timeUtc"], "2024-01-01T10:00:00.000Z");
    assert_eq!(document["data"][0]["timeLocal"], "2024-01-01T12:00:00+02:00");
    assert_eq!(document["data"][0]["value"], "ON");
}

#[tokio::test]
async fn zero_datapoints_abort_with_an_error_naming_the_range() {
    let client = Arc::new(ScriptedHttpClient::new(vec![
        Ok(unit_response("°C")),
        Ok(HttpResponse::ok_json("{\"data\":[]}")),
    ]));
    let pipeline = pipeline(client, UtcOffset::UTC);

    let err = pipeline
        .run(&request(FileFormat::Csv))
        .await
        .expect_err("empty history must abort");

    assert!(matches!(err, ExportError::EmptyHistory { .. }));
    let message = err.to_string();
    assert!(message.contains("Temperature"));
    assert!(message.contains("2024-01-01T00:00:00.000Z"));
    assert!(message.contains("2024-01-03T23:59:59.999Z"));
}

#[tokio::test]
async fn failed_unit_lookup_aborts_before_the_history_call() {
    let client = Arc::new(ScriptedHttpClient::new(vec![Ok(HttpResponse {
        status: 500,
        body: String::new(),
    })]));
    let pipeline = pipeline(Arc::clone(&client), UtcOffset::UTC);

    let err = pipeline
        .run(&request(FileFormat::Csv))
        .await
        .expect_err("unit lookup failure must abort");

    assert!(matches!(
        err,
        ExportError::Status {
            stage: Stage::UnitLookup,
            status: 500,
            ..
        }
    ));
    assert_eq!(client.recorded_requests().len(), 1);
}

#[tokio::test]
async fn transport_failure_surfaces_stage_and_item() {
    let client = Arc::new(ScriptedHttpClient::new(vec![Err(HttpError::new(
        "connection refused",
    ))]));
    let pipeline = pipeline(client, UtcOffset::UTC);

    let err = pipeline
        .run(&request(FileFormat::Csv))
        .await
        .expect_err("transport failure must abort");

    let message = err.to_string();
    assert!(message.contains("unit lookup"));
    assert!(message.contains("Temperature"));
    assert!(message.contains("connection refused"));
}

#[tokio::test]
async fn history_failure_surfaces_after_a_successful_unit_lookup() {
    let client = Arc::new(ScriptedHttpClient::new(vec![
        Ok(unit_response("°C")),
        Ok(HttpResponse {
            status: 404,
            body: String::new(),
        }),
    ]));
    let pipeline = pipeline(client, UtcOffset::UTC);

    let err = pipeline
        .run(&request(FileFormat::Csv))
        .await
        .expect_err("history failure must abort");

    assert!(matches!(
        err,
        ExportError::Status {
            stage: Stage::HistoryFetch,
            status: 404,
            ..
        }
    ));
}
