//! # histx-core
//!
//! Domain types and export pipeline for histx, a tool that exports
//! historical time-series data for a named item from a persistence REST
//! backend into CSV or JSON files.
//!
//! ## Overview
//!
//! The exportable core is three small pieces plus glue:
//!
//! - **Local ISO formatter** ([`format_local_iso`]) producing
//!   `YYYY-MM-DDTHH:mm:ss±HH:MM` under an explicitly injected offset
//! - **CSV field escaper** ([`escape_csv_field`]) implementing RFC 4180
//!   quoting
//! - **Export pipeline** ([`ExportPipeline`]) fetching unit metadata and
//!   historical datapoints, deriving dual timestamp projections, and
//!   serializing the rows into the requested format
//!
//! Exports are all-or-nothing: every stage failure aborts the invocation and
//! surfaces one human-readable error, and a failed export never produces an
//! [`ExportResult`]. There are no retries, no partial results, and no shared
//! state across invocations.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`backend`] | REST client for the item/persistence endpoints |
//! | [`csv`] | RFC 4180 field quoting |
//! | [`domain`] | Domain types (ItemName, ExportRequest, Datapoint, ...) |
//! | [`error`] | Validation and export error types |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`pipeline`] | Three-stage export pipeline |
//! | [`wizard`] | Step machine collecting export parameters |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use histx_core::{
//!     Credentials, ExportPipeline, ExportRequest, FileFormat, ItemName,
//!     PersistenceClient, ReqwestHttpClient,
//! };
//! use time::{macros::date, UtcOffset};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PersistenceClient::new(
//!         "http://localhost:8080",
//!         Credentials::None,
//!         Arc::new(ReqwestHttpClient::new()),
//!     );
//!     let pipeline = ExportPipeline::new(client, UtcOffset::UTC);
//!
//!     let request = ExportRequest::new(
//!         ItemName::parse("Temperature")?,
//!         date!(2024 - 01 - 01),
//!         date!(2024 - 01 - 03),
//!         FileFormat::Csv,
//!     )?;
//!
//!     let result = pipeline.run(&request).await?;
//!     println!("{} bytes for {}", result.content.len(), result.filename);
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod csv;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod pipeline;
pub mod wizard;

pub use backend::PersistenceClient;
pub use csv::escape_csv_field;
pub use domain::timestamp::{
    day_end_utc, day_start_utc, format_local_iso, format_utc_iso, parse_date,
};
pub use domain::{
    render_scalar, Datapoint, ExportRequest, ExportResult, FileFormat, ItemName, UtcInstant,
};
pub use error::{ExportError, Stage, ValidationError};
pub use http_client::{
    Credentials, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient,
};
pub use pipeline::ExportPipeline;
pub use wizard::{ExportDraft, Wizard, WizardStep, WizardTransition};
