//! Domain types shared across the export pipeline.

pub mod datapoint;
pub mod item;
pub mod request;
pub mod timestamp;

pub use datapoint::{render_scalar, Datapoint, ExportResult};
pub use item::ItemName;
pub use request::{ExportRequest, FileFormat};
pub use timestamp::UtcInstant;
