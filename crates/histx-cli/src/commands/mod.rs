mod export;
mod wizard;

use std::sync::Arc;

use histx_core::{
    Credentials, ExportPipeline, ExportRequest, PersistenceClient, ReqwestHttpClient,
};
use time::UtcOffset;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::sink::{DownloadSink, FileSink};

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Export(args) => export::run(cli, args).await,
        Command::Wizard(args) => wizard::run(cli, args).await,
    }
}

/// Run the pipeline for a finalized request and deliver the result through
/// the file sink.
pub(crate) async fn run_export(cli: &Cli, request: &ExportRequest) -> Result<(), CliError> {
    let credentials = cli
        .cookie
        .clone()
        .map(Credentials::Cookie)
        .unwrap_or_default();
    let client = PersistenceClient::new(&cli.base_url, credentials, Arc::new(ReqwestHttpClient::new()))
        .with_timeout_ms(cli.timeout_ms);
    let pipeline = ExportPipeline::new(client, local_offset());

    let result = pipeline.run(request).await?;

    let sink = FileSink::new(&cli.output_dir);
    let path = sink.deliver(&result)?;

    tracing::info!(path = %path.display(), "export delivered");
    eprintln!(
        "✓ Exported {} ({} bytes) to {}",
        result.filename,
        result.content.len(),
        path.display()
    );
    Ok(())
}

/// Resolve the process-local UTC offset once at the boundary; fall back to
/// UTC when the platform cannot determine it.
fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}
