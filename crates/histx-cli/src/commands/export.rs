use histx_core::{parse_date, ExportRequest, ItemName};

use crate::cli::{Cli, ExportArgs};
use crate::error::CliError;

pub async fn run(cli: &Cli, args: &ExportArgs) -> Result<(), CliError> {
    let item = ItemName::parse(&args.item)?;
    let begin = parse_date(&args.begin)?;
    let end = parse_date(&args.end)?;
    let request = ExportRequest::new(item, begin, end, args.format.into())?;

    super::run_export(cli, &request).await
}
