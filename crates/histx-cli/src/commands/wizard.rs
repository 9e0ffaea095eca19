use std::io::{self, BufRead, Write};

use histx_core::{parse_date, ExportRequest, FileFormat, ItemName, Wizard, WizardStep};

use crate::cli::{Cli, WizardArgs};
use crate::error::CliError;

pub async fn run(cli: &Cli, args: &WizardArgs) -> Result<(), CliError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut prompt = io::stderr();

    let request = collect_request(&mut input, &mut prompt, args.itemname.as_deref())?;
    super::run_export(cli, &request).await
}

/// Drive the wizard machine over a line-based reader until a request is
/// submitted. Field errors are reported inline and the step is re-prompted;
/// entering `back` maps to the Previous transition. Prompts go to `prompt`
/// so they can land on stderr.
pub(crate) fn collect_request(
    input: &mut impl BufRead,
    prompt: &mut impl Write,
    prefill: Option<&str>,
) -> Result<ExportRequest, CliError> {
    let mut wizard = match prefill {
        Some(name) => Wizard::with_item_name(ItemName::parse(name)?),
        None => Wizard::new(),
    };

    loop {
        match wizard.step() {
            WizardStep::ItemName => {
                writeln!(prompt, "Item name:")?;
                let line = read_line(input)?;
                match ItemName::parse(&line) {
                    Ok(item) => {
                        wizard.set_item_name(item);
                        report_inline(wizard.next().err(), prompt)?;
                    }
                    Err(error) => writeln!(prompt, "  ! {error}")?,
                }
            }
            WizardStep::DateRange => {
                writeln!(prompt, "Begin date (YYYY-MM-DD), or 'back':")?;
                let line = read_line(input)?;
                if line == "back" {
                    wizard.previous()?;
                    continue;
                }
                let begin = match parse_date(&line) {
                    Ok(date) => date,
                    Err(error) => {
                        writeln!(prompt, "  ! {error}")?;
                        continue;
                    }
                };

                writeln!(prompt, "End date (YYYY-MM-DD):")?;
                let line = read_line(input)?;
                let end = match parse_date(&line) {
                    Ok(date) => date,
                    Err(error) => {
                        writeln!(prompt, "  ! {error}")?;
                        continue;
                    }
                };

                wizard.set_date_range(begin, end);
                report_inline(wizard.next().err(), prompt)?;
            }
            WizardStep::FileFormat => {
                writeln!(prompt, "File format (csv or json), or 'back':")?;
                let line = read_line(input)?;
                if line == "back" {
                    wizard.previous()?;
                    continue;
                }
                match line.parse::<FileFormat>() {
                    Ok(format) => {
                        wizard.set_format(format);
                        match wizard.submit() {
                            Ok(request) => return Ok(request),
                            Err(error) => writeln!(prompt, "  ! {error}")?,
                        }
                    }
                    Err(error) => writeln!(prompt, "  ! {error}")?,
                }
            }
            WizardStep::Download => {
                return Err(CliError::Command(String::from(
                    "wizard already completed; restart to collect another export",
                )));
            }
        }
    }
}

fn report_inline(
    error: Option<histx_core::ValidationError>,
    prompt: &mut impl Write,
) -> Result<(), CliError> {
    if let Some(error) = error {
        writeln!(prompt, "  ! {error}")?;
    }
    Ok(())
}

fn read_line(input: &mut impl BufRead) -> Result<String, CliError> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        return Err(CliError::Command(String::from(
            "input ended before the wizard finished",
        )));
    }
    Ok(line.trim().to_owned())
}
