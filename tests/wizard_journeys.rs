//! User-journey tests for the wizard step machine.

use histx_core::{
    ExportRequest, FileFormat, ItemName, ValidationError, Wizard, WizardStep, WizardTransition,
};
use time::macros::date;

fn item(name: &str) -> ItemName {
    ItemName::parse(name).expect("valid item")
}

#[test]
fn happy_path_walks_all_four_steps() {
    let mut wizard = Wizard::new();
    assert_eq!(wizard.step(), WizardStep::ItemName);

    wizard.set_item_name(item("Temperature"));
    assert_eq!(wizard.next().expect("advance"), WizardStep::DateRange);

    wizard.set_date_range(date!(2024 - 01 - 01), date!(2024 - 01 - 03));
    assert_eq!(wizard.next().expect("advance"), WizardStep::FileFormat);

    wizard.set_format(FileFormat::Json);
    let request: ExportRequest = wizard.submit().expect("submit");
    assert_eq!(wizard.step(), WizardStep::Download);

    assert_eq!(request.item.as_str(), "Temperature");
    assert_eq!(request.begin, date!(2024 - 01 - 01));
    assert_eq!(request.end, date!(2024 - 01 - 03));
    assert_eq!(request.format, FileFormat::Json);
}

#[test]
fn prefill_starts_on_the_date_range_step() {
    let wizard = Wizard::with_item_name(item("Humidity"));
    assert_eq!(wizard.step(), WizardStep::DateRange);
}

#[test]
fn going_back_preserves_entered_fields() {
    let mut wizard = Wizard::new();
    wizard.set_item_name(item("Temperature"));
    wizard.next().expect("advance");
    wizard.set_date_range(date!(2024 - 01 - 01), date!(2024 - 01 - 02));
    wizard.next().expect("advance");

    wizard.previous().expect("back");
    assert_eq!(wizard.step(), WizardStep::DateRange);
    assert_eq!(wizard.draft().begin, Some(date!(2024 - 01 - 01)));
    assert_eq!(
        wizard.draft().item_name.as_ref().map(ItemName::as_str),
        Some("Temperature")
    );
}

#[test]
fn validation_failures_never_move_the_machine() {
    let mut wizard = Wizard::with_item_name(item("Temperature"));

    // No dates entered yet.
    assert!(matches!(
        wizard.next(),
        Err(ValidationError::MissingBeginDate)
    ));
    assert_eq!(wizard.step(), WizardStep::DateRange);

    // Inverted range.
    wizard.set_date_range(date!(2024 - 06 - 01), date!(2024 - 05 - 01));
    assert!(matches!(
        wizard.next(),
        Err(ValidationError::InvalidDateRange { .. })
    ));
    assert_eq!(wizard.step(), WizardStep::DateRange);
}

#[test]
fn submit_without_a_format_is_rejected() {
    let mut wizard = Wizard::with_item_name(item("Temperature"));
    wizard.set_date_range(date!(2024 - 01 - 01), date!(2024 - 01 - 02));
    wizard.next().expect("advance");

    assert!(matches!(
        wizard.submit(),
        Err(ValidationError::MissingFileFormat)
    ));
    assert_eq!(wizard.step(), WizardStep::FileFormat);
}

#[test]
fn transitions_outside_the_button_row_are_rejected() {
    let mut wizard = Wizard::new();
    assert!(matches!(
        wizard.previous(),
        Err(ValidationError::UnavailableTransition { .. })
    ));
    assert!(matches!(
        wizard.restart(),
        Err(ValidationError::UnavailableTransition { .. })
    ));
    assert_eq!(
        wizard.available_transitions(),
        &[WizardTransition::Next]
    );
}

#[test]
fn restart_after_download_begins_a_fresh_export() {
    let mut wizard = Wizard::new();
    wizard.set_item_name(item("Temperature"));
    wizard.next().expect("advance");
    wizard.set_date_range(date!(2024 - 01 - 01), date!(2024 - 01 - 02));
    wizard.next().expect("advance");
    wizard.set_format(FileFormat::Csv);
    wizard.submit().expect("submit");

    assert_eq!(
        wizard.available_transitions(),
        &[WizardTransition::Restart]
    );
    wizard.restart().expect("restart");
    assert_eq!(wizard.step(), WizardStep::ItemName);
    assert_eq!(wizard.draft().item_name, None);
}
