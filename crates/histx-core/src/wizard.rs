//! Step machine for collecting export parameters.
//!
//! An explicit finite-state machine replaces visibility-driven form control:
//! four steps, four transitions. Field errors are inline and only block
//! advancement, and the finalized [`ExportRequest`] leaves the machine by
//! value on submit, so there is no shared "current parameters" slot between
//! collecting and exporting.

use time::Date;

use crate::domain::{ExportRequest, FileFormat, ItemName};
use crate::error::ValidationError;

/// Wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    ItemName,
    DateRange,
    FileFormat,
    Download,
}

impl WizardStep {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ItemName => "item name",
            Self::DateRange => "date range",
            Self::FileFormat => "file format",
            Self::Download => "download",
        }
    }
}

/// Transitions accepted by the machine. Which ones are legal depends on the
/// current step; [`Wizard::available_transitions`] mirrors the button row of
/// a step form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardTransition {
    Next,
    Previous,
    Submit,
    Restart,
}

impl WizardTransition {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Previous => "previous",
            Self::Submit => "submit",
            Self::Restart => "restart",
        }
    }
}

/// Draft fields accumulated across steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportDraft {
    pub item_name: Option<ItemName>,
    pub begin: Option<Date>,
    pub end: Option<Date>,
    pub format: Option<FileFormat>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wizard {
    step: WizardStep,
    draft: ExportDraft,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::ItemName,
            draft: ExportDraft::default(),
        }
    }

    /// Seed the item name ahead of time and start at the date-range step,
    /// mirroring a pre-filled link into the wizard.
    pub fn with_item_name(item: ItemName) -> Self {
        Self {
            step: WizardStep::DateRange,
            draft: ExportDraft {
                item_name: Some(item),
                ..ExportDraft::default()
            },
        }
    }

    pub const fn step(&self) -> WizardStep {
        self.step
    }

    pub const fn draft(&self) -> &ExportDraft {
        &self.draft
    }

    pub fn set_item_name(&mut self, item: ItemName) {
        self.draft.item_name = Some(item);
    }

    pub fn set_date_range(&mut self, begin: Date, end: Date) {
        self.draft.begin = Some(begin);
        self.draft.end = Some(end);
    }

    pub fn set_format(&mut self, format: FileFormat) {
        self.draft.format = Some(format);
    }

    /// Transitions legal on the current step.
    pub const fn available_transitions(&self) -> &'static [WizardTransition] {
        match self.step {
            WizardStep::ItemName => &[WizardTransition::Next],
            WizardStep::DateRange => &[WizardTransition::Next, WizardTransition::Previous],
            WizardStep::FileFormat => &[WizardTransition::Submit, WizardTransition::Previous],
            WizardStep::Download => &[WizardTransition::Restart],
        }
    }

    /// Advance one step after validating the current step's fields. On error
    /// the machine stays where it is.
    pub fn next(&mut self) -> Result<WizardStep, ValidationError> {
        self.step = match self.step {
            WizardStep::ItemName => {
                if self.draft.item_name.is_none() {
                    return Err(ValidationError::EmptyItemName);
                }
                WizardStep::DateRange
            }
            WizardStep::DateRange => {
                self.validate_date_range()?;
                WizardStep::FileFormat
            }
            step => return Err(unavailable(step, WizardTransition::Next)),
        };
        Ok(self.step)
    }

    pub fn previous(&mut self) -> Result<WizardStep, ValidationError> {
        self.step = match self.step {
            WizardStep::DateRange => WizardStep::ItemName,
            WizardStep::FileFormat => WizardStep::DateRange,
            step => return Err(unavailable(step, WizardTransition::Previous)),
        };
        Ok(self.step)
    }

    /// Validate the whole draft and hand the finalized request out by value,
    /// moving the machine to the download step.
    pub fn submit(&mut self) -> Result<ExportRequest, ValidationError> {
        if self.step != WizardStep::FileFormat {
            return Err(unavailable(self.step, WizardTransition::Submit));
        }

        let item = self
            .draft
            .item_name
            .clone()
            .ok_or(ValidationError::EmptyItemName)?;
        let begin = self.draft.begin.ok_or(ValidationError::MissingBeginDate)?;
        let end = self.draft.end.ok_or(ValidationError::MissingEndDate)?;
        let format = self.draft.format.ok_or(ValidationError::MissingFileFormat)?;

        let request = ExportRequest::new(item, begin, end, format)?;
        self.step = WizardStep::Download;
        Ok(request)
    }

    /// Clear the draft and return to the first step.
    pub fn restart(&mut self) -> Result<WizardStep, ValidationError> {
        if self.step != WizardStep::Download {
            return Err(unavailable(self.step, WizardTransition::Restart));
        }
        *self = Self::new();
        Ok(self.step)
    }

    fn validate_date_range(&self) -> Result<(), ValidationError> {
        let begin = self.draft.begin.ok_or(ValidationError::MissingBeginDate)?;
        let end = self.draft.end.ok_or(ValidationError::MissingEndDate)?;
        if begin > end {
            return Err(ValidationError::InvalidDateRange { begin, end });
        }
        Ok(())
    }
}

const fn unavailable(step: WizardStep, transition: WizardTransition) -> ValidationError {
    ValidationError::UnavailableTransition {
        step: step.as_str(),
        transition: transition.as_str(),
    }
}
