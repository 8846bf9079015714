//! Area and folder creation dialogs.
//!
//! # Responsibility
//! - Hold create-form fields, open state, and the busy flag.
//! - Validate input into typed drafts before any create callback runs.
//!
//! # Invariants
//! - Validation failure never invokes the create callback.
//! - While busy, a second submit and closing are both refused.
//! - Failed submits keep the typed input; successful ones reset and close.

use crate::model::area::Area;
use crate::model::draft::{DraftError, NewArea, NewFolder};
use crate::model::ResourceName;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reasons a submit was refused before reaching the create callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogError {
    /// A submit is already in flight.
    Busy,
    /// Display name is blank after trim.
    MissingDisplayName,
    /// Folder dialog has no area selected.
    MissingArea,
    /// Selected area is not among the offered areas.
    UnknownArea(ResourceName),
    /// Client-chosen uid does not match the UID rule.
    InvalidUid(String),
}

impl Display for DialogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Busy => write!(f, "a submit is already in progress"),
            Self::MissingDisplayName => write!(f, "name is required"),
            Self::MissingArea => write!(f, "an area must be selected"),
            Self::UnknownArea(name) => write!(f, "area is not available: {name}"),
            Self::InvalidUid(uid) => write!(f, "invalid uid: `{uid}`"),
        }
    }
}

impl Error for DialogError {}

impl From<DraftError> for DialogError {
    fn from(value: DraftError) -> Self {
        match value {
            DraftError::BlankDisplayName => Self::MissingDisplayName,
            DraftError::BlankArea => Self::MissingArea,
            DraftError::InvalidUid(uid) => Self::InvalidUid(uid),
        }
    }
}

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The entity was created; the dialog is reset and closed.
    Created,
    /// Input was refused before reaching the create callback.
    Rejected(DialogError),
    /// The create callback failed; input is preserved for retry.
    Failed(String),
}

/// Create-area form.
#[derive(Debug, Clone, Default)]
pub struct AreaDialog {
    open: bool,
    busy: bool,
    display_name: String,
    description: String,
}

impl AreaDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closes the dialog. Refused (returns `false`) while busy.
    pub fn close(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.open = false;
        true
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_display_name(&mut self, value: impl Into<String>) {
        self.display_name = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
    }

    /// Validates the form and marks it busy.
    pub fn begin_submit(&mut self) -> Result<NewArea, DialogError> {
        if self.busy {
            return Err(DialogError::Busy);
        }
        let draft = NewArea::new(self.display_name.as_str())?
            .with_description(self.description.as_str());
        self.busy = true;
        Ok(draft)
    }

    /// Clears the busy flag; on success also resets fields and closes.
    pub fn finish(&mut self, created: bool) {
        self.busy = false;
        if created {
            self.display_name.clear();
            self.description.clear();
            self.open = false;
        }
    }

    /// Runs one full submit around `create`.
    pub fn submit<E: Display>(
        &mut self,
        create: impl FnOnce(&NewArea) -> Result<(), E>,
    ) -> SubmitOutcome {
        let draft = match self.begin_submit() {
            Ok(draft) => draft,
            Err(err) => {
                warn!("event=area_submit module=dialog status=rejected reason={err}");
                return SubmitOutcome::Rejected(err);
            }
        };
        match create(&draft) {
            Ok(()) => {
                self.finish(true);
                info!("event=area_submit module=dialog status=ok");
                SubmitOutcome::Created
            }
            Err(err) => {
                self.finish(false);
                warn!("event=area_submit module=dialog status=error error={err}");
                SubmitOutcome::Failed(err.to_string())
            }
        }
    }
}

/// Create-folder form.
#[derive(Debug, Clone, Default)]
pub struct FolderDialog {
    open: bool,
    busy: bool,
    display_name: String,
    description: String,
    area: Option<ResourceName>,
    preset_area: Option<ResourceName>,
}

impl FolderDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the dialog with an optional preselected area.
    pub fn open(&mut self, preset_area: Option<&str>) {
        self.preset_area = preset_area.map(str::to_string);
        self.area = self.preset_area.clone();
        self.open = true;
    }

    /// Closes the dialog and forgets the preset. Refused while busy.
    pub fn close(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.open = false;
        self.preset_area = None;
        true
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Currently selected area.
    pub fn area(&self) -> Option<&str> {
        self.area.as_deref()
    }

    /// Area the dialog was opened with.
    pub fn preset_area(&self) -> Option<&str> {
        self.preset_area.as_deref()
    }

    pub fn set_display_name(&mut self, value: impl Into<String>) {
        self.display_name = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
    }

    pub fn select_area(&mut self, area: Option<&str>) {
        self.area = area.map(str::to_string);
    }

    /// Validates the form against the offered areas and marks it busy.
    pub fn begin_submit(&mut self, offered_areas: &[Area]) -> Result<NewFolder, DialogError> {
        if self.busy {
            return Err(DialogError::Busy);
        }
        if self.display_name.trim().is_empty() {
            return Err(DialogError::MissingDisplayName);
        }
        let area = self
            .area
            .as_deref()
            .map(str::trim)
            .filter(|area| !area.is_empty())
            .ok_or(DialogError::MissingArea)?;
        if !offered_areas.iter().any(|offered| offered.name == area) {
            return Err(DialogError::UnknownArea(area.to_string()));
        }

        let draft = NewFolder::new(self.display_name.as_str(), area)?
            .with_description(self.description.as_str());
        self.busy = true;
        Ok(draft)
    }

    /// Clears the busy flag; on success also resets fields and closes.
    pub fn finish(&mut self, created: bool) {
        self.busy = false;
        if created {
            self.display_name.clear();
            self.description.clear();
            self.area = self.preset_area.clone();
            self.close();
        }
    }

    /// Runs one full submit around `create`.
    pub fn submit<E: Display>(
        &mut self,
        offered_areas: &[Area],
        create: impl FnOnce(&NewFolder) -> Result<(), E>,
    ) -> SubmitOutcome {
        let draft = match self.begin_submit(offered_areas) {
            Ok(draft) => draft,
            Err(err) => {
                warn!("event=folder_submit module=dialog status=rejected reason={err}");
                return SubmitOutcome::Rejected(err);
            }
        };
        match create(&draft) {
            Ok(()) => {
                self.finish(true);
                info!(
                    "event=folder_submit module=dialog status=ok area={}",
                    draft.area()
                );
                SubmitOutcome::Created
            }
            Err(err) => {
                self.finish(false);
                warn!("event=folder_submit module=dialog status=error error={err}");
                SubmitOutcome::Failed(err.to_string())
            }
        }
    }
}
