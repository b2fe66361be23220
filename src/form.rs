//! Add-employee form state: draft, touched fields, location and submission.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::client::CreatedEmployee;
use crate::error::{AppError, Result};
use crate::location::{Coordinates, LocationError};
use crate::models::FormDraft;
use crate::notification::Notification;
use crate::validation::{Field, ValidationResult, validate};

pub const MSG_CREATED: &str = "Employee added successfully!";
pub const MSG_SUBMIT_FAILED: &str = "Failed to submit form. Please try again.";
pub const MSG_FIX_ERRORS: &str = "Please fix all errors before submitting";

/// Progress of the one-shot location request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LocationStatus {
    #[default]
    NotRequested,
    Pending,
    Acquired,
    Failed(LocationError),
}

/// Why a submit attempt did not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// Validation failed or a location error is pending.
    Invalid,
    /// A submission is already in flight.
    InFlight,
}

/// State behind the add-employee view.
#[derive(Debug, Default)]
pub struct FormState {
    draft: FormDraft,
    touched: HashSet<Field>,
    location: LocationStatus,
    submitting: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    /// Mutable access to a user-editable field. Coordinates are read-only.
    pub fn field_mut(&mut self, field: Field) -> Option<&mut String> {
        if Field::EDITABLE.contains(&field) {
            Some(field.value_mut(&mut self.draft))
        } else {
            None
        }
    }

    /// Set a user-editable field. Returns `false` for coordinate fields.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        match self.field_mut(field) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Record that the user has focused and left a field.
    pub fn touch(&mut self, field: Field) {
        self.touched.insert(field);
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    pub fn validation(&self) -> ValidationResult {
        validate(&self.draft)
    }

    /// Error text for a field, only once it has been touched.
    pub fn visible_error(&self, field: Field) -> Option<&'static str> {
        if self.is_touched(field) {
            self.validation().error(field)
        } else {
            None
        }
    }

    pub fn location_status(&self) -> &LocationStatus {
        &self.location
    }

    pub fn location_error(&self) -> Option<&LocationError> {
        match &self.location {
            LocationStatus::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_locating(&self) -> bool {
        self.location == LocationStatus::Pending
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Schema passes and no location error is outstanding.
    pub fn is_submittable(&self) -> bool {
        self.validation().is_valid() && self.location_error().is_none()
    }

    /// Whether the submit button is enabled.
    pub fn submit_enabled(&self) -> bool {
        self.is_submittable() && !self.submitting
    }

    /// Whether the first-display location request has yet to be made.
    pub fn needs_initial_location(&self) -> bool {
        self.location == LocationStatus::NotRequested
    }

    /// Start a location request. Returns `false` if one is already pending.
    pub fn begin_location_request(&mut self) -> bool {
        if self.is_locating() {
            return false;
        }
        self.location = LocationStatus::Pending;
        true
    }

    /// Apply the outcome of a location request.
    pub fn apply_location(&mut self, result: std::result::Result<Coordinates, LocationError>) {
        match result {
            Ok(coords) => {
                let (latitude, longitude) = coords.to_fixed();
                info!("Location acquired: {}, {}", latitude, longitude);
                self.draft.latitude = latitude;
                self.draft.longitude = longitude;
                self.location = LocationStatus::Acquired;
            }
            Err(e) => {
                warn!("Error getting location: {}", e);
                self.location = LocationStatus::Failed(e);
            }
        }
    }

    /// Start a submission.
    ///
    /// Marks every field touched first so errors on untouched fields become
    /// visible. On success returns the draft to send and holds the form in
    /// the submitting state until [`FormState::finish_submit`].
    pub fn begin_submit(&mut self) -> std::result::Result<FormDraft, SubmitBlocked> {
        self.touched.extend(Field::ALL);

        if self.submitting {
            return Err(SubmitBlocked::InFlight);
        }
        if !self.is_submittable() {
            warn!(
                "Submit blocked: invalid fields {:?}, location error {:?}",
                self.validation().failing_fields(),
                self.location_error()
            );
            return Err(SubmitBlocked::Invalid);
        }

        self.submitting = true;
        Ok(self.draft.clone())
    }

    /// Apply the result of a submission and return the notification to show.
    ///
    /// Success clears the user fields, keeping the coordinates. Any failure
    /// keeps the draft so the user can retry.
    pub fn finish_submit(&mut self, result: &Result<CreatedEmployee>) -> Notification {
        self.submitting = false;
        match result {
            Ok(_) => {
                self.draft.clear_user_fields();
                self.touched.clear();
                Notification::success(MSG_CREATED)
            }
            Err(AppError::SubmissionRejected) => {
                warn!("Submission rejected, keeping draft");
                Notification::error(MSG_SUBMIT_FAILED)
            }
            Err(e) => {
                warn!("Submission error: {}", e);
                Notification::error(MSG_SUBMIT_FAILED)
            }
        }
    }
}
