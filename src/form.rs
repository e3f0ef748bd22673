//! Contact form: field validation, the submission collaborator, and banners.
//!
//! Validation is a pure function from [`ContactFields`] to a list of
//! [`FieldError`]s. The submission flow itself (disable control, wait,
//! settle, banner, re-enable) is sequenced by [`crate::site::Site`] on its
//! scheduler; this module only holds the pieces it is built from.

use crate::config::FormConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    EventDate,
    Message,
}

impl Field {
    pub const REQUIRED: [Field; 3] = [Field::FirstName, Field::LastName, Field::Email];

    /// Every field, in form order.
    pub const ALL: [Field; 6] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Phone,
        Field::EventDate,
        Field::Message,
    ];

    pub fn is_required(self) -> bool {
        Field::REQUIRED.contains(&self)
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::EventDate => "Event Date",
            Field::Message => "Message",
        }
    }

    /// Form control id, as rendered.
    pub fn id(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::EventDate => "eventDate",
            Field::Message => "message",
        }
    }
}

/// Submitted form values. Missing keys deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub event_date: String,
    pub message: String,
}

impl ContactFields {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::EventDate => &self.event_date,
            Field::Message => &self.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex must compile"))
}

/// `local@domain.tld`: no whitespace or extra `@` in any part, at least one
/// character after the last dot.
pub fn is_valid_email(email: &str) -> bool {
    email_re().is_match(email)
}

/// Validate a submission. An empty result means the form may be sent.
///
/// At most one error per field; a later check on the same field replaces the
/// earlier message, so a whitespace-only email reports the format error.
pub fn validate(fields: &ContactFields) -> Vec<FieldError> {
    let mut errors: Vec<FieldError> = Vec::new();
    let mut flag = |field: Field, message: &'static str| {
        match errors.iter_mut().find(|e| e.field == field) {
            Some(existing) => existing.message = message,
            None => errors.push(FieldError { field, message }),
        }
    };

    for field in Field::REQUIRED {
        if fields.value(field).trim().is_empty() {
            flag(field, REQUIRED_MESSAGE);
        }
    }
    if !fields.email.is_empty() && !is_valid_email(&fields.email) {
        flag(Field::Email, INVALID_EMAIL_MESSAGE);
    }
    errors
}

// ============================================================================
// Submission collaborator
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("submission rejected: {0}")]
    Rejected(String),
}

/// Whoever actually delivers the message.
pub trait Submitter {
    fn submit(&mut self, fields: &ContactFields) -> Result<SubmitResponse, SubmitError>;
}

/// How a [`SimulatedSubmitter`] answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitBehavior {
    /// `{ success: true }`
    #[default]
    Accept,
    /// `{ success: false }`
    Decline,
    /// An error instead of a response
    Reject,
}

/// Local stand-in for a contact endpoint. Records everything it receives.
#[derive(Debug, Clone, Default)]
pub struct SimulatedSubmitter {
    pub behavior: SubmitBehavior,
    pub received: Vec<ContactFields>,
}

impl SimulatedSubmitter {
    pub fn new(behavior: SubmitBehavior) -> Self {
        Self {
            behavior,
            received: Vec::new(),
        }
    }
}

impl Submitter for SimulatedSubmitter {
    fn submit(&mut self, fields: &ContactFields) -> Result<SubmitResponse, SubmitError> {
        self.received.push(fields.clone());
        match self.behavior {
            SubmitBehavior::Accept => Ok(SubmitResponse { success: true }),
            SubmitBehavior::Decline => Ok(SubmitResponse { success: false }),
            SubmitBehavior::Reject => Err(SubmitError::Rejected("endpoint unavailable".into())),
        }
    }
}

// ============================================================================
// Banners and flow state
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BannerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    Success,
    Failure,
}

/// Transient form-level message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub id: BannerId,
    pub kind: BannerKind,
    pub message: String,
}

/// Submission in flight plus the banner id counter.
#[derive(Debug, Default)]
pub struct FormFlow {
    in_flight: Option<ContactFields>,
    next_banner: u64,
}

impl FormFlow {
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start a submission. False if one is already in flight.
    pub fn begin(&mut self, fields: ContactFields) -> bool {
        if self.in_flight.is_some() {
            return false;
        }
        self.in_flight = Some(fields);
        true
    }

    /// End the in-flight submission, handing back its fields.
    pub fn settle(&mut self) -> Option<ContactFields> {
        self.in_flight.take()
    }

    /// Banner for a settled submission. `success: false` and rejections are
    /// reported the same way.
    pub fn banner_for(
        &mut self,
        result: &Result<SubmitResponse, SubmitError>,
        config: &FormConfig,
    ) -> Banner {
        let id = BannerId(self.next_banner);
        self.next_banner += 1;
        match result {
            Ok(SubmitResponse { success: true }) => Banner {
                id,
                kind: BannerKind::Success,
                message: config.success_message.clone(),
            },
            _ => Banner {
                id,
                kind: BannerKind::Failure,
                message: config.failure_message.clone(),
            },
        }
    }
}
