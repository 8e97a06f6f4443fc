//! Contact form validation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_MESSAGE_CHARS: usize = 10;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("Name is required")]
    NameRequired,
    #[error("Name must be at least 2 characters long")]
    NameTooShort,
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    EmailInvalid,
    #[error("Subject is required")]
    SubjectRequired,
    #[error("Message is required")]
    MessageRequired,
    #[error("Message must be at least 10 characters long")]
    MessageTooShort,
}

impl ContactError {
    pub const fn field(&self) -> Field {
        match self {
            ContactError::NameRequired | ContactError::NameTooShort => Field::Name,
            ContactError::EmailRequired | ContactError::EmailInvalid => Field::Email,
            ContactError::SubjectRequired => Field::Subject,
            ContactError::MessageRequired | ContactError::MessageTooShort => Field::Message,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Check every field; all failures are returned, in field order.
    pub fn validate(&self) -> Result<(), Vec<ContactError>> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(ContactError::NameRequired);
        } else if name.chars().count() < MIN_NAME_CHARS {
            errors.push(ContactError::NameTooShort);
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(ContactError::EmailRequired);
        } else if !EMAIL_RE.is_match(email) {
            errors.push(ContactError::EmailInvalid);
        }

        if self.subject.trim().is_empty() {
            errors.push(ContactError::SubjectRequired);
        }

        let message = self.message.trim();
        if message.is_empty() {
            errors.push(ContactError::MessageRequired);
        } else if message.chars().count() < MIN_MESSAGE_CHARS {
            errors.push(ContactError::MessageTooShort);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
