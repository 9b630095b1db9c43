//! Leads - contact submissions and career applications.
//!
//! Both are append-mostly: created by the public, read and deleted by admins,
//! never updated in place. Every field is nullable at the store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::error::DomainError;
use crate::validation::{FieldErrors, FieldKind, decode_lenient};

const CONTACT_SCHEMA: &[(&str, FieldKind)] = &[
    ("name", FieldKind::Text),
    ("email", FieldKind::Text),
    ("subject", FieldKind::Text),
    ("message", FieldKind::Text),
];

const APPLICATION_SCHEMA: &[(&str, FieldKind)] = &[
    ("name", FieldKind::Text),
    ("email", FieldKind::Text),
    ("phone", FieldKind::Text),
    ("job_title", FieldKind::Text),
    ("job_type", FieldKind::Text),
    ("experience", FieldKind::Text),
    ("education", FieldKind::Text),
    ("message", FieldKind::Text),
];

/// A message sent through the public contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct NewContactSubmission {
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    #[validate(length(max = 255))]
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl NewContactSubmission {
    pub fn from_json(body: Value) -> Result<Self, DomainError> {
        let (payload, mut errors) = decode_lenient::<Self>(body, CONTACT_SCHEMA)?;
        if errors.is_empty() {
            return Ok(payload);
        }
        errors.merge(FieldErrors::of(&payload.normalized()));
        Err(DomainError::Validation(errors))
    }

    fn normalized(self) -> Self {
        Self {
            name: non_blank(self.name),
            email: non_blank(self.email),
            subject: non_blank(self.subject),
            message: non_blank(self.message),
        }
    }

    pub fn into_submission(self, now: DateTime<Utc>) -> Result<ContactSubmission, DomainError> {
        let payload = self.normalized();
        FieldErrors::of(&payload).into_result()?;

        Ok(ContactSubmission {
            id: Uuid::new_v4(),
            name: payload.name,
            email: payload.email,
            subject: payload.subject,
            message: payload.message,
            created_at: now,
        })
    }
}

/// Employment type offered on the careers page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    Internship,
    PartTime,
    FullTime,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Internship => "internship",
            JobType::PartTime => "part-time",
            JobType::FullTime => "full-time",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown job type: {0}")]
pub struct UnknownJobType(pub String);

impl FromStr for JobType {
    type Err = UnknownJobType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "internship" => Ok(JobType::Internship),
            "part-time" => Ok(JobType::PartTime),
            "full-time" => Ok(JobType::FullTime),
            other => Err(UnknownJobType(other.to_string())),
        }
    }
}

/// An application submitted through the careers form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerApplication {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub job_title: Option<String>,
    pub job_type: Option<JobType>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct NewCareerApplication {
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    #[validate(length(max = 255))]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub job_title: Option<String>,
    /// Kept as text so an unknown value is reported with the other fields.
    pub job_type: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub message: Option<String>,
}

impl NewCareerApplication {
    pub fn from_json(body: Value) -> Result<Self, DomainError> {
        let (payload, mut errors) = decode_lenient::<Self>(body, APPLICATION_SCHEMA)?;
        if errors.is_empty() {
            return Ok(payload);
        }
        let (_, violations) = payload.normalized().checked();
        errors.merge(violations);
        Err(DomainError::Validation(errors))
    }

    fn normalized(self) -> Self {
        Self {
            name: non_blank(self.name),
            email: non_blank(self.email),
            phone: non_blank(self.phone),
            job_title: non_blank(self.job_title),
            job_type: non_blank(self.job_type),
            experience: non_blank(self.experience),
            education: non_blank(self.education),
            message: non_blank(self.message),
        }
    }

    /// Run the field rules and parse `job_type`.
    fn checked(&self) -> (Option<JobType>, FieldErrors) {
        let mut errors = FieldErrors::of(self);
        let job_type = match self.job_type.as_deref().map(str::parse::<JobType>) {
            Some(Ok(job_type)) => Some(job_type),
            Some(Err(_)) => {
                errors.add("job_type", "job_type");
                None
            }
            None => None,
        };
        (job_type, errors)
    }

    pub fn into_application(self, now: DateTime<Utc>) -> Result<CareerApplication, DomainError> {
        let payload = self.normalized();
        let (job_type, errors) = payload.checked();
        errors.into_result()?;

        Ok(CareerApplication {
            id: Uuid::new_v4(),
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            job_title: payload.job_title,
            job_type,
            experience: payload.experience,
            education: payload.education,
            message: payload.message,
            created_at: now,
        })
    }
}

/// Blank form inputs are stored as null.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
