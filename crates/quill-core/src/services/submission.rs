use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    CareerApplication, ContactSubmission, JobType, NewCareerApplication, NewContactSubmission,
};
use crate::error::{DomainError, RepoError};
use crate::ports::{ApplicationRepository, BaseRepository, ContactRepository};

const CONTACT: &str = "Contact submission";
const APPLICATION: &str = "Career application";

/// Create, read and delete over leads. Leads are never updated.
pub struct SubmissionService {
    contacts: Arc<dyn ContactRepository>,
    applications: Arc<dyn ApplicationRepository>,
}

impl SubmissionService {
    pub fn new(
        contacts: Arc<dyn ContactRepository>,
        applications: Arc<dyn ApplicationRepository>,
    ) -> Self {
        Self {
            contacts,
            applications,
        }
    }

    /// Store a contact form submission. Identical submissions are kept as
    /// separate rows.
    pub async fn submit_contact(
        &self,
        payload: NewContactSubmission,
    ) -> Result<ContactSubmission, DomainError> {
        let submission = payload.into_submission(Utc::now())?;
        let created = self.contacts.insert(submission).await?;

        tracing::info!(contact_id = %created.id, "Contact submission received");
        Ok(created)
    }

    pub async fn list_contacts(&self) -> Result<Vec<ContactSubmission>, DomainError> {
        Ok(self.contacts.list_recent().await?)
    }

    pub async fn get_contact(&self, id: Uuid) -> Result<ContactSubmission, DomainError> {
        self.contacts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(CONTACT, id))
    }

    pub async fn delete_contact(&self, id: Uuid) -> Result<(), DomainError> {
        self.contacts.delete(id).await.map_err(|e| missing(e, CONTACT, id))?;
        tracing::info!(contact_id = %id, "Contact submission deleted");
        Ok(())
    }

    /// Store a careers form application.
    pub async fn submit_application(
        &self,
        payload: NewCareerApplication,
    ) -> Result<CareerApplication, DomainError> {
        let application = payload.into_application(Utc::now())?;
        let created = self.applications.insert(application).await?;

        tracing::info!(
            application_id = %created.id,
            job_type = created.job_type.map(|t| t.as_str()).unwrap_or("unspecified"),
            "Career application received"
        );
        Ok(created)
    }

    pub async fn list_applications(
        &self,
        job_type: Option<JobType>,
    ) -> Result<Vec<CareerApplication>, DomainError> {
        Ok(self.applications.list_recent(job_type).await?)
    }

    pub async fn get_application(&self, id: Uuid) -> Result<CareerApplication, DomainError> {
        self.applications
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(APPLICATION, id))
    }

    pub async fn delete_application(&self, id: Uuid) -> Result<(), DomainError> {
        self.applications
            .delete(id)
            .await
            .map_err(|e| missing(e, APPLICATION, id))?;
        tracing::info!(application_id = %id, "Career application deleted");
        Ok(())
    }
}

fn missing(err: RepoError, entity_type: &'static str, id: Uuid) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::not_found(entity_type, id),
        other => other.into(),
    }
}
