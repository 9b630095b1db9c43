//! Career application entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::{CareerApplication, JobType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "career_applications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub job_title: Option<String>,
    /// One of `internship`, `part-time`, `full-time`.
    pub job_type: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub experience: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub education: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub message: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CareerApplication {
    fn from(model: Model) -> Self {
        let job_type = model.job_type.as_deref().and_then(|raw| match raw.parse::<JobType>() {
            Ok(job_type) => Some(job_type),
            Err(err) => {
                tracing::warn!(application_id = %model.id, error = %err, "Ignoring stored job type");
                None
            }
        });

        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            job_title: model.job_title,
            job_type,
            experience: model.experience,
            education: model.education,
            message: model.message,
            created_at: model.created_at.into(),
        }
    }
}

impl From<CareerApplication> for ActiveModel {
    fn from(application: CareerApplication) -> Self {
        Self {
            id: Set(application.id),
            name: Set(application.name),
            email: Set(application.email),
            phone: Set(application.phone),
            job_title: Set(application.job_title),
            job_type: Set(application.job_type.map(|t| t.as_str().to_string())),
            experience: Set(application.experience),
            education: Set(application.education),
            message: Set(application.message),
            created_at: Set(application.created_at.into()),
        }
    }
}
