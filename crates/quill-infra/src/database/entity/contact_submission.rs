//! Contact submission entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::ContactSubmission;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "contact_submissions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub message: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ContactSubmission {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            subject: model.subject,
            message: model.message,
            created_at: model.created_at.into(),
        }
    }
}

impl From<ContactSubmission> for ActiveModel {
    fn from(contact: ContactSubmission) -> Self {
        Self {
            id: Set(contact.id),
            name: Set(contact.name),
            email: Set(contact.email),
            subject: Set(contact.subject),
            message: Set(contact.message),
            created_at: Set(contact.created_at.into()),
        }
    }
}
