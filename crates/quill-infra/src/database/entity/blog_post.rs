//! Blog post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::BlogPost;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub slug: String,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub excerpt: Option<String>,
    pub published: bool,
    pub featured_image: Option<String>,
    pub meta_title: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub og_title: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub twitter_title: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub twitter_description: Option<String>,
    pub twitter_image: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for BlogPost {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            slug: model.slug,
            title: model.title,
            content: model.content,
            excerpt: model.excerpt,
            published: model.published,
            featured_image: model.featured_image,
            meta_title: model.meta_title,
            meta_description: model.meta_description,
            meta_keywords: model.meta_keywords,
            og_title: model.og_title,
            og_description: model.og_description,
            og_image: model.og_image,
            twitter_title: model.twitter_title,
            twitter_description: model.twitter_description,
            twitter_image: model.twitter_image,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<BlogPost> for ActiveModel {
    fn from(post: BlogPost) -> Self {
        Self {
            id: Set(post.id),
            slug: Set(post.slug),
            title: Set(post.title),
            content: Set(post.content),
            excerpt: Set(post.excerpt),
            published: Set(post.published),
            featured_image: Set(post.featured_image),
            meta_title: Set(post.meta_title),
            meta_description: Set(post.meta_description),
            meta_keywords: Set(post.meta_keywords),
            og_title: Set(post.og_title),
            og_description: Set(post.og_description),
            og_image: Set(post.og_image),
            twitter_title: Set(post.twitter_title),
            twitter_description: Set(post.twitter_description),
            twitter_image: Set(post.twitter_image),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
