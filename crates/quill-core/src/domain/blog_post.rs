use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use super::slug::{SLUG_REGEX, derive_slug};
use crate::error::DomainError;
use crate::validation::{FieldErrors, FieldKind, decode_lenient};

const NOT_NULL: &str = "not_null";

/// JSON types of the writable blog post fields.
const PAYLOAD_SCHEMA: &[(&str, FieldKind)] = &[
    ("title", FieldKind::Text),
    ("slug", FieldKind::Text),
    ("content", FieldKind::Text),
    ("excerpt", FieldKind::Text),
    ("published", FieldKind::Flag),
    ("featured_image", FieldKind::Text),
    ("meta_title", FieldKind::Text),
    ("meta_description", FieldKind::Text),
    ("meta_keywords", FieldKind::Text),
    ("og_title", FieldKind::Text),
    ("og_description", FieldKind::Text),
    ("og_image", FieldKind::Text),
    ("twitter_title", FieldKind::Text),
    ("twitter_description", FieldKind::Text),
    ("twitter_image", FieldKind::Text),
];

/// BlogPost entity - a page of site content with SEO and social metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub published: bool,
    pub featured_image: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub twitter_title: Option<String>,
    pub twitter_description: Option<String>,
    pub twitter_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    /// Serialized field names, in declaration order.
    pub const FIELDS: &'static [&'static str] = &[
        "id",
        "slug",
        "title",
        "content",
        "excerpt",
        "published",
        "featured_image",
        "meta_title",
        "meta_description",
        "meta_keywords",
        "og_title",
        "og_description",
        "og_image",
        "twitter_title",
        "twitter_description",
        "twitter_image",
        "created_at",
        "updated_at",
    ];

    /// Apply a partial update. Absent fields keep their value, explicit
    /// nulls clear nullable fields. The patch must already be validated.
    pub fn apply(&mut self, patch: BlogPostPatch, now: DateTime<Utc>) {
        if let Some(Some(title)) = patch.title {
            self.title = title;
        }
        if let Some(Some(slug)) = patch.slug {
            self.slug = slug;
        }
        if let Some(Some(published)) = patch.published {
            self.published = published;
        }

        merge(&mut self.content, patch.content);
        merge(&mut self.excerpt, patch.excerpt);
        merge(&mut self.featured_image, patch.featured_image);
        merge(&mut self.meta_title, patch.meta_title);
        merge(&mut self.meta_description, patch.meta_description);
        merge(&mut self.meta_keywords, patch.meta_keywords);
        merge(&mut self.og_title, patch.og_title);
        merge(&mut self.og_description, patch.og_description);
        merge(&mut self.og_image, patch.og_image);
        merge(&mut self.twitter_title, patch.twitter_title);
        merge(&mut self.twitter_description, patch.twitter_description);
        merge(&mut self.twitter_image, patch.twitter_image);

        self.updated_at = now;
    }

    pub fn set_published(&mut self, published: bool, now: DateTime<Utc>) {
        self.published = published;
        self.updated_at = now;
    }
}

fn merge<T>(current: &mut Option<T>, update: Option<Option<T>>) {
    if let Some(value) = update {
        *current = value;
    }
}

/// Payload for creating a blog post.
///
/// `slug` may be omitted, in which case it is derived from the title.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct NewBlogPost {
    #[validate(required, length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(
        required,
        length(min = 1, max = 255),
        regex(path = *SLUG_REGEX, code = "slug_format")
    )]
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub published: Option<bool>,
    #[validate(url)]
    pub featured_image: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    #[validate(url)]
    pub og_image: Option<String>,
    pub twitter_title: Option<String>,
    pub twitter_description: Option<String>,
    #[validate(url)]
    pub twitter_image: Option<String>,
}

impl NewBlogPost {
    /// Decode a request body. When fields carry the wrong JSON type the
    /// error lists them together with every other rule the body breaks.
    pub fn from_json(body: Value) -> Result<Self, DomainError> {
        let (payload, mut errors) = decode_lenient::<Self>(body, PAYLOAD_SCHEMA)?;
        if errors.is_empty() {
            return Ok(payload);
        }
        errors.merge(FieldErrors::of(&payload.with_derived_slug()));
        Err(DomainError::Validation(errors))
    }

    /// Fill in a derived slug when the caller left it out or blank.
    pub fn with_derived_slug(mut self) -> Self {
        let missing = self.slug.as_deref().is_none_or(str::is_empty);
        if missing {
            self.slug = self.title.as_deref().map(derive_slug);
        }
        self
    }

    /// Validate every field and build the post stamped with `now`.
    pub fn into_post(self, now: DateTime<Utc>) -> Result<BlogPost, DomainError> {
        let errors = FieldErrors::of(&self);
        let (Some(title), Some(slug)) = (self.title, self.slug) else {
            return Err(DomainError::Validation(errors));
        };
        errors.into_result()?;

        Ok(BlogPost {
            id: Uuid::new_v4(),
            slug,
            title,
            content: self.content,
            excerpt: self.excerpt,
            published: self.published.unwrap_or(false),
            featured_image: self.featured_image,
            meta_title: self.meta_title,
            meta_description: self.meta_description,
            meta_keywords: self.meta_keywords,
            og_title: self.og_title,
            og_description: self.og_description,
            og_image: self.og_image,
            twitter_title: self.twitter_title,
            twitter_description: self.twitter_description,
            twitter_image: self.twitter_image,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update of a blog post.
///
/// Every field is tri-state: `None` when absent from the payload,
/// `Some(None)` for an explicit `null`, `Some(Some(v))` for a value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BlogPostPatch {
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(length(min = 1, max = 255))]
    pub title: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(length(min = 1, max = 255), regex(path = *SLUG_REGEX, code = "slug_format"))]
    pub slug: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub content: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub excerpt: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub published: Option<Option<bool>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(url)]
    pub featured_image: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub meta_title: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub meta_description: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub meta_keywords: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub og_title: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub og_description: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(url)]
    pub og_image: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub twitter_title: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub twitter_description: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(url)]
    pub twitter_image: Option<Option<String>>,
}

impl BlogPostPatch {
    /// Decode a request body, reporting mistyped fields alongside every
    /// other rule the patch breaks.
    pub fn from_json(body: Value) -> Result<Self, DomainError> {
        let (patch, mut errors) = decode_lenient::<Self>(body, PAYLOAD_SCHEMA)?;
        if errors.is_empty() {
            return Ok(patch);
        }
        errors.merge(patch.violations());
        Err(DomainError::Validation(errors))
    }

    /// Validate the fields present in the patch.
    pub fn check(&self) -> Result<(), DomainError> {
        self.violations().into_result()
    }

    fn violations(&self) -> FieldErrors {
        let mut errors = FieldErrors::of(self);
        if matches!(self.title, Some(None)) {
            errors.add("title", NOT_NULL);
        }
        if matches!(self.slug, Some(None)) {
            errors.add("slug", NOT_NULL);
        }
        if matches!(self.published, Some(None)) {
            errors.add("published", NOT_NULL);
        }
        errors
    }

    /// The slug this patch renames to, if any.
    pub fn new_slug(&self) -> Option<&str> {
        match &self.slug {
            Some(Some(slug)) => Some(slug),
            _ => None,
        }
    }
}

/// A caller-selected subset of blog post fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection(Vec<String>);

impl FieldSelection {
    /// Parse a comma separated list such as `id,title,slug`.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let mut errors = FieldErrors::new();
        let mut fields = Vec::new();
        for name in raw.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            if !BlogPost::FIELDS.contains(&name) {
                tracing::debug!(field = name, "Unknown field in selection");
                errors.add("fields", "unknown_field");
            } else if !fields.iter().any(|f| f == name) {
                fields.push(name.to_string());
            }
        }
        if fields.is_empty() && errors.is_empty() {
            errors.add("fields", "required");
        }
        errors.into_result()?;
        Ok(Self(fields))
    }

    /// Serialize `post` keeping only the selected fields.
    pub fn project(&self, post: &BlogPost) -> serde_json::Value {
        match serde_json::to_value(post) {
            Ok(serde_json::Value::Object(mut map)) => {
                map.retain(|key, _| self.0.iter().any(|f| f == key));
                serde_json::Value::Object(map)
            }
            Ok(other) => other,
            Err(_) => serde_json::Value::Null,
        }
    }
}
