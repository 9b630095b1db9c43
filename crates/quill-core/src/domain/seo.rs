//! SEO and social metadata autofill.

use super::blog_post::BlogPost;

/// Fill empty SEO and social fields from the post's own content.
///
/// Fields that already hold a non-blank value are left alone. Returns
/// whether anything changed.
pub fn autofill(post: &mut BlogPost) -> bool {
    let before = post.clone();

    fill(&mut post.meta_title, Some(&post.title));
    fill(&mut post.meta_description, post.excerpt.as_ref());

    let title = post.meta_title.clone().or_else(|| Some(post.title.clone()));
    let description = post.meta_description.clone().or_else(|| post.excerpt.clone());

    fill(&mut post.og_title, title.as_ref());
    fill(&mut post.twitter_title, title.as_ref());
    fill(&mut post.og_description, description.as_ref());
    fill(&mut post.twitter_description, description.as_ref());
    fill(&mut post.og_image, post.featured_image.as_ref());
    fill(&mut post.twitter_image, post.featured_image.as_ref());

    *post != before
}

fn fill(field: &mut Option<String>, source: Option<&String>) {
    let empty = field.as_deref().is_none_or(|v| v.trim().is_empty());
    if let (true, Some(value)) = (empty, source) {
        if !value.trim().is_empty() {
            *field = Some(value.clone());
        }
    }
}
