//! Service behaviour over the in-memory repositories.

use quill_core::DomainError;
use quill_core::domain::{
    BlogKey, BlogPostPatch, BlogQuery, JobType, NewBlogPost, NewCareerApplication,
    NewContactSubmission, PageRequest,
};
use quill_core::ports::BaseRepository;
use quill_core::services::{ContentService, DashboardService, SubmissionService, Visibility};
use quill_infra::Repositories;

fn content() -> (ContentService, Repositories) {
    let repos = Repositories::in_memory();
    (ContentService::new(repos.posts.clone()), repos)
}

fn payload(title: &str, slug: Option<&str>) -> NewBlogPost {
    NewBlogPost {
        title: Some(title.to_string()),
        slug: slug.map(str::to_string),
        content: Some("x".to_string()),
        ..Default::default()
    }
}

fn patch(json: &str) -> BlogPostPatch {
    serde_json::from_str(json).unwrap()
}

fn slug(s: &str) -> BlogKey {
    BlogKey::Slug(s.to_string())
}

#[tokio::test]
async fn create_then_get_returns_payload_and_server_fields() {
    let (service, _) = content();

    let created = service.create(payload("A", Some("a"))).await.unwrap();
    let fetched = service.get_by_id(created.id, Visibility::All).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.slug, "a");
    assert_eq!(fetched.content.as_deref(), Some("x"));
    assert!(!fetched.published);
    assert_eq!(fetched.created_at, fetched.updated_at);
}

#[tokio::test]
async fn create_derives_slug_from_title() {
    let (service, _) = content();

    let created = service
        .create(payload("Hello, World! 2024", None))
        .await
        .unwrap();

    assert_eq!(created.slug, "hello-world-2024");
}

#[tokio::test]
async fn duplicate_slug_conflicts_and_keeps_one_row() {
    let (service, repos) = content();
    service.create(payload("A", Some("a"))).await.unwrap();

    let err = service.create(payload("Other", Some("a"))).await.unwrap_err();

    assert!(matches!(err, DomainError::Conflict(_)), "got {err:?}");
    assert_eq!(repos.posts.count().await.unwrap(), 1);
}

#[tokio::test]
async fn invalid_slug_is_a_validation_error() {
    let (service, repos) = content();

    let err = service
        .create(payload("A", Some("Has Spaces")))
        .await
        .unwrap_err();

    match err {
        DomainError::Validation(fields) => assert!(fields.contains("slug")),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(repos.posts.count().await.unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn simultaneous_creates_with_same_slug_admit_one() {
    let (service, repos) = content();

    let (first, second) = tokio::join!(
        service.create(payload("First", Some("race"))),
        service.create(payload("Second", Some("race"))),
    );

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        outcomes
            .iter()
            .any(|r| matches!(r, Err(DomainError::Conflict(_))))
    );
    assert_eq!(repos.posts.count().await.unwrap(), 1);
}

#[tokio::test]
async fn update_of_missing_post_is_not_found() {
    let (service, repos) = content();
    service.create(payload("A", Some("a"))).await.unwrap();

    let err = service
        .update(&slug("missing"), patch(r#"{"title": "B"}"#))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));
    let untouched = service.get_by_slug("a", Visibility::All).await.unwrap();
    assert_eq!(untouched.title, "A");
    assert_eq!(repos.posts.count().await.unwrap(), 1);
}

#[tokio::test]
async fn update_preserves_omitted_fields() {
    let (service, _) = content();
    let created = service
        .create(NewBlogPost {
            excerpt: Some("summary".to_string()),
            meta_title: Some("Meta".to_string()),
            ..payload("A", Some("a"))
        })
        .await
        .unwrap();

    let updated = service
        .update(&slug("a"), patch(r#"{"published": true}"#))
        .await
        .unwrap();

    assert!(updated.published);
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.content, created.content);
    assert_eq!(updated.excerpt, created.excerpt);
    assert_eq!(updated.meta_title, created.meta_title);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn rename_onto_taken_slug_conflicts() {
    let (service, _) = content();
    service.create(payload("A", Some("a"))).await.unwrap();
    service.create(payload("B", Some("b"))).await.unwrap();

    let err = service
        .update(&slug("b"), patch(r#"{"slug": "a"}"#))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Conflict(_)));
    assert!(service.get_by_slug("b", Visibility::All).await.is_ok());
}

#[tokio::test]
async fn delete_twice_is_success_then_not_found() {
    let (service, repos) = content();
    service.create(payload("A", Some("a"))).await.unwrap();
    service.create(payload("B", Some("b"))).await.unwrap();

    service.delete(&slug("a")).await.unwrap();
    let err = service.delete(&slug("a")).await.unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));
    assert_eq!(repos.posts.count().await.unwrap(), 1);
}

#[tokio::test]
async fn drafts_are_hidden_from_public_callers() {
    let (service, _) = content();
    let draft = service.create(payload("Draft", Some("draft"))).await.unwrap();
    service
        .create(NewBlogPost {
            published: Some(true),
            ..payload("Live", Some("live"))
        })
        .await
        .unwrap();

    let public = service
        .list(BlogQuery::default(), Visibility::Public)
        .await
        .unwrap();
    let all = service
        .list(BlogQuery::default(), Visibility::All)
        .await
        .unwrap();

    assert_eq!(public.total, 1);
    assert_eq!(public.items[0].slug, "live");
    assert_eq!(all.total, 2);
    assert!(matches!(
        service.get_by_id(draft.id, Visibility::Public).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        service.get_by_slug("DRAFT", Visibility::All).await,
        Ok(post) if post.id == draft.id
    ));
}

#[tokio::test]
async fn list_honours_page_window() {
    let (service, _) = content();
    for i in 0..7 {
        service
            .create(payload(&format!("Post {i}"), None))
            .await
            .unwrap();
    }

    let query = BlogQuery {
        published: None,
        page: Some(PageRequest::new(2, 6)),
    };
    let page = service.list(query, Visibility::All).await.unwrap();

    assert_eq!(page.total, 7);
    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn toggle_publish_flips_flag() {
    let (service, _) = content();
    let created = service.create(payload("A", Some("a"))).await.unwrap();

    let published = service.toggle_publish(&BlogKey::Id(created.id)).await.unwrap();
    assert!(published.published);

    let draft = service.toggle_publish(&slug("a")).await.unwrap();
    assert!(!draft.published);
}

#[tokio::test]
async fn autofill_seo_fills_only_empty_fields() {
    let (service, _) = content();
    service
        .create(NewBlogPost {
            excerpt: Some("Short summary".to_string()),
            og_title: Some("Custom OG".to_string()),
            ..payload("A", Some("a"))
        })
        .await
        .unwrap();

    let post = service.autofill_seo(&slug("a")).await.unwrap();

    assert_eq!(post.meta_title.as_deref(), Some("A"));
    assert_eq!(post.meta_description.as_deref(), Some("Short summary"));
    assert_eq!(post.og_title.as_deref(), Some("Custom OG"));
    assert_eq!(post.twitter_title.as_deref(), Some("A"));
    let stored = service.get_by_slug("a", Visibility::All).await.unwrap();
    assert_eq!(stored, post);
}

#[tokio::test]
async fn uuid_shaped_slug_is_still_addressable() {
    let (service, _) = content();
    let uuid_slug = "0f8fad5b-d9cb-469f-a165-70867728950e";
    service
        .create(payload("Odd", Some(uuid_slug)))
        .await
        .unwrap();

    let key = BlogKey::parse(uuid_slug);
    assert!(matches!(key, BlogKey::Id(_)));

    let updated = service
        .update(&key, patch(r#"{"title": "Renamed"}"#))
        .await
        .unwrap();
    assert_eq!(updated.title, "Renamed");
}

#[tokio::test]
async fn identical_contacts_are_kept_separately() {
    let repos = Repositories::in_memory();
    let service = SubmissionService::new(repos.contacts.clone(), repos.applications.clone());
    let form = NewContactSubmission {
        name: Some("Ada".to_string()),
        email: Some("ada@example.com".to_string()),
        message: Some("Hello".to_string()),
        ..Default::default()
    };

    let first = service.submit_contact(form.clone()).await.unwrap();
    let second = service.submit_contact(form).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(service.list_contacts().await.unwrap().len(), 2);
    assert_eq!(service.get_contact(first.id).await.unwrap(), first);

    service.delete_contact(first.id).await.unwrap();
    assert!(matches!(
        service.delete_contact(first.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn applications_filter_by_job_type() {
    let repos = Repositories::in_memory();
    let service = SubmissionService::new(repos.contacts.clone(), repos.applications.clone());
    for job_type in ["internship", "full-time", "full-time"] {
        service
            .submit_application(NewCareerApplication {
                name: Some("Lin".to_string()),
                job_type: Some(job_type.to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let full_time = service
        .list_applications(Some(JobType::FullTime))
        .await
        .unwrap();
    let everyone = service.list_applications(None).await.unwrap();

    assert_eq!(full_time.len(), 2);
    assert_eq!(everyone.len(), 3);
    assert!(matches!(
        service.get_application(uuid::Uuid::new_v4()).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn dashboard_counts_everything() {
    let repos = Repositories::in_memory();
    let content = ContentService::new(repos.posts.clone());
    let submissions = SubmissionService::new(repos.contacts.clone(), repos.applications.clone());
    let dashboard = DashboardService::new(
        repos.posts.clone(),
        repos.contacts.clone(),
        repos.applications.clone(),
    );

    content.create(payload("A", Some("a"))).await.unwrap();
    content
        .create(NewBlogPost {
            published: Some(true),
            ..payload("B", Some("b"))
        })
        .await
        .unwrap();
    submissions
        .submit_contact(NewContactSubmission::default())
        .await
        .unwrap();

    let stats = dashboard.stats().await.unwrap();

    assert_eq!(stats.total_blogs, 2);
    assert_eq!(stats.published_blogs, 1);
    assert_eq!(stats.draft_blogs, 1);
    assert_eq!(stats.total_contacts, 1);
    assert_eq!(stats.total_applications, 0);
}
