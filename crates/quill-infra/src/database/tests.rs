#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::database::entity::{blog_post, career_application};
    use crate::database::postgres_repo::{
        PostgresApplicationRepository, PostgresBlogPostRepository,
    };
    use quill_core::domain::{BlogPost, BlogQuery, JobType, PageRequest};
    use quill_core::error::RepoError;
    use quill_core::ports::{ApplicationRepository, BaseRepository, BlogPostRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};

    fn post_model(slug: &str, published: bool) -> blog_post::Model {
        let now = chrono::Utc::now();
        blog_post::Model {
            id: uuid::Uuid::new_v4(),
            slug: slug.to_owned(),
            title: "Test Post".to_owned(),
            content: Some("Content".to_owned()),
            excerpt: None,
            published,
            featured_image: None,
            meta_title: None,
            meta_description: None,
            meta_keywords: None,
            og_title: None,
            og_description: None,
            og_image: None,
            twitter_title: None,
            twitter_description: None,
            twitter_image: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let model = post_model("test-post", true);
        let post_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresBlogPostRepository::new(db);

        let result: Option<BlogPost> = repo.find_by_id(post_id).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
        assert!(post.published);
    }

    #[tokio::test]
    async fn test_find_by_slug_lowercases_both_sides() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model("hello-world", false)]])
            .into_connection();

        let repo = PostgresBlogPostRepository::new(db);
        let post = repo.find_by_slug("Hello-World").await.unwrap().unwrap();
        assert_eq!(post.slug, "hello-world");

        let log = repo.db.into_transaction_log();
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains("LOWER"), "unexpected query: {sql}");
        assert!(sql.contains("hello-world"), "unexpected query: {sql}");
    }

    #[tokio::test]
    async fn test_list_counts_before_paging() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row(9)]])
            .append_query_results(vec![vec![
                post_model("third", true),
                post_model("second", true),
            ]])
            .into_connection();

        let repo = PostgresBlogPostRepository::new(db);
        let query = BlogQuery {
            published: Some(true),
            page: Some(PageRequest::new(2, 2)),
        };

        let page = repo.list(&query).await.unwrap();

        assert_eq!(page.total, 9);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].slug, "third");
    }

    #[tokio::test]
    async fn test_update_of_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<blog_post::Model>::new()])
            .into_connection();

        let repo = PostgresBlogPostRepository::new(db);
        let post: BlogPost = post_model("gone", false).into();

        let err = repo.update(post).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound), "got {err:?}");
    }

    #[tokio::test]
    async fn test_delete_without_rows_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresBlogPostRepository::new(db);

        let err = repo.delete(uuid::Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_unknown_job_type_reads_as_null() {
        let now = chrono::Utc::now();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                career_application::Model {
                    id: uuid::Uuid::new_v4(),
                    name: Some("Lin".to_owned()),
                    email: None,
                    phone: None,
                    job_title: None,
                    job_type: Some("full-time".to_owned()),
                    experience: None,
                    education: None,
                    message: None,
                    created_at: now.into(),
                },
                career_application::Model {
                    id: uuid::Uuid::new_v4(),
                    name: Some("Sam".to_owned()),
                    email: None,
                    phone: None,
                    job_title: None,
                    job_type: Some("freelance".to_owned()),
                    experience: None,
                    education: None,
                    message: None,
                    created_at: now.into(),
                },
            ]])
            .into_connection();

        let repo = PostgresApplicationRepository::new(db);
        let applications = repo.list_recent(None).await.unwrap();

        assert_eq!(applications[0].job_type, Some(JobType::FullTime));
        assert_eq!(applications[1].job_type, None);
    }
}
