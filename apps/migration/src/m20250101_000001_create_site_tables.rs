use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const UNIQUE_BLOG_POST_SLUG_INDEX: &str = "index-BlogPost-Slug-Unique";
const BLOG_POST_CREATED_AT_INDEX: &str = "index-BlogPost-CreatedAt";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlogPost::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BlogPost::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(BlogPost::Slug).string_len(255).not_null())
                    .col(ColumnDef::new(BlogPost::Title).string_len(255).not_null())
                    .col(ColumnDef::new(BlogPost::Content).text())
                    .col(ColumnDef::new(BlogPost::Excerpt).text())
                    .col(
                        ColumnDef::new(BlogPost::Published)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(BlogPost::FeaturedImage).string())
                    .col(ColumnDef::new(BlogPost::MetaTitle).string())
                    .col(ColumnDef::new(BlogPost::MetaDescription).text())
                    .col(ColumnDef::new(BlogPost::MetaKeywords).string())
                    .col(ColumnDef::new(BlogPost::OgTitle).string())
                    .col(ColumnDef::new(BlogPost::OgDescription).text())
                    .col(ColumnDef::new(BlogPost::OgImage).string())
                    .col(ColumnDef::new(BlogPost::TwitterTitle).string())
                    .col(ColumnDef::new(BlogPost::TwitterDescription).text())
                    .col(ColumnDef::new(BlogPost::TwitterImage).string())
                    .col(
                        ColumnDef::new(BlogPost::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BlogPost::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(UNIQUE_BLOG_POST_SLUG_INDEX)
                    .table(BlogPost::Table)
                    .col(BlogPost::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(BLOG_POST_CREATED_AT_INDEX)
                    .table(BlogPost::Table)
                    .col(BlogPost::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContactSubmission::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContactSubmission::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContactSubmission::Name).string())
                    .col(ColumnDef::new(ContactSubmission::Email).string())
                    .col(ColumnDef::new(ContactSubmission::Subject).string())
                    .col(ColumnDef::new(ContactSubmission::Message).text())
                    .col(
                        ColumnDef::new(ContactSubmission::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CareerApplication::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CareerApplication::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CareerApplication::Name).string())
                    .col(ColumnDef::new(CareerApplication::Email).string())
                    .col(ColumnDef::new(CareerApplication::Phone).string())
                    .col(ColumnDef::new(CareerApplication::JobTitle).string())
                    .col(ColumnDef::new(CareerApplication::JobType).string_len(32))
                    .col(ColumnDef::new(CareerApplication::Experience).text())
                    .col(ColumnDef::new(CareerApplication::Education).text())
                    .col(ColumnDef::new(CareerApplication::Message).text())
                    .col(
                        ColumnDef::new(CareerApplication::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CareerApplication::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContactSubmission::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlogPost::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BlogPost {
    #[sea_orm(iden = "blog_posts")]
    Table,
    Id,
    Slug,
    Title,
    Content,
    Excerpt,
    Published,
    FeaturedImage,
    MetaTitle,
    MetaDescription,
    MetaKeywords,
    OgTitle,
    OgDescription,
    OgImage,
    TwitterTitle,
    TwitterDescription,
    TwitterImage,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ContactSubmission {
    #[sea_orm(iden = "contact_submissions")]
    Table,
    Id,
    Name,
    Email,
    Subject,
    Message,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CareerApplication {
    #[sea_orm(iden = "career_applications")]
    Table,
    Id,
    Name,
    Email,
    Phone,
    JobTitle,
    JobType,
    Experience,
    Education,
    Message,
    CreatedAt,
}
