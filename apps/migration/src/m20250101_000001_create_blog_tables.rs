//! Categories, tags, posts with their join tables, SEO records and post
//! translations.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    Slug,
    Description,
    ParentId,
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Id,
    Name,
    Slug,
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    AuthorId,
    Title,
    Slug,
    Content,
    Excerpt,
    FeaturedImage,
    Status,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PostCategories {
    Table,
    PostId,
    CategoryId,
}

#[derive(DeriveIden)]
enum PostTags {
    Table,
    PostId,
    TagId,
}

#[derive(DeriveIden)]
enum Seo {
    Table,
    Id,
    MetaTitle,
    MetaDescription,
    CanonicalUrl,
    Robots,
    OgTitle,
    OgDescription,
    OgType,
    OgUrl,
    OgImageUrl,
    OgImageAlt,
    TwitterCard,
    TwitterSite,
    TwitterCreator,
    EventName,
    EventDescription,
    EventStartDate,
    EventEndDate,
    EventUrl,
    EventImageUrl,
    EventLocationName,
    EventLocationStreet,
    EventLocationCity,
    EventLocationRegion,
    EventLocationPostal,
    EventLocationCountry,
}

#[derive(DeriveIden)]
enum PostTranslations {
    Table,
    Id,
    PostId,
    Locale,
    Slug,
    Title,
    Content,
    Excerpt,
    SeoId,
}

fn id_column<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn optional_string<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name).string().null().to_owned()
}

fn optional_text<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name).text().null().to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(id_column(Categories::Id))
                    .col(ColumnDef::new(Categories::Name).string().not_null())
                    .col(ColumnDef::new(Categories::Slug).string().not_null().unique_key())
                    .col(optional_text(Categories::Description))
                    .col(ColumnDef::new(Categories::ParentId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_categories_parent")
                            .from(Categories::Table, Categories::ParentId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(id_column(Tags::Id))
                    .col(ColumnDef::new(Tags::Name).string().not_null())
                    .col(ColumnDef::new(Tags::Slug).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(id_column(Posts::Id))
                    .col(ColumnDef::new(Posts::AuthorId).integer().not_null())
                    .col(ColumnDef::new(Posts::Title).string().not_null())
                    .col(ColumnDef::new(Posts::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(Posts::Content).text().not_null())
                    .col(optional_text(Posts::Excerpt))
                    .col(optional_string(Posts::FeaturedImage))
                    .col(
                        ColumnDef::new(Posts::Status)
                            .string_len(16)
                            .not_null()
                            .default("DRAFT"),
                    )
                    .col(
                        ColumnDef::new(Posts::PublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Posts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Posts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PostCategories::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PostCategories::PostId).integer().not_null())
                    .col(ColumnDef::new(PostCategories::CategoryId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(PostCategories::PostId)
                            .col(PostCategories::CategoryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_categories_post")
                            .from(PostCategories::Table, PostCategories::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_categories_category")
                            .from(PostCategories::Table, PostCategories::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PostTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PostTags::PostId).integer().not_null())
                    .col(ColumnDef::new(PostTags::TagId).integer().not_null())
                    .primary_key(Index::create().col(PostTags::PostId).col(PostTags::TagId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_tags_post")
                            .from(PostTags::Table, PostTags::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_tags_tag")
                            .from(PostTags::Table, PostTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Seo::Table)
                    .if_not_exists()
                    .col(id_column(Seo::Id))
                    .col(optional_string(Seo::MetaTitle))
                    .col(optional_text(Seo::MetaDescription))
                    .col(optional_string(Seo::CanonicalUrl))
                    .col(optional_string(Seo::Robots))
                    .col(optional_string(Seo::OgTitle))
                    .col(optional_text(Seo::OgDescription))
                    .col(optional_string(Seo::OgType))
                    .col(optional_string(Seo::OgUrl))
                    .col(optional_string(Seo::OgImageUrl))
                    .col(optional_string(Seo::OgImageAlt))
                    .col(optional_string(Seo::TwitterCard))
                    .col(optional_string(Seo::TwitterSite))
                    .col(optional_string(Seo::TwitterCreator))
                    .col(optional_string(Seo::EventName))
                    .col(optional_text(Seo::EventDescription))
                    .col(
                        ColumnDef::new(Seo::EventStartDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Seo::EventEndDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(optional_string(Seo::EventUrl))
                    .col(optional_string(Seo::EventImageUrl))
                    .col(optional_string(Seo::EventLocationName))
                    .col(optional_string(Seo::EventLocationStreet))
                    .col(optional_string(Seo::EventLocationCity))
                    .col(optional_string(Seo::EventLocationRegion))
                    .col(optional_string(Seo::EventLocationPostal))
                    .col(optional_string(Seo::EventLocationCountry))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PostTranslations::Table)
                    .if_not_exists()
                    .col(id_column(PostTranslations::Id))
                    .col(ColumnDef::new(PostTranslations::PostId).integer().not_null())
                    .col(ColumnDef::new(PostTranslations::Locale).string().not_null())
                    .col(
                        ColumnDef::new(PostTranslations::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(PostTranslations::Title).string().not_null())
                    .col(ColumnDef::new(PostTranslations::Content).text().not_null())
                    .col(optional_text(PostTranslations::Excerpt))
                    .col(
                        ColumnDef::new(PostTranslations::SeoId)
                            .integer()
                            .null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_translations_post")
                            .from(PostTranslations::Table, PostTranslations::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_translations_seo")
                            .from(PostTranslations::Table, PostTranslations::SeoId)
                            .to(Seo::Table, Seo::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One translation per locale and post.
        manager
            .create_index(
                Index::create()
                    .name("uq_post_translations_post_locale")
                    .table(PostTranslations::Table)
                    .col(PostTranslations::PostId)
                    .col(PostTranslations::Locale)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PostTranslations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Seo::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PostTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PostCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await
    }
}
