use chrono::{TimeZone, Utc};
use sea_orm::{
    DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, MockExecResult, RuntimeErr,
};

use lingua_core::domain::{
    Category, CategoryChanges, NewTranslation, PostStatus, PostUpdate, SeoData, SeoFields,
    SeoWrite, Translation, TranslationUpdate,
};
use lingua_core::error::RepoError;
use lingua_core::ports::{
    BaseRepository, CategoryRepository, PostRepository, TranslationRepository,
};

use super::entity::{category, post, seo, tag, translation};
use super::errors::map_db_err;
use super::{PostgresCategoryRepository, PostgresPostRepository, PostgresTranslationRepository};

fn exec(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

fn seo_row(id: i32) -> seo::Model {
    seo::Model {
        id,
        meta_title: Some("Hello".to_owned()),
        meta_description: None,
        canonical_url: None,
        robots: None,
        og_title: None,
        og_description: None,
        og_type: None,
        og_url: None,
        og_image_url: None,
        og_image_alt: None,
        twitter_card: None,
        twitter_site: None,
        twitter_creator: None,
        event_name: None,
        event_description: None,
        event_start_date: None,
        event_end_date: None,
        event_url: None,
        event_image_url: None,
        event_location_name: None,
        event_location_street: None,
        event_location_city: None,
        event_location_region: None,
        event_location_postal: None,
        event_location_country: None,
    }
}

fn translation_row(seo_id: Option<i32>) -> translation::Model {
    translation::Model {
        id: 11,
        post_id: 7,
        locale: "en".to_owned(),
        slug: "hello-en".to_owned(),
        title: "Hello".to_owned(),
        content: "Body".to_owned(),
        excerpt: None,
        seo_id,
    }
}

/// SQL of every statement the mock saw, with the number of transactions.
fn statement_log(db: DatabaseConnection) -> (usize, Vec<String>) {
    let log = db.into_transaction_log();
    let sql = log
        .iter()
        .flat_map(|txn| txn.statements().iter().map(|stmt| stmt.sql.clone()))
        .collect();
    (log.len(), sql)
}

fn position(sql: &[String], prefix: &str) -> usize {
    sql.iter()
        .position(|s| s.starts_with(prefix))
        .unwrap_or_else(|| panic!("no statement starting with {prefix}: {sql:?}"))
}

fn news_category() -> category::Model {
    category::Model {
        id: 1,
        name: "News".to_owned(),
        slug: "news".to_owned(),
        description: None,
        parent_id: None,
    }
}

#[tokio::test]
async fn test_find_category_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![news_category()]])
        .into_connection();

    let repo = PostgresCategoryRepository::new(db);

    let result: Option<Category> = repo.find_by_id(1).await.unwrap();

    let category = result.unwrap();
    assert_eq!(category.name, "News");
    assert_eq!(category.slug, "news");
    assert_eq!(category.parent_id, None);
}

#[tokio::test]
async fn test_update_category_without_changes_skips_write() {
    // Only the lookup is mocked; an UPDATE would exhaust the mock.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![news_category()]])
        .into_connection();

    let repo = PostgresCategoryRepository::new(db);

    let category = repo.update(1, CategoryChanges::default()).await.unwrap();
    assert_eq!(category.slug, "news");
}

#[tokio::test]
async fn test_delete_missing_category_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresCategoryRepository::new(db);

    let result = BaseRepository::<Category, i32>::delete(&repo, 42).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_find_post_by_slug() {
    let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post::Model {
            id: 7,
            author_id: 3,
            title: "Hello".to_owned(),
            slug: "hello".to_owned(),
            content: "Body".to_owned(),
            excerpt: None,
            featured_image: Some("https://cdn.example.com/hello.png".to_owned()),
            status: post::Status::Published,
            published_at: Some(created.into()),
            created_at: created.into(),
            updated_at: created.into(),
        }]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post = repo.find_by_slug("hello").await.unwrap().unwrap();
    assert_eq!(post.id, 7);
    assert_eq!(post.status, PostStatus::Published);
    assert_eq!(post.published_at, Some(created));
    assert!(post.is_published());
}

#[tokio::test]
async fn test_find_missing_post_returns_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(repo.find_by_id(99).await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_details_loads_terms_through_join_tables() {
    let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post::Model {
            id: 7,
            author_id: 3,
            title: "Hello".to_owned(),
            slug: "hello".to_owned(),
            content: "Body".to_owned(),
            excerpt: None,
            featured_image: None,
            status: post::Status::Draft,
            published_at: None,
            created_at: created.into(),
            updated_at: created.into(),
        }]])
        .append_query_results([vec![news_category()]])
        .append_query_results([vec![tag::Model {
            id: 2,
            name: "New Tag".to_owned(),
            slug: "new-tag".to_owned(),
        }]])
        .append_query_results([Vec::<translation::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db.clone());

    let details = repo.find_details(7).await.unwrap().unwrap();
    assert_eq!(details.categories[0].slug, "news");
    assert_eq!(details.tags[0].slug, "new-tag");
    assert!(details.translations.is_empty());
    drop(repo);

    let (_, sql) = statement_log(db);
    let categories = &sql[position(&sql, r#"SELECT "categories"."#)];
    assert!(categories.contains(r#"INNER JOIN "post_categories""#));
    let tags = &sql[position(&sql, r#"SELECT "tags"."#)];
    assert!(tags.contains(r#"INNER JOIN "post_tags""#));
}

#[test]
fn test_connection_errors_map_to_connection() {
    let err = map_db_err(DbErr::Conn(RuntimeErr::Internal("refused".to_owned())));
    assert!(matches!(err, RepoError::Connection(_)));
}

#[test]
fn test_stale_rows_map_to_not_found() {
    assert!(matches!(map_db_err(DbErr::RecordNotUpdated), RepoError::NotFound));
    assert!(matches!(
        map_db_err(DbErr::RecordNotFound("post".to_owned())),
        RepoError::NotFound
    ));
}

#[test]
fn test_other_errors_map_to_query() {
    let err = map_db_err(DbErr::Custom("bad query".to_owned()));
    assert!(matches!(err, RepoError::Query(_)));
}

#[tokio::test]
async fn test_insert_translation_writes_seo_first() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![seo_row(5)]])
        .append_query_results([vec![translation_row(Some(5))]])
        .into_connection();

    let repo = PostgresTranslationRepository::new(db.clone());

    let created = repo
        .insert(NewTranslation {
            post_id: 7,
            locale: "en".to_owned(),
            slug: "hello-en".to_owned(),
            title: "Hello".to_owned(),
            content: "Body".to_owned(),
            excerpt: None,
            seo: Some(SeoFields {
                meta_title: Some("Hello".to_owned()),
                ..Default::default()
            }),
        })
        .await
        .unwrap();
    assert_eq!(created.seo.map(|s| s.id), Some(5));
    drop(repo);

    let (transactions, sql) = statement_log(db);
    assert_eq!(transactions, 1);
    assert!(
        position(&sql, r#"INSERT INTO "seo""#) < position(&sql, r#"INSERT INTO "post_translations""#)
    );
}

#[tokio::test]
async fn test_update_translation_with_vanished_seo_is_not_found() {
    // The SEO UPDATE ... RETURNING comes back empty.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![translation_row(Some(5))]])
        .append_query_results([Vec::<seo::Model>::new()])
        .into_connection();

    let repo = PostgresTranslationRepository::new(db);

    let mut update = TranslationUpdate::new(11);
    update.seo = Some(SeoWrite::Update {
        id: 5,
        fields: SeoFields::default(),
    });

    let result = repo.update(update).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_translation_removes_seo_first() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec(1), exec(1)])
        .into_connection();

    let repo = PostgresTranslationRepository::new(db.clone());

    let existing = Translation {
        id: 11,
        post_id: 7,
        locale: "en".to_owned(),
        slug: "hello-en".to_owned(),
        title: "Hello".to_owned(),
        content: "Body".to_owned(),
        excerpt: None,
        seo: Some(SeoData {
            id: 5,
            fields: SeoFields::default(),
        }),
    };
    repo.delete(&existing).await.unwrap();
    drop(repo);

    let (transactions, sql) = statement_log(db);
    assert_eq!(transactions, 1);
    assert!(
        position(&sql, r#"DELETE FROM "seo""#) < position(&sql, r#"DELETE FROM "post_translations""#)
    );
}

#[tokio::test]
async fn test_delete_post_cascades_in_one_transaction() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![translation_row(Some(5))]])
        .append_exec_results([exec(1), exec(1), exec(2), exec(1), exec(1)])
        .into_connection();

    let repo = PostgresPostRepository::new(db.clone());

    repo.delete(7).await.unwrap();
    drop(repo);

    let (transactions, sql) = statement_log(db);
    assert_eq!(transactions, 1);

    let seo = position(&sql, r#"DELETE FROM "seo""#);
    let translations = position(&sql, r#"DELETE FROM "post_translations""#);
    let categories = position(&sql, r#"DELETE FROM "post_categories""#);
    let tags = position(&sql, r#"DELETE FROM "post_tags""#);
    let post = position(&sql, r#"DELETE FROM "posts""#);
    assert!(seo < translations);
    assert!(translations < post);
    assert!(categories < post);
    assert!(tags < post);
}

#[tokio::test]
async fn test_update_post_deleted_concurrently_is_not_found() {
    let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post::Model {
            id: 7,
            author_id: 3,
            title: "Hello".to_owned(),
            slug: "hello".to_owned(),
            content: "Body".to_owned(),
            excerpt: None,
            featured_image: None,
            status: post::Status::Draft,
            published_at: None,
            created_at: created.into(),
            updated_at: created.into(),
        }]])
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let mut update = PostUpdate::new(7, created);
    update.title = Some("Renamed".to_owned());

    let result = repo.update(update).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}
