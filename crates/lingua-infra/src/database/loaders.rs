//! Relation loading and association writes shared by the post and
//! translation repositories.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, NotSet, QueryFilter,
    QueryOrder, Set, sea_query::IntoCondition,
};

use lingua_core::domain::{Category, NewTag, PostWithTerms, Tag, Translation};
use lingua_core::error::RepoError;

use super::entity::{category, post, post_category, post_tag, seo, tag, translation};
use super::errors::map_db_err;

/// Load the categories and tags linked to a post.
pub(crate) async fn load_terms<C>(
    conn: &C,
    model: &post::Model,
) -> Result<(Vec<Category>, Vec<Tag>), RepoError>
where
    C: ConnectionTrait,
{
    let categories = model
        .find_related(category::Entity)
        .order_by_asc(category::Column::Id)
        .all(conn)
        .await
        .map_err(map_db_err)?;
    let tags = model
        .find_related(tag::Entity)
        .order_by_asc(tag::Column::Id)
        .all(conn)
        .await
        .map_err(map_db_err)?;

    Ok((
        categories.into_iter().map(Into::into).collect(),
        tags.into_iter().map(Into::into).collect(),
    ))
}

pub(crate) async fn load_post_with_terms<C>(
    conn: &C,
    model: post::Model,
) -> Result<PostWithTerms, RepoError>
where
    C: ConnectionTrait,
{
    let (categories, tags) = load_terms(conn, &model).await?;
    Ok(PostWithTerms {
        post: model.into(),
        categories,
        tags,
    })
}

/// Load translations matching `condition`, each with its SEO record.
pub(crate) async fn load_translations<C, F>(
    conn: &C,
    condition: F,
) -> Result<Vec<Translation>, RepoError>
where
    C: ConnectionTrait,
    F: IntoCondition + Send,
{
    let rows = translation::Entity::find()
        .find_also_related(seo::Entity)
        .filter(condition)
        .order_by_asc(translation::Column::Id)
        .all(conn)
        .await
        .map_err(map_db_err)?;

    Ok(rows
        .into_iter()
        .map(|(row, seo)| row.into_domain(seo))
        .collect())
}

pub(crate) async fn load_translation<C, F>(
    conn: &C,
    condition: F,
) -> Result<Option<Translation>, RepoError>
where
    C: ConnectionTrait,
    F: IntoCondition + Send,
{
    let row = translation::Entity::find()
        .find_also_related(seo::Entity)
        .filter(condition)
        .one(conn)
        .await
        .map_err(map_db_err)?;

    Ok(row.map(|(row, seo)| row.into_domain(seo)))
}

/// Connect tags by slug, creating the missing ones. Returns tag ids in input order.
///
/// An existing tag keeps its stored name.
pub(crate) async fn connect_or_create_tags<C>(
    conn: &C,
    tags: &[NewTag],
) -> Result<Vec<i32>, RepoError>
where
    C: ConnectionTrait,
{
    let mut ids = Vec::with_capacity(tags.len());
    for new_tag in tags {
        let existing = tag::Entity::find()
            .filter(tag::Column::Slug.eq(new_tag.slug.as_str()))
            .one(conn)
            .await
            .map_err(map_db_err)?;

        let id = match existing {
            Some(found) => found.id,
            None => {
                let created = tag::ActiveModel {
                    id: NotSet,
                    name: Set(new_tag.name.clone()),
                    slug: Set(new_tag.slug.clone()),
                }
                .insert(conn)
                .await
                .map_err(map_db_err)?;
                tracing::debug!(tag_id = created.id, slug = %created.slug, "Tag created");
                created.id
            }
        };
        ids.push(id);
    }
    Ok(ids)
}

/// Replace the category links of a post.
pub(crate) async fn set_categories<C>(
    conn: &C,
    post_id: i32,
    category_ids: &[i32],
) -> Result<(), RepoError>
where
    C: ConnectionTrait,
{
    post_category::Entity::delete_many()
        .filter(post_category::Column::PostId.eq(post_id))
        .exec(conn)
        .await
        .map_err(map_db_err)?;

    for &category_id in category_ids {
        post_category::ActiveModel {
            post_id: Set(post_id),
            category_id: Set(category_id),
        }
        .insert(conn)
        .await
        .map_err(map_db_err)?;
    }
    Ok(())
}

/// Replace the tag links of a post.
pub(crate) async fn set_tags<C>(conn: &C, post_id: i32, tags: &[NewTag]) -> Result<(), RepoError>
where
    C: ConnectionTrait,
{
    let tag_ids = connect_or_create_tags(conn, tags).await?;

    post_tag::Entity::delete_many()
        .filter(post_tag::Column::PostId.eq(post_id))
        .exec(conn)
        .await
        .map_err(map_db_err)?;

    for tag_id in tag_ids {
        post_tag::ActiveModel {
            post_id: Set(post_id),
            tag_id: Set(tag_id),
        }
        .insert(conn)
        .await
        .map_err(map_db_err)?;
    }
    Ok(())
}
