//! Post translation entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "post_translations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub post_id: i32,
    pub locale: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub excerpt: Option<String>,
    #[sea_orm(unique)]
    pub seo_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
    #[sea_orm(
        belongs_to = "super::seo::Entity",
        from = "Column::SeoId",
        to = "super::seo::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Seo,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::seo::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seo.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain type, attaching the loaded SEO row.
    pub fn into_domain(self, seo: Option<super::seo::Model>) -> lingua_core::domain::Translation {
        lingua_core::domain::Translation {
            id: self.id,
            post_id: self.post_id,
            locale: self.locale,
            slug: self.slug,
            title: self.title,
            content: self.content,
            excerpt: self.excerpt,
            seo: seo.map(Into::into),
        }
    }
}
