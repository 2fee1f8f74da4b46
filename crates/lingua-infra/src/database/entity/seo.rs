//! SEO metadata entity for SeaORM.

use sea_orm::{NotSet, Set};
use sea_orm::entity::prelude::*;

use lingua_core::domain::{SeoData, SeoFields};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "seo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub meta_title: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub meta_description: Option<String>,
    pub canonical_url: Option<String>,
    pub robots: Option<String>,
    pub og_title: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub og_description: Option<String>,
    pub og_type: Option<String>,
    pub og_url: Option<String>,
    pub og_image_url: Option<String>,
    pub og_image_alt: Option<String>,
    pub twitter_card: Option<String>,
    pub twitter_site: Option<String>,
    pub twitter_creator: Option<String>,
    pub event_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub event_description: Option<String>,
    pub event_start_date: Option<DateTimeWithTimeZone>,
    pub event_end_date: Option<DateTimeWithTimeZone>,
    pub event_url: Option<String>,
    pub event_image_url: Option<String>,
    pub event_location_name: Option<String>,
    pub event_location_street: Option<String>,
    pub event_location_city: Option<String>,
    pub event_location_region: Option<String>,
    pub event_location_postal: Option<String>,
    pub event_location_country: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::translation::Entity")]
    Translation,
}

impl Related<super::translation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Translation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SeoData {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            fields: SeoFields {
                meta_title: model.meta_title,
                meta_description: model.meta_description,
                canonical_url: model.canonical_url,
                robots: model.robots,
                og_title: model.og_title,
                og_description: model.og_description,
                og_type: model.og_type,
                og_url: model.og_url,
                og_image_url: model.og_image_url,
                og_image_alt: model.og_image_alt,
                twitter_card: model.twitter_card,
                twitter_site: model.twitter_site,
                twitter_creator: model.twitter_creator,
                event_name: model.event_name,
                event_description: model.event_description,
                event_start_date: model.event_start_date.map(Into::into),
                event_end_date: model.event_end_date.map(Into::into),
                event_url: model.event_url,
                event_image_url: model.event_image_url,
                event_location_name: model.event_location_name,
                event_location_street: model.event_location_street,
                event_location_city: model.event_location_city,
                event_location_region: model.event_location_region,
                event_location_postal: model.event_location_postal,
                event_location_country: model.event_location_country,
            },
        }
    }
}

/// All columns set from `fields`; the primary key is left for the caller.
impl From<SeoFields> for ActiveModel {
    fn from(fields: SeoFields) -> Self {
        Self {
            id: NotSet,
            meta_title: Set(fields.meta_title),
            meta_description: Set(fields.meta_description),
            canonical_url: Set(fields.canonical_url),
            robots: Set(fields.robots),
            og_title: Set(fields.og_title),
            og_description: Set(fields.og_description),
            og_type: Set(fields.og_type),
            og_url: Set(fields.og_url),
            og_image_url: Set(fields.og_image_url),
            og_image_alt: Set(fields.og_image_alt),
            twitter_card: Set(fields.twitter_card),
            twitter_site: Set(fields.twitter_site),
            twitter_creator: Set(fields.twitter_creator),
            event_name: Set(fields.event_name),
            event_description: Set(fields.event_description),
            event_start_date: Set(fields.event_start_date.map(Into::into)),
            event_end_date: Set(fields.event_end_date.map(Into::into)),
            event_url: Set(fields.event_url),
            event_image_url: Set(fields.event_image_url),
            event_location_name: Set(fields.event_location_name),
            event_location_street: Set(fields.event_location_street),
            event_location_city: Set(fields.event_location_city),
            event_location_region: Set(fields.event_location_region),
            event_location_postal: Set(fields.event_location_postal),
            event_location_country: Set(fields.event_location_country),
        }
    }
}
