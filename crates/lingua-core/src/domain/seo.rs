use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! seo_fields {
    ($($field:ident: $ty:ty),+ $(,)?) => {
        /// SEO metadata columns: meta tags, Open Graph, Twitter Card and event data.
        ///
        /// Every column is optional. In a patch, `None` means "leave as is".
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct SeoFields {
            $(
                #[serde(default)]
                pub $field: Option<$ty>,
            )+
        }

        impl SeoFields {
            /// Overwrite the columns that are present in `patch`.
            pub fn merge(&mut self, patch: SeoFields) {
                $(
                    if patch.$field.is_some() {
                        self.$field = patch.$field;
                    }
                )+
            }
        }
    };
}

seo_fields! {
    meta_title: String,
    meta_description: String,
    canonical_url: String,
    robots: String,
    og_title: String,
    og_description: String,
    og_type: String,
    og_url: String,
    og_image_url: String,
    og_image_alt: String,
    twitter_card: String,
    twitter_site: String,
    twitter_creator: String,
    event_name: String,
    event_description: String,
    event_start_date: DateTime<Utc>,
    event_end_date: DateTime<Utc>,
    event_url: String,
    event_image_url: String,
    event_location_name: String,
    event_location_street: String,
    event_location_city: String,
    event_location_region: String,
    event_location_postal: String,
    event_location_country: String,
}

/// A stored SEO record. Owned by exactly one translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoData {
    pub id: i32,
    #[serde(flatten)]
    pub fields: SeoFields,
}

/// How a translation write touches its SEO record.
#[derive(Debug, Clone, PartialEq)]
pub enum SeoWrite {
    /// Overwrite the existing record with fully merged columns.
    Update { id: i32, fields: SeoFields },
    /// Insert a new record and link it to the translation.
    Create(SeoFields),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_columns_missing_from_patch() {
        let mut seo = SeoFields {
            meta_title: Some("Title".to_string()),
            robots: Some("index".to_string()),
            ..Default::default()
        };

        seo.merge(SeoFields {
            robots: Some("noindex".to_string()),
            og_type: Some("article".to_string()),
            ..Default::default()
        });

        assert_eq!(seo.meta_title.as_deref(), Some("Title"));
        assert_eq!(seo.robots.as_deref(), Some("noindex"));
        assert_eq!(seo.og_type.as_deref(), Some("article"));
    }

    #[test]
    fn deserializes_camel_case_with_missing_columns() {
        let seo: SeoFields =
            serde_json::from_str(r#"{"metaTitle":"Hi","eventStartDate":"2025-03-01T10:00:00Z"}"#)
                .unwrap();
        assert_eq!(seo.meta_title.as_deref(), Some("Hi"));
        assert!(seo.event_start_date.is_some());
        assert!(seo.og_url.is_none());
    }
}
