//! Explicit validation of request bodies.
//!
//! Every rule runs and every failure is reported, so a client sees all
//! problems of a body at once.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

use crate::dto::{
    CreateCategoryRequest, CreatePostRequest, CreateTranslationRequest, SeoDataRequest,
    UpdateCategoryRequest, UpdatePostRequest, UpdateTranslationRequest,
};

/// Accepted values of a post `status`.
pub const POST_STATUSES: [&str; 4] = ["DRAFT", "PENDING", "PUBLISHED", "PRIVATE"];

const TITLE_MIN_CHARS: usize = 3;

/// Collected validation failures, one message per broken rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .0.join("; "))]
pub struct ValidationErrors(pub Vec<String>);

impl ValidationErrors {
    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

/// A request body with field rules.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

#[derive(Default)]
struct Checker {
    errors: Vec<String>,
}

impl Checker {
    fn check(&mut self, ok: bool, message: &str) {
        if !ok {
            self.errors.push(message.to_string());
        }
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

fn title_ok(title: &str) -> bool {
    title.chars().count() >= TITLE_MIN_CHARS
}

fn unique_strings(values: &[String]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values.iter().all(|v| seen.insert(v.as_str()))
}

/// Parse an ISO-8601 timestamp or calendar date into UTC.
///
/// Offsets are honoured; a timestamp without one and a bare date are taken
/// as UTC (a bare date at midnight).
pub fn parse_iso8601(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl Validate for CreatePostRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checker = Checker::default();
        checker.check(
            title_ok(&self.title),
            "Title cannot be shorter than 3 characters",
        );
        checker.check(
            !self.category_ids.is_empty(),
            "categoryIds cannot be an empty array",
        );
        checker.check(
            unique_strings(&self.tag_names),
            "tagNames must not contain repeated values",
        );
        checker.finish()
    }
}

impl Validate for UpdatePostRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checker = Checker::default();
        if let Some(title) = &self.title {
            checker.check(title_ok(title), "Title cannot be shorter than 3 characters");
        }
        if let Some(status) = &self.status {
            checker.check(
                POST_STATUSES.contains(&status.as_str()),
                "Status must be one of DRAFT, PENDING, PUBLISHED, PRIVATE",
            );
        }
        if let Some(category_ids) = &self.category_ids {
            checker.check(!category_ids.is_empty(), "categoryIds cannot be empty");
        }
        if let Some(tag_names) = &self.tag_names {
            checker.check(
                unique_strings(tag_names),
                "tagNames must not contain repeated values",
            );
        }
        checker.finish()
    }
}

impl Validate for SeoDataRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checker = Checker::default();
        if let Some(start) = &self.event_start_date {
            checker.check(
                parse_iso8601(start).is_some(),
                "eventStartDate must be an ISO-8601 date",
            );
        }
        if let Some(end) = &self.event_end_date {
            checker.check(
                parse_iso8601(end).is_some(),
                "eventEndDate must be an ISO-8601 date",
            );
        }
        checker.finish()
    }
}

fn merge_seo(checker: &mut Checker, seo: Option<&SeoDataRequest>) {
    if let Some(Err(ValidationErrors(errors))) = seo.map(|s| s.validate()) {
        checker.errors.extend(errors);
    }
}

impl Validate for CreateTranslationRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checker = Checker::default();
        checker.check(!self.locale.trim().is_empty(), "Locale cannot be empty");
        merge_seo(&mut checker, self.seo_data.as_ref());
        checker.finish()
    }
}

impl Validate for UpdateTranslationRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checker = Checker::default();
        merge_seo(&mut checker, self.seo_data.as_ref());
        checker.finish()
    }
}

impl Validate for CreateCategoryRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checker = Checker::default();
        checker.check(!self.name.trim().is_empty(), "Name cannot be empty");
        checker.check(!self.slug.trim().is_empty(), "Slug cannot be empty");
        checker.finish()
    }
}

impl Validate for UpdateCategoryRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checker = Checker::default();
        if let Some(name) = &self.name {
            checker.check(!name.trim().is_empty(), "Name cannot be empty");
        }
        if let Some(slug) = &self.slug {
            checker.check(!slug.trim().is_empty(), "Slug cannot be empty");
        }
        checker.finish()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn create_post() -> CreatePostRequest {
        CreatePostRequest {
            title: "Hello".to_string(),
            slug: "hello".to_string(),
            content: "Body".to_string(),
            excerpt: None,
            featured_image: None,
            category_ids: vec![1],
            tag_names: vec!["Rust".to_string()],
        }
    }

    #[test]
    fn valid_post_passes() {
        assert!(create_post().validate().is_ok());
    }

    #[test]
    fn every_broken_rule_is_reported() {
        let request = CreatePostRequest {
            title: "Hi".to_string(),
            category_ids: vec![],
            tag_names: vec!["a".to_string(), "a".to_string()],
            ..create_post()
        };

        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors.messages(),
            [
                "Title cannot be shorter than 3 characters",
                "categoryIds cannot be an empty array",
                "tagNames must not contain repeated values",
            ]
        );
    }

    #[test]
    fn title_length_counts_characters() {
        let request = CreatePostRequest {
            title: "Щит".to_string(),
            ..create_post()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn update_rejects_unknown_status() {
        let request = UpdatePostRequest {
            status: Some("ARCHIVED".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_err());

        let request = UpdatePostRequest {
            status: Some("PRIVATE".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn empty_update_is_valid() {
        assert!(UpdatePostRequest::default().validate().is_ok());
        assert!(UpdateTranslationRequest::default().validate().is_ok());
    }

    #[test]
    fn nested_seo_dates_are_checked() {
        let request = UpdateTranslationRequest {
            seo_data: Some(SeoDataRequest {
                event_start_date: Some("next tuesday".to_string()),
                event_end_date: Some("2024-06-01".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let errors = request.validate().unwrap_err();
        assert_eq!(errors.messages(), ["eventStartDate must be an ISO-8601 date"]);
    }

    #[test]
    fn iso8601_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 6, 1, 10, 30, 0).unwrap();
        assert_eq!(parse_iso8601("2024-06-01T10:30:00Z"), Some(expected));
        assert_eq!(parse_iso8601("2024-06-01T12:30:00+02:00"), Some(expected));
        assert_eq!(parse_iso8601("2024-06-01T10:30:00"), Some(expected));
        assert_eq!(
            parse_iso8601("2024-06-01"),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_iso8601("01/06/2024"), None);
    }

    #[test]
    fn display_joins_messages() {
        let errors = ValidationErrors(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(errors.to_string(), "a; b");
    }
}
