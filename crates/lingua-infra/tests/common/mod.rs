#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use lingua_core::domain::NewCategory;
use lingua_core::ports::Clock;
use lingua_core::services::CreateDraft;
use lingua_core::{CategoryService, PostService};
use lingua_infra::InMemoryBlogStore;

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub struct Fixture {
    pub posts: PostService,
    pub categories: CategoryService,
    pub clock: Arc<ManualClock>,
}

pub fn fixture() -> Fixture {
    let store = Arc::new(InMemoryBlogStore::new());
    let clock = Arc::new(ManualClock::new());
    Fixture {
        posts: PostService::new(store.clone(), store.clone(), clock.clone()),
        categories: CategoryService::new(store),
        clock,
    }
}

pub fn draft(slug: &str, category_ids: Vec<i32>, tag_names: &[&str]) -> CreateDraft {
    CreateDraft {
        title: format!("Post {slug}"),
        slug: slug.to_string(),
        content: "Body".to_string(),
        category_ids,
        tag_names: tag_names.iter().map(|t| t.to_string()).collect(),
        ..Default::default()
    }
}

pub fn category(slug: &str) -> NewCategory {
    NewCategory {
        name: slug.to_uppercase(),
        slug: slug.to_string(),
        ..Default::default()
    }
}
