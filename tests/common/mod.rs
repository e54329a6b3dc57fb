#![allow(dead_code)]

//! Shared test fixtures: an in-memory link store and cache implementing the
//! domain traits, plus state construction helpers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use snaplink::application::services::{ResolverService, ShortenerService, StatsService};
use snaplink::domain::entities::{Link, NewLink};
use snaplink::domain::repositories::LinkRepository;
use snaplink::error::AppError;
use snaplink::infrastructure::cache::{CacheResult, CacheService, CachedLink, NullCache};
use snaplink::state::AppState;

#[derive(Clone)]
struct Row {
    id: i64,
    code: Option<String>,
    target_url: String,
    click_count: i64,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

/// In-memory link store enforcing the same contract as the PostgreSQL
/// repository: code uniqueness under a single lock and single-statement
/// click increments.
pub struct InMemoryLinkRepository {
    rows: Mutex<HashMap<i64, Row>>,
    next_id: AtomicI64,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Seeds a link directly, bypassing the service layer.
    pub fn insert_link(&self, code: &str, url: &str, expires_at: Option<DateTime<Utc>>) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        rows.insert(
            id,
            Row {
                id,
                code: Some(code.to_string()),
                target_url: url.to_string(),
                click_count: 0,
                created_at: Utc::now(),
                expires_at,
            },
        );
    }

    /// Seeds a link whose expiry is already in the past.
    pub fn insert_expired_link(&self, code: &str, url: &str) {
        self.insert_link(code, url, Some(Utc::now() - Duration::hours(1)));
    }

    pub fn click_count(&self, code: &str) -> i64 {
        let rows = self.rows.lock().unwrap();
        rows.values()
            .find(|r| r.code.as_deref() == Some(code))
            .map(|r| r.click_count)
            .unwrap_or(0)
    }

    fn row_to_link(row: &Row) -> Link {
        Link::new(
            row.id,
            row.code.clone().unwrap_or_default(),
            row.target_url.clone(),
            row.click_count,
            row.created_at,
            row.expires_at,
        )
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut rows = self.rows.lock().unwrap();

        if let Some(ref code) = new_link.code
            && rows.values().any(|r| r.code.as_deref() == Some(code))
        {
            return Err(AppError::conflict(
                "Short code already in use",
                json!({ "code": code }),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = Row {
            id,
            code: new_link.code,
            target_url: new_link.target_url,
            click_count: 0,
            created_at: Utc::now(),
            expires_at: new_link.expires_at,
        };
        let link = Self::row_to_link(&row);
        rows.insert(id, row);

        Ok(link)
    }

    async fn assign_code(&self, id: i64, code: &str) -> Result<Link, AppError> {
        let mut rows = self.rows.lock().unwrap();

        if rows
            .values()
            .any(|r| r.id != id && r.code.as_deref() == Some(code))
        {
            return Err(AppError::conflict(
                "Short code already in use",
                json!({ "code": code }),
            ));
        }

        let row = rows.get_mut(&id).ok_or_else(|| {
            AppError::not_found("Link not found for code assignment", json!({ "id": id }))
        })?;
        row.code = Some(code.to_string());

        Ok(Self::row_to_link(row))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .values()
            .find(|r| r.code.as_deref() == Some(code))
            .map(Self::row_to_link))
    }

    async fn exists_by_code(&self, code: &str) -> Result<bool, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.values().any(|r| r.code.as_deref() == Some(code)))
    }

    async fn increment_clicks(&self, code: &str) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        match rows
            .values_mut()
            .find(|r| r.code.as_deref() == Some(code))
        {
            Some(row) => {
                row.click_count += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> bool {
        true
    }
}

/// In-memory cache storing payloads without TTL expiry, for exercising the
/// hit path deterministically.
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CachedLink>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.lock().unwrap().contains_key(code)
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_link(&self, short_code: &str) -> CacheResult<Option<CachedLink>> {
        Ok(self.entries.lock().unwrap().get(short_code).cloned())
    }

    async fn set_link(
        &self,
        short_code: &str,
        link: &CachedLink,
        _ttl: Option<u64>,
    ) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(short_code.to_string(), link.clone());
        Ok(())
    }

    async fn invalidate(&self, short_code: &str) -> CacheResult<()> {
        self.entries.lock().unwrap().remove(short_code);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

pub const TEST_BASE_URL: &str = "https://sho.rt";

/// Builds application state over an in-memory store and the given cache.
pub fn create_test_state_with_cache(
    repo: Arc<InMemoryLinkRepository>,
    cache: Arc<dyn CacheService>,
) -> AppState {
    let links: Arc<dyn LinkRepository> = repo;

    let shortener = Arc::new(ShortenerService::new(
        links.clone(),
        TEST_BASE_URL.to_string(),
    ));
    let resolver = Arc::new(ResolverService::new(links.clone(), cache, 3600));
    let stats = Arc::new(StatsService::new(links));

    AppState::new(shortener, resolver, stats)
}

/// Builds application state with caching disabled.
pub fn create_test_state(repo: Arc<InMemoryLinkRepository>) -> AppState {
    create_test_state_with_cache(repo, Arc::new(NullCache))
}
