//! Mock implementations of the auth traits
//!
//! Both mocks count calls so tests can assert how many network round trips
//! a lifecycle operation would have made.

// Allow missing error/panic docs for test mocks - they are designed to be simple
// and errors are clearly indicated by their return types
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use psnlink_domain::{PersistedTokens, SessionHandle, TokenPair};

use super::time::MockClock;
use crate::auth::{ExchangeClientError, StoreError, TokenExchange, TokenStore};
use crate::time::{Clock, SystemClock};

type Scripted<T> = Arc<Mutex<Result<T, String>>>;

fn unscripted<T>() -> Scripted<T> {
    Arc::new(Mutex::new(Err("no scripted response".to_string())))
}

/// In-memory token store
///
/// `persisted_at` is taken from the attached clock on every save, standing
/// in for a file modification time.
#[derive(Debug, Clone)]
pub struct MockTokenStore {
    record: Arc<Mutex<Option<PersistedTokens>>>,
    clock: Option<MockClock>,
    save_calls: Arc<AtomicUsize>,
    fail_saves: Arc<Mutex<bool>>,
}

impl MockTokenStore {
    /// Empty store stamped with the system clock.
    pub fn new() -> Self {
        Self {
            record: Arc::new(Mutex::new(None)),
            clock: None,
            save_calls: Arc::new(AtomicUsize::new(0)),
            fail_saves: Arc::new(Mutex::new(false)),
        }
    }

    /// Empty store stamped with a mock clock.
    pub fn with_clock(clock: MockClock) -> Self {
        Self { clock: Some(clock), ..Self::new() }
    }

    /// Write a record directly, as if another process had saved it.
    pub fn seed(&self, pair: TokenPair) {
        *self.record.lock().unwrap() = Some(PersistedTokens::new(pair, self.now()));
    }

    /// Write a record with an explicit timestamp.
    pub fn seed_at(&self, pair: TokenPair, persisted_at: DateTime<Utc>) {
        *self.record.lock().unwrap() = Some(PersistedTokens::new(pair, persisted_at));
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<PersistedTokens> {
        self.record.lock().unwrap().clone()
    }

    #[must_use]
    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    /// Force subsequent saves to fail with an I/O error.
    pub fn fail_saves(&self, fail: bool) {
        *self.fail_saves.lock().unwrap() = fail;
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.as_ref().map_or_else(|| SystemClock.now(), Clock::now)
    }
}

impl Default for MockTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStore for MockTokenStore {
    async fn load(&self) -> Option<PersistedTokens> {
        self.snapshot()
    }

    async fn save(&self, pair: &TokenPair) -> Result<(), StoreError> {
        if *self.fail_saves.lock().unwrap() {
            return Err(StoreError::Io(std::io::Error::other("mock store write failure")));
        }
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        self.seed(pair.clone());
        Ok(())
    }

    async fn last_write_time(&self) -> Option<DateTime<Utc>> {
        self.snapshot().map(|record| record.persisted_at)
    }
}

/// Scripted token exchange
///
/// Failures are configured as plain strings and surface as a 400 rejection.
#[derive(Debug, Clone)]
pub struct MockTokenExchange {
    session_response: Scripted<TokenPair>,
    refresh_response: Scripted<TokenPair>,
    fetched_session: Scripted<String>,
    session_calls: Arc<AtomicUsize>,
    refresh_calls: Arc<AtomicUsize>,
    last_session: Arc<Mutex<Option<String>>>,
    last_refresh_token: Arc<Mutex<Option<String>>>,
}

impl MockTokenExchange {
    /// Every call fails until a response is configured.
    pub fn new() -> Self {
        Self {
            session_response: unscripted(),
            refresh_response: unscripted(),
            fetched_session: unscripted(),
            session_calls: Arc::new(AtomicUsize::new(0)),
            refresh_calls: Arc::new(AtomicUsize::new(0)),
            last_session: Arc::new(Mutex::new(None)),
            last_refresh_token: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_session_response(&self, response: Result<TokenPair, String>) {
        *self.session_response.lock().unwrap() = response;
    }

    pub fn set_refresh_response(&self, response: Result<TokenPair, String>) {
        *self.refresh_response.lock().unwrap() = response;
    }

    pub fn set_fetched_session(&self, response: Result<String, String>) {
        *self.fetched_session.lock().unwrap() = response;
    }

    #[must_use]
    pub fn session_calls(&self) -> usize {
        self.session_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn last_session(&self) -> Option<String> {
        self.last_session.lock().unwrap().clone()
    }

    #[must_use]
    pub fn last_refresh_token(&self) -> Option<String> {
        self.last_refresh_token.lock().unwrap().clone()
    }

    fn play<T: Clone>(script: &Scripted<T>) -> Result<T, ExchangeClientError> {
        script
            .lock()
            .unwrap()
            .clone()
            .map_err(|body| ExchangeClientError::Rejected { status: 400, body })
    }
}

impl Default for MockTokenExchange {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenExchange for MockTokenExchange {
    async fn exchange_session(
        &self,
        session: &SessionHandle,
    ) -> Result<TokenPair, ExchangeClientError> {
        self.session_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_session.lock().unwrap() = Some(session.as_str().to_string());
        Self::play(&self.session_response)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ExchangeClientError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_refresh_token.lock().unwrap() = Some(refresh_token.to_string());
        Self::play(&self.refresh_response)
    }

    async fn fetch_session_handle(&self) -> Result<SessionHandle, ExchangeClientError> {
        Self::play(&self.fetched_session).map(SessionHandle::new)
    }
}
