//! In-memory identity store for tests and local development
//!
//! Keeps users in a map, honours the `is_active` flag, and counts every
//! call so tests can assert how often the gate reached persistence.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::store::{IdentityStore, IdentityStoreError};
use crate::types::ResolvedUser;

#[derive(Debug, Clone)]
struct StoredUser {
    user: ResolvedUser,
    is_active: bool,
}

/// Mock identity store
#[derive(Debug, Default)]
pub struct MockIdentityStore {
    users: Mutex<HashMap<Uuid, StoredUser>>,
    find_calls: AtomicUsize,
    touch_calls: AtomicUsize,
    fail_finds: AtomicBool,
    fail_touches: AtomicBool,
}

impl MockIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a user row
    pub fn insert_user(&self, user: ResolvedUser, is_active: bool) {
        self.lock().insert(user.id, StoredUser { user, is_active });
    }

    /// Flip the `is_active` flag on an existing row
    pub fn set_active(&self, id: Uuid, is_active: bool) {
        if let Some(stored) = self.lock().get_mut(&id) {
            stored.is_active = is_active;
        }
    }

    /// Current persisted snapshot, regardless of `is_active`
    pub fn user(&self, id: Uuid) -> Option<ResolvedUser> {
        self.lock().get(&id).map(|stored| stored.user.clone())
    }

    /// Make subsequent `find_active_user` calls fail
    pub fn fail_finds(&self, fail: bool) {
        self.fail_finds.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `touch_last_active` calls fail
    pub fn fail_touches(&self, fail: bool) {
        self.fail_touches.store(fail, Ordering::SeqCst);
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn touch_calls(&self) -> usize {
        self.touch_calls.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, StoredUser>> {
        // Poisoning only means another test panicked; the map is still valid
        self.users.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl IdentityStore for MockIdentityStore {
    async fn find_active_user(&self, id: Uuid) -> Result<Option<ResolvedUser>, IdentityStoreError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_finds.load(Ordering::SeqCst) {
            return Err(IdentityStoreError::Unavailable(
                "mock store configured to fail".to_string(),
            ));
        }

        Ok(self
            .lock()
            .get(&id)
            .filter(|stored| stored.is_active)
            .map(|stored| stored.user.clone()))
    }

    async fn touch_last_active(&self, id: Uuid) -> Result<(), IdentityStoreError> {
        self.touch_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_touches.load(Ordering::SeqCst) {
            return Err(IdentityStoreError::Unavailable(
                "mock store configured to fail".to_string(),
            ));
        }

        if let Some(stored) = self.lock().get_mut(&id) {
            stored.user.last_active = Some(Utc::now());
        }

        Ok(())
    }
}
