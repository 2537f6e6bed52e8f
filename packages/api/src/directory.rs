//! # User directory cache
//!
//! Author names come from `GET /api/users`, which returns every user. Loading it
//! for every page is the default; [`DirectoryCache`] can keep the last directory
//! for a configurable lifetime instead. A lifetime of zero reproduces
//! the per-page refetch exactly, and [`DirectoryCache::invalidate`] forces the
//! next page to refetch regardless.
//!
//! The cache is single-threaded (`Rc`/`RefCell`), like everything else in the UI.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};

use crate::models::User;

/// User id to user.
pub type Directory = HashMap<i64, User>;

#[derive(Debug)]
struct Cached {
    fetched_at: DateTime<Utc>,
    users: Rc<Directory>,
}

#[derive(Debug)]
pub struct DirectoryCache {
    ttl: Duration,
    entry: RefCell<Option<Cached>>,
}

impl DirectoryCache {
    pub fn new(ttl_secs: u32) -> Self {
        Self {
            ttl: Duration::seconds(i64::from(ttl_secs)),
            entry: RefCell::new(None),
        }
    }

    /// The cached directory, if one is still fresh at `now`.
    pub fn get(&self, now: DateTime<Utc>) -> Option<Rc<Directory>> {
        if self.ttl <= Duration::zero() {
            return None;
        }
        let entry = self.entry.borrow();
        let cached = entry.as_ref()?;
        let age = now - cached.fetched_at;
        (age >= Duration::zero() && age < self.ttl).then(|| Rc::clone(&cached.users))
    }

    /// Index a freshly fetched user list and remember it.
    pub fn store(&self, users: Vec<User>, now: DateTime<Utc>) -> Rc<Directory> {
        let directory: Rc<Directory> = Rc::new(users.into_iter().map(|u| (u.id, u)).collect());
        *self.entry.borrow_mut() = Some(Cached {
            fetched_at: now,
            users: Rc::clone(&directory),
        });
        directory
    }

    pub fn invalidate(&self) {
        self.entry.borrow_mut().take();
    }
}
