/**
 * Per-Group Locks
 *
 * One async mutex per sibling group. Every sequence that renumbers a group
 * (create, delete + close gap, reorder, move) holds the group's lock from
 * the moment it reads current orders until its last write.
 *
 * Operations touching two groups lock them in sorted order, so two moves in
 * opposite directions between the same columns cannot deadlock.
 *
 * The locks are process-local. Running several server processes against one
 * database needs a lock in the database instead.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::backend::store::SiblingGroup;

/// Keyed registry of group locks
#[derive(Clone, Default)]
pub struct GroupLocks {
    locks: Arc<Mutex<HashMap<SiblingGroup, Arc<AsyncMutex<()>>>>>,
}

/// Held locks; released on drop
#[must_use = "the groups are unlocked as soon as the guard is dropped"]
pub struct GroupGuard {
    groups: Vec<SiblingGroup>,
    _guards: Vec<OwnedMutexGuard<()>>,
}

impl GroupGuard {
    /// Groups held by this guard, in locking order
    pub fn groups(&self) -> &[SiblingGroup] {
        &self.groups
    }
}

impl GroupLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&self, group: SiblingGroup) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(group).or_default().clone()
    }

    /// Lock a single group
    pub async fn lock(&self, group: SiblingGroup) -> GroupGuard {
        self.lock_all(&[group]).await
    }

    /// Lock several groups in a fixed global order; duplicates are locked once
    pub async fn lock_all(&self, groups: &[SiblingGroup]) -> GroupGuard {
        let mut ordered = groups.to_vec();
        ordered.sort();
        ordered.dedup();

        let mut guards = Vec::with_capacity(ordered.len());
        for group in &ordered {
            guards.push(self.handle(*group).lock_owned().await);
        }

        GroupGuard {
            groups: ordered,
            _guards: guards,
        }
    }

    /// Drop entries nobody holds or waits for; returns how many were removed
    pub fn sweep_idle(&self) -> usize {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        let before = locks.len();
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        before - locks.len()
    }

    /// Number of tracked groups
    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
