//! Ordering Module
//!
//! Keeps the `order` field of every sibling group dense: the columns of a
//! board and the cards of a column always carry `0..count` after a completed
//! operation.
//!
//! # Module Structure
//!
//! ```text
//! ordering/
//! ├── mod.rs       - Module exports and documentation
//! ├── sequencer.rs - Order arithmetic and repair
//! └── locks.rs     - Per-group async mutexes
//! ```
//!
//! # Usage
//!
//! A service locks every group it will renumber, then calls the sequencer:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskboard::backend::ordering::{GroupLocks, Sequencer};
//! use taskboard::backend::store::{MemoryStore, SiblingGroup};
//! use uuid::Uuid;
//!
//! # async fn example() -> Result<(), taskboard::backend::BackendError> {
//! let sequencer = Sequencer::new(Arc::new(MemoryStore::new()));
//! let locks = GroupLocks::new();
//! let group = SiblingGroup::BoardColumns(Uuid::new_v4());
//!
//! let _guard = locks.lock(group).await;
//! let order = sequencer.append(group).await?;
//! assert_eq!(order, 0);
//! # Ok(())
//! # }
//! ```

/// Order arithmetic and repair
pub mod sequencer;

/// Per-group locks
pub mod locks;

pub use locks::{GroupGuard, GroupLocks};
pub use sequencer::Sequencer;
