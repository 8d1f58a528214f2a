/**
 * Order Sequencer
 *
 * Computes and applies the `order` changes that keep a sibling group dense
 * (`0..count` with no gaps or duplicates) after every operation. All writes
 * are range shifts or point writes issued through the store.
 *
 * The sequencer never locks. Callers hold the `GroupLocks` guard for every
 * group they pass in, from the read of current orders until the last write.
 *
 * # Operations
 *
 * - `append` - next free slot at the end of a group
 * - `close_gap` - decrement everything above a removed position
 * - `move_within` - bridge the vacated and target positions in one shift
 * - `move_card_across` - relocate, close the source gap, open the destination slot
 * - `plan_reorder` / `reorder` - re-derive a dense sequence from client hints
 * - `resequence` - repair pass renumbering a group from its current orders
 */

use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::store::{OrderShift, SiblingGroup, Store};
use crate::shared::kanban::{OrderAssignment, OrderSlot};
use crate::shared::SharedError;

/// Order Sequencer over a store
#[derive(Clone)]
pub struct Sequencer {
    store: Arc<dyn Store>,
}

impl Sequencer {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Order for a new member appended to `group`: `max + 1`, or `0` when empty
    pub async fn append(&self, group: SiblingGroup) -> Result<i32, BackendError> {
        Ok(self.store.max_order(group).await?.map_or(0, |max| max + 1))
    }

    /// Decrement every member above `removed_order`
    ///
    /// Must run after the removed member is gone. Re-running it with the same
    /// position on an already compacted group changes nothing.
    pub async fn close_gap(&self, group: SiblingGroup, removed_order: i32) -> Result<u64, BackendError> {
        let members = self.store.members(group).await?;
        if members.iter().any(|slot| slot.order == removed_order) {
            tracing::debug!(group = %group, removed_order, "Gap already closed");
            return Ok(0);
        }

        let shifted = self
            .store
            .shift_orders(group, OrderShift::close_gap(removed_order))
            .await?;
        tracing::debug!(group = %group, removed_order, shifted, "Closed order gap");
        Ok(shifted)
    }

    /// Move member `id` from `from` to `to` inside one group
    ///
    /// `to` is clamped to the last position. Returns the final order.
    pub async fn move_within(
        &self,
        group: SiblingGroup,
        id: Uuid,
        from: i32,
        to: i32,
    ) -> Result<i32, BackendError> {
        let count = self.store.members(group).await?.len() as i32;
        let to = to.clamp(0, (count - 1).max(0));
        if to == from {
            return Ok(to);
        }

        let shift = if to < from {
            OrderShift::range(to, from - 1, 1)
        } else {
            OrderShift::range(from + 1, to, -1)
        };
        let shifted = self.store.shift_orders(group, shift.excluding(id)).await?;
        self.store.set_order(group, id, to).await?;

        tracing::debug!(group = %group, %id, from, to, shifted, "Moved within group");
        Ok(to)
    }

    /// Move a card between two different columns
    ///
    /// `dest_order` is clamped to `0..=count` of the destination. Returns the
    /// final order. A failure after the first write leaves both groups
    /// possibly non-dense; see [`Sequencer::repair`].
    pub async fn move_card_across(
        &self,
        card_id: Uuid,
        source_column: Uuid,
        from: i32,
        dest_column: Uuid,
        dest_order: i32,
    ) -> Result<i32, BackendError> {
        let source = SiblingGroup::ColumnCards(source_column);
        let dest = SiblingGroup::ColumnCards(dest_column);

        let dest_count = self.store.members(dest).await?.len() as i32;
        let to = dest_order.clamp(0, dest_count);

        self.store.relocate_card(card_id, dest_column, to).await?;
        let closed = self.store.shift_orders(source, OrderShift::close_gap(from)).await?;
        let opened = self.store.shift_orders(dest, OrderShift::open_slot(to, card_id)).await?;

        tracing::debug!(
            %card_id,
            source = %source,
            dest = %dest,
            from,
            to,
            closed,
            opened,
            "Moved card across columns"
        );
        Ok(to)
    }

    /// Re-derive a dense sequence for `members` from client `hints`
    ///
    /// Members not mentioned keep their relative order. Mentioned members are
    /// placed in ascending `(hint, payload position)` order, each at
    /// `min(hint, len)` but never before the previously placed one. A full
    /// permutation is applied exactly and an out-of-range hint lands at the
    /// end. Unknown ids, duplicate ids and negative orders are rejected.
    ///
    /// Returns the new order of every member, in the new sequence.
    pub fn plan_reorder(
        members: &[OrderSlot],
        hints: &[OrderAssignment],
    ) -> Result<Vec<OrderAssignment>, SharedError> {
        let known: HashSet<Uuid> = members.iter().map(|slot| slot.id).collect();
        let mut seen = HashSet::with_capacity(hints.len());
        for hint in hints {
            if hint.order < 0 {
                return Err(SharedError::validation("order", "Order cannot be negative"));
            }
            if !known.contains(&hint.id) {
                return Err(SharedError::validation(
                    "id",
                    format!("{} does not belong to this group", hint.id),
                ));
            }
            if !seen.insert(hint.id) {
                return Err(SharedError::validation(
                    "id",
                    format!("{} appears more than once", hint.id),
                ));
            }
        }

        let mut sequence: Vec<Uuid> = members
            .iter()
            .map(|slot| slot.id)
            .filter(|id| !seen.contains(id))
            .collect();

        let mut placed: Vec<(usize, &OrderAssignment)> = hints.iter().enumerate().collect();
        placed.sort_by_key(|(index, hint)| (hint.order, *index));
        let mut next_free = 0;
        for (_, hint) in placed {
            let slot = (hint.order as usize).min(sequence.len()).max(next_free);
            sequence.insert(slot, hint.id);
            next_free = slot + 1;
        }

        Ok(sequence
            .into_iter()
            .enumerate()
            .map(|(order, id)| OrderAssignment::new(id, order as i32))
            .collect())
    }

    /// Apply client reorder hints to `group`; returns the number of rows written
    pub async fn reorder(
        &self,
        group: SiblingGroup,
        hints: &[OrderAssignment],
    ) -> Result<u64, BackendError> {
        let members = self.store.members(group).await?;
        let plan = Self::plan_reorder(&members, hints)?;
        let written = self.write_plan(group, &members, &plan).await?;
        tracing::debug!(group = %group, hints = hints.len(), written, "Reordered group");
        Ok(written)
    }

    /// Renumber `group` densely from its current `(order, created_at)`
    ///
    /// Returns the number of rows whose order changed.
    pub async fn resequence(&self, group: SiblingGroup) -> Result<u64, BackendError> {
        let members = self.store.members(group).await?;
        let plan: Vec<OrderAssignment> = members
            .iter()
            .enumerate()
            .map(|(order, slot)| OrderAssignment::new(slot.id, order as i32))
            .collect();
        let written = self.write_plan(group, &members, &plan).await?;
        tracing::debug!(group = %group, written, "Resequenced group");
        Ok(written)
    }

    /// Compensate a multi-step sequence that failed midway
    ///
    /// Resequences every group and turns `cause` into a `Conflict` so the
    /// client knows to reload and retry. If the repair itself fails, the
    /// original error is returned.
    pub async fn repair(&self, groups: &[SiblingGroup], cause: BackendError) -> BackendError {
        tracing::error!("Reindex failed midway, repairing {} group(s): {}", groups.len(), cause);
        for group in groups {
            if let Err(e) = self.resequence(*group).await {
                tracing::error!(group = %group, "Repair failed: {}", e);
                return cause;
            }
        }
        BackendError::conflict("The board changed while it was being reordered; please retry")
    }

    /// Pass `result` through, repairing `groups` first if a store write failed
    ///
    /// Validation and lookup failures happen before any write and are
    /// returned untouched.
    pub async fn repair_on_failure<T>(
        &self,
        groups: &[SiblingGroup],
        result: Result<T, BackendError>,
    ) -> Result<T, BackendError> {
        match result {
            Err(cause @ BackendError::Store(_)) => Err(self.repair(groups, cause).await),
            other => other,
        }
    }

    async fn write_plan(
        &self,
        group: SiblingGroup,
        members: &[OrderSlot],
        plan: &[OrderAssignment],
    ) -> Result<u64, BackendError> {
        let mut written = 0;
        for assignment in plan {
            let unchanged = members
                .iter()
                .any(|slot| slot.id == assignment.id && slot.order == assignment.order);
            if !unchanged {
                self.store.set_order(group, assignment.id, assignment.order).await?;
                written += 1;
            }
        }
        Ok(written)
    }
}
