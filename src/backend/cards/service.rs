/**
 * Card Service
 *
 * Cards are the sibling group of a column. Creation appends, deletion closes
 * the gap, and a move is either a same-column bridge or a three-step
 * cross-column relocation. Both the source and the destination column must
 * belong to the caller before anything is written.
 */

use std::sync::Arc;
use uuid::Uuid;

use crate::backend::boards::guard::{owned_card, owned_column, require};
use crate::backend::error::BackendError;
use crate::backend::ordering::{GroupLocks, Sequencer};
use crate::backend::realtime::BoardRooms;
use crate::backend::store::{SiblingGroup, Store};
use crate::shared::kanban::validation::{
    validate_assignments, validate_card_create, validate_card_update, validate_order,
};
use crate::shared::kanban::{
    Card, Column, CreateCardRequest, MoveCardRequest, ReorderCardsRequest, UpdateCardRequest,
};
use crate::shared::{EventType, RealtimeEvent};

#[derive(Clone)]
pub struct CardService {
    store: Arc<dyn Store>,
    sequencer: Sequencer,
    locks: GroupLocks,
    rooms: BoardRooms,
}

impl CardService {
    pub fn new(store: Arc<dyn Store>, locks: GroupLocks, rooms: BoardRooms) -> Self {
        Self {
            sequencer: Sequencer::new(store.clone()),
            store,
            locks,
            rooms,
        }
    }

    async fn column(&self, column_id: Uuid) -> Result<Column, BackendError> {
        require(self.store.column(column_id).await?, column_id)
    }

    /// Append a card to the end of its column
    pub async fn create_card(&self, principal: Uuid, request: CreateCardRequest) -> Result<Card, BackendError> {
        validate_card_create(&request)?;
        owned_column(self.store.as_ref(), request.column_id, principal).await?;

        let group = SiblingGroup::ColumnCards(request.column_id);
        let _guard = self.locks.lock(group).await;
        let column = self.column(request.column_id).await?;
        let order = self.sequencer.append(group).await?;

        let mut card = Card::new(&column, request.title.trim().to_string(), order);
        card.description = request.description.unwrap_or_default();
        card.priority = request.priority.unwrap_or_default();
        card.labels = request.labels.unwrap_or_default();
        card.due_date = request.due_date;
        self.store.insert_card(&card).await?;

        tracing::info!("Created card {} at order {} in column {}", card.id, order, column.id);
        self.rooms
            .publish(RealtimeEvent::of(EventType::CardCreated, column.board_id, &card));
        Ok(card)
    }

    /// Cards of a column in ascending order
    pub async fn list_cards(&self, principal: Uuid, column_id: Uuid) -> Result<Vec<Card>, BackendError> {
        let column = owned_column(self.store.as_ref(), column_id, principal).await?;
        Ok(self.store.cards_in_column(column.id).await?)
    }

    pub async fn get_card(&self, principal: Uuid, card_id: Uuid) -> Result<Card, BackendError> {
        owned_card(self.store.as_ref(), card_id, principal).await
    }

    /// Update card fields; `order` and `column_id` are never touched
    pub async fn update_card(
        &self,
        principal: Uuid,
        card_id: Uuid,
        mut request: UpdateCardRequest,
    ) -> Result<Card, BackendError> {
        validate_card_update(&request)?;
        let card = owned_card(self.store.as_ref(), card_id, principal).await?;
        let _guard = self.locks.lock(SiblingGroup::ColumnCards(card.column_id)).await;
        let mut card = self.reload_in(card_id, card.column_id).await?;

        request.title = request.title.map(|title| title.trim().to_string());
        card.apply_update(request);
        if !self.store.save_card(&card).await? {
            return Err(BackendError::not_found("Card", card.id));
        }

        let column = self.column(card.column_id).await?;
        self.rooms
            .publish(RealtimeEvent::of(EventType::CardUpdated, column.board_id, &card));
        Ok(card)
    }

    /// Delete a card and close the gap it leaves
    pub async fn delete_card(&self, principal: Uuid, card_id: Uuid) -> Result<(), BackendError> {
        let card = owned_card(self.store.as_ref(), card_id, principal).await?;
        let group = SiblingGroup::ColumnCards(card.column_id);
        let _guard = self.locks.lock(group).await;

        let card = self.reload_in(card_id, card.column_id).await?;
        self.store.delete_card(card.id).await?;
        let result = self.sequencer.close_gap(group, card.order).await;
        self.sequencer.repair_on_failure(&[group], result).await?;

        let column = self.column(card.column_id).await?;
        self.rooms
            .publish(RealtimeEvent::deleted(EventType::CardDeleted, column.board_id, card.id));
        Ok(())
    }

    /// Re-derive the card order of a column from client hints
    ///
    /// Returns every card of the column in its new order.
    pub async fn reorder_cards(
        &self,
        principal: Uuid,
        request: ReorderCardsRequest,
    ) -> Result<Vec<Card>, BackendError> {
        validate_assignments("cardOrders", &request.card_orders)?;
        let column = owned_column(self.store.as_ref(), request.column_id, principal).await?;

        let group = SiblingGroup::ColumnCards(column.id);
        let _guard = self.locks.lock(group).await;
        let result = self.sequencer.reorder(group, &request.card_orders).await;
        self.sequencer.repair_on_failure(&[group], result).await?;

        let cards = self.store.cards_in_column(column.id).await?;
        self.rooms
            .publish(RealtimeEvent::of(EventType::CardsReordered, column.board_id, &cards));
        Ok(cards)
    }

    /// Move a card to `order` in the destination column
    ///
    /// The destination may be the card's own column. The target position is
    /// clamped to the valid range of the destination. Both columns' card
    /// groups stay locked for the whole sequence.
    pub async fn move_card(
        &self,
        principal: Uuid,
        card_id: Uuid,
        request: MoveCardRequest,
    ) -> Result<Card, BackendError> {
        validate_order("order", request.order)?;
        let card = owned_card(self.store.as_ref(), card_id, principal).await?;
        owned_column(self.store.as_ref(), request.destination_column_id, principal).await?;

        let source_id = card.column_id;
        let dest_id = request.destination_column_id;
        let source = SiblingGroup::ColumnCards(source_id);
        let dest = SiblingGroup::ColumnCards(dest_id);
        let _guard = self.locks.lock_all(&[source, dest]).await;

        let card = self.reload_in(card_id, source_id).await?;
        let source_column = self.column(source_id).await?;
        let dest_column = self.column(dest_id).await?;

        let result = if source_id == dest_id {
            self.sequencer
                .move_within(source, card.id, card.order, request.order)
                .await
        } else {
            self.sequencer
                .move_card_across(card.id, source_id, card.order, dest_id, request.order)
                .await
        };
        let order = self.sequencer.repair_on_failure(&[source, dest], result).await?;

        let moved = require(self.store.card(card_id).await?, card_id)?;
        tracing::info!(
            "Moved card {} from column {} (order {}) to column {} (order {})",
            card_id,
            source_id,
            card.order,
            dest_id,
            order
        );

        self.rooms
            .publish(RealtimeEvent::of(EventType::CardMoved, dest_column.board_id, &moved));
        if source_column.board_id != dest_column.board_id {
            self.rooms
                .publish(RealtimeEvent::of(EventType::CardMoved, source_column.board_id, &moved));
        }
        Ok(moved)
    }

    /// Reload a card under its column lock
    ///
    /// A card that changed column between the ownership check and the lock
    /// is reported as a conflict, since the wrong group is locked.
    async fn reload_in(&self, card_id: Uuid, column_id: Uuid) -> Result<Card, BackendError> {
        let card: Card = require(self.store.card(card_id).await?, card_id)?;
        if card.column_id != column_id {
            return Err(BackendError::conflict(
                "The card was moved by another request; please retry",
            ));
        }
        Ok(card)
    }
}
