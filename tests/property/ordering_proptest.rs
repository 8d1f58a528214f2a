//! Property-based tests for the ordering protocol
//!
//! Random sequences of create, delete, move and reorder must always leave
//! every sibling group holding the dense sequence `0..n`: the cards of each
//! column, and the columns of a board.

use proptest::prelude::*;
use std::sync::Arc;
use taskboard::backend::boards::BoardService;
use taskboard::backend::cards::CardService;
use taskboard::backend::columns::ColumnService;
use taskboard::backend::{BoardRooms, GroupLocks, MemoryStore, Store};
use taskboard::shared::kanban::{
    Board, CreateBoardRequest, CreateCardRequest, CreateColumnRequest, MoveCardRequest, MoveColumnRequest,
    ReorderCardsRequest, ReorderColumnsRequest,
};
use taskboard::shared::OrderAssignment;
use uuid::Uuid;

#[derive(Debug, Clone)]
enum Op {
    Create { column: usize },
    Delete { pick: usize },
    Move { pick: usize, column: usize, order: i32 },
    Reorder { column: usize, pick: usize, order: i32 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..2usize).prop_map(|column| Op::Create { column }),
        any::<usize>().prop_map(|pick| Op::Delete { pick }),
        (any::<usize>(), 0..2usize, 0..8i32).prop_map(|(pick, column, order)| Op::Move { pick, column, order }),
        (0..2usize, any::<usize>(), 0..8i32).prop_map(|(column, pick, order)| Op::Reorder { column, pick, order }),
    ]
}

struct Harness {
    store: Arc<dyn Store>,
    cards: CardService,
    owner: Uuid,
    columns: Vec<Uuid>,
}

impl Harness {
    async fn new() -> Self {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let locks = GroupLocks::new();
        let rooms = BoardRooms::new();
        let owner = Uuid::new_v4();

        let board = new_board(&store, &locks, &rooms, owner).await;

        let column_service = ColumnService::new(store.clone(), locks.clone(), rooms.clone());
        let mut columns = Vec::new();
        for title in ["Left", "Right"] {
            let column = column_service
                .create_column(
                    owner,
                    CreateColumnRequest {
                        title: title.to_string(),
                        board_id: board.id,
                    },
                )
                .await
                .unwrap();
            columns.push(column.id);
        }

        Self {
            cards: CardService::new(store.clone(), locks, rooms),
            store,
            owner,
            columns,
        }
    }

    async fn all_cards(&self) -> Vec<Uuid> {
        let mut ids = Vec::new();
        for column in &self.columns {
            ids.extend(self.store.cards_in_column(*column).await.unwrap().into_iter().map(|c| c.id));
        }
        ids
    }

    async fn apply(&self, op: &Op) {
        let cards = self.all_cards().await;
        match *op {
            Op::Create { column } => {
                let request = CreateCardRequest {
                    title: "Card".to_string(),
                    column_id: self.columns[column],
                    description: None,
                    priority: None,
                    labels: None,
                    due_date: None,
                };
                self.cards.create_card(self.owner, request).await.unwrap();
            }
            Op::Delete { pick } if !cards.is_empty() => {
                let id = cards[pick % cards.len()];
                self.cards.delete_card(self.owner, id).await.unwrap();
            }
            Op::Move { pick, column, order } if !cards.is_empty() => {
                let id = cards[pick % cards.len()];
                let request = MoveCardRequest {
                    destination_column_id: self.columns[column],
                    order,
                };
                self.cards.move_card(self.owner, id, request).await.unwrap();
            }
            Op::Reorder { column, pick, order } => {
                let members = self.store.cards_in_column(self.columns[column]).await.unwrap();
                if members.is_empty() {
                    return;
                }
                let request = ReorderCardsRequest {
                    column_id: self.columns[column],
                    card_orders: vec![OrderAssignment::new(members[pick % members.len()].id, order)],
                };
                self.cards.reorder_cards(self.owner, request).await.unwrap();
            }
            _ => {}
        }
    }

    async fn orders(&self, column: Uuid) -> Vec<i32> {
        let mut orders: Vec<i32> = self
            .store
            .cards_in_column(column)
            .await
            .unwrap()
            .into_iter()
            .map(|card| card.order)
            .collect();
        orders.sort_unstable();
        orders
    }
}

#[derive(Debug, Clone)]
enum ColumnOp {
    Create,
    Delete { pick: usize },
    Move { pick: usize, order: i32 },
    Reorder { pick: usize, order: i32 },
}

fn column_op_strategy() -> impl Strategy<Value = ColumnOp> {
    prop_oneof![
        Just(ColumnOp::Create),
        any::<usize>().prop_map(|pick| ColumnOp::Delete { pick }),
        (any::<usize>(), 0..8i32).prop_map(|(pick, order)| ColumnOp::Move { pick, order }),
        (any::<usize>(), 0..8i32).prop_map(|(pick, order)| ColumnOp::Reorder { pick, order }),
    ]
}

async fn new_board(store: &Arc<dyn Store>, locks: &GroupLocks, rooms: &BoardRooms, owner: Uuid) -> Board {
    BoardService::new(store.clone(), locks.clone(), rooms.clone())
        .create_board(
            owner,
            CreateBoardRequest {
                title: "Property".to_string(),
                icon: None,
                background: None,
            },
        )
        .await
        .unwrap()
}

struct ColumnHarness {
    store: Arc<dyn Store>,
    columns: ColumnService,
    owner: Uuid,
    board_id: Uuid,
}

impl ColumnHarness {
    async fn new() -> Self {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let locks = GroupLocks::new();
        let rooms = BoardRooms::new();
        let owner = Uuid::new_v4();
        let board = new_board(&store, &locks, &rooms, owner).await;

        Self {
            columns: ColumnService::new(store.clone(), locks, rooms),
            store,
            owner,
            board_id: board.id,
        }
    }

    async fn apply(&self, op: &ColumnOp) {
        let members = self.store.columns_in_board(self.board_id).await.unwrap();
        match *op {
            ColumnOp::Create => {
                let request = CreateColumnRequest {
                    title: "Column".to_string(),
                    board_id: self.board_id,
                };
                self.columns.create_column(self.owner, request).await.unwrap();
            }
            ColumnOp::Delete { pick } if !members.is_empty() => {
                let id = members[pick % members.len()].id;
                self.columns.delete_column(self.owner, id).await.unwrap();
            }
            ColumnOp::Move { pick, order } if !members.is_empty() => {
                let id = members[pick % members.len()].id;
                self.columns
                    .move_column(self.owner, id, MoveColumnRequest { order })
                    .await
                    .unwrap();
            }
            ColumnOp::Reorder { pick, order } if !members.is_empty() => {
                let request = ReorderColumnsRequest {
                    board_id: self.board_id,
                    column_orders: vec![OrderAssignment::new(members[pick % members.len()].id, order)],
                };
                self.columns.reorder_columns(self.owner, request).await.unwrap();
            }
            _ => {}
        }
    }

    async fn orders(&self) -> Vec<i32> {
        let mut orders: Vec<i32> = self
            .store
            .columns_in_board(self.board_id)
            .await
            .unwrap()
            .into_iter()
            .map(|column| column.order)
            .collect();
        orders.sort_unstable();
        orders
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_card_groups_stay_dense(ops in prop::collection::vec(op_strategy(), 1..30)) {
        let violations = tokio_test::block_on(async {
            let harness = Harness::new().await;
            let mut violations = Vec::new();
            for (step, op) in ops.iter().enumerate() {
                harness.apply(op).await;
                for column in &harness.columns {
                    let orders = harness.orders(*column).await;
                    let expected: Vec<i32> = (0..orders.len() as i32).collect();
                    if orders != expected {
                        violations.push(format!("step {} {:?}: {:?}", step, op, orders));
                    }
                }
            }
            violations
        });
        prop_assert!(violations.is_empty(), "{:?}", violations);
    }

    #[test]
    fn test_column_groups_stay_dense(ops in prop::collection::vec(column_op_strategy(), 1..30)) {
        let violations = tokio_test::block_on(async {
            let harness = ColumnHarness::new().await;
            let mut violations = Vec::new();
            for (step, op) in ops.iter().enumerate() {
                harness.apply(op).await;
                let orders = harness.orders().await;
                let expected: Vec<i32> = (0..orders.len() as i32).collect();
                if orders != expected {
                    violations.push(format!("step {} {:?}: {:?}", step, op, orders));
                }
            }
            violations
        });
        prop_assert!(violations.is_empty(), "{:?}", violations);
    }

    #[test]
    fn test_card_count_is_conserved_by_moves(
        creates in 1..8usize,
        moves in prop::collection::vec((any::<usize>(), 0..2usize, 0..8i32), 0..20),
    ) {
        let total = tokio_test::block_on(async {
            let harness = Harness::new().await;
            for i in 0..creates {
                harness.apply(&Op::Create { column: i % 2 }).await;
            }
            for (pick, column, order) in moves {
                harness.apply(&Op::Move { pick, column, order }).await;
            }
            harness.all_cards().await.len()
        });
        prop_assert_eq!(total, creates);
    }
}
