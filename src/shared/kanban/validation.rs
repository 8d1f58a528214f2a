//! Input validation for board, column and card payloads
//!
//! All checks run before a service touches the store, so a rejected request
//! never leaves a partial write behind.

use crate::shared::SharedError;

use super::board::{CreateBoardRequest, UpdateBoardRequest};
use super::card::{CreateCardRequest, UpdateCardRequest};
use super::ordering::OrderAssignment;

pub const BOARD_TITLE_LEN: (usize, usize) = (3, 50);
pub const COLUMN_TITLE_LEN: (usize, usize) = (3, 50);
pub const CARD_TITLE_LEN: (usize, usize) = (3, 100);
pub const DESCRIPTION_MAX_LEN: usize = 1000;

fn check_title(field: &str, title: &str, (min, max): (usize, usize)) -> Result<(), SharedError> {
    let len = title.trim().chars().count();
    if len < min || len > max {
        return Err(SharedError::validation(
            field,
            format!("Title must be between {} and {} characters", min, max),
        ));
    }
    Ok(())
}

pub fn validate_board_create(request: &CreateBoardRequest) -> Result<(), SharedError> {
    check_title("title", &request.title, BOARD_TITLE_LEN)
}

pub fn validate_board_update(request: &UpdateBoardRequest) -> Result<(), SharedError> {
    if let Some(title) = &request.title {
        check_title("title", title, BOARD_TITLE_LEN)?;
    }
    Ok(())
}

pub fn validate_column_title(title: &str) -> Result<(), SharedError> {
    check_title("title", title, COLUMN_TITLE_LEN)
}

fn check_description(description: Option<&String>) -> Result<(), SharedError> {
    match description {
        Some(text) if text.chars().count() > DESCRIPTION_MAX_LEN => Err(SharedError::validation(
            "description",
            format!("Description cannot exceed {} characters", DESCRIPTION_MAX_LEN),
        )),
        _ => Ok(()),
    }
}

fn check_labels(labels: Option<&Vec<String>>) -> Result<(), SharedError> {
    if labels.is_some_and(|labels| labels.iter().any(|label| label.trim().is_empty())) {
        return Err(SharedError::validation("labels", "Labels cannot be empty"));
    }
    Ok(())
}

pub fn validate_card_create(request: &CreateCardRequest) -> Result<(), SharedError> {
    check_title("title", &request.title, CARD_TITLE_LEN)?;
    check_description(request.description.as_ref())?;
    check_labels(request.labels.as_ref())
}

pub fn validate_card_update(request: &UpdateCardRequest) -> Result<(), SharedError> {
    if let Some(title) = &request.title {
        check_title("title", title, CARD_TITLE_LEN)?;
    }
    check_description(request.description.as_ref())?;
    check_labels(request.labels.as_ref())
}

/// A target position must be non-negative; values past the end are clamped later
pub fn validate_order(field: &str, order: i32) -> Result<(), SharedError> {
    if order < 0 {
        return Err(SharedError::validation(field, "Order cannot be negative"));
    }
    Ok(())
}

pub fn validate_assignments(field: &str, assignments: &[OrderAssignment]) -> Result<(), SharedError> {
    for assignment in assignments {
        validate_order(field, assignment.order)?;
    }
    Ok(())
}
