//! Test suite for taskboard
//!
//! This module organizes all tests

pub mod common;
pub mod integration;
pub mod property;
