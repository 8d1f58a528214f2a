//! Property-based tests

mod ordering_proptest;
