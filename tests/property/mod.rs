//! Property-based tests

mod guard_proptest;
mod pricing_proptest;
