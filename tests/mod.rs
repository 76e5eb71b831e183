//! Test suite for RemoteDesk
//!
//! This module organizes all tests

pub mod common;
pub mod integration;
pub mod property;
