//! Test suite for huddle
//!
//! This module organizes all integration tests

pub mod common;
pub mod integration;
