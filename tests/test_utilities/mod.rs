//! Shared helpers for integration tests
#![allow(dead_code)]

pub mod mocks;
pub mod rating_server;
