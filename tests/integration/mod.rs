//! Integration tests for marketplace-client
//!
//! These tests run the client against a mock backend and check what
//! actually went over the wire.

pub mod account_tests;
pub mod authorization_tests;
pub mod concurrency_tests;
