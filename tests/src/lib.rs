//! Workspace-level tests for okspot
//!
//! `support` holds test doubles shared by the suites and the examples.

pub mod support;


#[cfg(test)]
mod unit_tests;
