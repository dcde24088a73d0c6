// Shared helpers for integration tests. Each aggregator declares this module
// once and its submodules reach it as `crate::common`, so not every helper is
// used everywhere.
#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;
