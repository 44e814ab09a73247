//! Single test binary entry point.
//!
//! All tests are compiled into one binary to keep linking to a single pass.
//!
//! Structure:
//! - helpers: tree builders and recording hosts/observers
//! - integration: editor workflows and the interaction state machine
//! - unit: single-component tests against the public API

mod integration;
mod unit;
