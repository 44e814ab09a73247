//! Integration tests for sitecanvas.
//!
//! These tests drive the editor end-to-end through its public API and the
//! input event port.

mod undo_redo_tests;
