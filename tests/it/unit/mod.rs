//! Unit tests for sitecanvas.

mod placement_tests;
mod selection_tests;
mod settings_tests;
mod settings_watcher_tests;
mod snapshot_tests;
mod spatial_index_tests;
mod viewport_tests;
