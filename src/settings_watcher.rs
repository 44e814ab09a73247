//! Hot reload for the settings file.
//!
//! The watcher observes the file's directory (editors often replace files by
//! rename) and queues events for the file itself. The editor drains the
//! queue with [`SettingsWatcher::poll`] between input events.

use crate::error::SettingsResult;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error};

pub use crate::settings::default_settings_path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    Created,
    Modified,
    Deleted,
    Error(String),
}

fn map_event(event: &Event, file_name: Option<&OsString>) -> Option<SettingsEvent> {
    let touches_file = event
        .paths
        .iter()
        .any(|p| p.file_name() == file_name.map(|n| n.as_os_str()));
    if !touches_file {
        return None;
    }
    match event.kind {
        EventKind::Create(_) => Some(SettingsEvent::Created),
        EventKind::Modify(_) => Some(SettingsEvent::Modified),
        EventKind::Remove(_) => Some(SettingsEvent::Deleted),
        _ => None,
    }
}

pub struct SettingsWatcher {
    _watcher: RecommendedWatcher,
    path: PathBuf,
    events: Arc<Mutex<VecDeque<SettingsEvent>>>,
}

impl SettingsWatcher {
    pub fn new(path: PathBuf) -> SettingsResult<Self> {
        let events = Arc::new(Mutex::new(VecDeque::new()));
        let queue = Arc::clone(&events);
        let file_name = path.file_name().map(|n| n.to_os_string());

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Some(mapped) = map_event(&event, file_name.as_ref()) {
                    debug!(?mapped, "settings file event");
                    queue.lock().push_back(mapped);
                }
            }
            Err(e) => {
                error!(error = %e, "settings watcher error");
                queue.lock().push_back(SettingsEvent::Error(e.to_string()));
            }
        })?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        debug!(path = %path.display(), "watching settings file");

        Ok(Self {
            _watcher: watcher,
            path,
            events,
        })
    }

    /// Watch the default settings location, if the platform has one.
    pub fn for_default_path() -> Option<SettingsResult<Self>> {
        default_settings_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Next queued event, oldest first.
    pub fn poll(&mut self) -> Option<SettingsEvent> {
        self.events.lock().pop_front()
    }

    pub fn pending(&self) -> usize {
        self.events.lock().len()
    }

    #[cfg(test)]
    fn inject(&self, event: SettingsEvent) {
        self.events.lock().push_back(event);
    }
}
