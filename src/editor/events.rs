//! Observer port: hosts subscribe instead of polling editor state.

use crate::viewport::Viewport;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// Full new selection, sorted
    SelectionChanged(Vec<String>),
    /// The scene tree was replaced by a new value
    TreeChanged,
    ViewportChanged(Viewport),
    InteractionChanged {
        from: &'static str,
        to: &'static str,
    },
}

pub trait EditorObserver {
    fn on_event(&mut self, event: &EditorEvent);
}

impl<F> EditorObserver for F
where
    F: FnMut(&EditorEvent),
{
    fn on_event(&mut self, event: &EditorEvent) {
        self(event)
    }
}

/// Handle returned by [`crate::CanvasEditor::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u64);

pub(crate) type ObserverList = Vec<(ObserverId, Box<dyn EditorObserver>)>;

pub(crate) fn notify_all(observers: &mut ObserverList, event: &EditorEvent) {
    for (_, observer) in observers.iter_mut() {
        observer.on_event(event);
    }
}
