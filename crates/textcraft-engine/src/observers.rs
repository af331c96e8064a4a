use std::cell::RefCell;
use std::rc::Rc;

use crate::editing::Document;

/// Receives change notifications from a [`DocumentSubject`]
pub trait DocumentObserver {
    /// Label used when reporting failures
    fn name(&self) -> &str {
        "observer"
    }

    fn on_document_changed(&mut self, document: &Document) -> Result<(), ObserverError>;

    fn on_cursor_moved(&mut self, position: usize) -> Result<(), ObserverError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ObserverError(pub String);

/// One or more observers failed during a fan-out; every other observer was
/// still notified
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} observer(s) failed: {}", .failures.len(), describe(.failures))]
pub struct NotifyError {
    pub failures: Vec<(String, ObserverError)>,
}

fn describe(failures: &[(String, ObserverError)]) -> String {
    failures
        .iter()
        .map(|(name, err)| format!("{name}: {err}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Handle returned by [`DocumentSubject::attach`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

pub type SharedObserver = Rc<RefCell<dyn DocumentObserver>>;

/// Synchronous, in-process fan-out to attached observers
///
/// Observers are notified in attach order. A failing observer does not stop
/// the fan-out: its error is logged and collected into the returned
/// [`NotifyError`].
#[derive(Default)]
pub struct DocumentSubject {
    observers: Vec<(ObserverId, SharedObserver)>,
    next_id: u64,
}

impl std::fmt::Debug for DocumentSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentSubject")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl DocumentSubject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, observer: SharedObserver) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Remove an observer, handing it back if it was attached
    pub fn detach(&mut self, id: ObserverId) -> Option<SharedObserver> {
        let index = self.observers.iter().position(|(other, _)| *other == id)?;
        Some(self.observers.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// # Errors
    ///
    /// Returns [`NotifyError`] naming every observer that failed.
    pub fn notify_document_changed(&self, document: &Document) -> Result<(), NotifyError> {
        self.fan_out(|observer| observer.on_document_changed(document))
    }

    /// # Errors
    ///
    /// Returns [`NotifyError`] naming every observer that failed.
    pub fn notify_cursor_moved(&self, position: usize) -> Result<(), NotifyError> {
        self.fan_out(|observer| observer.on_cursor_moved(position))
    }

    fn fan_out(
        &self,
        mut notify: impl FnMut(&mut dyn DocumentObserver) -> Result<(), ObserverError>,
    ) -> Result<(), NotifyError> {
        let mut failures = Vec::new();
        for (_, observer) in &self.observers {
            let mut observer = observer.borrow_mut();
            if let Err(err) = notify(&mut *observer) {
                log::warn!("observer '{}' failed: {err}", observer.name());
                failures.push((observer.name().to_string(), err));
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(NotifyError { failures })
        }
    }
}

/// Reports every change through the `log` facade
#[derive(Debug, Clone)]
pub struct LoggingObserver {
    name: String,
}

impl LoggingObserver {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl DocumentObserver for LoggingObserver {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_document_changed(&mut self, document: &Document) -> Result<(), ObserverError> {
        log::info!("[{}] Document changed: {} characters", self.name, document.len());
        Ok(())
    }

    fn on_cursor_moved(&mut self, position: usize) -> Result<(), ObserverError> {
        log::info!("[{}] Cursor moved to position: {position}", self.name);
        Ok(())
    }
}

/// Tracks how often and how the document changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatisticsObserver {
    change_count: usize,
    last_cursor_position: usize,
    last_length: usize,
    formatted_chars: usize,
}

impl StatisticsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn change_count(&self) -> usize {
        self.change_count
    }

    pub fn last_cursor_position(&self) -> usize {
        self.last_cursor_position
    }

    pub fn last_length(&self) -> usize {
        self.last_length
    }

    pub fn formatted_chars(&self) -> usize {
        self.formatted_chars
    }
}

impl DocumentObserver for StatisticsObserver {
    fn name(&self) -> &str {
        "statistics"
    }

    fn on_document_changed(&mut self, document: &Document) -> Result<(), ObserverError> {
        self.change_count += 1;
        self.last_length = document.len();
        self.formatted_chars = document.formatting().len();
        log::debug!(
            "document modified {} times, {} characters, {} formatted",
            self.change_count,
            self.last_length,
            self.formatted_chars
        );
        Ok(())
    }

    fn on_cursor_moved(&mut self, position: usize) -> Result<(), ObserverError> {
        self.last_cursor_position = position;
        Ok(())
    }
}
