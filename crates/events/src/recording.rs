//! Publisher that keeps everything it is handed.

use std::sync::Mutex;

use thiserror::Error;

use crate::bus::EventPublisher;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordingError {
    /// A thread panicked while holding the recording lock.
    #[error("recording publisher lock poisoned")]
    Poisoned,
}

/// Publisher that appends every message to an in-memory log.
///
/// Useful when a test (or a demo) needs to assert exactly what was published and
/// how many times.
#[derive(Debug)]
pub struct RecordingPublisher<M> {
    published: Mutex<Vec<M>>,
}

impl<M> RecordingPublisher<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.published.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<M: Clone> RecordingPublisher<M> {
    /// Snapshot of everything published so far, oldest first.
    pub fn published(&self) -> Vec<M> {
        self.published.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl<M> Default for RecordingPublisher<M> {
    fn default() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
        }
    }
}

impl<M> EventPublisher<M> for RecordingPublisher<M>
where
    M: Send + 'static,
{
    type Error = RecordingError;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        self.published
            .lock()
            .map_err(|_| RecordingError::Poisoned)?
            .push(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn records_in_publish_order() {
        let publisher = RecordingPublisher::new();
        assert!(publisher.is_empty());

        publisher.publish("first").unwrap();
        publisher.publish("second").unwrap();

        assert_eq!(publisher.len(), 2);
        assert_eq!(publisher.published(), vec!["first", "second"]);
    }

    #[test]
    fn shared_through_arc() {
        let publisher = Arc::new(RecordingPublisher::new());
        let handle = publisher.clone();

        handle.publish(42u64).unwrap();

        assert_eq!(publisher.published(), vec![42]);
    }

    #[test]
    fn poisoned_lock_is_reported_as_a_recording_error() {
        let publisher = Arc::new(RecordingPublisher::<u8>::new());
        let handle = Arc::clone(&publisher);
        let _ = std::thread::spawn(move || {
            let _guard = handle.published.lock().unwrap();
            panic!("poison the recording lock");
        })
        .join();

        let err = publisher.publish(1).unwrap_err();

        assert_eq!(err, RecordingError::Poisoned);
        assert_eq!(err.to_string(), "recording publisher lock poisoned");
    }
}
