//! # Signal Slot
//!
//! Single-slot, last-write-wins mailbox between the detector loop and the
//! render loop (and between the wish worker and the render loop). The writer
//! replaces the whole value under the lock; readers see either the previous
//! value or the new one, never a partially written update. Staleness up to
//! one producer cycle is by design: a dropped detector frame just means the
//! consumer keeps the previous signal. No queue, no backpressure.

use parking_lot::Mutex;
use std::sync::Arc;

/// A shared one-value mailbox. Cloning shares the slot.
#[derive(Debug)]
pub struct SignalSlot<T> {
    inner: Arc<Mutex<Option<T>>>,
}

impl<T> Default for SignalSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SignalSlot<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> SignalSlot<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(None)),
        }
    }

    /// Replace the stored value wholesale.
    pub fn publish(&self, value: T) {
        *self.inner.lock() = Some(value);
    }

    /// Take the stored value, leaving the slot empty.
    pub fn take(&self) -> Option<T> {
        self.inner.lock().take()
    }
}

impl<T: Clone> SignalSlot<T> {
    /// Read the latest value without consuming it.
    pub fn latest(&self) -> Option<T> {
        self.inner.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let slot = SignalSlot::new();
        slot.publish(1);
        slot.publish(2);
        slot.publish(3);
        assert_eq!(slot.latest(), Some(3));
    }

    #[test]
    fn test_take_empties_the_slot() {
        let slot = SignalSlot::new();
        slot.publish("wish");
        assert_eq!(slot.take(), Some("wish"));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_clones_share_the_slot() {
        let writer = SignalSlot::new();
        let reader = writer.clone();
        writer.publish(7u32);
        assert_eq!(reader.latest(), Some(7));
    }

    #[test]
    fn test_cross_thread_replacement() {
        let slot = SignalSlot::new();
        let writer = slot.clone();
        let handle = std::thread::spawn(move || {
            for i in 0..1000 {
                writer.publish(i);
            }
        });
        handle.join().unwrap();
        assert_eq!(slot.latest(), Some(999));
    }
}
