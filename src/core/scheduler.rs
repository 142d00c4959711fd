//! Frame scheduling capability.
//!
//! The carousel never owns a timer.  It asks a [`FrameScheduler`] for "one
//! callback on the next display frame" and gets back a handle it can cancel.
//! The host advances the scheduler once per rendered frame and the carousel
//! runs its tick for the handle that fired.

use std::collections::VecDeque;

/// Opaque reference to one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Per-frame callback scheduling, injected into each carousel.
pub trait FrameScheduler {
    /// Request one callback on the next display frame.
    fn schedule(&mut self) -> FrameHandle;

    /// Cancel a pending callback.  Returns `false` when the handle is
    /// unknown or has already fired.
    fn cancel(&mut self, handle: FrameHandle) -> bool;

    /// One display frame elapses.  Returns the handles firing on this frame,
    /// in the order they were scheduled.
    fn advance(&mut self) -> Vec<FrameHandle>;
}

/// Deterministic frame queue.  A handle scheduled during frame `k` fires on
/// frame `k + 1`, never earlier, never twice.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: VecDeque<FrameHandle>,
    frames: u64,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    /// Frames advanced so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[cfg(test)]
    /// Number of callbacks waiting for the next frame.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

impl FrameScheduler for FrameQueue {
    fn schedule(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push_back(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) -> bool {
        match self.pending.iter().position(|h| *h == handle) {
            Some(idx) => {
                self.pending.remove(idx);
                true
            }
            None => false,
        }
    }

    fn advance(&mut self) -> Vec<FrameHandle> {
        self.frames += 1;
        // Anything scheduled while the caller handles these lands on the
        // following frame.
        self.pending.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduled_handle_fires_on_next_frame_only() {
        let mut q = FrameQueue::new();
        let h = q.schedule();
        assert_eq!(q.advance(), vec![h]);
        assert!(q.advance().is_empty());
        assert_eq!(q.frames(), 2);
    }

    #[test]
    fn handles_are_unique_and_ordered() {
        let mut q = FrameQueue::new();
        let a = q.schedule();
        let b = q.schedule();
        assert!(a < b);
        assert_eq!(q.advance(), vec![a, b]);
    }

    #[test]
    fn cancel_removes_exactly_that_handle() {
        let mut q = FrameQueue::new();
        let a = q.schedule();
        let b = q.schedule();
        assert!(q.cancel(a));
        assert!(!q.cancel(a));
        assert_eq!(q.pending_len(), 1);
        assert_eq!(q.advance(), vec![b]);
    }

    #[test]
    fn cancelling_a_fired_handle_is_refused() {
        let mut q = FrameQueue::new();
        let a = q.schedule();
        q.advance();
        assert!(!q.cancel(a));
    }
}
