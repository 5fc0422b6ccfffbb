//! Frame scheduling and host observer abstractions.
//!
//! A host maps [`FrameScheduler`] onto its own vsync or timer primitive
//! (`requestAnimationFrame` in a browser). When a requested frame fires, the
//! host calls [`BorderController::on_frame`](crate::lifecycle::BorderController::on_frame)
//! with the same handle; the controller ignores any handle it no longer
//! owns, so a late callback after cancellation is always a no-op.

/// Opaque identifier of one requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Requests and cancels one-shot frame callbacks.
pub trait FrameScheduler {
    /// Requests a single callback on the next frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancels a callback that has not fired yet. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// A host subscription (visibility or resize observer) that can be torn down.
pub trait Subscription {
    fn disconnect(&mut self);
}

/// Scheduler whose callbacks fire only when the caller says so.
///
/// Used by offline renderers and tests: request/cancel calls are recorded and
/// [`ManualScheduler::take_pending`] hands the outstanding handles back to be
/// run with synthetic timestamps.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<FrameHandle>,
    requested: usize,
    cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles requested and neither fired nor cancelled.
    pub fn pending(&self) -> &[FrameHandle] {
        &self.pending
    }

    /// Removes and returns all outstanding handles, as if they fired.
    pub fn take_pending(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending)
    }

    /// Total number of `request_frame` calls.
    pub fn requested_count(&self) -> usize {
        self.requested
    }

    /// Number of `cancel_frame` calls that hit an outstanding handle.
    pub fn cancelled_count(&self) -> usize {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        self.requested += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.pending.len();
        self.pending.retain(|h| *h != handle);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique_and_increasing() {
        let mut s = ManualScheduler::new();
        let a = s.request_frame();
        let b = s.request_frame();
        assert_ne!(a, b);
        assert!(b.id() > a.id());
        assert_eq!(s.pending(), &[a, b]);
        assert_eq!(s.requested_count(), 2);
    }

    #[test]
    fn cancel_removes_only_that_handle() {
        let mut s = ManualScheduler::new();
        let a = s.request_frame();
        let b = s.request_frame();
        s.cancel_frame(a);
        assert_eq!(s.pending(), &[b]);
        assert_eq!(s.cancelled_count(), 1);
    }

    #[test]
    fn cancelling_unknown_handle_is_ignored() {
        let mut s = ManualScheduler::new();
        s.cancel_frame(FrameHandle::new(99));
        assert_eq!(s.cancelled_count(), 0);
    }

    #[test]
    fn take_pending_drains() {
        let mut s = ManualScheduler::new();
        let a = s.request_frame();
        assert_eq!(s.take_pending(), vec![a]);
        assert!(s.pending().is_empty());
        // A fired handle can no longer be cancelled.
        s.cancel_frame(a);
        assert_eq!(s.cancelled_count(), 0);
    }
}
