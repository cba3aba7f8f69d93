//! Cooperative frame scheduling.
//!
//! A running match asks to be called again on the next frame; the host owns
//! the actual timing (a display refresh callback, a tick thread, or a plain
//! loop in tests).

/// Handle for a requested frame
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// Host-side frame scheduling
pub trait FrameScheduler {
    /// Ask for one more frame callback
    fn request_frame(&mut self) -> FrameRequest;

    /// Withdraw a request that has not fired yet
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Scheduler with a single pending slot, polled by the host
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Option<FrameRequest>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume the pending request. Returns true if a frame is due.
    pub fn take(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        self.next_id += 1;
        let request = FrameRequest(self.next_id);
        self.pending = Some(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending == Some(request) {
            self.pending = None;
        }
    }
}
