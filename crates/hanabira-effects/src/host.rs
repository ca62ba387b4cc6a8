//! Cooperative host event loop.
//!
//! [`Host`] plays the part a browser plays for a canvas animation: it hands
//! out cancellable frame-callback and timer handles, keeps the resize
//! listener registry and tracks the viewport. It never calls back into
//! anyone itself. Whoever drives it (the orchestrator's `pump`) drains due
//! timers and frame requests and routes each handle to its owner.

use hanabira_core::{Effect, Viewport};

use crate::error::EngineError;
use crate::surface::DrawingSurface;

/// Handle of a pending frame-callback request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

/// Handle of a pending one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// Id of a registered resize listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Source of drawing surfaces for controllers.
pub trait SurfaceProvider {
    type Surface: DrawingSurface;

    /// Acquire a fresh surface for `effect`.
    fn acquire(&mut self, effect: Effect) -> Result<Self::Surface, EngineError>;
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    handle: TimerHandle,
    due_ms: f64,
}

/// Frame clock, timers and resize listeners for one page.
#[derive(Debug, Default)]
pub struct Host {
    next_id: u64,
    now_ms: f64,
    viewport: Viewport,
    frame_requests: Vec<FrameHandle>,
    timers: Vec<Timer>,
    resize_listeners: Vec<ListenerId>,
}

impl Host {
    /// Create a host with the given initial viewport and the clock at zero.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Current host time in milliseconds.
    pub fn now(&self) -> f64 {
        self.now_ms
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Ask for a callback on the next frame.
    pub fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.frame_requests.push(handle);
        handle
    }

    /// Cancel a pending frame request. Unknown handles are ignored.
    pub fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frame_requests.retain(|h| *h != handle);
    }

    /// Schedule a one-shot timer `delay_ms` from now.
    pub fn set_timeout(&mut self, delay_ms: f64) -> TimerHandle {
        let handle = TimerHandle(self.next_id());
        self.timers.push(Timer {
            handle,
            due_ms: self.now_ms + delay_ms.max(0.0),
        });
        handle
    }

    /// Cancel a pending timer. Unknown handles are ignored.
    pub fn clear_timeout(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.handle != handle);
    }

    pub fn add_resize_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.resize_listeners.push(id);
        id
    }

    pub fn remove_resize_listener(&mut self, id: ListenerId) {
        self.resize_listeners.retain(|l| *l != id);
    }

    /// Whether `id` is still registered.
    pub fn is_listening(&self, id: ListenerId) -> bool {
        self.resize_listeners.contains(&id)
    }

    pub fn pending_frames(&self) -> usize {
        self.frame_requests.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn resize_listener_count(&self) -> usize {
        self.resize_listeners.len()
    }

    /// Move the clock forward and return the timers that fell due, earliest first.
    ///
    /// The clock never runs backwards; an earlier `now_ms` is ignored.
    pub fn advance_to(&mut self, now_ms: f64) -> Vec<TimerHandle> {
        if now_ms > self.now_ms {
            self.now_ms = now_ms;
        }
        let now = self.now_ms;
        let mut due: Vec<Timer> = self.timers.iter().copied().filter(|t| t.due_ms <= now).collect();
        self.timers.retain(|t| t.due_ms > now);
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.handle.cmp(&b.handle)));
        due.into_iter().map(|t| t.handle).collect()
    }

    /// Take every frame request made so far.
    ///
    /// Requests issued while the returned batch is dispatched land in the
    /// next batch.
    pub fn take_frame_requests(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.frame_requests)
    }

    /// Record a new viewport. Returns `true` if it differs from the current one.
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        let changed = viewport != self.viewport;
        self.viewport = viewport;
        changed
    }

    /// Listeners to notify about a resize.
    pub fn resize_listeners(&self) -> &[ListenerId] {
        &self.resize_listeners
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_requests_batch() {
        let mut host = Host::new(Viewport::new(80.0, 24.0));
        let a = host.request_frame();
        let b = host.request_frame();
        assert_ne!(a, b);
        assert_eq!(host.pending_frames(), 2);

        let batch = host.take_frame_requests();
        assert_eq!(batch, vec![a, b]);
        assert_eq!(host.pending_frames(), 0);

        let c = host.request_frame();
        assert_eq!(host.take_frame_requests(), vec![c]);
    }

    #[test]
    fn test_cancel_frame() {
        let mut host = Host::default();
        let a = host.request_frame();
        let b = host.request_frame();
        host.cancel_frame(a);
        assert_eq!(host.take_frame_requests(), vec![b]);
        // Cancelling twice is harmless.
        host.cancel_frame(a);
    }

    #[test]
    fn test_timers_fire_in_order() {
        let mut host = Host::default();
        let late = host.set_timeout(500.0);
        let early = host.set_timeout(300.0);
        assert!(host.advance_to(299.0).is_empty());
        assert_eq!(host.advance_to(300.0), vec![early]);
        assert_eq!(host.pending_timers(), 1);
        assert_eq!(host.advance_to(1000.0), vec![late]);
        assert_eq!(host.pending_timers(), 0);
    }

    #[test]
    fn test_timer_relative_to_now() {
        let mut host = Host::default();
        host.advance_to(1000.0);
        let t = host.set_timeout(300.0);
        assert!(host.advance_to(1200.0).is_empty());
        assert_eq!(host.advance_to(1300.0), vec![t]);
    }

    #[test]
    fn test_clear_timeout() {
        let mut host = Host::default();
        let t = host.set_timeout(10.0);
        host.clear_timeout(t);
        assert!(host.advance_to(100.0).is_empty());
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut host = Host::default();
        host.advance_to(50.0);
        host.advance_to(20.0);
        assert_eq!(host.now(), 50.0);
    }

    #[test]
    fn test_resize_listeners() {
        let mut host = Host::default();
        let id = host.add_resize_listener();
        assert!(host.is_listening(id));
        assert_eq!(host.resize_listener_count(), 1);
        host.remove_resize_listener(id);
        assert!(!host.is_listening(id));
        assert_eq!(host.resize_listener_count(), 0);
    }

    #[test]
    fn test_set_viewport_reports_change() {
        let mut host = Host::new(Viewport::new(10.0, 10.0));
        assert!(!host.set_viewport(Viewport::new(10.0, 10.0)));
        assert!(host.set_viewport(Viewport::new(20.0, 10.0)));
        assert_eq!(host.viewport(), Viewport::new(20.0, 10.0));
    }
}
