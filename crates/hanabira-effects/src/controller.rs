//! Frame-rate capped render loop for a single effect.

use hanabira_core::{Effect, FRAME_INTERVAL_MS, Viewport};
use rand::rngs::StdRng;

use crate::error::EngineError;
use crate::field::EffectField;
use crate::host::{FrameHandle, Host, ListenerId, SurfaceProvider, TimerHandle};
use crate::surface::DrawingSurface;

/// Lifecycle of an [`AnimationController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Constructed, first frame not yet requested.
    Idle,
    /// Frame callbacks are being requested.
    Running,
    /// Torn down. A stopped controller never runs again.
    Stopped,
}

/// Drives one effect: owns its surface, its field and its host registrations.
#[derive(Debug)]
pub struct AnimationController<S: DrawingSurface> {
    effect: Effect,
    state: ControllerState,
    surface: Option<S>,
    field: EffectField,
    bounds: Viewport,
    last_frame_ms: f64,
    ticks: u64,
    pending_frame: Option<FrameHandle>,
    resize_listener: Option<ListenerId>,
    staggered_load: Option<TimerHandle>,
}

impl<S: DrawingSurface> AnimationController<S> {
    /// Acquire a surface for `effect`, seed its field and start the loop.
    ///
    /// If no surface can be acquired nothing is registered with the host
    /// and the error is returned.
    pub fn mount<P>(
        effect: Effect,
        host: &mut Host,
        provider: &mut P,
        rng: StdRng,
    ) -> Result<Self, EngineError>
    where
        P: SurfaceProvider<Surface = S>,
    {
        let mut surface = provider.acquire(effect)?;
        let bounds = host.viewport();
        surface.resize(bounds.width, bounds.height);

        let field = EffectField::new(effect, bounds, rng);
        let resize_listener = Some(host.add_resize_listener());
        let staggered_load = effect
            .staggered_load_delay_ms()
            .map(|delay| host.set_timeout(delay));

        let mut controller = Self {
            effect,
            state: ControllerState::Idle,
            surface: Some(surface),
            field,
            bounds,
            last_frame_ms: 0.0,
            ticks: 0,
            pending_frame: None,
            resize_listener,
            staggered_load,
        };
        controller.start(host);
        log::debug!(
            "mounted {} with {} particles at {}x{}",
            effect.name(),
            controller.field.len(),
            bounds.width,
            bounds.height
        );
        Ok(controller)
    }

    fn start(&mut self, host: &mut Host) {
        if self.state == ControllerState::Idle {
            self.state = ControllerState::Running;
            self.pending_frame = Some(host.request_frame());
        }
    }

    /// Handle a frame callback. Returns `false` if `handle` is not ours.
    ///
    /// Callbacks arriving less than [`FRAME_INTERVAL_MS`] after the last
    /// executed tick only re-request a frame.
    pub fn on_frame(&mut self, handle: FrameHandle, timestamp: f64, host: &mut Host) -> bool {
        if self.pending_frame != Some(handle) {
            return false;
        }
        self.pending_frame = None;
        if self.state != ControllerState::Running {
            return true;
        }

        let Some(surface) = self.surface.as_mut() else {
            self.teardown(host);
            return true;
        };
        if surface.is_lost() {
            log::warn!("{} lost its drawing surface, stopping", self.effect.name());
            self.teardown(host);
            return true;
        }

        if timestamp - self.last_frame_ms >= FRAME_INTERVAL_MS {
            self.last_frame_ms = timestamp;
            surface.clear();
            self.field.tick(self.bounds);
            self.field.draw_all(surface);
            surface.present();
            self.ticks += 1;
            log::trace!("{} tick {} at {timestamp:.1}ms", self.effect.name(), self.ticks);
        }

        self.pending_frame = Some(host.request_frame());
        true
    }

    /// Handle a fired timer. Returns `false` if `handle` is not ours.
    pub fn on_timer(&mut self, handle: TimerHandle) -> bool {
        if self.staggered_load != Some(handle) {
            return false;
        }
        self.staggered_load = None;
        if self.state == ControllerState::Running {
            self.field.load_remaining(self.bounds);
            log::debug!("{} loaded to {} particles", self.effect.name(), self.field.len());
        }
        true
    }

    /// Handle a resize notification. Returns `false` if `listener` is not ours.
    ///
    /// The surface is resynchronized before the next draw; re-applying the
    /// current size changes nothing except for stars, which always reseed.
    pub fn on_resize(&mut self, listener: ListenerId, viewport: Viewport) -> bool {
        if self.resize_listener != Some(listener) {
            return false;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(viewport.width, viewport.height);
        }
        self.bounds = viewport;
        self.field.on_resize(viewport);
        true
    }

    /// Stop the loop and release everything.
    ///
    /// The frame request and resize listener are dropped before the
    /// surface, so no callback can reach a released surface. Calling this
    /// more than once is harmless.
    pub fn teardown(&mut self, host: &mut Host) {
        if let Some(handle) = self.pending_frame.take() {
            host.cancel_frame(handle);
        }
        if let Some(handle) = self.staggered_load.take() {
            host.clear_timeout(handle);
        }
        if let Some(id) = self.resize_listener.take() {
            host.remove_resize_listener(id);
        }
        self.surface = None;
        if self.state != ControllerState::Stopped {
            log::debug!("{} stopped after {} ticks", self.effect.name(), self.ticks);
        }
        self.state = ControllerState::Stopped;
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn field(&self) -> &EffectField {
        &self.field
    }

    /// The surface, while the controller still holds one.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn bounds(&self) -> Viewport {
        self.bounds
    }

    /// Timestamp of the last executed tick.
    pub fn last_frame_timestamp(&self) -> f64 {
        self.last_frame_ms
    }

    /// Number of executed (not skipped) ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }

    pub fn resize_listener(&self) -> Option<ListenerId> {
        self.resize_listener
    }
}

impl<S: DrawingSurface> Drop for AnimationController<S> {
    fn drop(&mut self) {
        if self.pending_frame.is_some() || self.resize_listener.is_some() {
            log::warn!(
                "{} controller dropped without teardown; host registrations leaked",
                self.effect.name()
            );
        }
    }
}
