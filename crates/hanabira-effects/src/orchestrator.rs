//! Mounting and routing for the active effects.

use hanabira_core::{ACTIVATION_DELAY_MS, EffectsConfig, Viewport};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::controller::{AnimationController, ControllerState};
use crate::host::{FrameHandle, Host, SurfaceProvider, TimerHandle};

/// Owns the controllers for one page.
///
/// Nothing is allocated until [`ACTIVATION_DELAY_MS`] after
/// [`EffectOrchestrator::mount`], so the effects never compete with the
/// first paint of the page they decorate.
#[derive(Debug)]
pub struct EffectOrchestrator<P: SurfaceProvider> {
    config: Option<EffectsConfig>,
    provider: P,
    seed: u64,
    activation: Option<TimerHandle>,
    activated: bool,
    controllers: Vec<AnimationController<P::Surface>>,
}

impl<P: SurfaceProvider> EffectOrchestrator<P> {
    /// Create an orchestrator. `seed` feeds every field's RNG.
    pub fn new(config: Option<EffectsConfig>, provider: P, seed: u64) -> Self {
        Self {
            config,
            provider,
            seed,
            activation: None,
            activated: false,
            controllers: Vec::new(),
        }
    }

    /// Arm the deferred activation.
    ///
    /// Without a configuration, or with every effect switched off, this
    /// does nothing at all: no timer, no surfaces.
    pub fn mount(&mut self, host: &mut Host) {
        if self.activated || self.activation.is_some() {
            return;
        }
        match self.config {
            Some(config) if config.any() => {
                self.activation = Some(host.set_timeout(ACTIVATION_DELAY_MS));
                log::debug!("effects {config:?} activate in {ACTIVATION_DELAY_MS}ms");
            }
            _ => log::debug!("no effects configured"),
        }
    }

    fn activate(&mut self, host: &mut Host) {
        self.activated = true;
        let Some(config) = self.config else {
            return;
        };
        for (index, effect) in config.enabled().enumerate() {
            let rng = StdRng::seed_from_u64(self.seed.wrapping_add(index as u64));
            match AnimationController::mount(effect, host, &mut self.provider, rng) {
                Ok(controller) => self.controllers.push(controller),
                Err(err) => log::warn!("{} disabled: {err}", effect.name()),
            }
        }
        log::info!("activated {} effect(s)", self.controllers.len());
    }

    /// Route a fired timer to whoever owns it.
    pub fn on_timer(&mut self, handle: TimerHandle, host: &mut Host) {
        if self.activation == Some(handle) {
            self.activation = None;
            self.activate(host);
            return;
        }
        for controller in &mut self.controllers {
            if controller.on_timer(handle) {
                return;
            }
        }
    }

    /// Route a frame callback to the controller that requested it.
    pub fn on_frame(&mut self, handle: FrameHandle, timestamp: f64, host: &mut Host) {
        for controller in &mut self.controllers {
            if controller.on_frame(handle, timestamp, host) {
                break;
            }
        }
        self.controllers
            .retain(|c| c.state() != ControllerState::Stopped);
    }

    /// Run one cooperative step at host time `now_ms`: fire due timers,
    /// then serve every frame requested before this step.
    pub fn pump(&mut self, host: &mut Host, now_ms: f64) {
        for timer in host.advance_to(now_ms) {
            self.on_timer(timer, host);
        }
        let now = host.now();
        for frame in host.take_frame_requests() {
            self.on_frame(frame, now, host);
        }
    }

    /// Record a new viewport and notify every listening controller.
    pub fn resize(&mut self, host: &mut Host, viewport: Viewport) {
        if host.set_viewport(viewport) {
            log::debug!("viewport resized to {}x{}", viewport.width, viewport.height);
        }
        let listeners = host.resize_listeners().to_vec();
        for listener in listeners {
            for controller in &mut self.controllers {
                if controller.on_resize(listener, viewport) {
                    break;
                }
            }
        }
    }

    /// Cancel the pending activation and tear every controller down.
    pub fn unmount(&mut self, host: &mut Host) {
        if let Some(handle) = self.activation.take() {
            host.clear_timeout(handle);
        }
        for mut controller in self.controllers.drain(..) {
            controller.teardown(host);
        }
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn controllers(&self) -> &[AnimationController<P::Surface>] {
        &self.controllers
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}
