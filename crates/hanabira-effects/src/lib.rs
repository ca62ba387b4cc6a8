//! Ambient particle effects for hanabira.
//!
//! This crate runs the falling-petal, snowfall and twinkling-star overlays:
//! particle models and their fields, the per-effect animation controller
//! with its throttled frame loop, and the orchestrator that activates
//! controllers from configuration and tears them down again. Frames are
//! rasterized onto software canvases and shown in the terminal through the
//! [`Overlay`] widget.

mod color;
pub mod controller;
mod error;
pub mod field;
pub mod host;
pub mod orchestrator;
pub mod particles;
pub mod surface;
mod widget;

pub use color::{PETAL_CENTER, PETAL_PINK, Rgba, WHITE};
pub use controller::{AnimationController, ControllerState};
pub use error::EngineError;
pub use field::{EffectField, ParticleField};
pub use host::{FrameHandle, Host, ListenerId, SurfaceProvider, TimerHandle};
pub use orchestrator::EffectOrchestrator;
pub use surface::{Canvas, CanvasProvider, DrawingSurface, Transform};
pub use widget::Overlay;
