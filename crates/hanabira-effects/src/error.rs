//! Error types for the effects engine.

use hanabira_core::Effect;
use thiserror::Error;

/// Errors raised while bringing an effect up.
///
/// None of these ever reach the user: the orchestrator logs them and the
/// effect simply stays dark.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no drawing surface available for {effect:?}: {reason}")]
    SurfaceUnavailable { effect: Effect, reason: String },
}
