use thiserror::Error;

/// Failures reported by the tracking engine itself.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("anchor resources exhausted")]
    ResourceExhausted,
    #[error("pose is not valid for anchoring")]
    InvalidPose,
    #[error("tracking session is no longer active")]
    SessionLost,
}

/// Why a placement or drag step did not produce a marker change.
///
/// Only [`PlacementError::AnchorCreationFailed`] is surfaced to callers as an
/// error; the rest are normal negative results of a touch.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("no active tracking session")]
    EngineUnavailable,
    #[error("camera is not tracking")]
    NotTracking,
    #[error("no eligible surface under the touch point")]
    NoEligibleSurface,
    #[error("anchor creation failed: {0}")]
    AnchorCreationFailed(#[from] EngineError),
    #[error("marker {0} is not in the store")]
    UnknownMarker(u32),
}

impl PlacementError {
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PlacementError::EngineUnavailable
                | PlacementError::NotTracking
                | PlacementError::NoEligibleSurface
        )
    }
}
