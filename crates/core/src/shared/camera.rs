use serde::{Deserialize, Serialize};

/// Which physical camera produced a frame.
///
/// Front-facing previews are mirrored, so overlay geometry must be
/// flipped horizontally to line up with what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LensFacing {
    #[default]
    Front,
    Back,
}

impl LensFacing {
    pub fn is_front(self) -> bool {
        self == LensFacing::Front
    }

    /// The lens selected by the camera switch button.
    pub fn toggled(self) -> Self {
        match self {
            LensFacing::Front => LensFacing::Back,
            LensFacing::Back => LensFacing::Front,
        }
    }
}

impl std::fmt::Display for LensFacing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LensFacing::Front => write!(f, "front"),
            LensFacing::Back => write!(f, "back"),
        }
    }
}

/// Device orientation at the time the frame was captured.
///
/// Sensors deliver landscape buffers; in portrait the image axes are
/// swapped relative to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}
