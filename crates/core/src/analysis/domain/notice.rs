use std::fmt;

/// User-facing warning raised by a frame evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    NoFaceDetected,
    MultipleFaces,
    Smiling,
    EyesClosed,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::NoFaceDetected => "No face detected",
            Notice::MultipleFaces => "Only one face is allowed",
            Notice::Smiling => "Please do not smile",
            Notice::EyesClosed => "Please do not blink.",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
