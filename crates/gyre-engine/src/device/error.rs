use std::fmt;

/// A fatal error from window/GPU bring-up.
///
/// Both variants carry the platform's diagnostic string; callers only need to
/// tell "the windowing stack never came up" apart from "the window exists but
/// no surface/device could be created over it".
#[derive(Debug, Clone, PartialEq)]
pub enum InitError {
    /// The platform event loop or window could not be created.
    SubsystemInit(String),
    /// Surface, adapter or device creation failed for an otherwise live window.
    SurfaceCreation(String),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::SubsystemInit(msg) => {
                write!(f, "video subsystem initialization failed: {msg}")
            }
            InitError::SurfaceCreation(msg) => write!(f, "surface creation failed: {msg}"),
        }
    }
}

impl std::error::Error for InitError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failing_stage() {
        let e = InitError::SubsystemInit("no display".to_string());
        assert_eq!(
            e.to_string(),
            "video subsystem initialization failed: no display"
        );

        let e = InitError::SurfaceCreation("adapter rejected".to_string());
        assert_eq!(e.to_string(), "surface creation failed: adapter rejected");
    }
}
