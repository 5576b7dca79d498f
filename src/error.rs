//! Crate-level error type.

use core::fmt;

use crate::scene::SceneError;
use crate::timer::TimerError;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Error {
    /// Widget creation failed.
    Scene(SceneError),
    /// Timer registration failed.
    Timer(TimerError),
}

impl From<SceneError> for Error {
    fn from(error: SceneError) -> Self { Error::Scene(error) }
}

impl From<TimerError> for Error {
    fn from(error: TimerError) -> Self { Error::Timer(error) }
}

impl fmt::Display for Error {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Scene(e) => write!(f, "scene: {e}"),
            Self::Timer(e) => write!(f, "timer: {e}"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Scene(e) => Some(e),
            Self::Timer(e) => Some(e),
        }
    }
}
