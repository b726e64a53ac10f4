//! Symbolic action names for the UI buttons.
//!
//! Buttons dispatch through a symbolic name rather than calling the
//! controller directly, so an unknown name is a reported error instead
//! of a crash.

use std::fmt;
use std::str::FromStr;

/// Everything a button in the window can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
    Reboot,
    Save,
    Login,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Stop => "stop",
            Action::Reboot => "reboot",
            Action::Save => "save",
            Action::Login => "login",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an action name no button should ever produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown action: {}", self.0)
    }
}

impl std::error::Error for UnknownAction {}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Action::Start),
            "stop" => Ok(Action::Stop),
            "reboot" => Ok(Action::Reboot),
            "save" => Ok(Action::Save),
            "login" => Ok(Action::Login),
            _ => Err(UnknownAction(s.to_string())),
        }
    }
}
