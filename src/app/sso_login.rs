//! Interactive SSO login via the AWS CLI.
//!
//! Authentication is delegated to `aws sso login`, which opens the
//! browser-based device flow and leaves a cached token where the SDK's
//! profile resolution finds it. The subprocess can take minutes while
//! the user clicks through the browser, so it runs on a background
//! thread and the UI watches the shared [`LoginState`].

use std::process::Command;
use std::sync::{Arc, Mutex};
use std::thread;
use tracing::{error, info, warn};

/// Progress of the external login subprocess.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoginState {
    #[default]
    Idle,
    InProgress,
    Succeeded,
    /// The subprocess failed or could not be launched. Not retried
    /// automatically; the operator clicks Login again.
    Failed(String),
}

/// Handle to at most one running login subprocess.
pub struct SsoLogin {
    state: Arc<Mutex<LoginState>>,
}

impl Default for SsoLogin {
    fn default() -> Self {
        Self::new()
    }
}

impl SsoLogin {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(LoginState::Idle)),
        }
    }

    /// Snapshot of the current login state.
    pub fn state(&self) -> LoginState {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn in_progress(&self) -> bool {
        self.state() == LoginState::InProgress
    }

    /// Launch `aws sso login` for `profile` on a background thread.
    ///
    /// A second click while a login is still running is ignored.
    pub fn start(&self, profile: &str) {
        {
            let mut state = self
                .state
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if *state == LoginState::InProgress {
                warn!("SSO login already in progress, ignoring");
                return;
            }
            *state = LoginState::InProgress;
        }

        info!("Launching SSO login (profile={})", profile);
        let state = Arc::clone(&self.state);
        let profile = profile.to_string();

        thread::spawn(move || {
            let result = login_command(&profile).status();

            let new_state = match result {
                Ok(status) if status.success() => {
                    info!("SSO login completed successfully");
                    LoginState::Succeeded
                }
                Ok(status) => {
                    let msg = format!("aws sso login exited with {}", status);
                    error!("{}", msg);
                    LoginState::Failed(msg)
                }
                Err(e) => {
                    let msg = format!("failed to launch aws sso login: {}", e);
                    error!("{}", msg);
                    LoginState::Failed(msg)
                }
            };

            *state
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()) = new_state;
        });
    }
}

/// Build the login command. Empty profile defers to the CLI's default
/// profile resolution.
fn login_command(profile: &str) -> Command {
    let mut cmd = Command::new("aws");
    cmd.args(["sso", "login"]);
    if !profile.is_empty() {
        cmd.args(["--profile", profile]);
    }
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_login_command_with_profile() {
        let cmd = login_command("dev-account");
        assert_eq!(cmd.get_program(), "aws");
        assert_eq!(args_of(&cmd), ["sso", "login", "--profile", "dev-account"]);
    }

    #[test]
    fn test_login_command_without_profile() {
        let cmd = login_command("");
        assert_eq!(args_of(&cmd), ["sso", "login"]);
    }

    #[test]
    fn test_initial_state_is_idle() {
        let login = SsoLogin::new();
        assert_eq!(login.state(), LoginState::Idle);
        assert!(!login.in_progress());
    }
}
