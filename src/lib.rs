//! EC2 Dash - point-and-click control for a single EC2 instance.
//!
//! A small desktop utility that starts, stops, reboots, and monitors one
//! EC2 instance. The instance id, AWS profile, and region persist between
//! sessions; a 3-second poll keeps a colored status indicator current;
//! interactive authentication is delegated to `aws sso login` running in
//! the background.
//!
//! # Architecture
//!
//! - [`app::ui`] - egui window and the application-state object
//! - [`app::ec2_control`] - lazily built, memoized SDK client bound to the
//!   current profile/region pair, plus the four remote calls
//! - [`app::settings`] - JSON settings file in the home directory
//! - [`app::poller`] / [`app::sso_login`] - status timer and login subprocess
//!
//! Everything runs on the egui event-loop thread except the login
//! subprocess, which gets its own thread so the window stays responsive
//! while the operator completes the browser flow.

#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub use app::Ec2DashApp;
