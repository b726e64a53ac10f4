//! Core application modules for the EC2 instance manager.
//!
//! # Module Organization
//!
//! - [`settings`] - Persisted instance id / profile / region record
//! - [`ec2_control`] - Memoized EC2 client and the start/stop/reboot/describe calls
//! - [`actions`] - Symbolic action names dispatched by the UI buttons
//! - [`poller`] - Repeating timer driving the status refresh
//! - [`sso_login`] - Background `aws sso login` subprocess
//! - [`ui`] - egui window wiring user input to the dispatcher

pub mod actions;
pub mod ec2_control;
pub mod poller;
pub mod settings;
pub mod sso_login;
pub mod ui;

pub use ui::Ec2DashApp;
