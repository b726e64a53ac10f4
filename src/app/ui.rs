//! egui front end for the instance manager.
//!
//! [`Ec2DashApp`] is the application-state object: it owns the loaded
//! settings, the memoized EC2 controller, the poll timer, and the SSO
//! login handle, and wires the window's buttons to the action
//! dispatcher. There is no module-level mutable state.

use crate::app::actions::Action;
use crate::app::ec2_control::{self, Ec2Controller};
use crate::app::poller::PollTimer;
use crate::app::settings::Settings;
use crate::app::sso_login::{LoginState, SsoLogin};
use egui::{Color32, RichText};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

const GREEN: Color32 = Color32::from_rgb(50, 200, 80);
const RED: Color32 = Color32::from_rgb(220, 50, 50);

/// Indicator color for a provider state name.
///
/// Anything that is not plainly running or stopped (transitional states,
/// errors, no data yet) shows grey.
pub fn status_color(state: Option<&str>) -> Color32 {
    match state {
        Some("running") => GREEN,
        Some("stopped") => RED,
        _ => Color32::GRAY,
    }
}

/// Main application window state.
pub struct Ec2DashApp {
    pub settings: Settings,
    controller: Ec2Controller,
    poll_timer: PollTimer,
    sso_login: SsoLogin,
    /// Text shown next to the status indicator.
    status_text: String,
    /// Last state name actually returned by the provider, None when the
    /// last poll failed or has not happened yet.
    known_state: Option<String>,
    last_error: Option<String>,
    /// Set once a finished login has been folded into the controller, so
    /// the cached client is only dropped once per login.
    login_acknowledged: bool,
}

impl Ec2DashApp {
    /// Build the app with settings loaded from disk.
    pub fn new() -> anyhow::Result<Self> {
        Self::with_settings(Settings::load())
    }

    /// Build the app around an explicit settings record.
    pub fn with_settings(settings: Settings) -> anyhow::Result<Self> {
        let mut controller = Ec2Controller::new()?;
        controller.set_target(&settings.profile, &settings.region);

        let mut poll_timer = PollTimer::default();
        poll_timer.start(Instant::now());

        Ok(Self {
            settings,
            controller,
            poll_timer,
            sso_login: SsoLogin::new(),
            status_text: "unknown".to_string(),
            known_state: None,
            last_error: None,
            login_acknowledged: false,
        })
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn known_state(&self) -> Option<&str> {
        self.known_state.as_deref()
    }

    pub fn controller(&self) -> &Ec2Controller {
        &self.controller
    }

    /// Dispatch a symbolic action name from a button.
    ///
    /// Unknown names are reported via the error line, never fatal. Remote
    /// failures are caught here and reported the same way.
    pub fn perform(&mut self, action_name: &str) {
        let action: Action = match action_name.parse() {
            Ok(action) => action,
            Err(e) => {
                error!("{}", e);
                self.last_error = Some(e.to_string());
                return;
            }
        };

        info!("Performing action: {}", action);
        self.controller
            .set_target(&self.settings.profile, &self.settings.region);

        let result = match action {
            Action::Start => self.controller.start_instance(&self.settings.instance_id),
            Action::Stop => self.controller.stop_instance(&self.settings.instance_id),
            Action::Reboot => self.controller.reboot_instance(&self.settings.instance_id),
            Action::Save => self.settings.save(),
            Action::Login => {
                self.login_acknowledged = false;
                self.sso_login.start(&self.settings.profile);
                Ok(())
            }
        };

        match result {
            Ok(()) => self.last_error = None,
            Err(err) => {
                error!("Action {} failed: {:#}", action, err);
                self.last_error = Some(format!("{:#}", err));
            }
        }
    }

    /// One poll tick: fetch the instance state and update the indicator.
    fn refresh_status(&mut self) {
        if self.settings.instance_id.trim().is_empty() {
            self.known_state = None;
            self.status_text = "no instance id".to_string();
            return;
        }

        self.controller
            .set_target(&self.settings.profile, &self.settings.region);

        match self.controller.instance_state(&self.settings.instance_id) {
            Ok(state) => {
                self.status_text = state.clone();
                self.known_state = Some(state);
            }
            Err(err) => {
                self.known_state = None;
                if ec2_control::is_auth_error(&err) {
                    warn!("Status poll not authorized: {:#}", err);
                    self.status_text = "not authorized - try Login".to_string();
                } else {
                    warn!("Status poll failed: {:#}", err);
                    self.status_text = "status unavailable".to_string();
                }
            }
        }
    }

    /// Pick up the result of a finished background login.
    fn check_login_progress(&mut self) {
        if self.login_acknowledged {
            return;
        }
        match self.sso_login.state() {
            LoginState::Succeeded => {
                // The cached client still holds the pre-login credential
                // chain; rebuild it lazily with the fresh token.
                self.controller.invalidate();
                self.login_acknowledged = true;
            }
            LoginState::Failed(_) => {
                self.login_acknowledged = true;
            }
            LoginState::Idle | LoginState::InProgress => {}
        }
    }
}

impl eframe::App for Ec2DashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let frame_start = Instant::now();

        self.check_login_progress();

        if self.poll_timer.due(Instant::now()) {
            self.refresh_status();
        }
        // Keep frames coming so the timer fires without user input.
        ctx.request_repaint_after(Duration::from_millis(500));

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("EC2 Instance Manager");
            ui.add_space(8.0);

            egui::Grid::new("settings_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Instance ID:");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.settings.instance_id)
                            .desired_width(220.0)
                            .hint_text("i-0123456789abcdef0"),
                    );
                    ui.end_row();

                    ui.label("Profile:");
                    let profile_response = ui.add(
                        egui::TextEdit::singleline(&mut self.settings.profile)
                            .desired_width(220.0)
                            .hint_text("default"),
                    );
                    ui.end_row();

                    ui.label("Region:");
                    let region_response = ui.add(
                        egui::TextEdit::singleline(&mut self.settings.region)
                            .desired_width(220.0)
                            .hint_text("us-east-1"),
                    );
                    ui.end_row();

                    if profile_response.changed() || region_response.changed() {
                        self.controller
                            .set_target(&self.settings.profile, &self.settings.region);
                    }
                });

            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if ui.button("Start").clicked() {
                    self.perform("start");
                }
                if ui.button("Stop").clicked() {
                    self.perform("stop");
                }
                if ui.button("Reboot").clicked() {
                    self.perform("reboot");
                }
                if ui.button("Save").clicked() {
                    self.perform("save");
                }
                let login = ui.add_enabled(
                    !self.sso_login.in_progress(),
                    egui::Button::new("Login"),
                );
                if login.clicked() {
                    self.perform("login");
                }
            });

            ui.add_space(12.0);

            ui.horizontal(|ui| {
                ui.label("Status:");
                let color = status_color(self.known_state.as_deref());
                ui.label(RichText::new("●").color(color));
                ui.label(RichText::new(&self.status_text).strong());
            });

            match self.sso_login.state() {
                LoginState::InProgress => {
                    ui.add_space(6.0);
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("SSO login running, complete it in your browser");
                    });
                    ctx.request_repaint();
                }
                LoginState::Succeeded => {
                    ui.add_space(6.0);
                    ui.label(RichText::new("SSO login complete").color(GREEN));
                }
                LoginState::Failed(msg) => {
                    ui.add_space(6.0);
                    ui.colored_label(RED, msg);
                }
                LoginState::Idle => {}
            }

            if let Some(err) = &self.last_error {
                ui.add_space(6.0);
                ui.colored_label(RED, err);
            }
        });

        // Remote calls run on this thread, so a slow AWS call shows up as
        // one long frame. Worth a log line when it happens.
        let frame_duration = frame_start.elapsed();
        if frame_duration.as_millis() > 500 {
            log::warn!("Slow frame: {:?} (blocking AWS call?)", frame_duration);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.poll_timer.cancel();
        info!("Shutting down, status poll cancelled");
    }
}
