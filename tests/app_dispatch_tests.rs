#[cfg(test)]
mod tests {
    use ec2dash::app::settings::Settings;
    use ec2dash::app::ui::{status_color, Ec2DashApp};
    use egui::Color32;

    fn test_settings() -> Settings {
        Settings {
            instance_id: String::new(),
            profile: "test-profile".to_string(),
            region: "us-east-1".to_string(),
        }
    }

    #[test]
    fn test_unknown_action_is_reported_not_fatal() {
        let mut app = Ec2DashApp::with_settings(test_settings()).unwrap();

        app.perform("terminate");

        let err = app.last_error().expect("unknown action must be reported");
        assert!(err.contains("unknown action"), "got: {}", err);
        assert!(err.contains("terminate"), "got: {}", err);
    }

    #[test]
    fn test_failed_control_call_is_caught() {
        // Empty instance id makes start fail locally; the dispatcher must
        // catch it and report instead of propagating.
        let mut app = Ec2DashApp::with_settings(test_settings()).unwrap();

        app.perform("start");

        let err = app.last_error().expect("failure must be reported");
        assert!(err.contains("instance id is empty"), "got: {}", err);
    }

    #[test]
    fn test_successful_action_clears_previous_error() {
        let mut app = Ec2DashApp::with_settings(test_settings()).unwrap();

        app.perform("bogus");
        assert!(app.last_error().is_some());

        // Login only spawns the background subprocess, so it always
        // dispatches cleanly.
        app.perform("login");
        assert!(app.last_error().is_none());
    }

    #[test]
    fn test_status_colors() {
        let green = Color32::from_rgb(50, 200, 80);
        let red = Color32::from_rgb(220, 50, 50);

        assert_eq!(status_color(Some("running")), green);
        assert_eq!(status_color(Some("stopped")), red);
        assert_eq!(status_color(Some("pending")), Color32::GRAY);
        assert_eq!(status_color(Some("shutting-down")), Color32::GRAY);
        assert_eq!(status_color(None), Color32::GRAY);
    }
}
