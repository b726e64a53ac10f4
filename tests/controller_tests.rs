#[cfg(test)]
mod tests {
    use ec2dash::app::ec2_control::Ec2Controller;

    #[test]
    fn test_no_client_before_first_use() {
        let mut controller = Ec2Controller::new().unwrap();
        controller.set_target("test-profile", "us-east-1");
        assert!(!controller.has_cached_client());
    }

    #[test]
    fn test_client_is_memoized() {
        let mut controller = Ec2Controller::new().unwrap();
        controller.set_target("test-profile", "us-east-1");

        controller.client();
        assert!(controller.has_cached_client());

        // Same target keeps the memo
        controller.set_target("test-profile", "us-east-1");
        assert!(controller.has_cached_client());
    }

    #[test]
    fn test_profile_change_invalidates_client() {
        let mut controller = Ec2Controller::new().unwrap();
        controller.set_target("test-profile", "us-east-1");
        controller.client();
        assert!(controller.has_cached_client());

        controller.set_target("other-profile", "us-east-1");
        assert!(!controller.has_cached_client());
    }

    #[test]
    fn test_region_change_invalidates_client() {
        let mut controller = Ec2Controller::new().unwrap();
        controller.set_target("test-profile", "us-east-1");
        controller.client();
        assert!(controller.has_cached_client());

        controller.set_target("test-profile", "eu-west-2");
        assert!(!controller.has_cached_client());
    }

    #[test]
    fn test_explicit_invalidate() {
        let mut controller = Ec2Controller::new().unwrap();
        controller.set_target("test-profile", "us-east-1");
        controller.client();

        controller.invalidate();
        assert!(!controller.has_cached_client());
    }

    #[test]
    fn test_empty_instance_id_is_rejected_locally() {
        let mut controller = Ec2Controller::new().unwrap();
        controller.set_target("test-profile", "us-east-1");

        assert!(controller.start_instance("").is_err());
        assert!(controller.stop_instance("  ").is_err());
        assert!(controller.reboot_instance("").is_err());
        assert!(controller.instance_state("").is_err());

        // Rejection happens before any client is built
        assert!(!controller.has_cached_client());
    }
}
