mod common;

mod tests {
    use octostrip::{
        Bridge, BridgeConfig, CurrentLimiter, brightness_units,
        color,
    };

    use crate::common::{MockEngine, t};

    #[test]
    fn test_brightness_units_sums_components() {
        let words = [color::pack(1, 2, 3), color::pack(10, 0, 0)];
        assert_eq!(brightness_units(&words), 16);
        assert_eq!(brightness_units(&[]), 0);
    }

    #[test]
    fn test_over_budget_frame_is_scaled_under_threshold() {
        let mut words = [color::pack(255, 255, 255); 50];
        let before = brightness_units(&words);
        assert!(before > 30_000);

        let limiter = CurrentLimiter::new(Some(30_000));
        assert!(limiter.apply(&mut words));
        assert!(brightness_units(&words) <= 30_000);
        // Uniform scaling keeps the frame white, just dimmer.
        let (g, r, b) = color::components(words[0]);
        assert_eq!((g, r), (r, b));
        assert!(r < 255);
    }

    #[test]
    fn test_in_budget_frame_is_untouched() {
        let mut words = [color::pack(255, 255, 255); 10];
        let reference = words;
        let limiter = CurrentLimiter::new(Some(30_000));
        assert!(!limiter.apply(&mut words));
        assert_eq!(words, reference);
    }

    #[test]
    fn test_dark_frame_is_a_no_op() {
        let mut words = [0u32; 200];
        let limiter = CurrentLimiter::new(Some(0));
        assert!(!limiter.apply(&mut words));
    }

    #[test]
    fn test_disabled_limiter_never_scales() {
        let mut words = [color::pack(255, 255, 255); 200];
        let reference = words;
        let limiter = CurrentLimiter::new(None);
        assert!(!limiter.apply(&mut words));
        assert_eq!(words, reference);
    }

    #[test]
    fn test_limit_event_is_counted_on_the_channel() {
        let config = BridgeConfig {
            gamma: None,
            current_limit: Some(100),
            ..BridgeConfig::default()
        };
        let mut bridge = Bridge::new(MockEngine::new(), config, t(0));
        bridge.feed(&[0xFF, 0x00, 0x01, 0x00, 255, 255, 255], t(1));

        assert_eq!(bridge.channel(0).limit_events(), 1);
        let words = bridge.engine().last_words(0).unwrap();
        assert!(brightness_units(words) <= 100);

        // A dim frame afterwards passes through unscaled.
        bridge.feed(&[0xFF, 0x00, 0x01, 0x00, 10, 10, 10], t(2));
        assert_eq!(bridge.channel(0).limit_events(), 1);
        assert_eq!(
            bridge.engine().last_words(0).unwrap(),
            &[color::pack(10, 10, 10)]
        );
    }
}
