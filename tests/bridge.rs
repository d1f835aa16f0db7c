mod common;

mod tests {
    use octostrip::{SystemMode, color};

    use crate::common::{bridge, raw_bridge, t};

    #[test]
    fn test_flush_waits_for_the_transfer_in_flight() {
        let mut bridge = raw_bridge();
        bridge.feed(&[0xFF, 0x00, 0x01, 0x00, 255, 0, 0], t(1));
        assert!(bridge.engine().busy[0]);
        assert_eq!(bridge.engine().waits, 0);

        // The second frame must wait out the first transfer before the
        // buffers may swap, then start its own.
        bridge.feed(&[0xFF, 0x00, 0x01, 0x00, 0, 255, 0], t(2));
        assert_eq!(bridge.engine().waits, 1);
        assert_eq!(bridge.engine().transfers.len(), 2);
        assert_eq!(bridge.engine().transfers[0].1, vec![color::pack(0, 255, 0)]);
        assert_eq!(bridge.engine().transfers[1].1, vec![color::pack(255, 0, 0)]);
        assert!(bridge.engine().busy[0]);
    }

    #[test]
    fn test_flush_mask_skips_idle_channels() {
        let mut bridge = raw_bridge();
        bridge.flush_mask(0xFF);
        assert!(bridge.engine().transfers.is_empty());
        assert_eq!(bridge.stats().flushes, 0);
    }

    #[test]
    fn test_trip_interface_counts_edges() {
        let mut bridge = bridge();
        let channel = bridge.channel_mut(2);
        assert!(!channel.is_tripped());

        channel.set_tripped(true);
        channel.set_tripped(true);
        assert_eq!(channel.trip_count(), 1);

        channel.set_tripped(false);
        channel.set_tripped(true);
        assert_eq!(channel.trip_count(), 2);
        assert!(bridge.channel(2).is_tripped());
    }

    #[test]
    fn test_snapshot_reflects_core_state() {
        let mut bridge = bridge();
        bridge.feed(
            &[0xFF, 0x00, 0x02, 0x00, 255, 255, 255, 255, 255, 255],
            t(1),
        );
        bridge.channel_mut(5).set_tripped(true);

        let snapshot = bridge.snapshot();
        assert_eq!(snapshot.mode, SystemMode::Normal);
        assert_eq!(snapshot.pattern, None);
        assert_eq!(snapshot.stats.pixels, 2);
        assert_eq!(snapshot.stats.flushes, 1);
        assert_eq!(snapshot.channels[0].led_count, 2);
        assert!(snapshot.channels[5].tripped);
        assert_eq!(snapshot.channels[5].trip_count, 1);

        bridge.start_pattern(4, t(2));
        let snapshot = bridge.snapshot();
        assert_eq!(snapshot.mode, SystemMode::TestPattern);
        assert_eq!(snapshot.pattern, Some(octostrip::PatternId::Ternary));
    }

    #[test]
    fn test_reset_request_from_button_path() {
        let mut bridge = bridge();
        bridge.request_reset();
        assert!(bridge.take_reset_request());
        assert!(!bridge.reset_requested());
    }
}
