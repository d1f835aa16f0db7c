mod tests {
    use octostrip::color::{self, CHANNEL_COLORS, ColorPipeline, Rgb};

    #[test]
    fn test_gamma_table_endpoints() {
        let pipeline = ColorPipeline::new(Some(2.8));
        assert_eq!(pipeline.correct(0), 0);
        assert_eq!(pipeline.correct(255), 255);
    }

    #[test]
    fn test_gamma_table_is_monotonic() {
        let pipeline = ColorPipeline::new(Some(2.8));
        let mut previous = 0;
        for value in 0..=255u8 {
            let corrected = pipeline.correct(value);
            assert!(corrected >= previous, "dip at input {value}");
            previous = corrected;
        }
        // The curve pushes mid-range values down.
        assert!(pipeline.correct(128) < 128);
    }

    #[test]
    fn test_identity_table_when_disabled() {
        let pipeline = ColorPipeline::new(None);
        for value in 0..=255u8 {
            assert_eq!(pipeline.correct(value), value);
        }
    }

    #[test]
    fn test_encode_packs_grb_into_upper_bytes() {
        let pipeline = ColorPipeline::new(None);
        let word = pipeline.encode(Rgb { r: 1, g: 2, b: 3 });
        assert_eq!(word, ((2 << 16) | (1 << 8) | 3) << 8);
        assert_eq!(word & 0xFF, 0, "low byte must stay clear for the shifter");
    }

    #[test]
    fn test_pack_components_roundtrip() {
        let word = color::pack(10, 20, 30);
        assert_eq!(color::components(word), (10, 20, 30));
        assert_eq!(color::components(0), (0, 0, 0));
    }

    #[test]
    fn test_channel_colors_are_distinct() {
        for (i, a) in CHANNEL_COLORS.iter().enumerate() {
            for b in &CHANNEL_COLORS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
