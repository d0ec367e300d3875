mod tests {
    use myrtio_frame_engine::{EffectId, EffectParams, PresetOptions};

    #[test]
    fn test_effect_id_parse_breathe() {
        assert_eq!(EffectId::parse_from_str("breathe"), Some(EffectId::Breathe));
    }

    #[test]
    fn test_effect_id_from_raw_breathe() {
        assert_eq!(EffectId::from_raw(0), Some(EffectId::Breathe));
    }

    #[test]
    fn test_effect_id_parse_circling_dark_spot() {
        assert_eq!(
            EffectId::parse_from_str("circling_dark_spot"),
            Some(EffectId::CirclingDarkSpot)
        );
    }

    #[test]
    fn test_effect_id_from_raw_circling_dark_spot() {
        // Dark spot is the last effect, ID 11.
        assert_eq!(EffectId::from_raw(11), Some(EffectId::CirclingDarkSpot));
        assert_eq!(EffectId::from_raw(12), None);
    }

    #[test]
    fn test_effect_id_as_str_round_trips_for_every_id() {
        for raw in 0..=11 {
            let id = EffectId::from_raw(raw).unwrap();
            assert_eq!(id as u8, raw);
            assert_eq!(EffectId::parse_from_str(id.as_str()), Some(id));
        }
    }

    #[test]
    fn test_effect_id_parse_unknown() {
        assert_eq!(EffectId::parse_from_str("Breathe"), None);
        assert_eq!(EffectId::parse_from_str(""), None);
    }

    #[test]
    fn test_effect_id_display_name() {
        assert_eq!(EffectId::GrowingBar.display_name(), "Growing Bar");
        assert_eq!(EffectId::CirclingBrightDot.display_name(), "Circling Bright Dot");
    }

    #[test]
    fn test_preset_matches_effect_id() {
        let options = PresetOptions::default();
        for raw in 0..=11 {
            let id = EffectId::from_raw(raw).unwrap();
            let params = id.preset(options);
            assert_eq!(params.id(), id);
            assert_eq!(params.name(), id.display_name());
        }
    }

    #[test]
    fn test_preset_follows_options() {
        let params = EffectId::Pulse.preset(PresetOptions {
            abrupt_fade: false,
            frequency: 2.0,
        });
        let EffectParams::Pulse(pulse) = params else {
            panic!("expected pulse parameters");
        };
        assert_eq!(pulse.frequency, 2.0);
        assert_eq!(pulse.min_brightness, 0.015);

        let params = EffectId::GrowUp.preset(PresetOptions {
            abrupt_fade: false,
            frequency: 1.0,
        });
        let EffectParams::GrowUp(grow) = params else {
            panic!("expected grow up parameters");
        };
        assert!(!grow.abrupt_fade);
        assert_eq!(grow.brightness, 255);
    }
}
