#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::constants::*;
    use crate::enums::*;
    use crate::error::MeteorError;
    use crate::events::WorldEvent;
    use crate::handle::BodyId;
    use crate::state::{BodySnapshot, WorldSnapshot};
    use crate::types::{SimTime, Vec3};

    #[test]
    fn test_default_config_is_valid() {
        let config = MeteorConfig::default();
        config.validate().unwrap();
        assert_eq!(config.arena.cell_size, CELL_SIZE);
        assert_eq!(config.arena.row_stride, GRID_ROW_STRIDE);
        assert_eq!(config.targeting.query_half_extent, TARGETING_BOX_SIZE / 2.0);
        assert_eq!(config.targeting.priority, TargetPriority::Nearest);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "arena": { "cell_size": 12.5 }, "scenario": { "seed": 7 } }"#;
        let config = MeteorConfig::from_json(json).unwrap();
        assert_eq!(config.arena.cell_size, 12.5);
        assert_eq!(config.arena.row_stride, GRID_ROW_STRIDE);
        assert_eq!(config.scenario.seed, 7);
        assert_eq!(config.scenario.asteroid_count, ASTEROID_COUNT);
        assert_eq!(config.targeting, TargetingConfig::default());
    }

    #[test]
    fn test_priority_parses_from_json() {
        let json = r#"{ "targeting": { "priority": "MovingFirst" } }"#;
        let config = MeteorConfig::from_json(json).unwrap();
        assert_eq!(config.targeting.priority, TargetPriority::MovingFirst);
    }

    #[test]
    fn test_non_positive_cell_size_rejected() {
        for bad in [0.0, -30.0, f64::NAN, f64::INFINITY] {
            let arena = ArenaConfig {
                cell_size: bad,
                ..Default::default()
            };
            assert!(
                matches!(arena.validate(), Err(MeteorError::InvalidConfig(_))),
                "cell_size {bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_non_positive_row_stride_rejected() {
        let arena = ArenaConfig {
            row_stride: 0,
            ..Default::default()
        };
        assert!(arena.validate().is_err());
    }

    #[test]
    fn test_json_with_bad_cell_size_fails_validation() {
        let json = r#"{ "arena": { "cell_size": -1.0 } }"#;
        let err = MeteorConfig::from_json(json).unwrap_err();
        assert!(matches!(err, MeteorError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = MeteorConfig::from_json("{ arena: ").unwrap_err();
        assert!(matches!(err, MeteorError::Parse(_)));
    }

    #[test]
    fn test_scenario_validation() {
        let inverted = ScenarioConfig {
            min_radius: 5.0,
            max_radius: 1.0,
            ..Default::default()
        };
        assert!(inverted.validate().is_err());

        let bad_fraction = ScenarioConfig {
            moving_fraction: 1.5,
            ..Default::default()
        };
        assert!(bad_fraction.validate().is_err());

        let zone_too_big = ScenarioConfig {
            clear_zone: 1_000.0,
            field_radius: 100.0,
            ..Default::default()
        };
        assert!(zone_too_big.validate().is_err());
    }

    #[test]
    fn test_world_event_is_tagged() {
        let event = WorldEvent::Impact {
            projectile: BodyId::new(3, 0),
            target: BodyId::new(1, 2),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "Impact");
        assert_eq!(json["target"]["generation"], 2);
    }

    #[test]
    fn test_snapshot_counts_by_kind() {
        let body = |index, kind| BodySnapshot {
            id: BodyId::new(index, 0),
            kind,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            radius: 1.0,
            tracked: false,
        };
        let snap = WorldSnapshot {
            time: SimTime::default(),
            bodies: vec![
                body(0, BodyKind::Ship),
                body(1, BodyKind::Asteroid),
                body(2, BodyKind::Asteroid),
            ],
            bucket_count: 2,
        };
        assert_eq!(snap.count_of(BodyKind::Asteroid), 2);
        assert_eq!(snap.count_of(BodyKind::Projectile), 0);

        let json = serde_json::to_string(&snap).unwrap();
        let back: WorldSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }

    #[test]
    fn test_error_messages_name_the_body() {
        let err = MeteorError::NonFinitePosition {
            id: BodyId::new(4, 1),
        };
        assert_eq!(err.to_string(), "body B4g1 has a non-finite position");
    }
}
