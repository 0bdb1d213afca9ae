#![cfg(feature = "serde")]

use narwhal::{Configuration, DampingMode, LayoutEngine, Point, StopCounting};

#[test]
fn partial_configuration_falls_back_to_defaults() {
    let cfg: Configuration = serde_json::from_str(
        r#"{
            "springLength": 80.0,
            "dampingMode": "magnitude",
            "stopCounting": "consecutive",
            "minPoint": { "x": -10, "y": -20 }
        }"#,
    )
    .unwrap();

    assert_eq!(cfg.spring_length, 80.0);
    assert_eq!(cfg.damping_mode, DampingMode::Magnitude);
    assert_eq!(cfg.stop_counting, StopCounting::Consecutive);
    assert_eq!(cfg.min_point, Point::new(-10, -20));
    assert_eq!(cfg.max_iterations, Configuration::default().max_iterations);
    LayoutEngine::with_configuration(cfg).unwrap();
}

#[test]
fn deserialized_configuration_is_still_validated() {
    let cfg: Configuration = serde_json::from_str(r#"{ "damping": 1.5 }"#).unwrap();
    assert!(LayoutEngine::with_configuration(cfg).is_err());
}
