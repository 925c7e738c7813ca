use std::fs;
use std::path::PathBuf;

use circle_merge::core::config::{FieldConfig, LadderConfig};
use circle_merge::core::ladder::RadiusLadder;
use circle_merge::GameConfig;

fn shipped_config() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/config/game.ron")
}

#[test]
fn shipped_config_matches_defaults() {
    let cfg = GameConfig::load_from_file(shipped_config()).expect("shipped config parses");
    assert_eq!(cfg, GameConfig::default());
    assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
}

#[test]
fn local_layer_overrides_single_fields() {
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("game.local.ron");
    fs::write(
        &local,
        "(spawn: (seed: Some(42)), loss: (threshold_y: 250.0), window: (autoClose: 3.0))",
    )
    .unwrap();

    let (cfg, used, errors) = GameConfig::load_layered([shipped_config(), local]);
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(used.len(), 2);
    assert_eq!(cfg.spawn.seed, Some(42));
    assert_eq!(cfg.loss.threshold_y, 250.0);
    assert_eq!(cfg.window.auto_close, 3.0);
    // Siblings of overridden fields survive the merge.
    assert_eq!(cfg.spawn.top_margin, 30.0);
    assert_eq!(cfg.loss.rest_secs, 1.0);
    assert_eq!(cfg.window.title, "Circle Merge");
    assert_eq!(cfg.field, FieldConfig::default());
}

#[test]
fn missing_and_broken_layers_are_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.ron");
    fs::write(&broken, "(loss: (threshold_y: ").unwrap();
    let missing = dir.path().join("nope.ron");

    let (cfg, used, errors) = GameConfig::load_layered([shipped_config(), broken, missing]);
    assert_eq!(used.len(), 1);
    assert_eq!(errors.len(), 2);
    assert!(errors[0].contains("parse error"), "{}", errors[0]);
    assert!(errors[1].contains("read error"), "{}", errors[1]);
    assert_eq!(cfg, GameConfig::default());
}

#[test]
fn no_layers_yields_defaults() {
    let (cfg, used, errors) = GameConfig::load_layered(Vec::<PathBuf>::new());
    assert!(used.is_empty());
    assert!(errors.is_empty());
    assert_eq!(cfg, GameConfig::default());
}

#[test]
fn unreadable_single_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::load_from_file(dir.path().join("absent.ron")).unwrap_err();
    assert!(err.contains("read config"), "{err}");
}

#[test]
fn custom_ladder_drives_the_radius_ladder() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.ron");
    fs::write(&path, "(ladder: (radii: [10.0, 20.0, 30.0], spawnable: 9))").unwrap();
    let cfg = GameConfig::load_from_file(&path).unwrap();
    assert!(cfg
        .validate()
        .iter()
        .any(|w| w.contains("exceeds ladder length")));

    let ladder = RadiusLadder::from_config(&cfg.ladder);
    assert_eq!(ladder.len(), 3);
    assert_eq!(ladder.spawnable(), 3);
    assert_eq!(ladder.next(2), None);
}

#[test]
fn invalid_ladder_falls_back_to_default() {
    let cfg = LadderConfig {
        radii: vec![50.0, 40.0],
        spawnable: 1,
    };
    let ladder = RadiusLadder::from_config(&cfg);
    assert_eq!(ladder.len(), LadderConfig::default().radii.len());
}
