use studio_engine::animation::{InterpolationMode, PlaybackClock};
use studio_engine::cloth::RestDistance;
use studio_engine::config::{EditorConfig, LogLevel};
use studio_engine::editor::EditorSession;

#[test]
fn test_toml_file_round_trip() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("studio.toml");

    let mut config = EditorConfig::default();
    config.timeline.interpolation = InterpolationMode::Smooth;
    config.timeline.clock = PlaybackClock::Accumulated {
        max_frames_per_tick: 4,
    };
    config.cloth.rest_distance = RestDistance::FromSpacing;
    config.save_toml(&path)?;

    let loaded = EditorConfig::from_toml_file(&path)?;
    assert_eq!(loaded.timeline.interpolation, InterpolationMode::Smooth);
    assert_eq!(loaded.timeline.clock, config.timeline.clock);
    assert_eq!(loaded.cloth.rest_distance, RestDistance::FromSpacing);
    loaded.validate()?;
    Ok(())
}

#[test]
fn test_json_file_round_trip() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("studio.json");

    let mut config = EditorConfig::default();
    config.cloth.size = 6.0;
    config.save_json(&path)?;

    let loaded = EditorConfig::from_json_file(&path)?;
    assert_eq!(loaded.cloth.size, 6.0);
    Ok(())
}

#[test]
fn test_env_overrides() -> anyhow::Result<()> {
    std::env::set_var("STUDIO_TIMELINE_DURATION", "120");
    std::env::set_var("STUDIO_CLOTH_RESOLUTION", "8");
    std::env::set_var("STUDIO_LOG_LEVEL", "debug");

    let mut config = EditorConfig::default();
    config.apply_env_overrides();

    std::env::remove_var("STUDIO_TIMELINE_DURATION");
    std::env::remove_var("STUDIO_CLOTH_RESOLUTION");
    std::env::remove_var("STUDIO_LOG_LEVEL");

    assert_eq!(config.timeline.duration, 120.0);
    assert_eq!(config.cloth.resolution, 8);
    assert_eq!(config.logging.level, LogLevel::Debug);

    let session = EditorSession::new(&config)?;
    assert_eq!(session.timeline.duration, 120.0);
    Ok(())
}

#[test]
fn test_invalid_timeline_is_rejected_by_session() {
    let mut config = EditorConfig::default();
    config.timeline.fps = 0.0;
    assert!(config.validate().is_err());
    assert!(EditorSession::new(&config).is_err());
}
