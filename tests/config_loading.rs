use std::error::Error;
use std::path::PathBuf;

use livebuild::config::{ConfigFile, load_and_validate, validate_config};
use livebuild::errors::LivebuildError;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn demo_config_parses_and_validates() -> TestResult {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let cfg = load_and_validate(manifest.join("demos/Livebuild.toml"))?;

    assert_eq!(cfg.watch.dir, "src");
    assert_eq!(cfg.watch.extensions, vec!["rs".to_string()]);
    assert_eq!(cfg.watch.poll_ms, 250);

    assert_eq!(cfg.step.len(), 2);
    assert_eq!(cfg.step[0].name, "build");
    assert_eq!(cfg.step[0].program, "cargo");
    assert_eq!(cfg.step[0].args, vec!["build".to_string()]);
    assert_eq!(cfg.step[1].stdin.as_deref(), Some("build finished"));
    Ok(())
}

#[test]
fn defaults_apply_when_sections_are_missing() -> TestResult {
    let cfg: ConfigFile = toml::from_str("")?;

    assert_eq!(cfg.watch.dir, ".");
    assert_eq!(cfg.watch.extensions, vec!["rs".to_string()]);
    assert_eq!(cfg.watch.poll_ms, 1000);
    assert!(cfg.step.is_empty());

    validate_config(&cfg)?;
    Ok(())
}

#[test]
fn missing_config_file_is_an_error() {
    let err = load_and_validate("/livebuild/definitely/missing.toml").unwrap_err();
    assert!(matches!(err, LivebuildError::Config(_)));
}

#[test]
fn zero_poll_interval_is_rejected() -> TestResult {
    let cfg: ConfigFile = toml::from_str("[watch]\npoll_ms = 0\n")?;
    let err = validate_config(&cfg).unwrap_err();
    assert!(matches!(err, LivebuildError::Config(ref msg) if msg.contains("poll_ms")));
    Ok(())
}

#[test]
fn empty_extension_list_is_rejected() -> TestResult {
    let cfg: ConfigFile = toml::from_str("[watch]\nextensions = []\n")?;
    let err = validate_config(&cfg).unwrap_err();
    assert!(matches!(err, LivebuildError::Config(ref msg) if msg.contains("extensions")));
    Ok(())
}

#[test]
fn duplicate_step_names_are_rejected() -> TestResult {
    let cfg: ConfigFile = toml::from_str(
        r#"
[[step]]
name = "build"
program = "cargo"

[[step]]
name = "build"
program = "cargo"
"#,
    )?;

    let err = validate_config(&cfg).unwrap_err();
    assert!(matches!(err, LivebuildError::Config(ref msg) if msg.contains("duplicate")));
    Ok(())
}

#[test]
fn empty_step_program_is_rejected() -> TestResult {
    let cfg: ConfigFile = toml::from_str(
        r#"
[[step]]
name = "build"
program = ""
"#,
    )?;

    let err = validate_config(&cfg).unwrap_err();
    assert!(matches!(err, LivebuildError::Config(ref msg) if msg.contains("empty program")));
    Ok(())
}
