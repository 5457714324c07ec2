use std::error::Error;
use std::fs;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use livebuild::bootstrap::{ScriptStamp, check_script, load_stamp, store_stamp};
use livebuild::errors::LivebuildError;

type TestResult = Result<(), Box<dyn Error>>;

fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(1_700_000_000 + secs)
}

#[test]
fn first_observation_records_without_rebuild() {
    let (stamp, rebuild) = ScriptStamp::default().observe(at(0));
    assert!(!rebuild);
    assert_eq!(stamp.last_seen, Some(at(0)));
}

#[test]
fn unchanged_time_never_requests_rebuild() {
    let (stamp, _) = ScriptStamp::default().observe(at(0));
    let (stamp, rebuild) = stamp.observe(at(0));
    assert!(!rebuild);
    assert_eq!(stamp.last_seen, Some(at(0)));
}

#[test]
fn changed_time_requests_rebuild_once() {
    let (stamp, _) = ScriptStamp::default().observe(at(0));

    let (stamp, rebuild) = stamp.observe(at(7));
    assert!(rebuild);

    // The baseline rebased, so the same time again is quiet.
    let (_, rebuild) = stamp.observe(at(7));
    assert!(!rebuild);
}

#[test]
fn stamp_round_trips_through_disk() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("stamp");

    let t = UNIX_EPOCH + Duration::new(1_700_000_000, 123_456_789);
    store_stamp(
        &path,
        &ScriptStamp {
            last_seen: Some(t),
        },
    )?;

    let loaded = load_stamp(&path)?;
    assert_eq!(loaded.last_seen, Some(t));
    Ok(())
}

#[test]
fn missing_stamp_file_loads_empty() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let loaded = load_stamp(&tmp.path().join("never-written"))?;
    assert_eq!(loaded.last_seen, None);
    Ok(())
}

#[test]
fn empty_stamp_is_not_persisted() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("stamp");
    store_stamp(&path, &ScriptStamp::default())?;
    assert!(!path.exists());
    Ok(())
}

#[test]
fn malformed_stamp_file_is_an_error() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("stamp");
    fs::write(&path, "definitely not a timestamp")?;

    let err = load_stamp(&path).unwrap_err();
    assert!(matches!(err, LivebuildError::Stamp(_)));
    Ok(())
}

#[test]
fn check_script_tracks_modification_time() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let script = tmp.path().join("build.rs");
    let stamp_path = tmp.path().join("stamp");
    fs::write(&script, "fn main() {}")?;

    // First observation persists the baseline without a rebuild.
    assert!(!check_script(&script, &stamp_path)?);
    assert!(stamp_path.exists());

    // Unchanged modification time stays quiet.
    assert!(!check_script(&script, &stamp_path)?);

    // A changed modification time reports a rebuild exactly once.
    fs::File::options()
        .write(true)
        .open(&script)?
        .set_modified(UNIX_EPOCH + Duration::from_secs(1_700_000_000))?;
    assert!(check_script(&script, &stamp_path)?);
    assert!(!check_script(&script, &stamp_path)?);

    Ok(())
}

#[test]
fn check_script_fails_for_missing_script() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let err = check_script(&tmp.path().join("gone.rs"), &tmp.path().join("stamp")).unwrap_err();
    assert!(matches!(err, LivebuildError::Io(_)));
    Ok(())
}
