// src/bootstrap.rs

//! Self-rebuild bootstrap for build scripts.
//!
//! A build script links this crate and calls [`rebuild_self`] first thing.
//! The script's modification time is compared against the value persisted
//! from the previous run; when it changed, the script is recompiled over the
//! currently-running executable and that binary is executed once.
//!
//! The persisted baseline is an explicit [`ScriptStamp`] value: the pure
//! [`ScriptStamp::observe`] decides whether a rebuild is due, and the caller
//! owns when and whether to persist via [`load_stamp`] / [`store_stamp`].

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::{debug, info};

use crate::errors::{LivebuildError, Result};
use crate::exec::CommandSpec;

/// File name of the stamp in the system temp directory.
const STAMP_FILE_NAME: &str = "livebuild_stamp";

/// Well-known location of the persisted stamp.
pub fn default_stamp_path() -> PathBuf {
    env::temp_dir().join(STAMP_FILE_NAME)
}

/// Last-observed modification time of a build script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptStamp {
    pub last_seen: Option<SystemTime>,
}

impl ScriptStamp {
    /// Compare an observed modification time against the stamp.
    ///
    /// Returns the updated stamp and whether a rebuild is due. A first
    /// observation records the baseline without requesting a rebuild.
    pub fn observe(self, modified: SystemTime) -> (ScriptStamp, bool) {
        let rebuild = match self.last_seen {
            None => false,
            Some(last) => last != modified,
        };
        (
            ScriptStamp {
                last_seen: Some(modified),
            },
            rebuild,
        )
    }
}

/// Read a stamp from `path`. A missing file yields an empty stamp.
pub fn load_stamp(path: &Path) -> Result<ScriptStamp> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ScriptStamp::default());
        }
        Err(err) => return Err(err.into()),
    };

    Ok(ScriptStamp {
        last_seen: Some(parse_stamp(&text)?),
    })
}

/// Persist a stamp to `path` in the textual `"<secs> <nanos>"` form
/// (duration since the Unix epoch).
///
/// An empty stamp (nothing observed yet) writes nothing.
pub fn store_stamp(path: &Path, stamp: &ScriptStamp) -> Result<()> {
    let Some(last_seen) = stamp.last_seen else {
        return Ok(());
    };

    let since_epoch = last_seen.duration_since(UNIX_EPOCH).map_err(|err| {
        LivebuildError::Stamp(format!("modification time predates the Unix epoch: {err}"))
    })?;
    fs::write(
        path,
        format!("{} {}", since_epoch.as_secs(), since_epoch.subsec_nanos()),
    )?;
    Ok(())
}

fn parse_stamp(text: &str) -> Result<SystemTime> {
    let parsed = text.trim().split_once(' ').and_then(|(secs, nanos)| {
        let secs: u64 = secs.parse().ok()?;
        let nanos: u32 = nanos.parse().ok()?;
        Some(UNIX_EPOCH + Duration::new(secs, nanos))
    });

    parsed.ok_or_else(|| LivebuildError::Stamp(format!("malformed stamp contents: {text:?}")))
}

/// Whether a self-rebuild happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    UpToDate,
    Rebuilt,
}

/// Stat `script`, compare against the stamp at `stamp_path`, persist the new
/// observation, and report whether a rebuild is due.
///
/// A first observation persists the baseline and reports no rebuild.
pub fn check_script(script: &Path, stamp_path: &Path) -> Result<bool> {
    let modified = fs::metadata(script)?.modified()?;
    let (next, rebuild) = load_stamp(stamp_path)?.observe(modified);
    store_stamp(stamp_path, &next)?;

    debug!(script = ?script, rebuild, "checked build script stamp");
    Ok(rebuild)
}

/// Recompile and re-execute the running build script if its source changed.
///
/// When the stamp at [`default_stamp_path`] says `script` changed, the
/// script is compiled over the currently-running executable with `rustc`
/// and that binary is executed once before this returns
/// [`BootstrapOutcome::Rebuilt`]. One-shot; never concurrent.
pub async fn rebuild_self(script: impl AsRef<Path>) -> Result<BootstrapOutcome> {
    let script = script.as_ref();

    if !check_script(script, &default_stamp_path())? {
        return Ok(BootstrapOutcome::UpToDate);
    }

    let exe = env::current_exe()?;
    info!(script = ?script, exe = ?exe, "build script changed, rebuilding it");

    CommandSpec::new("rustc")
        .arg("-O")
        .arg("-o")
        .arg(exe.to_string_lossy())
        .arg(script.to_string_lossy())
        .run()
        .await?;

    CommandSpec::new(exe.to_string_lossy()).run().await?;

    Ok(BootstrapOutcome::Rebuilt)
}
