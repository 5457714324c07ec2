// demos/build_steps.rs
//
// A self-hosting build script: it rebuilds itself when this file changes,
// then runs a named sequence of build steps, stopping at the first failure.
//
//     cargo run --example build_steps

use livebuild::bootstrap::{BootstrapOutcome, rebuild_self};
use livebuild::engine::{BuildStep, run_steps};
use livebuild::exec::CommandSpec;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    livebuild::logging::init_logging(None)?;

    // If this script changed since the last run, it has just been recompiled
    // and re-executed; the fresh process does the actual work.
    if rebuild_self("demos/build_steps.rs").await? == BootstrapOutcome::Rebuilt {
        return Ok(());
    }

    let steps = vec![
        BuildStep::command("build", CommandSpec::new("cargo").args(["build", "--release"])),
        BuildStep::command("test", CommandSpec::new("cargo").arg("test")),
        BuildStep::command_with_input(
            "smoke",
            CommandSpec::new("sh")
                .arg("-c")
                .arg("read line && echo \"smoke: $line\""),
            "hello, world",
        ),
    ];

    run_steps(steps).await?;
    Ok(())
}
