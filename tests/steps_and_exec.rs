use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use livebuild::engine::{BuildStep, run_steps};
use livebuild::errors::LivebuildError;
use livebuild::exec::CommandSpec;

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn steps_run_in_declared_order() -> TestResult {
    let order = Arc::new(Mutex::new(Vec::new()));

    let mut steps = Vec::new();
    for name in ["first", "second", "third"] {
        let order = Arc::clone(&order);
        steps.push(BuildStep::new(name, move || {
            let order = Arc::clone(&order);
            async move {
                order.lock().unwrap().push(name);
                Ok::<(), LivebuildError>(())
            }
        }));
    }

    run_steps(steps).await?;
    assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    Ok(())
}

#[tokio::test]
async fn first_failure_stops_the_sequence_and_names_the_step() -> TestResult {
    let later_ran = Arc::new(AtomicUsize::new(0));

    let steps = vec![
        BuildStep::new("prepare", || async { Ok::<(), LivebuildError>(()) }),
        BuildStep::new("compile", || async {
            Err(LivebuildError::Config("nope".to_string()))
        }),
        BuildStep::new("package", {
            let later_ran = Arc::clone(&later_ran);
            move || {
                let later_ran = Arc::clone(&later_ran);
                async move {
                    later_ran.fetch_add(1, Ordering::SeqCst);
                    Ok::<(), LivebuildError>(())
                }
            }
        }),
    ];

    let err = run_steps(steps).await.unwrap_err();
    match err {
        LivebuildError::Step { step, source } => {
            assert_eq!(step, "compile");
            assert!(matches!(*source, LivebuildError::Config(_)));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(later_ran.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn command_step_failure_carries_the_step_name() {
    let steps = vec![BuildStep::command(
        "fail",
        CommandSpec::new("sh").args(["-c", "exit 1"]),
    )];

    let err = run_steps(steps).await.unwrap_err();
    match err {
        LivebuildError::Step { step, source } => {
            assert_eq!(step, "fail");
            assert!(matches!(*source, LivebuildError::Exit { code: 1, .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn nonzero_exit_reports_the_code() {
    let err = CommandSpec::new("sh")
        .args(["-c", "exit 3"])
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        LivebuildError::Exit { ref program, code: 3 } if program == "sh"
    ));
}

#[tokio::test]
async fn unknown_program_is_a_spawn_error() {
    let err = CommandSpec::new("livebuild-definitely-not-a-program")
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, LivebuildError::Spawn { .. }));
}

#[tokio::test]
async fn piped_stdin_reaches_the_child() -> TestResult {
    // `grep -q` exits 0 only when the pattern arrives on stdin.
    CommandSpec::new("grep")
        .args(["-q", "hello"])
        .run_with_input("hello, world")
        .await?;
    Ok(())
}

#[tokio::test]
async fn successful_command_runs_clean() -> TestResult {
    CommandSpec::new("true").run().await?;
    Ok(())
}
