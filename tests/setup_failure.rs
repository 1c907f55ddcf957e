use std::fs;
use tempdir::TempDir;
use wordle_smoke::{SmokeConfig, SmokeError, SmokeTest};

// Runs in its own test binary: the driver location is process-wide.
wordle_smoke::runtime_test!(driver_setup_failure_touches_nothing, {
    let tmp = TempDir::new("wordle-smoke-setup").unwrap();
    let blocker = tmp.path().join("blocker");
    fs::write(&blocker, b"not a directory").unwrap();
    std::env::set_var("PLAYWRIGHT_DRIVER_DIR", blocker.join("driver"));

    let artifacts = tmp.path().join("verification");
    let test = SmokeTest::new(SmokeConfig::default().with_artifact_dir(&artifacts));
    match test.run().await {
        Err(SmokeError::Launch(e)) => println!("setup failed as expected: {e}"),
        Err(e) => panic!("expected a launch error, got {e}"),
        Ok(report) => panic!("run went ahead without a driver: {:?}", report.narration()),
    }
    assert!(!artifacts.exists());
    assert_eq!(fs::read(&blocker).unwrap(), b"not a directory");
});
