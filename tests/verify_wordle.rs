use std::{net::SocketAddr, time::Duration};
use tempdir::TempDir;
use warp::Filter;
use wordle_smoke::{Credentials, SmokeConfig, SmokeError, SmokeTest, Stage};

const APP: &str = include_str!("fixture/app.html");

wordle_smoke::runtime_test!(verify_wordle, {
    let addr = serve();
    let tmp = TempDir::new("wordle-smoke").unwrap();

    println!("happy path");
    let base = SmokeConfig::default()
        .with_artifact_dir(tmp.path())
        .with_expect_timeout(Duration::from_secs(10));
    let test = SmokeTest::new(base.clone().with_base_url(format!("http://{}/", addr)));
    let before = automation_processes();
    let report = match test.run().await {
        Ok(r) => r,
        Err(e @ SmokeError::Launch(_)) => {
            eprintln!("browser unavailable ({e}); skipping");
            return;
        }
        Err(e) => panic!("{e}"),
    };
    assert_released(before).await;
    assert!(report.is_success(), "{:?}", report.failure());
    assert_eq!(
        report.narration().last().map(String::as_str),
        Some("Wordle Game screenshot taken."),
    );
    assert!(tmp.path().join("games_menu.png").is_file());
    assert!(tmp.path().join("wordle_game.png").is_file());
    assert!(!tmp.path().join("error.png").exists());
    let png = std::fs::read(tmp.path().join("wordle_game.png")).unwrap();
    assert_eq!(&png[..4], b"\x89PNG");

    println!("wrong password");
    let test = SmokeTest::new(
        base.clone()
            .with_base_url(format!("http://{}/", addr))
            .with_credentials(Credentials::new("testuser", "wrong"))
            .with_expect_timeout(Duration::from_secs(1)),
    );
    let before = automation_processes();
    let report = test.run().await.unwrap();
    assert_released(before).await;
    assert_eq!(report.reached(), Stage::LoggedIn);
    assert!(report.failure().map(SmokeError::is_timeout).unwrap_or(false));
    assert!(tmp.path().join("error.png").is_file());
    assert!(!tmp.path().join("games_menu.png").exists());
    assert!(!tmp.path().join("wordle_game.png").exists());

    println!("board never renders");
    let test = SmokeTest::new(
        base.with_base_url(format!("http://{}/no-board", addr))
            .with_expect_timeout(Duration::from_secs(1)),
    );
    let before = automation_processes();
    let report = test.run().await.unwrap();
    assert_released(before).await;
    assert_eq!(report.reached(), Stage::GameScreenVisible);
    assert!(tmp.path().join("games_menu.png").is_file());
    assert!(tmp.path().join("error.png").is_file());
    assert!(!tmp.path().join("wordle_game.png").exists());
});

fn serve() -> SocketAddr {
    let app = warp::path::end()
        .or(warp::path("no-board").and(warp::path::end()))
        .map(|_| warp::reply::html(APP));
    let (addr, server) = warp::serve(app).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}

/// Live driver and browser processes on this machine. The driver runs out of the
/// `ms-playwright` cache (or a temp dir named after this crate) and Chromium out of
/// `ms-playwright`, so matching on the command line finds both, including browser
/// processes that were reparented after their driver died.
#[cfg(target_os = "linux")]
fn automation_processes() -> Option<usize> {
    let entries = std::fs::read_dir("/proc").ok()?;
    let n = entries
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().bytes().all(|b| b.is_ascii_digit()))
        .filter(|e| {
            let stat = std::fs::read_to_string(e.path().join("stat")).unwrap_or_default();
            // Zombies are already dead and only wait to be reaped by their parent.
            let live = stat
                .rsplit_once(") ")
                .map(|(_, rest)| !rest.starts_with('Z'))
                .unwrap_or(false);
            let cmdline = std::fs::read(e.path().join("cmdline")).unwrap_or_default();
            let cmdline = String::from_utf8_lossy(&cmdline).replace('\0', " ");
            live && (cmdline.contains("ms-playwright") || cmdline.contains("wordle-smoke/driver-"))
        })
        .count();
    Some(n)
}

#[cfg(not(target_os = "linux"))]
fn automation_processes() -> Option<usize> { None }

/// Fails unless the process count falls back to `before` within a few seconds.
async fn assert_released(before: Option<usize>) {
    let before = match before {
        Some(n) => n,
        None => return,
    };
    let mut now = before;
    for _ in 0..50 {
        now = automation_processes().unwrap_or(0);
        if now <= before {
            return;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("{} driver or browser process(es) outlived the run", now - before);
}
