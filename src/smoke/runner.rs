use crate::smoke::{
    BrowserSession, Button, Checkpoint, Element, SmokeConfig, SmokeError, Stage, UiSession,
};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// What a run did, in order.
#[derive(Debug)]
pub struct Report {
    reached: Stage,
    screenshots: Vec<PathBuf>,
    narration: Vec<String>,
    failure: Option<SmokeError>,
    torn_down: bool,
}

impl Report {
    fn new() -> Self {
        Self {
            reached: Stage::Started,
            screenshots: Vec::new(),
            narration: Vec::new(),
            failure: None,
            torn_down: false,
        }
    }

    /// Furthest stage completed before the run ended.
    pub fn reached(&self) -> Stage { self.reached }

    /// Screenshots written by this run, in the order they were taken.
    pub fn screenshots(&self) -> &[PathBuf] { &self.screenshots }

    /// Every line printed to stdout.
    pub fn narration(&self) -> &[String] { &self.narration }

    pub fn failure(&self) -> Option<&SmokeError> { self.failure.as_ref() }

    pub fn torn_down(&self) -> bool { self.torn_down }

    pub fn is_success(&self) -> bool { self.failure.is_none() && self.reached == Stage::Completed }

    fn say<S: Into<String>>(&mut self, line: S) {
        let line = line.into();
        println!("{}", line);
        self.narration.push(line);
    }

    fn reach(&mut self, stage: Stage) {
        log::debug!("reached {}", stage);
        self.reached = stage;
    }
}

/// The scripted walk from the login form to the word-guessing board.
///
/// The first failing step ends the walk. Its message is printed, the page is
/// captured to `error.png`, and the browser is closed. The browser is closed on
/// the success path too, exactly once either way.
#[derive(Debug, Clone)]
pub struct SmokeTest {
    config: SmokeConfig,
}

impl SmokeTest {
    pub fn new(config: SmokeConfig) -> Self { Self { config } }

    pub fn config(&self) -> &SmokeConfig { &self.config }

    /// Launches a headless browser and runs the walk against it.
    ///
    /// Only a failure to bring the browser up is returned as `Err`. Failures after
    /// that are handled in place and recorded in the [`Report`].
    pub async fn run(&self) -> Result<Report, SmokeError> {
        let session = BrowserSession::launch(&self.config).await?;
        Ok(self.run_with(session).await)
    }

    /// Runs the walk over an already open session and closes it afterwards.
    pub async fn run_with<S: UiSession>(&self, mut session: S) -> Report {
        let mut report = Report::new();
        if let Err(e) = self.steps(&mut session, &mut report).await {
            report.say(format!("Error: {}", e));
            if let Err(shot) = self.capture(&mut session, Checkpoint::Error, &mut report).await {
                log::error!("failed to save the error screenshot: {}", shot);
            }
            report.failure = Some(e);
        }
        if let Err(e) = session.close().await {
            log::error!("{}", e);
        }
        report.torn_down = true;
        report
    }

    async fn steps<S: UiSession>(&self, s: &mut S, r: &mut Report) -> Result<(), SmokeError> {
        remove_stale(&self.config.artifact_dir)?;

        r.say("Navigating to homepage...");
        s.goto(&self.config.base_url).await?;

        r.say("Logging in...");
        let creds = &self.config.credentials;
        s.fill(&Element::UsernameInput.selector(), &creds.username).await?;
        s.fill(&Element::PasswordInput.selector(), &creds.password).await?;
        s.click(&Button::Login.selector()).await?;
        r.reach(Stage::LoggedIn);

        r.say("Waiting for main menu...");
        s.expect_visible(&Element::MainMenu.selector()).await?;
        r.reach(Stage::MainMenuVisible);

        r.say(format!("Clicking '{}' button...", Button::Games));
        s.click(&Button::Games.selector()).await?;

        r.say("Checking Games Menu...");
        s.expect_visible(&Element::GamesMenu.selector()).await?;
        r.reach(Stage::GamesMenuVisible);
        self.capture(s, Checkpoint::GamesMenu, r).await?;

        r.say(format!("Clicking '{}'...", Button::GuessThePassword));
        s.click(&Button::GuessThePassword.selector()).await?;

        r.say("Checking Wordle Screen...");
        s.expect_visible(&Element::WordleScreen.selector()).await?;
        r.reach(Stage::GameScreenVisible);
        s.expect_visible(&Element::WordGrid.selector()).await?;
        r.reach(Stage::GameBoardVisible);
        self.capture(s, Checkpoint::WordleGame, r).await?;

        r.reach(Stage::Completed);
        Ok(())
    }

    async fn capture<S: UiSession>(
        &self,
        s: &mut S,
        checkpoint: Checkpoint,
        r: &mut Report,
    ) -> Result<(), SmokeError> {
        let bytes = s.screenshot().await?;
        let path = checkpoint.path(&self.config.artifact_dir);
        fs::create_dir_all(&self.config.artifact_dir)?;
        fs::write(&path, bytes)?;
        log::debug!("wrote {}", path.display());
        r.screenshots.push(path);
        if let Some(line) = checkpoint.narration() {
            r.say(line);
        }
        Ok(())
    }
}

/// Removes checkpoint files left by an earlier run.
fn remove_stale(dir: &Path) -> io::Result<()> {
    for checkpoint in Checkpoint::ALL {
        let path = checkpoint.path(dir);
        match fs::remove_file(&path) {
            Ok(()) => log::debug!("removed stale {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
