use std::{fmt, path::PathBuf, time::Duration};

pub const BASE_URL: &str = "http://localhost:3000";
pub const ARTIFACT_DIR: &str = "verification";
/// Playwright's default for page actions.
pub const ACTION_TIMEOUT: Duration = Duration::from_secs(30);
/// Playwright's default for `expect` assertions.
pub const EXPECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Login for the seeded test account.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new<U: Into<String>, P: Into<String>>(username: U, password: P) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for Credentials {
    fn default() -> Self { Self::new("testuser", "password") }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where the smoke test points the browser and where it leaves its screenshots.
///
/// The binary always runs with [`SmokeConfig::default`]. The setters exist so
/// tests can aim the runner at a fixture server and a scratch directory.
#[derive(Debug, Clone, PartialEq)]
pub struct SmokeConfig {
    pub base_url: String,
    pub credentials: Credentials,
    pub artifact_dir: PathBuf,
    pub headless: bool,
    pub action_timeout: Duration,
    pub expect_timeout: Duration,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_owned(),
            credentials: Credentials::default(),
            artifact_dir: PathBuf::from(ARTIFACT_DIR),
            headless: true,
            action_timeout: ACTION_TIMEOUT,
            expect_timeout: EXPECT_TIMEOUT,
        }
    }
}

impl SmokeConfig {
    pub fn with_base_url<S: Into<String>>(mut self, x: S) -> Self {
        self.base_url = x.into();
        self
    }

    pub fn with_credentials(mut self, x: Credentials) -> Self {
        self.credentials = x;
        self
    }

    pub fn with_artifact_dir<P: Into<PathBuf>>(mut self, x: P) -> Self {
        self.artifact_dir = x.into();
        self
    }

    pub fn with_headless(mut self, x: bool) -> Self {
        self.headless = x;
        self
    }

    pub fn with_action_timeout(mut self, x: Duration) -> Self {
        self.action_timeout = x;
        self
    }

    pub fn with_expect_timeout(mut self, x: Duration) -> Self {
        self.expect_timeout = x;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = SmokeConfig::default();
        assert_eq!(c.base_url, "http://localhost:3000");
        assert_eq!(c.credentials.username, "testuser");
        assert_eq!(c.credentials.password, "password");
        assert_eq!(c.artifact_dir, PathBuf::from("verification"));
        assert!(c.headless);
        assert_eq!(c.action_timeout, Duration::from_millis(30_000));
        assert_eq!(c.expect_timeout, Duration::from_millis(5_000));
    }

    #[test]
    fn password_is_redacted() {
        let c = SmokeConfig::default().with_credentials(Credentials::new("ana", "hunter2"));
        let s = format!("{:?}", c);
        assert!(s.contains("ana"));
        assert!(!s.contains("hunter2"));
    }
}
