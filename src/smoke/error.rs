use crate::imp::core::Error;
use std::{io, sync::Arc, time::Duration};

/// Why a run stopped.
///
/// [`SmokeTest::run_with`](crate::SmokeTest::run_with) handles every variant the same way
/// (narrate, screenshot, close); the variants only tell a reader where it broke.
#[derive(thiserror::Error, Debug)]
pub enum SmokeError {
    #[error("failed to start the browser: {0}")]
    Launch(#[source] Arc<Error>),
    #[error("navigation to {url} failed: {source}")]
    Navigation {
        url: String,
        #[source]
        source: Arc<Error>,
    },
    #[error("{selector} was not visible after {}ms: {source}", .timeout.as_millis())]
    NotVisible {
        selector: String,
        timeout: Duration,
        #[source]
        source: Arc<Error>,
    },
    #[error("{action} {selector} failed: {source}")]
    Action {
        action: &'static str,
        selector: String,
        #[source]
        source: Arc<Error>,
    },
    #[error("screenshot failed: {0}")]
    Screenshot(#[source] Arc<Error>),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to close the browser: {0}")]
    Close(#[source] Arc<Error>),
}

impl SmokeError {
    pub(crate) fn launch<E: Into<Error>>(e: E) -> Self { Self::Launch(Arc::new(e.into())) }

    /// A failed visibility wait. Only a driver timeout means "not visible"; anything
    /// else, such as a selector matching two elements, is reported as a failed action.
    pub(crate) fn visibility(selector: &str, timeout: Duration, source: Arc<Error>) -> Self {
        if source.is_timeout() {
            Self::NotVisible {
                selector: selector.to_owned(),
                timeout,
                source,
            }
        } else {
            Self::Action {
                action: "expect visible",
                selector: selector.to_owned(),
                source,
            }
        }
    }

    pub(crate) fn action(action: &'static str, selector: &str, source: Arc<Error>) -> Self {
        Self::Action {
            action,
            selector: selector.to_owned(),
            source,
        }
    }

    /// Whether the underlying driver call ran out of time.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::NotVisible { .. } => true,
            Self::Launch(e) | Self::Screenshot(e) | Self::Close(e) => e.is_timeout(),
            Self::Navigation { source, .. } | Self::Action { source, .. } => source.is_timeout(),
            Self::Io(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imp::core::ErrorMessage;

    fn responded(name: &str, message: &str) -> Arc<Error> {
        let m = ErrorMessage {
            name: name.to_owned(),
            message: message.to_owned(),
            stack: String::new(),
        };
        Arc::new(Error::ErrorResponded(Arc::new(m)))
    }

    #[test]
    fn timeout_is_not_visible() {
        let e = SmokeError::visibility(
            "#main-menu",
            Duration::from_secs(5),
            responded("TimeoutError", "Timeout 5000ms exceeded."),
        );
        assert!(matches!(e, SmokeError::NotVisible { .. }));
        assert!(e.is_timeout());
        assert!(e.to_string().starts_with("#main-menu was not visible after 5000ms"));
    }

    #[test]
    fn strict_violation_is_an_action() {
        let e = SmokeError::visibility(
            "#word-grid",
            Duration::from_secs(5),
            responded("Error", "strict mode violation"),
        );
        assert!(matches!(
            e,
            SmokeError::Action {
                action: "expect visible",
                ..
            }
        ));
        assert!(!e.is_timeout());
    }
}
