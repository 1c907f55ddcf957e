use std::fmt;

/// How far a run got. Variants are ordered along the happy path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Started,
    LoggedIn,
    MainMenuVisible,
    GamesMenuVisible,
    GameScreenVisible,
    GameBoardVisible,
    Completed,
}

impl Stage {
    pub fn next(self) -> Option<Stage> {
        match self {
            Self::Started => Some(Self::LoggedIn),
            Self::LoggedIn => Some(Self::MainMenuVisible),
            Self::MainMenuVisible => Some(Self::GamesMenuVisible),
            Self::GamesMenuVisible => Some(Self::GameScreenVisible),
            Self::GameScreenVisible => Some(Self::GameBoardVisible),
            Self::GameBoardVisible => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::LoggedIn => "logged_in",
            Self::MainMenuVisible => "main_menu_visible",
            Self::GamesMenuVisible => "games_menu_visible",
            Self::GameScreenVisible => "game_screen_visible",
            Self::GameBoardVisible => "game_board_visible",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_is_ordered() {
        let mut s = Stage::Started;
        let mut seen = vec![s];
        while let Some(n) = s.next() {
            assert!(n > s);
            seen.push(n);
            s = n;
        }
        assert_eq!(seen.len(), 7);
        assert_eq!(s, Stage::Completed);
    }
}
