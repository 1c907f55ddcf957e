use std::path::{Path, PathBuf};

/// A screenshot the run leaves behind for a human to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Checkpoint {
    GamesMenu,
    WordleGame,
    Error,
}

impl Checkpoint {
    pub const ALL: [Checkpoint; 3] = [Checkpoint::GamesMenu, Checkpoint::WordleGame, Checkpoint::Error];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::GamesMenu => "games_menu.png",
            Self::WordleGame => "wordle_game.png",
            Self::Error => "error.png",
        }
    }

    pub fn path(self, dir: &Path) -> PathBuf { dir.join(self.file_name()) }

    /// Printed once the screenshot is on disk. The error capture is silent.
    pub fn narration(self) -> Option<&'static str> {
        match self {
            Self::GamesMenu => Some("Games Menu screenshot taken."),
            Self::WordleGame => Some("Wordle Game screenshot taken."),
            Self::Error => None,
        }
    }
}
