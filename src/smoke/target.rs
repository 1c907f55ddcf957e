//! The parts of the app's markup the smoke test depends on.

use std::fmt;

/// Elements addressed by their `id` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    UsernameInput,
    PasswordInput,
    MainMenu,
    GamesMenu,
    WordleScreen,
    WordGrid,
}

impl Element {
    pub const ALL: [Element; 6] = [
        Element::UsernameInput,
        Element::PasswordInput,
        Element::MainMenu,
        Element::GamesMenu,
        Element::WordleScreen,
        Element::WordGrid,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::UsernameInput => "username",
            Self::PasswordInput => "password",
            Self::MainMenu => "main-menu",
            Self::GamesMenu => "games-menu",
            Self::WordleScreen => "wordle-screen",
            Self::WordGrid => "word-grid",
        }
    }

    pub fn selector(self) -> String { format!("#{}", self.id()) }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "#{}", self.id()) }
}

/// Buttons addressed by their visible text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Login,
    Games,
    GuessThePassword,
}

impl Button {
    pub const ALL: [Button; 3] = [Button::Login, Button::Games, Button::GuessThePassword];

    pub fn label(self) -> &'static str {
        match self {
            Self::Login => "Entrar / Registrar",
            Self::Games => "Jogos",
            Self::GuessThePassword => "Adivinhe a senha",
        }
    }

    pub fn selector(self) -> String { has_text("button", self.label()) }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

fn has_text(tag: &str, text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('\'', "\\'");
    format!("{}:has-text('{}')", tag, escaped)
}
