//! The smoke test itself: a fixed walk through login, the main menu, the games
//! menu and the word-guessing game, with screenshots at each checkpoint.

mod checkpoint;
mod config;
mod error;
mod runner;
mod session;
mod stage;
mod target;

pub use self::{
    checkpoint::Checkpoint,
    config::{Credentials, SmokeConfig},
    error::SmokeError,
    runner::{Report, SmokeTest},
    session::{BrowserSession, UiSession},
    stage::Stage,
    target::{Button, Element},
};
