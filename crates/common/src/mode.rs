//! # Game Mode
//!
//! The small cyclic state machine driving the whole experience. The client
//! mirrors this into Bevy's `States`; all transition logic lives here as
//! pure functions so the guards are testable without an `App`.
//!
//! ```text
//! Intro --(enter)--> Forming --(timer)--> Interactive
//! Interactive --(non-empty wish)--> WishPending --(response)--> WishGranted
//! WishGranted --(dismiss)--> Interactive
//! OPEN gesture: any state -> Intro
//! CLOSED gesture: Intro | Forming -> Interactive
//! ```

use crate::gesture::Gesture;
use bevy::prelude::*;

/// Current game mode. `Intro` is the dispersed "chaos" state; every other
/// mode counts as assembled.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    #[default]
    Intro,
    /// Transitional: assembly started, interaction not yet unlocked.
    Forming,
    Interactive,
    /// A wish request is in flight; further submissions are refused.
    WishPending,
    WishGranted,
}

impl GameMode {
    /// The assembled predicate: selects the target endpoint over the chaos
    /// endpoint for every animated element.
    pub fn is_assembled(self) -> bool {
        self != GameMode::Intro
    }

    /// Apply a discrete gesture. OPEN is an interrupt that scatters the tree
    /// from any state; CLOSED assembles it, but only out of `Intro` or
    /// `Forming`. Anything else is a no-op.
    pub fn apply_gesture(self, gesture: Gesture) -> GameMode {
        match gesture {
            Gesture::Open => GameMode::Intro,
            Gesture::Closed => match self {
                GameMode::Intro | GameMode::Forming => GameMode::Interactive,
                other => other,
            },
            Gesture::None => self,
        }
    }

    /// The UI's "assemble" command.
    pub fn begin_forming(self) -> GameMode {
        match self {
            GameMode::Intro => GameMode::Forming,
            other => other,
        }
    }

    /// The fixed forming delay elapsed.
    pub fn finish_forming(self) -> GameMode {
        match self {
            GameMode::Forming => GameMode::Interactive,
            other => other,
        }
    }

    /// Submit wish text. Refused unless interactive, and refused for empty
    /// or whitespace-only text; in particular a second submission while one
    /// is already pending stays `WishPending`.
    pub fn submit_wish(self, text: &str) -> GameMode {
        match self {
            GameMode::Interactive if !text.trim().is_empty() => GameMode::WishPending,
            other => other,
        }
    }

    /// The wish service responded (success or fallback, it always responds).
    pub fn grant_wish(self) -> GameMode {
        match self {
            GameMode::WishPending => GameMode::WishGranted,
            other => other,
        }
    }

    /// Dismiss the granted wish and return to interaction.
    pub fn dismiss_wish(self) -> GameMode {
        match self {
            GameMode::WishGranted => GameMode::Interactive,
            other => other,
        }
    }
}
