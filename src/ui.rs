//! HUD and overlay model
//!
//! Pure text derived from `GameState`; the host copies it into the DOM.

use crate::sim::{GameState, GameStatus};

pub const TITLE: &str = "SUPER NEKO BROS";
pub const INSTRUCTIONS: &str = "ARROWS TO MOVE. SPACE TO JUMP.";
pub const START_LABEL: &str = "START ADVENTURE";
pub const RETRY_LABEL: &str = "TRY AGAIN";

/// The four HUD columns, already formatted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score: String,
    pub coins: String,
    pub world: &'static str,
    pub time: String,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: format!("{:06}", state.score),
            coins: format!("x{:02}", state.coins),
            world: "1-1",
            time: state.timer.to_string(),
        }
    }
}

/// What covers the playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// Title card with the start button
    Title,
    /// End of a run with the retry button
    Result {
        heading: &'static str,
        final_score: u64,
    },
}

impl Overlay {
    /// None while playing
    pub fn for_state(state: &GameState) -> Option<Self> {
        match state.status {
            GameStatus::Playing => None,
            GameStatus::Menu => Some(Self::Title),
            GameStatus::Won => Some(Self::Result {
                heading: "COURSE CLEAR!",
                final_score: state.score,
            }),
            GameStatus::GameOver => Some(Self::Result {
                heading: "GAME OVER",
                final_score: state.score,
            }),
        }
    }

    pub fn final_score_text(&self) -> Option<String> {
        match self {
            Self::Title => None,
            Self::Result { final_score, .. } => Some(format!("FINAL SCORE: {final_score}")),
        }
    }
}

/// Rolling frames-per-second estimate over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    /// Record a frame timestamp in milliseconds
    pub fn record(&mut self, time_ms: f64) {
        self.frame_times[self.index] = time_ms;
        self.index = (self.index + 1) % self.frame_times.len();

        // Oldest sample is the one we will overwrite next
        let oldest = self.frame_times[self.index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                self.fps = ((self.frame_times.len() - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_padding() {
        let mut state = GameState::fresh();
        let hud = Hud::from_state(&state);
        assert_eq!(hud.score, "000000");
        assert_eq!(hud.coins, "x00");
        assert_eq!(hud.world, "1-1");
        assert_eq!(hud.time, "400");

        state.score = 1300;
        state.coins = 7;
        let hud = Hud::from_state(&state);
        assert_eq!(hud.score, "001300");
        assert_eq!(hud.coins, "x07");
    }

    #[test]
    fn test_hud_overflow_is_not_truncated() {
        let mut state = GameState::fresh();
        state.score = 12_345_600;
        state.coins = 123;
        let hud = Hud::from_state(&state);
        assert_eq!(hud.score, "12345600");
        assert_eq!(hud.coins, "x123");
    }

    #[test]
    fn test_overlay_per_status() {
        assert_eq!(Overlay::for_state(&GameState::menu()), Some(Overlay::Title));
        assert_eq!(Overlay::for_state(&GameState::fresh()), None);

        let mut state = GameState::fresh();
        state.score = 500;
        state.finish(GameStatus::Won);
        let won = Overlay::for_state(&state).unwrap();
        assert_eq!(
            won,
            Overlay::Result {
                heading: "COURSE CLEAR!",
                final_score: 500
            }
        );
        assert_eq!(won.final_score_text().as_deref(), Some("FINAL SCORE: 500"));

        let mut state = GameState::fresh();
        state.finish(GameStatus::GameOver);
        assert!(matches!(
            Overlay::for_state(&state),
            Some(Overlay::Result {
                heading: "GAME OVER",
                ..
            })
        ));
        assert_eq!(Overlay::Title.final_score_text(), None);
    }

    #[test]
    fn test_fps_counter() {
        let mut fps = FpsCounter::default();
        assert_eq!(fps.fps(), 0);
        for i in 1..=120 {
            fps.record(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(fps.fps(), 60);
    }
}
