//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! The event-to-effect mapping is platform independent; playback is wasm only.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Question block paid out
    Coin,
    /// Goomba squashed
    Stomp,
    /// Touched the flag
    CourseClear,
    /// Player died
    GameOver,
}

impl SoundEffect {
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::Jumped => Self::Jump,
            GameEvent::CoinCollected { .. } => Self::Coin,
            GameEvent::EnemyStomped { .. } => Self::Stomp,
            GameEvent::FlagReached => Self::CourseClear,
            GameEvent::PlayerDied { .. } => Self::GameOver,
        }
    }
}

/// Combined output level, zero when muted
pub fn effective_volume(master: f32, sfx: f32, muted: bool) -> f32 {
    if muted {
        0.0
    } else {
        master.clamp(0.0, 1.0) * sfx.clamp(0.0, 1.0)
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, effective_volume};
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 0.8,
                sfx_volume: 1.0,
                muted: false,
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.master_volume = settings.master_volume.clamp(0.0, 1.0);
            self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
            self.muted = settings.muted;
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = effective_volume(self.master_volume, self.sfx_volume, self.muted);
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Jump => self.play_jump(ctx, vol),
                SoundEffect::Coin => self.play_coin(ctx, vol),
                SoundEffect::Stomp => self.play_stomp(ctx, vol),
                SoundEffect::CourseClear => self.play_course_clear(ctx, vol),
                SoundEffect::GameOver => self.play_game_over(ctx, vol),
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Jump - quick upward chirp
        fn play_jump(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(700.0, t + 0.12)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.18).ok();
        }

        /// Coin - two-note ding
        fn play_coin(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [988.0, 1319.0].iter().enumerate() {
                let delay = i as f64 * 0.07;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Square) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.15, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.3).ok();
                }
            }
        }

        /// Stomp - short thump
        fn play_stomp(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(220.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(80.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Course clear - rising fanfare
        fn play_course_clear(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [523.0, 659.0, 784.0, 1047.0].iter().enumerate() {
                let delay = i as f64 * 0.12;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.5).ok();
                }
            }
        }

        /// Game over - sad descending
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                let delay = i as f64 * 0.2;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.4).ok();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{DeathCause, EntityId};

    #[test]
    fn test_effect_per_event() {
        assert_eq!(SoundEffect::for_event(&GameEvent::Jumped), SoundEffect::Jump);
        assert_eq!(
            SoundEffect::for_event(&GameEvent::CoinCollected { block: EntityId(3) }),
            SoundEffect::Coin
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::EnemyStomped { enemy: EntityId(9) }),
            SoundEffect::Stomp
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::FlagReached),
            SoundEffect::CourseClear
        );
        for cause in [DeathCause::Enemy, DeathCause::Pit] {
            assert_eq!(
                SoundEffect::for_event(&GameEvent::PlayerDied { cause }),
                SoundEffect::GameOver
            );
        }
    }

    #[test]
    fn test_effective_volume() {
        assert_eq!(effective_volume(0.8, 0.5, false), 0.4);
        assert_eq!(effective_volume(0.8, 0.5, true), 0.0);
        assert_eq!(effective_volume(2.0, 1.0, false), 1.0);
    }
}
