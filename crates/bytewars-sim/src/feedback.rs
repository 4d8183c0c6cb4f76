//! Cosmetic state and outgoing audio/visual notifications.
//!
//! Combat pushes requests here; the host drains them after each frame.
//! Nothing in the simulation reads these back.

use bytewars_core::constants::SCREEN_SHAKE_DECAY_MS;
use bytewars_core::enums::{Faction, ParticleKind, SoundCue};
use bytewars_core::events::{AudioEvent, FxEvent};

#[derive(Debug, Clone, Default)]
pub struct Feedback {
    audio_events: Vec<AudioEvent>,
    fx_events: Vec<FxEvent>,
    screen_shake: f64,
}

impl Feedback {
    pub fn sound(&mut self, cue: SoundCue) {
        self.audio_events.push(AudioEvent { cue });
    }

    pub fn particles(&mut self, x: f64, y: f64, count: u32, kind: ParticleKind) {
        self.fx_events.push(FxEvent::Particles { x, y, count, kind });
    }

    pub fn damage_text(&mut self, x: f64, y: f64, amount: f64, target: Faction) {
        self.fx_events.push(FxEvent::DamageText {
            x,
            y,
            amount,
            target,
        });
    }

    pub fn shake(&mut self, magnitude: f64) {
        self.screen_shake = magnitude;
        self.fx_events.push(FxEvent::ScreenShake { magnitude });
    }

    pub fn screen_shake(&self) -> f64 {
        self.screen_shake
    }

    pub fn decay_screen_shake(&mut self, dt_ms: f64) {
        if self.screen_shake > 0.0 {
            self.screen_shake = (self.screen_shake - dt_ms / SCREEN_SHAKE_DECAY_MS).max(0.0);
        }
    }

    pub fn take_audio_events(&mut self) -> Vec<AudioEvent> {
        std::mem::take(&mut self.audio_events)
    }

    pub fn take_fx_events(&mut self) -> Vec<FxEvent> {
        std::mem::take(&mut self.fx_events)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
