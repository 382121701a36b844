//! Web Audio tone generator
//!
//! Each beep is a short sine oscillator through a gain node. No external
//! files needed.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::{AudioSink, Mixer, Voice};
use crate::sim::Tone;

/// Release time at the end of each beep, seconds
const RELEASE: f64 = 0.01;

/// Audio sink backed by the browser's AudioContext
pub struct WebAudio {
    ctx: Option<AudioContext>,
    mixer: Mixer,
}

impl WebAudio {
    pub fn new(mixer: Mixer) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, mixer }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn beep(ctx: &AudioContext, voice: Voice) {
        let Some((osc, gain)) = Self::create_osc(ctx, voice.frequency) else {
            return;
        };
        let t = ctx.current_time();
        let end = t + voice.duration;

        // Flat tone, short ramp out to avoid a click
        gain.gain().set_value_at_time(voice.gain, t).ok();
        gain.gain()
            .set_value_at_time(voice.gain, end - RELEASE)
            .ok();
        gain.gain().exponential_ramp_to_value_at_time(0.001, end).ok();

        osc.start().ok();
        osc.stop_with_when(end).ok();
    }
}

impl AudioSink for WebAudio {
    fn play(&mut self, tone: Tone) {
        let Some(voice) = self.mixer.voice(tone) else {
            return;
        };
        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        Self::beep(ctx, voice);
    }
}
