//! Tone playback
//!
//! Both games only ever play three fixed beeps. Sinks are fire-and-forget:
//! a sink that cannot make sound just drops the request.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

use crate::settings::Settings;
use crate::sim::Tone;

/// Anything that can play a tone
pub trait AudioSink {
    fn play(&mut self, tone: Tone);
}

/// Volume state shared by every sink
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mixer {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for Mixer {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Mixer {
    pub fn from_settings(settings: &Settings) -> Self {
        let mut mixer = Self::default();
        mixer.set_master_volume(settings.master_volume);
        mixer.set_sfx_volume(settings.sfx_volume);
        mixer.set_muted(settings.muted);
        mixer
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// How loud `tone` should be, or None when it would be inaudible
    pub fn voice(&self, tone: Tone) -> Option<Voice> {
        let vol = self.effective_volume();
        (vol > 0.0).then(|| Voice::new(tone, vol))
    }
}

/// A tone ready to be synthesized: pitch, length and peak gain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub frequency: f32,
    /// Seconds
    pub duration: f64,
    pub gain: f32,
}

impl Voice {
    /// Plain sine beeps sit at half scale before volume
    const PEAK: f32 = 0.5;

    pub fn new(tone: Tone, volume: f32) -> Self {
        Self {
            frequency: tone.frequency(),
            duration: tone.duration_ms() as f64 / 1000.0,
            gain: Self::PEAK * volume,
        }
    }
}

/// Logs tones instead of playing them; used by the headless runner
#[derive(Debug, Default, Clone)]
pub struct LogAudio {
    mixer: Mixer,
    /// Tones played per kind: low, mid, high
    counts: [u64; 3],
}

impl LogAudio {
    pub fn new(mixer: Mixer) -> Self {
        Self {
            mixer,
            counts: [0; 3],
        }
    }

    /// Number of times `tone` was played audibly
    pub fn count(&self, tone: Tone) -> u64 {
        self.counts[Self::slot(tone)]
    }

    fn slot(tone: Tone) -> usize {
        match tone {
            Tone::Low => 0,
            Tone::Mid => 1,
            Tone::High => 2,
        }
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, tone: Tone) {
        let Some(voice) = self.mixer.voice(tone) else {
            return;
        };
        self.counts[Self::slot(tone)] += 1;
        log::debug!(
            "beep {:?}: {} Hz for {:.0} ms at gain {:.2}",
            tone,
            voice.frequency,
            voice.duration * 1000.0,
            voice.gain
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixer_clamps_and_mutes() {
        let mut mixer = Mixer::default();
        mixer.set_master_volume(2.0);
        mixer.set_sfx_volume(0.5);
        assert_eq!(mixer.effective_volume(), 0.5);

        mixer.set_muted(true);
        assert_eq!(mixer.effective_volume(), 0.0);
        assert_eq!(mixer.voice(Tone::High), None);
    }

    #[test]
    fn test_voice_matches_tone() {
        let voice = Voice::new(Tone::Mid, 1.0);
        assert_eq!(voice.frequency, 523.0);
        assert!((voice.duration - 0.05).abs() < 1e-9);
        assert_eq!(voice.gain, 0.5);
    }

    #[test]
    fn test_log_audio_counts_audible_tones() {
        let mut audio = LogAudio::new(Mixer::default());
        audio.play(Tone::Low);
        audio.play(Tone::Low);
        audio.play(Tone::High);
        assert_eq!(audio.count(Tone::Low), 2);
        assert_eq!(audio.count(Tone::Mid), 0);
        assert_eq!(audio.count(Tone::High), 1);

        let mut muted = Mixer::default();
        muted.set_muted(true);
        let mut silent = LogAudio::new(muted);
        silent.play(Tone::Mid);
        assert_eq!(silent.count(Tone::Mid), 0);
    }

    #[test]
    fn test_mixer_from_settings() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            ..Default::default()
        };
        assert_eq!(Mixer::from_settings(&settings).effective_volume(), 0.25);
    }
}
