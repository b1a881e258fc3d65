use rodio::Source;
use std::f32::consts::PI;
use std::time::Duration;

const SAMPLE_RATE: u32 = 44100;
const TONE_HZ: f32 = 800.0;
const TONE_COUNT: usize = 4;
/// Seconds between tone starts.
const TONE_SPACING: f32 = 0.15;
/// Seconds each tone sounds.
const TONE_LENGTH: f32 = 0.10;
const START_GAIN: f32 = 0.3;
const END_GAIN: f32 = 0.01;

/// The distraction cue: four short 800 Hz beeps, each decaying
/// exponentially, starting 150 ms apart.
pub struct AlertChime {
    sample_rate: u32,
    num_sample: usize,
    total_samples: usize,
}

impl AlertChime {
    pub fn new() -> Self {
        let seconds = TONE_SPACING * (TONE_COUNT - 1) as f32 + TONE_LENGTH;
        Self {
            sample_rate: SAMPLE_RATE,
            num_sample: 0,
            total_samples: (seconds * SAMPLE_RATE as f32) as usize,
        }
    }

    fn duration(&self) -> Duration {
        Duration::from_secs_f32(self.total_samples as f32 / self.sample_rate as f32)
    }
}

impl Iterator for AlertChime {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.num_sample >= self.total_samples {
            return None;
        }

        let t = self.num_sample as f32 / self.sample_rate as f32;
        self.num_sample += 1;

        let tone_index = (t / TONE_SPACING) as usize;
        let tone_offset = t - tone_index as f32 * TONE_SPACING;

        let sample = if tone_index < TONE_COUNT && tone_offset < TONE_LENGTH {
            // Exponential decay from START_GAIN to END_GAIN over the tone.
            let gain = START_GAIN * (END_GAIN / START_GAIN).powf(tone_offset / TONE_LENGTH);
            (2.0 * PI * TONE_HZ * t).sin() * gain
        } else {
            0.0
        };

        Some(sample)
    }
}

impl Source for AlertChime {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(self.duration())
    }
}
