//! The audible roll cue.
//!
//! Sound is best effort: a missing device, a suspended output or a failed
//! play never reaches the user and never blocks a roll.

use std::time::Duration;

use wb_core::{BingoError, BingoResult};

/// A short decaying sine tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Pitch in Hz.
    pub frequency: f32,
    /// Starting gain.
    pub gain: f32,
    /// Gain reached at the end of the tone.
    pub end_gain: f32,
    /// Length of the tone.
    pub duration: Duration,
}

impl Tone {
    /// The beep played when a roll starts.
    pub const BEEP: Tone = Tone {
        frequency: 800.0,
        gain: 0.3,
        end_gain: 0.01,
        duration: Duration::from_millis(100),
    };

    /// Gain at `t` seconds into the tone, decaying exponentially.
    pub fn gain_at(&self, t: f32) -> f32 {
        let total = self.duration.as_secs_f32();
        if total <= 0.0 {
            return self.end_gain;
        }
        let progress = (t / total).clamp(0.0, 1.0);
        self.gain * (self.end_gain / self.gain).powf(progress)
    }
}

/// Lifecycle state of an audio output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioState {
    /// Ready to play.
    Running,
    /// Paused by the host; needs [`ToneOutput::resume`] before use.
    Suspended,
    /// Released; can no longer play.
    Closed,
}

/// Something that can play a [`Tone`].
pub trait ToneOutput {
    /// Current lifecycle state.
    fn state(&self) -> AudioState;

    /// Bring a suspended output back to running.
    fn resume(&mut self) -> BingoResult<()>;

    /// Queue a tone for playback without blocking.
    fn play(&mut self, tone: Tone) -> BingoResult<()>;

    /// Release the output.
    fn close(&mut self);
}

/// The roll cue: an optional output that swallows its own failures.
#[derive(Default)]
pub struct Cue {
    output: Option<Box<dyn ToneOutput>>,
}

impl Cue {
    /// A cue that never makes a sound.
    pub fn silent() -> Self {
        Self { output: None }
    }

    /// A cue playing through the given output.
    pub fn with_output(output: Box<dyn ToneOutput>) -> Self {
        Self {
            output: Some(output),
        }
    }

    /// Open the default sound device, falling back to silence.
    pub fn open_default() -> Self {
        #[cfg(feature = "audio")]
        {
            match rodio_output::RodioOutput::open() {
                Ok(output) => return Self::with_output(Box::new(output)),
                Err(e) => tracing::debug!("{e}"),
            }
        }
        Self::silent()
    }

    /// Returns true if an output is attached and not closed.
    pub fn is_available(&self) -> bool {
        self.output
            .as_ref()
            .is_some_and(|o| o.state() != AudioState::Closed)
    }

    /// Play the roll beep if possible.
    pub fn beep(&mut self) {
        if let Err(e) = self.try_play(Tone::BEEP) {
            tracing::debug!("cue skipped: {e}");
        }
    }

    fn try_play(&mut self, tone: Tone) -> BingoResult<()> {
        let output = self
            .output
            .as_mut()
            .ok_or_else(|| BingoError::AudioUnavailable("no output".into()))?;
        match output.state() {
            AudioState::Closed => Err(BingoError::AudioUnavailable("output closed".into())),
            AudioState::Suspended => {
                output.resume()?;
                output.play(tone)
            }
            AudioState::Running => output.play(tone),
        }
    }

    /// Release the output. Later beeps are silent.
    pub fn close(&mut self) {
        let Some(mut output) = self.output.take() else {
            return;
        };
        if output.state() != AudioState::Closed {
            output.close();
        }
    }
}

impl Drop for Cue {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(feature = "audio")]
mod rodio_output {
    //! rodio backend: one persistent sink on the default output stream.

    use std::time::Duration;

    use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

    use super::{AudioState, Tone, ToneOutput};
    use wb_core::{BingoError, BingoResult};

    const SAMPLE_RATE: u32 = 44_100;

    /// Sample iterator for a [`Tone`].
    struct ToneSource {
        tone: Tone,
        sample: u32,
        total: u32,
    }

    impl ToneSource {
        fn new(tone: Tone) -> Self {
            let total = (tone.duration.as_secs_f32() * SAMPLE_RATE as f32) as u32;
            Self {
                tone,
                sample: 0,
                total,
            }
        }
    }

    impl Iterator for ToneSource {
        type Item = f32;

        fn next(&mut self) -> Option<f32> {
            if self.sample >= self.total {
                return None;
            }
            let t = self.sample as f32 / SAMPLE_RATE as f32;
            self.sample += 1;
            let phase = std::f32::consts::TAU * self.tone.frequency * t;
            Some(phase.sin() * self.tone.gain_at(t))
        }
    }

    impl Source for ToneSource {
        fn current_frame_len(&self) -> Option<usize> {
            Some((self.total - self.sample) as usize)
        }

        fn channels(&self) -> u16 {
            1
        }

        fn sample_rate(&self) -> u32 {
            SAMPLE_RATE
        }

        fn total_duration(&self) -> Option<Duration> {
            Some(self.tone.duration)
        }
    }

    /// Tone output on the system's default device.
    pub struct RodioOutput {
        // The stream must outlive the sink.
        _stream: OutputStream,
        _handle: OutputStreamHandle,
        sink: Option<Sink>,
    }

    impl RodioOutput {
        /// Open the default output device.
        pub fn open() -> BingoResult<Self> {
            let (stream, handle) = OutputStream::try_default()
                .map_err(|e| BingoError::AudioUnavailable(e.to_string()))?;
            let sink =
                Sink::try_new(&handle).map_err(|e| BingoError::AudioUnavailable(e.to_string()))?;
            Ok(Self {
                _stream: stream,
                _handle: handle,
                sink: Some(sink),
            })
        }
    }

    impl ToneOutput for RodioOutput {
        fn state(&self) -> AudioState {
            match &self.sink {
                None => AudioState::Closed,
                Some(sink) if sink.is_paused() => AudioState::Suspended,
                Some(_) => AudioState::Running,
            }
        }

        fn resume(&mut self) -> BingoResult<()> {
            let sink = self
                .sink
                .as_ref()
                .ok_or_else(|| BingoError::AudioUnavailable("output closed".into()))?;
            sink.play();
            Ok(())
        }

        fn play(&mut self, tone: Tone) -> BingoResult<()> {
            let sink = self
                .sink
                .as_ref()
                .ok_or_else(|| BingoError::AudioUnavailable("output closed".into()))?;
            sink.append(ToneSource::new(tone));
            Ok(())
        }

        fn close(&mut self) {
            if let Some(sink) = self.sink.take() {
                sink.stop();
            }
        }
    }
}
