// Playback Controller
// Binds built schedules to the shared transport and fires due triggers

use serde::Serialize;
use thiserror::Error;

use super::pitch::Pitch;
use super::schedule::{beats_to_seconds, build_sequences, NoteValue, Schedule, Sequences, Voice};
use super::transport::{BeatSpan, Transport};
use crate::catalog::Category;
use crate::state::SelectionState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("Select at least one pattern to play")]
    EmptySelection,
    #[error("Tempo must be a positive number of BPM")]
    InvalidTempo,
}

pub type PlaybackResult<T> = Result<T, PlaybackError>;

/// A trigger handed to the audio engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerEvent {
    pub category: Category,
    pub voice: Voice,
    pub pitch: Option<Pitch>,
    pub duration: NoteValue,
    /// Transport position of the trigger
    pub beat: f64,
    /// Time after the start of the tick that produced it
    pub delay_seconds: f64,
    pub duration_seconds: f64,
}

/// Sound-producing side of playback
pub trait AudioEngine {
    fn trigger(&mut self, event: &TriggerEvent);

    /// Drop anything triggered but not yet rendered
    fn cancel(&mut self);
}

/// Engine that buffers triggers for a host to drain and render
#[derive(Debug, Clone, Default)]
pub struct TriggerQueue {
    pending: Vec<TriggerEvent>,
}

impl TriggerQueue {
    pub fn new() -> Self {
        TriggerQueue::default()
    }

    pub fn drain(&mut self) -> Vec<TriggerEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl AudioEngine for TriggerQueue {
    fn trigger(&mut self, event: &TriggerEvent) {
        self.pending.push(*event);
    }

    fn cancel(&mut self) {
        self.pending.clear();
    }
}

/// Every trigger of `schedule` whose looped position falls inside `span`
fn due_in(schedule: &Schedule, span: BeatSpan, bpm: u32) -> Vec<TriggerEvent> {
    let loop_beats = schedule.loop_beats();
    if loop_beats <= 0.0 || span.is_empty() {
        return Vec::new();
    }

    let mut due = Vec::new();
    for trigger in &schedule.triggers {
        let offset = schedule.step_beats(trigger.step);
        let mut cycle = ((span.from - offset) / loop_beats).ceil().max(0.0);
        loop {
            let beat = offset + cycle * loop_beats;
            if beat >= span.to {
                break;
            }
            if beat >= span.from {
                due.push(TriggerEvent {
                    category: schedule.category,
                    voice: trigger.voice,
                    pitch: trigger.pitch,
                    duration: trigger.duration,
                    beat,
                    delay_seconds: beats_to_seconds(beat - span.from, bpm),
                    duration_seconds: trigger.duration.seconds(bpm),
                });
            }
            cycle += 1.0;
        }
    }
    due
}

/// Owns the active schedule generation and drives it from the transport
///
/// Schedules are built from a snapshot of the selection; playback never
/// writes back to it.
pub struct PlaybackController<T: Transport, E: AudioEngine> {
    transport: T,
    engine: E,
    sequences: Option<Sequences>,
}

impl<T: Transport, E: AudioEngine> PlaybackController<T, E> {
    pub fn new(transport: T, engine: E) -> Self {
        PlaybackController {
            transport,
            engine,
            sequences: None,
        }
    }

    /// Start playing the selection from the top
    ///
    /// Any previous generation is torn down before new schedules are built.
    /// Rejected without side effects when no slot is populated. Returns the
    /// number of schedules now running.
    pub fn start(&mut self, selection: &SelectionState) -> PlaybackResult<usize> {
        if selection.is_empty() {
            return Err(PlaybackError::EmptySelection);
        }
        if selection.tempo() == 0 {
            return Err(PlaybackError::InvalidTempo);
        }

        self.stop();

        let sequences = build_sequences(selection);
        let count = sequences.len();
        self.transport.set_bpm(selection.tempo());
        self.transport.start();
        self.sequences = Some(sequences);

        log::info!("Playback started: {} schedule(s) at {} BPM", count, selection.tempo());
        Ok(count)
    }

    /// Halt the transport and drop all schedules; no-op when already stopped
    pub fn stop(&mut self) {
        let had_sequences = self.sequences.take().is_some();
        if had_sequences || self.transport.is_running() {
            self.transport.stop();
            self.engine.cancel();
            log::info!("Playback stopped");
        }
    }

    /// Change the clock rate in place; running schedules keep their phase
    pub fn set_tempo(&mut self, bpm: u32) -> PlaybackResult<()> {
        if bpm == 0 {
            return Err(PlaybackError::InvalidTempo);
        }
        self.transport.set_bpm(bpm);
        Ok(())
    }

    pub fn is_playing(&self) -> bool {
        self.sequences.is_some() && self.transport.is_running()
    }

    pub fn sequences(&self) -> Option<&Sequences> {
        self.sequences.as_ref()
    }

    /// Advance the clock and fire every trigger that came due, in time order
    ///
    /// A tick never emits more than one pass of the longest loop. When the
    /// host falls further behind, the clock still moves the full distance
    /// but only the final loop's worth of triggers is fired. Returns the
    /// number of triggers fired.
    pub fn tick(&mut self, seconds: f64) -> usize {
        let Some(sequences) = &self.sequences else {
            return 0;
        };
        let Some(span) = self.transport.advance(seconds) else {
            return 0;
        };

        let bpm = self.transport.bpm();
        let longest_loop = sequences.iter().map(Schedule::loop_beats).fold(0.0, f64::max);
        let span = if span.to - span.from > longest_loop {
            log::debug!(
                "Tick of {:.3}s fell behind; skipping {:.2} beat(s) of triggers",
                seconds,
                span.to - span.from - longest_loop
            );
            BeatSpan {
                from: span.to - longest_loop,
                to: span.to,
            }
        } else {
            span
        };

        let mut due: Vec<TriggerEvent> = sequences
            .iter()
            .flat_map(|schedule| due_in(schedule, span, bpm))
            .collect();
        due.sort_by(|a, b| a.beat.partial_cmp(&b.beat).unwrap_or(std::cmp::Ordering::Equal));

        for event in &due {
            self.engine.trigger(event);
        }
        due.len()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}
