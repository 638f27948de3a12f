// Schedule Construction
// Pure translation of selected patterns into looping trigger schedules

use serde::Serialize;

use super::pitch::Pitch;
use super::tables::{motif_pitches, progression_roots};
use crate::analysis::density::{HIT, PATTERN_STEPS};
use crate::catalog::{Category, PatternDetails, PatternRecord};
use crate::state::SelectionState;

/// Note lengths in transport notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoteValue {
    Half,
    Quarter,
    Eighth,
    Sixteenth,
    ThirtySecond,
}

impl NoteValue {
    /// Length in quarter-note beats
    pub fn beats(&self) -> f64 {
        match self {
            NoteValue::Half => 2.0,
            NoteValue::Quarter => 1.0,
            NoteValue::Eighth => 0.5,
            NoteValue::Sixteenth => 0.25,
            NoteValue::ThirtySecond => 0.125,
        }
    }

    pub fn seconds(&self, bpm: u32) -> f64 {
        beats_to_seconds(self.beats(), bpm)
    }

    pub fn notation(&self) -> &'static str {
        match self {
            NoteValue::Half => "2n",
            NoteValue::Quarter => "4n",
            NoteValue::Eighth => "8n",
            NoteValue::Sixteenth => "16n",
            NoteValue::ThirtySecond => "32n",
        }
    }
}

pub fn beats_to_seconds(beats: f64, bpm: u32) -> f64 {
    if bpm == 0 {
        return 0.0;
    }
    beats * 60.0 / f64::from(bpm)
}

/// Instrument voice a trigger is sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    Kick,
    Snare,
    HiHat,
    Bass,
    Lead,
}

impl Voice {
    /// Drum voice for a hit at the given step
    pub fn for_drum_step(step: usize) -> Voice {
        match step % 4 {
            0 => Voice::Kick,
            2 => Voice::Snare,
            _ => Voice::HiHat,
        }
    }
}

/// One trigger at a step of its schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScheduledTrigger {
    pub step: usize,
    pub voice: Voice,
    /// Unpitched voices carry `None`
    pub pitch: Option<Pitch>,
    pub duration: NoteValue,
}

/// A trigger placed in time for a given tempo
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedEvent {
    pub offset_seconds: f64,
    pub voice: Voice,
    pub pitch: Option<Pitch>,
    pub duration_seconds: f64,
}

/// A looping sequence for one slot
///
/// `steps` evenly spaced slots of `step_value` each; the loop repeats
/// after the last one. Triggers are ordered by step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub category: Category,
    pub step_value: NoteValue,
    pub steps: usize,
    pub triggers: Vec<ScheduledTrigger>,
}

impl Schedule {
    /// Length of one loop in beats
    pub fn loop_beats(&self) -> f64 {
        self.steps as f64 * self.step_value.beats()
    }

    /// Beat offset of a step from the loop start
    pub fn step_beats(&self, step: usize) -> f64 {
        step as f64 * self.step_value.beats()
    }

    /// One loop as (offset, voice, pitch) events at the given tempo
    pub fn timeline(&self, bpm: u32) -> Vec<TimedEvent> {
        self.triggers
            .iter()
            .map(|t| TimedEvent {
                offset_seconds: beats_to_seconds(self.step_beats(t.step), bpm),
                voice: t.voice,
                pitch: t.pitch,
                duration_seconds: t.duration.seconds(bpm),
            })
            .collect()
    }
}

/// Drum schedule: 32 sixteenth steps over two bars
///
/// Characters past the end of the pattern are rests.
pub fn drum_schedule(pattern: &str) -> Option<Schedule> {
    if pattern.is_empty() {
        return None;
    }

    let triggers = pattern
        .chars()
        .take(PATTERN_STEPS)
        .enumerate()
        .filter(|(_, c)| *c == HIT)
        .map(|(step, _)| {
            let voice = Voice::for_drum_step(step);
            let (pitch, duration) = match voice {
                Voice::Kick => (Some(Pitch::C1), NoteValue::Eighth),
                Voice::Snare => (None, NoteValue::Sixteenth),
                _ => (None, NoteValue::ThirtySecond),
            };
            ScheduledTrigger {
                step,
                voice,
                pitch,
                duration,
            }
        })
        .collect();

    Some(Schedule {
        category: Category::Drum,
        step_value: NoteValue::Sixteenth,
        steps: PATTERN_STEPS,
        triggers,
    })
}

/// Bass schedule: one root per chord, each held for a half-note slice
pub fn bass_schedule(prog: &str) -> Option<Schedule> {
    let roots = progression_roots(prog);
    if roots.is_empty() {
        return None;
    }

    let triggers = roots
        .iter()
        .enumerate()
        .map(|(step, root)| ScheduledTrigger {
            step,
            voice: Voice::Bass,
            pitch: Some(*root),
            duration: NoteValue::Quarter,
        })
        .collect();

    Some(Schedule {
        category: Category::Bass,
        step_value: NoteValue::Half,
        steps: roots.len(),
        triggers,
    })
}

/// Lead schedule: one eighth-note step per motif degree
///
/// Unparseable degrees keep their step but emit nothing.
pub fn lead_schedule(key: &str, motif: &str) -> Option<Schedule> {
    let pitches = motif_pitches(motif, key);
    if pitches.is_empty() {
        return None;
    }

    let triggers = pitches
        .iter()
        .enumerate()
        .filter_map(|(step, pitch)| {
            pitch.map(|pitch| ScheduledTrigger {
                step,
                voice: Voice::Lead,
                pitch: Some(pitch),
                duration: NoteValue::Eighth,
            })
        })
        .collect();

    Some(Schedule {
        category: Category::Lead,
        step_value: NoteValue::Eighth,
        steps: pitches.len(),
        triggers,
    })
}

/// Schedule for any record, by its category
pub fn schedule_for(record: &PatternRecord) -> Option<Schedule> {
    match &record.details {
        PatternDetails::Drum { pattern, .. } => drum_schedule(pattern),
        PatternDetails::Bass { prog, .. } => bass_schedule(prog),
        PatternDetails::Lead { key, motif } => lead_schedule(key, motif),
    }
}

/// Up to one schedule per slot; an empty slot has no schedule at all
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sequences {
    pub drum: Option<Schedule>,
    pub bass: Option<Schedule>,
    pub lead: Option<Schedule>,
}

impl Sequences {
    pub fn get(&self, category: Category) -> Option<&Schedule> {
        match category {
            Category::Drum => self.drum.as_ref(),
            Category::Bass => self.bass.as_ref(),
            Category::Lead => self.lead.as_ref(),
        }
    }

    /// Present schedules in drum, bass, lead order
    pub fn iter(&self) -> impl Iterator<Item = &Schedule> {
        Category::ALL.into_iter().filter_map(move |c| self.get(c))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build schedules from a snapshot of the selection
pub fn build_sequences(selection: &SelectionState) -> Sequences {
    let build = |category: Category| selection.slot(category).and_then(|r| schedule_for(r));
    Sequences {
        drum: build(Category::Drum),
        bass: build(Category::Bass),
        lead: build(Category::Lead),
    }
}
