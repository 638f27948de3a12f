// Sequencer
// Pattern-to-schedule translation and transport-driven playback

pub mod pitch;
pub mod tables;
pub mod schedule;
pub mod transport;
pub mod player;

pub use pitch::Pitch;
pub use player::{AudioEngine, PlaybackController, PlaybackError, PlaybackResult, TriggerEvent, TriggerQueue};
pub use schedule::{build_sequences, NoteValue, Schedule, ScheduledTrigger, Sequences, TimedEvent, Voice};
pub use transport::{BeatSpan, Transport, TransportClock};
