// Transport
// Shared clock that all schedules run against

use serde::Serialize;

/// A half-open window of beats `[from, to)` covered by one clock advance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BeatSpan {
    pub from: f64,
    pub to: f64,
}

impl BeatSpan {
    pub fn contains(&self, beat: f64) -> bool {
        beat >= self.from && beat < self.to
    }

    pub fn is_empty(&self) -> bool {
        self.to <= self.from
    }
}

/// Timing authority for playback
///
/// Position is kept in beats, so changing the rate never moves it.
pub trait Transport {
    fn start(&mut self);

    /// Halt and rewind to the start
    fn stop(&mut self);

    fn is_running(&self) -> bool;

    fn set_bpm(&mut self, bpm: u32);

    fn bpm(&self) -> u32;

    /// Current position in beats
    fn position(&self) -> f64;

    /// Move the clock forward by wall-clock seconds
    ///
    /// Returns the beats covered, or `None` when stopped.
    fn advance(&mut self, seconds: f64) -> Option<BeatSpan>;
}

/// Software clock driven by explicit advances from the host
#[derive(Debug, Clone, PartialEq)]
pub struct TransportClock {
    bpm: u32,
    position: f64,
    running: bool,
}

impl TransportClock {
    pub fn new(bpm: u32) -> Self {
        TransportClock {
            bpm,
            position: 0.0,
            running: false,
        }
    }
}

impl Default for TransportClock {
    fn default() -> Self {
        TransportClock::new(170)
    }
}

impl Transport for TransportClock {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
        self.position = 0.0;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn set_bpm(&mut self, bpm: u32) {
        self.bpm = bpm;
    }

    fn bpm(&self) -> u32 {
        self.bpm
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn advance(&mut self, seconds: f64) -> Option<BeatSpan> {
        if !self.running {
            return None;
        }
        let from = self.position;
        let beats = (seconds.max(0.0) * f64::from(self.bpm)) / 60.0;
        self.position = from + beats;
        Some(BeatSpan {
            from,
            to: self.position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_clock_does_not_advance() {
        let mut clock = TransportClock::new(120);
        assert_eq!(clock.advance(1.0), None);
        assert_eq!(clock.position(), 0.0);
    }

    #[test]
    fn test_advance_converts_seconds_to_beats() {
        let mut clock = TransportClock::new(120);
        clock.start();
        let span = clock.advance(1.5).unwrap();
        assert_eq!(span, BeatSpan { from: 0.0, to: 3.0 });
        assert!(span.contains(0.0));
        assert!(!span.contains(3.0));
    }

    #[test]
    fn test_tempo_change_keeps_position() {
        let mut clock = TransportClock::new(120);
        clock.start();
        clock.advance(1.0);
        clock.set_bpm(240);
        assert_eq!(clock.position(), 2.0);

        let span = clock.advance(1.0).unwrap();
        assert_eq!(span, BeatSpan { from: 2.0, to: 6.0 });
    }

    #[test]
    fn test_stop_rewinds() {
        let mut clock = TransportClock::new(120);
        clock.start();
        clock.advance(2.0);
        clock.stop();
        assert!(!clock.is_running());
        assert_eq!(clock.position(), 0.0);
    }

    #[test]
    fn test_negative_advance_is_empty() {
        let mut clock = TransportClock::new(120);
        clock.start();
        let span = clock.advance(-1.0).unwrap();
        assert!(span.is_empty());
    }
}
