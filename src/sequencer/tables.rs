// Lookup Tables
// Chord roots and scales keyed by free-form strings, each with a fixed fallback

use super::pitch::Pitch;

/// Symbol-to-root table; every root sits in octave 2
const CHORD_ROOTS: &[(&str, &str)] = &[
    ("C", "C2"),
    ("Cm", "C2"),
    ("D", "D2"),
    ("Dm", "D2"),
    ("E", "E2"),
    ("Em", "E2"),
    ("F", "F2"),
    ("Fm", "F2"),
    ("G", "G2"),
    ("Gm", "G2"),
    ("A", "A2"),
    ("Am", "A2"),
    ("B", "B2"),
    ("Bm", "B2"),
    ("Bb", "A#2"),
    ("Bbm", "A#2"),
    ("Ab", "G#2"),
    ("Eb", "D#2"),
    ("Ebm", "D#2"),
    ("Db", "C#2"),
    ("Gb", "F#2"),
];

/// Root used for any symbol missing from the table
pub const DEFAULT_CHORD_ROOT: Pitch = Pitch::C2;

const SCALES: &[(&str, &[&str])] = &[
    ("C major", &["C4", "D4", "E4", "F4", "G4", "A4", "B4"]),
    ("D major", &["D4", "E4", "F#4", "G4", "A4", "B4", "C#5"]),
    ("E major", &["E4", "F#4", "G#4", "A4", "B4", "C#5", "D#5"]),
    ("F major", &["F4", "G4", "A4", "A#4", "C5", "D5", "E5"]),
    ("G major", &["G4", "A4", "B4", "C5", "D5", "E5", "F#5"]),
    ("A major", &["A4", "B4", "C#5", "D5", "E5", "F#5", "G#5"]),
    ("A minor", &["A4", "B4", "C5", "D5", "E5", "F5", "G5"]),
    ("E minor", &["E4", "F#4", "G4", "A4", "B4", "C5", "D5"]),
    ("D minor", &["D4", "E4", "F4", "G4", "A4", "A#4", "C5"]),
    ("C minor", &["C4", "D4", "D#4", "F4", "G4", "G#4", "A#4"]),
    ("E minor pentatonic", &["E4", "G4", "A4", "B4", "D5"]),
    ("F minor pentatonic", &["F4", "G#4", "A#4", "C5", "D#5"]),
];

/// Key used for any key name missing from the scale table
pub const DEFAULT_SCALE_KEY: &str = "C major";

/// Accidental markers stripped from scale-degree tokens
const ACCIDENTALS: &[char] = &['♭', '♯', '#', 'b'];

/// Root pitch for a chord symbol, falling back to C2
pub fn chord_root(symbol: &str) -> Pitch {
    let symbol = symbol.trim();
    CHORD_ROOTS
        .iter()
        .find(|(name, _)| *name == symbol)
        .and_then(|(_, root)| Pitch::from_name(root))
        .unwrap_or_else(|| {
            log::debug!("Unknown chord '{}', using {}", symbol, DEFAULT_CHORD_ROOT);
            DEFAULT_CHORD_ROOT
        })
}

/// Split a progression on '-' and resolve each chord to its root
///
/// Blank tokens are skipped, so an empty progression gives no roots.
pub fn progression_roots(prog: &str) -> Vec<Pitch> {
    prog.split('-')
        .map(str::trim)
        .filter(|symbol| !symbol.is_empty())
        .map(chord_root)
        .collect()
}

fn scale_notes(key: &str) -> Option<&'static [&'static str]> {
    SCALES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, notes)| *notes)
}

/// Ascending scale pitches for a key name, falling back to C major
pub fn scale_for_key(key: &str) -> Vec<Pitch> {
    let key = key.trim();
    let notes = scale_notes(key).unwrap_or_else(|| {
        log::debug!("Unknown key '{}', using {}", key, DEFAULT_SCALE_KEY);
        scale_notes(DEFAULT_SCALE_KEY).unwrap_or(&[])
    });
    notes.iter().filter_map(|n| Pitch::from_name(n)).collect()
}

/// 1-based scale degree from a motif token
///
/// Accidentals are stripped and leading digits are read. Zero or a token
/// without digits gives `None`.
pub fn parse_degree(token: &str) -> Option<usize> {
    let stripped: String = token.trim().chars().filter(|c| !ACCIDENTALS.contains(c)).collect();
    let digits: String = stripped.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<usize>().ok().filter(|n| *n > 0)
}

/// Pitch for a degree within a scale, wrapping past the top
pub fn degree_pitch(scale: &[Pitch], degree: usize) -> Option<Pitch> {
    if scale.is_empty() || degree == 0 {
        return None;
    }
    Some(scale[(degree - 1) % scale.len()])
}

/// Resolve a motif to one entry per step; `None` marks a silent step
///
/// Blank tokens are skipped, so an empty motif gives no steps.
pub fn motif_pitches(motif: &str, key: &str) -> Vec<Option<Pitch>> {
    let scale = scale_for_key(key);
    motif
        .split('-')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            let pitch = parse_degree(token).and_then(|degree| degree_pitch(&scale, degree));
            if pitch.is_none() {
                log::debug!("Silent step for degree '{}'", token);
            }
            pitch
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(pitches: &[Pitch]) -> Vec<String> {
        pitches.iter().map(|p| p.name()).collect()
    }

    #[test]
    fn test_tables_parse() {
        for (symbol, root) in CHORD_ROOTS {
            assert!(Pitch::from_name(root).is_some(), "bad root for {}", symbol);
        }
        for (key, notes) in SCALES {
            for note in *notes {
                assert!(Pitch::from_name(note).is_some(), "bad note {} in {}", note, key);
            }
        }
    }

    #[test]
    fn test_progression_roots() {
        let roots = progression_roots("C - Am - F - G");
        assert_eq!(names(&roots), vec!["C2", "A2", "F2", "G2"]);
    }

    #[test]
    fn test_flat_chords_map_to_sharps() {
        let roots = progression_roots("Fm - Db - Ab - Eb");
        assert_eq!(names(&roots), vec!["F2", "C#2", "G#2", "D#2"]);
    }

    #[test]
    fn test_unknown_chord_falls_back() {
        assert_eq!(chord_root("Cmaj7"), Pitch::C2);
        assert_eq!(chord_root("F#m"), Pitch::C2);
        assert_eq!(chord_root(""), Pitch::C2);
    }

    #[test]
    fn test_empty_progression() {
        assert!(progression_roots("").is_empty());
        assert!(progression_roots(" - ").is_empty());
    }

    #[test]
    fn test_unknown_key_falls_back_to_c_major() {
        assert_eq!(scale_for_key("H locrian"), scale_for_key("C major"));
        assert_eq!(scale_for_key("E phrygian").len(), 7);
    }

    #[test]
    fn test_parse_degree() {
        assert_eq!(parse_degree("1"), Some(1));
        assert_eq!(parse_degree(" 7 "), Some(7));
        assert_eq!(parse_degree("b3"), Some(3));
        assert_eq!(parse_degree("♭7"), Some(7));
        assert_eq!(parse_degree("#4"), Some(4));
        assert_eq!(parse_degree("♯4"), Some(4));
        assert_eq!(parse_degree("5x"), Some(5));
        assert_eq!(parse_degree("0"), None);
        assert_eq!(parse_degree("x"), None);
        assert_eq!(parse_degree(""), None);
    }

    #[test]
    fn test_pentatonic_wraps() {
        let pitches = motif_pitches("1-3-5-7-5-3", "E minor pentatonic");
        let names: Vec<_> = pitches.iter().map(|p| p.map(|p| p.name())).collect();
        assert_eq!(
            names,
            vec![
                Some("E4".to_string()),
                Some("A4".to_string()),
                Some("D5".to_string()),
                // (7 - 1) mod 5 = 1
                Some("G4".to_string()),
                Some("D5".to_string()),
                Some("A4".to_string()),
            ]
        );
    }

    #[test]
    fn test_unparseable_degree_is_silent() {
        let pitches = motif_pitches("1-?-3", "C major");
        assert_eq!(pitches.len(), 3);
        assert_eq!(pitches[1], None);
        assert_eq!(pitches[2].map(|p| p.name()), Some("E4".to_string()));
    }

    #[test]
    fn test_degree_pitch_wraps_past_octave() {
        let scale = scale_for_key("C major");
        assert_eq!(degree_pitch(&scale, 8), Some(scale[0]));
        assert_eq!(degree_pitch(&scale, 0), None);
        assert_eq!(degree_pitch(&[], 1), None);
    }
}
