// Pattern Icons
// SVG markup keyed by the record's `icon` field

/// Look up the SVG markup for an icon key
///
/// Unknown or empty keys return `None`; the card simply renders no icon.
pub fn icon_svg(key: &str) -> Option<&'static str> {
    match key {
        "rings" => Some(RINGS),
        "heart" => Some(HEART),
        "compass" => Some(COMPASS),
        "waveform" => Some(WAVEFORM),
        _ => None,
    }
}

/// All icon keys with artwork
pub fn icon_keys() -> [&'static str; 4] {
    ["rings", "heart", "compass", "waveform"]
}

const RINGS: &str = r#"<svg viewBox="0 0 48 48" class="w-6 h-6" fill="none" xmlns="http://www.w3.org/2000/svg"><circle cx="24" cy="24" r="8" stroke="currentColor" stroke-width="1.6" opacity="0.95"/><circle cx="24" cy="24" r="14" stroke="currentColor" stroke-width="1.2" opacity="0.75"/><circle cx="24" cy="24" r="20" stroke="currentColor" stroke-width="0.9" opacity="0.45"/></svg>"#;

const HEART: &str = r#"<svg viewBox="0 0 24 24" class="w-6 h-6" fill="currentColor" xmlns="http://www.w3.org/2000/svg"><path d="M12 21s-7-4.9-9-8.1C0.8 9.8 3.8 5 8.4 5 10.7 5 12 6.5 12 6.5S13.3 5 15.6 5c4.6 0 7.6 4.8 5.4 7.9C19 16.1 12 21 12 21z"/></svg>"#;

const COMPASS: &str = r#"<svg viewBox="0 0 24 24" class="w-6 h-6" fill="none" stroke="currentColor" stroke-width="1.4" xmlns="http://www.w3.org/2000/svg"><circle cx="12" cy="12" r="9"/><path d="M16 8l-4 2-2 4 4-2 2-4z" stroke-linejoin="round"/></svg>"#;

const WAVEFORM: &str = r#"<svg viewBox="0 0 48 48" class="w-6 h-6" fill="none" xmlns="http://www.w3.org/2000/svg"><path d="M4 24c4-10 8-10 12 0s8 10 12 0 8-10 12 0" stroke="currentColor" stroke-width="1.6" stroke-linecap="round" stroke-linejoin="round"/></svg>"#;
