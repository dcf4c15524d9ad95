use crate::error::{ClockError, Result};

/// A selectable time control: base time plus Fischer increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub label: &'static str,
    pub base_secs: u64,
    pub increment_secs: u64,
}

impl Preset {
    const fn new(label: &'static str, base_secs: u64, increment_secs: u64) -> Self {
        Self {
            label,
            base_secs,
            increment_secs,
        }
    }
}

pub const PRESETS: [Preset; 12] = [
    Preset::new("30 sec", 30, 0),
    Preset::new("1 min", 60, 0),
    Preset::new("1 | 1", 60, 1),
    Preset::new("2 | 1", 120, 1),
    Preset::new("3 min", 180, 0),
    Preset::new("3 | 2", 180, 2),
    Preset::new("5 min", 300, 0),
    Preset::new("5 | 5", 300, 5),
    Preset::new("10 min", 600, 0),
    Preset::new("15 | 10", 900, 10),
    Preset::new("30 min", 1800, 0),
    Preset::new("60 min", 3600, 0),
];

pub const DEFAULT_PRESET_LABEL: &str = "5 min";

pub fn default_preset() -> Preset {
    PRESETS[default_index()]
}

pub fn default_index() -> usize {
    index_of(DEFAULT_PRESET_LABEL).unwrap_or(0)
}

pub fn index_of(label: &str) -> Option<usize> {
    let wanted = normalize_label(label);
    PRESETS
        .iter()
        .position(|p| normalize_label(p.label) == wanted)
}

/// Looks a preset up by label. Spacing and case are ignored, so `3|2`,
/// `3 | 2` and `30 SEC` all match.
pub fn find(label: &str) -> Result<Preset> {
    index_of(label)
        .map(|i| PRESETS[i])
        .ok_or_else(|| ClockError::UnknownPreset(label.to_string()))
}

fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
