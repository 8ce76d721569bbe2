//! Reasons offered on the tardiness form.

/// Preset reasons, in the order they are offered. The first is the default.
pub const PRESET_REASONS: [&str; 4] = ["Macet", "Telat Bangun", "Hujan", "Tidur Larut Malam"];

/// The choice that asks for a free-text reason instead.
pub const OTHER_REASON: &str = "Lainnya...";

/// Shown wherever a record has no reason.
pub const NO_REASON: &str = "Tidak ada";

/// Every choice the form presents, presets followed by [`OTHER_REASON`].
pub fn choices() -> Vec<&'static str> {
    PRESET_REASONS.iter().copied().chain(std::iter::once(OTHER_REASON)).collect()
}

/// The reason to store for a form choice.
///
/// Picking [`OTHER_REASON`] stores the custom text, which may be empty.
pub fn resolve(selected: &str, custom: &str) -> String {
    if selected == OTHER_REASON {
        custom.trim().to_string()
    } else {
        selected.to_string()
    }
}
