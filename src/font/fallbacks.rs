//! Devanagari fallback chain.

/// Devanagari-capable families, tried in order when the requested family is
/// not installed.
pub const DEVANAGARI_FALLBACKS: &[&str] = &[
    "Lohit Devanagari",
    "Arial Unicode MS",
    "Noto Sans Devanagari",
    "Mangal",
    "Devanagari New",
    "Nirmala UI",
    "Hind",
];

/// Families that `fontdb` maps to its generic families.
pub const GENERIC_SANS: &[&str] = &["sans-serif", "sans"];
pub const GENERIC_SERIF: &[&str] = &["serif"];
pub const GENERIC_MONO: &[&str] = &["monospace", "mono"];
