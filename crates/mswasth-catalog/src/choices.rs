//! Fixed choice lists

/// Nominee relationship choices, in display order
pub const NOMINEE_RELATIONSHIPS: [&str; 14] = [
    "Spouse",
    "Son",
    "Daughter",
    "Mother",
    "Father",
    "Sister",
    "Brother",
    "Grandfather",
    "Grandmother",
    "Nephew",
    "Niece",
    "Uncle",
    "Aunty",
    "Other",
];

/// Theme used when none has been stored
pub const DEFAULT_THEME: &str = "light";

/// Selectable themes
pub const THEMES: [&str; 29] = [
    "light",
    "dark",
    "cupcake",
    "bumblebee",
    "emerald",
    "corporate",
    "synthwave",
    "retro",
    "cyberpunk",
    "valentine",
    "halloween",
    "garden",
    "forest",
    "aqua",
    "lofi",
    "pastel",
    "fantasy",
    "wireframe",
    "black",
    "luxury",
    "dracula",
    "cmyk",
    "autumn",
    "business",
    "acid",
    "lemonade",
    "night",
    "coffee",
    "winter",
];

/// Whether `name` is one of [`THEMES`]
#[inline]
#[must_use]
pub fn is_known_theme(name: &str) -> bool {
    THEMES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_is_known() {
        assert!(is_known_theme(DEFAULT_THEME));
        assert!(!is_known_theme("solarized"));
    }
}
