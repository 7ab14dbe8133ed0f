/// A named color offered in the swatch picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub code: &'static str,
    pub name: &'static str,
}

pub const PRESET_COLORS: [Swatch; 8] = [
    Swatch { code: "#000000", name: "Black" },
    Swatch { code: "#ffffff", name: "White" },
    Swatch { code: "#2F4F4F", name: "Navy" },
    Swatch { code: "#8B0000", name: "Burgundy" },
    Swatch { code: "#A0522D", name: "Brown" },
    Swatch { code: "#D2B48C", name: "Beige" },
    Swatch { code: "#808080", name: "Gray" },
    Swatch { code: "#f8c6c9", name: "Pink" },
];

/// Name of the swatch with this code, ignoring case
pub fn swatch_name(code: &str) -> Option<&'static str> {
    PRESET_COLORS
        .iter()
        .find(|swatch| swatch.code.eq_ignore_ascii_case(code.trim()))
        .map(|swatch| swatch.name)
}

/// Swatch name, or the code itself for custom colors
pub fn display_name(code: &str) -> &str {
    swatch_name(code).unwrap_or(code)
}
