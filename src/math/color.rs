use anyhow::{bail, Context, Result};

/// RGB triple in [0, 1]
pub type Rgb = [f32; 3];

/// Parse `#rrggbb` or `#rgb` (leading `#` optional) into sRGB-encoded
/// components, each byte divided by 255
pub fn parse_hex_color(input: &str) -> Result<Rgb> {
    let hex = input.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("Invalid hex color {:?}: non-hex digit", input);
    }

    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => bail!("Invalid hex color {:?}: expected 3 or 6 digits", input),
    };

    let value = u32::from_str_radix(&expanded, 16)
        .with_context(|| format!("Invalid hex color {:?}", input))?;

    let channel = |shift: u32| ((value >> shift) & 0xff) as f32 / 255.0;
    Ok([channel(16), channel(8), channel(0)])
}

/// sRGB-encoded components to linear light
pub fn srgb_to_linear(rgb: Rgb) -> Rgb {
    rgb.map(|c| {
        if c < 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    })
}
