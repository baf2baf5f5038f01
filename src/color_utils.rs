// File: src/color_utils.rs
use crate::error::{Error, Result};

/// GitHub's light-mode contribution colors, level 0 first.
pub const LIGHT_PALETTE: [&str; 5] = ["#ebedf0", "#9be9a8", "#40c463", "#30a14e", "#216e39"];

/// GitHub's dark-mode contribution colors, level 0 first.
pub const DARK_PALETTE: [&str; 5] = ["#161b22", "#0e4429", "#006d32", "#26a641", "#39d353"];

/// Ordered colors, index 0 = no activity, last = highest activity.
/// Always holds at least one color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    pub fn new<I, S>(colors: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors: Vec<String> = colors.into_iter().map(Into::into).collect();
        if colors.is_empty() {
            return Err(Error::InvalidConfig("palette must contain at least one color".to_string()));
        }
        for c in &colors {
            if parse_hex(c).is_none() {
                return Err(Error::InvalidConfig(format!("palette color {:?} is not a hex color", c)));
            }
        }
        Ok(Self { colors })
    }

    pub fn light() -> Self {
        Self {
            colors: LIGHT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn dark() -> Self {
        Self {
            colors: DARK_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for `level`, clamped to the last entry.
    pub fn color(&self, level: usize) -> &str {
        let idx = level.min(self.colors.len().saturating_sub(1));
        &self.colors[idx]
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::light()
    }
}

/// Parses `#rgb` or `#rrggbb` into an (r, g, b) tuple in [0.0, 1.0].
pub fn parse_hex(color: &str) -> Option<(f32, f32, f32)> {
    let hex = color.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let (r, g, b) = match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            (digit(0)?, digit(1)?, digit(2)?)
        }
        6 => {
            let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            (pair(0)?, pair(2)?, pair(4)?)
        }
        _ => return None,
    };
    Some((r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0))
}

/// Determines if text on top of this color should be light rather than dark.
pub fn is_dark(r: f32, g: f32, b: f32) -> bool {
    let brightness = 0.299 * r + 0.587 * g + 0.114 * b;
    brightness < 0.5
}

/// Label color that stays readable over `background`.
pub fn text_color_for(background: &str) -> &'static str {
    match parse_hex(background) {
        Some((r, g, b)) if is_dark(r, g, b) => "#8b949e",
        _ => "#57606a",
    }
}
