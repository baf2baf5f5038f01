// File: src/render/scale.rs
// Count -> level quantization
use crate::error::{Error, Result};

/// Default breakpoints for a five-color palette: 0 | 1-2 | 3-5 | 6-9 | 10+.
pub const DEFAULT_THRESHOLDS: [u32; 3] = [2, 5, 9];

/// Monotonic step function from a contribution count to a palette level.
///
/// Level 0 is reserved for a zero count. Each breakpoint `b` is the inclusive
/// upper bound of one nonzero level, so `n` breakpoints yield `n + 2` levels:
/// zero, one per breakpoint, and an open-ended top level. Construction only
/// succeeds when that count equals the palette size, which keeps the ranges
/// contiguous with no gaps or overlaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scale {
    thresholds: Vec<u32>,
    levels: usize,
}

impl Scale {
    pub fn new(thresholds: Vec<u32>, levels: usize) -> Result<Self> {
        if levels == 0 {
            return Err(Error::InvalidConfig("a scale needs at least one level".to_string()));
        }
        if levels == 1 {
            if !thresholds.is_empty() {
                return Err(Error::InvalidConfig(
                    "a single-color palette takes no thresholds".to_string(),
                ));
            }
            return Ok(Self { thresholds, levels });
        }
        if thresholds.len() != levels - 2 {
            return Err(Error::InvalidConfig(format!(
                "{} colors need {} thresholds, got {}",
                levels,
                levels - 2,
                thresholds.len()
            )));
        }
        if thresholds.first().is_some_and(|&t| t == 0) {
            return Err(Error::InvalidConfig("thresholds must be at least 1".to_string()));
        }
        if thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::InvalidConfig(format!(
                "thresholds must be strictly increasing: {:?}",
                thresholds
            )));
        }
        Ok(Self { thresholds, levels })
    }

    /// Evenly spaced breakpoints for an arbitrary palette size, anchored on
    /// the defaults when the palette has five colors.
    pub fn for_levels(levels: usize) -> Result<Self> {
        if levels == DEFAULT_THRESHOLDS.len() + 2 {
            return Self::new(DEFAULT_THRESHOLDS.to_vec(), levels);
        }
        let thresholds = (1..levels.saturating_sub(1)).map(|i| (i as u32) * 3).collect();
        Self::new(thresholds, levels)
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn thresholds(&self) -> &[u32] {
        &self.thresholds
    }

    pub fn level(&self, count: u32) -> usize {
        if count == 0 || self.levels == 1 {
            return 0;
        }
        let above = self.thresholds.iter().take_while(|&&t| count > t).count();
        (1 + above).min(self.levels - 1)
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
            levels: DEFAULT_THRESHOLDS.len() + 2,
        }
    }
}
