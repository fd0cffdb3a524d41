//! Equal-interval classification and the red–yellow–green color ramp.

use crate::api::{Legend, LegendSwatch};

/// Default number of legend classes.
pub const DEFAULT_BINS: usize = 5;
/// Largest accepted number of legend classes.
pub const MAX_BINS: usize = 100;
/// Most decimals shown in a swatch label.
const MAX_LABEL_DECIMALS: usize = 6;

/// RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Per-channel linear interpolation, rounded half up.
    fn lerp(self, other: Rgb, u: f64) -> Rgb {
        let channel = |a: u8, b: u8| -> u8 {
            let v = a as f64 + (b as f64 - a as f64) * u;
            (v + 0.5).floor().clamp(0.0, 255.0) as u8
        };
        Rgb::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }
}

pub const LOW_RED: Rgb = Rgb::new(0xc0, 0x39, 0x2b);
pub const MID_YELLOW: Rgb = Rgb::new(0xf1, 0xc4, 0x0f);
pub const HIGH_GREEN: Rgb = Rgb::new(0x27, 0xae, 0x60);

/// Color at `t` on the red → yellow → green ramp.
///
/// Two independent linear segments meeting at `t = 0.5`, not a spline.
/// `t` is clamped to `[0, 1]`; NaN is treated as 0.
pub fn red_yellow_green_rgb(t: f64) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    if t <= 0.5 {
        LOW_RED.lerp(MID_YELLOW, t / 0.5)
    } else {
        MID_YELLOW.lerp(HIGH_GREEN, (t - 0.5) / 0.5)
    }
}

/// [`red_yellow_green_rgb`] as a `#rrggbb` string.
pub fn red_yellow_green(t: f64) -> String {
    red_yellow_green_rgb(t).to_hex()
}

/// `bins + 1` equally spaced edges from `min` to `max`.
///
/// Non-finite bounds or `bins == 0` give `[0, 1]`; `min == max` gives the
/// two-point `[min, max]` (one implicit bin). `bins` is capped at
/// [`MAX_BINS`].
pub fn equal_breaks(min: f64, max: f64, bins: usize) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite()) || bins == 0 {
        return vec![0.0, 1.0];
    }
    if min == max {
        return vec![min, max];
    }
    let bins = bins.min(MAX_BINS);

    let step = (max - min) / bins as f64;
    (0..=bins).map(|i| min + step * i as f64).collect()
}

/// Index of the bin holding `v`: `edges[i] <= v < edges[i + 1]`.
///
/// The last bin is closed on the right and also absorbs anything above the
/// top edge; values below the first edge land in bin 0. Non-finite `v` or
/// fewer than two edges give 0.
pub fn bin_index(v: f64, edges: &[f64]) -> usize {
    if !v.is_finite() || edges.len() < 2 {
        return 0;
    }

    let last = edges.len() - 2;
    edges[1..]
        .iter()
        .position(|hi| v < *hi)
        .unwrap_or(last)
}

/// Decimals needed so labels of adjacent edges `width` apart differ.
fn label_decimals(width: f64) -> usize {
    if !(width.is_finite() && width > 0.0) {
        return 1;
    }
    let needed = (-width.log10()).ceil();
    if needed <= 1.0 {
        1
    } else {
        (needed as usize).min(MAX_LABEL_DECIMALS)
    }
}

impl Legend {
    /// One swatch per interval of `edges`, colored evenly along the ramp.
    ///
    /// Labels use one decimal, or more when the narrowest interval needs it.
    pub fn from_edges(edges: Vec<f64>) -> Self {
        let edges = if edges.len() < 2 { vec![0.0, 1.0] } else { edges };
        let n = edges.len() - 1;
        let width = edges
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .filter(|w| *w > 0.0)
            .fold(f64::INFINITY, f64::min);
        let prec = label_decimals(width);

        let swatches = edges
            .windows(2)
            .enumerate()
            .map(|(i, pair)| {
                let (lo, hi) = (pair[0], pair[1]);
                let t = if n == 1 { 1.0 } else { i as f64 / (n - 1) as f64 };
                let close = if i == n - 1 { ']' } else { ')' };
                LegendSwatch {
                    label: format!("[{:.prec$}, {:.prec$}{}", lo, hi, close, prec = prec),
                    min: lo,
                    max: hi,
                    color: red_yellow_green(t),
                }
            })
            .collect();

        Legend { edges, swatches }
    }

    /// Equal-interval legend over `[min, max]`.
    pub fn equal_interval(min: f64, max: f64, bins: usize) -> Self {
        Self::from_edges(equal_breaks(min, max, bins))
    }

    /// Color of the swatch `value` falls into.
    pub fn color_for(&self, value: f64) -> &str {
        let idx = bin_index(value, &self.edges);
        self.swatches
            .get(idx)
            .map(|s| s.color.as_str())
            .unwrap_or_default()
    }
}
