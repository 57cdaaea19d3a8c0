//! Chart glyphs for terminal reports
//!
//! Bars and shades scaled against the largest value shown, plus the text
//! helpers the dashboard lays its columns out with.

use crate::models::Money;

const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

/// Share of a total, e.g. "42.9%"; tiny non-zero shares keep two decimals
pub fn format_share(pct: f64) -> String {
    if pct > 0.0 && pct < 0.1 {
        format!("{:.2}%", pct)
    } else {
        format!("{:.1}%", pct)
    }
}

/// Horizontal bar of `width` cells, full at `peak`
pub fn format_bar(value: Money, peak: Money, width: usize) -> String {
    if !peak.is_positive() || !value.is_positive() {
        return " ".repeat(width);
    }

    let filled = (value.as_f64() / peak.as_f64() * width as f64).round() as usize;
    let filled = filled.clamp(1, width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// One heatmap cell; blank for zero, solid at `peak`
pub fn shade(value: Money, peak: Money) -> char {
    if !peak.is_positive() || !value.is_positive() {
        return SHADES[0];
    }
    let steps = (SHADES.len() - 1) as f64;
    let level = (value.as_f64() / peak.as_f64() * steps).ceil() as usize;
    SHADES[level.clamp(1, SHADES.len() - 1)]
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Cut to `max_len` characters, ending in "..." when shortened
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str(&"...".chars().take(max_len - keep).collect::<String>());
    out
}
