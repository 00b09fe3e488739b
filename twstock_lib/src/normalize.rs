//! Text cleanup turning sentinel-laden quote fields into strings ready for
//! strict numeric parsing.
//!
//! Both exchanges render "no trade", "trading halted" and corporate actions
//! as text inside numeric columns. Every such sentinel maps to `0`; all other
//! decoration (thousands separators, explicit `+`, padding) is removed. A lone
//! `-` is a negative sign and is kept.

use crate::record::{CanonicalQuoteRow, Column};

/// Marker TWSE and TPEx append to a field when trading was halted.
pub const HALTED_MARKER: char = 'X';

/// Dash runs meaning "no value", longest first. Matching `--` before `----`
/// would leave `00` behind, so the order is load-bearing.
const DASH_SENTINELS: [&str; 3] = ["----", "---", "--"];

/// Ex-rights-and-dividend, ex-dividend and ex-rights annotations, longest
/// first since `除權` is a prefix of `除權息`.
const CORPORATE_ACTION_TOKENS: [&str; 3] = ["除權息", "除息", "除權"];

/// The shared cleaning rules, optionally preceded by removing every space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldNormalizer {
    strip_padding: bool,
}

impl FieldNormalizer {
    /// Rules for feeds whose fields are only padded at the edges.
    pub const fn standard() -> Self {
        Self {
            strip_padding: false,
        }
    }

    /// Rules for feeds that pad inside fields too (TPEx).
    pub const fn padded() -> Self {
        Self {
            strip_padding: true,
        }
    }

    /// Cleans one field. Applying it to its own output changes nothing.
    pub fn normalize(&self, field: &str) -> String {
        let mut out: String = field
            .chars()
            .filter(|c| !(self.strip_padding && *c == ' '))
            .filter(|c| *c != ',' && *c != HALTED_MARKER && *c != '+')
            .collect();
        out = out.trim().to_string();
        for dashes in DASH_SENTINELS {
            out = out.replace(dashes, "0");
        }
        for token in CORPORATE_ACTION_TOKENS {
            out = out.replace(token, "0");
        }
        out
    }

    /// Cleans every magnitude column of `row` in place. The stock id is left
    /// as the feed sent it.
    pub fn normalize_row(&self, row: &mut CanonicalQuoteRow) {
        for column in Column::MAGNITUDES {
            let cleaned = self.normalize(row.get(column));
            row.set(column, cleaned);
        }
    }
}

/// Reads the direction glyph out of a TWSE markup fragment such as
/// `<p style= color:red>+</p>`: the text between the first `>` and the `<`
/// after it. Returns `None` for anything but `+` or `-`.
pub fn direction_sign(markup: &str) -> Option<char> {
    let (_, rest) = markup.split_once('>')?;
    let (glyph, _) = rest.split_once('<')?;
    match glyph.trim() {
        "+" => Some('+'),
        "-" => Some('-'),
        _ => None,
    }
}

/// Prefixes `magnitude` with the sign carried by the direction column.
///
/// A missing or unreadable direction leaves the magnitude unsigned, so the
/// change reads as non-negative.
pub fn merge_direction(direction: Option<&str>, magnitude: &str) -> String {
    match direction.and_then(direction_sign) {
        Some(sign) => format!("{}{}", sign, magnitude.trim()),
        None => magnitude.to_string(),
    }
}
