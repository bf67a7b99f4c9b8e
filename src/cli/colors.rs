//! Theme colors for the REPL. Everything the CLI highlights, from the
//! prompt to log sources, uses these.

use colored::Color;

/// Prompt, command names and highlighted arguments.
pub(crate) const MINIDB_TEAL: Color = Color::TrueColor {
    r: 64,
    g: 196,
    b: 180,
};
