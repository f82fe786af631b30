//! Display-text normalization for question and option strings.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// LaTeX-ish command tokens that suggest bare math notation.
static LATEX_HINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\\,|\\circ|\\frac|\\text|\\alpha|\\beta|\\gamma|\\delta|\\theta|\\pi|\\times|\\div|\\leq|\\geq|\\sqrt|\\rightarrow|\\cdot|_[0-9]|\^[0-9])",
    )
    .expect("latex hint pattern is valid")
});

/// Wrap bare mathematical notation in inline-math delimiters.
///
/// Best-effort heuristic, not a parser: text already carrying `$` delimiters
/// is left untouched, and text with LaTeX-like command tokens is trimmed and
/// wrapped in `$...$`. Ambiguous notation may be mis-wrapped; that is an
/// accepted limitation.
#[must_use]
pub fn normalize_display_text(text: &str) -> Cow<'_, str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Cow::Borrowed(text);
    }

    if trimmed.contains('$') {
        return Cow::Borrowed(text);
    }

    if LATEX_HINT.is_match(trimmed) {
        return Cow::Owned(format!("${trimmed}$"));
    }

    if trimmed.contains("\\circ") {
        return Cow::Owned(trimmed.replace("\\circ", "°"));
    }

    Cow::Borrowed(trimmed)
}
