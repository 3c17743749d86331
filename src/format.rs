//! Number-to-text conversion for values printed inside plots (bounds, annotations).

use num_format::{Locale, ToFormattedString};
use std::fmt;
use std::sync::Arc;

/// Default representation: scientific notation above 1000, two decimals otherwise.
pub fn default_number_to_text(val: f64) -> String {
    if val > 1e3 {
        format!("{val:.2e}")
    } else {
        format!("{val:.2}")
    }
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Format with two decimals, grouping thousands the way `locale_tag` does.
pub fn locale_number_to_text(val: f64, locale_tag: &str) -> String {
    if !val.is_finite() {
        return val.to_string();
    }
    let (locale, dec_sep) = map_locale(locale_tag);
    let cents = (val.abs() * 100.0).round() as u64;
    let sign = if val < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{sign}{}{dec_sep}{:02}",
        (cents / 100).to_formatted_string(locale),
        cents % 100
    )
}

/// Shared, cloneable number formatter stored in the plot configuration.
#[derive(Clone)]
pub struct NumberFormatter(Arc<dyn Fn(f64) -> String + Send + Sync>);

impl NumberFormatter {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Locale-aware formatter, see [`locale_number_to_text`].
    pub fn locale(tag: &str) -> Self {
        let tag = tag.to_string();
        Self::new(move |v| locale_number_to_text(v, &tag))
    }

    pub fn format(&self, val: f64) -> String {
        (self.0)(val)
    }
}

impl Default for NumberFormatter {
    fn default() -> Self {
        Self::new(default_number_to_text)
    }
}

impl fmt::Debug for NumberFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NumberFormatter(..)")
    }
}

/// Tick label with magnitude-dependent precision.
pub fn tick_label(v: f64) -> String {
    let a = v.abs();
    let prec = if a >= 100.0 {
        0
    } else if a >= 10.0 {
        1
    } else {
        2
    };
    format!("{:.*}", prec, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_switches_to_scientific_above_thousand() {
        assert_eq!(default_number_to_text(0.5), "0.50");
        assert_eq!(default_number_to_text(1000.0), "1000.00");
        assert_eq!(default_number_to_text(12345.0), "1.23e4");
    }

    #[test]
    fn locale_grouping_and_separator() {
        assert_eq!(locale_number_to_text(1234567.891, "en"), "1,234,567.89");
        assert_eq!(locale_number_to_text(1234567.891, "de"), "1.234.567,89");
        assert_eq!(locale_number_to_text(-0.5, "en"), "-0.50");
        assert_eq!(locale_number_to_text(-0.001, "en"), "0.00");
    }

    #[test]
    fn tick_precision_depends_on_magnitude() {
        assert_eq!(tick_label(123.4), "123");
        assert_eq!(tick_label(12.34), "12.3");
        assert_eq!(tick_label(1.234), "1.23");
    }
}
