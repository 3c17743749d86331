//! Text measurement, truncation, and math-label conversion utilities.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Truncate to fit `max_px` and add a single ellipsis if needed.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        out.push(ch);
        if estimate_text_width_px(&out, font_px) > max_px {
            out.pop();
            // make room for the ellipsis
            while !out.is_empty() && estimate_text_width_px(&format!("{out}…"), font_px) > max_px {
                out.pop();
            }
            if !out.is_empty() {
                out.push('…');
            }
            return out;
        }
    }
    out
}

fn subscript(c: char) -> Option<char> {
    Some(match c {
        '0'..='9' => char::from_u32('₀' as u32 + c.to_digit(10)?)?,
        '+' => '₊',
        '-' => '₋',
        '=' => '₌',
        '(' => '₍',
        ')' => '₎',
        'a' => 'ₐ',
        'e' => 'ₑ',
        'h' => 'ₕ',
        'i' => 'ᵢ',
        'j' => 'ⱼ',
        'k' => 'ₖ',
        'l' => 'ₗ',
        'm' => 'ₘ',
        'n' => 'ₙ',
        'o' => 'ₒ',
        'p' => 'ₚ',
        'r' => 'ᵣ',
        's' => 'ₛ',
        't' => 'ₜ',
        'u' => 'ᵤ',
        'v' => 'ᵥ',
        'x' => 'ₓ',
        _ => return None,
    })
}

fn superscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4'..='9' => char::from_u32('⁴' as u32 + c.to_digit(10)? - 4)?,
        '+' => '⁺',
        '-' => '⁻',
        '=' => '⁼',
        '(' => '⁽',
        ')' => '⁾',
        'i' => 'ⁱ',
        'n' => 'ⁿ',
        _ => return None,
    })
}

fn math_segment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$([^$]*)\$").expect("valid regex"))
}

fn script_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([_^])(?:\{([^}]*)\}|(.))").expect("valid regex"))
}

/// Render TeX-style labels as plain Unicode: `$f_{12}$` becomes `f₁₂`, `$x^2$` becomes `x²`.
/// Characters without a Unicode sub/superscript form are kept as they are; text outside
/// `$...$` is untouched.
pub fn tex_to_unicode(label: &str) -> String {
    math_segment_re()
        .replace_all(label, |seg: &Captures| {
            script_re()
                .replace_all(&seg[1], |m: &Captures| {
                    let body = m.get(2).or_else(|| m.get(3)).map_or("", |g| g.as_str());
                    let map: fn(char) -> Option<char> =
                        if &m[1] == "_" { subscript } else { superscript };
                    body.chars().map(|c| map(c).unwrap_or(c)).collect::<String>()
                })
                .into_owned()
        })
        .into_owned()
}
