//! CSS color parser.
//!
//! Built on `winnow` 0.7. Accepts the forms used in benchmark configs:
//! `#hex`, `rgb()`, `rgba()`, `hsl()`, `hsla()` and `transparent`.

use crate::model::Color;
use winnow::ascii::{Caseless, float, multispace0};
use winnow::combinator::{alt, delimited, opt, preceded, terminated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

/// Parse a complete CSS color string.
pub fn parse_color(input: &str) -> Result<Color, String> {
    let trimmed = input.trim();
    parse_any_color
        .parse(trimmed)
        .map_err(|e| format!("invalid color {trimmed:?}: {e}"))
}

fn parse_any_color(input: &mut &str) -> ModalResult<Color> {
    alt((
        parse_hex_color,
        parse_hsl_color,
        parse_rgb_color,
        Caseless("transparent").value(Color::TRANSPARENT),
    ))
    .parse_next(input)
}

fn parse_hex_color(input: &mut &str) -> ModalResult<Color> {
    let _ = '#'.parse_next(input)?;
    let hex_digits: &str = take_while(3..=8, |c: char| c.is_ascii_hexdigit()).parse_next(input)?;
    Color::from_hex(hex_digits).ok_or_else(|| ErrMode::Backtrack(ContextError::new()))
}

/// `hsl(h, s%, l%)` / `hsla(h, s%, l%, a)`.
fn parse_hsl_color(input: &mut &str) -> ModalResult<Color> {
    let _ = (Caseless("hsl"), opt(Caseless("a"))).parse_next(input)?;
    let (h, s, l, a) = delimited(
        (multispace0, '(', multispace0),
        (
            parse_number,
            preceded(parse_sep, parse_percent),
            preceded(parse_sep, parse_percent),
            opt(preceded(parse_sep, parse_alpha)),
        ),
        (multispace0, ')'),
    )
    .parse_next(input)?;
    Ok(Color::from_hsla(h, s, l, a.unwrap_or(1.0)))
}

/// `rgb(r, g, b)` / `rgba(r, g, b, a)` with 0..255 channels.
fn parse_rgb_color(input: &mut &str) -> ModalResult<Color> {
    let _ = (Caseless("rgb"), opt(Caseless("a"))).parse_next(input)?;
    let (r, g, b, a) = delimited(
        (multispace0, '(', multispace0),
        (
            parse_number,
            preceded(parse_sep, parse_number),
            preceded(parse_sep, parse_number),
            opt(preceded(parse_sep, parse_alpha)),
        ),
        (multispace0, ')'),
    )
    .parse_next(input)?;
    let channel = |v: f32| (v / 255.0).clamp(0.0, 1.0);
    Ok(Color::rgba(
        channel(r),
        channel(g),
        channel(b),
        a.unwrap_or(1.0).clamp(0.0, 1.0),
    ))
}

fn parse_number(input: &mut &str) -> ModalResult<f32> {
    float.parse_next(input)
}

/// A percentage; the `%` sign is optional.
fn parse_percent(input: &mut &str) -> ModalResult<f32> {
    terminated(parse_number, opt('%')).parse_next(input)
}

/// Alpha as a 0..1 number or a percentage.
fn parse_alpha(input: &mut &str) -> ModalResult<f32> {
    let value = parse_number.parse_next(input)?;
    if opt('%').parse_next(input)?.is_some() {
        Ok(value / 100.0)
    } else {
        Ok(value)
    }
}

fn parse_sep(input: &mut &str) -> ModalResult<()> {
    (multispace0, ',', multispace0).void().parse_next(input)
}
