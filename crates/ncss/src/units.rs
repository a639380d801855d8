//! Literal readers for lengths, percentages and space/comma separated lists.
//!
//! Compiled values are mostly numbers already, but a few places still carry
//! text: inline variables set with a `px` suffix, `calc()` operands like
//! `50%`, and color arguments written in CSS Color 4 syntax (`255 0 0 / 1`).

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit0, digit1},
    combinator::{all_consuming, map, map_res, opt, recognize},
    multi::many0,
    sequence::{pair, preceded, tuple},
};

use crate::error::NcssError;

/// Unit suffix of a [`Length`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum LengthUnit {
    /// A bare number.
    #[default]
    Unitless,
    Px,
    Rem,
    Em,
    Vw,
    Vh,
    Percent,
}

/// A number with an optional unit suffix.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    pub fn px(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Px,
        }
    }

    pub fn rem(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Rem,
        }
    }

    /// Reads a complete length literal such as `12px`, `-1.5rem` or `40%`.
    pub fn parse(source: &str) -> Result<Self, NcssError> {
        all_consuming(parse_length)(source.trim())
            .map(|(_, length)| length)
            .map_err(|_| NcssError::InvalidLength(source.to_string()))
    }
}

/// Parse a floating point or integer number (`10`, `-3.5`, `.25`).
fn parse_number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((
            opt(alt((char('-'), char('+')))),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
        ))),
        |s: &str| s.parse::<f64>(),
    )(input)
}

/// Parse the unit suffix. `rem` must be tried before `em`.
fn parse_unit_suffix(input: &str) -> IResult<&str, LengthUnit> {
    alt((
        map(tag("px"), |_| LengthUnit::Px),
        map(tag("rem"), |_| LengthUnit::Rem),
        map(tag("em"), |_| LengthUnit::Em),
        map(tag("vw"), |_| LengthUnit::Vw),
        map(tag("vh"), |_| LengthUnit::Vh),
        map(char('%'), |_| LengthUnit::Percent),
    ))(input)
}

/// Parse a single length, leaving any trailing input.
pub fn parse_length(input: &str) -> IResult<&str, Length> {
    let input = input.trim_start();
    let (input, value) = parse_number(input)?;
    let (input, unit) = opt(parse_unit_suffix)(input)?;

    Ok((
        input,
        Length {
            value,
            unit: unit.unwrap_or_default(),
        },
    ))
}

/// Reads `50%` as `50.0`.
pub fn parse_percentage(source: &str) -> Result<f64, NcssError> {
    match Length::parse(source) {
        Ok(Length {
            value,
            unit: LengthUnit::Percent,
        }) => Ok(value),
        _ => Err(NcssError::InvalidPercentage(source.to_string())),
    }
}

/// Strips a `px` suffix from a numeric string: `"10px"` becomes `10.0`.
///
/// Returns `None` for anything that is not exactly a number followed by `px`.
pub fn strip_px(source: &str) -> Option<f64> {
    match Length::parse(source) {
        Ok(Length {
            value,
            unit: LengthUnit::Px,
        }) => Some(value),
        _ => None,
    }
}

fn is_separator(c: char) -> bool {
    c == ',' || c == '/' || c.is_whitespace()
}

fn list_token(input: &str) -> IResult<&str, &str> {
    preceded(
        take_while(is_separator),
        take_while1(|c: char| !is_separator(c)),
    )(input)
}

/// Splits a list on commas, slashes and whitespace, dropping empty tokens.
///
/// `"255 0 0 / 1"` becomes `["255", "0", "0", "1"]`.
pub fn split_list_tokens(input: &str) -> Vec<&str> {
    match many0(list_token)(input) {
        Ok((_, tokens)) => tokens,
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_lengths_with_units() {
        assert_eq!(Length::parse("12px").unwrap(), Length::px(12.0));
        assert_eq!(Length::parse("1.5rem").unwrap(), Length::rem(1.5));
        assert_eq!(
            Length::parse("-4").unwrap(),
            Length {
                value: -4.0,
                unit: LengthUnit::Unitless
            }
        );
        assert_eq!(Length::parse(".5em").unwrap().unit, LengthUnit::Em);
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(Length::parse("12px solid").is_err());
        assert!(Length::parse("px").is_err());
    }

    #[test]
    fn percentage_requires_percent_sign() {
        assert_eq!(parse_percentage("50%").unwrap(), 50.0);
        assert!(parse_percentage("50").is_err());
    }

    #[test]
    fn strip_px_only_accepts_px_numbers() {
        assert_eq!(strip_px("10px"), Some(10.0));
        assert_eq!(strip_px("10.5px"), Some(10.5));
        assert_eq!(strip_px("solidpx"), None);
        assert_eq!(strip_px("10rem"), None);
    }

    #[test]
    fn splits_color_four_syntax() {
        assert_eq!(split_list_tokens("255 0 0 / 1"), vec!["255", "0", "0", "1"]);
        assert_eq!(split_list_tokens("255,0, 0"), vec!["255", "0", "0"]);
        assert!(split_list_tokens("  ,/ ").is_empty());
    }
}
