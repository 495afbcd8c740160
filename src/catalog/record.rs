//! Positional parsing of one split catalog line into a [`StarRecord`].

use std::str::FromStr;

use crate::error::AppError;
use crate::models::{Declination, RightAscension, StarRecord};

/// Number of columns in every data line.
pub const FIELD_COUNT: usize = 15;

/// Column names, in file order. Used in error messages.
pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "hip",
    "ra_hours",
    "ra_minutes",
    "ra_seconds",
    "dec_degrees",
    "dec_arcminutes",
    "dec_arcseconds",
    "vmag",
    "parallax",
    "parallax_error",
    "b_v",
    "b_v_error",
    "double_star",
    "secondary_id",
    "third_catalog",
];

/// Where a line came from, for error reporting.
#[derive(Clone, Copy, Debug)]
pub struct LineContext<'a> {
    pub path: &'a str,
    pub line: usize,
}

/// Builds a [`StarRecord`] from exactly [`FIELD_COUNT`] fields.
///
/// Numeric fields are trimmed before parsing. A blank numeric field reads as
/// zero; any other text that does not parse to a finite number is an
/// [`AppError::InvalidField`]. String fields are kept verbatim.
pub fn parse_record(fields: &[&str], ctx: LineContext<'_>) -> Result<StarRecord, AppError> {
    if fields.len() != FIELD_COUNT {
        return Err(AppError::MalformedLine {
            path: ctx.path.to_string(),
            line: ctx.line,
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }

    let num = |idx: usize| parse_float(fields[idx], idx, ctx);

    Ok(StarRecord {
        hip: parse_integer(fields[0], 0, ctx)?,
        ra: RightAscension::new(num(1)?, num(2)?, num(3)?),
        dec: Declination::new(num(4)?, num(5)?, num(6)?),
        vmag: num(7)?,
        parallax_mas: num(8)?,
        parallax_err_mas: num(9)?,
        b_v: num(10)?,
        b_v_err: num(11)?,
        double_star: fields[12].to_string(),
        secondary_id: parse_integer(fields[13], 13, ctx)?,
        third_catalog: fields[14].to_string(),
    })
}

fn parse_integer<T>(raw: &str, idx: usize, ctx: LineContext<'_>) -> Result<T, AppError>
where
    T: FromStr + Default,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }
    trimmed.parse().map_err(|_| invalid_field(raw, idx, ctx))
}

/// `f64::from_str` accepts `nan` and `inf`; those are not catalog values.
fn parse_float(raw: &str, idx: usize, ctx: LineContext<'_>) -> Result<f64, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(invalid_field(raw, idx, ctx)),
    }
}

fn invalid_field(raw: &str, idx: usize, ctx: LineContext<'_>) -> AppError {
    AppError::InvalidField {
        path: ctx.path.to_string(),
        line: ctx.line,
        field: FIELD_NAMES[idx],
        value: raw.to_string(),
    }
}
