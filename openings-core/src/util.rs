use crate::{CatalogError, Result};
use std::fmt::Write;

pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut len = out.len();
    for v in values {
        if out.len() > len {
            out.push_str(separator);
        }
        len = out.len();
        f(out, v);
    }
}

pub fn write_identifier_quoted(out: &mut String, value: &str) {
    out.push('"');
    let mut position = 0;
    for (i, c) in value.char_indices() {
        if c == '"' {
            out.push_str(&value[position..i]);
            out.push_str(r#""""#);
            position = i + 1;
        }
    }
    out.push_str(&value[position..]);
    out.push('"');
}

pub fn write_placeholder(out: &mut String, index: usize) {
    let _ = write!(out, "${}", index);
}

/// Largest index not past `max` that lands on a char boundary, so that
/// truncating at it can never split a multibyte character.
pub fn floor_char_boundary(value: &str, max: usize) -> usize {
    let mut end = value.len().min(max);
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    end
}

#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        format_args!(
            "{}{}",
            $query[..$crate::floor_char_boundary($query, 497)].trim_end(),
            if $query.len() > 497 { "..." } else { "" },
        )
    };
}

/// Parse a numeric filter criterion as it arrives from a decoded query
/// string. Anything that is not an integer is a validation failure naming
/// the offending criterion, never a silent NaN-style comparison.
pub fn parse_bound(name: &str, raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|_| CatalogError::Validation(format!("{name} must be an integer, got `{raw}`")).into())
}
