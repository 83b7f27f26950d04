//! Placeholder parsing for behavioural step definitions.

use anyhow::{Context, Result};

/// Strips one layer of matching single or double quotes from a value.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    if let Some(stripped) = trimmed.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        return stripped;
    }
    if let Some(stripped) = trimmed
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
    {
        return stripped;
    }
    trimmed
}

/// Normalizes a scalar placeholder by trimming and unquoting one outer layer.
#[must_use]
pub fn normalize_scalar(value: &str) -> String {
    unquote(value).trim().to_owned()
}

/// Splits a comma-separated list of field names, dropping empty entries.
///
/// # Examples
///
/// ```
/// use test_helpers::text::field_list;
///
/// assert_eq!(field_list("\"id, gender\""), ["id", "gender"]);
/// assert!(field_list("''").is_empty());
/// ```
#[must_use]
pub fn field_list(value: &str) -> Vec<String> {
    unquote(value)
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Parses a signed integer placeholder.
///
/// # Errors
///
/// Returns an error naming the placeholder when it is not an integer.
pub fn parse_int(value: &str) -> Result<i64> {
    let text = normalize_scalar(value);
    text.parse()
        .with_context(|| format!("`{text}` is not an integer"))
}

#[cfg(test)]
mod tests {
    //! Unit tests for placeholder parsing.

    use super::{field_list, normalize_scalar, parse_int, unquote};
    use anyhow::{Result, ensure};

    #[test]
    fn unquote_removes_single_outer_quotes() {
        assert_eq!(unquote("'value'"), "value");
        assert_eq!(unquote("\"value\""), "value");
    }

    #[test]
    fn normalize_scalar_trims_whitespace() {
        assert_eq!(normalize_scalar("  'value'  "), "value");
    }

    #[test]
    fn field_list_trims_each_name() {
        assert_eq!(field_list(" name ,age,"), ["name", "age"]);
    }

    #[test]
    fn parse_int_reports_bad_input() -> Result<()> {
        ensure!(parse_int("'42'")? == 42, "quoted integers should parse");
        let err = parse_int("forty").err();
        ensure!(
            err.is_some_and(|e| e.to_string().contains("forty")),
            "error should name the placeholder"
        );
        Ok(())
    }
}
