//! Indexed text formatting
//!
//! Message-format style templates: `{n}` inserts the n-th argument, text in
//! single quotes is literal and `''` is an apostrophe.

use std::fmt::Write;

use crate::error::FormatError;
use crate::value::Value;

/// Format `template` against positional `args`
///
/// An absent argument renders as `null`; an index past the end of `args`
/// is kept verbatim.
///
/// # Errors
/// - `FormatError::UnclosedPlaceholder` for a `{` without `}`
/// - `FormatError::InvalidPlaceholder` when the braces hold anything but an index
pub fn format_indexed(template: &str, args: &[Option<Value>]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len() + 16);
    let mut chars = template.char_indices().peekable();
    let mut quoted = false;

    while let Some((position, c)) = chars.next() {
        match c {
            '\'' => {
                if chars.peek().is_some_and(|&(_, next)| next == '\'') {
                    chars.next();
                    out.push('\'');
                } else {
                    quoted = !quoted;
                }
            }
            _ if quoted => out.push(c),
            '{' => {
                let mut spec = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    spec.push(c);
                }
                if !closed {
                    return Err(FormatError::UnclosedPlaceholder { position });
                }
                if spec.is_empty() || !spec.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(FormatError::InvalidPlaceholder(spec));
                }
                let index: usize = spec
                    .parse()
                    .map_err(|_| FormatError::InvalidPlaceholder(spec.clone()))?;
                match args.get(index) {
                    Some(Some(value)) => {
                        let _ = write!(out, "{value}");
                    }
                    Some(None) => out.push_str("null"),
                    None => {
                        out.push('{');
                        out.push_str(&spec);
                        out.push('}');
                    }
                }
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<Option<Value>> {
        values.iter().map(|v| Some(Value::text(*v))).collect()
    }

    #[test]
    fn substitutes_indexed_arguments() {
        let result = format_indexed("Hello {0}", &args(&["world"])).unwrap();
        assert_eq!(result, "Hello world");
        let swapped = format_indexed("{1}-{0}-{1}", &args(&["a", "b"])).unwrap();
        assert_eq!(swapped, "b-a-b");
    }

    #[test]
    fn renders_non_text_arguments() {
        let result = format_indexed("{0} items, ok={1}", &[Some(Value::Int(3)), Some(Value::Bool(true))]);
        assert_eq!(result.unwrap(), "3 items, ok=true");
    }

    #[test]
    fn absent_argument_renders_null() {
        assert_eq!(format_indexed("x={0}", &[None]).unwrap(), "x=null");
    }

    #[test]
    fn out_of_range_index_is_kept() {
        assert_eq!(format_indexed("{0} {5}", &args(&["a"])).unwrap(), "a {5}");
    }

    #[test]
    fn quotes_escape_braces() {
        assert_eq!(format_indexed("'{0}' is {0}", &args(&["x"])).unwrap(), "{0} is x");
        assert_eq!(format_indexed("it''s {0}", &args(&["x"])).unwrap(), "it's x");
    }

    #[test]
    fn malformed_templates_fail() {
        assert_eq!(
            format_indexed("Hello {0", &args(&["world"])),
            Err(FormatError::UnclosedPlaceholder { position: 6 })
        );
        assert!(format_indexed("{name}", &args(&["x"])).is_err());
        assert!(format_indexed("{0,number}", &args(&["x"])).is_err());
        assert!(format_indexed("{}", &args(&["x"])).is_err());
    }
}
