//! Rendering of `obs_id` templates.
//!
//! Templates contain literal text and `{name}` or `{name:spec}` fields;
//! `{{` and `}}` produce literal braces. The format spec is
//! `[0][width][.precision][type]` with type one of `d` (integer), `f`
//! (fixed point, default precision 6) or `s` (string). Numbers are right
//! aligned, strings left aligned.

use crate::config::ColumnValue;

use super::error::ExportError;

/// Upper bound for width and precision
const MAX_FIELD_WIDTH: usize = 256;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct FormatSpec {
    zero_pad: bool,
    width: usize,
    precision: Option<usize>,
    kind: Option<char>,
}

/// Render a template, resolving field names with `lookup`.
///
/// A field whose name cannot be resolved is an error, as is any malformed
/// template.
pub fn format_template<F>(template: &str, lookup: F) -> Result<String, ExportError>
where
    F: Fn(&str) -> Option<ColumnValue>,
{
    let error = |message: String| ExportError::Format {
        template: template.to_string(),
        message,
    };

    let mut output = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                output.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                output.push('}');
            }
            '}' => return Err(error("single '}' encountered".to_string())),
            '{' => {
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') => {
                            return Err(error("nested fields are not supported".to_string()))
                        }
                        Some(c) => field.push(c),
                        None => return Err(error("unmatched '{'".to_string())),
                    }
                }

                let (name, spec) = match field.split_once(':') {
                    Some((name, spec)) => (name, parse_spec(spec).map_err(error)?),
                    None => (field.as_str(), FormatSpec::default()),
                };
                if name.is_empty() {
                    return Err(error("positional fields are not supported".to_string()));
                }

                let value =
                    lookup(name).ok_or_else(|| error(format!("no value for field {:?}", name)))?;
                output.push_str(&render(&value, &spec).map_err(error)?);
            }
            c => output.push(c),
        }
    }

    Ok(output)
}

fn parse_spec(spec: &str) -> Result<FormatSpec, String> {
    let mut parsed = FormatSpec::default();
    let mut rest = spec;

    if let Some(stripped) = rest.strip_prefix('0') {
        parsed.zero_pad = true;
        rest = stripped;
    }

    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        parsed.width = rest[..digits]
            .parse()
            .map_err(|_| format!("invalid width in {:?}", spec))?;
        rest = &rest[digits..];
    }

    if let Some(stripped) = rest.strip_prefix('.') {
        let digits = stripped.len()
            - stripped
                .trim_start_matches(|c: char| c.is_ascii_digit())
                .len();
        if digits == 0 {
            return Err(format!("missing precision in {:?}", spec));
        }
        parsed.precision = Some(
            stripped[..digits]
                .parse()
                .map_err(|_| format!("invalid precision in {:?}", spec))?,
        );
        rest = &stripped[digits..];
    }

    if parsed.width > MAX_FIELD_WIDTH || parsed.precision.unwrap_or(0) > MAX_FIELD_WIDTH {
        return Err(format!("width or precision too large in {:?}", spec));
    }

    let mut kind = rest.chars();
    match (kind.next(), kind.next()) {
        (None, _) => {}
        (Some(c @ ('d' | 'f' | 's')), None) => parsed.kind = Some(c),
        _ => return Err(format!("invalid format spec {:?}", spec)),
    }

    Ok(parsed)
}

fn render(value: &ColumnValue, spec: &FormatSpec) -> Result<String, String> {
    let invalid = |code: char| format!("unknown format code '{}' for {} value", code, value.kind());

    let (body, numeric) = match value {
        ColumnValue::Int(i) => match spec.kind {
            None | Some('d') if spec.precision.is_none() => (i.to_string(), true),
            None | Some('d') => return Err("precision not allowed for integer values".to_string()),
            Some('f') => (format!("{:.*}", spec.precision.unwrap_or(6), *i as f64), true),
            Some(code) => return Err(invalid(code)),
        },
        ColumnValue::Float(x) => match (spec.kind, spec.precision) {
            (None, None) => (x.to_string(), true),
            (None | Some('f'), Some(precision)) => (format!("{:.*}", precision, x), true),
            (Some('f'), None) => (format!("{:.6}", x), true),
            (Some(code), _) => return Err(invalid(code)),
        },
        ColumnValue::Bool(b) => match spec.kind {
            None | Some('s') => (b.to_string(), false),
            Some('d') => (i64::from(*b).to_string(), true),
            Some(code) => return Err(invalid(code)),
        },
        ColumnValue::Str(s) => match spec.kind {
            None | Some('s') => match spec.precision {
                Some(precision) => (s.chars().take(precision).collect(), false),
                None => (s.clone(), false),
            },
            Some(code) => return Err(invalid(code)),
        },
    };

    Ok(pad(body, numeric, spec))
}

fn pad(body: String, numeric: bool, spec: &FormatSpec) -> String {
    let len = body.chars().count();
    if len >= spec.width {
        return body;
    }
    let fill = spec.width - len;

    match (numeric, spec.zero_pad) {
        (true, true) => match body.strip_prefix('-') {
            Some(digits) => format!("-{}{}", "0".repeat(fill), digits),
            None => format!("{}{}", "0".repeat(fill), body),
        },
        (true, false) => format!("{}{}", " ".repeat(fill), body),
        (false, true) => format!("{}{}", body, "0".repeat(fill)),
        (false, false) => format!("{}{}", body, " ".repeat(fill)),
    }
}
