//! Parameter series codec.
//!
//! Splits `;`-delimited (and, for media ranges, `,`-delimited) series of
//! `name[=value]` tokens, and decodes or encodes their values. Quoted strings
//! (RFC 2045) and RFC 2231 extended values are understood on both sides.

use crate::error::{Error, Result};
use crate::grammar::{is_quotable, is_token, is_tspecial, Area};
use std::str::Chars;

const UPPER_HEX: &[u8] = b"0123456789ABCDEF";
const EXTENDED_CHARSET: &str = "utf-8";

/// A token as it appears on the wire; the value is absent for bare names.
pub type RawParameter = (String, Option<String>);

/// A decoded (or encoded) name and value pair.
pub type Parameter = (String, String);

/// Splits a parameter series into ordered `(name, raw value)` tokens.
///
/// Values keep their quoting so that [`decode_parameters`] can resolve it.
/// Empty tokens are skipped.
///
/// # Examples
///
/// ```
/// use mime_range::grammar::Area;
/// use mime_range::parameters::split_parameter_series;
///
/// let series = split_parameter_series("text/html;level=1, */*", Area::MediaRange).unwrap();
/// assert_eq!(series, vec![
///     ("text/html".to_string(), None),
///     ("level".to_string(), Some("1".to_string())),
///     ("*/*".to_string(), None),
/// ]);
/// ```
pub fn split_parameter_series(input: &str, area: Area) -> Result<Vec<RawParameter>> {
    let mut series = Vec::new();
    let mut name = String::new();
    let mut value: Option<String> = None;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        if area.is_delimiter(c) {
            flush_token(&mut series, &mut name, &mut value);
            continue;
        }

        match value {
            None if c == '=' => value = Some(String::new()),
            None => name.push(c),
            Some(ref mut v) if c == '"' && v.trim().is_empty() => {
                v.clear();
                v.push('"');
                read_quoted(&mut chars, v)?;
            }
            Some(ref mut v) => v.push(c),
        }
    }
    flush_token(&mut series, &mut name, &mut value);

    Ok(series)
}

fn flush_token(series: &mut Vec<RawParameter>, name: &mut String, value: &mut Option<String>) {
    let token = std::mem::take(name).trim().to_string();
    let raw = value.take().map(|v| v.trim().to_string());

    if token.is_empty() && raw.is_none() {
        return;
    }
    series.push((token, raw));
}

/// Copies a quoted string (opening quote already consumed) including its close.
fn read_quoted(chars: &mut Chars<'_>, out: &mut String) -> Result<()> {
    while let Some(c) = chars.next() {
        out.push(c);
        match c {
            '"' => return Ok(()),
            '\\' => match chars.next() {
                Some(escaped) => out.push(escaped),
                None => break,
            },
            _ => {}
        }
    }
    Err(Error::MalformedParameter(
        "unterminated quoted value".to_string(),
    ))
}

/// Resolves quoting and escapes of a single raw value.
pub fn decode_value(raw: &str) -> Result<String> {
    let inner = match raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
        Some(inner) => inner,
        None => return Ok(raw.to_string()),
    };

    let mut decoded = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            let escaped = chars.next().ok_or_else(|| {
                Error::MalformedParameter(format!("dangling escape in {raw}"))
            })?;
            decoded.push(escaped);
        } else {
            decoded.push(c);
        }
    }
    Ok(decoded)
}

/// Decodes the values of a split series.
///
/// Absent values decode to the empty string. `name*=utf-8''...` parameters
/// are percent-decoded and reported under their bare name.
pub fn decode_parameters<I>(pairs: I) -> Result<Vec<Parameter>>
where
    I: IntoIterator<Item = RawParameter>,
{
    pairs
        .into_iter()
        .map(|(name, raw)| {
            let value = match raw {
                Some(raw) => decode_value(&raw)?,
                None => String::new(),
            };

            if let Some(stem) = name.strip_suffix('*') {
                if let Some(text) = decode_extended(&value)? {
                    return Ok((stem.to_string(), text));
                }
            }
            Ok((name, value))
        })
        .collect()
}

/// Decodes `charset'language'percent-text`; only UTF-8 is understood.
fn decode_extended(value: &str) -> Result<Option<String>> {
    let mut parts = value.splitn(3, '\'');
    let (charset, _language, text) = match (parts.next(), parts.next(), parts.next()) {
        (Some(c), Some(l), Some(t)) => (c, l, t),
        _ => return Ok(None),
    };
    if !charset.eq_ignore_ascii_case(EXTENDED_CHARSET) {
        return Ok(None);
    }

    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes
                .get(i + 1..i + 3)
                .and_then(|h| std::str::from_utf8(h).ok())
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| {
                    Error::MalformedParameter(format!("bad percent escape in {value}"))
                })?;
            out.push(hex);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out)
        .map(Some)
        .map_err(|e| Error::MalformedParameter(e.to_string()))
}

/// Encodes values for the wire.
///
/// Tokens are left bare, other printable ASCII is quoted, and anything else is
/// written in RFC 2231 extended form, so the result is always ASCII.
pub fn encode_parameters<'a, I>(pairs: I) -> Vec<Parameter>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(name, value)| {
            if is_token(value) {
                (name.to_string(), value.to_string())
            } else if is_quotable(value) {
                (name.to_string(), quote(value))
            } else {
                (format!("{name}*"), encode_extended(value))
            }
        })
        .collect()
}

fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

fn encode_extended(value: &str) -> String {
    let mut encoded = format!("{EXTENDED_CHARSET}''");
    for &b in value.as_bytes() {
        if b <= b' ' || b >= 0x7F || b == b'*' || b == b'\'' || b == b'%' || is_tspecial(b as char)
        {
            encoded.push('%');
            encoded.push(UPPER_HEX[(b >> 4) as usize] as char);
            encoded.push(UPPER_HEX[(b & 0x0F) as usize] as char);
        } else {
            encoded.push(b as char);
        }
    }
    encoded
}

/// Joins encoded pairs as `name=value` separated by `;`.
pub fn join_parameter_series(encoded: &[Parameter]) -> String {
    encoded
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(";")
}
