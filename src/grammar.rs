//! Character classes for media type and parameter series grammar.
//!
//! Token definitions follow RFC 2045; delimiter areas follow the media range
//! grammar of RFC 7231 section 5.3.2.

/// The delimiter set in effect while splitting a parameter series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Area {
    /// Parameters of a single media type: only `;` ends a token.
    #[default]
    Parameters,
    /// An Accept-style media range: both `;` and `,` end a token.
    MediaRange,
}

impl Area {
    /// Reports whether `c` ends a token in this area (outside quotes).
    pub fn is_delimiter(self, c: char) -> bool {
        match self {
            Area::Parameters => c == ';',
            Area::MediaRange => c == ';' || c == ',',
        }
    }
}

/// tspecials := "(" / ")" / "<" / ">" / "@" / "," / ";" / ":" / "\" / <"> / "/" / "[" / "]" / "?" / "="
pub fn is_tspecial(c: char) -> bool {
    matches!(
        c,
        '(' | ')' | '<' | '>' | '@' | ',' | ';' | ':' | '\\' | '"' | '/' | '[' | ']' | '?' | '='
    )
}

/// token := 1*<any (US-ASCII) CHAR except SPACE, CTLs, or tspecials>
pub fn is_token_char(c: char) -> bool {
    c > '\x20' && c < '\x7f' && !is_tspecial(c)
}

/// Reports whether `s` can be written without quoting.
pub fn is_token(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_token_char)
}

/// Printable ASCII plus horizontal tab; anything else needs RFC 2231 encoding.
pub fn is_quotable(s: &str) -> bool {
    s.chars().all(|c| c == '\t' || (' '..='~').contains(&c))
}
