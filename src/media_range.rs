//! Media ranges and quality-based negotiation.
//!
//! A [`MediaRange`] is the parsed value of an `Accept` header: media type
//! patterns weighted by quality, highest first (RFC 7231 section 5.3.2).

use crate::error::{Error, Result};
use crate::grammar::Area;
use crate::media_type::MediaType;
use crate::parameters::{
    decode_parameters, decode_value, split_parameter_series, RawParameter,
};
use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Preference weight as a percentage, `0..=100`.
pub type Quality = u8;

/// Quality of entries without a `q` parameter.
pub const MAX_QUALITY: Quality = 100;

const QUALITY_PARAMETER: &str = "q";

static ANY_RANGE: Lazy<MediaRange> = Lazy::new(|| MediaRange {
    entries: vec![RangeEntry {
        quality: MAX_QUALITY,
        pattern: MediaType::any().clone(),
    }],
});

/// One weighted pattern of a range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeEntry {
    pub quality: Quality,
    pub pattern: MediaType,
}

/// A media type group as it appears in the header, before conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// The `type/subtype` token.
    pub type_token: String,
    /// Raw `q` value, if one was given.
    pub quality: Option<String>,
    /// Every other parameter, raw and in order.
    pub parameters: Vec<RawParameter>,
}

/// The outcome of [`MediaRange::query`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    /// The offered type that was selected.
    pub candidate: &'a MediaType,
    /// The range pattern it matched.
    pub pattern: &'a MediaType,
    pub quality: Quality,
}

/// An immutable, quality-ordered sequence of media type patterns.
///
/// Entries of equal quality keep the order they were written in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaRange {
    entries: Vec<RangeEntry>,
}

impl MediaRange {
    /// `*/*` at full quality.
    pub fn any() -> &'static MediaRange {
        &ANY_RANGE
    }

    /// Groups the tokens of a range into one [`Group`] per media type.
    ///
    /// A bare token containing `/` starts a new group; `q` sets the group's
    /// quality and every other token is collected as a parameter.
    pub fn split(input: &str) -> Result<Vec<Group>> {
        let series =
            split_parameter_series(input, Area::MediaRange).map_err(Error::into_range_error)?;
        let mut tokens = series.into_iter();

        let (first, _) = tokens
            .next()
            .ok_or_else(|| Error::MalformedRange("empty media range".to_string()))?;

        let mut groups = Vec::new();
        let mut current = Group {
            type_token: first,
            quality: None,
            parameters: Vec::new(),
        };

        for (name, value) in tokens {
            if value.is_none() && name.contains('/') {
                let next = Group {
                    type_token: name,
                    quality: None,
                    parameters: Vec::new(),
                };
                groups.push(std::mem::replace(&mut current, next));
            } else if name == QUALITY_PARAMETER {
                current.quality = Some(value.unwrap_or_default());
            } else {
                current.parameters.push((name, value));
            }
        }
        groups.push(current);

        trace!(groups = groups.len(), "split media range");
        Ok(groups)
    }

    /// Parses an `Accept`-style header value.
    ///
    /// # Examples
    ///
    /// ```
    /// use mime_range::MediaRange;
    ///
    /// let range = MediaRange::from_string("text/html;q=0.9, text/plain").unwrap();
    /// let order: Vec<_> = range.iter().map(|e| (e.quality, e.pattern.to_string())).collect();
    /// assert_eq!(order, vec![(100, "text/plain".to_string()), (90, "text/html".to_string())]);
    /// ```
    pub fn from_string(s: &str) -> Result<Self> {
        let mut entries = Vec::new();

        for group in Self::split(s)? {
            let (content_type, subtype) = group.type_token.split_once('/').ok_or_else(|| {
                Error::MalformedRange(format!("no '/' in {:?}", group.type_token))
            })?;

            let quality = match group.quality {
                Some(raw) => parse_quality(&decode_value(&raw).map_err(Error::into_range_error)?)?,
                None => MAX_QUALITY,
            };
            let parameters =
                decode_parameters(group.parameters).map_err(Error::into_range_error)?;

            entries.push(RangeEntry {
                quality,
                pattern: MediaType::new(content_type.trim(), subtype.trim(), parameters),
            });
        }

        // Stable, so equal qualities keep header order.
        entries.sort_by(|a, b| b.quality.cmp(&a.quality));

        Ok(Self { entries })
    }

    /// Parses wire bytes, which must be UTF-8.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_string(std::str::from_utf8(data)?)
    }

    pub fn entries(&self) -> &[RangeEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RangeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The quality the range assigns to `media_type`, if any entry matches.
    ///
    /// Useful when the server wants to weigh its own preferences against the
    /// client's: a client may accept XML at a lower quality than HTML and the
    /// server may still decide to send XML.
    pub fn quality(&self, media_type: &MediaType) -> Option<Quality> {
        self.query(std::iter::once(media_type)).map(|m| m.quality)
    }

    /// Selects the best of the `available` types according to the range.
    ///
    /// An entry matches a candidate when either contains the other. The
    /// highest quality wins; at equal quality a pattern contained in the
    /// current best pattern (a more specific one) takes over, otherwise the
    /// earlier match stays. Returns `None` when nothing matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use mime_range::{MediaRange, MediaType};
    ///
    /// let range = MediaRange::from_string("application/json, text/*;q=0.5").unwrap();
    /// let html = MediaType::from_string("text/html").unwrap();
    /// let json = MediaType::from_string("application/json").unwrap();
    ///
    /// let best = range.query([&html, &json]).unwrap();
    /// assert_eq!(best.candidate, &json);
    /// assert_eq!(best.quality, 100);
    /// ```
    pub fn query<'a, I>(&'a self, available: I) -> Option<Match<'a>>
    where
        I: IntoIterator<Item = &'a MediaType>,
    {
        let mut best: Option<Match<'a>> = None;

        for candidate in available {
            for entry in &self.entries {
                let pattern = &entry.pattern;
                if !(pattern.contains(candidate) || candidate.contains(pattern)) {
                    continue;
                }

                let found = Match {
                    candidate,
                    pattern,
                    quality: entry.quality,
                };
                match best {
                    None => best = Some(found),
                    Some(current) if entry.quality > current.quality => best = Some(found),
                    Some(current) if entry.quality == current.quality => {
                        if current.pattern.contains(pattern) {
                            best = Some(found);
                        }
                    }
                    // Entries are sorted; nothing better remains for this candidate.
                    Some(_) => break,
                }
            }
        }

        best
    }
}

/// Converts a decimal `q` value to a percentage, rounding half up.
pub fn parse_quality(raw: &str) -> Result<Quality> {
    let q: f64 = raw.trim().parse().map_err(|_| {
        debug!(value = raw, "non-numeric quality");
        Error::InvalidQuality(raw.to_string())
    })?;

    if !q.is_finite() || !(0.0..=1.0).contains(&q) {
        debug!(value = raw, "quality out of range");
        return Err(Error::InvalidQuality(raw.to_string()));
    }

    Ok((q * f64::from(MAX_QUALITY)).round() as Quality)
}

fn format_quality(quality: Quality) -> String {
    match quality {
        0 => "0".to_string(),
        q if q >= MAX_QUALITY => "1".to_string(),
        q => format!("0.{q:02}").trim_end_matches('0').to_string(),
    }
}

impl fmt::Display for MediaRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", entry.pattern)?;
            if entry.quality != MAX_QUALITY {
                write!(f, ";{}={}", QUALITY_PARAMETER, format_quality(entry.quality))?;
            }
        }
        Ok(())
    }
}

impl FromStr for MediaRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s)
    }
}

impl<'a> IntoIterator for &'a MediaRange {
    type Item = &'a RangeEntry;
    type IntoIter = std::slice::Iter<'a, RangeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
