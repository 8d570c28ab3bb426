//! IANA media types.
//!
//! A [`MediaType`] is the content-type, subtype and parameter triple found in
//! `Content-Type` headers (RFC 6838). Either of the first two fields may be
//! the wildcard `*`, making the value a pattern.

use crate::error::{Error, Result};
use crate::grammar::Area;
use crate::parameters::{
    decode_parameters, encode_parameters, join_parameter_series, split_parameter_series,
};
use bytes::Bytes;
use once_cell::sync::Lazy;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// The wildcard token for content-type and subtype.
pub const WILDCARD: &str = "*";

/// Separator of structured subtype suffixes such as `rss+xml`.
const SUFFIX_DELIMITER: char = '+';

static ANY_TYPE: Lazy<MediaType> =
    Lazy::new(|| MediaType::new(WILDCARD, WILDCARD, std::iter::empty::<(String, String)>()));

/// An immutable media type.
///
/// Parameters form a set of `(name, value)` pairs: identical pairs collapse,
/// but a name may appear more than once with different values. Equality and
/// hashing are structural and ignore parameter order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaType {
    content_type: String,
    subtype: String,
    parameters: BTreeSet<(String, String)>,
}

impl MediaType {
    /// Builds a media type from explicit fields.
    pub fn new<C, S, I, K, V>(content_type: C, subtype: S, parameters: I) -> Self
    where
        C: Into<String>,
        S: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            content_type: content_type.into(),
            subtype: subtype.into(),
            parameters: parameters
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// `*/*` with no parameters; contains every media type.
    pub fn any() -> &'static MediaType {
        &ANY_TYPE
    }

    /// Parses a media type such as `text/html; charset=utf-8`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mime_range::MediaType;
    ///
    /// let mt = MediaType::from_string("text/html; charset=utf-8").unwrap();
    /// assert_eq!(mt.content_type(), "text");
    /// assert_eq!(mt.subtype(), "html");
    /// assert!(mt.parameters().contains(&("charset".to_string(), "utf-8".to_string())));
    /// ```
    pub fn from_string(s: &str) -> Result<Self> {
        Self::from_string_with(s, std::iter::empty::<(String, String)>())
    }

    /// Parses a media type and adds `overrides` to its parameters.
    ///
    /// Overrides are added alongside parsed parameters, never in place of
    /// them: `text/plain;charset=ascii` with override `charset=utf-8` carries
    /// both pairs.
    pub fn from_string_with<I, K, V>(s: &str, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let (base, series) = s.split_once(';').unwrap_or((s, ""));
        let (content_type, subtype) = base
            .split_once('/')
            .ok_or_else(|| Error::MalformedType(format!("no '/' in {base:?}")))?;

        let mut parameters = decode_parameters(split_parameter_series(series, Area::Parameters)?)?;
        parameters.extend(overrides.into_iter().map(|(k, v)| (k.into(), v.into())));

        Ok(Self::new(content_type.trim(), subtype.trim(), parameters))
    }

    /// Parses wire bytes, which must be UTF-8.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_string(std::str::from_utf8(data)?)
    }

    /// The serialized form as bytes.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::from(self.to_string())
    }

    /// Content type, usually one of `application`, `text`, `image`, `audio`,
    /// `video`, `model`, or `*`.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// The specific form of the content type.
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// Parameters such as `charset`.
    pub fn parameters(&self) -> &BTreeSet<(String, String)> {
        &self.parameters
    }

    /// Whether this value can match more than one type.
    pub fn is_pattern(&self) -> bool {
        self.content_type == WILDCARD || self.subtype == WILDCARD
    }

    /// Appends a `+`-delimited segment to the subtype.
    ///
    /// ```
    /// use mime_range::MediaType;
    ///
    /// let rss = MediaType::from_string("application/rss").unwrap().push("xml");
    /// assert_eq!(rss.subtype(), "rss+xml");
    /// ```
    pub fn push(&self, segment: &str) -> Self {
        Self {
            content_type: self.content_type.clone(),
            subtype: format!("{}{}{}", self.subtype, SUFFIX_DELIMITER, segment),
            parameters: self.parameters.clone(),
        }
    }

    /// Removes the last `+`-delimited segment of the subtype.
    ///
    /// A subtype without `+` is returned unchanged.
    pub fn pop(&self) -> Self {
        match self.subtype.rfind(SUFFIX_DELIMITER) {
            Some(index) => Self {
                content_type: self.content_type.clone(),
                subtype: self.subtype[..index].to_string(),
                parameters: self.parameters.clone(),
            },
            None => self.clone(),
        }
    }

    /// Reports whether `other` is accepted by `self`.
    ///
    /// `self` acts as the pattern. Content-type and subtype must be equal or
    /// wildcarded on `self`. A parameterless `self` accepts any parameters;
    /// otherwise `other` must carry parameters and every one of them must
    /// appear in `self`.
    ///
    /// ```
    /// use mime_range::MediaType;
    ///
    /// let html = MediaType::from_string("text/html").unwrap();
    /// let level1 = MediaType::from_string("text/html;level=1").unwrap();
    /// assert!(html.contains(&level1));
    /// assert!(!level1.contains(&html));
    /// ```
    pub fn contains(&self, other: &MediaType) -> bool {
        let content_type = self.content_type == WILDCARD || self.content_type == other.content_type;
        let subtype = self.subtype == WILDCARD || self.subtype == other.subtype;
        let parameters = self.parameters.is_empty()
            || (!other.parameters.is_empty() && other.parameters.is_subset(&self.parameters));

        content_type && subtype && parameters
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.content_type, self.subtype)?;
        if !self.parameters.is_empty() {
            let encoded =
                encode_parameters(self.parameters.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            write!(f, ";{}", join_parameter_series(&encoded))?;
        }
        Ok(())
    }
}

impl FromStr for MediaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s)
    }
}
