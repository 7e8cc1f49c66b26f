//! Resource qualifiers.
//!
//! A resource directory name carries its qualifiers as `-`-separated
//! segments after the directory type, e.g. `values-en-rUS-dark` or
//! `drawable-xhdpi`. Parsing turns the suffix into a [`QualifierSet`] with
//! one slot per dimension.
//!
//! # Grammar
//!
//! | Dimension   | Segment                                        |
//! |-------------|------------------------------------------------|
//! | language    | `^[a-z]{2,3}$`                                 |
//! | region      | `^r[A-Z]{2}$`, only after a language           |
//! | theme       | `light`, `dark`                                |
//! | density     | `ldpi`, `mdpi`, `hdpi`, `xhdpi`, `xxhdpi`, `xxxhdpi` |
//! | orientation | `port`, `land`                                 |
//! | unknown     | any other alphanumeric segment (lenient mode)  |
//!
//! Sets compare by dimension precedence: locale, then theme, then density,
//! then the remaining dimensions.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static LANGUAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2,3}$").expect("valid language regex"));

static REGION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^r[A-Z]{2}$").expect("valid region regex"));

/// How to treat syntactically valid segments that match no known dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Reject unknown segments.
    #[default]
    Strict,
    /// Keep unknown segments as an `unknown` dimension.
    Lenient,
}

/// UI theme qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Screen density qualifier, ordered by dots per inch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Ldpi,
    Mdpi,
    Hdpi,
    Xhdpi,
    Xxhdpi,
    Xxxhdpi,
}

impl Density {
    pub fn as_str(&self) -> &'static str {
        match self {
            Density::Ldpi => "ldpi",
            Density::Mdpi => "mdpi",
            Density::Hdpi => "hdpi",
            Density::Xhdpi => "xhdpi",
            Density::Xxhdpi => "xxhdpi",
            Density::Xxxhdpi => "xxxhdpi",
        }
    }

    /// Nominal dots per inch.
    pub fn dpi(&self) -> u16 {
        match self {
            Density::Ldpi => 120,
            Density::Mdpi => 160,
            Density::Hdpi => 240,
            Density::Xhdpi => 320,
            Density::Xxhdpi => 480,
            Density::Xxxhdpi => 640,
        }
    }
}

/// Screen orientation qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[serde(rename = "port")]
    Portrait,
    #[serde(rename = "land")]
    Landscape,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "port",
            Orientation::Landscape => "land",
        }
    }
}

/// A single parsed qualifier segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Qualifier {
    Language(String),
    Region(String),
    Theme(Theme),
    Density(Density),
    Orientation(Orientation),
    Unknown(String),
}

impl Qualifier {
    /// Classify a single segment. Returns `None` for segments that match no
    /// known dimension.
    fn classify(segment: &str) -> Option<Qualifier> {
        let known = match segment {
            "light" => Some(Qualifier::Theme(Theme::Light)),
            "dark" => Some(Qualifier::Theme(Theme::Dark)),
            "ldpi" => Some(Qualifier::Density(Density::Ldpi)),
            "mdpi" => Some(Qualifier::Density(Density::Mdpi)),
            "hdpi" => Some(Qualifier::Density(Density::Hdpi)),
            "xhdpi" => Some(Qualifier::Density(Density::Xhdpi)),
            "xxhdpi" => Some(Qualifier::Density(Density::Xxhdpi)),
            "xxxhdpi" => Some(Qualifier::Density(Density::Xxxhdpi)),
            "port" => Some(Qualifier::Orientation(Orientation::Portrait)),
            "land" => Some(Qualifier::Orientation(Orientation::Landscape)),
            _ => None,
        };
        if known.is_some() {
            return known;
        }

        if LANGUAGE_RE.is_match(segment) {
            Some(Qualifier::Language(segment.to_string()))
        } else if REGION_RE.is_match(segment) {
            Some(Qualifier::Region(segment[1..].to_string()))
        } else {
            None
        }
    }

    /// Name of the dimension this segment belongs to.
    pub fn dimension(&self) -> &'static str {
        match self {
            Qualifier::Language(_) => "language",
            Qualifier::Region(_) => "region",
            Qualifier::Theme(_) => "theme",
            Qualifier::Density(_) => "density",
            Qualifier::Orientation(_) => "orientation",
            Qualifier::Unknown(_) => "other",
        }
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Qualifier::Language(l) => f.write_str(l),
            Qualifier::Region(r) => write!(f, "r{}", r),
            Qualifier::Theme(t) => f.write_str(t.as_str()),
            Qualifier::Density(d) => f.write_str(d.as_str()),
            Qualifier::Orientation(o) => f.write_str(o.as_str()),
            Qualifier::Unknown(u) => f.write_str(u),
        }
    }
}

/// Errors produced while parsing a qualifier suffix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QualifierError {
    #[error("contains an empty qualifier segment")]
    EmptySegment,

    #[error("contains malformed qualifier: '{0}'.")]
    Malformed(String),

    #[error("contains unknown qualifier: '{0}'.")]
    Unknown(String),

    #[error("contains repetitive qualifiers: '{first}' and '{second}'.")]
    Repeated { first: String, second: String },

    #[error("Region qualifier must be declared after language: '{language}-r{region}'.")]
    RegionBeforeLanguage { language: String, region: String },

    #[error("Region qualifier must be used only with language.")]
    RegionWithoutLanguage,
}

/// A structured, internally consistent set of qualifiers.
///
/// Field order defines the comparison precedence; `None` sorts before any
/// value, so the default set is the smallest.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QualifierSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density: Option<Density>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    /// Unrecognized segments, kept sorted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unknown: Vec<String>,
}

impl QualifierSet {
    /// Whether no qualifier is present, i.e. this marks a default variant.
    pub fn is_default(&self) -> bool {
        *self == QualifierSet::default()
    }

    /// Segments in canonical order.
    pub fn segments(&self) -> Vec<Qualifier> {
        let mut out = Vec::new();
        if let Some(ref l) = self.language {
            out.push(Qualifier::Language(l.clone()));
        }
        if let Some(ref r) = self.region {
            out.push(Qualifier::Region(r.clone()));
        }
        if let Some(t) = self.theme {
            out.push(Qualifier::Theme(t));
        }
        if let Some(d) = self.density {
            out.push(Qualifier::Density(d));
        }
        if let Some(o) = self.orientation {
            out.push(Qualifier::Orientation(o));
        }
        out.extend(self.unknown.iter().cloned().map(Qualifier::Unknown));
        out
    }

    /// Canonical string form (`en-rUS-dark-xhdpi`); empty for the default set.
    pub fn canonical(&self) -> String {
        self.segments()
            .iter()
            .map(|q| q.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl fmt::Display for QualifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default() {
            f.write_str("default")
        } else {
            f.write_str(&self.canonical())
        }
    }
}

/// Fill `slot` with `value`, failing if the dimension is already taken.
fn set_once<T>(
    slot: &mut Option<(T, String)>,
    value: T,
    segment: &str,
) -> Result<(), QualifierError> {
    if let Some((_, first)) = slot.as_ref() {
        return Err(QualifierError::Repeated {
            first: first.clone(),
            second: segment.to_string(),
        });
    }
    *slot = Some((value, segment.to_string()));
    Ok(())
}

/// Parse a qualifier suffix such as `en-rUS-dark`.
///
/// The empty string parses to the default set. Segment order does not
/// matter except that a region must follow its language.
pub fn parse_qualifiers(raw: &str, strictness: Strictness) -> Result<QualifierSet, QualifierError> {
    if raw.is_empty() {
        return Ok(QualifierSet::default());
    }

    let mut language: Option<(String, String)> = None;
    let mut region: Option<(String, String)> = None;
    let mut theme: Option<(Theme, String)> = None;
    let mut density: Option<(Density, String)> = None;
    let mut orientation: Option<(Orientation, String)> = None;
    let mut unknown: Vec<String> = Vec::new();

    for segment in raw.split('-') {
        if segment.is_empty() {
            return Err(QualifierError::EmptySegment);
        }
        if !segment.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(QualifierError::Malformed(segment.to_string()));
        }

        match Qualifier::classify(segment) {
            Some(Qualifier::Language(l)) => {
                if let Some((ref r, _)) = region {
                    return Err(QualifierError::RegionBeforeLanguage {
                        language: l,
                        region: r.clone(),
                    });
                }
                set_once(&mut language, l, segment)?;
            }
            Some(Qualifier::Region(r)) => set_once(&mut region, r, segment)?,
            Some(Qualifier::Theme(t)) => set_once(&mut theme, t, segment)?,
            Some(Qualifier::Density(d)) => set_once(&mut density, d, segment)?,
            Some(Qualifier::Orientation(o)) => set_once(&mut orientation, o, segment)?,
            Some(Qualifier::Unknown(_)) | None => match strictness {
                Strictness::Strict => return Err(QualifierError::Unknown(segment.to_string())),
                Strictness::Lenient => {
                    if unknown.iter().any(|u| u == segment) {
                        return Err(QualifierError::Repeated {
                            first: segment.to_string(),
                            second: segment.to_string(),
                        });
                    }
                    unknown.push(segment.to_string());
                }
            },
        }
    }

    if region.is_some() && language.is_none() {
        return Err(QualifierError::RegionWithoutLanguage);
    }

    unknown.sort();

    Ok(QualifierSet {
        language: language.map(|(v, _)| v),
        region: region.map(|(v, _)| v),
        theme: theme.map(|(v, _)| v),
        density: density.map(|(v, _)| v),
        orientation: orientation.map(|(v, _)| v),
        unknown,
    })
}
