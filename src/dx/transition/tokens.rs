//! # Motion tokens module.
//!
//! Design-system durations which are usually shared between stylesheets and
//! transitions. Token values can be loaded from JSON (with `serde` feature)
//! where each duration is either a number of milliseconds or a CSS-like
//! string (`"300ms"`, `"0.3s"`).

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt::Display, str::FromStr};

use crate::{core::TransitionError, dx::transition::TransitionTimeout};

/// Named duration from [`MotionTokens`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DurationToken {
    /// Extra short duration.
    ExtraShort,

    /// Short duration.
    Short,

    /// Medium duration.
    Medium,

    /// Long duration.
    Long,

    /// Extra long duration.
    ExtraLong,
}

impl Display for DurationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::ExtraShort => "durationXS",
                Self::Short => "durationS",
                Self::Medium => "durationM",
                Self::Long => "durationL",
                Self::ExtraLong => "durationXL",
            }
        )
    }
}

impl FromStr for DurationToken {
    type Err = TransitionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let name = value.trim();
        let size = name.strip_prefix("duration").unwrap_or(name);

        match size.to_ascii_uppercase().as_str() {
            "XS" => Ok(Self::ExtraShort),
            "S" => Ok(Self::Short),
            "M" => Ok(Self::Medium),
            "L" => Ok(Self::Long),
            "XL" => Ok(Self::ExtraLong),
            _ => Err(TransitionError::InvalidDuration {
                details: format!("Unknown duration token '{value}'"),
            }),
        }
    }
}

/// Motion durations (in milliseconds).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionTokens {
    /// Extra short duration (`durationXS`).
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "durationXS",
            serialize_with = "serialize_ms",
            deserialize_with = "deserialize_ms"
        )
    )]
    pub extra_short: u64,

    /// Short duration (`durationS`).
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "durationS",
            serialize_with = "serialize_ms",
            deserialize_with = "deserialize_ms"
        )
    )]
    pub short: u64,

    /// Medium duration (`durationM`).
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "durationM",
            serialize_with = "serialize_ms",
            deserialize_with = "deserialize_ms"
        )
    )]
    pub medium: u64,

    /// Long duration (`durationL`).
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "durationL",
            serialize_with = "serialize_ms",
            deserialize_with = "deserialize_ms"
        )
    )]
    pub long: u64,

    /// Extra long duration (`durationXL`).
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "durationXL",
            serialize_with = "serialize_ms",
            deserialize_with = "deserialize_ms"
        )
    )]
    pub extra_long: u64,
}

impl Default for MotionTokens {
    fn default() -> Self {
        Self {
            extra_short: 200,
            short: 300,
            medium: 400,
            long: 600,
            extra_long: 800,
        }
    }
}

impl MotionTokens {
    /// Duration of `token` in milliseconds.
    pub fn duration(&self, token: DurationToken) -> u64 {
        match token {
            DurationToken::ExtraShort => self.extra_short,
            DurationToken::Short => self.short,
            DurationToken::Medium => self.medium,
            DurationToken::Long => self.long,
            DurationToken::ExtraLong => self.extra_long,
        }
    }

    /// Same `token` duration for both phases.
    pub fn timeout(&self, token: DurationToken) -> TransitionTimeout {
        TransitionTimeout::Symmetric(self.duration(token))
    }

    /// Different `enter` and `exit` token durations.
    pub fn split_timeout(&self, enter: DurationToken, exit: DurationToken) -> TransitionTimeout {
        TransitionTimeout::Split {
            enter: self.duration(enter),
            exit: self.duration(exit),
        }
    }

    /// Load tokens from JSON object.
    ///
    /// Missing tokens keep their default values.
    ///
    /// # Example
    /// ```
    /// use mount_transition::{DurationToken, MotionTokens};
    ///
    /// let tokens = MotionTokens::from_json(r#"{ "durationM": "0.5s" }"#).unwrap();
    ///
    /// assert_eq!(tokens.duration(DurationToken::Medium), 500);
    /// assert_eq!(tokens.duration(DurationToken::Long), 600);
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, TransitionError> {
        serde_json::from_str(json).map_err(|err| TransitionError::Deserialization {
            details: err.to_string(),
        })
    }
}

#[cfg(feature = "serde")]
fn serialize_ms<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{value}ms"))
}

#[cfg(feature = "serde")]
fn deserialize_ms<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDuration {
        Millis(u64),
        Css(String),
    }

    match RawDuration::deserialize(deserializer)? {
        RawDuration::Millis(value) => Ok(value),
        RawDuration::Css(value) => {
            crate::dx::transition::parse_duration(&value).map_err(serde::de::Error::custom)
        }
    }
}
