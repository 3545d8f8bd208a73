// tms-core/src/model/locale.rs
// ============================================================================
// Module: TMS Locale
// Description: Locale tags attached to translation packs.
// Purpose: Validate locale tags once at the boundary and expose the language subtag.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A [`Locale`] is a language tag made of subtags separated by `-` or `_`.
//! Both BCP 47 (`en-US`) and underscore (`en_US`) spellings are accepted and
//! stored verbatim. Matching between packs is exact string equality; no
//! fallback from a regional tag to its language is ever performed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Minimum length of the language subtag.
const MIN_LANGUAGE_LENGTH: usize = 2;
/// Maximum length of any subtag.
const MAX_SUBTAG_LENGTH: usize = 8;
/// Maximum length of a full locale tag.
const MAX_TAG_LENGTH: usize = 64;

// ============================================================================
// SECTION: Locale
// ============================================================================

/// Validated locale tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// Parses and validates a locale tag.
    ///
    /// # Errors
    ///
    /// Returns [`LocaleError`] when the tag is empty or malformed.
    pub fn parse(tag: &str) -> Result<Self, LocaleError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(LocaleError::Empty);
        }
        if tag.len() > MAX_TAG_LENGTH {
            return Err(LocaleError::TooLong(tag.len()));
        }
        let mut subtags = tag.split(['-', '_']);
        let language = subtags.next().unwrap_or_default();
        if !(MIN_LANGUAGE_LENGTH..=MAX_SUBTAG_LENGTH).contains(&language.len())
            || !language.chars().all(|ch| ch.is_ascii_alphabetic())
        {
            return Err(LocaleError::InvalidLanguage(language.to_string()));
        }
        for subtag in subtags {
            if subtag.is_empty()
                || subtag.len() > MAX_SUBTAG_LENGTH
                || !subtag.chars().all(|ch| ch.is_ascii_alphanumeric())
            {
                return Err(LocaleError::InvalidSubtag(subtag.to_string()));
            }
        }
        Ok(Self(tag.to_string()))
    }

    /// Returns the tag exactly as stored.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the lower-cased language subtag (`en` for `en-US`).
    #[must_use]
    pub fn language(&self) -> String {
        self.0.split(['-', '_']).next().unwrap_or_default().to_ascii_lowercase()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Locale {
    type Error = LocaleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Locale> for String {
    fn from(value: Locale) -> Self {
        value.0
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Locale validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    /// Tag is empty or blank.
    #[error("locale must not be blank")]
    Empty,
    /// Tag exceeds the maximum length.
    #[error("locale tag is too long ({0} characters, max 64)")]
    TooLong(usize),
    /// Language subtag is not 2-8 ASCII letters.
    #[error("invalid language subtag [{0}]")]
    InvalidLanguage(String),
    /// A trailing subtag is empty or not 1-8 ASCII alphanumerics.
    #[error("invalid locale subtag [{0}]")]
    InvalidSubtag(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
