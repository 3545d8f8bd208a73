// tms-core/src/model/validation.rs
// ============================================================================
// Module: TMS Creation Validation
// Description: Creation request model and fail-closed field validation.
// Purpose: Turn untrusted creation input into a well-formed pack template.
// Dependencies: crate::model::{locale, pack}
// ============================================================================

//! ## Overview
//! [`PackCreationRequest`] carries exactly what a client may supply. Every
//! field is optional at the type level so that missing input is reported as a
//! validation message rather than a decode failure. [`PackCreationRequest::validate`]
//! yields a [`ValidPackRequest`] or a per-field [`ValidationErrors`] map keyed
//! by the wire field names.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use crate::model::locale::Locale;
use crate::model::pack::TranslationDefinition;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum pack name length in characters.
pub const MAX_PACK_NAME_LENGTH: usize = 255;

/// Separator of pack names in a resolution lookup; never part of a name.
pub const NAME_LIST_SEPARATOR: char = ',';

/// Wire field name for the pack name.
const FIELD_PACK_NAME: &str = "packName";
/// Wire field name for the locale.
const FIELD_LOCALE: &str = "locale";
/// Wire field name for the definitions map.
const FIELD_DEFINITIONS: &str = "definitions";

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Client-supplied pack creation input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackCreationRequest {
    /// Requested pack name.
    pub pack_name: Option<String>,
    /// Requested locale tag.
    pub locale: Option<String>,
    /// Requested definitions (key to value).
    pub definitions: Option<BTreeMap<String, String>>,
}

impl PackCreationRequest {
    /// Builds a request with every field present.
    #[must_use]
    pub fn new(
        pack_name: impl Into<String>,
        locale: impl Into<String>,
        definitions: BTreeMap<String, String>,
    ) -> Self {
        Self {
            pack_name: Some(pack_name.into()),
            locale: Some(locale.into()),
            definitions: Some(definitions),
        }
    }

    /// Validates every field and collects all failures.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] holding one message per invalid field.
    pub fn validate(&self) -> Result<ValidPackRequest, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let pack_name = match self.pack_name.as_deref() {
            None => {
                errors.insert(FIELD_PACK_NAME, "packName is required");
                None
            }
            Some(name) => match name.trim() {
                "" => {
                    errors.insert(FIELD_PACK_NAME, "packName must not be blank");
                    None
                }
                name if name.contains(NAME_LIST_SEPARATOR) => {
                    errors.insert(FIELD_PACK_NAME, "packName must not contain ','");
                    None
                }
                name if name.chars().count() > MAX_PACK_NAME_LENGTH => {
                    errors.insert(
                        FIELD_PACK_NAME,
                        format!("packName must be at most {MAX_PACK_NAME_LENGTH} characters"),
                    );
                    None
                }
                name => Some(name.to_string()),
            },
        };

        let locale = match self.locale.as_deref() {
            None => {
                errors.insert(FIELD_LOCALE, "locale is required");
                None
            }
            Some(tag) => match Locale::parse(tag) {
                Ok(locale) => Some(locale),
                Err(err) => {
                    errors.insert(FIELD_LOCALE, err.to_string());
                    None
                }
            },
        };

        let definitions = match &self.definitions {
            None => {
                errors.insert(FIELD_DEFINITIONS, "definitions are required");
                None
            }
            Some(map) if map.keys().any(|key| key.trim().is_empty()) => {
                errors.insert(FIELD_DEFINITIONS, "definition keys must not be blank");
                None
            }
            Some(map) => Some(
                map.iter()
                    .map(|(key, value)| TranslationDefinition::new(key.clone(), value.clone()))
                    .collect::<Vec<_>>(),
            ),
        };

        match (pack_name, locale, definitions) {
            (Some(pack_name), Some(locale), Some(definitions)) if errors.is_empty() => {
                Ok(ValidPackRequest {
                    pack_name,
                    locale,
                    definitions,
                })
            }
            _ => Err(errors),
        }
    }

    /// Returns a short human-readable description used in error messages.
    #[must_use]
    pub fn summary(&self) -> String {
        let count = self.definitions.as_ref().map_or(0, BTreeMap::len);
        format!(
            "packName={}, locale={}, definitions={count}",
            self.pack_name.as_deref().unwrap_or("<missing>"),
            self.locale.as_deref().unwrap_or("<missing>"),
        )
    }
}

/// Creation input that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPackRequest {
    /// Pack name without surrounding whitespace.
    pub pack_name: String,
    /// Parsed locale.
    pub locale: Locale,
    /// Definitions in key order.
    pub definitions: Vec<TranslationDefinition>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Per-field validation messages keyed by wire field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    /// Records a message for `field`; the first message per field is kept.
    fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    /// Returns true when no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the message recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Returns the field to message map.
    #[must_use]
    pub const fn fields(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
