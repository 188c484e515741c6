//! Validation errors reported by the parser.
//!
//! Errors are data. A single header can fail several rules at once, so the
//! validating parser collects every [`ValidationError`] into
//! [`ValidationErrors`] before returning.

use std::fmt;

use smol_str::SmolStr;
use thiserror::Error;

use crate::registry::DirectiveKind;

/// Broad classification of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A directive or its value could not be understood.
    MalformedValue,
    /// Two directives contradict each other.
    ConflictingDirectives,
}

/// A single rule violation found in a header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `no-store` appears together with `public` or `private`.
    #[error("no-store cannot be combined with public or private")]
    NoStoreWithScope,

    /// `public` and `private` both appear.
    #[error("public and private are mutually exclusive")]
    PublicAndPrivate,

    /// A numeric directive has no value.
    #[error("{directive} requires a numeric value in seconds")]
    MissingValue {
        /// The directive as it appeared in the header.
        directive: SmolStr,
    },

    /// A numeric directive has a value that is not a whole number.
    #[error("{directive} has a non-numeric value: {value:?}")]
    InvalidNumber {
        /// The directive as it appeared in the header.
        directive: SmolStr,
        /// The raw value text.
        value: SmolStr,
    },

    /// A bare token that is not a known directive.
    #[error("malformed directive: {0}")]
    MalformedDirective(SmolStr),
}

impl ValidationError {
    /// Returns the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::NoStoreWithScope | ValidationError::PublicAndPrivate => {
                ErrorKind::ConflictingDirectives
            }
            ValidationError::MissingValue { .. }
            | ValidationError::InvalidNumber { .. }
            | ValidationError::MalformedDirective(_) => ErrorKind::MalformedValue,
        }
    }

    /// Returns the known directive this error is about, if there is exactly one.
    pub fn directive(&self) -> Option<DirectiveKind> {
        match self {
            ValidationError::MissingValue { directive }
            | ValidationError::InvalidNumber { directive, .. } => DirectiveKind::lookup(directive),
            _ => None,
        }
    }
}

/// Every rule violation found in one header, in report order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }

    /// Returns the individual errors.
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns each error rendered as a sentence.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    /// Consumes the collection and returns the errors.
    pub fn into_inner(self) -> Vec<ValidationError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
