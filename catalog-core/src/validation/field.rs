//! Field paths and the errors bound to them
use std::fmt;
use thiserror::Error;

/// A pointer to a field inside an object, e.g. `metadata.labels[app]`
///
/// ```
/// use catalog_core::validation::field::Path;
/// let p = Path::new("metadata").child("labels").key("app");
/// assert_eq!(p.to_string(), "metadata.labels[app]");
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Path(String);

impl Path {
    /// A root path
    pub fn new(root: &str) -> Self {
        Self(root.to_string())
    }

    /// Descend into a named field
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        if self.0.is_empty() {
            return Self::new(name);
        }
        Self(format!("{}.{name}", self.0))
    }

    /// Descend into a list element
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    /// Descend into a map entry
    #[must_use]
    pub fn key(&self, key: &str) -> Self {
        Self(format!("{}[{key}]", self.0))
    }

    /// The rendered path
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What kind of problem a [`FieldError`] reports
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorType {
    /// A required field was missing or empty
    Required,
    /// A field value was malformed
    Invalid,
    /// A field was set where it is not allowed
    Forbidden,
}

impl ErrorType {
    /// The apimachinery spelling of the error type
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Required => "Required value",
            ErrorType::Invalid => "Invalid value",
            ErrorType::Forbidden => "Forbidden",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single problem with a single field
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{field}: {type_}{}: {detail}", show_value(.bad_value))]
pub struct FieldError {
    /// Kind of problem
    pub type_: ErrorType,
    /// Rendered [`Path`] of the offending field
    pub field: String,
    /// The rejected value, for [`ErrorType::Invalid`]
    pub bad_value: Option<String>,
    /// Human readable cause
    pub detail: String,
}

fn show_value(value: &Option<String>) -> String {
    value.as_ref().map(|v| format!(": {v:?}")).unwrap_or_default()
}

impl FieldError {
    /// A required field is missing
    pub fn required(path: &Path, detail: impl Into<String>) -> Self {
        Self {
            type_: ErrorType::Required,
            field: path.to_string(),
            bad_value: None,
            detail: detail.into(),
        }
    }

    /// A field holds a malformed `value`
    pub fn invalid(path: &Path, value: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            type_: ErrorType::Invalid,
            field: path.to_string(),
            bad_value: Some(value.into()),
            detail: detail.into(),
        }
    }

    /// A field is set where it may not be
    pub fn forbidden(path: &Path, detail: impl Into<String>) -> Self {
        Self {
            type_: ErrorType::Forbidden,
            field: path.to_string(),
            bad_value: None,
            detail: detail.into(),
        }
    }
}

/// Ordered collection of [`FieldError`]s, in the order checks ran
#[derive(Clone, Debug, Default, Eq, PartialEq, Error)]
#[error("{}", join(.0))]
pub struct ErrorList(Vec<FieldError>);

fn join(errors: &[FieldError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

impl ErrorList {
    /// An empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one error
    pub fn push(&mut self, err: FieldError) {
        self.0.push(err);
    }

    /// `Ok(())` when empty, the list itself otherwise
    pub fn into_result(self) -> Result<(), ErrorList> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Unwrap into the underlying vector
    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }
}

impl std::ops::Deref for ErrorList {
    type Target = [FieldError];

    fn deref(&self) -> &[FieldError] {
        &self.0
    }
}

impl From<Vec<FieldError>> for ErrorList {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl FromIterator<FieldError> for ErrorList {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<FieldError> for ErrorList {
    fn extend<I: IntoIterator<Item = FieldError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ErrorList {
    type IntoIter = std::vec::IntoIter<FieldError>;
    type Item = FieldError;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type IntoIter = std::slice::Iter<'a, FieldError>;
    type Item = &'a FieldError;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
