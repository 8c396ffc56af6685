use std::fmt;

/// Why a single form field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReason {
    Missing,
    Empty,
    TooLong { max: usize },
    UnknownCategory(String),
    NotANumber(String),
    Negative,
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: ValidationReason) -> Self {
        Self { field, reason }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            ValidationReason::Missing => write!(f, "{} is required", self.field),
            ValidationReason::Empty => write!(f, "{} must not be empty", self.field),
            ValidationReason::TooLong { max } => {
                write!(f, "{} must be at most {max} characters", self.field)
            }
            ValidationReason::UnknownCategory(value) => {
                write!(f, "{}: unknown category {value:?}", self.field)
            }
            ValidationReason::NotANumber(value) => {
                write!(f, "{}: {value:?} is not a number", self.field)
            }
            ValidationReason::Negative => write!(f, "{} must not be negative", self.field),
            ValidationReason::Malformed(detail) => write!(f, "{}: {detail}", self.field),
        }
    }
}

impl std::error::Error for ValidationError {}

pub type Validated<T> = Result<T, ValidationError>;

/// Present, trimmed and non-empty.
pub fn required_text(field: &'static str, value: Option<&str>, max: usize) -> Validated<String> {
    match value {
        None => Err(ValidationError::new(field, ValidationReason::Missing)),
        Some(raw) => non_empty_text(field, raw, max),
    }
}

/// `None` when absent; an explicit empty value is still rejected.
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Validated<Option<String>> {
    value.map(|raw| non_empty_text(field, raw, max)).transpose()
}

fn non_empty_text(field: &'static str, raw: &str, max: usize) -> Validated<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, ValidationReason::Empty));
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::new(field, ValidationReason::TooLong { max }));
    }
    Ok(trimmed.to_string())
}

pub fn price(field: &'static str, raw: &str) -> Validated<i64> {
    let trimmed = raw.trim();
    let value = trimmed
        .parse::<i64>()
        .or_else(|_| {
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && v.fract() == 0.0)
                // 2^63 itself does not fit.
                .filter(|v| *v >= i64::MIN as f64 && *v < i64::MAX as f64)
                .map(|v| v as i64)
                .ok_or(())
        })
        .map_err(|_| {
            ValidationError::new(field, ValidationReason::NotANumber(trimmed.to_string()))
        })?;
    if value < 0 {
        return Err(ValidationError::new(field, ValidationReason::Negative));
    }
    Ok(value)
}
