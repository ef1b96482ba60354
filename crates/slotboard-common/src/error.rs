use thiserror::Error;

/// Errors from explicit parsing of model values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid variant '{0}': expected light, dark or post")]
    UnknownVariant(String),

    #[error("Invalid post status '{0}': expected scheduled, published, failed or partial")]
    UnknownStatus(String),

    #[error("Invalid UTC offset '{0}': expected e.g. '+02:00', '-0530', 'Z' or 'UTC'")]
    InvalidUtcOffset(String),

    #[error("Invalid time zone '{0}': expected 'local', a UTC offset or an IANA name")]
    InvalidTimeZone(String),
}
