//! Error types for courseplan.

use thiserror::Error;

/// Errors that can occur in courseplan operations.
#[derive(Error, Debug)]
pub enum CoursePlanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Semester not found: {0}")]
    SemesterNotFound(String),

    #[error("Invalid period time '{0}'. Expected H:MM")]
    InvalidPeriodTime(String),

    #[error("Period table must be strictly increasing (slot {0} is not after slot {1})")]
    PeriodTableOrder(usize, usize),

    #[error("Period padding of {0} minutes is longer than a day")]
    PeriodPadding(u32),

    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("Lesson data error: {0}")]
    LessonData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CoursePlanError {
    fn from(e: serde_json::Error) -> Self {
        CoursePlanError::Serialization(e.to_string())
    }
}

/// Result type alias for courseplan operations.
pub type CoursePlanResult<T> = Result<T, CoursePlanError>;
