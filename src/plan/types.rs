//! Shared plan enums and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::metrics::pace::PaceFormatError;

/// Which quantity of a phase the user entered and therefore owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignMode {
    /// Duration is authoritative; distance is derived.
    #[default]
    Time,
    /// Kilometers are authoritative; duration follows the threshold pace.
    Distance,
}

impl std::fmt::Display for DesignMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DesignMode::Time => write!(f, "time"),
            DesignMode::Distance => write!(f, "distance"),
        }
    }
}

/// Half of a series cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    Work,
    Rest,
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhaseKind::Work => write!(f, "Work"),
            PhaseKind::Rest => write!(f, "Rest"),
        }
    }
}

/// Kind of entity an id was expected to resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Item,
    Group,
    Member,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Item => write!(f, "item"),
            EntityKind::Group => write!(f, "group"),
            EntityKind::Member => write!(f, "group member"),
        }
    }
}

/// Rejected input. Nothing is applied when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Name must not be empty")]
    EmptyName,

    #[error("Invalid pace: {0}")]
    InvalidPace(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Duration must be greater than 0")]
    NonPositiveDuration,

    #[error("Distance must be greater than 0")]
    NonPositiveDistance,

    #[error("Intensity {value} outside {min}-{max}")]
    IntensityOutOfRange { value: f64, min: f64, max: f64 },

    #[error("Repetitions must be between {min} and {max}, got {value}")]
    RepetitionsOutOfRange { value: u32, min: u32, max: u32 },

    #[error("At least {required} items are needed to create a group, found {found}")]
    NotEnoughItems { found: usize, required: usize },

    #[error("Groups cannot be nested")]
    NestedGroup,
}

impl From<PaceFormatError> for ValidationError {
    fn from(e: PaceFormatError) -> Self {
        ValidationError::InvalidPace(e.0)
    }
}

/// Errors reading or writing plan snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("JSON must contain \"partesEntreno\", \"groups\" or \"entrenamientos\"")]
    MissingKeys,

    #[error("No trainings found in example set")]
    EmptyExampleSet,

    #[error("Unknown example training: {0}")]
    UnknownExample(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Errors from plan operations.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: Uuid },

    #[error("Import failed: {0}")]
    Import(#[from] SnapshotError),

    #[error("Cancelled by user")]
    Cancelled,

    #[error("Illegal move: {0}")]
    IllegalMove(String),
}

impl PlanError {
    pub fn not_found(kind: EntityKind, id: Uuid) -> Self {
        PlanError::NotFound { kind, id }
    }
}

/// Result type for plan operations.
pub type PlanResult<T> = Result<T, PlanError>;
