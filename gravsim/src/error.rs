//! Error types shared across the crate
//!
//! Everything that can go wrong before the first integration step is a
//! [`BuildError`]; once frames start flowing, only I/O can fail.

use thiserror::Error;

/// Bad command name, arity, numeric literal or option value
#[derive(Debug, Clone, PartialEq, Error)]
#[error("command #{index} `{command}`: {reason}")]
pub struct ParseError {
    pub index: usize, // position in the command stream
    pub command: String,
    pub reason: String,
}

impl ParseError {
    pub fn new(index: usize, command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            index,
            command: command.into(),
            reason: reason.into(),
        }
    }
}

/// An `OBJECT` whose mass or radius cannot describe a physical body
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    #[error("command #{index} `OBJECT`: mass must be positive, got {mass}")]
    NonPositiveMass { index: usize, mass: f64 },

    #[error("command #{index} `OBJECT`: radius must be positive, got {radius}")]
    NonPositiveRadius { index: usize, radius: f64 },
}

/// Any failure while folding a command stream into a config and bodies
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

impl BuildError {
    /// Index of the offending command in the stream
    pub fn index(&self) -> usize {
        match self {
            Self::Parse(e) => e.index,
            Self::Construction(ConstructionError::NonPositiveMass { index, .. })
            | Self::Construction(ConstructionError::NonPositiveRadius { index, .. }) => *index,
        }
    }
}

/// Failure reading a structured scenario document
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("invalid scenario document: {0}")]
    Document(#[from] serde_yaml::Error),

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Failure while producing frames
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to write frame {frame}: {source}")]
    Write {
        frame: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to finish output stream: {0}")]
    Finish(#[source] std::io::Error),

    #[error("simulation thread panicked")]
    SimulationPanicked,
}
