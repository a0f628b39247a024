// src/errors.rs

// error handling for the pacer types

// dependencies
use std::error::Error;
use std::fmt;

/// Error type for Pacer configuration issues.
#[non_exhaustive]
#[derive(Debug)]
pub enum PacerError {
    EmptyDefaultKey, // the fallback key must be a non-empty string
}

// implement the Display trait for the PacerError type
impl fmt::Display for PacerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PacerError::EmptyDefaultKey => write!(f, "Default key must be non-empty"),
        }
    }
}

// implement the Error trait for the PacerError type
impl Error for PacerError {}

/// Error type for execution context dispatch failures.
/// A failed dispatch is reported, never silently dropped; depending on
/// configuration the engines fall back to running the operation inline.
#[non_exhaustive]
#[derive(Debug)]
pub enum DispatchError {
    ContextClosed, // the dedicated worker has gone away
}

// implement the Display trait for the DispatchError type
impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DispatchError::ContextClosed => write!(f, "Execution context is closed"),
        }
    }
}

// implement the Error trait for the DispatchError type
impl Error for DispatchError {}
