//! Error types for the bulk loader repository.

mod destination_error;

pub use destination_error::DestinationError;
