//! Error types for pairing operations

use thiserror::Error;

/// Errors that can occur in the pairing engine
///
/// Pairing queries themselves never fail; a refused pair is a normal
/// [`PairingDecision`](ministerial_domain::PairingDecision). These errors
/// surface only from configuration and explicit refreshes.
#[derive(Error, Debug)]
pub enum PairingError {
    /// Datastore fetch failed
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
