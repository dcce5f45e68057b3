//! Every failure in the core is a broken contract on the caller's side (asking
//! a dead card to mine, stuffing a full licence, etc). None of these are
//! retried internally, they are handed straight back to whoever asked.

use thiserror::Error;

/// The crate-wide error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A builder was missing a required field
    #[error("builder failed: {0}")]
    BuilderFailed(String),
    /// A licence cannot take another card (full, expired, or too close to
    /// expiry for the card to earn back its cost)
    #[error("licence cannot accept a new card")]
    CardNotAcceptable,
    /// A licence package was configured with more cards than its tier holds
    #[error("{tier} licence can only have {max} cards (requested {requested})")]
    CapacityExceeded {
        tier: String,
        requested: usize,
        max: usize,
    },
    /// A configuration value would make the simulation meaningless
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// Mining was requested on a card that has already deactivated
    #[error("cannot mine with a deactivated card")]
    InvalidStateOperation,
    /// Mining was requested on an expired licence
    #[error("only a valid licence can mine")]
    LicenceNotMineable,
    /// A licence tier outside of the known set
    #[error("unknown licence tier: {0}")]
    UnknownTier(String),
}

pub type Result<T> = std::result::Result<T, Error>;
