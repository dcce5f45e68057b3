//! The stateful pieces of the simulation. Cards mine, licences hold cards,
//! packages build licences, and users own licences and spend what they mine.

// kind of trying to load based on dependency order here
pub mod card;
pub mod licence;
pub mod package;
pub mod user;
