//! Licences are sold as packages: one licence of a given tier plus some number
//! of cards to start it off with.
//!
//! A `LicencePackage` is a plain configuration value (tier and card count,
//! plus the run's parameters). Building it never mutates it, so the same
//! package can be built over and over, each time handing back a brand new
//! licence at the same price.
//!
//! ```rust
//! use mining_sim::{
//!     Decimal,
//!     models::package::{LicencePackage, LicenceTier},
//!     system::pricing::{MiningParameters, PricingInputs},
//! };
//!
//! let params = MiningParameters::derive(&PricingInputs::default()).unwrap();
//! let package = LicencePackage::configure(LicenceTier::Platinum, &params)
//!     .with_card_count(10)
//!     .unwrap();
//! let (licence, price) = package.build().unwrap();
//! assert_eq!(licence.cards().len(), 10);
//! assert_eq!(price, *params.platinum().licence_cost() + *params.card_cost() * Decimal::from(10));
//! ```

use crate::{
    error::{Error, Result},
    models::{
        card::MiningCard,
        licence::Licence,
    },
    system::pricing::MiningParameters,
};
use getset::{Getters, CopyGetters};
use log::debug;
use rust_decimal::prelude::*;
#[cfg(feature = "with_serde")]
use serde::{Serialize, Deserialize};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// The licence tiers on offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with_serde", derive(Serialize, Deserialize))]
pub enum LicenceTier {
    Prime,
    Platinum,
}

impl LicenceTier {
    /// Every tier, in catalogue order.
    pub fn all() -> &'static [LicenceTier] {
        &[LicenceTier::Prime, LicenceTier::Platinum]
    }

    pub fn name(&self) -> &'static str {
        match self {
            LicenceTier::Prime => "PRIME",
            LicenceTier::Platinum => "PLATINUM",
        }
    }
}

impl fmt::Display for LicenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for LicenceTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prime" => Ok(LicenceTier::Prime),
            "platinum" => Ok(LicenceTier::Platinum),
            _ => Err(Error::UnknownTier(s.into())),
        }
    }
}

impl TryFrom<u8> for LicenceTier {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(LicenceTier::Prime),
            2 => Ok(LicenceTier::Platinum),
            _ => Err(Error::UnknownTier(code.to_string())),
        }
    }
}

/// A licence package configuration: a tier and how many cards ship with it.
#[derive(Clone, Debug, PartialEq, Getters, CopyGetters)]
pub struct LicencePackage {
    #[getset(get_copy = "pub")]
    tier: LicenceTier,
    #[getset(get_copy = "pub")]
    num_cards: usize,
    /// Price of the licence alone
    #[getset(get = "pub")]
    licence_cost: Decimal,
    /// How many cards the tier holds
    #[getset(get_copy = "pub")]
    max_cards: usize,
    /// Price of the initial batch of cards
    #[getset(get = "pub")]
    cards_cost: Decimal,
    params: MiningParameters,
}

impl LicencePackage {
    /// Start a package for the given tier, with no cards.
    pub fn configure(tier: LicenceTier, params: &MiningParameters) -> Self {
        let tier_params = params.tier(tier);
        Self {
            tier,
            num_cards: 0,
            licence_cost: tier_params.licence_cost().clone(),
            max_cards: tier_params.max_cards(),
            cards_cost: Decimal::zero(),
            params: params.clone(),
        }
    }

    /// Set how many cards come with the licence. Fails if the tier can't hold
    /// that many.
    pub fn with_card_count(self, num_cards: usize) -> Result<Self> {
        if num_cards > self.max_cards {
            Err(Error::CapacityExceeded {
                tier: self.tier.to_string(),
                requested: num_cards,
                max: self.max_cards,
            })?;
        }
        let cards_cost = self.params.card_cost().clone() * Decimal::from(num_cards);
        Ok(Self {
            num_cards,
            cards_cost,
            ..self
        })
    }

    /// What the whole package costs: licence plus cards.
    pub fn price(&self) -> Decimal {
        self.licence_cost + self.cards_cost
    }

    /// Build a new licence, loaded with fresh reserved cards, and return it
    /// along with the package price.
    pub fn build(&self) -> Result<(Licence, Decimal)> {
        let mut licence = Licence::new(
            self.licence_cost,
            self.max_cards,
            self.params.licence_validity_days(),
            self.params.card_lifetime_days(),
        );
        for _ in 0..self.num_cards {
            licence.add_card(MiningCard::new(&self.params))?;
        }
        debug!("built {} licence with {} card(s) for {}", self.tier, self.num_cards, self.price());
        Ok((licence, self.price()))
    }
}
