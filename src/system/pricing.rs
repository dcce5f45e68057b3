//! Turns a fiat-denominated price sheet into the immutable set of parameters
//! the simulation runs on.
//!
//! Everything the core needs to know about prices (licence costs, card cost,
//! yield, capacity limits, lifetimes) is decided once, here, and then threaded
//! into the models as a `MiningParameters` value. Nothing downstream reaches
//! for a global.

use crate::{
    error::{Error, Result},
    models::package::LicenceTier,
    util::number::round_currency,
};
use getset::{Getters, CopyGetters};
use log::debug;
use rust_decimal::prelude::*;
#[cfg(feature = "with_serde")]
use serde::{Serialize, Deserialize};

/// The fiat price sheet. Licence prices and the card cost formula are in fiat,
/// the card yield is in the mined currency.
#[derive(Clone, Debug, PartialEq, Getters, derive_builder::Builder)]
#[cfg_attr(feature = "with_serde", derive(Serialize, Deserialize))]
#[builder(pattern = "owned", setter(into), default)]
#[getset(get = "pub")]
pub struct PricingInputs {
    /// Fiat price of one unit of the mined currency
    currency_price: Decimal,
    /// Fiat price of a PRIME licence
    prime_licence_price: Decimal,
    /// How many cards a PRIME licence holds
    prime_max_cards: usize,
    /// Fiat price of a PLATINUM licence
    platinum_licence_price: Decimal,
    /// How many cards a PLATINUM licence holds
    platinum_max_cards: usize,
    /// Fixed part of the card's fiat cost
    card_cost_base: Decimal,
    /// Part of the card's fiat cost that scales with the currency price
    card_cost_per_price: Decimal,
    /// Currency a single active card mines per day
    card_daily_yield: Decimal,
    /// Profit (in percent of the card cost) after which a card stops mining
    card_profit_threshold: Decimal,
    /// Days a card stays reserved before it starts mining
    card_reserve_days: u32,
    /// Days a licence is valid for
    licence_validity_days: u32,
}

impl Default for PricingInputs {
    fn default() -> Self {
        Self {
            currency_price: num!(91000),
            prime_licence_price: num!(1200),
            prime_max_cards: 50,
            platinum_licence_price: num!(1000),
            platinum_max_cards: 30,
            card_cost_base: num!(-1976),
            card_cost_per_price: num!(0.026),
            card_daily_yield: num!(0.0000245),
            card_profit_threshold: num!(14),
            card_reserve_days: 1,
            licence_validity_days: 365,
        }
    }
}

impl PricingInputs {
    pub fn builder() -> PricingInputsBuilder {
        PricingInputsBuilder::default()
    }

    /// The price sheet with everything at its defaults except the currency
    /// price.
    pub fn with_price<T: Into<Decimal>>(currency_price: T) -> Self {
        Self {
            currency_price: currency_price.into(),
            ..Self::default()
        }
    }
}

/// Price and capacity of a single licence tier, in currency units.
#[derive(Clone, Debug, PartialEq, Getters, CopyGetters)]
#[cfg_attr(feature = "with_serde", derive(Serialize, Deserialize))]
pub struct TierParameters {
    #[getset(get = "pub")]
    licence_cost: Decimal,
    #[getset(get_copy = "pub")]
    max_cards: usize,
}

impl TierParameters {
    pub fn new<T: Into<Decimal>>(licence_cost: T, max_cards: usize) -> Self {
        Self {
            licence_cost: licence_cost.into(),
            max_cards,
        }
    }
}

/// The immutable economics of a run, all amounts in currency units.
#[derive(Clone, Debug, PartialEq, Getters, CopyGetters, derive_builder::Builder)]
#[cfg_attr(feature = "with_serde", derive(Serialize, Deserialize))]
#[builder(pattern = "owned", setter(into))]
pub struct MiningParameters {
    /// Fiat price of one currency unit, only used for reporting
    #[getset(get = "pub")]
    currency_price: Decimal,
    #[getset(get = "pub")]
    prime: TierParameters,
    #[getset(get = "pub")]
    platinum: TierParameters,
    /// What a single card costs
    #[getset(get = "pub")]
    card_cost: Decimal,
    /// How much an active card mines per day
    #[getset(get = "pub")]
    card_daily_yield: Decimal,
    /// Percent of profit over cost at which a card deactivates
    #[getset(get = "pub")]
    card_profit_threshold: Decimal,
    /// Days a card needs to mine back its cost
    #[getset(get_copy = "pub")]
    card_lifetime_days: u32,
    /// Days a fresh card stays reserved
    #[builder(default = "1")]
    #[getset(get_copy = "pub")]
    card_reserve_days: u32,
    /// Days a fresh licence stays valid
    #[builder(default = "365")]
    #[getset(get_copy = "pub")]
    licence_validity_days: u32,
}

impl MiningParameters {
    pub fn builder() -> MiningParametersBuilder {
        MiningParametersBuilder::default()
    }

    /// Convert a fiat price sheet into currency-denominated parameters.
    pub fn derive(inputs: &PricingInputs) -> Result<Self> {
        let price = inputs.currency_price().clone();
        if price <= Decimal::zero() {
            Err(Error::InvalidParameter("currency price must be positive".into()))?;
        }
        let to_currency = |fiat: &Decimal| round_currency(fiat.clone() / price);
        let card_fiat_cost = inputs.card_cost_base().clone() + inputs.card_cost_per_price().clone() * price;
        let card_cost = to_currency(&card_fiat_cost);
        let card_daily_yield = inputs.card_daily_yield().clone();
        let params = Self::builder()
            .currency_price(price)
            .prime(TierParameters::new(to_currency(inputs.prime_licence_price()), inputs.prime_max_cards().clone()))
            .platinum(TierParameters::new(to_currency(inputs.platinum_licence_price()), inputs.platinum_max_cards().clone()))
            .card_cost(card_cost)
            .card_daily_yield(card_daily_yield)
            .card_profit_threshold(inputs.card_profit_threshold().clone())
            .card_lifetime_days(Self::mining_lifetime(card_cost, card_daily_yield)?)
            .card_reserve_days(inputs.card_reserve_days().clone())
            .licence_validity_days(inputs.licence_validity_days().clone())
            .build()
            .map_err(|e| Error::BuilderFailed(e))?;
        params.validate()?;
        debug!("derived mining parameters at price {}: card cost {}, card lifetime {} days", price, params.card_cost(), params.card_lifetime_days());
        Ok(params)
    }

    /// Days a card mining `daily_yield` needs to earn back `card_cost`,
    /// rounded up to whole days.
    pub fn mining_lifetime(card_cost: Decimal, daily_yield: Decimal) -> Result<u32> {
        if daily_yield <= Decimal::zero() {
            Err(Error::InvalidParameter("card daily yield must be positive".into()))?;
        }
        (card_cost / daily_yield).ceil().to_u32()
            .ok_or_else(|| Error::InvalidParameter(format!("card lifetime out of range for cost {}", card_cost)))
    }

    /// Make sure nothing in here would stall or break the allocation loops.
    pub fn validate(&self) -> Result<()> {
        if self.currency_price <= Decimal::zero() {
            Err(Error::InvalidParameter("currency price must be positive".into()))?;
        }
        if self.card_cost <= Decimal::zero() {
            Err(Error::InvalidParameter(format!("card cost must be positive (got {})", self.card_cost)))?;
        }
        if self.card_daily_yield <= Decimal::zero() {
            Err(Error::InvalidParameter("card daily yield must be positive".into()))?;
        }
        if self.card_profit_threshold < Decimal::zero() {
            Err(Error::InvalidParameter("card profit threshold cannot be negative".into()))?;
        }
        if self.licence_validity_days == 0 {
            Err(Error::InvalidParameter("licences must be valid for at least one day".into()))?;
        }
        if self.card_lifetime_days >= self.licence_validity_days {
            Err(Error::InvalidParameter(format!(
                "cards need {} days to pay off but licences are only valid for {} days",
                self.card_lifetime_days,
                self.licence_validity_days,
            )))?;
        }
        for tier in LicenceTier::all() {
            if self.tier(*tier).licence_cost() <= &Decimal::zero() {
                Err(Error::InvalidParameter(format!("{} licence cost must be positive", tier)))?;
            }
        }
        Ok(())
    }

    /// Grab the price/capacity for a licence tier.
    pub fn tier(&self, tier: LicenceTier) -> &TierParameters {
        match tier {
            LicenceTier::Prime => &self.prime,
            LicenceTier::Platinum => &self.platinum,
        }
    }

    /// What an amount of currency is worth in fiat.
    pub fn to_fiat(&self, amount: Decimal) -> Decimal {
        amount * self.currency_price
    }
}
