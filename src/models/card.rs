//! A mining card is the smallest unit of the product. A fresh card sits in a
//! reserved period, then mines a fixed amount per day until it has paid back
//! its cost plus a profit margin, then deactivates for good.
//!
//! Cards don't know what day it is. Their owning [Licence] advances them once
//! per simulated day.
//!
//! [Licence]: ../licence/struct.Licence.html

use crate::{
    error::{Error, Result},
    system::pricing::MiningParameters,
};
use getset::{Getters, Setters};
use log::debug;
use rust_decimal::prelude::*;
#[cfg(feature = "with_serde")]
use serde::{Serialize, Deserialize};

/// Where a card is in its life.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "with_serde", derive(Serialize, Deserialize))]
pub enum CardState {
    /// Bought, but not mining yet
    Reserved {
        days_left: u32,
    },
    /// Mining, and tracking how much it has mined so far
    Active {
        accumulated_yield: Decimal,
    },
    /// Reached its mining target. Never mines again.
    Deactivated,
}

impl Default for CardState {
    fn default() -> Self {
        CardState::Reserved { days_left: 1 }
    }
}

/// A single mining card.
#[derive(Clone, Debug, PartialEq, Getters, Setters, derive_builder::Builder)]
#[cfg_attr(feature = "with_serde", derive(Serialize, Deserialize))]
#[builder(pattern = "owned", setter(into))]
#[getset(get = "pub", set = "pub(crate)")]
pub struct MiningCard {
    /// What the card cost to buy
    cost: Decimal,
    /// How much the card mines on an active day
    daily_yield: Decimal,
    /// Profit, in percent of `cost`, the card mines before deactivating
    profit_threshold: Decimal,
    /// The card's current lifecycle state
    #[builder(default)]
    state: CardState,
}

impl MiningCard {
    pub fn builder() -> MiningCardBuilder {
        MiningCardBuilder::default()
    }

    /// Create a freshly-bought card using the run's card economics.
    pub fn new(params: &MiningParameters) -> Self {
        Self {
            cost: params.card_cost().clone(),
            daily_yield: params.card_daily_yield().clone(),
            profit_threshold: params.card_profit_threshold().clone(),
            state: CardState::Reserved { days_left: params.card_reserve_days() },
        }
    }

    /// The total amount this card mines over its life: its cost plus the
    /// profit threshold.
    pub fn mining_target(&self) -> Decimal {
        (Decimal::one() + (self.profit_threshold / num!(100))) * self.cost
    }

    pub fn is_deactivated(&self) -> bool {
        match self.state {
            CardState::Deactivated => true,
            _ => false,
        }
    }

    /// Move the card forward by one day and return what it mined.
    ///
    /// A reserved card counts down and mines nothing, including on the day it
    /// flips to active. An active card mines its daily yield, clipped so it
    /// never passes its mining target, and deactivates once the target is hit.
    /// Asking a deactivated card to mine is an error.
    pub fn advance_one_day(&mut self) -> Result<Decimal> {
        match self.state.clone() {
            CardState::Reserved { days_left } => {
                let days_left = days_left.saturating_sub(1);
                if days_left > 0 {
                    self.set_state(CardState::Reserved { days_left });
                } else {
                    debug!("card activated, mining starts tomorrow");
                    self.set_state(CardState::Active { accumulated_yield: Decimal::zero() });
                }
                Ok(Decimal::zero())
            }
            CardState::Active { accumulated_yield } => {
                let target = self.mining_target();
                let room = std::cmp::max(Decimal::zero(), target - accumulated_yield);
                let mined_today = std::cmp::min(self.daily_yield, room);
                let accumulated_yield = accumulated_yield + mined_today;
                if accumulated_yield < target {
                    self.set_state(CardState::Active { accumulated_yield });
                } else {
                    debug!("card reached its target of {} and deactivated", target);
                    self.set_state(CardState::Deactivated);
                }
                Ok(mined_today)
            }
            CardState::Deactivated => Err(Error::InvalidStateOperation),
        }
    }
}
