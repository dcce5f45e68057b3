//! A licence is the container cards mine under. It has a fixed number of card
//! slots and a limited validity window, after which it expires (and takes its
//! cards with it).
//!
//! Each day the licence advances every card it holds, sums what they mined,
//! throws away the cards that finished their run, and counts down its own
//! validity.

use crate::{
    error::{Error, Result},
    models::card::MiningCard,
};
use getset::{Getters, Setters};
use log::debug;
use rust_decimal::prelude::*;
#[cfg(feature = "with_serde")]
use serde::{Serialize, Deserialize};

/// Whether a licence can still be used.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "with_serde", derive(Serialize, Deserialize))]
pub enum LicenceState {
    /// Usable for `days_left` more days (always > 0)
    Valid {
        days_left: u32,
    },
    /// Done. Cannot mine or take cards.
    Expired,
}

/// A licence holding a set of mining cards.
#[derive(Clone, Debug, PartialEq, Getters, Setters, derive_builder::Builder)]
#[cfg_attr(feature = "with_serde", derive(Serialize, Deserialize))]
#[builder(pattern = "owned", setter(into))]
#[getset(get = "pub", set = "pub(crate)")]
pub struct Licence {
    /// What the licence cost to buy
    cost: Decimal,
    /// The most cards this licence can hold at once
    max_cards: usize,
    /// Days a card needs to mine back its cost. A card is only accepted if
    /// the licence will outlive this.
    card_lifetime_days: u32,
    /// Current lifecycle state
    state: LicenceState,
    /// The cards on this licence, in the order they were added
    #[builder(default)]
    cards: Vec<MiningCard>,
}

impl Licence {
    pub fn builder() -> LicenceBuilder {
        LicenceBuilder::default()
    }

    /// Create a fresh, empty licence valid for `validity_days`.
    pub fn new<T: Into<Decimal>>(cost: T, max_cards: usize, validity_days: u32, card_lifetime_days: u32) -> Self {
        Self {
            cost: cost.into(),
            max_cards,
            card_lifetime_days,
            state: LicenceState::Valid { days_left: validity_days },
            cards: Vec::new(),
        }
    }

    pub fn is_expired(&self) -> bool {
        match self.state {
            LicenceState::Expired => true,
            LicenceState::Valid { .. } => false,
        }
    }

    /// How many more cards fit on this licence.
    pub fn remaining_capacity(&self) -> usize {
        self.max_cards.saturating_sub(self.cards.len())
    }

    /// Whether a new card can be added: there's a free slot, and the licence
    /// has strictly more days left than a card needs to pay for itself.
    pub fn can_accept_new_card(&self) -> bool {
        match self.state {
            LicenceState::Valid { days_left } => {
                self.cards.len() < self.max_cards && days_left > self.card_lifetime_days
            }
            LicenceState::Expired => false,
        }
    }

    /// Add a card to this licence.
    pub fn add_card(&mut self, card: MiningCard) -> Result<()> {
        if !self.can_accept_new_card() {
            Err(Error::CardNotAcceptable)?;
        }
        self.cards.push(card);
        Ok(())
    }

    /// Mine with every card for one day and return the total.
    ///
    /// Cards that hit their target today still count toward today's total,
    /// and are removed afterwards. The licence loses a day of validity, and
    /// expires when it runs out. An expired licence cannot mine.
    pub fn advance_one_day(&mut self) -> Result<Decimal> {
        let days_left = match self.state {
            LicenceState::Valid { days_left } => days_left,
            LicenceState::Expired => return Err(Error::LicenceNotMineable),
        };
        let mut mined_today = Decimal::zero();
        for card in self.cards.iter_mut() {
            mined_today += card.advance_one_day()?;
        }
        let num_cards = self.cards.len();
        self.cards.retain(|card| !card.is_deactivated());
        if self.cards.len() < num_cards {
            debug!("licence removed {} deactivated card(s)", num_cards - self.cards.len());
        }
        if days_left > 1 {
            self.set_state(LicenceState::Valid { days_left: days_left - 1 });
        } else {
            debug!("licence expired holding {} card(s)", self.cards.len());
            self.set_state(LicenceState::Expired);
        }
        Ok(mined_today)
    }
}
