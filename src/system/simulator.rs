//! The day loop. Each simulated day the user mines, then (while enough of the
//! run is left for a new licence to be worthwhile) buys whole packages, then
//! tops up individual cards. That order is fixed: all mining for the day is
//! collected before any money is spent, and packages are bought before cards.

use crate::{
    error::{Error, Result},
    models::{
        package::LicenceTier,
        user::User,
    },
    util::metrics::compound_annual_growth_rate,
};
use getset::{Getters, CopyGetters};
use log::info;
use rust_decimal::prelude::*;
#[cfg(feature = "with_serde")]
use serde::{Serialize, Deserialize};

/// How a simulation run reinvests.
#[derive(Clone, Debug, PartialEq, CopyGetters, derive_builder::Builder)]
#[cfg_attr(feature = "with_serde", derive(Serialize, Deserialize))]
#[builder(pattern = "owned", setter(into))]
#[getset(get_copy = "pub")]
pub struct SimulationConfig {
    /// How many days to run for
    days: u32,
    /// Which tier to buy when reinvesting in whole packages
    #[builder(default = "LicenceTier::Platinum")]
    reinvest_tier: LicenceTier,
    /// How many cards each reinvested package ships with
    #[builder(default = "10")]
    reinvest_cards: usize,
    /// Packages are only bought while at least this many days of the run are
    /// left
    #[builder(default = "365")]
    licence_purchase_cutoff: u32,
}

impl SimulationConfig {
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Whether whole packages may be bought on `day` (1-based).
    pub fn can_buy_licences_on(&self, day: u32) -> bool {
        match self.days.checked_sub(self.licence_purchase_cutoff) {
            Some(last_day) => day <= last_day,
            None => false,
        }
    }
}

/// What happened on one simulated day.
#[derive(Clone, Debug, PartialEq, Getters, CopyGetters)]
#[cfg_attr(feature = "with_serde", derive(Serialize, Deserialize))]
pub struct DayReport {
    #[getset(get_copy = "pub")]
    day: u32,
    /// Currency mined today
    #[getset(get = "pub")]
    mined: Decimal,
    /// Balance after today's spending
    #[getset(get = "pub")]
    balance: Decimal,
    /// Fiat value of `balance`
    #[getset(get = "pub")]
    balance_value: Decimal,
    #[getset(get_copy = "pub")]
    licences_bought: usize,
    #[getset(get_copy = "pub")]
    cards_added: usize,
    /// Licences held at the end of the day
    #[getset(get_copy = "pub")]
    licences_held: usize,
    /// Cards held at the end of the day
    #[getset(get_copy = "pub")]
    cards_held: usize,
}

/// The outcome of a full run.
#[derive(Clone, Debug, PartialEq, Getters)]
#[cfg_attr(feature = "with_serde", derive(Serialize, Deserialize))]
#[getset(get = "pub")]
pub struct SimulationReport {
    days: Vec<DayReport>,
    /// The user's balance at the end of the run
    final_balance: Decimal,
}

impl SimulationReport {
    /// Annualized growth of the final balance over `invested`, counting a
    /// year as 365 days.
    pub fn growth_rate(&self, invested: Decimal) -> Result<Decimal> {
        let years = Decimal::from(self.days.len()) / num!(365);
        compound_annual_growth_rate(invested, self.final_balance, years)
    }
}

/// Runs a user through a number of days.
#[derive(Clone, Debug, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Run the simulation, mutating the user as it goes.
    pub fn run(&self, user: &mut User) -> Result<SimulationReport> {
        if self.config.days() == 0 {
            Err(Error::InvalidParameter("simulation needs at least one day".into()))?;
        }
        let mut days = Vec::with_capacity(self.config.days() as usize);
        for day in 1..=self.config.days() {
            let report = self.run_day(user, day)?;
            info!(
                "day: {}, balance value: {:.2}, licences bought: {}, cards added: {}",
                report.day(),
                report.balance_value(),
                report.licences_bought(),
                report.cards_added(),
            );
            days.push(report);
        }
        Ok(SimulationReport {
            days,
            final_balance: user.balance().clone(),
        })
    }

    fn run_day(&self, user: &mut User, day: u32) -> Result<DayReport> {
        let mined = user.mine_for_day()?;
        let licences_bought = if self.config.can_buy_licences_on(day) {
            user.add_new_licence_with_cards(self.config.reinvest_tier(), self.config.reinvest_cards())?
        } else {
            0
        };
        let cards_added = user.add_new_cards()?;
        let balance = user.balance().clone();
        Ok(DayReport {
            day,
            mined,
            balance,
            balance_value: user.params().to_fiat(balance),
            licences_bought,
            cards_added,
            licences_held: user.licences().len(),
            cards_held: user.num_cards(),
        })
    }
}
