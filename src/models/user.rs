//! The user is the investor. They hold a balance and a set of licences, and
//! each day they collect what their licences mined and decide how to spend it.
//!
//! Spending is greedy: whole licence packages first (while there's enough of
//! the run left for a new licence to be worth it, a call the driver makes),
//! then single cards on whichever licence has the most room.

use crate::{
    error::{Error, Result},
    models::{
        card::MiningCard,
        licence::Licence,
        package::{LicencePackage, LicenceTier},
    },
    system::pricing::MiningParameters,
};
use getset::Getters;
use log::debug;
use rust_decimal::prelude::*;
#[cfg(feature = "with_serde")]
use serde::{Serialize, Deserialize};

/// An investor holding a balance and a collection of licences.
#[derive(Clone, Debug, PartialEq, Getters)]
#[cfg_attr(feature = "with_serde", derive(Serialize, Deserialize))]
#[getset(get = "pub")]
pub struct User {
    /// The run's economics, used when buying anything new
    params: MiningParameters,
    /// How much currency the user is holding. Never negative.
    balance: Decimal,
    /// The user's licences, in the order they were acquired
    licences: Vec<Licence>,
}

impl User {
    /// Create a user with a starting balance and no licences.
    pub fn new<T: Into<Decimal>>(params: MiningParameters, balance: T) -> Result<Self> {
        let balance = balance.into();
        if balance < Decimal::zero() {
            Err(Error::InvalidParameter("starting balance cannot be negative".into()))?;
        }
        params.validate()?;
        Ok(Self {
            params,
            balance,
            licences: Vec::new(),
        })
    }

    /// Hand the user a licence bought outside of the daily reinvestment (ie
    /// their initial purchase).
    pub fn add_licence(&mut self, licence: Licence) {
        self.licences.push(licence);
    }

    /// How many cards the user holds across all licences.
    pub fn num_cards(&self) -> usize {
        self.licences.iter().map(|l| l.cards().len()).sum()
    }

    /// Collect one day of mining from every licence, then drop any licence
    /// that expired. A licence's last day of mining is still collected.
    /// Returns what was mined.
    pub fn mine_for_day(&mut self) -> Result<Decimal> {
        let mut mined_today = Decimal::zero();
        for licence in self.licences.iter_mut() {
            let mined = licence.advance_one_day()?;
            self.balance += mined;
            mined_today += mined;
        }
        let num_licences = self.licences.len();
        self.licences.retain(|licence| !licence.is_expired());
        if self.licences.len() < num_licences {
            debug!("{} licence(s) expired", num_licences - self.licences.len());
        }
        Ok(mined_today)
    }

    /// Buy as many `tier` packages with `num_cards` cards each as the balance
    /// allows. Every purchase is a brand new licence. Returns how many were
    /// bought.
    pub fn add_new_licence_with_cards(&mut self, tier: LicenceTier, num_cards: usize) -> Result<usize> {
        let package = LicencePackage::configure(tier, &self.params).with_card_count(num_cards)?;
        if package.price() <= Decimal::zero() {
            Err(Error::InvalidParameter(format!("{} package must have a positive price", tier)))?;
        }
        let (mut licence, mut price) = package.build()?;
        let mut num_bought = 0;
        while self.balance >= price {
            self.balance -= price;
            self.licences.push(licence);
            num_bought += 1;
            let (next_licence, next_price) = package.build()?;
            licence = next_licence;
            price = next_price;
        }
        if num_bought > 0 {
            debug!("bought {} {} package(s), balance now {}", num_bought, tier, self.balance);
        }
        Ok(num_bought)
    }

    /// Spend the balance on single cards. Each card goes to the eligible
    /// licence with the most free slots; on a tie, the licence acquired
    /// earliest wins. Stops when the balance can't cover a card or no licence
    /// can take one. Returns how many cards were added.
    pub fn add_new_cards(&mut self) -> Result<usize> {
        let card_cost = self.params.card_cost().clone();
        let mut num_added = 0;
        while self.balance >= card_cost {
            let idx = match self.best_licence_for_card() {
                Some(idx) => idx,
                None => break,
            };
            self.licences[idx].add_card(MiningCard::new(&self.params))?;
            self.balance -= card_cost;
            num_added += 1;
        }
        if num_added > 0 {
            debug!("added {} card(s), balance now {}", num_added, self.balance);
        }
        Ok(num_added)
    }

    /// Find the index of the licence a new card should go on, if any.
    fn best_licence_for_card(&self) -> Option<usize> {
        self.licences.iter()
            .enumerate()
            .filter(|(_, licence)| licence.can_accept_new_card())
            .max_by(|(idx_a, a), (idx_b, b)| {
                a.remaining_capacity().cmp(&b.remaining_capacity())
                    // prefer the earlier licence when capacity ties
                    .then(idx_b.cmp(idx_a))
            })
            .map(|(idx, _)| idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{
            card::CardState,
            licence::LicenceState,
        },
        util::test::*,
    };
    use rust_decimal_macros::*;

    fn make_user(licences: Vec<Licence>, balance: Decimal) -> User {
        let mut user = User::new(test_parameters(), balance).unwrap();
        for licence in licences {
            user.add_licence(licence);
        }
        user
    }

    fn licence_with_cards(max_cards: usize, num_cards: usize) -> Licence {
        let mut licence = make_licence(max_cards, LicenceState::Valid { days_left: 365 });
        for _ in 0..num_cards {
            licence.add_card(default_card()).unwrap();
        }
        licence
    }

    fn licence_with_active_card(state: LicenceState) -> Licence {
        let mut licence = make_licence(2, state);
        licence.set_card_lifetime_days(0);
        let mut card = default_card();
        card.set_state(active(dec!(0)));
        licence.add_card(card).unwrap();
        licence
    }

    #[test]
    fn rejects_negative_balance() {
        let res = User::new(test_parameters(), dec!(-1));
        assert!(matches!(res, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn mine_for_day_mines_all_licences() {
        let params = test_parameters();
        let mut user = make_user(vec![
            licence_with_active_card(LicenceState::Valid { days_left: 365 }),
            licence_with_active_card(LicenceState::Valid { days_left: 365 }),
        ], dec!(1));
        let mined = user.mine_for_day().unwrap();
        assert_eq!(mined, params.card_daily_yield().clone() * dec!(2));
        assert_eq!(user.balance(), &(dec!(1) + params.card_daily_yield().clone() * dec!(2)));
        assert_eq!(user.licences().len(), 2);
    }

    #[test]
    fn mine_for_day_removes_expired_licences() {
        let params = test_parameters();
        let mut user = make_user(vec![
            licence_with_active_card(LicenceState::Valid { days_left: 1 }),
            licence_with_active_card(LicenceState::Valid { days_left: 5 }),
        ], dec!(0));
        user.mine_for_day().unwrap();
        // the expiring licence still mined its last day
        assert_eq!(user.balance(), &(params.card_daily_yield().clone() * dec!(2)));
        assert_eq!(user.licences().len(), 1);
        assert_eq!(user.licences()[0].state(), &LicenceState::Valid { days_left: 4 });
    }

    #[test]
    fn mine_for_day_surfaces_licence_errors() {
        let mut user = make_user(vec![make_licence(2, LicenceState::Expired)], dec!(0));
        assert_eq!(user.mine_for_day(), Err(Error::LicenceNotMineable));
    }

    #[test]
    fn mine_for_day_keeps_yield_of_licences_before_an_error() {
        let params = test_parameters();
        let mut user = make_user(vec![
            licence_with_active_card(LicenceState::Valid { days_left: 5 }),
            make_licence(2, LicenceState::Expired),
        ], dec!(0));
        assert_eq!(user.mine_for_day(), Err(Error::LicenceNotMineable));
        // the first licence advanced, so its yield is on the balance
        assert_eq!(user.licences()[0].state(), &LicenceState::Valid { days_left: 4 });
        assert_eq!(user.balance(), params.card_daily_yield());
    }

    #[test]
    fn add_new_licence_with_cards() {
        let params = test_parameters();
        let package_price = params.platinum().licence_cost().clone() + params.card_cost().clone() * dec!(10);
        let leftover = params.card_daily_yield().clone();
        let mut user = make_user(vec![licence_with_cards(5, 0), licence_with_cards(5, 0)], package_price + leftover);

        let bought = user.add_new_licence_with_cards(LicenceTier::Platinum, 10).unwrap();
        assert_eq!(bought, 1);
        assert_eq!(user.licences().len(), 3);
        assert_eq!(user.balance(), &leftover);

        let new_licence = &user.licences()[2];
        assert_eq!(new_licence.cards().len(), 10);
        assert_eq!(new_licence.max_cards(), &params.platinum().max_cards());
        assert!(new_licence.cards().iter().all(|c| c.state() == &CardState::Reserved { days_left: 1 }));
    }

    #[test]
    fn buys_as_many_packages_as_it_can() {
        let params = test_parameters();
        let package_price = params.prime().licence_cost().clone() + params.card_cost().clone() * dec!(2);
        let mut user = make_user(vec![], package_price * dec!(3.5));
        let bought = user.add_new_licence_with_cards(LicenceTier::Prime, 2).unwrap();
        assert_eq!(bought, 3);
        assert_eq!(user.licences().len(), 3);
        assert_eq!(user.balance(), &(package_price * dec!(0.5)));
        assert_eq!(user.num_cards(), 6);

        // each purchase is its own licence
        let mut first = user.licences()[0].clone();
        first.advance_one_day().unwrap();
        assert_ne!(&first, &user.licences()[1]);
    }

    #[test]
    fn cannot_afford_a_package() {
        let params = test_parameters();
        let mut user = make_user(vec![], params.prime().licence_cost().clone());
        let bought = user.add_new_licence_with_cards(LicenceTier::Prime, 1).unwrap();
        assert_eq!(bought, 0);
        assert_eq!(user.licences().len(), 0);
        assert_eq!(user.balance(), params.prime().licence_cost());
    }

    #[test]
    fn package_capacity_is_checked() {
        let params = test_parameters();
        let mut user = make_user(vec![], dec!(1000));
        let res = user.add_new_licence_with_cards(LicenceTier::Platinum, params.platinum().max_cards() + 1);
        assert!(matches!(res, Err(Error::CapacityExceeded { .. })));
        assert_eq!(user.balance(), &dec!(1000));
    }

    #[test]
    fn add_new_cards() {
        let params = test_parameters();
        let card_cost = params.card_cost().clone();
        let mut user = make_user(vec![licence_with_cards(5, 0)], card_cost * dec!(2.5));
        let added = user.add_new_cards().unwrap();
        assert_eq!(added, 2);
        assert_eq!(user.licences()[0].cards().len(), 2);
        assert_eq!(user.balance(), &(card_cost * dec!(0.5)));
    }

    #[test]
    fn chooses_licence_with_most_remaining_capacity() {
        let params = test_parameters();
        // remaining capacity 4 and 8
        let mut user = make_user(vec![licence_with_cards(5, 1), licence_with_cards(10, 2)], params.card_cost().clone() * dec!(2));
        let added = user.add_new_cards().unwrap();
        assert_eq!(added, 2);
        assert_eq!(user.licences()[0].cards().len(), 1);
        assert_eq!(user.licences()[1].cards().len(), 4);
        assert_eq!(user.balance(), &dec!(0));
    }

    #[test]
    fn ties_go_to_the_earliest_licence() {
        let params = test_parameters();
        let mut user = make_user(vec![licence_with_cards(4, 0), licence_with_cards(4, 0)], params.card_cost().clone() * dec!(3));
        let added = user.add_new_cards().unwrap();
        assert_eq!(added, 3);
        // first card ties (4 vs 4) -> first licence, then second licence has
        // more room, then they tie again (3 vs 3) -> first licence
        assert_eq!(user.licences()[0].cards().len(), 2);
        assert_eq!(user.licences()[1].cards().len(), 1);
    }

    #[test]
    fn stops_when_no_licence_can_take_cards() {
        let params = test_parameters();
        let card_cost = params.card_cost().clone();
        let mut user = make_user(vec![licence_with_cards(2, 1), licence_with_cards(3, 2)], card_cost * dec!(3));
        let added = user.add_new_cards().unwrap();
        assert_eq!(added, 2);
        assert_eq!(user.balance(), &card_cost);
        assert!(user.licences().iter().all(|l| l.remaining_capacity() == 0));
    }

    #[test]
    fn skips_licences_close_to_expiry() {
        let params = test_parameters();
        let mut near_expiry = make_licence(10, LicenceState::Valid { days_left: 30 });
        near_expiry.set_card_lifetime_days(params.card_lifetime_days());
        let mut user = make_user(vec![near_expiry, licence_with_cards(3, 0)], params.card_cost().clone() * dec!(5));
        let added = user.add_new_cards().unwrap();
        assert_eq!(added, 3);
        assert_eq!(user.licences()[0].cards().len(), 0);
        assert_eq!(user.licences()[1].cards().len(), 3);
        assert_eq!(user.balance(), &(params.card_cost().clone() * dec!(2)));
    }
}
