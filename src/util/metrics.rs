//! Growth metrics used to summarize a finished simulation.

use crate::error::{Error, Result};
use rust_decimal::{prelude::*, MathematicalOps};

/// Annualized growth from `beginning` to `ending` over `years` years, ie
/// `(ending / beginning) ^ (1 / years) - 1`.
pub fn compound_annual_growth_rate(beginning: Decimal, ending: Decimal, years: Decimal) -> Result<Decimal> {
    if beginning <= Decimal::zero() {
        Err(Error::InvalidParameter("growth rate needs a positive beginning value".into()))?;
    }
    if ending < Decimal::zero() {
        Err(Error::InvalidParameter("growth rate needs a non-negative ending value".into()))?;
    }
    if years <= Decimal::zero() {
        Err(Error::InvalidParameter("growth rate needs a positive number of years".into()))?;
    }
    if ending.is_zero() {
        return Ok(-Decimal::one());
    }
    let ratio = ending / beginning;
    let exponent = Decimal::one() / years;
    let growth = ratio.checked_powd(exponent)
        .ok_or_else(|| Error::InvalidParameter("growth rate overflowed".into()))?;
    Ok(growth - Decimal::one())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::*;

    fn close(a: Decimal, b: Decimal) -> bool {
        (a - b).abs() < dec!(0.000001)
    }

    #[test]
    fn doubling_in_a_year() {
        let cagr = compound_annual_growth_rate(dec!(100), dec!(200), dec!(1)).unwrap();
        assert!(close(cagr, dec!(1)), "{}", cagr);
    }

    #[test]
    fn quadrupling_in_two_years() {
        let cagr = compound_annual_growth_rate(dec!(100), dec!(400), dec!(2)).unwrap();
        assert!(close(cagr, dec!(1)), "{}", cagr);
    }

    #[test]
    fn losses_are_negative() {
        let cagr = compound_annual_growth_rate(dec!(100), dec!(50), dec!(1)).unwrap();
        assert!(close(cagr, dec!(-0.5)), "{}", cagr);
        let cagr = compound_annual_growth_rate(dec!(100), dec!(0), dec!(1)).unwrap();
        assert_eq!(cagr, dec!(-1));
    }

    #[test]
    fn rejects_bad_inputs() {
        let res = compound_annual_growth_rate(dec!(0), dec!(10), dec!(1));
        assert!(matches!(res, Err(Error::InvalidParameter(_))));
        let res = compound_annual_growth_rate(dec!(10), dec!(-1), dec!(1));
        assert!(matches!(res, Err(Error::InvalidParameter(_))));
        let res = compound_annual_growth_rate(dec!(10), dec!(20), dec!(0));
        assert!(matches!(res, Err(Error::InvalidParameter(_))));
    }
}
