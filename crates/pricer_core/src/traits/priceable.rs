//! The pricing capability.

use crate::contract::Contract;
use crate::types::error::PricingError;
use crate::types::time::DEFAULT_MIN_TIME_TO_EXPIRY;

/// Anything that can produce a present value for a [`Contract`].
///
/// Implementations must be pure with respect to shared state: repeated calls
/// with the same contract return the same value, and calls from several
/// threads need no locking. Stochastic implementations satisfy this by seeding
/// their random source per call.
///
/// # Examples
/// ```
/// use pricer_core::contract::{Contract, OptionKind};
/// use pricer_core::traits::PricingFunction;
/// use pricer_core::types::PricingError;
///
/// struct Intrinsic;
///
/// impl PricingFunction for Intrinsic {
///     fn price(&self, contract: &Contract) -> Result<f64, PricingError> {
///         Ok(contract.intrinsic_value())
///     }
/// }
///
/// let contract = Contract::builder()
///     .kind(OptionKind::Call)
///     .strike(90.0)
///     .spot(100.0)
///     .volatility(0.2)
///     .expiry_in_years(1.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(Intrinsic.price(&contract).unwrap(), 10.0);
/// ```
pub trait PricingFunction: Sync {
    /// Present value of `contract`.
    fn price(&self, contract: &Contract) -> Result<f64, PricingError>;

    /// Time to expiry (years) below which this pricer falls back to
    /// intrinsic value.
    fn min_time_to_expiry(&self) -> f64 {
        DEFAULT_MIN_TIME_TO_EXPIRY
    }
}

impl<P: PricingFunction + ?Sized> PricingFunction for &P {
    fn price(&self, contract: &Contract) -> Result<f64, PricingError> {
        (**self).price(contract)
    }

    fn min_time_to_expiry(&self) -> f64 {
        (**self).min_time_to_expiry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::OptionKind;

    struct Constant(f64);

    impl PricingFunction for Constant {
        fn price(&self, _contract: &Contract) -> Result<f64, PricingError> {
            Ok(self.0)
        }
    }

    fn contract() -> Contract {
        Contract::builder()
            .kind(OptionKind::Put)
            .strike(100.0)
            .spot(100.0)
            .volatility(0.2)
            .expiry_in_years(1.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_pricing_function_is_pure() {
        let pricer = Constant(4.2);
        let c = contract();
        assert_eq!(pricer.price(&c).unwrap(), pricer.price(&c).unwrap());
    }

    #[test]
    fn test_pricing_function_through_reference() {
        fn price_with(pricer: impl PricingFunction, contract: &Contract) -> f64 {
            pricer.price(contract).unwrap()
        }

        let pricer = Constant(1.5);
        assert_eq!(price_with(&pricer, &contract()), 1.5);
    }

    #[test]
    fn test_default_threshold_is_one_day() {
        struct Weekly;
        impl PricingFunction for Weekly {
            fn price(&self, _contract: &Contract) -> Result<f64, PricingError> {
                Ok(0.0)
            }
            fn min_time_to_expiry(&self) -> f64 {
                7.0 / 365.0
            }
        }

        fn threshold_of(pricer: impl PricingFunction) -> f64 {
            pricer.min_time_to_expiry()
        }

        assert_eq!(Constant(0.0).min_time_to_expiry(), DEFAULT_MIN_TIME_TO_EXPIRY);
        assert_eq!(threshold_of(&Weekly), 7.0 / 365.0);
    }
}
