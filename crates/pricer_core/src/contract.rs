//! Immutable option contract model.
//!
//! A [`Contract`] bundles the static terms of a single option (underlying,
//! strike, expiration, kind) with the market state needed to price it (spot,
//! rate, volatility, dividend yield). Contracts validate on construction and
//! are never mutated; bumped scenarios are new contracts built with the
//! `with_*` methods.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::types::error::ValidationError;
use crate::types::time::{add_years, year_fraction};

/// Option payoff direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum OptionKind {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionKind {
    /// Returns `true` for a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionKind::Call)
    }

    /// Payoff of the option against a reference price `underlying`.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::contract::OptionKind;
    ///
    /// assert_eq!(OptionKind::Call.payoff(110.0, 100.0), 10.0);
    /// assert_eq!(OptionKind::Put.payoff(110.0, 100.0), 0.0);
    /// ```
    #[inline]
    pub fn payoff(&self, underlying: f64, strike: f64) -> f64 {
        match self {
            OptionKind::Call => (underlying - strike).max(0.0),
            OptionKind::Put => (strike - underlying).max(0.0),
        }
    }

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKind::Call => "call",
            OptionKind::Put => "put",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OptionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionKind::Call),
            "put" | "p" => Ok(OptionKind::Put),
            _ => Err(ValidationError::InvalidOptionKind(s.to_string())),
        }
    }
}

/// A single option contract plus the market state used to price it.
///
/// Time to expiration is never stored: it is measured from the valuation
/// instant (pinned, or `Utc::now()` at query time) to the expiration instant.
///
/// # Invariants
/// - `strike > 0`, `spot > 0`, `volatility >= 0`
/// - All numeric fields are finite
/// - Expiration is not before the valuation instant at construction
///
/// # Examples
/// ```
/// use pricer_core::contract::{Contract, OptionKind};
///
/// let contract = Contract::builder()
///     .underlying("SPY")
///     .kind(OptionKind::Put)
///     .strike(100.0)
///     .spot(105.0)
///     .rate(0.03)
///     .volatility(0.2)
///     .expiry_in_years(0.5)
///     .build()
///     .unwrap();
///
/// assert_eq!(contract.intrinsic_value(), 0.0);
/// assert!(contract.with_spot(-1.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Contract {
    underlying: String,
    kind: OptionKind,
    strike: f64,
    spot: f64,
    rate: f64,
    volatility: f64,
    dividend_yield: f64,
    expiration: DateTime<Utc>,
    valuation_time: Option<DateTime<Utc>>,
}

impl Contract {
    /// Starts a new [`ContractBuilder`].
    pub fn builder() -> ContractBuilder {
        ContractBuilder::default()
    }

    /// Underlying identifier. Opaque to the pricing engines.
    #[inline]
    pub fn underlying(&self) -> &str {
        &self.underlying
    }

    /// Call or put.
    #[inline]
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Current spot price of the underlying.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Continuously-compounded risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Annualised volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Continuous dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Expiration instant.
    #[inline]
    pub fn expiration(&self) -> DateTime<Utc> {
        self.expiration
    }

    /// Pinned valuation instant, if any.
    #[inline]
    pub fn valuation_time(&self) -> Option<DateTime<Utc>> {
        self.valuation_time
    }

    /// Time to expiration in years (ACT/365 Fixed), recomputed on every call.
    ///
    /// Returns 0 once the expiration has passed.
    pub fn time_to_expiration(&self) -> f64 {
        let valuation = self.valuation_time.unwrap_or_else(Utc::now);
        year_fraction(valuation, self.expiration).max(0.0)
    }

    /// `true` if exercising now would pay a positive amount.
    pub fn is_in_the_money(&self) -> bool {
        match self.kind {
            OptionKind::Call => self.spot > self.strike,
            OptionKind::Put => self.spot < self.strike,
        }
    }

    /// Value of immediate exercise, `max(S-K,0)` or `max(K-S,0)`.
    #[inline]
    pub fn intrinsic_value(&self) -> f64 {
        self.kind.payoff(self.spot, self.strike)
    }

    /// Spot over strike.
    #[inline]
    pub fn moneyness(&self) -> f64 {
        self.spot / self.strike
    }

    /// Copy of this contract with the valuation clock frozen.
    ///
    /// An un-pinned contract is pinned to `Utc::now()`; a pinned contract is
    /// returned unchanged. Repeated revaluations of the result see the same
    /// time to expiration.
    pub fn pinned(&self) -> Self {
        self.pinned_at(Utc::now())
    }

    /// Like [`pinned`](Self::pinned), but an un-pinned contract is valued at
    /// `instant`. Pinning a batch at one instant values it consistently.
    pub fn pinned_at(&self, instant: DateTime<Utc>) -> Self {
        let mut pinned = self.clone();
        if pinned.valuation_time.is_none() {
            pinned.valuation_time = Some(instant);
        }
        pinned
    }

    /// Copy with a different spot.
    pub fn with_spot(&self, spot: f64) -> Result<Self, ValidationError> {
        let mut bumped = self.clone();
        bumped.spot = spot;
        bumped.validate()?;
        Ok(bumped)
    }

    /// Copy with a different volatility.
    pub fn with_volatility(&self, volatility: f64) -> Result<Self, ValidationError> {
        let mut bumped = self.clone();
        bumped.volatility = volatility;
        bumped.validate()?;
        Ok(bumped)
    }

    /// Copy with a different risk-free rate.
    pub fn with_rate(&self, rate: f64) -> Result<Self, ValidationError> {
        let mut bumped = self.clone();
        bumped.rate = rate;
        bumped.validate()?;
        Ok(bumped)
    }

    /// Copy whose expiration lies `years` after the valuation instant.
    ///
    /// The result is pinned to the valuation instant used, so its time to
    /// expiration is exactly `years` (to the millisecond).
    pub fn with_time_to_expiration(&self, years: f64) -> Result<Self, ValidationError> {
        let valuation = self.valuation_time.unwrap_or_else(Utc::now);
        let mut bumped = self.clone();
        bumped.valuation_time = Some(valuation);
        bumped.expiration = resolve_expiration(valuation, years)?;
        bumped.validate()?;
        Ok(bumped)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("strike", self.strike),
            ("spot", self.spot),
            ("rate", self.rate),
            ("volatility", self.volatility),
            ("dividend_yield", self.dividend_yield),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteInput { field });
            }
        }

        if self.strike <= 0.0 {
            return Err(ValidationError::InvalidStrike {
                strike: self.strike,
            });
        }
        if self.spot <= 0.0 {
            return Err(ValidationError::InvalidSpot { spot: self.spot });
        }
        if self.volatility < 0.0 {
            return Err(ValidationError::InvalidVolatility {
                volatility: self.volatility,
            });
        }
        Ok(())
    }
}

fn resolve_expiration(
    valuation: DateTime<Utc>,
    years: f64,
) -> Result<DateTime<Utc>, ValidationError> {
    if !years.is_finite() {
        return Err(ValidationError::NonFiniteInput {
            field: "time_to_expiration",
        });
    }
    if years < 0.0 {
        return Err(ValidationError::NegativeTimeSpan { years });
    }
    add_years(valuation, years).ok_or(ValidationError::NonFiniteInput {
        field: "time_to_expiration",
    })
}

#[derive(Debug, Clone, Copy)]
enum Expiry {
    At(DateTime<Utc>),
    InYears(f64),
}

/// Builder for [`Contract`].
///
/// Required: `kind`, `strike`, `spot`, `volatility`, and either `expiration`
/// or `expiry_in_years`. `rate` and `dividend_yield` default to zero and
/// `underlying` to an empty identifier.
#[derive(Debug, Clone, Default)]
pub struct ContractBuilder {
    underlying: Option<String>,
    kind: Option<OptionKind>,
    strike: Option<f64>,
    spot: Option<f64>,
    rate: Option<f64>,
    volatility: Option<f64>,
    dividend_yield: Option<f64>,
    expiry: Option<Expiry>,
    valuation_time: Option<DateTime<Utc>>,
}

impl ContractBuilder {
    /// Sets the underlying identifier.
    pub fn underlying(mut self, underlying: impl Into<String>) -> Self {
        self.underlying = Some(underlying.into());
        self
    }

    /// Sets call or put.
    pub fn kind(mut self, kind: OptionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the strike price.
    pub fn strike(mut self, strike: f64) -> Self {
        self.strike = Some(strike);
        self
    }

    /// Sets the spot price.
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Sets the risk-free rate (default 0).
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Sets the volatility.
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Sets the dividend yield (default 0).
    pub fn dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = Some(dividend_yield);
        self
    }

    /// Sets an absolute expiration instant.
    pub fn expiration(mut self, expiration: DateTime<Utc>) -> Self {
        self.expiry = Some(Expiry::At(expiration));
        self
    }

    /// Sets expiration relative to the valuation instant.
    ///
    /// Without an explicit [`valuation_time`](Self::valuation_time) the
    /// contract is pinned to the build instant.
    pub fn expiry_in_years(mut self, years: f64) -> Self {
        self.expiry = Some(Expiry::InYears(years));
        self
    }

    /// Pins the valuation clock.
    pub fn valuation_time(mut self, valuation_time: DateTime<Utc>) -> Self {
        self.valuation_time = Some(valuation_time);
        self
    }

    /// Validates all fields and builds the contract.
    pub fn build(self) -> Result<Contract, ValidationError> {
        let kind = self
            .kind
            .ok_or(ValidationError::MissingField { field: "kind" })?;
        let strike = self
            .strike
            .ok_or(ValidationError::MissingField { field: "strike" })?;
        let spot = self
            .spot
            .ok_or(ValidationError::MissingField { field: "spot" })?;
        let volatility = self
            .volatility
            .ok_or(ValidationError::MissingField { field: "volatility" })?;
        let expiry = self
            .expiry
            .ok_or(ValidationError::MissingField { field: "expiration" })?;

        let (expiration, valuation_time) = match expiry {
            Expiry::At(expiration) => {
                let valuation = self.valuation_time.unwrap_or_else(Utc::now);
                let years = year_fraction(valuation, expiration);
                if years < 0.0 {
                    return Err(ValidationError::NegativeTimeSpan { years });
                }
                (expiration, self.valuation_time)
            }
            Expiry::InYears(years) => {
                let valuation = self.valuation_time.unwrap_or_else(Utc::now);
                (resolve_expiration(valuation, years)?, Some(valuation))
            }
        };

        let contract = Contract {
            underlying: self.underlying.unwrap_or_default(),
            kind,
            strike,
            spot,
            rate: self.rate.unwrap_or(0.0),
            volatility,
            dividend_yield: self.dividend_yield.unwrap_or(0.0),
            expiration,
            valuation_time,
        };
        contract.validate()?;
        Ok(contract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone};

    fn valuation() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 16, 0, 0).unwrap()
    }

    fn base_builder() -> ContractBuilder {
        Contract::builder()
            .underlying("AAPL")
            .kind(OptionKind::Call)
            .strike(200.0)
            .spot(195.0)
            .rate(0.05)
            .volatility(0.25)
            .valuation_time(valuation())
            .expiry_in_years(90.0 / 365.0)
    }

    // ========================================================================
    // Construction
    // ========================================================================

    #[test]
    fn test_build_valid_contract() {
        let contract = base_builder().build().unwrap();

        assert_eq!(contract.underlying(), "AAPL");
        assert_eq!(contract.kind(), OptionKind::Call);
        assert_eq!(contract.strike(), 200.0);
        assert_eq!(contract.spot(), 195.0);
        assert_eq!(contract.dividend_yield(), 0.0);
        assert_eq!(contract.valuation_time(), Some(valuation()));
        assert_relative_eq!(contract.time_to_expiration(), 90.0 / 365.0, epsilon = 1e-15);
    }

    #[test]
    fn test_build_with_absolute_expiration() {
        let contract = base_builder()
            .expiration(valuation() + Duration::days(30))
            .build()
            .unwrap();

        assert_relative_eq!(contract.time_to_expiration(), 30.0 / 365.0, epsilon = 1e-15);
    }

    #[test]
    fn test_negative_rate_allowed() {
        let contract = base_builder().rate(-0.005).build().unwrap();
        assert_eq!(contract.rate(), -0.005);
    }

    #[test]
    fn test_zero_volatility_allowed() {
        assert!(base_builder().volatility(0.0).build().is_ok());
    }

    #[test]
    fn test_zero_time_to_expiration_allowed() {
        let contract = base_builder().expiry_in_years(0.0).build().unwrap();
        assert_eq!(contract.time_to_expiration(), 0.0);
    }

    #[test]
    fn test_rejects_non_positive_strike() {
        let result = base_builder().strike(0.0).build();
        assert!(matches!(
            result,
            Err(ValidationError::InvalidStrike { strike }) if strike == 0.0
        ));

        let result = base_builder().strike(-5.0).build();
        assert!(matches!(result, Err(ValidationError::InvalidStrike { .. })));
    }

    #[test]
    fn test_rejects_non_positive_spot() {
        let result = base_builder().spot(0.0).build();
        assert!(matches!(result, Err(ValidationError::InvalidSpot { .. })));
    }

    #[test]
    fn test_rejects_negative_volatility() {
        let result = base_builder().volatility(-0.01).build();
        assert!(matches!(
            result,
            Err(ValidationError::InvalidVolatility { .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_inputs() {
        let result = base_builder().rate(f64::NAN).build();
        assert_eq!(
            result,
            Err(ValidationError::NonFiniteInput { field: "rate" })
        );

        let result = base_builder().spot(f64::INFINITY).build();
        assert_eq!(
            result,
            Err(ValidationError::NonFiniteInput { field: "spot" })
        );
    }

    #[test]
    fn test_rejects_past_expiration() {
        let result = base_builder()
            .expiration(valuation() - Duration::days(1))
            .build();
        assert!(matches!(
            result,
            Err(ValidationError::NegativeTimeSpan { years }) if years < 0.0
        ));

        let result = base_builder().expiry_in_years(-0.1).build();
        assert!(matches!(
            result,
            Err(ValidationError::NegativeTimeSpan { .. })
        ));
    }

    #[test]
    fn test_missing_fields() {
        let result = Contract::builder().strike(100.0).build();
        assert_eq!(result, Err(ValidationError::MissingField { field: "kind" }));

        let result = Contract::builder()
            .kind(OptionKind::Call)
            .strike(100.0)
            .spot(100.0)
            .volatility(0.2)
            .build();
        assert_eq!(
            result,
            Err(ValidationError::MissingField {
                field: "expiration"
            })
        );
    }

    // ========================================================================
    // Derived queries
    // ========================================================================

    #[test]
    fn test_moneyness_queries() {
        let otm_call = base_builder().build().unwrap();
        assert!(!otm_call.is_in_the_money());
        assert_eq!(otm_call.intrinsic_value(), 0.0);
        assert_relative_eq!(otm_call.moneyness(), 0.975);

        let itm_put = base_builder().kind(OptionKind::Put).build().unwrap();
        assert!(itm_put.is_in_the_money());
        assert_eq!(itm_put.intrinsic_value(), 5.0);
    }

    #[test]
    fn test_unpinned_contract_uses_clock() {
        let contract = Contract::builder()
            .kind(OptionKind::Call)
            .strike(100.0)
            .spot(100.0)
            .volatility(0.2)
            .expiration(Utc::now() + Duration::days(365))
            .build()
            .unwrap();

        assert!(contract.valuation_time().is_none());
        let t = contract.time_to_expiration();
        assert!(t > 0.99 && t <= 1.0, "t = {}", t);

        let pinned = contract.pinned();
        assert!(pinned.valuation_time().is_some());
        assert_eq!(pinned.time_to_expiration(), pinned.time_to_expiration());

        let instant = Utc::now();
        let first = contract.pinned_at(instant);
        let second = contract.clone().pinned_at(instant);
        assert_eq!(first.valuation_time(), Some(instant));
        assert_eq!(first.time_to_expiration(), second.time_to_expiration());

        // An already pinned contract keeps its own instant
        let later = instant + Duration::days(30);
        assert_eq!(first.pinned_at(later).valuation_time(), Some(instant));
    }

    // ========================================================================
    // Copy-with-change
    // ========================================================================

    #[test]
    fn test_with_methods_leave_original_untouched() {
        let contract = base_builder().build().unwrap();

        let bumped = contract.with_spot(196.0).unwrap();
        assert_eq!(bumped.spot(), 196.0);
        assert_eq!(contract.spot(), 195.0);

        let bumped = contract.with_volatility(0.3).unwrap();
        assert_eq!(bumped.volatility(), 0.3);

        let bumped = contract.with_rate(0.0).unwrap();
        assert_eq!(bumped.rate(), 0.0);

        let bumped = contract.with_time_to_expiration(30.0 / 365.0).unwrap();
        assert_relative_eq!(bumped.time_to_expiration(), 30.0 / 365.0, epsilon = 1e-15);
        assert_relative_eq!(contract.time_to_expiration(), 90.0 / 365.0, epsilon = 1e-15);
    }

    #[test]
    fn test_with_methods_validate() {
        let contract = base_builder().build().unwrap();

        assert!(contract.with_spot(0.0).is_err());
        assert!(contract.with_volatility(-0.2).is_err());
        assert!(contract.with_rate(f64::NAN).is_err());
        assert!(matches!(
            contract.with_time_to_expiration(-1.0),
            Err(ValidationError::NegativeTimeSpan { .. })
        ));
    }

    // ========================================================================
    // OptionKind
    // ========================================================================

    #[test]
    fn test_option_kind_parse() {
        assert_eq!("call".parse::<OptionKind>().unwrap(), OptionKind::Call);
        assert_eq!("PUT".parse::<OptionKind>().unwrap(), OptionKind::Put);
        assert!(matches!(
            "straddle".parse::<OptionKind>(),
            Err(ValidationError::InvalidOptionKind(_))
        ));
        assert_eq!(OptionKind::Put.to_string(), "put");
    }
}
