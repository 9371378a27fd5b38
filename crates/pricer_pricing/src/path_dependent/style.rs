//! Option styles understood by the simulation engine.

use std::fmt;
use std::str::FromStr;

use crate::mc::SimulationArgumentError;

/// Exercise and payoff style of a simulated option.
///
/// # Examples
///
/// ```
/// use pricer_pricing::path_dependent::OptionStyle;
///
/// let style: OptionStyle = "knock_out".parse().unwrap();
/// assert_eq!(style, OptionStyle::BarrierKnockOut);
/// assert!(style.is_barrier());
/// assert!("bermudan".parse::<OptionStyle>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OptionStyle {
    /// Payoff on the terminal price.
    #[default]
    European,
    /// Payoff on the arithmetic mean of all path samples.
    Asian,
    /// European payoff, paid only if the barrier was touched.
    BarrierKnockIn,
    /// European payoff, cancelled if the barrier was touched.
    BarrierKnockOut,
}

impl OptionStyle {
    /// All styles, in declaration order.
    pub const ALL: [OptionStyle; 4] = [
        OptionStyle::European,
        OptionStyle::Asian,
        OptionStyle::BarrierKnockIn,
        OptionStyle::BarrierKnockOut,
    ];

    /// Whether the style needs a [`BarrierSpec`](super::BarrierSpec).
    #[inline]
    pub fn is_barrier(&self) -> bool {
        matches!(self, Self::BarrierKnockIn | Self::BarrierKnockOut)
    }

    /// Canonical snake-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::European => "european",
            Self::Asian => "asian",
            Self::BarrierKnockIn => "barrier_knock_in",
            Self::BarrierKnockOut => "barrier_knock_out",
        }
    }
}

impl fmt::Display for OptionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionStyle {
    type Err = SimulationArgumentError;

    /// Accepts the canonical names plus the short forms `knock_in` and
    /// `knock_out`. Case and `-`/`_` separators are not significant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalised.as_str() {
            "european" => Ok(Self::European),
            "asian" => Ok(Self::Asian),
            "barrier_knock_in" | "knock_in" => Ok(Self::BarrierKnockIn),
            "barrier_knock_out" | "knock_out" => Ok(Self::BarrierKnockOut),
            _ => Err(SimulationArgumentError::UnknownStyle(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepted_spellings() {
        let cases = [
            ("european", OptionStyle::European),
            ("ASIAN", OptionStyle::Asian),
            ("barrier_knock_in", OptionStyle::BarrierKnockIn),
            ("knock-in", OptionStyle::BarrierKnockIn),
            ("knock_out", OptionStyle::BarrierKnockOut),
            (" Barrier-Knock-Out ", OptionStyle::BarrierKnockOut),
        ];
        for (text, expected) in cases {
            assert_eq!(text.parse::<OptionStyle>().unwrap(), expected, "{}", text);
        }
    }

    #[test]
    fn test_unknown_style() {
        let err = "lookback".parse::<OptionStyle>().unwrap_err();
        assert_eq!(err, SimulationArgumentError::UnknownStyle("lookback".into()));
    }

    #[test]
    fn test_display_round_trips() {
        for style in OptionStyle::ALL {
            assert_eq!(style.to_string().parse::<OptionStyle>().unwrap(), style);
        }
    }

    #[test]
    fn test_is_barrier() {
        assert!(!OptionStyle::European.is_barrier());
        assert!(!OptionStyle::Asian.is_barrier());
        assert!(OptionStyle::BarrierKnockIn.is_barrier());
        assert!(OptionStyle::BarrierKnockOut.is_barrier());
    }
}
