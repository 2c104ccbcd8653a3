//! Compliance factors and the weight table that prices them.

use std::fmt;

/// A sanitation compliance factor recorded on an inspection checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Factor {
    Handwashing,
    Pests,
    WasteDisposal,
    StagnantWater,
}

impl Factor {
    /// Every known factor, in weight-table order.
    pub const ALL: [Factor; 4] = [
        Factor::Handwashing,
        Factor::Pests,
        Factor::WasteDisposal,
        Factor::StagnantWater,
    ];

    /// Checklist key for this factor.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Handwashing => "handwashing",
            Self::Pests => "pests",
            Self::WasteDisposal => "waste_disposal",
            Self::StagnantWater => "stagnant_water",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed integer weight per factor.
///
/// A factor's weight is charged in full when the factor is *not* marked
/// present on the checklist. Negative weights therefore lower the raw sum
/// when a factor is missing, positive weights raise it.
///
/// Built once per run and never mutated; the scorer owns its copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskWeights {
    handwashing: i32,
    pests: i32,
    waste_disposal: i32,
    stagnant_water: i32,
}

impl RiskWeights {
    pub const fn new(
        handwashing: i32,
        pests: i32,
        waste_disposal: i32,
        stagnant_water: i32,
    ) -> Self {
        Self {
            handwashing,
            pests,
            waste_disposal,
            stagnant_water,
        }
    }

    pub fn weight(&self, factor: Factor) -> i32 {
        match factor {
            Factor::Handwashing => self.handwashing,
            Factor::Pests => self.pests,
            Factor::WasteDisposal => self.waste_disposal,
            Factor::StagnantWater => self.stagnant_water,
        }
    }

    /// `(factor, weight)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Factor, i32)> + '_ {
        Factor::ALL.into_iter().map(move |f| (f, self.weight(f)))
    }
}

impl Default for RiskWeights {
    /// Production weights. Historical scores depend on these exact values.
    fn default() -> Self {
        Self::new(-5, 10, 8, 12)
    }
}
