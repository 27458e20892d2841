//! The taxable population
//!
//! A `Population` is an immutable snapshot of wealth holders. It is always
//! validated on construction, so the estimators never see negative or
//! non-finite net worth.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_distr::{Distribution, Normal, Pareto};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// A single wealth holder. Monetary values are in billions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WealthHolder {
    pub net_worth: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residency: Option<String>,
    /// Holder-specific share of wealth held in real estate. Overrides the
    /// population-wide real estate exclusion when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_estate_share: Option<f64>,
}

impl WealthHolder {
    #[must_use]
    pub fn new(net_worth: f64) -> Self {
        Self {
            net_worth,
            name: None,
            industry: None,
            residency: None,
            real_estate_share: None,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    #[must_use]
    pub fn residency(mut self, residency: impl Into<String>) -> Self {
        self.residency = Some(residency.into());
        self
    }

    #[must_use]
    pub fn real_estate_share(mut self, share: f64) -> Self {
        self.real_estate_share = Some(share);
        self
    }
}

/// One row of a wealth distribution table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WealthTier {
    pub label: &'static str,
    pub count: usize,
    /// Combined net worth of every holder in the tier (billions)
    pub total_wealth: f64,
}

/// Static five-tier distribution of the taxable population.
///
/// Used whenever no individual-level data is available.
pub const BASELINE_TIERS: [WealthTier; 5] = [
    WealthTier {
        label: "$1B-$2B",
        count: 91,
        total_wealth: 125.3,
    },
    WealthTier {
        label: "$2B-$5B",
        count: 93,
        total_wealth: 289.2,
    },
    WealthTier {
        label: "$5B-$10B",
        count: 37,
        total_wealth: 250.8,
    },
    WealthTier {
        label: "$10B-$50B",
        count: 24,
        total_wealth: 425.9,
    },
    WealthTier {
        label: "$50B+",
        count: 5,
        total_wealth: 1154.0,
    },
];

/// Industry mix used to tag synthetic holders (relative weights)
const SYNTHETIC_INDUSTRIES: [(&str, usize); 9] = [
    ("Technology", 82),
    ("Finance & Investments", 38),
    ("Real Estate", 18),
    ("Healthcare", 14),
    ("Retail & Consumer", 12),
    ("Media & Entertainment", 10),
    ("Energy", 8),
    ("Manufacturing", 7),
    ("Other", 15),
];

/// Ordered, validated set of wealth holders
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WealthHolder>", into = "Vec<WealthHolder>")]
pub struct Population {
    holders: Vec<WealthHolder>,
}

impl Population {
    /// Build a population, rejecting any holder with negative or
    /// non-finite net worth or an out-of-range real estate share.
    pub fn new(holders: Vec<WealthHolder>) -> Result<Self> {
        for (index, holder) in holders.iter().enumerate() {
            if !holder.net_worth.is_finite() || holder.net_worth < 0.0 {
                return Err(ModelError::NegativeNetWorth {
                    index,
                    value: holder.net_worth,
                });
            }
            if let Some(share) = holder.real_estate_share
                && !(0.0..=1.0).contains(&share)
            {
                return Err(ModelError::invalid(
                    "real_estate_share",
                    format!("holder #{index} has share {share} outside [0, 1]"),
                ));
            }
        }
        Ok(Self { holders })
    }

    /// Population made of bare net worth figures
    pub fn from_net_worths(net_worths: &[f64]) -> Result<Self> {
        Self::new(net_worths.iter().copied().map(WealthHolder::new).collect())
    }

    /// Expand a tier table into holders that each hold their tier's average
    pub fn from_tiers(tiers: &[WealthTier]) -> Result<Self> {
        let mut holders = Vec::with_capacity(tiers.iter().map(|t| t.count).sum());
        for tier in tiers.iter().filter(|t| t.count > 0) {
            let average = tier.total_wealth / tier.count as f64;
            holders.extend((0..tier.count).map(|_| WealthHolder::new(average)));
        }
        Self::new(holders)
    }

    /// The static tier baseline. Also the fallback when an external source fails.
    pub fn baseline() -> Self {
        let holders = BASELINE_TIERS
            .iter()
            .flat_map(|tier| {
                let average = tier.total_wealth / tier.count as f64;
                (0..tier.count).map(move |_| WealthHolder::new(average))
            })
            .collect();
        Self { holders }
    }

    /// Seeded heavy-tailed population rescaled to `total_wealth`.
    ///
    /// Net worth is drawn from a Pareto distribution (shape 1.2), scaled by
    /// 2.5 and capped at 250 before rescaling. Each holder also receives a
    /// real estate share drawn around 10%.
    pub fn synthetic(seed: u64, count: usize, total_wealth: f64) -> Result<Self> {
        crate::error::check_non_negative("total_wealth", total_wealth)?;
        if count == 0 {
            return Ok(Self::default());
        }

        let pareto = Pareto::new(1.0, 1.2)
            .map_err(|e| ModelError::invalid("pareto", e.to_string()))?;
        let real_estate = Normal::new(0.10, 0.05)
            .map_err(|e| ModelError::invalid("real_estate_share", e.to_string()))?;
        let mut rng = SmallRng::seed_from_u64(seed);

        let industry_weight: usize = SYNTHETIC_INDUSTRIES.iter().map(|(_, w)| w).sum();
        let mut holders: Vec<WealthHolder> = (0..count)
            .map(|i| {
                let raw: f64 = pareto.sample(&mut rng);
                let share: f64 = real_estate.sample(&mut rng);
                let slot = i * industry_weight / count;
                let industry = SYNTHETIC_INDUSTRIES
                    .iter()
                    .scan(0, |acc, (name, w)| {
                        *acc += w;
                        Some((*acc, *name))
                    })
                    .find(|(cumulative, _)| slot < *cumulative)
                    .map(|(_, name)| name)
                    .unwrap_or("Other");
                WealthHolder::new((raw * 2.5).min(250.0))
                    .named(format!("Holder {i}"))
                    .industry(industry)
                    .real_estate_share((share * 100.0).round() / 100.0)
                    .clamp_real_estate()
            })
            .collect();

        let current: f64 = holders.iter().map(|h| h.net_worth).sum();
        let scale = if current > 0.0 { total_wealth / current } else { 0.0 };
        for holder in &mut holders {
            holder.net_worth *= scale;
        }
        holders.sort_by(|a, b| b.net_worth.total_cmp(&a.net_worth));

        Self::new(holders)
    }

    pub fn holders(&self) -> &[WealthHolder] {
        &self.holders
    }

    pub fn iter(&self) -> impl Iterator<Item = &WealthHolder> {
        self.holders.iter()
    }

    pub fn len(&self) -> usize {
        self.holders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }

    pub fn total_wealth(&self) -> f64 {
        self.holders.iter().map(|h| h.net_worth).sum()
    }

    /// Mean net worth, zero for an empty population
    pub fn average_wealth(&self) -> f64 {
        if self.holders.is_empty() {
            0.0
        } else {
            self.total_wealth() / self.holders.len() as f64
        }
    }

    /// Count, total, median, mean, min and max net worth
    pub fn stats(&self) -> PopulationStats {
        let mut worths: Vec<f64> = self.holders.iter().map(|h| h.net_worth).collect();
        worths.sort_by(f64::total_cmp);
        let median = match worths.len() {
            0 => 0.0,
            n if n % 2 == 1 => worths[n / 2],
            n => (worths[n / 2 - 1] + worths[n / 2]) / 2.0,
        };
        PopulationStats {
            count: worths.len(),
            total_wealth: self.total_wealth(),
            median_wealth: median,
            mean_wealth: self.average_wealth(),
            min_wealth: worths.first().copied().unwrap_or(0.0),
            max_wealth: worths.last().copied().unwrap_or(0.0),
        }
    }
}

impl WealthHolder {
    fn clamp_real_estate(mut self) -> Self {
        self.real_estate_share = self.real_estate_share.map(|s| s.clamp(0.02, 0.30));
        self
    }
}

impl TryFrom<Vec<WealthHolder>> for Population {
    type Error = ModelError;

    fn try_from(holders: Vec<WealthHolder>) -> Result<Self> {
        Self::new(holders)
    }
}

impl From<Population> for Vec<WealthHolder> {
    fn from(population: Population) -> Self {
        population.holders
    }
}

/// Summary statistics of a population's net worth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub count: usize,
    pub total_wealth: f64,
    pub median_wealth: f64,
    pub mean_wealth: f64,
    pub min_wealth: f64,
    pub max_wealth: f64,
}
