use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::Criterion;
use super::tokens::normalize_keyword;

/// Upper bound for sector and budget weights.
pub const MAX_CATEGORY_WEIGHT: f64 = 5.0;

const WEIGHT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorWeight {
    pub keyword: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoWeight {
    pub keyword: String,
    pub multiplier: f64,
}

/// Inclusive budget band. `upper: None` is unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetBand {
    pub lower: f64,
    #[serde(default)]
    pub upper: Option<f64>,
    pub weight: f64,
}

impl BudgetBand {
    pub fn contains(&self, amount: f64) -> bool {
        amount >= self.lower && self.upper.map_or(true, |upper| amount <= upper)
    }

    pub fn label(&self) -> String {
        match self.upper {
            Some(upper) => format!("{:.0}-{:.0}", self.lower, upper),
            None => format!("{:.0}+", self.lower),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadlinePolicy {
    /// Deadlines closer than this many days are penalised linearly.
    pub penalty_days: u32,
    /// Deadlines closer than this many days are treated as expired.
    pub expiry_days: u32,
    /// Sub-score for tenders without a published deadline.
    pub neutral: f64,
}

/// Relative importance of each criterion in the composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionWeights {
    pub sector: f64,
    pub geography: f64,
    pub budget: f64,
    pub deadline: f64,
    pub experience: f64,
    pub ai_content: f64,
}

impl CriterionWeights {
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Sector => self.sector,
            Criterion::Geography => self.geography,
            Criterion::Budget => self.budget,
            Criterion::Deadline => self.deadline,
            Criterion::Experience => self.experience,
            Criterion::AiContent => self.ai_content,
        }
    }

    fn set(&mut self, criterion: Criterion, value: f64) {
        let slot = match criterion {
            Criterion::Sector => &mut self.sector,
            Criterion::Geography => &mut self.geography,
            Criterion::Budget => &mut self.budget,
            Criterion::Deadline => &mut self.deadline,
            Criterion::Experience => &mut self.experience,
            Criterion::AiContent => &mut self.ai_content,
        };
        *slot = value;
    }

    pub fn total(&self) -> f64 {
        Criterion::ALL.iter().map(|criterion| self.get(*criterion)).sum()
    }
}

/// Criterion weights rescaled so they sum to one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedWeights([f64; 6]);

impl NormalizedWeights {
    pub fn get(&self, criterion: Criterion) -> f64 {
        self.0[criterion as usize]
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

/// Catalog of everything the engine scores against. Built once, then shared
/// read-only for the whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriteriaConfig {
    pub sector_weights: Vec<SectorWeight>,
    pub unclassified_weight: f64,
    pub geo_weights: Vec<GeoWeight>,
    pub unspecified_multiplier: f64,
    pub unmatched_multiplier: f64,
    pub description_match_factor: f64,
    pub budget_bands: Vec<BudgetBand>,
    pub unknown_budget_weight: f64,
    pub range_bonus: f64,
    pub experience_multiplier: f64,
    pub experience_ceiling: f64,
    pub neutral_experience: f64,
    pub neutral_ai_content: f64,
    pub deadline: DeadlinePolicy,
    pub criterion_weights: CriterionWeights,
}

const PACIFIC_KEYWORDS: [&str; 16] = [
    "fiji",
    "vanuatu",
    "samoa",
    "tonga",
    "solomon islands",
    "papua new guinea",
    "kiribati",
    "tuvalu",
    "nauru",
    "palau",
    "marshall islands",
    "micronesia",
    "cook islands",
    "niue",
    "timor leste",
    "oceania",
];

/// Keyword treated as the generic fallback at the end of the geography table.
pub const GLOBAL_REGION: &str = "global";

impl CriteriaConfig {
    pub fn load_defaults() -> Self {
        let sector_weights = [
            ("climate change", 5.0),
            ("resource governance", 4.7),
            ("environmental", 4.5),
            ("infrastructure", 4.2),
            ("governance", 3.8),
            ("capacity building", 3.7),
            ("policy", 3.5),
            ("development", 3.3),
        ]
        .into_iter()
        .map(|(keyword, weight)| SectorWeight {
            keyword: keyword.to_string(),
            weight,
        })
        .collect();

        let mut geo_weights = vec![GeoWeight {
            keyword: "pacific".to_string(),
            multiplier: 1.0,
        }];
        geo_weights.extend(PACIFIC_KEYWORDS.iter().map(|keyword| GeoWeight {
            keyword: keyword.to_string(),
            multiplier: 1.0,
        }));
        geo_weights.extend(
            [
                ("asia", 0.8),
                ("africa", 0.7),
                ("caribbean", 0.65),
                ("latin america", 0.6),
                (GLOBAL_REGION, 0.55),
            ]
            .into_iter()
            .map(|(keyword, multiplier)| GeoWeight {
                keyword: keyword.to_string(),
                multiplier,
            }),
        );

        let budget_bands = vec![
            BudgetBand {
                lower: 0.0,
                upper: Some(50_000.0),
                weight: 3.0,
            },
            BudgetBand {
                lower: 50_000.0,
                upper: Some(200_000.0),
                weight: 5.0,
            },
            BudgetBand {
                lower: 200_000.0,
                upper: Some(1_000_000.0),
                weight: 2.0,
            },
            BudgetBand {
                lower: 1_000_000.0,
                upper: None,
                weight: 1.5,
            },
        ];

        Self {
            sector_weights,
            unclassified_weight: 2.0,
            geo_weights,
            unspecified_multiplier: 0.5,
            unmatched_multiplier: 0.4,
            description_match_factor: 0.8,
            budget_bands,
            unknown_budget_weight: 2.5,
            range_bonus: 1.1,
            experience_multiplier: 1.25,
            experience_ceiling: 1.0,
            neutral_experience: 0.5,
            neutral_ai_content: 0.5,
            deadline: DeadlinePolicy {
                penalty_days: 30,
                expiry_days: 1,
                neutral: 0.5,
            },
            criterion_weights: CriterionWeights {
                sector: 0.20,
                geography: 0.15,
                budget: 0.15,
                deadline: 0.10,
                experience: 0.25,
                ai_content: 0.15,
            },
        }
    }

    /// Applies partial overrides on top of this config and validates the result.
    pub fn merge(&self, overrides: CriteriaOverrides) -> Result<Self, CriteriaError> {
        let mut merged = self.clone();

        for (keyword, weight) in overrides.sector_weights {
            let keyword = normalize_keyword(&keyword);
            match merged
                .sector_weights
                .iter_mut()
                .find(|entry| normalize_keyword(&entry.keyword) == keyword)
            {
                Some(entry) => entry.weight = weight,
                None => merged.sector_weights.push(SectorWeight { keyword, weight }),
            }
        }

        for (keyword, multiplier) in overrides.geo_weights {
            let keyword = normalize_keyword(&keyword);
            match merged
                .geo_weights
                .iter_mut()
                .find(|entry| normalize_keyword(&entry.keyword) == keyword)
            {
                Some(entry) => entry.multiplier = multiplier,
                None => {
                    let position = merged
                        .geo_weights
                        .iter()
                        .position(|entry| normalize_keyword(&entry.keyword) == GLOBAL_REGION)
                        .unwrap_or(merged.geo_weights.len());
                    merged
                        .geo_weights
                        .insert(position, GeoWeight { keyword, multiplier });
                }
            }
        }

        if let Some(bands) = overrides.budget_bands {
            merged.budget_bands = bands;
        }

        let scalars: [(&mut f64, Option<f64>); 11] = [
            (&mut merged.unclassified_weight, overrides.unclassified_weight),
            (&mut merged.unspecified_multiplier, overrides.unspecified_multiplier),
            (&mut merged.unmatched_multiplier, overrides.unmatched_multiplier),
            (
                &mut merged.description_match_factor,
                overrides.description_match_factor,
            ),
            (&mut merged.unknown_budget_weight, overrides.unknown_budget_weight),
            (&mut merged.range_bonus, overrides.range_bonus),
            (&mut merged.experience_multiplier, overrides.experience_multiplier),
            (&mut merged.experience_ceiling, overrides.experience_ceiling),
            (&mut merged.neutral_experience, overrides.neutral_experience),
            (&mut merged.neutral_ai_content, overrides.neutral_ai_content),
            (&mut merged.deadline.neutral, overrides.neutral_deadline),
        ];
        for (slot, value) in scalars {
            if let Some(value) = value {
                *slot = value;
            }
        }

        if let Some(days) = overrides.deadline_penalty_days {
            merged.deadline.penalty_days = days;
        }
        if let Some(days) = overrides.deadline_expiry_days {
            merged.deadline.expiry_days = days;
        }

        for (criterion, weight) in overrides.criterion_weights {
            merged.criterion_weights.set(criterion, weight);
        }

        merged.validate()?;
        Ok(merged)
    }

    pub fn validate(&self) -> Result<(), CriteriaError> {
        if self.sector_weights.is_empty() {
            return Err(CriteriaError::EmptyTable { table: "sector" });
        }
        for entry in &self.sector_weights {
            check_keyword(&entry.keyword)?;
            check_range("sector weight", &entry.keyword, entry.weight, 0.0, MAX_CATEGORY_WEIGHT)?;
        }

        let lowest_sector = self
            .sector_weights
            .iter()
            .map(|entry| entry.weight)
            .fold(f64::INFINITY, f64::min);
        if !self.unclassified_weight.is_finite()
            || self.unclassified_weight <= 0.0
            || self.unclassified_weight >= lowest_sector
        {
            return Err(CriteriaError::UnclassifiedWeight {
                weight: self.unclassified_weight,
                lowest_sector,
            });
        }

        if self.geo_weights.is_empty() {
            return Err(CriteriaError::EmptyTable { table: "geography" });
        }
        for entry in &self.geo_weights {
            check_keyword(&entry.keyword)?;
            check_range("geo multiplier", &entry.keyword, entry.multiplier, 0.0, 1.0)?;
        }
        check_range("geo multiplier", "unspecified", self.unspecified_multiplier, 0.0, 1.0)?;
        check_range("geo multiplier", "unmatched", self.unmatched_multiplier, 0.0, 1.0)?;
        check_range(
            "factor",
            "description match",
            self.description_match_factor,
            0.0,
            1.0,
        )?;

        self.validate_budget_bands()?;
        check_range(
            "budget weight",
            "unknown",
            self.unknown_budget_weight,
            0.0,
            MAX_CATEGORY_WEIGHT,
        )?;
        check_range("budget bonus", "range", self.range_bonus, 1.0, 2.0)?;

        check_range(
            "experience multiplier",
            "experience",
            self.experience_multiplier,
            0.0,
            f64::MAX,
        )?;
        if !(self.experience_ceiling > 0.0 && self.experience_ceiling <= 1.0) {
            return Err(CriteriaError::OutOfRange {
                field: "experience ceiling",
                key: "experience".to_string(),
                value: self.experience_ceiling,
                min: 0.0,
                max: 1.0,
            });
        }
        check_range("neutral score", "experience", self.neutral_experience, 0.0, 1.0)?;
        check_range("neutral score", "ai content", self.neutral_ai_content, 0.0, 1.0)?;
        check_range("neutral score", "deadline", self.deadline.neutral, 0.0, 1.0)?;

        if self.deadline.penalty_days == 0 || self.deadline.expiry_days > self.deadline.penalty_days
        {
            return Err(CriteriaError::DeadlineThresholds {
                penalty_days: self.deadline.penalty_days,
                expiry_days: self.deadline.expiry_days,
            });
        }

        for criterion in Criterion::ALL {
            let weight = self.criterion_weights.get(criterion);
            if !weight.is_finite() || weight < 0.0 {
                return Err(CriteriaError::CriterionWeight { criterion, weight });
            }
        }
        if self.criterion_weights.total() <= WEIGHT_TOLERANCE {
            return Err(CriteriaError::ZeroCriterionWeights);
        }

        Ok(())
    }

    fn validate_budget_bands(&self) -> Result<(), CriteriaError> {
        if self.budget_bands.is_empty() {
            return Err(CriteriaError::EmptyTable { table: "budget" });
        }

        let mut previous_upper: Option<f64> = Some(f64::NEG_INFINITY);
        for (index, band) in self.budget_bands.iter().enumerate() {
            let key = band.label();
            check_range("budget weight", &key, band.weight, 0.0, MAX_CATEGORY_WEIGHT)?;
            if !band.lower.is_finite() || band.lower < 0.0 {
                return Err(CriteriaError::BudgetBandBounds { index });
            }
            if let Some(upper) = band.upper {
                if !upper.is_finite() || upper <= band.lower {
                    return Err(CriteriaError::BudgetBandBounds { index });
                }
            }

            match previous_upper {
                None => return Err(CriteriaError::OverlappingBudgetBands { index }),
                Some(previous) if band.lower < previous => {
                    return Err(CriteriaError::OverlappingBudgetBands { index })
                }
                Some(_) => {}
            }
            previous_upper = band.upper;
        }

        Ok(())
    }

    pub fn normalized_weights(&self) -> NormalizedWeights {
        let total = self.criterion_weights.total();
        let mut weights = [0.0; 6];
        for criterion in Criterion::ALL {
            weights[criterion as usize] = if total > WEIGHT_TOLERANCE {
                self.criterion_weights.get(criterion) / total
            } else {
                1.0 / Criterion::ALL.len() as f64
            };
        }
        NormalizedWeights(weights)
    }

    pub fn budget_band_for(&self, amount: f64) -> Option<&BudgetBand> {
        self.budget_bands.iter().find(|band| band.contains(amount))
    }
}

impl Default for CriteriaConfig {
    fn default() -> Self {
        Self::load_defaults()
    }
}

fn check_keyword(keyword: &str) -> Result<(), CriteriaError> {
    if normalize_keyword(keyword).is_empty() {
        Err(CriteriaError::EmptyKeyword)
    } else {
        Ok(())
    }
}

fn check_range(
    field: &'static str,
    key: &str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), CriteriaError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(CriteriaError::OutOfRange {
            field,
            key: key.to_string(),
            value,
            min,
            max,
        })
    }
}

/// Partial criteria supplied by the operator; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CriteriaOverrides {
    pub sector_weights: BTreeMap<String, f64>,
    pub unclassified_weight: Option<f64>,
    pub geo_weights: BTreeMap<String, f64>,
    pub unspecified_multiplier: Option<f64>,
    pub unmatched_multiplier: Option<f64>,
    pub description_match_factor: Option<f64>,
    pub budget_bands: Option<Vec<BudgetBand>>,
    pub unknown_budget_weight: Option<f64>,
    pub range_bonus: Option<f64>,
    pub experience_multiplier: Option<f64>,
    pub experience_ceiling: Option<f64>,
    pub neutral_experience: Option<f64>,
    pub neutral_ai_content: Option<f64>,
    pub neutral_deadline: Option<f64>,
    pub deadline_penalty_days: Option<u32>,
    pub deadline_expiry_days: Option<u32>,
    pub criterion_weights: BTreeMap<Criterion, f64>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CriteriaError {
    #[error("{field} for '{key}' must be within [{min}, {max}] (got {value})")]
    OutOfRange {
        field: &'static str,
        key: String,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{table} table must contain at least one entry")]
    EmptyTable { table: &'static str },
    #[error("catalog keywords must contain at least one letter or digit")]
    EmptyKeyword,
    #[error(
        "unclassified sector weight {weight} must be above zero and below the lowest sector weight {lowest_sector}"
    )]
    UnclassifiedWeight { weight: f64, lowest_sector: f64 },
    #[error("budget band {index} must have a non-negative lower bound below its upper bound")]
    BudgetBandBounds { index: usize },
    #[error("budget band {index} overlaps or precedes the band before it")]
    OverlappingBudgetBands { index: usize },
    #[error(
        "deadline expiry threshold ({expiry_days} days) must not exceed the penalty threshold ({penalty_days} days), which must be positive"
    )]
    DeadlineThresholds { penalty_days: u32, expiry_days: u32 },
    #[error("weight for {criterion:?} must be a non-negative number (got {weight})")]
    CriterionWeight { criterion: Criterion, weight: f64 },
    #[error("at least one criterion weight must be positive")]
    ZeroCriterionWeights,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        CriteriaConfig::load_defaults()
            .validate()
            .expect("built-in catalog is valid");
    }

    #[test]
    fn default_budget_bands_cover_expected_amounts() {
        let config = CriteriaConfig::load_defaults();
        assert_eq!(config.budget_bands.len(), 4);
        assert_eq!(config.budget_band_for(120_000.0).map(|b| b.weight), Some(5.0));
        assert_eq!(config.budget_band_for(200_000.0).map(|b| b.weight), Some(5.0));
        assert_eq!(config.budget_band_for(500_000.0).map(|b| b.weight), Some(2.0));
        assert_eq!(config.budget_band_for(7_500_000.0).map(|b| b.weight), Some(1.5));
    }

    #[test]
    fn pacific_tokens_precede_global_fallback() {
        let config = CriteriaConfig::load_defaults();
        let position = |keyword: &str| {
            config
                .geo_weights
                .iter()
                .position(|entry| entry.keyword == keyword)
                .expect("keyword present")
        };
        assert!(position("fiji") < position("asia"));
        assert_eq!(position(GLOBAL_REGION), config.geo_weights.len() - 1);
    }

    #[test]
    fn merge_keeps_defaults_for_absent_keys() {
        let defaults = CriteriaConfig::load_defaults();
        let mut overrides = CriteriaOverrides::default();
        overrides.sector_weights.insert("Policy".to_string(), 4.9);
        overrides.geo_weights.insert("Timor-Leste".to_string(), 0.9);
        overrides.geo_weights.insert("europe".to_string(), 0.3);
        overrides.criterion_weights.insert(Criterion::Budget, 0.3);

        let merged = defaults.merge(overrides).expect("overrides are valid");

        let weight = |keyword: &str| {
            merged
                .sector_weights
                .iter()
                .find(|entry| entry.keyword == keyword)
                .map(|entry| entry.weight)
        };
        assert_eq!(weight("policy"), Some(4.9));
        assert_eq!(weight("climate change"), Some(5.0));
        assert_eq!(merged.sector_weights.len(), defaults.sector_weights.len());

        let europe = merged
            .geo_weights
            .iter()
            .position(|entry| entry.keyword == "europe")
            .expect("new region inserted");
        assert_eq!(merged.geo_weights[europe + 1].keyword, GLOBAL_REGION);
        assert!(merged
            .geo_weights
            .iter()
            .any(|entry| entry.keyword == "timor leste" && entry.multiplier == 0.9));

        assert_eq!(merged.criterion_weights.budget, 0.3);
        assert_eq!(merged.criterion_weights.sector, 0.20);
        assert_eq!(merged.budget_bands, defaults.budget_bands);
    }

    #[test]
    fn new_regions_go_before_a_differently_cased_global_fallback() {
        let mut base = CriteriaConfig::load_defaults();
        if let Some(global) = base
            .geo_weights
            .iter_mut()
            .find(|entry| entry.keyword == GLOBAL_REGION)
        {
            global.keyword = "Global".to_string();
        }
        let mut overrides = CriteriaOverrides::default();
        overrides.geo_weights.insert("europe".to_string(), 0.3);

        let merged = base.merge(overrides).expect("overrides are valid");

        let last = merged.geo_weights.last().map(|entry| entry.keyword.as_str());
        assert_eq!(last, Some("Global"));
        assert_eq!(
            merged.geo_weights[merged.geo_weights.len() - 2].keyword,
            "europe"
        );
    }

    #[test]
    fn merge_rejects_out_of_bound_weights() {
        let defaults = CriteriaConfig::load_defaults();

        let mut sector = CriteriaOverrides::default();
        sector.sector_weights.insert("policy".to_string(), 7.5);
        assert!(matches!(
            defaults.merge(sector),
            Err(CriteriaError::OutOfRange { field: "sector weight", .. })
        ));

        let negative_budget = CriteriaOverrides {
            unknown_budget_weight: Some(-1.0),
            ..CriteriaOverrides::default()
        };
        assert!(matches!(
            defaults.merge(negative_budget),
            Err(CriteriaError::OutOfRange { field: "budget weight", .. })
        ));

        let mut geo = CriteriaOverrides::default();
        geo.geo_weights.insert("asia".to_string(), 1.5);
        assert!(defaults.merge(geo).is_err());
    }

    #[test]
    fn rejects_overlapping_or_inverted_bands() {
        let defaults = CriteriaConfig::load_defaults();
        let overlapping = CriteriaOverrides {
            budget_bands: Some(vec![
                BudgetBand {
                    lower: 0.0,
                    upper: Some(100_000.0),
                    weight: 3.0,
                },
                BudgetBand {
                    lower: 80_000.0,
                    upper: Some(300_000.0),
                    weight: 4.0,
                },
            ]),
            ..CriteriaOverrides::default()
        };
        assert_eq!(
            defaults.merge(overlapping),
            Err(CriteriaError::OverlappingBudgetBands { index: 1 })
        );

        let inverted = CriteriaOverrides {
            budget_bands: Some(vec![BudgetBand {
                lower: 10_000.0,
                upper: Some(5_000.0),
                weight: 3.0,
            }]),
            ..CriteriaOverrides::default()
        };
        assert_eq!(
            defaults.merge(inverted),
            Err(CriteriaError::BudgetBandBounds { index: 0 })
        );

        let after_unbounded = CriteriaOverrides {
            budget_bands: Some(vec![
                BudgetBand {
                    lower: 0.0,
                    upper: None,
                    weight: 3.0,
                },
                BudgetBand {
                    lower: 10.0,
                    upper: Some(20.0),
                    weight: 3.0,
                },
            ]),
            ..CriteriaOverrides::default()
        };
        assert_eq!(
            defaults.merge(after_unbounded),
            Err(CriteriaError::OverlappingBudgetBands { index: 1 })
        );
    }

    #[test]
    fn rejects_unclassified_weight_at_or_above_named_sectors() {
        let overrides = CriteriaOverrides {
            unclassified_weight: Some(3.3),
            ..CriteriaOverrides::default()
        };
        assert!(matches!(
            CriteriaConfig::load_defaults().merge(overrides),
            Err(CriteriaError::UnclassifiedWeight { .. })
        ));
    }

    #[test]
    fn rejects_inverted_deadline_thresholds_and_zero_weights() {
        let defaults = CriteriaConfig::load_defaults();
        let thresholds = CriteriaOverrides {
            deadline_penalty_days: Some(5),
            deadline_expiry_days: Some(10),
            ..CriteriaOverrides::default()
        };
        assert!(matches!(
            defaults.merge(thresholds),
            Err(CriteriaError::DeadlineThresholds { .. })
        ));

        let mut zero = CriteriaOverrides::default();
        for criterion in Criterion::ALL {
            zero.criterion_weights.insert(criterion, 0.0);
        }
        assert_eq!(defaults.merge(zero), Err(CriteriaError::ZeroCriterionWeights));
    }

    #[test]
    fn normalized_weights_sum_to_one() {
        let mut overrides = CriteriaOverrides::default();
        overrides.criterion_weights.insert(Criterion::Sector, 3.0);
        overrides.criterion_weights.insert(Criterion::AiContent, 0.0);
        let config = CriteriaConfig::load_defaults()
            .merge(overrides)
            .expect("valid overrides");

        let weights = config.normalized_weights();
        assert!((weights.sum() - 1.0).abs() < 1e-9);
        assert_eq!(weights.get(Criterion::AiContent), 0.0);
        assert!(weights.get(Criterion::Sector) > 0.7);
    }

    #[test]
    fn overrides_deserialize_from_json() {
        let overrides: CriteriaOverrides = serde_json::from_str(
            r#"{
                "sector_weights": { "fisheries": 4.0 },
                "criterion_weights": { "experience": 0.4 },
                "deadline_penalty_days": 21
            }"#,
        )
        .expect("overrides parse");
        assert_eq!(overrides.sector_weights.get("fisheries"), Some(&4.0));
        assert_eq!(overrides.criterion_weights.get(&Criterion::Experience), Some(&0.4));
        assert_eq!(overrides.deadline_penalty_days, Some(21));

        let unknown = serde_json::from_str::<CriteriaOverrides>(r#"{ "sector": {} }"#);
        assert!(unknown.is_err());
    }
}
