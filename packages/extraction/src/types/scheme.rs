//! Scheme types - canonical mutual fund records and their facts.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The fixed set of facts tracked for every scheme.
///
/// Declaration order matters: it is the tie-break order used by the
/// query classifier when a query mentions more than one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactField {
    ExpenseRatio,
    ExitLoad,
    MinimumSip,
    MinimumLumpsum,
    FirstInvestment,
    SubsequentInvestment,
    LockIn,
    Riskometer,
    Benchmark,
    Nav,
    FundSize,
    FundManager,
    StampDuty,
    TaxImplications,
}

impl FactField {
    /// All fields, in declaration order.
    pub const ALL: &'static [FactField] = &[
        FactField::ExpenseRatio,
        FactField::ExitLoad,
        FactField::MinimumSip,
        FactField::MinimumLumpsum,
        FactField::FirstInvestment,
        FactField::SubsequentInvestment,
        FactField::LockIn,
        FactField::Riskometer,
        FactField::Benchmark,
        FactField::Nav,
        FactField::FundSize,
        FactField::FundManager,
        FactField::StampDuty,
        FactField::TaxImplications,
    ];

    /// Wire name used in serialized records and intent labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            FactField::ExpenseRatio => "expense_ratio",
            FactField::ExitLoad => "exit_load",
            FactField::MinimumSip => "minimum_sip",
            FactField::MinimumLumpsum => "minimum_lumpsum",
            FactField::FirstInvestment => "first_investment",
            FactField::SubsequentInvestment => "subsequent_investment",
            FactField::LockIn => "lock_in",
            FactField::Riskometer => "riskometer",
            FactField::Benchmark => "benchmark",
            FactField::Nav => "nav",
            FactField::FundSize => "fund_size",
            FactField::FundManager => "fund_manager",
            FactField::StampDuty => "stamp_duty",
            FactField::TaxImplications => "tax_implications",
        }
    }

    /// Human-readable label for answer rendering.
    pub fn label(&self) -> &'static str {
        match self {
            FactField::ExpenseRatio => "Expense ratio",
            FactField::ExitLoad => "Exit load",
            FactField::MinimumSip => "Minimum SIP",
            FactField::MinimumLumpsum => "Minimum lumpsum",
            FactField::FirstInvestment => "First investment",
            FactField::SubsequentInvestment => "Subsequent investment",
            FactField::LockIn => "Lock-in period",
            FactField::Riskometer => "Riskometer",
            FactField::Benchmark => "Benchmark",
            FactField::Nav => "NAV",
            FactField::FundSize => "Fund size",
            FactField::FundManager => "Fund manager",
            FactField::StampDuty => "Stamp duty",
            FactField::TaxImplications => "Tax implications",
        }
    }

    /// Parse a wire name back into a field. Used to validate labels
    /// proposed by external components against the fixed vocabulary.
    pub fn parse(name: &str) -> Option<FactField> {
        FactField::ALL.iter().copied().find(|f| f.as_str() == name)
    }
}

/// The value of a single fact.
///
/// Absence of data is a value, not a missing key: a fact that could not
/// be extracted is `Unavailable`, never an error and never an absent
/// entry. Serialized as the string value or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum FactValue {
    Available(String),
    Unavailable,
}

impl FactValue {
    pub fn is_available(&self) -> bool {
        matches!(self, FactValue::Available(_))
    }

    /// The value as a string, if available.
    pub fn value(&self) -> Option<&str> {
        match self {
            FactValue::Available(v) => Some(v),
            FactValue::Unavailable => None,
        }
    }
}

impl Default for FactValue {
    fn default() -> Self {
        FactValue::Unavailable
    }
}

impl From<Option<String>> for FactValue {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.trim().is_empty() => FactValue::Available(v),
            _ => FactValue::Unavailable,
        }
    }
}

impl From<FactValue> for Option<String> {
    fn from(value: FactValue) -> Self {
        match value {
            FactValue::Available(v) => Some(v),
            FactValue::Unavailable => None,
        }
    }
}

/// One value per [`FactField`], always present.
///
/// Using a struct rather than a map makes the "every field has an entry"
/// invariant hold by construction; downstream code only ever checks for
/// the `Unavailable` sentinel, never for key presence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactSet {
    pub expense_ratio: FactValue,
    pub exit_load: FactValue,
    pub minimum_sip: FactValue,
    pub minimum_lumpsum: FactValue,
    pub first_investment: FactValue,
    pub subsequent_investment: FactValue,
    pub lock_in: FactValue,
    pub riskometer: FactValue,
    pub benchmark: FactValue,
    pub nav: FactValue,
    pub fund_size: FactValue,
    pub fund_manager: FactValue,
    pub stamp_duty: FactValue,
    pub tax_implications: FactValue,
}

impl FactSet {
    /// A fact set with every field unavailable.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FactField) -> &FactValue {
        match field {
            FactField::ExpenseRatio => &self.expense_ratio,
            FactField::ExitLoad => &self.exit_load,
            FactField::MinimumSip => &self.minimum_sip,
            FactField::MinimumLumpsum => &self.minimum_lumpsum,
            FactField::FirstInvestment => &self.first_investment,
            FactField::SubsequentInvestment => &self.subsequent_investment,
            FactField::LockIn => &self.lock_in,
            FactField::Riskometer => &self.riskometer,
            FactField::Benchmark => &self.benchmark,
            FactField::Nav => &self.nav,
            FactField::FundSize => &self.fund_size,
            FactField::FundManager => &self.fund_manager,
            FactField::StampDuty => &self.stamp_duty,
            FactField::TaxImplications => &self.tax_implications,
        }
    }

    pub fn set(&mut self, field: FactField, value: FactValue) {
        match field {
            FactField::ExpenseRatio => self.expense_ratio = value,
            FactField::ExitLoad => self.exit_load = value,
            FactField::MinimumSip => self.minimum_sip = value,
            FactField::MinimumLumpsum => self.minimum_lumpsum = value,
            FactField::FirstInvestment => self.first_investment = value,
            FactField::SubsequentInvestment => self.subsequent_investment = value,
            FactField::LockIn => self.lock_in = value,
            FactField::Riskometer => self.riskometer = value,
            FactField::Benchmark => self.benchmark = value,
            FactField::Nav => self.nav = value,
            FactField::FundSize => self.fund_size = value,
            FactField::FundManager => self.fund_manager = value,
            FactField::StampDuty => self.stamp_duty = value,
            FactField::TaxImplications => self.tax_implications = value,
        }
    }

    /// Iterate fields in declaration order with their values.
    pub fn iter(&self) -> impl Iterator<Item = (FactField, &FactValue)> {
        FactField::ALL.iter().map(move |f| (*f, self.get(*f)))
    }

    /// Fields that have an extracted value, in declaration order.
    pub fn available(&self) -> impl Iterator<Item = (FactField, &str)> {
        self.iter()
            .filter_map(|(f, v)| v.value().map(|value| (f, value)))
    }

    pub fn available_count(&self) -> usize {
        self.available().count()
    }
}

/// Stable identifier for a scheme, derived from its display name.
///
/// The derivation is deterministic: identical display names always yield
/// identical ids, which keeps re-ingestion idempotent. Two distinct
/// schemes whose names normalize to the same slug share an id and are
/// NOT merged; record replacement is keyed by source locator instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemeId(pub String);

const SCHEME_ID_MAX_LEN: usize = 100;

impl SchemeId {
    /// Derive an id from a display name: lower-cased, spaces to `-`,
    /// `&` to `and`, everything but alphanumerics/`-`/`_` stripped,
    /// truncated to 100 characters.
    pub fn from_display_name(display_name: &str) -> Self {
        let slug: String = display_name
            .to_lowercase()
            .replace(' ', "-")
            .replace('&', "and")
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
            .take(SCHEME_ID_MAX_LEN)
            .collect();
        Self(slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SchemeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single portfolio holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingEntry {
    /// Name of the held instrument or issuer
    pub name: String,

    /// Instrument type as printed on the page (e.g. "NCD", "Cash")
    pub instrument_type: String,

    /// Share of assets, as a percentage string (e.g. "4.25%")
    pub asset_percentage: String,
}

impl HoldingEntry {
    fn percentage_value(&self) -> Option<f64> {
        self.asset_percentage.trim_end_matches('%').trim().parse().ok()
    }
}

/// Debt/cash roll-up derived from holdings.
///
/// Always computed on demand from the stored holdings, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioComposition {
    pub total_debt: Option<String>,
    pub total_cash: Option<String>,
    pub debt_breakdown: IndexMap<String, String>,
    pub cash_breakdown: IndexMap<String, String>,
}

const DEBT_INSTRUMENT_MARKERS: &[&str] = &["debt", "bond", "ncd", "debenture", "g-sec", "gsec"];
const CASH_INSTRUMENT_MARKERS: &[&str] = &["cash", "deposit", "treps", "repo"];

impl PortfolioComposition {
    /// Roll up debt and cash percentages from a holdings list.
    pub fn from_holdings(holdings: &[HoldingEntry]) -> Self {
        let mut composition = PortfolioComposition::default();
        let mut total_debt = 0.0_f64;
        let mut total_cash = 0.0_f64;

        for holding in holdings {
            let Some(pct) = holding.percentage_value() else {
                continue;
            };
            let instrument = holding.instrument_type.to_lowercase();

            if DEBT_INSTRUMENT_MARKERS.iter().any(|m| instrument.contains(m)) {
                total_debt += pct;
                composition
                    .debt_breakdown
                    .insert(holding.name.clone(), holding.asset_percentage.clone());
            } else if CASH_INSTRUMENT_MARKERS.iter().any(|m| instrument.contains(m)) {
                total_cash += pct;
                composition
                    .cash_breakdown
                    .insert(holding.name.clone(), holding.asset_percentage.clone());
            }
        }

        if total_debt > 0.0 {
            composition.total_debt = Some(format!("{total_debt:.2}%"));
        }
        if total_cash > 0.0 {
            composition.total_cash = Some(format!("{total_cash:.2}%"));
        }

        composition
    }
}

/// A canonical mutual fund scheme record.
///
/// Immutable once stored; re-ingestion replaces the whole record when the
/// source locator matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub id: SchemeId,
    pub display_name: String,
    pub category: Option<String>,
    pub source_locator: String,
    pub facts: FactSet,
    #[serde(default)]
    pub holdings: Vec<HoldingEntry>,
    #[serde(default)]
    pub sector_allocation: IndexMap<String, String>,
    pub last_updated: DateTime<Utc>,
}

impl Scheme {
    /// Derived debt/cash composition for this scheme's holdings.
    pub fn portfolio_composition(&self) -> PortfolioComposition {
        PortfolioComposition::from_holdings(&self.holdings)
    }
}
