use serde::{Deserialize, Serialize};

/// Structured values found in an utterance, independent of its intent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entities {
    /// Individual years mentioned, in order of appearance, deduplicated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub years: Vec<u16>,
    /// Inclusive span when the text names one ("from 2010 to 2020", "2015-2019").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_range: Option<YearRange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<CountryRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub measures: Vec<Measure>,
    /// Energy products ("wind", "natural gas", ...).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<String>,
}

impl Entities {
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
            && self.year_range.is_none()
            && self.countries.is_empty()
            && self.measures.is_empty()
            && self.products.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub from: u16,
    pub to: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRef {
    pub iso2: String,
    pub name: String,
}

/// A statistical measure the data service can be queried for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measure {
    /// Stable identifier, e.g. "electricity_price".
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Publication unit.
    pub unit: String,
}
