//! Measures and energy products the statistics service knows about.

use std::sync::LazyLock;

use regex::Regex;

/// A queryable measure and the words that name it.
pub struct MeasureDef {
    pub id: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub terms: &'static [&'static str],
}

pub const MEASURES: &[MeasureDef] = &[
    MeasureDef {
        id: "price",
        label: "Price",
        unit: "EUR/kWh",
        terms: &["price", "prices", "pricing", "cost", "costs", "tariff", "tariffs"],
    },
    MeasureDef {
        id: "consumption",
        label: "Final energy consumption",
        unit: "ktoe",
        terms: &["consumption", "demand", "usage"],
    },
    MeasureDef {
        id: "production",
        label: "Primary production",
        unit: "ktoe",
        terms: &["production", "generation", "output", "produced", "generated"],
    },
    MeasureDef {
        id: "imports",
        label: "Imports",
        unit: "ktoe",
        terms: &["imports", "import", "imported"],
    },
    MeasureDef {
        id: "exports",
        label: "Exports",
        unit: "ktoe",
        terms: &["exports", "export", "exported"],
    },
    MeasureDef {
        id: "emissions",
        label: "Greenhouse gas emissions",
        unit: "Mt CO2e",
        terms: &["emissions", "emission", "co2", "carbon", "greenhouse"],
    },
    MeasureDef {
        id: "capacity",
        label: "Installed capacity",
        unit: "MW",
        terms: &["capacity", "installed"],
    },
    MeasureDef {
        id: "share",
        label: "Share in gross final consumption",
        unit: "%",
        terms: &["share", "mix", "percentage", "proportion"],
    },
    MeasureDef {
        id: "dependency",
        label: "Import dependency",
        unit: "%",
        terms: &["dependency", "dependence", "reliance"],
    },
    MeasureDef {
        id: "intensity",
        label: "Energy intensity",
        unit: "kgoe per 1000 EUR",
        terms: &["intensity", "efficiency"],
    },
];

/// An energy product and its spellings. The first spelling is canonical.
pub struct ProductDef {
    pub name: &'static str,
    pub terms: &'static [&'static str],
}

pub const PRODUCTS: &[ProductDef] = &[
    ProductDef {
        name: "electricity",
        terms: &["electricity", "electric", "power"],
    },
    ProductDef {
        name: "natural gas",
        terms: &["natural gas", "gas", "lng"],
    },
    ProductDef {
        name: "oil",
        terms: &["oil", "crude", "petroleum", "diesel", "petrol", "gasoline"],
    },
    ProductDef {
        name: "coal",
        terms: &["coal", "lignite"],
    },
    ProductDef {
        name: "nuclear",
        terms: &["nuclear"],
    },
    ProductDef {
        name: "renewables",
        terms: &["renewables", "renewable"],
    },
    ProductDef {
        name: "wind",
        terms: &["wind"],
    },
    ProductDef {
        name: "solar",
        terms: &["solar", "photovoltaic", "pv"],
    },
    ProductDef {
        name: "hydro",
        terms: &["hydro", "hydropower"],
    },
    ProductDef {
        name: "biomass",
        terms: &["biomass", "biofuel", "biofuels", "biogas"],
    },
    ProductDef {
        name: "geothermal",
        terms: &["geothermal"],
    },
    ProductDef {
        name: "hydrogen",
        terms: &["hydrogen"],
    },
];

fn matcher(terms: &[&str]) -> Regex {
    let mut sorted: Vec<&str> = terms.to_vec();
    sorted.sort_by_key(|t| std::cmp::Reverse(t.len()));
    let alternatives: Vec<String> = sorted
        .iter()
        .map(|t| {
            t.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect();
    Regex::new(&format!(r"\b(?:{})\b", alternatives.join("|"))).unwrap()
}

pub(crate) static MEASURE_MATCHERS: LazyLock<Vec<(&'static MeasureDef, Regex)>> =
    LazyLock::new(|| MEASURES.iter().map(|m| (m, matcher(m.terms))).collect());

pub(crate) static PRODUCT_MATCHERS: LazyLock<Vec<(&'static ProductDef, Regex)>> =
    LazyLock::new(|| PRODUCTS.iter().map(|p| (p, matcher(p.terms))).collect());

pub fn measure_by_id(id: &str) -> Option<&'static MeasureDef> {
    MEASURES.iter().find(|m| m.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_and_names_are_unique() {
        let mut ids: Vec<_> = MEASURES.iter().map(|m| m.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), MEASURES.len());

        let mut names: Vec<_> = PRODUCTS.iter().map(|p| p.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PRODUCTS.len());
    }

    #[test]
    fn no_term_names_two_products() {
        let mut terms: Vec<_> = PRODUCTS.iter().flat_map(|p| p.terms.iter()).collect();
        let total = terms.len();
        terms.sort_unstable();
        terms.dedup();
        assert_eq!(terms.len(), total);
    }

    #[test]
    fn matchers_prefer_longer_terms() {
        let (_, re) = &PRODUCT_MATCHERS[1];
        assert_eq!(re.find("natural gas prices").unwrap().as_str(), "natural gas");
        assert!(re.find("gasket").is_none());
    }

    #[test]
    fn lookup_measure() {
        assert_eq!(measure_by_id("capacity").map(|m| m.unit), Some("MW"));
        assert!(measure_by_id("weather").is_none());
    }
}
