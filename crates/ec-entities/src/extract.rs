//! Pulling structured values out of cleaned utterances.
//!
//! Input is expected to be normalized already (lowercase, no diacritics,
//! single spaces), i.e. the `cleaned` text an intent engine produced.

use std::sync::LazyLock;

use regex::Regex;

use ec_protocol::geo;
use ec_protocol::{CountryRef, Entities, Measure, YearRange};

use crate::catalog::{MEASURE_MATCHERS, PRODUCT_MATCHERS};

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

static YEAR_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:(?:from|between)\s+)?((?:19|20)\d{2})\s*(?:-|to|until|till|through|and)\s*((?:19|20)\d{2})\b",
    )
    .unwrap()
});

/// Extract every entity from cleaned text.
pub fn extract(text: &str) -> Entities {
    let entities = Entities {
        years: years(text),
        year_range: year_range(text),
        countries: countries(text),
        measures: measures(text),
        products: products(text),
    };
    tracing::debug!(
        years = entities.years.len(),
        countries = entities.countries.len(),
        measures = entities.measures.len(),
        products = entities.products.len(),
        "entities extracted"
    );
    entities
}

/// Years in order of first appearance.
pub fn years(text: &str) -> Vec<u16> {
    let mut out: Vec<u16> = Vec::new();
    for m in YEAR.find_iter(text) {
        if let Ok(year) = m.as_str().parse::<u16>()
            && !out.contains(&year)
        {
            out.push(year);
        }
    }
    out
}

/// First explicit span; reversed bounds are put in order.
pub fn year_range(text: &str) -> Option<YearRange> {
    let caps = YEAR_RANGE.captures(text)?;
    let a: u16 = caps.get(1)?.as_str().parse().ok()?;
    let b: u16 = caps.get(2)?.as_str().parse().ok()?;
    Some(YearRange {
        from: a.min(b),
        to: a.max(b),
    })
}

/// Countries in order of first appearance, by name, alias or distinctive code.
pub fn countries(text: &str) -> Vec<CountryRef> {
    let mut out: Vec<CountryRef> = Vec::new();
    for (_, country) in geo::find_countries(text) {
        if !out.iter().any(|c| c.iso2 == country.iso2) {
            out.push(CountryRef {
                iso2: country.iso2.to_uppercase(),
                name: title_case(country.name),
            });
        }
    }
    out
}

pub fn measures(text: &str) -> Vec<Measure> {
    let mut found: Vec<(usize, Measure)> = MEASURE_MATCHERS
        .iter()
        .filter_map(|(def, re)| {
            re.find(text).map(|m| {
                (
                    m.start(),
                    Measure {
                        id: def.id.to_string(),
                        label: def.label.to_string(),
                        unit: def.unit.to_string(),
                    },
                )
            })
        })
        .collect();
    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, m)| m).collect()
}

/// Canonical product names in order of first appearance.
pub fn products(text: &str) -> Vec<String> {
    let mut found: Vec<(usize, &'static str)> = PRODUCT_MATCHERS
        .iter()
        .filter_map(|(def, re)| re.find(text).map(|m| (m.start(), def.name)))
        .collect();
    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, name)| name.to_string()).collect()
}

fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| match word {
            "and" | "of" => word.to_string(),
            _ => {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_full_query() {
        let e = extract("what is the electricity price in france in 2020?");
        assert_eq!(e.years, vec![2020]);
        assert_eq!(e.year_range, None);
        assert_eq!(e.countries.len(), 1);
        assert_eq!(e.countries[0].iso2, "FR");
        assert_eq!(e.countries[0].name, "France");
        assert_eq!(e.measures[0].id, "price");
        assert_eq!(e.products, vec!["electricity"]);
    }

    #[test]
    fn years_are_deduplicated_in_order() {
        assert_eq!(years("2019 vs 2015 and 2019 again"), vec![2019, 2015]);
        assert!(years("about 12000 households").is_empty());
    }

    #[test]
    fn year_ranges() {
        assert_eq!(
            year_range("from 2010 to 2020"),
            Some(YearRange { from: 2010, to: 2020 })
        );
        assert_eq!(
            year_range("2019-2015"),
            Some(YearRange { from: 2015, to: 2019 })
        );
        assert_eq!(
            year_range("between 2000 and 2005"),
            Some(YearRange { from: 2000, to: 2005 })
        );
        assert_eq!(year_range("in 2020"), None);
    }

    #[test]
    fn countries_by_alias_and_code() {
        let found = countries("compare the uk with de and fr");
        let codes: Vec<_> = found.iter().map(|c| c.iso2.as_str()).collect();
        // "de" is also a common word and only counts when spelled out.
        assert_eq!(codes, vec!["GB", "FR"]);
        assert_eq!(found[0].name, "United Kingdom");
    }

    #[test]
    fn multiword_country_names() {
        let found = countries("gas in bosnia and herzegovina and the netherlands");
        assert_eq!(found[0].name, "Bosnia and Herzegovina");
        assert_eq!(found[1].iso2, "NL");
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn repeated_country_counted_once() {
        assert_eq!(countries("germany, deutschland and germany").len(), 1);
    }

    #[test]
    fn products_use_canonical_names() {
        assert_eq!(
            products("lng and natural gas versus pv"),
            vec!["natural gas", "solar"]
        );
    }

    #[test]
    fn measures_in_order_of_mention() {
        let ids: Vec<_> = measures("co2 emissions and installed capacity")
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["emissions", "capacity"]);
    }

    #[test]
    fn nothing_to_extract() {
        assert!(extract("hello there").is_empty());
        assert!(extract("").is_empty());
    }
}
