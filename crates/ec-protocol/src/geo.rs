//! Static country table shared by the scorer and the entity extractor.

use std::sync::LazyLock;

use regex::Regex;

/// A country the statistics service publishes figures for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, lowercase.
    pub iso2: &'static str,
    /// Canonical English name, lowercase.
    pub name: &'static str,
    /// Alternative spellings, lowercase.
    pub aliases: &'static [&'static str],
}

const fn country(iso2: &'static str, name: &'static str, aliases: &'static [&'static str]) -> Country {
    Country { iso2, name, aliases }
}

pub static COUNTRIES: &[Country] = &[
    country("at", "austria", &[]),
    country("be", "belgium", &[]),
    country("bg", "bulgaria", &[]),
    country("hr", "croatia", &[]),
    country("cy", "cyprus", &[]),
    country("cz", "czechia", &["czech republic"]),
    country("dk", "denmark", &[]),
    country("ee", "estonia", &[]),
    country("fi", "finland", &[]),
    country("fr", "france", &[]),
    country("de", "germany", &["deutschland"]),
    country("gr", "greece", &[]),
    country("hu", "hungary", &[]),
    country("ie", "ireland", &[]),
    country("it", "italy", &[]),
    country("lv", "latvia", &[]),
    country("lt", "lithuania", &[]),
    country("lu", "luxembourg", &[]),
    country("mt", "malta", &[]),
    country("nl", "netherlands", &["holland", "the netherlands"]),
    country("pl", "poland", &[]),
    country("pt", "portugal", &[]),
    country("ro", "romania", &[]),
    country("sk", "slovakia", &[]),
    country("si", "slovenia", &[]),
    country("es", "spain", &[]),
    country("se", "sweden", &[]),
    country("no", "norway", &[]),
    country("is", "iceland", &[]),
    country("ch", "switzerland", &[]),
    country("gb", "united kingdom", &["uk", "britain", "great britain", "england"]),
    country("ua", "ukraine", &[]),
    country("tr", "turkey", &["turkiye"]),
    country("rs", "serbia", &[]),
    country("al", "albania", &[]),
    country("ba", "bosnia and herzegovina", &["bosnia"]),
    country("me", "montenegro", &[]),
    country("mk", "north macedonia", &["macedonia"]),
    country("md", "moldova", &[]),
    country("ge", "georgia", &[]),
    country("us", "united states", &["usa", "america", "united states of america"]),
    country("ca", "canada", &[]),
    country("mx", "mexico", &[]),
    country("br", "brazil", &[]),
    country("cn", "china", &[]),
    country("jp", "japan", &[]),
    country("kr", "south korea", &["korea"]),
    country("in", "india", &[]),
    country("au", "australia", &[]),
    country("za", "south africa", &[]),
];

/// ISO codes that are also everyday English (or common foreign) words.
/// They only count as countries when spelled out.
pub const WORDLIKE_ISO2: &[&str] = &[
    "at", "be", "in", "is", "it", "me", "no", "us", "ca", "al", "md", "ge", "de", "tr",
];

impl Country {
    /// Names and aliases under which this country can appear in text.
    pub fn spellings(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }

    /// Whether a bare `iso2` mention is reliable enough to count.
    pub fn iso2_is_distinctive(&self) -> bool {
        !WORDLIKE_ISO2.contains(&self.iso2)
    }
}

pub fn by_iso2(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.iso2 == code)
}

/// Look up a country by name or alias (already lowercase).
pub fn by_name(name: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.spellings().any(|s| s == name))
}

/// Every spelling, longest first; internal whitespace is flexible.
static NAME_MATCHER: LazyLock<Regex> = LazyLock::new(|| {
    let mut spellings: Vec<&str> = COUNTRIES.iter().flat_map(|c| c.spellings()).collect();
    spellings.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    let alternatives: Vec<String> = spellings
        .iter()
        .map(|s| {
            s.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect();
    Regex::new(&format!(r"\b(?:{})\b", alternatives.join("|"))).unwrap()
});

static CODE_MATCHER: LazyLock<Regex> = LazyLock::new(|| {
    let codes: Vec<&str> = COUNTRIES
        .iter()
        .filter(|c| c.iso2_is_distinctive())
        .map(|c| c.iso2)
        .collect();
    Regex::new(&format!(r"\b(?:{})\b", codes.join("|"))).unwrap()
});

/// Whether lowercase `text` names a country or uses a distinctive code.
pub fn mentions_country(text: &str) -> bool {
    NAME_MATCHER.is_match(text) || CODE_MATCHER.is_match(text)
}

/// Every country mention in lowercase `text` with its byte offset, sorted
/// by position. Repeats are kept.
pub fn find_countries(text: &str) -> Vec<(usize, &'static Country)> {
    let mut found: Vec<(usize, &'static Country)> = NAME_MATCHER
        .find_iter(text)
        .filter_map(|m| {
            let spelled = m.as_str().split_whitespace().collect::<Vec<_>>().join(" ");
            by_name(&spelled).map(|c| (m.start(), c))
        })
        .chain(
            CODE_MATCHER
                .find_iter(text)
                .filter_map(|m| by_iso2(m.as_str()).map(|c| (m.start(), c))),
        )
        .collect();
    found.sort_by_key(|(pos, _)| *pos);
    found
}
