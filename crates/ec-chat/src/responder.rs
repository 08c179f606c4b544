//! Reply text for a resolved turn.

use ec_protocol::{Intent, Resolution};

use crate::session::{QueryContext, Rotation};

const GREETINGS: &[&str] = &[
    "Hello! I can look up energy statistics for you.",
    "Hi there! Ask me about energy prices, production or emissions.",
    "Hey! What energy data are you after today?",
];

const FAREWELLS: &[&str] = &[
    "Goodbye!",
    "See you next time.",
    "Bye, thanks for stopping by.",
];

const THANKS: &[&str] = &["You're welcome!", "Happy to help.", "Any time."];

const NEGATIVES: &[&str] = &[
    "No problem.",
    "Alright. Let me know if you need anything else.",
];

const SMALLTALK: &[&str] = &[
    "I'm a bot that knows a lot about energy statistics and not much else!",
    "I'd love to chat, but I'm best at energy numbers. Try asking about gas prices.",
    "Ha! Shall we look at some data instead?",
];

const STATEMENTS: &[&str] = &["Noted.", "Got it.", "Okay."];

const HELP: &str = "I can answer questions about energy statistics: prices, consumption, \
production, imports and exports, emissions and capacity, by country and year. \
Try \"electricity prices in France in 2020\", \"compare wind generation in Germany \
and Spain\" or \"show me a chart of coal consumption since 2010\". I can also \
export results as CSV or Excel.";

const TROUBLESHOOTING: &str = "Sorry you're running into trouble. Could you tell me \
what you were doing and what you saw? Reloading the page or narrowing the query \
(one country, fewer years) often helps.";

const INVALID: &str = "I didn't catch that. Could you rephrase?";

const UNKNOWN_QUESTION: &str = "I'm not sure I can answer that. I know about energy \
statistics such as prices, production and emissions.";

/// Compose the assistant's reply.
///
/// `query` must already include what this turn mentioned; `rotation`
/// belongs to the conversation the reply is for.
pub fn compose_reply(
    resolution: &Resolution,
    query: &QueryContext,
    rotation: &mut Rotation,
) -> String {
    match resolution.primary {
        Intent::Greeting => rotation.pick("greeting", GREETINGS).to_string(),
        Intent::Farewell => rotation.pick("farewell", FAREWELLS).to_string(),
        Intent::Thanks => rotation.pick("thanks", THANKS).to_string(),
        Intent::Affirmative => {
            if query.is_empty() {
                "Okay. What would you like to look at?".to_string()
            } else {
                format!("Great, fetching {}.", describe(query))
            }
        }
        Intent::Negative => rotation.pick("negative", NEGATIVES).to_string(),
        Intent::Help => HELP.to_string(),
        Intent::Troubleshooting => TROUBLESHOOTING.to_string(),
        Intent::DownloadRequest => {
            if query.is_empty() {
                "Sure. Which data would you like to download?".to_string()
            } else {
                format!("Preparing a download of {} (CSV or Excel).", describe(query))
            }
        }
        Intent::VizRequest => {
            if query.is_empty() {
                "Happy to draw a chart. What should it show?".to_string()
            } else {
                with_follow_up(format!("Here is a chart of {}.", describe(query)), query)
            }
        }
        Intent::DataQuery => with_follow_up(format!("Looking up {}.", describe(query)), query),
        Intent::CompareRequest => compare_reply(query),
        Intent::MetadataRequest => match &query.measure {
            Some(m) => format!(
                "{} is published in {}. Figures come from national statistical \
                 offices and are harmonised before publication.",
                m.label, m.unit
            ),
            None => "Our figures come from national statistical offices and are \
                     harmonised before publication. Which indicator are you asking about?"
                .to_string(),
        },
        Intent::Command => "Okay, starting fresh.".to_string(),
        Intent::Question => {
            if !resolution.modifiers.is_empty() && !query.is_empty() {
                with_follow_up(format!("Updated: {}.", describe(query)), query)
            } else {
                UNKNOWN_QUESTION.to_string()
            }
        }
        Intent::Smalltalk => rotation.pick("smalltalk", SMALLTALK).to_string(),
        Intent::Invalid => INVALID.to_string(),
        Intent::Statement
        | Intent::Ambiguous
        | Intent::TimeChange
        | Intent::FilterChange => {
            if !resolution.modifiers.is_empty() && !query.is_empty() {
                format!("Updated: {}.", describe(query))
            } else {
                rotation.pick("statement", STATEMENTS).to_string()
            }
        }
    }
}

fn compare_reply(query: &QueryContext) -> String {
    let sides = query.countries.len().max(query.products.len()).max(query.years.len());
    if sides < 2 && query.year_range.is_none() {
        format!(
            "Comparing {}. What should I compare it against?",
            describe(query)
        )
    } else {
        format!("Comparing {}.", describe(query))
    }
}

fn with_follow_up(reply: String, query: &QueryContext) -> String {
    let missing = missing(query);
    if missing.is_empty() {
        reply
    } else {
        format!("{reply} Which {} should I use?", join(&missing[..], "and"))
    }
}

/// Parts a data query still needs before it can run.
pub fn missing(query: &QueryContext) -> Vec<&'static str> {
    let mut out = Vec::new();
    if query.measure.is_none() && query.products.is_empty() {
        out.push("indicator");
    }
    if query.countries.is_empty() {
        out.push("country");
    }
    if !query.has_period() {
        out.push("year");
    }
    out
}

/// "price of electricity in France and Spain for 2020"
pub fn describe(query: &QueryContext) -> String {
    let mut out = match (&query.measure, query.products.is_empty()) {
        (Some(m), true) => m.label.to_lowercase(),
        (Some(m), false) => format!(
            "{} of {}",
            m.label.to_lowercase(),
            join(&query.products[..], "and")
        ),
        (None, false) => format!("{} data", join(&query.products[..], "and")),
        (None, true) => "energy data".to_string(),
    };
    if !query.countries.is_empty() {
        let names: Vec<&str> = query.countries.iter().map(|c| c.name.as_str()).collect();
        out.push_str(&format!(" in {}", join(&names[..], "and")));
    }
    if let Some(range) = query.year_range {
        out.push_str(&format!(" from {} to {}", range.from, range.to));
    } else if !query.years.is_empty() {
        let years: Vec<String> = query.years.iter().map(u16::to_string).collect();
        out.push_str(&format!(" for {}", join(&years[..], "and")));
    }
    out
}

fn join<S: AsRef<str>>(items: &[S], last: &str) -> String {
    match items {
        [] => String::new(),
        [one] => one.as_ref().to_string(),
        [init @ .., tail] => {
            let head: Vec<&str> = init.iter().map(|s| s.as_ref()).collect();
            format!("{} {last} {}", head.join(", "), tail.as_ref())
        }
    }
}
