//! Budget text parsing. Never fails: anything it cannot read is `Unknown`.

use serde::{Deserialize, Serialize};

use super::domain::BudgetInput;
use super::tokens::tokenize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Aud,
    Cad,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Aud => "AUD",
            Currency::Cad => "CAD",
        }
    }
}

/// Result of reading a budget. At least one bound is set on `Range`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BudgetParse {
    Range {
        min: Option<f64>,
        max: Option<f64>,
        currency: Currency,
    },
    Unknown,
}

impl BudgetParse {
    /// Amount used for band lookup: the upper bound when known.
    pub fn representative_amount(&self) -> Option<f64> {
        match self {
            BudgetParse::Range { min, max, .. } => max.or(*min),
            BudgetParse::Unknown => None,
        }
    }

    /// Both bounds published and distinct.
    pub fn is_well_defined(&self) -> bool {
        matches!(
            self,
            BudgetParse::Range {
                min: Some(min),
                max: Some(max),
                ..
            } if min < max
        )
    }
}

pub fn resolve_budget(input: Option<&BudgetInput>) -> BudgetParse {
    match input {
        None => BudgetParse::Unknown,
        Some(BudgetInput::Text(text)) => parse_budget(text),
        Some(BudgetInput::Range { min, max }) => from_bounds(*min, *max, Currency::Usd),
    }
}

/// Parses free-form budget text such as `"50000-200000"`, `"$1,000,000+"`,
/// `"USD 250k"` or `"up to 80,000"`.
pub fn parse_budget(text: &str) -> BudgetParse {
    let lowered = text.trim().to_lowercase();
    if lowered.is_empty() {
        return BudgetParse::Unknown;
    }

    let currency = detect_currency(text);
    let chars: Vec<char> = lowered.chars().collect();
    let amounts = scan_amounts(&chars);

    if let Some([low, high]) = amounts.windows(2).find(|pair| pair[1].joined_by_range) {
        let mut low = low.clone();
        if low.scale.is_none() && high.scale.is_some() && low.raw < high.raw {
            low.scale = high.scale;
        }
        let (a, b) = (low.value(), high.value());
        return from_bounds(Some(a.min(b)), Some(a.max(b)), currency);
    }

    // Unrelated figures (lot numbers, durations, years) never form a range:
    // the largest one is the budget.
    let Some(amount) = amounts
        .iter()
        .max_by(|left, right| left.value().total_cmp(&right.value()))
    else {
        return BudgetParse::Unknown;
    };

    let value = amount.value();
    if amount.open_ended || marks_lower_bound(&chars, amount) {
        from_bounds(Some(value), None, currency)
    } else {
        from_bounds(None, Some(value), currency)
    }
}

fn from_bounds(min: Option<f64>, max: Option<f64>, currency: Currency) -> BudgetParse {
    let valid = |value: Option<f64>| value.filter(|amount| amount.is_finite() && *amount >= 0.0);
    let (min, max) = match (valid(min), valid(max)) {
        (Some(a), Some(b)) if a > b => (Some(b), Some(a)),
        bounds => bounds,
    };

    let all_zero = min.unwrap_or(0.0) == 0.0 && max.unwrap_or(0.0) == 0.0;
    if (min.is_none() && max.is_none()) || all_zero {
        return BudgetParse::Unknown;
    }

    BudgetParse::Range { min, max, currency }
}

fn detect_currency(text: &str) -> Currency {
    let upper = text.to_uppercase();
    for (code, currency) in [
        ("USD", Currency::Usd),
        ("EUR", Currency::Eur),
        ("GBP", Currency::Gbp),
        ("AUD", Currency::Aud),
        ("CAD", Currency::Cad),
    ] {
        if upper.contains(code) {
            return currency;
        }
    }

    if upper.contains("A$") {
        Currency::Aud
    } else if upper.contains("C$") {
        Currency::Cad
    } else if text.contains('€') {
        Currency::Eur
    } else if text.contains('£') {
        Currency::Gbp
    } else {
        Currency::Usd
    }
}

const LEADING_LOWER_BOUNDS: [&[&str]; 6] = [
    &["from"],
    &["over"],
    &["above"],
    &["minimum"],
    &["min"],
    &["at", "least"],
];
const TRAILING_LOWER_BOUNDS: [&[&str]; 2] = [&["or", "more"], &["and", "above"]];
const CURRENCY_TOKENS: [&str; 7] = ["usd", "eur", "gbp", "aud", "cad", "a", "c"];

/// True when whole words right before or after `amount` mark it as a floor,
/// e.g. `"from 50,000"` or `"50,000 or more"`. Currency codes in between are
/// ignored.
fn marks_lower_bound(chars: &[char], amount: &Amount) -> bool {
    let before: String = chars[..amount.start].iter().collect();
    let mut leading = tokenize(&before);
    while leading
        .last()
        .is_some_and(|token| CURRENCY_TOKENS.contains(&token.as_str()))
    {
        leading.pop();
    }

    let after: String = chars[amount.end..].iter().collect();
    let trailing = tokenize(&after);

    LEADING_LOWER_BOUNDS.iter().any(|marker| {
        leading.len() >= marker.len() && same_words(&leading[leading.len() - marker.len()..], marker)
    }) || TRAILING_LOWER_BOUNDS.iter().any(|marker| {
        trailing.len() >= marker.len() && same_words(&trailing[..marker.len()], marker)
    })
}

fn same_words(tokens: &[String], words: &[&str]) -> bool {
    tokens.iter().zip(words).all(|(token, word)| token.as_str() == *word)
}

#[derive(Debug, Clone)]
struct Amount {
    raw: f64,
    scale: Option<f64>,
    open_ended: bool,
    /// Char offsets of the figure, scale word and `+` included.
    start: usize,
    end: usize,
    /// Separated from the previous amount by `-`, an en dash or `to`.
    joined_by_range: bool,
}

impl Amount {
    fn value(&self) -> f64 {
        self.raw * self.scale.unwrap_or(1.0)
    }
}

const RANGE_SEPARATORS: [&str; 4] = ["-", "\u{2013}", "\u{2014}", "to"];

fn scan_amounts(chars: &[char]) -> Vec<Amount> {
    let mut amounts = Vec::new();
    let mut index = 0;
    let mut previous_end: Option<usize> = None;

    while index < chars.len() {
        if !chars[index].is_ascii_digit() {
            index += 1;
            continue;
        }

        let start = index;
        while index < chars.len()
            && (chars[index].is_ascii_digit() || chars[index] == ',' || chars[index] == '.')
        {
            index += 1;
        }
        let literal: String = chars[start..index].iter().collect();
        let Some(raw) = parse_literal(&literal) else {
            continue;
        };

        let mut cursor = index;
        while cursor < chars.len() && chars[cursor] == ' ' {
            cursor += 1;
        }
        let word_start = cursor;
        while cursor < chars.len() && chars[cursor].is_alphabetic() {
            cursor += 1;
        }
        let word: String = chars[word_start..cursor].iter().collect();
        let scale = scale_for(&word);
        if scale.is_some() {
            index = cursor;
        }

        let open_ended = chars.get(index) == Some(&'+');
        let joined_by_range = previous_end.is_some_and(|end| {
            let gap: String = chars[end..start].iter().collect();
            RANGE_SEPARATORS.contains(&gap.trim())
        });
        previous_end = Some(index);

        amounts.push(Amount {
            raw,
            scale,
            open_ended,
            start,
            end: if open_ended { index + 1 } else { index },
            joined_by_range,
        });
    }

    amounts
}

fn parse_literal(literal: &str) -> Option<f64> {
    let trimmed = literal.trim_end_matches(['.', ',']);
    if trimmed.is_empty() {
        return None;
    }

    let cleaned = if trimmed.matches('.').count() > 1 {
        trimmed.replace(['.', ','], "")
    } else {
        trimmed.replace(',', "")
    };

    cleaned.parse::<f64>().ok()
}

fn scale_for(word: &str) -> Option<f64> {
    match word {
        "k" | "thousand" => Some(1_000.0),
        "m" | "mn" | "mil" | "million" | "millions" => Some(1_000_000.0),
        "b" | "bn" | "billion" => Some(1_000_000_000.0),
        _ => None,
    }
}
