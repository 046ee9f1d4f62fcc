//! Deterministic keyword rules used when the service is unavailable.
//!
//! The verb comes from the leading word of the sentence, or failing that
//! from the first verb keyword anywhere in it. Arguments are pulled out by
//! regex:
//!
//! - `sku <id>` or `code <id>`: the SKU, kept in the case it was typed
//! - `price <number>`: the price
//! - `qty <int>` / `quantity <int>`: an explicit quantity
//! - `name <word>`: an explicit name
//! - otherwise, the first standalone integer not claimed by another
//!   argument is the quantity for `add` and `subtract`, and the word after
//!   it is the name for `add`
//!
//! The rules never fill in defaults. A verb whose required arguments are
//! not all present in the sentence is an error, not a guess.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use stockroom_core::{Command, ItemPatch};

use crate::error::AgentError;

static PATTERNS: LazyLock<PhrasePatterns> = LazyLock::new(PhrasePatterns::new);

struct PhrasePatterns {
    sku: Regex,
    price: Regex,
    quantity: Regex,
    name: Regex,
    integer: Regex,
    word: Regex,
}

impl PhrasePatterns {
    fn new() -> Self {
        // Filler allowed between a keyword and its value: "price to 140", "qty: 3".
        const GAP: &str = r"(?:\s+(?:to|of|is|at)\b)*\s*[:=]?\s*";
        Self {
            // sku B300, code: A-1, sku=X9, sku is A3
            sku: Regex::new(
                r"(?i)\b(?:sku|code)\b(?:\s+(?:is|of)\b)*\s*[:#=]?\s*([A-Za-z0-9][A-Za-z0-9_-]*)",
            )
            .expect("static regex must compile"),
            // price 90, price: $9.50, price to 140
            price: Regex::new(&format!(r"(?i)\b(?:price|cost)\b{GAP}\$?(-?\d+(?:\.\d+)?)\b"))
                .expect("static regex must compile"),
            // qty 30, quantity to 12
            quantity: Regex::new(&format!(r"(?i)\b(?:qty|quantity)\b{GAP}(-?\d+)\b"))
                .expect("static regex must compile"),
            // name Widget, name to Green
            name: Regex::new(r"(?i)\bname\b(?:\s+(?:to|is|as)\b)*\s*[:=]?\s*(\p{L}[\w-]*)")
                .expect("static regex must compile"),
            integer: Regex::new(r"\b\d+\b").expect("static regex must compile"),
            // Letters-only tokens in any script; "B300" is not a word.
            word: Regex::new(r"\b\p{L}+(?:['-]\p{L}+)*\b").expect("static regex must compile"),
        }
    }
}

/// Words that can never be an item name.
const NON_NAME_WORDS: &[&str] = &[
    "a", "an", "the", "of", "with", "and", "for", "at", "to", "each", "per", "new", "units",
    "unit", "pcs", "pieces", "items", "sku", "code", "price", "cost", "qty", "quantity", "name",
    "add", "create", "subtract", "minus", "remove", "sell", "take", "update", "change", "set",
    "delete", "drop", "list", "show", "from", "please", "is", "in", "as",
];

fn is_keyword(word: &str) -> bool {
    NON_NAME_WORDS.contains(&word.to_lowercase().as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Add,
    Subtract,
    Update,
    Delete,
    List,
    /// "remove": subtract when a quantity is given, delete otherwise.
    Remove,
}

fn intent_for(word: &str) -> Option<Intent> {
    match word.to_ascii_lowercase().as_str() {
        "add" | "create" => Some(Intent::Add),
        "subtract" | "minus" | "sell" | "take" => Some(Intent::Subtract),
        "update" | "change" | "set" => Some(Intent::Update),
        "delete" | "drop" => Some(Intent::Delete),
        "list" | "show" => Some(Intent::List),
        "remove" => Some(Intent::Remove),
        _ => None,
    }
}

/// A value captured from the sentence together with where it was found.
struct Capture<T> {
    value: T,
    span: Range<usize>,
}

/// Parses one sentence into a command using the keyword rules.
///
/// # Errors
///
/// Returns [`AgentError::Unparseable`] naming the first thing that was
/// missing: a verb, or one of the verb's required arguments.
pub fn parse(text: &str) -> Result<Command, AgentError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AgentError::EmptyInput);
    }
    let fail = |reason: &str| AgentError::Unparseable {
        input: text.to_string(),
        reason: reason.to_string(),
    };

    let intent = detect_intent(text).ok_or_else(|| {
        fail("no action recognized; start with add, subtract, update, delete, or list")
    })?;

    // "sku is" with nothing after it leaves the filler word as the value.
    let sku = capture(&PATTERNS.sku, text, "sku", |raw| Some(raw.to_string()))
        .map_err(|reason| fail(&reason))?
        .filter(|c| !is_keyword(&c.value));
    let price = capture(&PATTERNS.price, text, "price", |raw| raw.parse::<f64>().ok())
        .map_err(|reason| fail(&reason))?;
    let explicit_qty = capture(&PATTERNS.quantity, text, "quantity", |raw| {
        raw.parse::<i64>().ok()
    })
    .map_err(|reason| fail(&reason))?;
    let explicit_name = capture(&PATTERNS.name, text, "name", |raw| Some(raw.to_string()))
        .map_err(|reason| fail(&reason))?;

    let claimed: Vec<Range<usize>> = [
        sku.as_ref().map(|c| c.span.clone()),
        price.as_ref().map(|c| c.span.clone()),
        explicit_qty.as_ref().map(|c| c.span.clone()),
    ]
    .into_iter()
    .flatten()
    .collect();
    let loose_qty = first_free_integer(text, &claimed).map_err(|reason| fail(&reason))?;

    let intent = match intent {
        Intent::Remove if explicit_qty.is_some() || loose_qty.is_some() => Intent::Subtract,
        other => other,
    };

    match intent {
        Intent::Add => {
            let sku = sku.ok_or_else(|| fail("add needs a sku, e.g. '... with sku ABC123'"))?;
            let quantity = explicit_qty
                .or(loose_qty)
                .ok_or_else(|| fail("add needs a quantity"))?;
            let price = price.ok_or_else(|| fail("add needs a price, e.g. '... price 90'"))?;
            let name = explicit_name
                .map(|c| c.value)
                .or_else(|| word_after(text, quantity.span.end, &claimed))
                .or_else(|| longest_word(text, &claimed))
                .ok_or_else(|| fail("add needs an item name"))?;
            Ok(Command::Add {
                sku: sku.value,
                name,
                quantity: quantity.value,
                price: price.value,
            })
        }
        Intent::Subtract => {
            let sku = sku.ok_or_else(|| fail("subtract needs a sku"))?;
            let quantity = explicit_qty
                .or(loose_qty)
                .ok_or_else(|| fail("subtract needs a quantity"))?;
            Ok(Command::Subtract {
                sku: sku.value,
                quantity: quantity.value,
            })
        }
        Intent::Update => {
            let sku = sku.ok_or_else(|| fail("update needs a sku"))?;
            let patch = ItemPatch {
                name: explicit_name.map(|c| c.value),
                quantity: explicit_qty.map(|c| c.value),
                price: price.map(|c| c.value),
            };
            if patch.is_empty() {
                return Err(fail("nothing to update; give a name, qty, or price"));
            }
            Ok(Command::Update {
                sku: sku.value,
                patch,
            })
        }
        Intent::Delete | Intent::Remove => {
            let sku = sku.ok_or_else(|| fail("delete needs a sku"))?;
            Ok(Command::Delete { sku: sku.value })
        }
        Intent::List => Ok(Command::List {
            sku: sku.map(|c| c.value),
        }),
    }
}

fn detect_intent(text: &str) -> Option<Intent> {
    let mut words = PATTERNS.word.find_iter(text).map(|m| m.as_str());
    let first = words.next()?;
    intent_for(first).or_else(|| words.find_map(intent_for))
}

/// Captures group 1 of `re`. A match whose value does not convert is an
/// error, never a missing argument.
fn capture<T>(
    re: &Regex,
    text: &str,
    what: &str,
    convert: impl Fn(&str) -> Option<T>,
) -> Result<Option<Capture<T>>, String> {
    let Some(group) = re.captures(text).and_then(|caps| caps.get(1)) else {
        return Ok(None);
    };
    let value = convert(group.as_str())
        .ok_or_else(|| format!("{what} '{}' is out of range", group.as_str()))?;
    Ok(Some(Capture {
        value,
        span: group.range(),
    }))
}

/// First integer that stands alone (not part of a decimal, not inside a
/// span already claimed by a keyword). A directly preceding `-` makes it
/// negative so the store can reject it.
///
/// The first free integer is the quantity; if it does not fit in an `i64`
/// that is an error, not a reason to look further along the sentence.
fn first_free_integer(
    text: &str,
    claimed: &[Range<usize>],
) -> Result<Option<Capture<i64>>, String> {
    for m in PATTERNS.integer.find_iter(text) {
        let before = text[..m.start()].chars().next_back();
        let mut after = text[m.end()..].chars();
        let in_decimal = before == Some('.')
            || (after.next() == Some('.') && after.next().is_some_and(|c| c.is_ascii_digit()));
        if overlaps(&m.range(), claimed) || in_decimal {
            continue;
        }

        let value: i64 = m
            .as_str()
            .parse()
            .map_err(|_| format!("quantity '{}' is out of range", m.as_str()))?;
        let capture = if before == Some('-') {
            Capture {
                value: -value,
                span: m.start() - 1..m.end(),
            }
        } else {
            Capture {
                value,
                span: m.range(),
            }
        };
        return Ok(Some(capture));
    }
    Ok(None)
}

fn overlaps(span: &Range<usize>, claimed: &[Range<usize>]) -> bool {
    claimed
        .iter()
        .any(|other| span.start < other.end && other.start < span.end)
}

/// Words that could be an item name: not filler, not inside a claimed span.
fn name_words<'t>(
    text: &'t str,
    offset: usize,
    claimed: &'t [Range<usize>],
) -> impl Iterator<Item = &'t str> + 't {
    PATTERNS.word.find_iter(&text[offset..]).filter_map(move |m| {
        let span = offset + m.start()..offset + m.end();
        let word = m.as_str();
        (!is_keyword(word) && !overlaps(&span, claimed)).then_some(word)
    })
}

/// First name-like word after byte offset `from`.
fn word_after(text: &str, from: usize, claimed: &[Range<usize>]) -> Option<String> {
    name_words(text, from, claimed).next().map(str::to_string)
}

/// Longest name-like word anywhere in the sentence; the first one wins ties.
fn longest_word(text: &str, claimed: &[Range<usize>]) -> Option<String> {
    name_words(text, 0, claimed)
        .fold(None::<&str>, |best, word| match best {
            Some(current) if current.len() >= word.len() => Some(current),
            _ => Some(word),
        })
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(err: AgentError) -> String {
        match err {
            AgentError::Unparseable { reason, .. } => reason,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_add_bananas_sentence() {
        let cmd = parse("Add 20 bananas with sku B300 price 90").unwrap();
        assert_eq!(
            cmd,
            Command::Add {
                sku: "B300".to_string(),
                name: "bananas".to_string(),
                quantity: 20,
                price: 90.0,
            }
        );
    }

    #[test]
    fn test_add_with_keywords_in_any_order() {
        let cmd = parse("add sku K7 price 2.5 qty 12 name Kiwi").unwrap();
        assert_eq!(
            cmd,
            Command::Add {
                sku: "K7".to_string(),
                name: "Kiwi".to_string(),
                quantity: 12,
                price: 2.5,
            }
        );
    }

    #[test]
    fn test_add_price_is_not_mistaken_for_quantity() {
        let cmd = parse("add pears price 3 sku P1 12 units").unwrap();
        let Command::Add { quantity, price, .. } = cmd else {
            panic!("expected add");
        };
        assert_eq!(quantity, 12);
        assert_eq!(price, 3.0);
    }

    #[test]
    fn test_add_skips_filler_before_name() {
        let cmd = parse("add 5 units of apples sku A1 price 1").unwrap();
        let Command::Add { name, .. } = cmd else {
            panic!("expected add");
        };
        assert_eq!(name, "apples");
    }

    #[test]
    fn test_add_without_price_is_rejected() {
        let err = parse("add 20 bananas with sku B300").unwrap_err();
        assert!(reason(err).contains("price"));
    }

    #[test]
    fn test_add_without_sku_is_rejected() {
        let err = parse("add 20 bananas price 90").unwrap_err();
        assert!(reason(err).contains("sku"));
    }

    #[test]
    fn test_subtract_sentence() {
        assert_eq!(
            parse("subtract 5 from sku A100").unwrap(),
            Command::Subtract {
                sku: "A100".to_string(),
                quantity: 5
            }
        );
    }

    #[test]
    fn test_subtract_keeps_negative_sign() {
        assert_eq!(
            parse("subtract -5 from sku A100").unwrap(),
            Command::Subtract {
                sku: "A100".to_string(),
                quantity: -5
            }
        );
    }

    #[test]
    fn test_sku_digits_are_not_a_quantity() {
        let err = parse("subtract from sku A100").unwrap_err();
        assert!(reason(err).contains("quantity"));
    }

    #[test]
    fn test_remove_with_quantity_subtracts() {
        assert_eq!(
            parse("remove 3 of sku A100").unwrap(),
            Command::Subtract {
                sku: "A100".to_string(),
                quantity: 3
            }
        );
    }

    #[test]
    fn test_remove_without_quantity_deletes() {
        assert_eq!(
            parse("remove sku A100").unwrap(),
            Command::Delete {
                sku: "A100".to_string()
            }
        );
    }

    #[test]
    fn test_update_price_only() {
        assert_eq!(
            parse("update sku A100 price to 140").unwrap(),
            Command::Update {
                sku: "A100".to_string(),
                patch: ItemPatch::default().with_price(140.0),
            }
        );
    }

    #[test]
    fn test_update_ignores_loose_integers() {
        let err = parse("update sku A100 30").unwrap_err();
        assert!(reason(err).contains("nothing to update"));
    }

    #[test]
    fn test_update_name_and_quantity() {
        assert_eq!(
            parse("change name to Green for sku A100 and qty 30").unwrap(),
            Command::Update {
                sku: "A100".to_string(),
                patch: ItemPatch::default().with_name("Green").with_quantity(30),
            }
        );
    }

    #[test]
    fn test_verb_found_mid_sentence() {
        assert_eq!(
            parse("please delete sku Z9").unwrap(),
            Command::Delete {
                sku: "Z9".to_string()
            }
        );
    }

    #[test]
    fn test_list_with_and_without_sku() {
        assert_eq!(parse("list").unwrap(), Command::List { sku: None });
        assert_eq!(
            parse("show sku a1").unwrap(),
            Command::List {
                sku: Some("a1".to_string())
            }
        );
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let err = parse("what is the weather").unwrap_err();
        assert!(reason(err).contains("no action recognized"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse("   "), Err(AgentError::EmptyInput));
    }

    #[test]
    fn test_oversized_first_integer_is_rejected_not_skipped() {
        let err = parse("add 99999999999999999999 bolts sku B1 price 2 in 3 boxes").unwrap_err();
        assert!(reason(err).contains("out of range"));
    }

    #[test]
    fn test_oversized_explicit_quantity_is_rejected() {
        let err = parse("update sku B1 qty 99999999999999999999").unwrap_err();
        assert!(reason(err).contains("out of range"));
    }

    #[test]
    fn test_sku_after_filler_word() {
        assert_eq!(
            parse("add sku is A3 with 3 apples price 2").unwrap(),
            Command::Add {
                sku: "A3".to_string(),
                name: "apples".to_string(),
                quantity: 3,
                price: 2.0,
            }
        );
    }

    #[test]
    fn test_filler_word_is_not_a_sku() {
        let err = parse("delete sku is").unwrap_err();
        assert!(reason(err).contains("sku"));
    }

    #[test]
    fn test_accented_name() {
        let Command::Add { name, .. } = parse("add 5 crème sku C1 price 3").unwrap() else {
            panic!("expected add");
        };
        assert_eq!(name, "crème");

        let Command::Update { patch, .. } = parse("update sku C1 name crème").unwrap() else {
            panic!("expected update");
        };
        assert_eq!(patch.name.as_deref(), Some("crème"));
    }

    #[test]
    fn test_decimal_price_digits_not_reused() {
        let cmd = parse("add sku D1 price 4.75 dates").unwrap_err();
        assert!(reason(cmd).contains("quantity"));
    }
}
