use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::model::{AnalysisResult, AnalyzedItem, OnHandItem, TemplateItem};

/// Upper-cased item code used for every cross-file lookup.
pub fn match_key(item_code: &str) -> String {
    item_code.to_uppercase()
}

/// Index records by upper-cased item code. Later duplicates overwrite earlier ones.
pub fn index_by_code<'a, T>(
    items: &'a [T],
    code: impl Fn(&T) -> &str,
) -> HashMap<String, &'a T> {
    let mut index = HashMap::with_capacity(items.len());
    for item in items {
        index.insert(match_key(code(item)), item);
    }
    index
}

/// Outcome for a single on-hand row.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Negative,
    NotInTemplate,
    Overstocked(AnalyzedItem),
    Understocked(AnalyzedItem),
    Correct(AnalyzedItem),
}

/// Classify one on-hand row. First matching rule wins:
/// negative, then not-in-template, then over/under/correct against the rule.
pub fn classify_item(on_hand: &OnHandItem, rule: Option<&TemplateItem>) -> Classification {
    if on_hand.on_hand < 0.0 {
        return Classification::Negative;
    }

    let Some(rule) = rule else {
        return Classification::NotInTemplate;
    };

    let mut analyzed = analyze(on_hand, rule);

    if on_hand.on_hand > rule.max_qty {
        analyzed.difference = on_hand.on_hand - rule.max_qty;
        Classification::Overstocked(analyzed)
    } else if on_hand.on_hand < rule.min_qty {
        analyzed.difference = on_hand.on_hand - rule.min_qty;
        Classification::Understocked(analyzed)
    } else {
        Classification::Correct(analyzed)
    }
}

fn analyze(on_hand: &OnHandItem, rule: &TemplateItem) -> AnalyzedItem {
    let item_description = if !on_hand.item_description.is_empty() {
        on_hand.item_description.clone()
    } else {
        rule.item_description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("")
            .to_string()
    };

    AnalyzedItem {
        item_code: on_hand.item_code.clone(),
        item_description,
        on_hand: on_hand.on_hand,
        min_qty: rule.min_qty,
        max_qty: rule.max_qty,
        difference: 0.0,
        unit_of_measure: rule.unit_of_measure.clone(),
        bin_location: non_empty(&on_hand.bin_location).or_else(|| non_empty(&rule.bin_location)),
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

/// Template items with no on-hand row, or whose on-hand row is exactly zero,
/// minus anything already reported as understocked.
pub fn collect_missing(
    template_items: &[TemplateItem],
    on_hand_index: &HashMap<String, &OnHandItem>,
    understocked: &[AnalyzedItem],
) -> Vec<TemplateItem> {
    let understocked_keys: HashSet<String> =
        understocked.iter().map(|item| match_key(&item.item_code)).collect();

    template_items
        .iter()
        .filter(|rule| {
            let key = match_key(&rule.item_code);
            let absent_or_zero = match on_hand_index.get(&key) {
                None => true,
                Some(row) => row.on_hand == 0.0,
            };
            absent_or_zero && !understocked_keys.contains(&key)
        })
        .cloned()
        .collect()
}

fn by_number(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Apply the fixed per-bucket ordering. All sorts are stable.
pub fn sort_buckets(result: &mut AnalysisResult) {
    result.overstocked.sort_by(|a, b| by_number(b.difference, a.difference));
    result.understocked.sort_by(|a, b| by_number(a.difference, b.difference));
    result.not_in_template.sort_by(|a, b| a.item_code.cmp(&b.item_code));
    result.negative.sort_by(|a, b| by_number(a.on_hand, b.on_hand));
    result.missing.sort_by(|a, b| a.item_code.cmp(&b.item_code));
    result.correct.sort_by(|a, b| a.item_code.cmp(&b.item_code));
}
