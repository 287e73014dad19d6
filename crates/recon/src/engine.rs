use crate::classify::{classify_item, collect_missing, index_by_code, match_key, sort_buckets, Classification};
use crate::consumable::{classify_consumables, ConsumableCodes};
use crate::error::ReconError;
use crate::model::{AnalysisReport, AnalysisResult, OnHandItem, TemplateItem};
use crate::summary::summarize;

/// Reject inputs the analysis should not be run on.
///
/// `run` itself accepts empty slices; this is the caller-side gate.
pub fn check_inputs(template_items: &[TemplateItem], on_hand_items: &[OnHandItem]) -> Result<(), ReconError> {
    if template_items.is_empty() {
        return Err(ReconError::EmptyTemplate);
    }
    if on_hand_items.is_empty() {
        return Err(ReconError::EmptyOnHand);
    }
    Ok(())
}

/// Reconcile on-hand inventory against a template.
///
/// Every on-hand row lands in exactly one of negative, not_in_template,
/// overstocked, understocked or correct. `missing` is derived from the
/// template side and never repeats an understocked code.
pub fn run(template_items: &[TemplateItem], on_hand_items: &[OnHandItem]) -> AnalysisResult {
    let template_index = index_by_code(template_items, |t| t.item_code.as_str());
    let on_hand_index = index_by_code(on_hand_items, |o| o.item_code.as_str());

    let mut result = AnalysisResult::default();

    for row in on_hand_items {
        let rule = template_index.get(&match_key(&row.item_code)).copied();
        match classify_item(row, rule) {
            Classification::Negative => result.negative.push(row.clone()),
            Classification::NotInTemplate => result.not_in_template.push(row.clone()),
            Classification::Overstocked(item) => result.overstocked.push(item),
            Classification::Understocked(item) => result.understocked.push(item),
            Classification::Correct(item) => result.correct.push(item),
        }
    }

    result.missing = collect_missing(template_items, &on_hand_index, &result.understocked);

    sort_buckets(&mut result);

    log::debug!(
        "analysis: {} on-hand rows vs {} template items -> {} over, {} under, {} not in template, {} negative, {} missing, {} correct",
        on_hand_items.len(),
        template_items.len(),
        result.overstocked.len(),
        result.understocked.len(),
        result.not_in_template.len(),
        result.negative.len(),
        result.missing.len(),
        result.correct.len(),
    );

    result
}

/// Validate, reconcile, flag consumables and count, in that order.
pub fn analyze(
    template_items: &[TemplateItem],
    on_hand_items: &[OnHandItem],
    consumable_codes: &ConsumableCodes,
) -> Result<AnalysisReport, ReconError> {
    check_inputs(template_items, on_hand_items)?;

    let result = run(template_items, on_hand_items);
    let consumable = classify_consumables(on_hand_items, consumable_codes);
    let summary = summarize(&result, consumable.len());

    Ok(AnalysisReport { summary, result, consumable })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(code: &str, min: f64, max: f64) -> TemplateItem {
        TemplateItem {
            item_code: code.into(),
            item_description: None,
            min_qty: min,
            max_qty: max,
            unit_of_measure: None,
            bin_location: None,
        }
    }

    fn row(code: &str, qty: f64) -> OnHandItem {
        OnHandItem {
            item_code: code.into(),
            on_hand: qty,
            ..Default::default()
        }
    }

    #[test]
    fn check_inputs_rejects_empty_sides() {
        assert_eq!(check_inputs(&[], &[row("A", 1.0)]), Err(ReconError::EmptyTemplate));
        assert_eq!(check_inputs(&[rule("A", 0.0, 1.0)], &[]), Err(ReconError::EmptyOnHand));
        assert!(check_inputs(&[rule("A", 0.0, 1.0)], &[row("A", 1.0)]).is_ok());
    }

    #[test]
    fn empty_inputs_produce_empty_result() {
        assert!(run(&[], &[]).is_empty());
    }

    #[test]
    fn empty_template_sends_rows_to_negative_or_not_in_template() {
        let result = run(&[], &[row("A", 1.0), row("B", -2.0), row("C", 0.0)]);
        assert_eq!(result.not_in_template.len(), 2);
        assert_eq!(result.negative.len(), 1);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn template_duplicates_resolve_to_last_rule() {
        let template = vec![rule("X", 0.0, 1.0), rule("x", 0.0, 10.0)];
        let result = run(&template, &[row("X", 5.0)]);
        assert_eq!(result.correct.len(), 1);
        assert_eq!(result.correct[0].max_qty, 10.0);
        assert!(result.overstocked.is_empty());
    }

    #[test]
    fn zero_quantity_with_zero_min_is_correct_and_missing() {
        // A zero row inside [0, max] is "correct" but the template still reports it missing
        let result = run(&[rule("A", 0.0, 4.0)], &[row("A", 0.0)]);
        assert_eq!(result.correct.len(), 1);
        assert_eq!(result.missing.len(), 1);
    }

    #[test]
    fn analyze_flags_consumables_without_moving_them() {
        let codes = ConsumableCodes::new(["tape"]);
        let report = analyze(&[rule("TAPE", 0.0, 2.0)], &[row("tape", 5.0)], &codes).unwrap();
        assert_eq!(report.result.overstocked.len(), 1);
        assert_eq!(report.consumable.len(), 1);
        assert_eq!(report.summary.consumable, 1);
        assert_eq!(report.summary.total, 1);
    }

    #[test]
    fn analyze_refuses_empty_on_hand() {
        let err = analyze(&[rule("A", 0.0, 1.0)], &[], &ConsumableCodes::default()).unwrap_err();
        assert_eq!(err, ReconError::EmptyOnHand);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let template = vec![rule("B", 0.0, 1.0), rule("A", 0.0, 1.0)];
        let on_hand = vec![row("Z", 1.0), row("A", 9.0)];
        let before = (template.clone(), on_hand.clone());
        let _ = run(&template, &on_hand);
        assert_eq!((template, on_hand), before);
    }
}
