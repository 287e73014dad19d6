use crate::model::{AnalysisResult, AnalysisSummary};

/// Per-category counts for a finished analysis.
///
/// `consumable` comes from the consumable classifier; pass 0 when it did not run.
pub fn summarize(result: &AnalysisResult, consumable: usize) -> AnalysisSummary {
    let overstocked = result.overstocked.len();
    let understocked = result.understocked.len();
    let not_in_template = result.not_in_template.len();
    let negative = result.negative.len();
    let missing = result.missing.len();
    let correct = result.correct.len();

    AnalysisSummary {
        overstocked,
        understocked,
        not_in_template,
        negative,
        missing,
        correct,
        total: overstocked + understocked + not_in_template + negative + missing + correct,
        consumable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, OnHandItem, TemplateItem};

    #[test]
    fn summary_counts() {
        let on_hand = OnHandItem {
            item_code: "N1".into(),
            on_hand: -1.0,
            ..Default::default()
        };
        let rule = TemplateItem {
            item_code: "M1".into(),
            item_description: None,
            min_qty: 1.0,
            max_qty: 2.0,
            unit_of_measure: None,
            bin_location: None,
        };
        let result = AnalysisResult {
            negative: vec![on_hand.clone(), on_hand],
            missing: vec![rule],
            ..Default::default()
        };

        let summary = summarize(&result, 3);
        assert_eq!(summary.negative, 2);
        assert_eq!(summary.missing, 1);
        assert_eq!(summary.overstocked, 0);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.consumable, 3);
        for c in Category::ALL {
            assert_eq!(summary.count(c), result.count(c));
        }
    }

    #[test]
    fn summary_of_empty_result() {
        assert_eq!(summarize(&AnalysisResult::default(), 0), AnalysisSummary::default());
    }
}
