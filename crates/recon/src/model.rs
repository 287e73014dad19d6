use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One stocking rule of a truck template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateItem {
    pub item_code: String,
    #[serde(default)]
    pub item_description: Option<String>,
    #[serde(default)]
    pub min_qty: f64,
    #[serde(default)]
    pub max_qty: f64,
    #[serde(default)]
    pub unit_of_measure: Option<String>,
    #[serde(default)]
    pub bin_location: Option<String>,
}

/// One row of the field inventory export for a single truck.
///
/// Only `item_code` and `on_hand` drive classification; the remaining
/// quantities and tags are carried through to the output untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OnHandItem {
    pub item_name: String,
    pub inventory_tags: String,
    pub item_code: String,
    pub item_description: String,
    pub available: f64,
    pub on_order: f64,
    pub on_hold: f64,
    pub on_hand: f64,
    pub total_quantity: f64,
    pub bin_location: Option<String>,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// An on-hand item matched against its template rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedItem {
    pub item_code: String,
    pub item_description: String,
    pub on_hand: f64,
    pub min_qty: f64,
    pub max_qty: f64,
    /// Overstocked: `on_hand - max_qty` (> 0). Understocked: `on_hand - min_qty` (< 0).
    /// Correct: 0.
    pub difference: f64,
    pub unit_of_measure: Option<String>,
    pub bin_location: Option<String>,
}

/// Six ordered buckets produced by one engine run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overstocked: Vec<AnalyzedItem>,
    pub understocked: Vec<AnalyzedItem>,
    pub not_in_template: Vec<OnHandItem>,
    pub negative: Vec<OnHandItem>,
    pub missing: Vec<TemplateItem>,
    pub correct: Vec<AnalyzedItem>,
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Overstocked,
    Understocked,
    NotInTemplate,
    Negative,
    Missing,
    Correct,
}

impl Category {
    /// Report order.
    pub const ALL: [Category; 6] = [
        Self::Overstocked,
        Self::Understocked,
        Self::NotInTemplate,
        Self::Negative,
        Self::Missing,
        Self::Correct,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overstocked => "overstocked",
            Self::Understocked => "understocked",
            Self::NotInTemplate => "not_in_template",
            Self::Negative => "negative",
            Self::Missing => "missing",
            Self::Correct => "correct",
        }
    }

    /// Which record shape this bucket holds.
    pub fn record_kind(&self) -> RecordKind {
        match self {
            Self::Overstocked | Self::Understocked | Self::Correct => RecordKind::Analyzed,
            Self::NotInTemplate | Self::Negative => RecordKind::OnHand,
            Self::Missing => RecordKind::Template,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Analyzed,
    OnHand,
    Template,
}

/// A borrowed bucket entry, tagged by the category it was read from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemRecord<'a> {
    Analyzed(&'a AnalyzedItem),
    OnHand(&'a OnHandItem),
    Template(&'a TemplateItem),
}

impl<'a> ItemRecord<'a> {
    pub fn item_code(&self) -> &'a str {
        match self {
            Self::Analyzed(item) => &item.item_code,
            Self::OnHand(item) => &item.item_code,
            Self::Template(item) => &item.item_code,
        }
    }

    /// Display description. On-hand rows fall back to the item name.
    pub fn description(&self) -> &'a str {
        match self {
            Self::Analyzed(item) => &item.item_description,
            Self::OnHand(item) => {
                if item.item_description.is_empty() {
                    &item.item_name
                } else {
                    &item.item_description
                }
            }
            Self::Template(item) => item.item_description.as_deref().unwrap_or(""),
        }
    }
}

impl AnalysisResult {
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Overstocked => self.overstocked.len(),
            Category::Understocked => self.understocked.len(),
            Category::NotInTemplate => self.not_in_template.len(),
            Category::Negative => self.negative.len(),
            Category::Missing => self.missing.len(),
            Category::Correct => self.correct.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.count(*c) == 0)
    }

    /// Entries of one bucket, in bucket order.
    pub fn records(&self, category: Category) -> Vec<ItemRecord<'_>> {
        match category {
            Category::Overstocked => self.overstocked.iter().map(ItemRecord::Analyzed).collect(),
            Category::Understocked => self.understocked.iter().map(ItemRecord::Analyzed).collect(),
            Category::NotInTemplate => self.not_in_template.iter().map(ItemRecord::OnHand).collect(),
            Category::Negative => self.negative.iter().map(ItemRecord::OnHand).collect(),
            Category::Missing => self.missing.iter().map(ItemRecord::Template).collect(),
            Category::Correct => self.correct.iter().map(ItemRecord::Analyzed).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Summary + Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub overstocked: usize,
    pub understocked: usize,
    pub not_in_template: usize,
    pub negative: usize,
    pub missing: usize,
    pub correct: usize,
    /// Sum of the six category counts. Consumables are not included.
    pub total: usize,
    pub consumable: usize,
}

impl AnalysisSummary {
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Overstocked => self.overstocked,
            Category::Understocked => self.understocked,
            Category::NotInTemplate => self.not_in_template,
            Category::Negative => self.negative,
            Category::Missing => self.missing,
            Category::Correct => self.correct,
        }
    }
}

/// Everything one analysis run hands to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: AnalysisSummary,
    pub result: AnalysisResult,
    /// On-hand rows flagged by the consumable registry. Additive: these rows
    /// also appear in their primary category.
    pub consumable: Vec<OnHandItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_str() {
        for c in Category::ALL {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
        }
        assert!("consumable".parse::<Category>().is_err());
    }

    #[test]
    fn on_hand_description_falls_back_to_name() {
        let item = OnHandItem {
            item_name: "Copper elbow".into(),
            item_code: "CE-1".into(),
            ..Default::default()
        };
        assert_eq!(ItemRecord::OnHand(&item).description(), "Copper elbow");
    }

    #[test]
    fn records_are_tagged_by_category() {
        let result = AnalysisResult {
            missing: vec![TemplateItem {
                item_code: "M1".into(),
                item_description: None,
                min_qty: 1.0,
                max_qty: 2.0,
                unit_of_measure: None,
                bin_location: None,
            }],
            ..Default::default()
        };
        let records = result.records(Category::Missing);
        assert_eq!(records.len(), 1);
        assert!(matches!(records[0], ItemRecord::Template(_)));
        assert_eq!(Category::Missing.record_kind(), RecordKind::Template);
        assert_eq!(records[0].description(), "");
    }
}
