//! Static captions keyed by category.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::category::Category;

/// CaptionTable は図の下に付ける説明文の表
///
/// 完全一致で引く。エントリのないカテゴリにはキャプションを付けない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaptionTable {
    captions: BTreeMap<Category, String>,
}

impl CaptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captions shipped with the viewer.
    pub fn standard() -> Self {
        Self::new()
            .with(
                Category::Resource,
                "Cumulated metal demand over the period compared with current \
                 reserves and identified resources.",
            )
            .with(
                Category::Mining,
                "Annual metal demand compared with current mining capacity.",
            )
            .with(
                Category::PowerComparison,
                "Market shares of power generation technologies, as given by the \
                 model and as re-optimised under metal constraints.",
            )
            .with(
                Category::MotorComparison,
                "Market shares of electric vehicle motor technologies, as given by \
                 the model and as re-optimised under metal constraints.",
            )
            .with(
                Category::BatteryComparison,
                "Market shares of electric vehicle battery chemistries, as given by \
                 the model and as re-optimised under metal constraints.",
            )
    }

    pub fn with(mut self, category: Category, caption: impl Into<String>) -> Self {
        self.captions.insert(category, caption.into());
        self
    }

    pub fn get(&self, category: Category) -> Option<&str> {
        self.captions.get(&category).map(String::as_str)
    }
}
