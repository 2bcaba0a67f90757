//! Selection: the (model, scenario) pair picked by the user.

use serde::{Deserialize, Serialize};

use super::errors::SelectionError;

/// Selection は (model, scenario) の組（不変）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    model: String,
    scenario: String,
}

impl Selection {
    pub fn new(model: impl Into<String>, scenario: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            scenario: scenario.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    /// `"{model} - {scenario}"`, shown under every figure.
    pub fn label(&self) -> String {
        format!("{} - {}", self.model, self.scenario)
    }
}

/// SelectionLists は選択肢として出すモデル名・シナリオ名（順序付き）
///
/// セッションごとに `SelectionProvider` から一度だけ読み込む。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionLists {
    models: Vec<String>,
    scenarios: Vec<String>,
}

impl SelectionLists {
    pub fn new(models: Vec<String>, scenarios: Vec<String>) -> Self {
        Self { models, scenarios }
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn scenarios(&self) -> &[String] {
        &self.scenarios
    }

    pub fn contains(&self, selection: &Selection) -> bool {
        self.models.iter().any(|m| m == selection.model())
            && self.scenarios.iter().any(|s| s == selection.scenario())
    }

    /// Build a selection, rejecting names that are not offered.
    pub fn select(&self, model: &str, scenario: &str) -> Result<Selection, SelectionError> {
        if !self.models.iter().any(|m| m == model) {
            return Err(SelectionError::NotOffered {
                field: "model",
                value: model.to_string(),
                offered: self.models.clone(),
            });
        }
        if !self.scenarios.iter().any(|s| s == scenario) {
            return Err(SelectionError::NotOffered {
                field: "scenario",
                value: scenario.to_string(),
                offered: self.scenarios.clone(),
            });
        }
        Ok(Selection::new(model, scenario))
    }

    /// First model and first scenario, like a dropdown's initial value.
    pub fn default_selection(&self) -> Option<Selection> {
        let model = self.models.first()?;
        let scenario = self.scenarios.first()?;
        Some(Selection::new(model.as_str(), scenario.as_str()))
    }
}
