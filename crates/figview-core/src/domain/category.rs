//! Category - 図の種類と命名テンプレート
//!
//! 図のファイル名はカテゴリごとのテンプレートから一箇所で組み立てます。
//! 生成側と検索側でテンプレートがずれると、図が存在していても見つかりません。

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::TemplateError;
use super::selection::Selection;

/// Category はビューアが表示する図の種類
///
/// バリアントの順序がそのまま表示順。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Resource,
    Mining,
    PowerComparison,
    MotorComparison,
    BatteryComparison,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Resource,
        Category::Mining,
        Category::PowerComparison,
        Category::MotorComparison,
        Category::BatteryComparison,
    ];

    /// Snake-case name, as used in config keys and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Resource => "resource",
            Category::Mining => "mining",
            Category::PowerComparison => "power_comparison",
            Category::MotorComparison => "motor_comparison",
            Category::BatteryComparison => "battery_comparison",
        }
    }

    /// Subheader shown above the figure.
    pub fn title(self) -> &'static str {
        match self {
            Category::Resource => "Comparing cumulated demand to resources and reserves",
            Category::Mining => "Annual demands and mining capacities",
            Category::PowerComparison => "Power plant market shares",
            Category::MotorComparison => "Electric vehicle motor market shares",
            Category::BatteryComparison => "Electric vehicle battery market shares",
        }
    }

    /// Folder the figures of this category are published under.
    pub fn folder(self) -> &'static str {
        match self {
            Category::Resource => "Resource_images",
            Category::Mining => "Mining_images",
            Category::PowerComparison => "Power_images",
            Category::MotorComparison => "Motor_images",
            Category::BatteryComparison => "Battery_images",
        }
    }

    /// Canonical naming template.
    ///
    /// Comparison charts carry the `Comparison` suffix, the other two do not.
    pub fn canonical_template(self) -> NamingTemplate {
        let pattern = match self {
            Category::Resource => "Fig_Resource_{model} - {scenario}.png",
            Category::Mining => "Fig_Mining_{model} - {scenario}.png",
            Category::PowerComparison => "Fig_PowerComparison_{model} - {scenario}.png",
            Category::MotorComparison => "Fig_MotorComparison_{model} - {scenario}.png",
            Category::BatteryComparison => "Fig_BatteryComparison_{model} - {scenario}.png",
        };
        NamingTemplate {
            pattern: pattern.to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// NamingTemplate は `{model}` と `{scenario}` を含むファイル名パターン
///
/// # 例
/// ```ignore
/// let t = NamingTemplate::new("Fig_Resource_{model} - {scenario}.png")?;
/// let id = t.render(&Selection::new("IMAGE", "SSP2"));
/// assert_eq!(id.as_str(), "Fig_Resource_IMAGE - SSP2.png");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NamingTemplate {
    pattern: String,
}

impl NamingTemplate {
    pub const MODEL: &'static str = "{model}";
    pub const SCENARIO: &'static str = "{scenario}";

    /// Both placeholders are required; a template without them would map
    /// every selection onto the same file.
    pub fn new(pattern: impl Into<String>) -> Result<Self, TemplateError> {
        let pattern = pattern.into();
        for placeholder in [Self::MODEL, Self::SCENARIO] {
            if !pattern.contains(placeholder) {
                return Err(TemplateError::MissingPlaceholder {
                    pattern,
                    placeholder,
                });
            }
        }
        Ok(Self { pattern })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Substitute the selection into the pattern.
    ///
    /// Substitution is single-pass: a model name that itself contains
    /// `{scenario}` is left as-is.
    pub fn render(&self, selection: &Selection) -> ArtifactId {
        let rendered = self
            .pattern
            .split(Self::MODEL)
            .map(|part| part.replace(Self::SCENARIO, selection.scenario()))
            .collect::<Vec<_>>()
            .join(selection.model());
        ArtifactId(rendered)
    }
}

impl TryFrom<String> for NamingTemplate {
    type Error = TemplateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NamingTemplate> for String {
    fn from(template: NamingTemplate) -> Self {
        template.pattern
    }
}

/// ArtifactId はテンプレートから組み立てた図のファイル名
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether an archive entry name refers to this artifact.
    ///
    /// Both sides are separator-normalized. The entry must equal the
    /// identifier or end with it on a path component boundary, so
    /// `Motor_images\Fig_X.png` matches `Fig_X.png` but `OldFig_X.png` does not.
    pub fn matches_entry(&self, entry: &str) -> bool {
        let entry = normalize_separators(entry);
        let id = normalize_separators(&self.0);
        entry == id
            || entry
                .strip_suffix(id.as_str())
                .is_some_and(|prefix| prefix.ends_with('/'))
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rewrite every `\` to `/`.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}
