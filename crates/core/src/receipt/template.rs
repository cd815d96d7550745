//! Receipt template selection.

use pasok_shared::config::ReceiptTemplateRule;
use serde::{Deserialize, Serialize};

use super::error::ReceiptError;

/// Visual receipt templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    /// Plain receipt, used for every unmatched supplier.
    #[default]
    Generic,
    /// Receipt framed by a border with ruled item rows.
    Bordered,
    /// Narrow receipt without the cost columns or signature block.
    Compact,
    /// Receipt with a large supplier letterhead and address block.
    Letterhead,
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generic => write!(f, "generic"),
            Self::Bordered => write!(f, "bordered"),
            Self::Compact => write!(f, "compact"),
            Self::Letterhead => write!(f, "letterhead"),
        }
    }
}

impl std::str::FromStr for TemplateKind {
    type Err = ReceiptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "generic" => Ok(Self::Generic),
            "bordered" => Ok(Self::Bordered),
            "compact" => Ok(Self::Compact),
            "letterhead" => Ok(Self::Letterhead),
            _ => Err(ReceiptError::UnknownTemplate(s.to_string())),
        }
    }
}

/// A lowercased supplier-name fragment and the template it selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRule {
    pattern: String,
    kind: TemplateKind,
}

impl TemplateRule {
    /// Creates a rule; the pattern is matched case-insensitively.
    #[must_use]
    pub fn new(pattern: &str, kind: TemplateKind) -> Self {
        Self {
            pattern: pattern.trim().to_lowercase(),
            kind,
        }
    }

    fn matches(&self, lowered_name: &str) -> bool {
        !self.pattern.is_empty() && lowered_name.contains(&self.pattern)
    }
}

/// Picks a template for a supplier name. First matching rule wins.
#[derive(Debug, Clone, Default)]
pub struct TemplateSelector {
    rules: Vec<TemplateRule>,
}

impl TemplateSelector {
    /// Creates a selector from ordered rules.
    #[must_use]
    pub fn new(rules: Vec<TemplateRule>) -> Self {
        Self { rules }
    }

    /// Builds a selector from configuration.
    pub fn from_config(rules: &[ReceiptTemplateRule]) -> Result<Self, ReceiptError> {
        let rules = rules
            .iter()
            .map(|rule| Ok(TemplateRule::new(&rule.pattern, rule.template.parse()?)))
            .collect::<Result<Vec<_>, ReceiptError>>()?;
        Ok(Self::new(rules))
    }

    /// Returns the template for `supplier_name`, or [`TemplateKind::Generic`].
    #[must_use]
    pub fn select(&self, supplier_name: &str) -> TemplateKind {
        let lowered = supplier_name.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map_or(TemplateKind::Generic, |rule| rule.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn selector() -> TemplateSelector {
        TemplateSelector::new(vec![
            TemplateRule::new("Sumber Rejeki", TemplateKind::Bordered),
            TemplateRule::new("makmur", TemplateKind::Letterhead),
            TemplateRule::new("tani", TemplateKind::Compact),
        ])
    }

    #[rstest]
    #[case("UD Sumber Rejeki", TemplateKind::Bordered)]
    #[case("ud sumber rejeki jaya", TemplateKind::Bordered)]
    #[case("CV TANI MAKMUR", TemplateKind::Letterhead)]
    #[case("UD Tani Subur", TemplateKind::Compact)]
    #[case("UD Anugerah", TemplateKind::Generic)]
    #[case("", TemplateKind::Generic)]
    fn test_select(#[case] name: &str, #[case] expected: TemplateKind) {
        assert_eq!(selector().select(name), expected);
    }

    #[test]
    fn test_from_config_rejects_unknown_template() {
        let rules = vec![ReceiptTemplateRule {
            pattern: "anugerah".to_string(),
            template: "fancy".to_string(),
        }];
        assert!(matches!(
            TemplateSelector::from_config(&rules),
            Err(ReceiptError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn test_from_config_defaults() {
        let config = pasok_shared::config::ReceiptConfig::default();
        let selector = TemplateSelector::from_config(&config.templates).unwrap();
        assert_eq!(selector.select("UD Sumber Rejeki"), TemplateKind::Bordered);
    }

    #[test]
    fn test_empty_pattern_never_matches() {
        let selector = TemplateSelector::new(vec![TemplateRule::new("  ", TemplateKind::Compact)]);
        assert_eq!(selector.select("UD Apa Saja"), TemplateKind::Generic);
    }
}
