//! Basic types for the bill model

use serde::{Deserialize, Serialize};

/// Expense category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Recurring, predictable bills (rent, utilities)
    #[serde(alias = "fixa")]
    Fixed,
    /// Bills whose amount changes month to month
    #[serde(alias = "variavel")]
    Variable,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 2] = [Category::Fixed, Category::Variable];

    /// Label shown in the interface and the report
    pub fn label(&self) -> &'static str {
        match self {
            Category::Fixed => "Fixa",
            Category::Variable => "Variável",
        }
    }

    /// Plural label used on summary cards and chart slices
    pub fn plural_label(&self) -> &'static str {
        match self {
            Category::Fixed => "Contas Fixas",
            Category::Variable => "Contas Variáveis",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Fixed
    }
}

impl std::str::FromStr for Category {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" | "fixa" => Ok(Category::Fixed),
            "variable" | "variavel" | "variável" => Ok(Category::Variable),
            _ => Err(format!("Invalid category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Fixed => write!(f, "fixed"),
            Category::Variable => write!(f, "variable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!("fixed".parse::<Category>().unwrap(), Category::Fixed);
        assert_eq!("Variavel".parse::<Category>().unwrap(), Category::Variable);
        assert_eq!("variável".parse::<Category>().unwrap(), Category::Variable);
        assert!("monthly".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_accepts_legacy_tags() {
        let c: Category = serde_json::from_str("\"fixa\"").unwrap();
        assert_eq!(c, Category::Fixed);
        let c: Category = serde_json::from_str("\"variavel\"").unwrap();
        assert_eq!(c, Category::Variable);
        assert_eq!(serde_json::to_string(&Category::Variable).unwrap(), "\"variable\"");
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::Fixed.label(), "Fixa");
        assert_eq!(Category::Variable.to_string(), "variable");
    }
}
