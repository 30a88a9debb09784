use serde::{Deserialize, Serialize};

/// Canonical classification produced by the analysis service, after wire
/// aliases have been resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub category: String,
    pub justification: String,
    pub suggested_reply: String,
}

/// Presentation theme for a rendered result. Exactly two: emails that need
/// action, and everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Productive,
    NonProductive,
}

impl AnalysisResult {
    /// Map the category to a theme. The service labels actionable emails
    /// with a category containing "produt" (e.g. "Produtivo"); any other
    /// value, including an empty or unrecognized category, gets the
    /// default theme.
    pub fn theme(&self) -> Theme {
        if self.category.to_lowercase().contains("produt") {
            Theme::Productive
        } else {
            Theme::NonProductive
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_category(category: &str) -> AnalysisResult {
        AnalysisResult {
            category: category.to_string(),
            justification: String::new(),
            suggested_reply: String::new(),
        }
    }

    #[test]
    fn productive_category_gets_productive_theme() {
        assert_eq!(result_with_category("Produtivo").theme(), Theme::Productive);
    }

    #[test]
    fn theme_match_is_case_insensitive() {
        assert_eq!(result_with_category("PRODUTIVO").theme(), Theme::Productive);
        assert_eq!(result_with_category("produtivo").theme(), Theme::Productive);
    }

    #[test]
    fn other_categories_get_the_default_theme() {
        assert_eq!(result_with_category("Spam").theme(), Theme::NonProductive);
        assert_eq!(result_with_category("Marketing").theme(), Theme::NonProductive);
    }

    #[test]
    fn empty_category_gets_the_default_theme() {
        assert_eq!(result_with_category("").theme(), Theme::NonProductive);
    }
}
