use super::trigger::Trigger;

/// A named multiplicative adjustment.
///
/// When `title` holds for the query and `category` holds for a candidate path,
/// the path's score is multiplied by `factor`.
#[derive(Debug, Clone)]
pub struct ContextRule {
    pub name: &'static str,
    pub title: Trigger,
    pub category: Trigger,
    pub factor: f64,
}

impl ContextRule {
    pub fn new(name: &'static str, title: Trigger, category: Trigger, factor: f64) -> Self {
        Self {
            name,
            title,
            category,
            factor,
        }
    }

    /// Returns `true` if the factor raises scores.
    #[inline]
    pub fn is_boost(&self) -> bool {
        self.factor > 1.0
    }

    /// Returns `true` if both triggers hold. Inputs must be lowercased.
    #[inline]
    pub fn applies(&self, title_lower: &str, category_lower: &str) -> bool {
        self.title.matches(title_lower) && self.category.matches(category_lower)
    }
}
