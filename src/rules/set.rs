use super::catalog::standard_rules;
use super::rule::ContextRule;

/// Ordered collection of [`ContextRule`]s.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<ContextRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<ContextRule>) -> Self {
        Self { rules }
    }

    /// A set with no rules; scores pass through unchanged.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in product disambiguation rules.
    pub fn standard() -> Self {
        Self::new(standard_rules())
    }

    pub fn push(&mut self, rule: ContextRule) {
        self.rules.push(rule);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContextRule> {
        self.rules.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ContextRule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluates title triggers once and returns the rules left to check per category.
    pub fn active_for(&self, title: &str) -> ActiveRules<'_> {
        let title_lower = title.to_lowercase();
        let rules = self
            .rules
            .iter()
            .filter(|rule| rule.title.matches(&title_lower))
            .collect();
        ActiveRules { rules }
    }
}

/// Rules whose title trigger holds for one query.
#[derive(Debug, Clone)]
pub struct ActiveRules<'a> {
    rules: Vec<&'a ContextRule>,
}

impl<'a> ActiveRules<'a> {
    /// Rules whose category trigger also holds for `category_lower`.
    pub fn applied<'c>(&'c self, category_lower: &'c str) -> impl Iterator<Item = &'a ContextRule> + 'c {
        self.rules
            .iter()
            .copied()
            .filter(move |rule| rule.category.matches(category_lower))
    }

    /// Multiplies `score` by every applicable factor.
    pub fn adjust(&self, category_lower: &str, score: f64) -> f64 {
        self.applied(category_lower)
            .fold(score, |acc, rule| acc * rule.factor)
    }

    /// Returns `true` if any applicable rule for `category_lower` is a boost.
    pub fn boosts(&self, category_lower: &str) -> bool {
        self.applied(category_lower).any(ContextRule::is_boost)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name)
    }
}
