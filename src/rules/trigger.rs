use regex::Regex;

/// Predicate over lowercased text.
///
/// Term triggers use substring semantics: `any(&["bike"])` matches `"bikes"` and
/// `"motorbike"` alike. Word triggers only match whole words: `words(&["kit"])`
/// matches `"kit"` and `"kits"` but not `"kitchen"`. Multi-word terms such as
/// `"road bike"` match as phrases under either semantics.
#[derive(Debug, Clone)]
pub enum Trigger {
    /// Always satisfied.
    Always,
    /// Text contains at least one term.
    AnyOf(&'static [&'static str]),
    /// Text contains every term.
    AllOf(&'static [&'static str]),
    /// Text contains at least one term as a whole word.
    AnyWord(&'static [&'static str]),
    /// Text contains every term as a whole word.
    AllWords(&'static [&'static str]),
    /// Text starts with the given prefix.
    Prefix(&'static str),
    /// Text matches a regular expression.
    Pattern(Regex),
    /// Inner trigger is not satisfied.
    Not(Box<Trigger>),
    /// Every inner trigger is satisfied.
    And(Vec<Trigger>),
    /// At least one inner trigger is satisfied.
    Or(Vec<Trigger>),
}

impl Trigger {
    pub fn any(terms: &'static [&'static str]) -> Self {
        Trigger::AnyOf(terms)
    }

    pub fn all(terms: &'static [&'static str]) -> Self {
        Trigger::AllOf(terms)
    }

    /// Satisfied when the text contains none of `terms`.
    pub fn none(terms: &'static [&'static str]) -> Self {
        Trigger::AnyOf(terms).negate()
    }

    pub fn words(terms: &'static [&'static str]) -> Self {
        Trigger::AnyWord(terms)
    }

    pub fn all_words(terms: &'static [&'static str]) -> Self {
        Trigger::AllWords(terms)
    }

    /// Satisfied when the text contains none of `terms` as a whole word.
    pub fn no_words(terms: &'static [&'static str]) -> Self {
        Trigger::AnyWord(terms).negate()
    }

    pub fn prefix(prefix: &'static str) -> Self {
        Trigger::Prefix(prefix)
    }

    pub fn pattern(regex: &Regex) -> Self {
        Trigger::Pattern(regex.clone())
    }

    pub fn negate(self) -> Self {
        match self {
            Trigger::Not(inner) => *inner,
            other => Trigger::Not(Box::new(other)),
        }
    }

    pub fn and(self, other: Trigger) -> Self {
        match self {
            Trigger::And(mut inner) => {
                inner.push(other);
                Trigger::And(inner)
            }
            this => Trigger::And(vec![this, other]),
        }
    }

    pub fn or(self, other: Trigger) -> Self {
        match self {
            Trigger::Or(mut inner) => {
                inner.push(other);
                Trigger::Or(inner)
            }
            this => Trigger::Or(vec![this, other]),
        }
    }

    /// Evaluates the trigger against already-lowercased `text`.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Trigger::Always => true,
            Trigger::AnyOf(terms) => terms.iter().any(|term| text.contains(term)),
            Trigger::AllOf(terms) => terms.iter().all(|term| text.contains(term)),
            Trigger::AnyWord(terms) => terms.iter().any(|term| contains_word(text, term)),
            Trigger::AllWords(terms) => terms.iter().all(|term| contains_word(text, term)),
            Trigger::Prefix(prefix) => text.starts_with(prefix),
            Trigger::Pattern(regex) => regex.is_match(text),
            Trigger::Not(inner) => !inner.matches(text),
            Trigger::And(inner) => inner.iter().all(|t| t.matches(text)),
            Trigger::Or(inner) => inner.iter().any(|t| t.matches(text)),
        }
    }
}

/// Whether `term` occurs in `text` between non-alphanumeric characters, allowing
/// a plural `s` or `es` after it. Hyphens and apostrophes count as boundaries.
fn contains_word(text: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    text.match_indices(term).any(|(start, matched)| {
        if text[..start].chars().next_back().is_some_and(char::is_alphanumeric) {
            return false;
        }
        let rest = &text[start + matched.len()..];
        ["", "s", "es"].iter().any(|suffix| {
            rest.strip_prefix(*suffix)
                .is_some_and(|tail| !tail.chars().next().is_some_and(char::is_alphanumeric))
        })
    })
}
