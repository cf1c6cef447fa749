/// Decides whether free text names a recognized term, such as a known area or issue category.
pub trait TermMatcher: Send + Sync {
    fn matches(&self, text: &str) -> bool;
}

impl<F> TermMatcher for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn matches(&self, text: &str) -> bool {
        self(text)
    }
}

/// Case-insensitive substring matcher over a fixed list of terms.
///
/// Blank terms are dropped on construction so they never match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    terms: Vec<String>,
}

impl AllowList {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .filter(|term| !term.as_ref().trim().is_empty())
            .map(|term| term.as_ref().to_lowercase())
            .collect();
        Self { terms }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl TermMatcher for AllowList {
    fn matches(&self, text: &str) -> bool {
        let haystack = text.to_lowercase();
        self.terms.iter().any(|term| haystack.contains(term.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_matches_substrings_ignoring_case() {
        let list = AllowList::new(["Bandra", "Navi Mumbai"]);

        assert!(list.matches("Linking Road, BANDRA West"));
        assert!(list.matches("sector 17, navi mumbai"));
        assert!(!list.matches("Pune station"));
    }

    #[test]
    fn blank_terms_are_dropped() {
        let list = AllowList::new(["", "  ", "Juhu"]);

        assert_eq!(list.len(), 1);
        assert_eq!(list.terms(), ["juhu".to_string()]);
        assert!(!list.matches("Random"));
    }

    #[test]
    fn empty_list_matches_nothing() {
        let list = AllowList::default();
        assert!(list.is_empty());
        assert!(!list.matches("Bandra"));
    }

    #[test]
    fn closures_act_as_matchers() {
        let starts_with_mh = |text: &str| text.starts_with("MH");
        assert!(starts_with_mh.matches("MH01"));
        assert!(!TermMatcher::matches(&starts_with_mh, "KA05"));
    }
}
