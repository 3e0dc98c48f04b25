//! Search-and-select state.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Result of an interactive selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The user committed this title.
    Chosen(String),
    /// The user aborted the prompt.
    Cancelled,
}

/// Filter-as-you-type state over a fixed list of titles.
pub struct Selector {
    /// Candidate titles in database order.
    titles: Vec<String>,
    /// Current search query.
    query: String,
    /// Indices into `titles` that match the query, best first.
    matches: Vec<usize>,
    /// Highlighted position in `matches`.
    cursor: usize,
    matcher: SkimMatcherV2,
}

impl Selector {
    /// Create a selector. `initial_query` behaves exactly as if it had been
    /// typed into an empty prompt.
    pub fn new(titles: Vec<String>, initial_query: Option<&str>) -> Self {
        let mut selector = Self {
            titles,
            query: String::new(),
            matches: Vec::new(),
            cursor: 0,
            matcher: SkimMatcherV2::default().ignore_case(),
        };
        selector.query.push_str(initial_query.unwrap_or_default());
        selector.refilter();
        selector
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Matching titles in display order.
    pub fn candidates(&self) -> impl Iterator<Item = &str> + '_ {
        self.matches.iter().map(|&i| self.titles[i].as_str())
    }

    pub fn candidate_count(&self) -> usize {
        self.matches.len()
    }

    /// Title under the cursor.
    pub fn highlighted(&self) -> Option<&str> {
        self.matches
            .get(self.cursor)
            .map(|&i| self.titles[i].as_str())
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.refilter();
    }

    pub fn pop_char(&mut self) {
        if self.query.pop().is_some() {
            self.refilter();
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.matches.len() {
            self.cursor += 1;
        }
    }

    /// Commit the highlighted title. `None` while nothing matches.
    pub fn commit(&self) -> Option<Selection> {
        self.highlighted()
            .map(|title| Selection::Chosen(title.to_string()))
    }

    /// Recompute matches for the current query and reset the cursor.
    fn refilter(&mut self) {
        self.cursor = 0;

        if self.query.is_empty() {
            self.matches = (0..self.titles.len()).collect();
            return;
        }

        let mut scored: Vec<(usize, i64)> = self
            .titles
            .iter()
            .enumerate()
            .filter_map(|(i, title)| {
                self.matcher
                    .fuzzy_match(title, &self.query)
                    .map(|score| (i, score))
            })
            .collect();

        // Stable: equal scores keep database order.
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        self.matches = scored.into_iter().map(|(i, _)| i).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles() -> Vec<String> {
        ["Bank", "Email", "Github"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn candidates(selector: &Selector) -> Vec<&str> {
        selector.candidates().collect()
    }

    #[test]
    fn empty_query_lists_every_title_in_order() {
        let selector = Selector::new(titles(), None);
        assert_eq!(candidates(&selector), vec!["Bank", "Email", "Github"]);
        assert_eq!(selector.highlighted(), Some("Bank"));
    }

    #[test]
    fn initial_query_narrows_like_typing() {
        let seeded = Selector::new(titles(), Some("ba"));
        assert_eq!(candidates(&seeded), vec!["Bank"]);
        assert_eq!(seeded.commit(), Some(Selection::Chosen("Bank".into())));

        let mut typed = Selector::new(titles(), None);
        typed.push_char('b');
        typed.push_char('a');
        assert_eq!(typed.query(), seeded.query());
        assert_eq!(candidates(&typed), candidates(&seeded));
        assert_eq!(typed.cursor(), seeded.cursor());
    }

    #[test]
    fn matching_ignores_case() {
        let selector = Selector::new(titles(), Some("GIT"));
        assert_eq!(candidates(&selector), vec!["Github"]);
    }

    #[test]
    fn backspace_widens_the_filter_again() {
        let mut selector = Selector::new(titles(), Some("em"));
        assert_eq!(candidates(&selector), vec!["Email"]);

        selector.pop_char();
        selector.pop_char();
        assert_eq!(selector.query(), "");
        assert_eq!(candidates(&selector).len(), 3);

        // Popping an empty query is a no-op.
        selector.pop_char();
        assert_eq!(candidates(&selector).len(), 3);
    }

    #[test]
    fn cursor_moves_within_bounds() {
        let mut selector = Selector::new(titles(), None);
        selector.move_up();
        assert_eq!(selector.cursor(), 0);

        selector.move_down();
        selector.move_down();
        selector.move_down();
        assert_eq!(selector.cursor(), 2);
        assert_eq!(selector.commit(), Some(Selection::Chosen("Github".into())));

        selector.move_up();
        assert_eq!(selector.highlighted(), Some("Email"));
    }

    #[test]
    fn typing_resets_the_cursor() {
        let mut selector = Selector::new(titles(), None);
        selector.move_down();
        selector.push_char('i');
        assert_eq!(selector.cursor(), 0);
    }

    #[test]
    fn nothing_to_commit_without_matches() {
        let selector = Selector::new(titles(), Some("zzz"));
        assert_eq!(selector.candidate_count(), 0);
        assert_eq!(selector.commit(), None);
    }

    #[test]
    fn duplicate_titles_are_both_listed() {
        let selector = Selector::new(vec!["Bank".into(), "Bank".into()], None);
        assert_eq!(candidates(&selector), vec!["Bank", "Bank"]);
    }
}
