use super::Rating;
use itertools::Itertools;
use std::collections::HashMap;

/// Every fighter seen so far, in order of first appearance.
#[derive(Clone, Debug, Default)]
pub struct CompetitorsByName {
    index: HashMap<String, usize>,
    competitors: Vec<(String, Rating)>,
}

impl CompetitorsByName {
    pub fn len(&self) -> usize {
        self.competitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Rating> {
        self.index.get(name).map(|&i| &self.competitors[i].1)
    }

    /// Returns the fighter's state, inserting `newcomer` if they are new.
    pub fn get_or_init(&mut self, name: &str, newcomer: Rating) -> &mut Rating {
        let i = match self.index.get(name) {
            Some(&i) => i,
            None => {
                let i = self.competitors.len();
                self.index.insert(name.to_owned(), i);
                self.competitors.push((name.to_owned(), newcomer));
                i
            }
        };
        &mut self.competitors[i].1
    }

    /// Iterates in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rating)> {
        self.competitors.iter().map(|(name, r)| (name.as_str(), r))
    }

    /// All fighters sorted by current rating, highest first. Ties keep order
    /// of first appearance.
    pub fn current_table(&self) -> impl Iterator<Item = (&str, f64)> {
        self.sorted_by_value(|r| r.rating)
    }

    /// As `current_table`, keyed on peak rating.
    pub fn peak_table(&self) -> impl Iterator<Item = (&str, f64)> {
        self.sorted_by_value(|r| r.peak_rating)
    }

    fn sorted_by_value(&self, value: impl Fn(&Rating) -> f64) -> impl Iterator<Item = (&str, f64)> {
        // sorted_by is a stable sort
        self.iter()
            .map(|(name, r)| (name, value(r)))
            .sorted_by(|a, b| b.1.total_cmp(&a.1))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use claims::{assert_none, assert_some_eq};

    #[test]
    fn test_get_or_init_inserts_once() {
        let mut players = CompetitorsByName::default();
        players.get_or_init("Jon Jones", Rating::new(1000.)).rating = 1100.;
        let again = players.get_or_init("Jon Jones", Rating::new(1000.));
        assert_eq!(again.rating, 1100.);
        assert_eq!(players.len(), 1);
        assert_none!(players.get("Daniel Cormier"));
    }

    #[test]
    fn test_tables_are_descending_and_stable() {
        let mut players = CompetitorsByName::default();
        for (name, rating) in [("a", 1000.), ("b", 1020.), ("c", 1000.), ("d", 980.)] {
            players.get_or_init(name, Rating::new(rating));
        }
        players.get_or_init("d", Rating::new(0.)).peak_rating = 1050.;

        let current: Vec<_> = players.current_table().map(|(name, _)| name).collect();
        assert_eq!(current, vec!["b", "a", "c", "d"]);

        let peak: Vec<_> = players.peak_table().collect();
        assert_eq!(peak[0], ("d", 1050.));
        assert_eq!(peak[2], ("a", 1000.));
        assert_eq!(peak[3], ("c", 1000.));
        assert_some_eq!(players.get("d").map(|r| r.rating), 980.);
    }
}
