use std::collections::HashSet;

use serde::Serialize;

use super::RosterRow;

/// Reference rows followed by working-group rows
///
/// All rows of one author must be contiguous; the citation renderer relies
/// on it to emit continuation superscripts instead of repeating a name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergedTable {
    pub rows: Vec<RosterRow>,
    /// Index of the first working-group-only row (== rows.len() if none)
    pub first_member: usize,
}

impl MergedTable {
    /// Rows belonging to the paper's own author list
    pub fn reference_rows(&self) -> &[RosterRow] {
        &self.rows[..self.first_member.min(self.rows.len())]
    }

    /// Rows belonging to working-group-only members
    pub fn member_rows(&self) -> &[RosterRow] {
        &self.rows[self.first_member.min(self.rows.len())..]
    }

    /// Authors in table order, each listed once
    pub fn authors(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|r| r.author.as_str())
            .filter(|a| seen.insert(*a))
            .collect()
    }

    /// Distinct trimmed affiliation texts, sorted
    pub fn distinct_affiliations(&self) -> Vec<String> {
        let mut affiliations: Vec<String> = self
            .rows
            .iter()
            .map(|r| r.affiliation.trim().to_string())
            .collect();
        affiliations.sort();
        affiliations.dedup();
        affiliations
    }

    /// Authors whose rows are interrupted by another author, in table order
    pub fn split_authors(&self) -> Vec<String> {
        let mut closed: HashSet<&str> = HashSet::new();
        let mut split = Vec::new();
        let mut previous: Option<&str> = None;

        for row in &self.rows {
            let author = row.author.as_str();
            if previous == Some(author) {
                continue;
            }
            if let Some(prev) = previous {
                closed.insert(prev);
            }
            if closed.contains(author) && !split.iter().any(|s: &String| s == author) {
                split.push(author.to_string());
            }
            previous = Some(author);
        }

        split
    }

    pub fn is_contiguous(&self) -> bool {
        self.split_authors().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, &str)], first_member: usize) -> MergedTable {
        MergedTable {
            rows: rows.iter().map(|(a, f)| RosterRow::new(*a, *f)).collect(),
            first_member,
        }
    }

    #[test]
    fn test_contiguous_table() {
        let t = table(&[("A", "x"), ("A", "y"), ("B", "x"), ("C", "z")], 2);

        assert!(t.is_contiguous());
        assert_eq!(t.reference_rows().len(), 2);
        assert_eq!(t.member_rows().len(), 2);
        assert_eq!(t.authors(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_split_author_detected() {
        let t = table(&[("A", "x"), ("B", "y"), ("A", "z"), ("B", "w")], 4);

        assert_eq!(t.split_authors(), vec!["A".to_string(), "B".to_string()]);
        assert!(!t.is_contiguous());
    }

    #[test]
    fn test_distinct_affiliations_sorted_and_trimmed() {
        let t = table(&[("A", " b "), ("B", "a"), ("C", "b")], 3);

        assert_eq!(t.distinct_affiliations(), vec!["a".to_string(), "b".to_string()]);
        assert!(t.member_rows().is_empty());
    }
}
