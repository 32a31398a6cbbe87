use serde::{Deserialize, Serialize};

/// An author from the reference list, with affiliation codes still unresolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceAuthor {
    /// Name as spelled in the reference list
    pub name: String,
    /// Short affiliation codes in the order they were listed
    pub affiliation_codes: Vec<String>,
}

impl ReferenceAuthor {
    pub fn new(name: impl Into<String>, codes: &[&str]) -> Self {
        Self {
            name: name.into(),
            affiliation_codes: codes.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// An author together with the full text of each affiliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub name: String,
    pub affiliations: Vec<String>,
}

impl AuthorRecord {
    /// Flatten into one row per affiliation
    pub fn into_rows(self) -> Vec<RosterRow> {
        let name = self.name;
        self.affiliations
            .into_iter()
            .map(|affiliation| RosterRow::new(name.clone(), affiliation))
            .collect()
    }
}

/// One `(author, affiliation)` row of the working-group or merged table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRow {
    #[serde(rename = "auth", alias = "author")]
    pub author: String,
    #[serde(rename = "affil", alias = "affiliation")]
    pub affiliation: String,
}

impl RosterRow {
    pub fn new(author: impl Into<String>, affiliation: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            affiliation: affiliation.into(),
        }
    }
}
