//! Fixed literals the walkthrough reads and writes.

use serde::{Deserialize, Serialize};

/// Default GET endpoint.
pub const TODO_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/todos/1";

/// Text appended in the file section.
pub const NEW_CONTENT: &str = "I'm new content!";

/// JSON literal parsed in the JSON section.
pub const PERSON_JSON: &str = r#"{ "id": 1, "firstName": "Lead", "lastName": "Organa"}"#;

/// A person as it appears in JSON (camelCase keys).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
}

impl Person {
    pub fn leah() -> Self {
        Self {
            id: 1,
            first_name: "Leah".to_string(),
            last_name: "Organa".to_string(),
        }
    }
}

/// A roster row as it appears in CSV (snake_case headers).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
}

impl Member {
    fn new(id: u32, first_name: &str, last_name: &str) -> Self {
        Self {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }
}

/// The sample roster.
pub fn members() -> Vec<Member> {
    vec![
        Member::new(1, "Johh", "Doe"),
        Member::new(2, "Michael", "Smith"),
        Member::new(3, "Sally", "Dean"),
        Member::new(4, "Peter", "Rabbit"),
        Member::new(5, "Jordyn", "Murphy Mindorff"),
    ]
}

/// The roster as string rows, header first.
pub fn roster_rows() -> Vec<Vec<String>> {
    let header = ["id", "first_name", "last_name"].map(String::from).to_vec();
    std::iter::once(header)
        .chain(
            members()
                .into_iter()
                .map(|m| vec![m.id.to_string(), m.first_name, m.last_name]),
        )
        .collect()
}

/// Price history used when no sample CSV exists yet.
pub const PRICES_CSV: &str = "date,price
2024-01-02,187.15
2024-01-03,184.25
2024-01-04,181.91
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_shape() {
        let rows = roster_rows();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0], vec!["id", "first_name", "last_name"]);
        assert_eq!(rows[5][2], "Murphy Mindorff");
    }

    #[test]
    fn test_person_json_matches_type() {
        let p: Person = serde_json::from_str(PERSON_JSON).unwrap();
        assert_eq!(p.first_name, "Lead");
    }
}
