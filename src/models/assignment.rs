//! Assignment model

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::grader::{Language, Scalar};

/// Assignment difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(s)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("Unknown difficulty: {}", other)),
        }
    }
}

/// One graded input/expected pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: Scalar,
    pub expected: Scalar,
    pub description: String,
}

/// Worked example shown to the student, never executed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentExample {
    pub input: String,
    pub output: String,
}

/// A coding assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    /// Language the assignment is written for
    #[serde(default)]
    pub language: Language,
    pub time_limit_minutes: u32,
    pub points: u32,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub examples: Vec<AssignmentExample>,
    /// Name of the function the test cases call
    pub entry_point: String,
    #[serde(default)]
    pub starter_code: BTreeMap<Language, String>,
    pub test_cases: Vec<TestCase>,
    #[serde(default, skip_serializing)]
    pub reference_solution: Option<String>,
}

impl Assignment {
    /// Starter code for `language`, falling back to the language template
    pub fn starter_code_for(&self, language: Language) -> String {
        match self.starter_code.get(&language) {
            Some(code) => code.clone(),
            None => language.config().render_starter(&self.entry_point),
        }
    }

    /// Time limit in seconds
    pub fn time_limit_seconds(&self) -> u64 {
        u64::from(self.time_limit_minutes) * 60
    }

    /// Case-insensitive match on title, description and topics
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self.topics.iter().any(|t| t.to_lowercase().contains(&query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment() -> Assignment {
        Assignment {
            id: 7,
            title: "Reverse a String".into(),
            description: "Return the input reversed".into(),
            difficulty: Difficulty::Easy,
            language: Language::Rhai,
            time_limit_minutes: 15,
            points: 50,
            topics: vec!["Strings".into()],
            instructions: vec![],
            examples: vec![],
            entry_point: "reverse".into(),
            starter_code: BTreeMap::from([(Language::Rhai, "fn reverse(s) { s }".to_string())]),
            test_cases: vec![],
            reference_solution: Some("secret".into()),
        }
    }

    #[test]
    fn test_starter_code_falls_back_to_template() {
        let a = assignment();
        assert_eq!(a.starter_code_for(Language::Rhai), "fn reverse(s) { s }");
        assert!(a.starter_code_for(Language::Python).contains("def reverse(n):"));
    }

    #[test]
    fn test_search_matches_topics() {
        let a = assignment();
        assert!(a.matches_search("strings"));
        assert!(a.matches_search("REVERSE"));
        assert!(a.matches_search(""));
        assert!(!a.matches_search("graph"));
    }

    #[test]
    fn test_reference_solution_is_not_serialized() {
        let json = serde_json::to_value(assignment()).unwrap();
        assert!(json.get("reference_solution").is_none());
        assert_eq!(json["difficulty"], "easy");
        assert_eq!(json["starter_code"]["rhai"], "fn reverse(s) { s }");
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("Medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert!("extreme".parse::<Difficulty>().is_err());
    }
}
