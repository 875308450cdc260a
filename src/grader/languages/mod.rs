//! Languages offered in the editor
//!
//! Rhai is the only language the grader executes. The rest ship a starter
//! template so the editor can switch between them, and runs in those
//! languages are simulated.

pub mod cpp;
pub mod java;
pub mod javascript;
pub mod python;
pub mod rhai;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Language identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Rhai,
    JavaScript,
    Python,
    Java,
    Cpp,
}

impl Language {
    /// Every language, executable one first
    pub const ALL: [Language; 5] = [
        Language::Rhai,
        Language::JavaScript,
        Language::Python,
        Language::Java,
        Language::Cpp,
    ];

    /// Wire identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Rhai => constants::languages::RHAI,
            Language::JavaScript => constants::languages::JAVASCRIPT,
            Language::Python => constants::languages::PYTHON,
            Language::Java => constants::languages::JAVA,
            Language::Cpp => constants::languages::CPP,
        }
    }

    /// Editor configuration for this language
    pub fn config(&self) -> LanguageConfig {
        match self {
            Language::Rhai => rhai::config(),
            Language::JavaScript => javascript::config(),
            Language::Python => python::config(),
            Language::Java => java::config(),
            Language::Cpp => cpp::config(),
        }
    }

    /// Whether the grader actually runs code in this language
    pub fn is_executable(&self) -> bool {
        matches!(self, Language::Rhai)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            constants::languages::RHAI => Ok(Language::Rhai),
            constants::languages::JAVASCRIPT | "js" => Ok(Language::JavaScript),
            constants::languages::PYTHON | "py" => Ok(Language::Python),
            constants::languages::JAVA => Ok(Language::Java),
            constants::languages::CPP | "c++" => Ok(Language::Cpp),
            other => Err(format!("Unsupported language: {}", other)),
        }
    }
}

/// Editor configuration for one language
#[derive(Debug, Clone, Serialize)]
pub struct LanguageConfig {
    pub language: Language,
    pub name: &'static str,
    pub extension: &'static str,
    pub executable: bool,
    /// Starter code with an `{entry_point}` placeholder
    pub starter_template: &'static str,
}

impl LanguageConfig {
    /// Starter code for the given entry-point name
    pub fn render_starter(&self, entry_point: &str) -> String {
        self.starter_template.replace("{entry_point}", entry_point)
    }
}

/// Configuration for every language
pub fn all_configs() -> Vec<LanguageConfig> {
    Language::ALL.iter().map(Language::config).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_rhai_is_executable() {
        let executable: Vec<_> = Language::ALL.iter().filter(|l| l.is_executable()).collect();
        assert_eq!(executable, vec![&Language::Rhai]);
        assert!(all_configs().iter().all(|c| c.executable == c.language.is_executable()));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("Python".parse::<Language>().unwrap(), Language::Python);
        assert_eq!("c++".parse::<Language>().unwrap(), Language::Cpp);
        assert!("sql".parse::<Language>().is_err());
        assert_eq!(Language::JavaScript.to_string(), "javascript");
        assert_eq!(
            serde_json::to_string(&Language::Cpp).unwrap(),
            "\"cpp\""
        );
    }

    #[test]
    fn test_render_starter_fills_entry_point() {
        for config in all_configs() {
            let code = config.render_starter("fibonacci");
            assert!(code.contains("fibonacci"), "{} template", config.name);
            assert!(!code.contains("{entry_point}"));
        }
    }
}
