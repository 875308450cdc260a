//! Rhai, the executable language

use super::{Language, LanguageConfig};
use crate::constants::file_extensions;

/// Get configuration for Rhai
pub fn config() -> LanguageConfig {
    LanguageConfig {
        language: Language::Rhai,
        name: "Rhai",
        extension: file_extensions::RHAI,
        executable: true,
        starter_template: r#"// Write your {entry_point} function here
fn {entry_point}(n) {
    // Your code here
}

// Try it out
print({entry_point}(0));
print({entry_point}(5));"#,
    }
}
