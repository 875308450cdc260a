//! JavaScript template (display only)

use super::{Language, LanguageConfig};
use crate::constants::file_extensions;

/// Get configuration for JavaScript
pub fn config() -> LanguageConfig {
    LanguageConfig {
        language: Language::JavaScript,
        name: "JavaScript",
        extension: file_extensions::JAVASCRIPT,
        executable: false,
        starter_template: r#"// Write your {entry_point} function here
function {entry_point}(n) {
    // Your code here

}

// Try it out
console.log({entry_point}(0));
console.log({entry_point}(5));"#,
    }
}
