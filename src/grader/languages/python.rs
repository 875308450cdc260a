//! Python template (display only)

use super::{Language, LanguageConfig};
use crate::constants::file_extensions;

/// Get configuration for Python
pub fn config() -> LanguageConfig {
    LanguageConfig {
        language: Language::Python,
        name: "Python",
        extension: file_extensions::PYTHON,
        executable: false,
        starter_template: r#"# Write your {entry_point} function here
def {entry_point}(n):
    # Your code here
    pass

# Try it out
print({entry_point}(0))
print({entry_point}(5))"#,
    }
}
