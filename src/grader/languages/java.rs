//! Java template (display only)

use super::{Language, LanguageConfig};
use crate::constants::file_extensions;

/// Get configuration for Java
pub fn config() -> LanguageConfig {
    LanguageConfig {
        language: Language::Java,
        name: "Java",
        extension: file_extensions::JAVA,
        executable: false,
        starter_template: r#"public class Solution {
    // Write your {entry_point} function here
    public static int {entry_point}(int n) {
        // Your code here
        return 0;
    }

    public static void main(String[] args) {
        System.out.println({entry_point}(0));
        System.out.println({entry_point}(5));
    }
}"#,
    }
}
