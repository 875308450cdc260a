//! C++ template (display only)

use super::{Language, LanguageConfig};
use crate::constants::file_extensions;

/// Get configuration for C++
pub fn config() -> LanguageConfig {
    LanguageConfig {
        language: Language::Cpp,
        name: "C++",
        extension: file_extensions::CPP,
        executable: false,
        starter_template: r#"#include <iostream>
using namespace std;

// Write your {entry_point} function here
int {entry_point}(int n) {
    // Your code here
    return 0;
}

int main() {
    cout << {entry_point}(0) << endl;
    cout << {entry_point}(5) << endl;
    return 0;
}"#,
    }
}
