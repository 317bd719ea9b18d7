//! Language Registry
//!
//! Static table of the languages the playground offers. Each entry maps the
//! playground identifier to the name the execution API expects and to the
//! starter snippet loaded into the editor when the language is selected.
//!
//! Lookups are total: identifiers missing from the table fall back to
//! themselves (API name) or to [`PLACEHOLDER_CODE`] (starter snippet).

/// Starter text for identifiers with no registered snippet
pub const PLACEHOLDER_CODE: &str = "// Start coding...";

/// Language selected when nothing else is configured
pub const DEFAULT_LANGUAGE: &str = "javascript";

/// One registry entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Playground identifier (selector value, file extension of `Main.<id>`)
    pub id: &'static str,
    /// Language name sent to the execution API
    pub api_name: &'static str,
    /// Snippet loaded into the editor on selection
    pub default_code: &'static str,
    /// Source file extensions that map to this language
    pub extensions: &'static [&'static str],
}

pub const LANGUAGES: &[Language] = &[
    Language {
        id: "javascript",
        api_name: "javascript",
        default_code: "// JavaScript Example\nconsole.log(\"Hello, World!\");",
        extensions: &["js", "mjs", "cjs"],
    },
    Language {
        id: "python",
        api_name: "python3",
        default_code: "print(\"Hello, World!\")",
        extensions: &["py"],
    },
    Language {
        id: "java",
        api_name: "java",
        default_code: "public class HelloWorld {\n  public static void main(String[] args) {\n    System.out.println(\"Hello, World!\");\n  }\n}",
        extensions: &["java"],
    },
    Language {
        id: "php",
        api_name: "php",
        default_code: "<?php\necho \"Hello, World!\";\n?>",
        extensions: &["php"],
    },
    Language {
        id: "csharp",
        api_name: "csharp",
        default_code: "using System;\nclass Program {\n  static void Main() {\n    Console.WriteLine(\"Hello, World!\");\n  }\n}",
        extensions: &["cs"],
    },
    Language {
        id: "cpp",
        api_name: "cpp",
        default_code: "#include <iostream>\nint main() {\n  std::cout << \"Hello, World!\";\n  return 0;\n}",
        extensions: &["cpp", "cc", "cxx"],
    },
    Language {
        id: "c",
        api_name: "c",
        default_code: "#include <stdio.h>\nint main() {\n  printf(\"Hello, World!\");\n  return 0;\n}",
        extensions: &["c"],
    },
    Language {
        id: "ruby",
        api_name: "ruby",
        default_code: "puts \"Hello, World!\"",
        extensions: &["rb"],
    },
    Language {
        id: "go",
        api_name: "go",
        default_code: "package main\nimport \"fmt\"\nfunc main() {\n  fmt.Println(\"Hello, World!\")\n}",
        extensions: &["go"],
    },
    Language {
        id: "rust",
        api_name: "rust",
        default_code: "fn main() {\n  println!(\"Hello, World!\");\n}",
        extensions: &["rs"],
    },
    Language {
        id: "swift",
        api_name: "swift",
        default_code: "print(\"Hello, World!\")",
        extensions: &["swift"],
    },
    Language {
        id: "typescript",
        api_name: "typescript",
        default_code: "console.log(\"Hello, World!\");",
        extensions: &["ts"],
    },
];

/// All registered languages, in selector order
pub fn all() -> &'static [Language] {
    LANGUAGES
}

/// Find a registered language by identifier
pub fn lookup(id: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|lang| lang.id == id)
}

/// Index of `id` in selector order
pub fn position(id: &str) -> Option<usize> {
    LANGUAGES.iter().position(|lang| lang.id == id)
}

/// API language name for `id`, or `id` itself when unregistered
pub fn api_name(id: &str) -> &str {
    lookup(id).map(|lang| lang.api_name).unwrap_or(id)
}

/// Starter snippet for `id`, or [`PLACEHOLDER_CODE`] when unregistered
pub fn default_code(id: &str) -> &'static str {
    lookup(id)
        .map(|lang| lang.default_code)
        .unwrap_or(PLACEHOLDER_CODE)
}

/// Selector label: identifier with its first character upper-cased
pub fn display_name(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Infer a language from a file extension (case-insensitive, no leading dot)
pub fn from_extension(ext: &str) -> Option<&'static Language> {
    let ext = ext.trim_start_matches('.').to_ascii_lowercase();
    LANGUAGES
        .iter()
        .find(|lang| lang.extensions.contains(&ext.as_str()))
}

/// Neighbour of `id` in selector order, wrapping at both ends.
///
/// Unregistered identifiers step from the start of the table.
pub fn cycle(id: &str, forward: bool) -> &'static Language {
    let len = LANGUAGES.len();
    let next = match (position(id), forward) {
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
        (None, _) => 0,
    };
    &LANGUAGES[next]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_maps_to_python3() {
        assert_eq!(api_name("python"), "python3");
    }

    #[test]
    fn test_api_name_falls_back_to_identifier() {
        assert_eq!(api_name("kotlin"), "kotlin");
        assert_eq!(api_name(""), "");
    }

    #[test]
    fn test_every_language_has_a_default() {
        for lang in all() {
            assert_eq!(default_code(lang.id), lang.default_code);
            assert_ne!(lang.default_code, PLACEHOLDER_CODE);
            assert!(!lang.default_code.is_empty(), "{} has empty starter", lang.id);
        }
    }

    #[test]
    fn test_default_code_placeholder_for_unknown() {
        assert_eq!(default_code("cobol"), "// Start coding...");
    }

    #[test]
    fn test_identifiers_are_unique() {
        let mut ids: Vec<_> = all().iter().map(|l| l.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), LANGUAGES.len());
    }

    #[test]
    fn test_default_language_is_registered() {
        assert!(lookup(DEFAULT_LANGUAGE).is_some());
    }

    #[test]
    fn test_display_name_capitalizes() {
        assert_eq!(display_name("python"), "Python");
        assert_eq!(display_name("csharp"), "Csharp");
        assert_eq!(display_name("c"), "C");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(from_extension("py").map(|l| l.id), Some("python"));
        assert_eq!(from_extension(".RS").map(|l| l.id), Some("rust"));
        assert_eq!(from_extension("cc").map(|l| l.id), Some("cpp"));
        assert!(from_extension("txt").is_none());
    }

    #[test]
    fn test_cycle_wraps() {
        let first = LANGUAGES[0].id;
        let last = LANGUAGES[LANGUAGES.len() - 1].id;

        assert_eq!(cycle(last, true).id, first);
        assert_eq!(cycle(first, false).id, last);
        assert_eq!(cycle("javascript", true).id, "python");
        assert_eq!(cycle("unknown", true).id, first);
    }
}
