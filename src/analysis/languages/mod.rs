//! Language-specific analyzer implementations and the extension registry.

mod cpp;
mod java;
mod javascript;
mod python;
mod rust_lang;
mod typescript;

pub use cpp::CppAnalyzer;
pub use java::JavaAnalyzer;
pub use javascript::JavaScriptAnalyzer;
pub use python::PythonAnalyzer;
pub use rust_lang::RustAnalyzer;
pub use typescript::TypeScriptAnalyzer;

use once_cell::sync::OnceCell;
use phf::phf_set;

use super::{Language, LanguageAnalyzer};

/// Keywords that can look like calls in every supported language.
pub static CONTROL_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "if", "for", "while", "switch", "catch", "match",
};

/// Extension (lowercase, without dot) to language table.
pub const SUPPORTED_EXTENSIONS: &[(&str, Language)] = &[
    ("py", Language::Python),
    ("js", Language::JavaScript),
    ("jsx", Language::JavaScript),
    ("ts", Language::TypeScript),
    ("tsx", Language::TypeScript),
    ("java", Language::Java),
    ("cpp", Language::Cpp),
    ("cc", Language::Cpp),
    ("cxx", Language::Cpp),
    ("h", Language::Cpp),
    ("hpp", Language::Cpp),
    ("rs", Language::Rust),
];

/// Static storage for C++ analyzer.
static CPP_ANALYZER: OnceCell<CppAnalyzer> = OnceCell::new();

/// Static storage for Java analyzer.
static JAVA_ANALYZER: OnceCell<JavaAnalyzer> = OnceCell::new();

/// Static storage for JavaScript analyzer.
static JAVASCRIPT_ANALYZER: OnceCell<JavaScriptAnalyzer> = OnceCell::new();

/// Static storage for Python analyzer.
static PYTHON_ANALYZER: OnceCell<PythonAnalyzer> = OnceCell::new();

/// Static storage for Rust analyzer.
static RUST_ANALYZER: OnceCell<RustAnalyzer> = OnceCell::new();

/// Static storage for TypeScript analyzer.
static TYPESCRIPT_ANALYZER: OnceCell<TypeScriptAnalyzer> = OnceCell::new();

/// Static storage for the TSX flavour of the TypeScript analyzer.
static TSX_ANALYZER: OnceCell<TypeScriptAnalyzer> = OnceCell::new();

/// Look up the language for a file extension (with or without dot).
pub fn language_for_extension(ext: &str) -> Option<Language> {
    let ext = ext.trim_start_matches('.').to_ascii_lowercase();
    SUPPORTED_EXTENSIONS
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, lang)| *lang)
}

/// Check whether a file extension is handled by any analyzer.
pub fn is_supported_extension(ext: &str) -> bool {
    language_for_extension(ext).is_some()
}

/// Get an analyzer for the given file extension.
///
/// Returns None if no analyzer is registered for the extension.
pub fn get_analyzer(ext: &str) -> Option<&'static dyn LanguageAnalyzer> {
    let ext = ext.trim_start_matches('.').to_ascii_lowercase();

    let analyzer: &'static dyn LanguageAnalyzer = match ext.as_str() {
        "py" => PYTHON_ANALYZER.get_or_init(PythonAnalyzer::new),
        "js" | "jsx" => JAVASCRIPT_ANALYZER.get_or_init(JavaScriptAnalyzer::new),
        "ts" => TYPESCRIPT_ANALYZER.get_or_init(TypeScriptAnalyzer::new),
        "tsx" => TSX_ANALYZER.get_or_init(TypeScriptAnalyzer::tsx),
        "java" => JAVA_ANALYZER.get_or_init(JavaAnalyzer::new),
        "cpp" | "cc" | "cxx" | "h" | "hpp" => CPP_ANALYZER.get_or_init(CppAnalyzer::new),
        "rs" => RUST_ANALYZER.get_or_init(RustAnalyzer::new),
        _ => return None,
    };

    Some(analyzer)
}

/// Get all registered language IDs.
pub fn registered_languages() -> Vec<Language> {
    let mut languages: Vec<Language> = SUPPORTED_EXTENSIONS.iter().map(|(_, l)| *l).collect();
    languages.dedup();
    languages
}
