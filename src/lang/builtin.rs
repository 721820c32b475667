// src/lang/builtin.rs
//! Built-in language table.
//!
//! Registration order is significant: `c` and `cpp` both claim `.h`, and
//! `cpp` is registered later so it owns the extension.

use super::pattern::LangSpec;

const C_BLOCK: &str = r"(?s)/\*.*?\*/";
const C_LINE: &str = r"//[^\n]*";
const HASH_LINE: &str = r"#[^\n]*";
const DASH_LINE: &str = r"--[^\n]*";

const C_STYLE: &[&str] = &[C_BLOCK, C_LINE];

pub const C: LangSpec = LangSpec {
    name: "c",
    extensions: &["c", "h"],
    comments: C_STYLE,
    skip_prefixes: &["#include", "#pragma", "{", "}"],
    collapse_whitespace: true,
};

pub const CPP: LangSpec = LangSpec {
    name: "cpp",
    extensions: &["cc", "cpp", "cxx", "c++", "hh", "hpp", "hxx", "h"],
    comments: C_STYLE,
    skip_prefixes: &[
        "#include",
        "#pragma",
        "using namespace",
        "namespace ",
        "public:",
        "private:",
        "protected:",
        "{",
        "}",
    ],
    collapse_whitespace: true,
};

pub const OBJECTIVE_C: LangSpec = LangSpec {
    name: "objectivec",
    extensions: &["m", "mm"],
    comments: C_STYLE,
    skip_prefixes: &["#import", "#include", "@import", "@end", "{", "}"],
    collapse_whitespace: true,
};

pub const CSHARP: LangSpec = LangSpec {
    name: "csharp",
    extensions: &["cs"],
    comments: C_STYLE,
    skip_prefixes: &["using ", "namespace ", "[assembly:", "{", "}"],
    collapse_whitespace: true,
};

pub const JAVA: LangSpec = LangSpec {
    name: "java",
    extensions: &["java"],
    comments: C_STYLE,
    skip_prefixes: &[
        "import ",
        "package ",
        "public",
        "private",
        "protected",
        "@Override",
        "{",
        "}",
    ],
    collapse_whitespace: true,
};

pub const KOTLIN: LangSpec = LangSpec {
    name: "kotlin",
    extensions: &["kt", "kts"],
    comments: C_STYLE,
    skip_prefixes: &["import ", "package ", "@", "{", "}"],
    collapse_whitespace: true,
};

pub const SCALA: LangSpec = LangSpec {
    name: "scala",
    extensions: &["scala", "sc"],
    comments: C_STYLE,
    skip_prefixes: &["import ", "package ", "{", "}"],
    collapse_whitespace: true,
};

pub const GROOVY: LangSpec = LangSpec {
    name: "groovy",
    extensions: &["groovy", "gradle"],
    comments: C_STYLE,
    skip_prefixes: &["import ", "package ", "{", "}"],
    collapse_whitespace: true,
};

pub const GO: LangSpec = LangSpec {
    name: "go",
    extensions: &["go"],
    comments: C_STYLE,
    skip_prefixes: &["package ", "import ", "import(", ")", "{", "}"],
    collapse_whitespace: true,
};

pub const RUST: LangSpec = LangSpec {
    name: "rust",
    extensions: &["rs"],
    comments: C_STYLE,
    skip_prefixes: &["use ", "pub use ", "mod ", "extern crate ", "#[", "#![", "{", "}"],
    collapse_whitespace: true,
};

pub const SWIFT: LangSpec = LangSpec {
    name: "swift",
    extensions: &["swift"],
    comments: C_STYLE,
    skip_prefixes: &["import ", "{", "}"],
    collapse_whitespace: true,
};

pub const DART: LangSpec = LangSpec {
    name: "dart",
    extensions: &["dart"],
    comments: C_STYLE,
    skip_prefixes: &["import ", "export ", "library ", "part ", "{", "}"],
    collapse_whitespace: true,
};

pub const JAVASCRIPT: LangSpec = LangSpec {
    name: "javascript",
    extensions: &["js", "jsx", "mjs", "cjs"],
    comments: C_STYLE,
    skip_prefixes: &["import ", "'use strict'", "\"use strict\"", "{", "}"],
    collapse_whitespace: true,
};

pub const TYPESCRIPT: LangSpec = LangSpec {
    name: "typescript",
    extensions: &["ts", "tsx", "mts", "cts"],
    comments: C_STYLE,
    skip_prefixes: &["import ", "'use strict'", "\"use strict\"", "{", "}"],
    collapse_whitespace: true,
};

pub const PHP: LangSpec = LangSpec {
    name: "php",
    extensions: &["php", "phtml"],
    comments: &[C_BLOCK, C_LINE, HASH_LINE],
    skip_prefixes: &[
        "<?php",
        "?>",
        "namespace ",
        "use ",
        "require",
        "include",
        "{",
        "}",
    ],
    collapse_whitespace: true,
};

pub const PYTHON: LangSpec = LangSpec {
    name: "python",
    extensions: &["py", "pyw", "pyi"],
    comments: &[r#"(?s)""".*?""""#, r"(?s)'''.*?'''", HASH_LINE],
    skip_prefixes: &["import ", "from "],
    collapse_whitespace: false,
};

pub const RUBY: LangSpec = LangSpec {
    name: "ruby",
    extensions: &["rb", "rake", "gemspec"],
    comments: &[r"(?ms)^=begin.*?^=end[^\n]*", HASH_LINE],
    skip_prefixes: &["require ", "require_relative "],
    collapse_whitespace: true,
};

pub const PERL: LangSpec = LangSpec {
    name: "perl",
    extensions: &["pl", "pm"],
    comments: &[r"(?ms)^=[a-zA-Z]+.*?^=cut[^\n]*", HASH_LINE],
    skip_prefixes: &["use ", "package ", "1;", "{", "}"],
    collapse_whitespace: true,
};

pub const LUA: LangSpec = LangSpec {
    name: "lua",
    extensions: &["lua"],
    comments: &[r"(?s)--\[\[.*?\]\]", DASH_LINE],
    skip_prefixes: &["require"],
    collapse_whitespace: true,
};

pub const SHELL: LangSpec = LangSpec {
    name: "shell",
    extensions: &["sh", "bash", "zsh", "ksh"],
    comments: &[HASH_LINE],
    skip_prefixes: &["set -"],
    collapse_whitespace: true,
};

pub const SQL: LangSpec = LangSpec {
    name: "sql",
    extensions: &["sql"],
    comments: &[C_BLOCK, DASH_LINE],
    skip_prefixes: &[],
    collapse_whitespace: true,
};

pub const HASKELL: LangSpec = LangSpec {
    name: "haskell",
    extensions: &["hs", "lhs"],
    comments: &[r"(?s)\{-.*?-\}", DASH_LINE],
    skip_prefixes: &["import ", "module "],
    collapse_whitespace: false,
};

pub const R: LangSpec = LangSpec {
    name: "r",
    extensions: &["r"],
    comments: &[HASH_LINE],
    skip_prefixes: &["library(", "require("],
    collapse_whitespace: true,
};

/// Every built-in language in registration order.
#[must_use]
pub fn specs() -> Vec<LangSpec> {
    vec![
        C,
        CPP,
        OBJECTIVE_C,
        CSHARP,
        JAVA,
        KOTLIN,
        SCALA,
        GROOVY,
        GO,
        RUST,
        SWIFT,
        DART,
        JAVASCRIPT,
        TYPESCRIPT,
        PHP,
        PYTHON,
        RUBY,
        PERL,
        LUA,
        SHELL,
        SQL,
        HASKELL,
        R,
    ]
}
