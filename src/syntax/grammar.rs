//! Grammar tables: operator symbols, precedence groups and unary prefixes.
//!
//! The tables are plain data. The operator reader owns a reference to one set
//! of tables for the whole parse, so alternative grammars can be loaded from
//! configuration or built in tests.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{grammar_error, QuillError};
use crate::validation::validate_tables;

/// How a chain of operators from the same group nests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Associativity {
    /// `a - b - c` is `(a - b) - c`
    #[default]
    Left,
    /// `a ^ b ^ c` is `a ^ (b ^ c)`
    Right,
}

/// Operators that bind equally tightly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecedenceGroup {
    pub symbols: Vec<String>,
    #[serde(default)]
    pub associativity: Associativity,
}

impl PrecedenceGroup {
    pub fn left(symbols: &[&str]) -> Self {
        Self {
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
            associativity: Associativity::Left,
        }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }
}

/// The complete operator grammar.
///
/// `precedence` is ordered loosest first; a symbol's precedence is the index
/// of its group. `infix`, `unary` and `reserved` are candidate lists tried in
/// order against the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarTables {
    pub precedence: Vec<PrecedenceGroup>,
    pub infix: Vec<String>,
    pub unary: Vec<String>,
    /// Look-alike tokens owned by other constructs; an infix probe that sees
    /// one of these stops instead of reading an operator.
    pub reserved: Vec<String>,
    /// Precedence level unary operators bind at.
    pub unary_binding: usize,
}

static STANDARD: Lazy<GrammarTables> = Lazy::new(|| GrammarTables {
    precedence: vec![
        PrecedenceGroup::left(&["|"]),
        PrecedenceGroup::left(&["and", "or", "xor"]),
        PrecedenceGroup::left(&["=", "!=", ">=", "<=", ">", "<", "in"]),
        PrecedenceGroup::left(&["..", "%"]),
        PrecedenceGroup::left(&["+", "-", "&"]),
        PrecedenceGroup::left(&["*", "/"]),
        PrecedenceGroup::left(&["^", "+-"]),
        PrecedenceGroup::left(&["."]),
    ],
    infix: to_strings(&[
        "+-", "..", "!=", ">=", "<=", "=", ">", "<", "and", "or", "xor", "in", "*", "/", "^", "|",
        "%", "&", "+", "-", ".",
    ]),
    unary: to_strings(&["+", "-", "not"]),
    reserved: to_strings(&["->"]),
    unary_binding: 7,
});

fn to_strings(symbols: &[&str]) -> Vec<String> {
    symbols.iter().map(|s| s.to_string()).collect()
}

impl Default for GrammarTables {
    fn default() -> Self {
        STANDARD.clone()
    }
}

impl GrammarTables {
    /// The built-in grammar.
    pub fn standard() -> &'static GrammarTables {
        &STANDARD
    }

    /// Validates the tables and returns them, or the first validation error.
    pub fn checked(self) -> Result<Self, QuillError> {
        let result = validate_tables(&self);
        match result.errors.into_iter().next() {
            Some(message) => Err(grammar_error(message, &self.render_yaml())),
            None => Ok(self),
        }
    }

    /// Index of the group containing `symbol`.
    pub fn precedence_of(&self, symbol: &str) -> Option<usize> {
        self.precedence.iter().position(|g| g.contains(symbol))
    }

    pub fn associativity_at(&self, level: usize) -> Associativity {
        self.precedence
            .get(level)
            .map(|g| g.associativity)
            .unwrap_or_default()
    }

    pub fn is_infix(&self, symbol: &str) -> bool {
        self.infix.iter().any(|s| s == symbol)
    }

    /// Returns a copy where the group at `level` has the given associativity.
    pub fn with_associativity(mut self, level: usize, associativity: Associativity) -> Self {
        if let Some(group) = self.precedence.get_mut(level) {
            group.associativity = associativity;
        }
        self
    }

    pub fn with_unary_binding(mut self, level: usize) -> Self {
        self.unary_binding = level;
        self
    }

    pub fn render_yaml(&self) -> String {
        serde_yaml::to_string(self).unwrap_or_else(|e| format!("# unrenderable grammar: {e}"))
    }

    pub fn render_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}
