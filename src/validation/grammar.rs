use std::collections::HashMap;

use crate::syntax::cursor::is_word_char;
use crate::syntax::grammar::GrammarTables;

// =====================
// Core Data Structures
// =====================

#[derive(Debug)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

// =====================
// Traits
// =====================

pub trait ValidationReporter {
    fn report_error(&mut self, message: impl Into<String>);
    fn report_warning(&mut self, message: impl Into<String>);
}

impl ValidationReporter for ValidationResult {
    fn report_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }
    fn report_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

// =====================
// Public API
// =====================

/// Runs every grammar check over `tables`.
pub fn validate_tables(tables: &GrammarTables) -> ValidationResult {
    let mut result = ValidationResult::new();
    GrammarValidators::check_not_empty(tables, &mut result);
    GrammarValidators::check_symbol_shape(tables, &mut result);
    GrammarValidators::check_shadowed_candidates("infix", &tables.infix, &mut result);
    GrammarValidators::check_shadowed_candidates("unary", &tables.unary, &mut result);
    GrammarValidators::check_shadowed_candidates("reserved", &tables.reserved, &mut result);
    GrammarValidators::check_group_membership(tables, &mut result);
    GrammarValidators::check_reserved_overlap(tables, &mut result);
    GrammarValidators::check_unary_binding(tables, &mut result);
    result
}

/// Each validator focuses on a single concern.
pub struct GrammarValidators;

impl GrammarValidators {
    pub fn check_not_empty(tables: &GrammarTables, result: &mut ValidationResult) {
        if tables.precedence.is_empty() {
            result.report_error("grammar defines no precedence groups");
        }
        if tables.infix.is_empty() {
            result.report_error("grammar defines no infix symbols");
        }
    }

    /// Symbols are matched verbatim, so they must be non-empty and contain no whitespace.
    pub fn check_symbol_shape(tables: &GrammarTables, result: &mut ValidationResult) {
        let all = tables
            .infix
            .iter()
            .chain(&tables.unary)
            .chain(&tables.reserved)
            .chain(tables.precedence.iter().flat_map(|g| &g.symbols));
        for symbol in all {
            if symbol.is_empty() {
                result.report_error("grammar contains an empty symbol");
            } else if symbol.chars().any(char::is_whitespace) {
                result.report_error(format!("symbol '{}' contains whitespace", symbol));
            }
        }
    }

    /// A candidate listed after one of its own prefixes can never match.
    pub fn check_shadowed_candidates(list: &str, candidates: &[String], result: &mut ValidationResult) {
        for (i, earlier) in candidates.iter().enumerate() {
            for later in &candidates[i + 1..] {
                if later == earlier {
                    result.report_error(format!("{} symbol '{}' is listed twice", list, later));
                } else if shadows(earlier, later) {
                    result.report_error(format!(
                        "{} symbol '{}' is unreachable: '{}' is listed first and matches its prefix",
                        list, later, earlier
                    ));
                }
            }
        }
    }

    /// Every infix symbol belongs to exactly one group.
    pub fn check_group_membership(tables: &GrammarTables, result: &mut ValidationResult) {
        let mut owner: HashMap<&str, usize> = HashMap::new();
        for (level, group) in tables.precedence.iter().enumerate() {
            if group.symbols.is_empty() {
                result.report_warning(format!("precedence group {} is empty", level));
            }
            for symbol in &group.symbols {
                if let Some(previous) = owner.insert(symbol.as_str(), level) {
                    result.report_error(format!(
                        "symbol '{}' appears in precedence groups {} and {}",
                        symbol, previous, level
                    ));
                }
                if !tables.is_infix(symbol) {
                    result.report_warning(format!(
                        "symbol '{}' has a precedence but is not an infix symbol",
                        symbol
                    ));
                }
            }
        }
        for symbol in &tables.infix {
            if !owner.contains_key(symbol.as_str()) {
                result.report_error(format!("infix symbol '{}' has no precedence group", symbol));
            }
        }
    }

    pub fn check_reserved_overlap(tables: &GrammarTables, result: &mut ValidationResult) {
        for reserved in &tables.reserved {
            for symbol in &tables.infix {
                if shadows(reserved, symbol) || reserved == symbol {
                    result.report_warning(format!(
                        "infix symbol '{}' can never match: reserved token '{}' covers it",
                        symbol, reserved
                    ));
                }
            }
        }
    }

    pub fn check_unary_binding(tables: &GrammarTables, result: &mut ValidationResult) {
        if tables.unary_binding > tables.precedence.len() {
            result.report_error(format!(
                "unary binding level {} is outside the {} precedence groups",
                tables.unary_binding,
                tables.precedence.len()
            ));
        }
    }
}

/// Whether `earlier`, tried first, would match wherever `later` does.
fn shadows(earlier: &str, later: &str) -> bool {
    if earlier.is_empty() || !later.starts_with(earlier) || earlier == later {
        return false;
    }
    let earlier_is_word = earlier.chars().last().is_some_and(is_word_char);
    let next_is_space = later[earlier.len()..].chars().next().is_some_and(char::is_whitespace);
    !earlier_is_word || next_is_space
}
