// Randomized precedence checks against a shunting-yard reference parser.
//
// Chains are generated from a fixed seed so failures are reproducible.

use quill::syntax::{Associativity, GrammarTables};
use quill::{parse_with, ParserConfig};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

const SEED: u64 = 0x5eed_0f_9a11;
const CASES: usize = 400;
const MAX_OPERATORS: usize = 24;

/// One generated input: leaves in source order, each with its unary prefixes,
/// and the infix operators between them.
struct Chain {
    leaves: Vec<(Vec<String>, String)>,
    operators: Vec<String>,
}

impl Chain {
    fn random(rng: &mut Xoshiro256StarStar, grammar: &GrammarTables, with_unary: bool) -> Self {
        let operator_count = rng.gen_range(1..=MAX_OPERATORS);
        let leaves = (0..=operator_count)
            .map(|i| {
                let prefixes: Vec<String> = if with_unary && rng.gen_bool(0.3) {
                    (0..rng.gen_range(1..=2))
                        .filter_map(|_| grammar.unary.choose(rng).cloned())
                        .collect()
                } else {
                    Vec::new()
                };
                (prefixes, format!("v{i}"))
            })
            .collect();
        let operators = (0..operator_count)
            .filter_map(|_| grammar.infix.choose(rng).cloned())
            .collect();
        Chain { leaves, operators }
    }

    fn source(&self) -> String {
        let mut parts = Vec::new();
        for (i, (prefixes, name)) in self.leaves.iter().enumerate() {
            if i > 0 {
                parts.push(self.operators[i - 1].clone());
            }
            parts.extend(prefixes.iter().cloned());
            parts.push(name.clone());
        }
        parts.join(" ")
    }

    fn leaf_names(&self) -> Vec<String> {
        self.leaves.iter().map(|(_, name)| name.clone()).collect()
    }
}

enum Pending<'a> {
    Binary(&'a str, usize),
    Unary(&'a str),
}

fn reduce(output: &mut Vec<String>, pending: Pending<'_>) {
    match pending {
        Pending::Binary(op, _) => {
            let right = output.pop().expect("right operand");
            let left = output.pop().expect("left operand");
            output.push(format!("({op} {left} {right})"));
        }
        Pending::Unary(op) => {
            let operand = output.pop().expect("unary operand");
            output.push(format!("({op} {operand})"));
        }
    }
}

/// Classic operator-precedence parse of a generated chain.
fn reference_tree(chain: &Chain, grammar: &GrammarTables) -> String {
    let mut output: Vec<String> = Vec::new();
    let mut stack: Vec<Pending<'_>> = Vec::new();

    for (i, (prefixes, name)) in chain.leaves.iter().enumerate() {
        if i > 0 {
            let op = chain.operators[i - 1].as_str();
            let level = grammar.precedence_of(op).expect("grouped operator");
            while let Some(top) = stack.last() {
                let pops = match top {
                    Pending::Unary(_) => grammar.unary_binding > level,
                    Pending::Binary(_, top_level) => {
                        *top_level > level
                            || (*top_level == level
                                && grammar.associativity_at(level) == Associativity::Left)
                    }
                };
                if !pops {
                    break;
                }
                let top = stack.pop().expect("non-empty stack");
                reduce(&mut output, top);
            }
            stack.push(Pending::Binary(op, level));
        }
        stack.extend(prefixes.iter().map(|p| Pending::Unary(p.as_str())));
        output.push(name.clone());
    }
    while let Some(top) = stack.pop() {
        reduce(&mut output, top);
    }
    output.pop().expect("one tree")
}

fn check_random_chains(grammar: GrammarTables, with_unary: bool, seed: u64) {
    let config = ParserConfig {
        grammar,
        ..ParserConfig::default()
    };
    let grammar = &config.grammar;
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);

    for case in 0..CASES {
        let chain = Chain::random(&mut rng, grammar, with_unary);
        let source = chain.source();
        let tree = parse_with(&source, &config, "generated")
            .unwrap_or_else(|e| panic!("case {case}: {source:?} failed: {e}"));

        assert_eq!(
            tree.value.pretty(),
            reference_tree(&chain, grammar),
            "case {case}: {source:?}"
        );

        let leaves: Vec<String> = tree.leaves().iter().map(|l| l.value.pretty()).collect();
        assert_eq!(leaves, chain.leaf_names(), "case {case}: {source:?}");
    }
}

#[test]
fn test_binary_chains_match_reference() {
    check_random_chains(GrammarTables::default(), false, SEED);
}

#[test]
fn test_chains_with_unary_prefixes_match_reference() {
    check_random_chains(GrammarTables::default(), true, SEED ^ 0xffff);
}

#[test]
fn test_right_associative_groups_match_reference() {
    let grammar = GrammarTables::default()
        .with_associativity(4, Associativity::Right)
        .with_associativity(6, Associativity::Right);
    check_random_chains(grammar, true, SEED.rotate_left(7));
}

#[test]
fn test_same_precedence_chain_keeps_token_order() {
    let config = ParserConfig::default();
    let names: Vec<String> = (0..60).map(|i| format!("n{i}")).collect();
    let source = names.join(" - ");
    let tree = parse_with(&source, &config, "chain").unwrap();

    let leaves: Vec<String> = tree.leaves().iter().map(|l| l.value.pretty()).collect();
    assert_eq!(leaves, names);

    // fully left-nested: the right operand of every level is a leaf
    let mut node = &tree;
    while let Some((op, 2)) = node.operator() {
        assert_eq!(op, "-");
        let quill::Expr::Operation { operands, .. } = &node.value else {
            unreachable!()
        };
        assert!(operands[1].operator().is_none());
        node = &operands[0];
    }
}
