//! Exhaustive search for the expressions that combine a hand of numbers into a target.
//!
//! The search works on [`State`]s, multisets of operands that have not been combined yet. Every
//! round replaces each state with all of the states reachable by combining one pair of its
//! operands, until every state holds a single expression. Because expressions and states are
//! compared in canonical form, duplicate states produced within a round are dropped, which keeps
//! the search small for the usual hand of four to six numbers.

mod state;

use crate::{expr::Expr, primitive::rational};
use log::{debug, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use state::State;
use std::collections::HashSet;

/// The target of the classic game.
pub const DEFAULT_TARGET: i64 = 24;

/// Returns every expression that uses each of the given values exactly once and evaluates to
/// `target`.
///
/// Expressions that only differ by the order of commutative operands or by the grouping of
/// associative ones are reported once. The order of the returned expressions is deterministic.
/// If there is no solution, or `values` is empty, the returned collection is empty.
pub fn solve(values: &[u64], target: i64) -> Vec<Expr> {
    if values.is_empty() {
        warn!("asked to reach {} without any values", target);
        return Vec::new();
    }

    let mut states = vec![State::new(values.iter().map(|&value| Expr::number(value)).collect())];
    let mut round = 0;
    while states.first().is_some_and(State::is_reducible) {
        round += 1;
        states = next_round(&states);
        debug!("round {}: {} distinct states", round, states.len());
    }

    let target = rational(target);
    let mut seen = HashSet::new();
    let answers = states
        .into_iter()
        .filter_map(State::into_single)
        .filter(|expr| expr.value() == Some(&target))
        .filter(|expr| seen.insert(expr.clone()))
        .collect::<Vec<_>>();

    debug!("{:?} -> {}: {} solution(s)", values, target, answers.len());
    answers
}

/// Expands every state by one step, dropping duplicate children while keeping the order in which
/// they were first produced.
fn next_round(states: &[State]) -> Vec<State> {
    let mut seen = HashSet::new();

    #[cfg(feature = "parallel")]
    let children = states
        .par_iter()
        .map(State::children)
        .collect::<Vec<_>>()
        .into_iter()
        .flatten();
    #[cfg(not(feature = "parallel"))]
    let children = states.iter().flat_map(State::children);

    children
        .filter(|state| seen.insert(state.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::expr::{combine, Symbol};
    use super::*;

    /// Solves for the default target and returns the printed solutions.
    fn solutions(values: &[u64]) -> Vec<String> {
        solve(values, DEFAULT_TARGET).iter().map(Expr::to_string).collect()
    }

    #[test]
    fn deterministic() {
        let values = [1, 2, 3, 4];
        assert_eq!(solve(&values, 24), solve(&values, 24));
    }

    #[test]
    fn commutative_duplicates_removed() {
        let answers = solve(&[3, 5], 8);
        let expected = combine(Expr::number(5), Symbol::Add, Expr::number(3)).unwrap();
        assert_eq!(answers, vec![expected]);
        assert_eq!(answers[0].to_string(), "3 + 5");
    }

    #[test]
    fn four_fours() {
        let answers = solutions(&[4, 4, 4, 4]);
        assert!(answers.contains(&String::from("4 + 4 + 4 × 4")), "{:?}", answers);
    }

    #[test]
    fn exact_fractions() {
        let answers = solutions(&[3, 3, 8, 8]);
        assert!(answers.contains(&String::from("8 ÷ (3 - 8 ÷ 3)")), "{:?}", answers);

        let answers = solutions(&[1, 5, 5, 5]);
        assert!(answers.contains(&String::from("5 × (5 - 1 ÷ 5)")), "{:?}", answers);
    }

    #[test]
    fn classic_hand() {
        let answers = solutions(&[4, 4, 10, 10]);
        assert_eq!(answers, vec![String::from("(10 × 10 - 4) ÷ 4")]);
    }

    #[test]
    fn no_solution() {
        assert!(solve(&[1, 1, 1, 1], 24).is_empty());
    }

    /// Expands the hand for the given number of rounds.
    fn rounds(values: &[u64], n: usize) -> Vec<State> {
        let mut states = vec![State::new(values.iter().map(|&value| Expr::number(value)).collect())];
        for _ in 0..n {
            states = next_round(&states);
        }
        states
    }

    #[test]
    fn round_drops_duplicate_states() {
        for hand in [[4, 4, 4, 4], [1, 2, 3, 4]] {
            let first = rounds(&hand, 1);
            let unpruned = first.iter().map(|state| state.children().len()).sum::<usize>();

            // combining two disjoint pairs reaches the same state in either order
            let second = next_round(&first);
            assert!(second.len() < unpruned, "{} >= {}", second.len(), unpruned);

            let unique = second.iter().collect::<HashSet<_>>();
            assert_eq!(unique.len(), second.len());
        }
    }

    #[test]
    fn round_keeps_first_produced_order() {
        let first = rounds(&[1, 2, 3, 4], 1);
        let second = next_round(&first);
        assert_eq!(second[0], first[0].children()[0]);
    }

    #[test]
    fn no_duplicate_answers() {
        let answers = solve(&[6, 6, 6, 6], 24);
        let unique = answers.iter().collect::<HashSet<_>>();
        assert!(!answers.is_empty());
        assert_eq!(unique.len(), answers.len());
    }

    #[test]
    fn every_answer_reaches_target() {
        let target = rational(24);
        for answer in solve(&[2, 3, 5, 12], 24) {
            assert_eq!(answer.value(), Some(&target));
        }
    }

    #[test]
    fn leaves_match_input() {
        let values = [1, 3, 4, 6];
        let answers = solve(&values, 24);
        assert!(!answers.is_empty());
        for answer in answers {
            assert!(answer.uses_exactly(&values), "{}", answer);
        }
    }

    #[test]
    fn single_value() {
        assert_eq!(solve(&[24], 24), vec![Expr::number(24)]);
        assert!(solve(&[23], 24).is_empty());
    }

    #[test]
    fn empty_input() {
        assert!(solve(&[], 24).is_empty());
    }

    #[test]
    fn other_targets() {
        assert_eq!(solutions(&[]), Vec::<String>::new());
        let answers = solve(&[2, 5], 10).iter().map(Expr::to_string).collect::<Vec<_>>();
        assert_eq!(answers, vec![String::from("2 × 5")]);
    }
}
