use crate::expr::{combine, Expr, Symbol};
use rug::Rational;
use std::collections::HashSet;

/// A multiset of operands that have not been combined yet.
///
/// The operands are kept sorted, so two states holding the same operands in a different order
/// are equal and hash the same.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct State {
    operands: Vec<Expr>,
}

impl State {
    /// Creates a new state from the given operands.
    pub(crate) fn new(mut operands: Vec<Expr>) -> Self {
        operands.sort();
        Self { operands }
    }

    /// Returns true if the state can still be reduced, i.e. it holds more than one operand.
    pub(crate) fn is_reducible(&self) -> bool {
        self.operands.len() > 1
    }

    /// Returns the operand of a terminal state.
    pub(crate) fn into_single(mut self) -> Option<Expr> {
        if self.operands.len() == 1 {
            self.operands.pop()
        } else {
            None
        }
    }

    /// Returns every state reachable by combining one pair of operands with one symbol.
    ///
    /// Each pair of operands is only tried once, even if the same pair of values occurs at
    /// different positions. For one pair, a symbol whose result has the same value as the result
    /// of an earlier symbol is skipped. The returned states may still contain duplicates.
    pub(crate) fn children(&self) -> Vec<State> {
        let mut children = Vec::new();
        let mut pairs = HashSet::new();

        for i in 0..self.operands.len() {
            for j in i + 1..self.operands.len() {
                let (x, y) = (&self.operands[i], &self.operands[j]);
                if !pairs.insert((x, y)) {
                    continue;
                }

                let rest = self.operands
                    .iter()
                    .enumerate()
                    .filter(|&(k, _)| k != i && k != j)
                    .map(|(_, expr)| expr.clone())
                    .collect::<Vec<_>>();

                let mut values: Vec<Rational> = Vec::with_capacity(Symbol::ALL.len());
                for symbol in Symbol::ALL {
                    let Some(expr) = combine(x.clone(), symbol, y.clone()) else {
                        continue;
                    };
                    let Some(value) = expr.value().cloned() else {
                        continue;
                    };
                    if values.contains(&value) {
                        continue;
                    }
                    values.push(value);

                    let mut operands = rest.clone();
                    operands.push(expr);
                    children.push(State::new(operands));
                }
            }
        }

        children
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn state(values: &[u64]) -> State {
        State::new(values.iter().map(|&v| Expr::number(v)).collect())
    }

    #[test]
    fn order_does_not_matter() {
        assert_eq!(state(&[8, 3, 8, 3]), state(&[3, 3, 8, 8]));
    }

    #[test]
    fn equal_values_are_paired_once() {
        // only one distinct pair (4, 4): 4 + 4, 4 - 4, 4 × 4, 4 ÷ 4; 4 ÷ 4 reversed repeats
        assert_eq!(state(&[4, 4]).children().len(), 4);

        // (3, 5) has five distinct results
        assert_eq!(state(&[3, 5]).children().len(), 5);
    }

    #[test]
    fn repeated_values_do_not_repeat_pairs() {
        // pairs: (1, 1), (1, 2); positions (0, 2) and (1, 2) are the same pair
        let children = state(&[1, 1, 2]).children();
        // (1, 1): 2, 0, 1 (1 × 1 and 1 ÷ 1 share the value), (1, 2): 3, 1, 2, 1/2
        assert_eq!(children.len(), 7);
        assert!(children.iter().all(|child| child.operands.len() == 2));
    }

    #[test]
    fn terminal_state() {
        assert!(!state(&[24]).is_reducible());
        assert_eq!(state(&[24]).into_single(), Some(Expr::number(24)));
        assert_eq!(state(&[2, 12]).into_single(), None);
    }
}
