//! Stop ordering as an annealing problem.

use rand::seq::index;
use rand::Rng;

use crate::evaluation::{Evaluation, RouteEvaluator};
use crate::sa::SaProblem;

/// Permutations of stop indices, scored by the route evaluator.
///
/// A solution is a permutation of `0..loads.len()`; `loads[i]` is the
/// number of employees waiting at stop `i`. The only move is a random
/// transposition of two distinct positions.
#[derive(Debug, Clone)]
pub struct RouteProblem {
    loads: Vec<u32>,
    start: Vec<usize>,
    evaluator: RouteEvaluator,
}

impl RouteProblem {
    /// Creates a problem whose starting route visits the stops in index order.
    pub fn new(loads: Vec<u32>, evaluator: RouteEvaluator) -> Self {
        let start = (0..loads.len()).collect();
        Self {
            loads,
            start,
            evaluator,
        }
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.loads.len()
    }

    /// Returns `true` if there are no stops.
    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// Full evaluation (cost and bus count) of a permutation.
    pub fn evaluate(&self, order: &[usize]) -> Evaluation {
        self.evaluator
            .evaluate_loads(order.iter().map(|&i| self.loads[i]))
    }
}

impl SaProblem for RouteProblem {
    type Solution = Vec<usize>;

    fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Vec<usize> {
        self.start.clone()
    }

    fn cost(&self, order: &Vec<usize>) -> f64 {
        self.evaluate(order).cost
    }

    fn neighbor<R: Rng>(&self, order: &Vec<usize>, rng: &mut R) -> Vec<usize> {
        let mut next = order.clone();
        let picked = index::sample(rng, next.len(), 2);
        next.swap(picked.index(0), picked.index(1));
        next
    }

    fn has_neighbors(&self, order: &Vec<usize>) -> bool {
        order.len() > 1
    }
}
