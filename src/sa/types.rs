//! Core trait and progress type for Simulated Annealing.

use rand::Rng;

/// Defines a Simulated Annealing problem.
///
/// The implementor supplies the starting point, neighbor generation, and
/// cost evaluation. The runner handles temperature, acceptance, and
/// cooling.
///
/// # Minimization
///
/// SA minimizes the cost function. For maximization, negate the cost.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_shuttle::sa::SaProblem;
///
/// struct SortProblem { start: Vec<usize> }
///
/// impl SaProblem for SortProblem {
///     type Solution = Vec<usize>;
///
///     fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Vec<usize> {
///         self.start.clone()
///     }
///
///     fn cost(&self, perm: &Vec<usize>) -> f64 {
///         perm.iter().enumerate().filter(|&(i, &v)| i != v).count() as f64
///     }
///
///     fn neighbor<R: Rng>(&self, perm: &Vec<usize>, rng: &mut R) -> Vec<usize> {
///         let mut next = perm.clone();
///         let i = rng.random_range(0..next.len());
///         let j = rng.random_range(0..next.len());
///         next.swap(i, j);
///         next
///     }
/// }
/// ```
///
/// # References
///
/// Kirkpatrick et al. (1983), Cerny (1985)
pub trait SaProblem: Send + Sync {
    /// The solution representation type.
    type Solution: Clone + Send;

    /// Creates the starting solution.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    /// Computes the cost of a solution. Lower is better.
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// Generates a neighbor of the current solution.
    fn neighbor<R: Rng>(&self, solution: &Self::Solution, rng: &mut R) -> Self::Solution;

    /// Returns `false` when no move can change `solution`, which ends the
    /// run immediately.
    fn has_neighbors(&self, _solution: &Self::Solution) -> bool {
        true
    }
}

/// Snapshot handed to the progress callback before each move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaProgress {
    /// Zero-based index of the move about to be attempted.
    pub iteration: usize,

    /// Move budget (0 when unlimited).
    pub max_iterations: usize,

    /// Current temperature.
    pub temperature: f64,

    /// Cost of the current solution.
    pub current_cost: f64,

    /// Best cost seen so far.
    pub best_cost: f64,
}

impl SaProgress {
    /// Completed fraction of the budget in `[0, 1]`, or `None` when unlimited.
    pub fn fraction(&self) -> Option<f64> {
        (self.max_iterations > 0).then(|| self.iteration as f64 / self.max_iterations as f64)
    }

    /// Human-readable status line.
    pub fn status(&self) -> String {
        if self.max_iterations > 0 {
            format!("Iteration {}/{}", self.iteration, self.max_iterations)
        } else {
            format!("Iteration {}", self.iteration)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_status() {
        let p = SaProgress {
            iteration: 250,
            max_iterations: 1000,
            temperature: 1.0,
            current_cost: 2.0,
            best_cost: 1.0,
        };
        assert_eq!(p.status(), "Iteration 250/1000");
        assert_eq!(p.fraction(), Some(0.25));

        let unbounded = SaProgress {
            max_iterations: 0,
            ..p
        };
        assert_eq!(unbounded.status(), "Iteration 250");
        assert!(unbounded.fraction().is_none());
    }
}
