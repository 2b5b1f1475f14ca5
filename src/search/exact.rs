//! Exact backward-induction solver for general-sum two-party games.
//!
//! Every state is expanded down to its terminal leaves; there is no depth
//! limit and no pruning. Each party tracks its own utility, so the solver
//! also handles games whose payoffs are not linked by a zero-sum
//! constraint.
//!
//! # Tie-break
//!
//! At every ply the mover picks the child with the highest value for
//! itself. Among children that tie on the mover's value it prefers the one
//! that is best for the other party ("cooperate on ties"). For zero-sum
//! games both values are linked and this reduces to plain minimax.

use std::time::Instant;

use crate::search::config::{Decision, SearchConfig, SearchError, SearchStats};
use crate::search::game::{Game, GameError, Player, Utilities};
use crate::search::ordering::ActionOrdering;

/// Full-depth backward-induction solver.
///
/// # Example
/// ```
/// use game_search::games::nim::Nim;
/// use game_search::search::{ExactSolver, Game, SearchConfig};
///
/// let game = Nim::new(7);
/// let mut solver = ExactSolver::new(game.clone(), SearchConfig::deterministic());
/// let decision = solver.solve(&game.initial_state()).unwrap();
/// assert_eq!(decision.action.amount(), 3); // leave a multiple of four
/// ```
pub struct ExactSolver<G: Game> {
    /// The game being solved.
    game: G,

    /// Configuration for the solver.
    config: SearchConfig,

    /// Root action ordering.
    ordering: ActionOrdering,

    /// Node counter for the solve in progress.
    nodes: u64,

    /// Statistics of the last solve.
    stats: SearchStats,
}

impl<G: Game> ExactSolver<G> {
    /// Create a new exact solver for the given game.
    pub fn new(game: G, config: SearchConfig) -> Self {
        let ordering = ActionOrdering::from_config(&config);
        Self {
            game,
            config,
            ordering,
            nodes: 0,
            stats: SearchStats::new(),
        }
    }

    /// Pick an optimal action for the mover of `state`.
    ///
    /// Root actions are reordered by the configured [`ActionOrdering`]
    /// first; after that the scan is deterministic and the first action
    /// seen wins a complete tie.
    pub fn solve(
        &mut self,
        state: &G::State,
    ) -> Result<Decision<G::Action, Utilities>, SearchError> {
        if self.game.is_terminal(state) {
            return Err(SearchError::Precondition("solve requested on a terminal state"));
        }

        let start = Instant::now();
        self.nodes = 0;

        let mover = self.game.mover(state);
        let mut actions = self.game.legal_actions(state)?;
        self.ordering.order(&mut actions);

        let (best, value) = self.best_child(state, mover, &actions)?;

        self.stats = SearchStats {
            nodes_expanded: self.nodes,
            elapsed_seconds: start.elapsed().as_secs_f64(),
        };
        log::debug!(
            "exact solve: {} chose {} with value {} ({} nodes)",
            mover,
            self.game.action_name(&actions[best]),
            value,
            self.nodes
        );

        Ok(Decision {
            action: actions.swap_remove(best),
            value,
            stats: self.stats,
        })
    }

    /// Utilities reached from `state` when both parties follow the
    /// tie-break policy at every ply.
    pub fn value(&mut self, state: &G::State) -> Result<Utilities, SearchError> {
        if self.game.is_terminal(state) {
            return Ok(self.game.payoffs(state));
        }
        Ok(self.solve(state)?.value)
    }

    /// Whether `candidate` should replace `best` for `mover`.
    pub fn prefers(mover: Player, candidate: &Utilities, best: &Utilities) -> bool {
        let own = candidate[mover] - best[mover];
        own > 0.0 || (own == 0.0 && candidate[mover.other()] > best[mover.other()])
    }

    /// Index and value of the preferred child among `actions`.
    fn best_child(
        &mut self,
        state: &G::State,
        mover: Player,
        actions: &[G::Action],
    ) -> Result<(usize, Utilities), GameError> {
        let mut best: Option<(usize, Utilities)> = None;

        for (i, action) in actions.iter().enumerate() {
            let child = self.game.transition(state, action);
            let value = self.expand(&child)?;

            let replace = match &best {
                None => true,
                Some((_, current)) => Self::prefers(mover, &value, current),
            };
            if replace {
                best = Some((i, value));
            }
        }

        best.ok_or_else(|| GameError::InvalidState(self.game.state_description(state)))
    }

    /// Recursive value of a state below the root.
    fn expand(&mut self, state: &G::State) -> Result<Utilities, GameError> {
        self.nodes += 1;

        if self.game.is_terminal(state) {
            return Ok(self.game.payoffs(state));
        }

        let actions = self.game.available_actions(state);
        let mover = self.game.mover(state);
        let (_, value) = self.best_child(state, mover, &actions)?;
        Ok(value)
    }

    /// Statistics of the last solve.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get reference to the game.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::nim::{Nim, Take};

    /// Explicit game tree for checking the tie-break rule.
    #[derive(Debug, Clone)]
    enum Node {
        Leaf(f64, f64),
        Branch(Vec<Node>),
    }

    #[derive(Debug, Clone)]
    struct TreeState {
        node: Node,
        mover: Player,
    }

    crate::impl_game_state!(TreeState);

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct Child(usize);

    crate::impl_action!(Child);

    #[derive(Debug, Clone)]
    struct TreeGame(Node);

    impl Game for TreeGame {
        type State = TreeState;
        type Action = Child;

        fn initial_state(&self) -> TreeState {
            TreeState {
                node: self.0.clone(),
                mover: Player::First,
            }
        }

        fn mover(&self, state: &TreeState) -> Player {
            state.mover
        }

        fn is_terminal(&self, state: &TreeState) -> bool {
            matches!(state.node, Node::Leaf(..))
        }

        fn available_actions(&self, state: &TreeState) -> Vec<Child> {
            match &state.node {
                Node::Leaf(..) => vec![],
                Node::Branch(children) => (0..children.len()).map(Child).collect(),
            }
        }

        fn transition(&self, state: &TreeState, action: &Child) -> TreeState {
            match &state.node {
                Node::Branch(children) => TreeState {
                    node: children[action.0].clone(),
                    mover: state.mover.other(),
                },
                Node::Leaf(..) => state.clone(),
            }
        }

        fn payoffs(&self, state: &TreeState) -> Utilities {
            match state.node {
                Node::Leaf(a, b) => Utilities::new(a, b),
                Node::Branch(_) => Utilities::draw(),
            }
        }
    }

    #[test]
    fn test_tie_prefers_other_party() {
        let game = TreeGame(Node::Branch(vec![
            Node::Leaf(1.0, 0.0),
            Node::Leaf(1.0, 5.0),
            Node::Leaf(0.0, 9.0),
        ]));
        let mut solver = ExactSolver::new(game.clone(), SearchConfig::deterministic());
        let decision = solver.solve(&game.initial_state()).unwrap();

        assert_eq!(decision.action, Child(1));
        assert_eq!(decision.value, Utilities::new(1.0, 5.0));
        assert_eq!(decision.stats.nodes_expanded, 3);
    }

    #[test]
    fn test_tie_break_applies_below_root() {
        // Second party is indifferent between its leaves and picks the one
        // better for the first party, which makes the left branch worth 4.
        let game = TreeGame(Node::Branch(vec![
            Node::Branch(vec![Node::Leaf(0.0, 2.0), Node::Leaf(4.0, 2.0)]),
            Node::Branch(vec![Node::Leaf(3.0, 1.0), Node::Leaf(1.0, 0.0)]),
        ]));
        let mut solver = ExactSolver::new(game.clone(), SearchConfig::seeded(3));
        let decision = solver.solve(&game.initial_state()).unwrap();

        assert_eq!(decision.action, Child(0));
        assert_eq!(decision.value, Utilities::new(4.0, 2.0));
    }

    #[test]
    fn test_value_does_not_depend_on_order() {
        let game = Nim::new(11);
        let state = game.initial_state();
        let expected = ExactSolver::new(game.clone(), SearchConfig::deterministic())
            .value(&state)
            .unwrap();

        for seed in 0..8 {
            let mut solver = ExactSolver::new(game.clone(), SearchConfig::seeded(seed));
            assert_eq!(solver.value(&state).unwrap(), expected);
        }
    }

    #[test]
    fn test_nim_winning_iff_not_multiple_of_four() {
        for count in 1..=16 {
            let game = Nim::new(count);
            let state = game.initial_state();
            let mut solver = ExactSolver::new(game.clone(), SearchConfig::seeded(count as u64));
            let decision = solver.solve(&state).unwrap();

            if count % 4 != 0 {
                assert_eq!(decision.value[Player::First], 1.0, "count {}", count);
                assert_eq!((count - decision.action.amount()) % 4, 0);
            } else {
                for action in game.legal_actions(&state).unwrap() {
                    let child = game.apply(&state, &action).unwrap();
                    let value = solver.value(&child).unwrap();
                    assert_eq!(value[Player::First], -1.0, "count {} take {:?}", count, action);
                }
            }
        }
    }

    #[test]
    fn test_nim_optimal_self_play_matches_value() {
        for count in 1..=12 {
            let game = Nim::new(count);
            let mut solver = ExactSolver::new(game.clone(), SearchConfig::deterministic());
            let mut state = game.initial_state();
            let expected = solver.value(&state).unwrap();

            while !game.is_terminal(&state) {
                let decision = solver.solve(&state).unwrap();
                state = game.apply(&state, &decision.action).unwrap();
            }
            assert_eq!(game.utilities(&state).unwrap(), expected);
        }
    }

    #[test]
    fn test_solve_on_terminal_state_fails() {
        let game = Nim::new(2);
        let state = game.apply(&game.initial_state(), &Take::new(2)).unwrap();
        let mut solver = ExactSolver::new(game, SearchConfig::default());

        assert!(matches!(
            solver.solve(&state),
            Err(SearchError::Precondition(_))
        ));
    }
}
