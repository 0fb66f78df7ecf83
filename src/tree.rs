//! Search tree with arena allocation.
//!
//! Nodes live in a contiguous Vec and refer to each other by `NodeId`. A
//! node's parent is stored as an index, so the tree has no owning cycles and
//! backpropagation is a plain walk up the parent indices.

use crate::{GameState, Outcome};
use log::trace;
use rand::Rng;

/// Index of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// One ply of hypothetical play.
pub struct SearchNode<S: GameState> {
    state: S,
    mover: Option<S::Player>,
    mv: Option<S::Move>,
    untried_moves: Vec<S::Move>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    visits: u32,
    wins: u32,
    outcome: Option<Outcome<S::Player>>,
    is_terminal: bool,
}

impl<S: GameState> SearchNode<S> {
    fn new_root(state: S) -> Self {
        let untried_moves = state.get_possible_moves();
        SearchNode {
            state,
            mover: None,
            mv: None,
            untried_moves,
            children: Vec::new(),
            parent: None,
            visits: 0,
            wins: 0,
            outcome: None,
            is_terminal: false,
        }
    }

    fn new_child(state: S, parent: NodeId, mv: S::Move, mover: S::Player) -> Self {
        let outcome = state.get_outcome();
        let untried_moves = state.get_possible_moves();
        SearchNode {
            state,
            mover: Some(mover),
            mv: Some(mv),
            untried_moves,
            children: Vec::new(),
            parent: Some(parent),
            visits: 0,
            wins: 0,
            outcome,
            is_terminal: outcome.is_some(),
        }
    }

    /// Position after this node's move.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Colour that placed the stone leading here; `None` for the root.
    pub fn mover(&self) -> Option<S::Player> {
        self.mover
    }

    /// Move that created this node; `None` for the root.
    pub fn mv(&self) -> Option<S::Move> {
        self.mv
    }

    pub fn untried_moves(&self) -> &[S::Move] {
        &self.untried_moves
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn visits(&self) -> u32 {
        self.visits
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn outcome(&self) -> Option<Outcome<S::Player>> {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.untried_moves.is_empty()
    }
}

/// Search tree for a single decision.
pub struct SearchTree<S: GameState> {
    /// Arena storing all nodes
    nodes: Vec<SearchNode<S>>,

    /// Root node index (always 0)
    root: NodeId,

    /// Player the rollout rewards are credited to.
    perspective: S::Player,

    exploration_constant: f64,

    /// Completed rounds.
    rounds: u32,
}

impl<S: GameState> SearchTree<S> {
    /// Create a tree rooted at `root_state`, searching for the side to move.
    pub fn new(root_state: S, exploration_constant: f64) -> Self {
        let perspective = root_state.get_current_player();
        Self {
            nodes: vec![SearchNode::new_root(root_state)],
            root: NodeId(0),
            perspective,
            exploration_constant,
            rounds: 0,
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode<S> {
        &self.nodes[id.0]
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<S> {
        &mut self.nodes[id.0]
    }

    /// Total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true after construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn nodes(&self) -> &[SearchNode<S>] {
        &self.nodes
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn perspective(&self) -> S::Player {
        self.perspective
    }

    /// One full round: tree policy, rollout, backpropagation.
    pub fn run_round<R: Rng>(&mut self, rng: &mut R) {
        let leaf = self.tree_policy(rng);
        let reward = self.default_policy(leaf, rng);
        self.backpropagate(leaf, reward);
        self.rounds += 1;

        trace!(
            "round {} leaf={} terminal={} reward={}",
            self.rounds,
            leaf.0,
            self.get(leaf).is_terminal,
            reward
        );
    }

    /// Selection and expansion. Returns the leaf to simulate from.
    pub fn tree_policy<R: Rng>(&mut self, rng: &mut R) -> NodeId {
        let mut current = self.root;
        while !self.get(current).is_terminal {
            if !self.get(current).is_fully_expanded() {
                return self.expand(current, rng);
            }
            match self.best_child(current, rng) {
                Some(child) => current = child,
                None => break,
            }
        }
        current
    }

    /// Turn one uniformly chosen untried move of `node_id` into a child.
    ///
    /// Panics if the node is fully expanded.
    pub fn expand<R: Rng>(&mut self, node_id: NodeId, rng: &mut R) -> NodeId {
        let node = self.get_mut(node_id);
        let index = rng.random_range(0..node.untried_moves.len());
        let mv = node.untried_moves.swap_remove(index);

        let mover = node.state.get_current_player();
        let mut state = node.state.clone();
        state.make_move(&mv);

        let child_id = NodeId(self.nodes.len());
        self.nodes.push(SearchNode::new_child(state, node_id, mv, mover));
        self.get_mut(node_id).children.push(child_id);
        child_id
    }

    /// UCB score of `child` under a parent visited `parent_visits` times.
    pub fn ucb_score(&self, child: NodeId, parent_visits: u32) -> f64 {
        let node = self.get(child);
        if node.visits == 0 {
            return f64::INFINITY;
        }
        let n = node.visits as f64;
        node.wins as f64 / n
            + self.exploration_constant * (2.0 * (parent_visits as f64).ln() / n).sqrt()
    }

    /// Child with the highest UCB score strictly above zero. When no child
    /// clears zero, a child is drawn uniformly at random; `None` only if the
    /// node has no children.
    pub fn best_child<R: Rng>(&self, node_id: NodeId, rng: &mut R) -> Option<NodeId> {
        let node = self.get(node_id);
        let mut max_value = 0.0;
        let mut best = None;
        for &child in &node.children {
            let value = self.ucb_score(child, node.visits);
            if value > max_value {
                max_value = value;
                best = Some(child);
            }
        }

        best.or_else(|| {
            if node.children.is_empty() {
                None
            } else {
                Some(node.children[rng.random_range(0..node.children.len())])
            }
        })
    }

    /// Random playout from `leaf`. Returns 1 if the perspective player wins,
    /// 0 for a loss or a draw.
    pub fn default_policy<R: Rng>(&self, leaf: NodeId, rng: &mut R) -> u32 {
        let node = self.get(leaf);
        let outcome = match node.outcome {
            Some(outcome) => outcome,
            None => {
                let mut state = node.state.clone();
                loop {
                    if let Some(outcome) = state.get_outcome() {
                        break outcome;
                    }
                    let moves = state.get_possible_moves();
                    if moves.is_empty() {
                        break Outcome::Draw;
                    }
                    let mv = moves[rng.random_range(0..moves.len())];
                    state.make_move(&mv);
                }
            }
        };

        match outcome {
            Outcome::Win(winner) if winner == self.perspective => 1,
            _ => 0,
        }
    }

    /// Add one visit and `reward` wins to `leaf` and every ancestor.
    pub fn backpropagate(&mut self, leaf: NodeId, reward: u32) {
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.visits += 1;
            node.wins += reward;
            current = node.parent;
        }
    }

    /// Move of the root's best child by the selection comparison.
    pub fn best_move<R: Rng>(&self, rng: &mut R) -> Option<(S::Move, NodeId)> {
        let child = self.best_child(self.root, rng)?;
        self.get(child).mv.map(|mv| (mv, child))
    }

    /// Deepest ply below the root.
    pub fn max_depth(&self) -> usize {
        // Children are always allocated after their parent.
        let mut depth = vec![0usize; self.nodes.len()];
        for (i, node) in self.nodes.iter().enumerate() {
            if let Some(parent) = node.parent {
                depth[i] = depth[parent.0] + 1;
            }
        }
        depth.into_iter().max().unwrap_or(0)
    }
}
