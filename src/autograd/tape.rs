//! Tape arena: scalar nodes addressed by stable index, with backpropagation.

/// Handle to a scalar node on the [`Tape`].
///
/// Cheap to copy. A node is only ever built from handles that already exist,
/// so children always point at earlier tape entries and the graph is acyclic
/// by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Val(usize);

/// Internal scalar node: forward value, gradient, and graph edges for backprop.
struct Node {
    data: f64,
    grad: f64,
    children: Vec<Val>,
    local_grads: Vec<f64>, // d(self)/d(child) for each child
}

/// Arena holding the computation graph of one run.
///
/// Parameters are allocated first and persist for the run; the per-step graph
/// built on top of them is dropped with [`Tape::release`] once the optimizer
/// update for that step completes.
#[derive(Default)]
pub struct Tape {
    nodes: Vec<Node>,
}

impl Tape {
    /// Creates an empty tape.
    #[must_use]
    pub fn new() -> Self {
        Tape { nodes: Vec::new() }
    }

    /// Creates a leaf node (no children) with the given value and zero gradient.
    pub fn leaf(&mut self, data: f64) -> Val {
        self.push(data, Vec::new(), Vec::new())
    }

    /// Creates a node that remembers its `children` and `local_grads` for backprop.
    fn push(&mut self, data: f64, children: Vec<Val>, local_grads: Vec<f64>) -> Val {
        debug_assert_eq!(children.len(), local_grads.len());
        let id = self.nodes.len();
        self.nodes.push(Node {
            data,
            grad: 0.0,
            children,
            local_grads,
        });
        Val(id)
    }

    /// Forward pass value (scalar).
    #[must_use]
    pub fn data(&self, v: Val) -> f64 {
        self.nodes[v.0].data
    }

    /// Gradient of the loss with respect to `v`; set by [`Tape::backward`].
    #[must_use]
    pub fn grad(&self, v: Val) -> f64 {
        self.nodes[v.0].grad
    }

    /// Overwrites a node's value in place (optimizer updates).
    pub fn set_data(&mut self, v: Val, data: f64) {
        self.nodes[v.0].data = data;
    }

    /// Sets a node's gradient to 0 (e.g. after an optimizer step).
    pub fn zero_grad(&mut self, v: Val) {
        self.nodes[v.0].grad = 0.0;
    }

    /// Number of nodes currently on the tape.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no nodes have been allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Watermark for [`Tape::release`]: the current node count.
    #[must_use]
    pub fn mark(&self) -> usize {
        self.nodes.len()
    }

    /// Discards every node created after `mark`.
    ///
    /// Handles taken after the mark are invalidated; callers keep only
    /// parameter handles (allocated before the mark) across releases.
    pub fn release(&mut self, mark: usize) {
        self.nodes.truncate(mark);
    }

    /// Addition: `a + b`. Local grads are 1 and 1.
    pub fn add(&mut self, a: Val, b: Val) -> Val {
        let data = self.data(a) + self.data(b);
        self.push(data, vec![a, b], vec![1.0, 1.0])
    }

    /// Multiplication: `a * b`. Local grads are `b` and `a`.
    pub fn mul(&mut self, a: Val, b: Val) -> Val {
        let (da, db) = (self.data(a), self.data(b));
        self.push(da * db, vec![a, b], vec![db, da])
    }

    /// Power with a constant exponent: `a^exp`. Local grad is `exp * a^(exp-1)`.
    pub fn pow(&mut self, a: Val, exp: f64) -> Val {
        let da = self.data(a);
        let local_grad = exp * da.powf(exp - 1.0);
        self.push(da.powf(exp), vec![a], vec![local_grad])
    }

    /// Natural log. Local grad is `1/a`.
    ///
    /// Not guarded: a non-positive input propagates a non-finite value through
    /// forward and backward. Callers keep their own stability margins (e.g.
    /// the rmsnorm epsilon).
    pub fn log(&mut self, a: Val) -> Val {
        let da = self.data(a);
        self.push(da.ln(), vec![a], vec![1.0 / da])
    }

    /// Exponential. Local grad is `exp(a)`.
    pub fn exp(&mut self, a: Val) -> Val {
        let data = self.data(a).exp();
        self.push(data, vec![a], vec![data])
    }

    /// ReLU: `max(0, a)`. Local grad is 1 if `a > 0`, else 0.
    pub fn relu(&mut self, a: Val) -> Val {
        let da = self.data(a);
        let local_grad = if da > 0.0 { 1.0 } else { 0.0 };
        self.push(da.max(0.0), vec![a], vec![local_grad])
    }

    /// Negation: `-a`, via [`Tape::mul`] so the derivative rule has one source
    /// of truth.
    pub fn neg(&mut self, a: Val) -> Val {
        let neg_one = self.leaf(-1.0);
        self.mul(a, neg_one)
    }

    /// Subtraction: `a - b`, via add and neg.
    pub fn sub(&mut self, a: Val, b: Val) -> Val {
        let nb = self.neg(b);
        self.add(a, nb)
    }

    /// Division: `a / b`, via `a * b^(-1)`.
    pub fn div(&mut self, a: Val, b: Val) -> Val {
        let inv = self.pow(b, -1.0);
        self.mul(a, inv)
    }

    /// Runs backprop: topological sort, then chain rule from `root` (e.g. the
    /// loss) to all of its ancestors.
    ///
    /// The traversal is a post-order depth-first walk with an explicit stack
    /// (per-step graphs are deep enough to overflow the call stack). Because
    /// the order is post-order and processed in reverse, a node's gradient is
    /// fully accumulated over all of its parents before it propagates to its
    /// children — required for correctness whenever a node (a parameter, a
    /// cached key) has more than one parent.
    pub fn backward(&mut self, root: Val) {
        let mut topo: Vec<usize> = Vec::new();
        let mut visited = vec![false; self.nodes.len()];
        let mut stack: Vec<(usize, usize)> = vec![(root.0, 0)];
        visited[root.0] = true;

        while let Some(frame) = stack.last_mut() {
            let (id, child_idx) = *frame;
            if child_idx < self.nodes[id].children.len() {
                frame.1 += 1;
                let child = self.nodes[id].children[child_idx].0;
                if !visited[child] {
                    visited[child] = true;
                    stack.push((child, 0));
                }
            } else {
                topo.push(id);
                stack.pop();
            }
        }

        self.nodes[root.0].grad = 1.0;
        for &id in topo.iter().rev() {
            let grad = self.nodes[id].grad;
            for i in 0..self.nodes[id].children.len() {
                let child = self.nodes[id].children[i].0;
                let local_grad = self.nodes[id].local_grads[i];
                self.nodes[child].grad += local_grad * grad;
            }
        }
    }
}
