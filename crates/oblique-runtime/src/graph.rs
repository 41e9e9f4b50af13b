//! A dependency-gated task graph executed on the `rayon` pool.
//!
//! Tasks are added with an explicit list of predecessor handles; a task
//! becomes runnable when its last predecessor finishes. Because a task can
//! only name handles that already exist, the graph is acyclic by
//! construction. Execution uses no locks: each task carries an atomic
//! count of unfinished predecessors, and the worker that completes the
//! final predecessor spawns the task. The release/acquire edge on that
//! counter is what publishes a predecessor's writes to its successors.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Handle to a task added to a [`TaskGraph`].
///
/// Returned by [`TaskGraph::add_task`] and passed back as a predecessor
/// for later tasks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaskId(usize);

struct Node<'env> {
    body: Box<dyn Fn() + Send + Sync + 'env>,
    pending: AtomicUsize,
    successors: Vec<usize>,
}

/// A build-then-run graph of dependent tasks.
///
/// # Examples
///
/// ```
/// use oblique_runtime::TaskGraph;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let counter = AtomicUsize::new(0);
/// let mut graph = TaskGraph::new();
/// let first = graph.add_task(&[], || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
/// graph.add_task(&[first], || {
///     // runs strictly after `first`
///     assert_eq!(counter.load(Ordering::SeqCst), 1);
/// });
/// graph.run();
/// ```
///
/// # Failure channel
///
/// A panicking task body propagates out of [`run`](TaskGraph::run) once
/// the already-running tasks have finished; tasks gated on the panicked
/// one are never started.
#[derive(Default)]
pub struct TaskGraph<'env> {
    nodes: Vec<Node<'env>>,
}

impl<'env> TaskGraph<'env> {
    /// An empty graph.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Number of tasks added so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no tasks have been added.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a task gated on the given predecessors.
    ///
    /// Duplicate predecessors are permitted and counted consistently.
    pub fn add_task(
        &mut self,
        deps: &[TaskId],
        body: impl Fn() + Send + Sync + 'env,
    ) -> TaskId {
        let id = self.nodes.len();
        for dep in deps {
            debug_assert!(dep.0 < id, "predecessor handle from a different graph");
            self.nodes[dep.0].successors.push(id);
        }
        self.nodes.push(Node {
            body: Box::new(body),
            pending: AtomicUsize::new(deps.len()),
            successors: Vec::new(),
        });
        TaskId(id)
    }

    /// Execute the whole graph, returning when every task has finished.
    ///
    /// Tasks whose predecessor sets are complete run concurrently, up to
    /// the pool's parallelism.
    pub fn run(self) {
        let nodes = &self.nodes;
        rayon::scope(|scope| {
            for (id, node) in nodes.iter().enumerate() {
                if node.pending.load(Ordering::Acquire) == 0 {
                    spawn_node(scope, nodes, id);
                }
            }
        });
    }
}

fn spawn_node<'scope, 'env>(
    scope: &rayon::Scope<'scope>,
    nodes: &'scope [Node<'env>],
    id: usize,
) {
    scope.spawn(move |scope| {
        let node = &nodes[id];
        (node.body)();
        for &succ in &node.successors {
            if nodes[succ].pending.fetch_sub(1, Ordering::AcqRel) == 1 {
                spawn_node(scope, nodes, succ);
            }
        }
    });
}
