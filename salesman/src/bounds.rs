//! Admissible lower bounds on the cost of completing a partial tour.

use crate::{
    graph::{Node, VertexSet},
    matrix::CostMatrix,
    mst::MstStrategy,
    Cost,
};

fn cheapest<I>(costs: I) -> Option<Cost>
where
    I: Iterator<Item = Option<Cost>>,
{
    costs.flatten().min()
}

/// Lower bound on the cost still to pay after `candidate` is appended to a path
/// of `path_len` vertices starting at `head`, counting the cheapest usable edge
/// into and out of every vertex that is not yet fixed.
///
/// `unvisited` are the vertices not on the path; it may or may not contain the
/// candidate. Returns zero if the candidate completes the path (the closing edge
/// is exact and paid by the caller) and [`Cost::max`] if some vertex has no
/// usable edge left.
pub fn lightest_edges_bound(
    matrix: &CostMatrix,
    head: Node,
    path_len: usize,
    unvisited: VertexSet,
    candidate: Node,
) -> Cost {
    if path_len + 1 >= matrix.n() {
        return Cost::new(0);
    }

    let tail = candidate;
    let members = unvisited.with(head).with(tail);
    let inner = members.without(head).without(tail);

    let doubled = || -> Option<Cost> {
        let tail_out = cheapest(inner.iter().map(|v| matrix.cost(tail, v)))?;
        let head_in = cheapest(inner.iter().map(|v| matrix.cost(v, head)))?;
        let mut sum = tail_out + head_in;

        for v in inner {
            // the tail already has its incoming edge and the head its outgoing one
            let out = cheapest(
                members
                    .without(v)
                    .without(tail)
                    .iter()
                    .map(|w| matrix.cost(v, w)),
            )?;
            let inc = cheapest(
                members
                    .without(v)
                    .without(head)
                    .iter()
                    .map(|w| matrix.cost(w, v)),
            )?;
            sum += out + inc;
        }
        Some(sum)
    };

    match doubled() {
        Some(sum) => sum / 2,
        None => Cost::max(),
    }
}

/// Weight of a minimum spanning forest on `unvisited`, which must already
/// contain the candidate.
pub fn spanning_tree_bound(matrix: &CostMatrix, unvisited: VertexSet, strategy: MstStrategy) -> Cost {
    strategy.weight(matrix, unvisited)
}

/// The tighter of both bounds for appending `candidate`.
pub fn combined_bound(
    matrix: &CostMatrix,
    head: Node,
    path_len: usize,
    unvisited: VertexSet,
    candidate: Node,
    strategy: MstStrategy,
) -> Cost {
    let edges = lightest_edges_bound(matrix, head, path_len, unvisited, candidate);
    let tree = spanning_tree_bound(matrix, unvisited.with(candidate), strategy);
    log::trace!(
        "bounds for -> {} over {}: edges {}, tree {}",
        candidate,
        unvisited,
        edges,
        tree
    );
    edges.max(tree)
}

#[cfg(test)]
mod test_bounds {
    use super::*;
    use crate::testing::{benchmark_matrix, random_matrix};

    /// Cheapest way to finish `path` through all of `unvisited` and back to the
    /// start, by trying every order.
    fn completion_cost(matrix: &CostMatrix, path: &[Node], unvisited: VertexSet) -> Option<Cost> {
        let tail = *path.last().unwrap();
        if unvisited.is_empty() {
            return matrix.cost(tail, path[0]);
        }
        unvisited
            .iter()
            .filter_map(|v| {
                let edge = matrix.cost(tail, v)?;
                let mut next = path.to_vec();
                next.push(v);
                completion_cost(matrix, &next, unvisited.without(v)).map(|rest| edge + rest)
            })
            .min()
    }

    #[test]
    fn test_last_candidate_is_free() {
        let matrix = benchmark_matrix();
        let unvisited = VertexSet::singleton(2.into());
        assert_eq!(
            lightest_edges_bound(&matrix, 0.into(), 3, unvisited, 2.into()),
            0.into()
        );
    }

    #[test]
    fn test_one_vertex_left_is_exact() {
        let matrix = benchmark_matrix();
        // path 0 -> 1, candidate 3, then 2 remains: 3 -> 2 -> 0 = 30 + 15
        let unvisited: VertexSet = vec![2.into(), 3.into()].into_iter().collect();
        assert_eq!(
            lightest_edges_bound(&matrix, 0.into(), 2, unvisited, 3.into()),
            45.into()
        );
    }

    #[test]
    fn test_start_of_benchmark() {
        let matrix = benchmark_matrix();
        let unvisited = matrix.vertices().without(0.into());
        // tail 1 out: min(35, 25) = 25, head in: min(15, 20) = 15
        // 2: out min(15, 30) = 15, in min(35, 30) = 30
        // 3: out min(20, 30) = 20, in min(25, 30) = 25
        assert_eq!(
            lightest_edges_bound(&matrix, 0.into(), 1, unvisited, 1.into()),
            Cost::new((25 + 15 + 15 + 30 + 20 + 25) / 2)
        );
        // tree over {1, 2, 3}: 25 + 30
        assert_eq!(
            spanning_tree_bound(&matrix, unvisited, MstStrategy::Kruskal),
            55.into()
        );
        assert_eq!(
            combined_bound(&matrix, 0.into(), 1, unvisited, 1.into(), MstStrategy::Kruskal),
            65.into()
        );
    }

    #[test]
    fn test_stranded_vertex_is_infinite() {
        // nothing leaves vertex 3 except towards 1
        let matrix = CostMatrix::from_rows(&[
            [-1, 1, 1, 1],
            [1, -1, 1, 1],
            [1, 1, -1, 1],
            [-1, 1, -1, -1],
        ])
        .unwrap();
        let unvisited = matrix.vertices().without(0.into());
        assert!(lightest_edges_bound(&matrix, 0.into(), 1, unvisited, 1.into()).is_max());
    }

    /// No bound exceeds the true cost of the best completion after the
    /// candidate.
    #[test]
    fn test_bounds_are_admissible() {
        for seed in 0..12 {
            let matrix = random_matrix(6, seed % 2 == 0, seed);
            let origin = Node::origin();
            let all = matrix.vertices().without(origin);
            let mut paths: Vec<Vec<Node>> = vec![vec![origin]];
            paths.extend(all.iter().map(|v| vec![origin, v]));

            for path in paths {
                let unvisited = path.iter().fold(all, |set, &n| set.without(n));
                for candidate in unvisited {
                    let mut next = path.clone();
                    next.push(candidate);
                    let exact = match completion_cost(&matrix, &next, unvisited.without(candidate)) {
                        Some(c) => c,
                        None => continue,
                    };
                    let edges = lightest_edges_bound(&matrix, origin, path.len(), unvisited, candidate);
                    let tree = spanning_tree_bound(&matrix, unvisited, MstStrategy::Kruskal);
                    assert!(edges <= exact, "seed {}: {} > {}", seed, edges, exact);
                    assert!(tree <= exact, "seed {}: {} > {}", seed, tree, exact);
                }
            }
        }
    }
}
