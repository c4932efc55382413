use crate::{
    graph::{Node, Tour},
    matrix::CostMatrix,
    Cost,
};

/// Exact reference solver that evaluates every ordering of `1..n` after the
/// origin. Only usable for about ten vertices; the first cheapest tour wins.
pub fn brute_force(matrix: &CostMatrix) -> Tour {
    match matrix.n() {
        0 => return Tour::empty(),
        1 => return Tour::new(vec![Node::origin()], Cost::new(0)),
        _ => {}
    }

    let mut order: Vec<Node> = matrix.nodes().collect();
    let mut best = Tour::infeasible();
    permute(matrix, &mut order, 1, &mut best);
    log::debug!("Brute force optimum: {}", best);
    best
}

fn permute(matrix: &CostMatrix, order: &mut Vec<Node>, k: usize, best: &mut Tour) {
    if k == order.len() {
        if let Some(cost) = matrix.cycle_cost(order) {
            if cost < best.cost() {
                *best = Tour::new(order.clone(), cost);
            }
        }
        return;
    }
    for i in k..order.len() {
        order.swap(k, i);
        permute(matrix, order, k + 1, best);
        order.swap(k, i);
    }
}
