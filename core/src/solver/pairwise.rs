use super::implication::{ImplicationGraph, Node};
use super::oracle::contradicts;
use crate::*;

const COMBINATIONS: [(Polarity, Polarity); 4] = [
    (Polarity::Mine, Polarity::Mine),
    (Polarity::Mine, Polarity::Safe),
    (Polarity::Safe, Polarity::Mine),
    (Polarity::Safe, Polarity::Safe),
];

/// Tests every polarity combination of every frontier pair and records the impossible ones.
pub fn build_graph(board: &Board, frontier: &[Coord2]) -> ImplicationGraph {
    let mut graph = ImplicationGraph::new();

    for (i, &lhs) in frontier.iter().enumerate() {
        for &rhs in &frontier[i + 1..] {
            for (lhs_polarity, rhs_polarity) in COMBINATIONS {
                if contradicts(board, &[(lhs, lhs_polarity), (rhs, rhs_polarity)]) {
                    graph.add_contradiction(Node::new(lhs, lhs_polarity), Node::new(rhs, rhs_polarity));
                }
            }
        }
    }

    log::debug!(
        "implication graph over {} frontier cells has {} edges",
        frontier.len(),
        graph.edge_count()
    );
    graph
}

/// First frontier cell whose mine assumption implies, through the graph, that it is safe.
pub fn find_refuted_mine(graph: &mut ImplicationGraph, frontier: &[Coord2]) -> Option<Coord2> {
    frontier
        .iter()
        .copied()
        .find(|&coords| graph.refutes_itself(Node::mine(coords)))
}

/// Pairwise search: records and returns a cell proven safe by the closure of pair contradictions.
pub fn search(board: &mut Board, frontier: &[Coord2]) -> Option<Coord2> {
    let mut graph = build_graph(board, frontier);
    let coords = find_refuted_mine(&mut graph, frontier)?;
    board.set_safe(coords);
    Some(coords)
}

/// The only unknown cell left on the board, if there is exactly one.
pub fn lone_remainder(board: &Board) -> Option<Coord2> {
    match board.unknown_cells().as_slice() {
        [coords] => Some(*coords),
        _ => None,
    }
}
