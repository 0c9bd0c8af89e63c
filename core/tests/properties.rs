use std::io::Cursor;

use neuronet_core::{GraphEngine, NodeId};
use proptest::prelude::*;

fn arb_edges() -> impl Strategy<Value = Vec<(NodeId, NodeId)>> {
    prop::collection::vec((0u32..24, 0u32..24), 0..80)
}

fn to_text(edges: &[(NodeId, NodeId)]) -> String {
    edges.iter().map(|(u, v)| format!("{u} {v}\n")).collect()
}

fn load(edges: &[(NodeId, NodeId)]) -> GraphEngine {
    let mut engine = GraphEngine::new();
    engine
        .load_from_reader(Cursor::new(to_text(edges)), "prop")
        .unwrap();
    engine
}

/// Hop distances from `start` by repeated relaxation; `None` = unreachable.
fn reference_distances(edges: &[(NodeId, NodeId)], n: usize, start: NodeId) -> Vec<Option<u32>> {
    let mut dist = vec![None; n];
    dist[start as usize] = Some(0);
    loop {
        let mut changed = false;
        for &(u, v) in edges {
            if let Some(du) = dist[u as usize] {
                let candidate = du + 1;
                if dist[v as usize].map_or(true, |dv| candidate < dv) {
                    dist[v as usize] = Some(candidate);
                    changed = true;
                }
            }
        }
        if !changed {
            return dist;
        }
    }
}

proptest! {
    #[test]
    fn prop_counts_match_input(edges in arb_edges()) {
        let engine = load(&edges);
        let expected_nodes = edges.iter().map(|&(u, v)| u.max(v) as usize + 1).max().unwrap_or(0);
        prop_assert_eq!(engine.edge_count().unwrap(), edges.len());
        prop_assert_eq!(engine.node_count().unwrap(), expected_nodes);
    }

    #[test]
    fn prop_degree_counts_sources(edges in arb_edges()) {
        let engine = load(&edges);
        for v in 0..engine.node_count().unwrap() as NodeId {
            let expected = edges.iter().filter(|&&(u, _)| u == v).count();
            prop_assert_eq!(engine.degree_of(v).unwrap(), expected);
        }
    }

    #[test]
    fn prop_max_degree_is_lowest_maximum(
        edges in arb_edges().prop_filter("non-empty", |e| !e.is_empty()),
    ) {
        let engine = load(&edges);
        let best = engine.node_of_max_degree().unwrap();
        let best_degree = engine.degree_of(best).unwrap();
        for v in 0..engine.node_count().unwrap() as NodeId {
            let d = engine.degree_of(v).unwrap();
            prop_assert!(d <= best_degree);
            if v < best {
                prop_assert!(d < best_degree);
            }
        }
    }

    #[test]
    fn prop_depth_zero_is_start_only(
        edges in arb_edges().prop_filter("non-empty", |e| !e.is_empty()),
        pick in any::<prop::sample::Index>(),
    ) {
        let engine = load(&edges);
        let start = pick.index(engine.node_count().unwrap()) as NodeId;
        let result = engine.bounded_bfs(start, 0).unwrap();
        prop_assert_eq!(result.node_ids().collect::<Vec<_>>(), vec![start]);
    }

    #[test]
    fn prop_bfs_matches_reachability(
        edges in arb_edges().prop_filter("non-empty", |e| !e.is_empty()),
        pick in any::<prop::sample::Index>(),
        depth in 0u32..6,
    ) {
        let engine = load(&edges);
        let n = engine.node_count().unwrap();
        let start = pick.index(n) as NodeId;
        let result = engine.bounded_bfs(start, depth).unwrap();
        let dist = reference_distances(&edges, n, start);

        for v in 0..n as NodeId {
            match dist[v as usize] {
                Some(d) if d <= depth => prop_assert_eq!(result.depth_of(v), Some(d)),
                _ => prop_assert!(!result.contains(v)),
            }
        }
        prop_assert_eq!(result.len(), dist.iter().flatten().filter(|&&d| d <= depth).count());
    }

    #[test]
    fn prop_induced_edges_sound_and_complete(
        edges in arb_edges().prop_filter("non-empty", |e| !e.is_empty()),
        pick in any::<prop::sample::Index>(),
        depth in 0u32..6,
    ) {
        let engine = load(&edges);
        let start = pick.index(engine.node_count().unwrap()) as NodeId;
        let sub = engine.subgraph(start, depth).unwrap();

        let mut expected: Vec<(NodeId, NodeId)> = edges
            .iter()
            .copied()
            .filter(|&(u, v)| sub.traversal.contains(u) && sub.traversal.contains(v))
            .collect();
        let mut actual: Vec<(NodeId, NodeId)> = sub.edges.iter().map(|&e| e.into()).collect();
        expected.sort_unstable();
        actual.sort_unstable();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_queries_are_deterministic(
        edges in arb_edges().prop_filter("non-empty", |e| !e.is_empty()),
        pick in any::<prop::sample::Index>(),
        depth in 0u32..6,
    ) {
        let engine = load(&edges);
        let start = pick.index(engine.node_count().unwrap()) as NodeId;
        prop_assert_eq!(
            engine.subgraph(start, depth).unwrap(),
            engine.subgraph(start, depth).unwrap()
        );
        prop_assert_eq!(engine.node_of_max_degree().unwrap(), engine.node_of_max_degree().unwrap());
    }
}
