//! Choosing which qualifying faces a stroke cuts.
//!
//! Qualifying faces form a graph through shared sides. When both anchor
//! faces qualify and are connected, only the shortest path between them is
//! cut; otherwise the connected component around the best available seed
//! is.

use crate::topology::{EdgeKey, TopologyStore};
use std::collections::{HashMap, HashSet, VecDeque};

/// Adjacency between `faces` through shared sides.
pub fn face_adjacency(store: &TopologyStore, faces: &[usize]) -> HashMap<usize, Vec<usize>> {
    let mut by_edge: HashMap<EdgeKey, Vec<usize>> = HashMap::new();
    for &face in faces {
        for (a, b) in store.faces()[face].sides() {
            by_edge.entry(EdgeKey::new(a, b)).or_default().push(face);
        }
    }

    let mut adjacency: HashMap<usize, Vec<usize>> = faces.iter().map(|&f| (f, Vec::new())).collect();
    for sharing in by_edge.values() {
        for &f in sharing {
            for &g in sharing {
                if f != g {
                    let neighbors = adjacency.entry(f).or_default();
                    if !neighbors.contains(&g) {
                        neighbors.push(g);
                    }
                }
            }
        }
    }
    adjacency
}

/// Breadth-first shortest path from `from` to `to`, inclusive.
pub fn shortest_path(adjacency: &HashMap<usize, Vec<usize>>, from: usize, to: usize) -> Option<Vec<usize>> {
    let mut parent: HashMap<usize, usize> = HashMap::from([(from, from)]);
    let mut queue = VecDeque::from([from]);

    while let Some(face) = queue.pop_front() {
        if face == to {
            let mut path = vec![to];
            let mut current = to;
            while current != from {
                current = parent[&current];
                path.push(current);
            }
            path.reverse();
            return Some(path);
        }
        for &next in adjacency.get(&face).into_iter().flatten() {
            if !parent.contains_key(&next) {
                parent.insert(next, face);
                queue.push_back(next);
            }
        }
    }
    None
}

/// Every face reachable from `seed`, in breadth-first order.
pub fn flood_fill(adjacency: &HashMap<usize, Vec<usize>>, seed: usize) -> Vec<usize> {
    let mut visited = HashSet::from([seed]);
    let mut queue = VecDeque::from([seed]);
    let mut order = Vec::new();

    while let Some(face) = queue.pop_front() {
        order.push(face);
        for &next in adjacency.get(&face).into_iter().flatten() {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    order
}

/// Picks the faces to cut among `qualifying`, best fallback seed first.
pub fn route(
    store: &TopologyStore,
    qualifying: &[usize],
    start_face: Option<usize>,
    end_face: Option<usize>,
) -> Vec<usize> {
    let Some(&first) = qualifying.first() else {
        return Vec::new();
    };
    let adjacency = face_adjacency(store, qualifying);
    let qualifies = |face: Option<usize>| face.filter(|f| adjacency.contains_key(f));

    if let (Some(from), Some(to)) = (qualifies(start_face), qualifies(end_face)) {
        if let Some(path) = shortest_path(&adjacency, from, to) {
            return path;
        }
    }
    let seed = qualifies(start_face)
        .or_else(|| qualifies(end_face))
        .unwrap_or(first);
    flood_fill(&adjacency, seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::create_cube;

    #[test]
    fn test_cube_face_adjacency() {
        let store = create_cube(1.0).unwrap();
        let all: Vec<usize> = (0..6).collect();
        let adjacency = face_adjacency(&store, &all);
        assert!(adjacency.values().all(|n| n.len() == 4));
        // Top and bottom never touch.
        assert!(!adjacency[&1].contains(&0));
    }

    #[test]
    fn test_shortest_path_and_flood() {
        let store = create_cube(1.0).unwrap();
        let all: Vec<usize> = (0..6).collect();
        let adjacency = face_adjacency(&store, &all);
        assert_eq!(shortest_path(&adjacency, 1, 1), Some(vec![1]));
        assert_eq!(shortest_path(&adjacency, 1, 0).map(|p| p.len()), Some(3));
        assert_eq!(flood_fill(&adjacency, 0).len(), 6);
    }

    #[test]
    fn test_route_prefers_anchor_path() {
        let store = create_cube(1.0).unwrap();
        let qualifying = vec![0, 1, 2];
        assert_eq!(route(&store, &qualifying, Some(1), Some(1)), vec![1]);
        assert_eq!(route(&store, &qualifying, Some(1), None).len(), 3);
        assert_eq!(route(&store, &qualifying, Some(5), None)[0], 0);
        assert!(route(&store, &[], Some(1), Some(1)).is_empty());
    }
}
