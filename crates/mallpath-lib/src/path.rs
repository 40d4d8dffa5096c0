use std::collections::{HashMap, VecDeque};

use crate::error::{Error, Result};
use crate::graph::VenueGraph;

/// Find a fewest-edges path between `start` and `goal` using breadth-first
/// search.
///
/// Returns `None` when either waypoint is not part of the graph or when the
/// goal is unreachable. A path from a waypoint to itself is `[start]`.
/// Neighbours are expanded in declaration order, which decides between
/// equally short paths.
pub fn find_path(graph: &VenueGraph, start: &str, goal: &str) -> Option<Vec<String>> {
    if !graph.contains(start) || !graph.contains(goal) {
        return None;
    }

    if start == goal {
        return Some(vec![start.to_string()]);
    }

    let mut parents: HashMap<&str, Option<&str>> = HashMap::new();
    let mut queue = VecDeque::new();

    parents.insert(start, None);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for next in graph.neighbours(current) {
            let next = next.as_str();
            if parents.contains_key(next) {
                continue;
            }

            parents.insert(next, Some(current));
            if next == goal {
                return Some(reconstruct_path(&parents, start, goal));
            }
            queue.push_back(next);
        }
    }

    None
}

/// Like [`find_path`], but reports an unreachable goal as
/// [`Error::PathNotFound`].
pub fn shortest_path(graph: &VenueGraph, start: &str, goal: &str) -> Result<Vec<String>> {
    find_path(graph, start, goal).ok_or_else(|| Error::PathNotFound {
        start: start.to_string(),
        goal: goal.to_string(),
    })
}

fn reconstruct_path(parents: &HashMap<&str, Option<&str>>, start: &str, goal: &str) -> Vec<String> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node.to_string());
        if node == start {
            break;
        }
        current = parents.get(node).copied().flatten();
    }
    path.reverse();
    path
}
