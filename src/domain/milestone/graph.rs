//! 마일스톤 의존성 그래프
//!
//! 간선 `(milestone_id, depends_on_id)`는 "milestone이 depends_on에 의존한다"를 뜻합니다.

use std::collections::{HashMap, HashSet};

/// `from -> to` 간선을 추가했을 때 순환이 생기는지 확인
///
/// `to`에서 기존 간선을 따라 `from`에 도달할 수 있으면 순환입니다.
pub fn would_create_cycle(edges: &[(i64, i64)], from: i64, to: i64) -> bool {
    if from == to {
        return true;
    }

    let mut adjacency: HashMap<i64, Vec<i64>> = HashMap::new();
    for &(milestone_id, depends_on_id) in edges {
        adjacency.entry(milestone_id).or_default().push(depends_on_id);
    }

    let mut visited = HashSet::new();
    let mut stack = vec![to];

    while let Some(node) = stack.pop() {
        if node == from {
            return true;
        }
        if !visited.insert(node) {
            continue;
        }
        if let Some(next) = adjacency.get(&node) {
            stack.extend(next.iter().copied().filter(|n| !visited.contains(n)));
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_detect_self_dependency() {
        assert!(would_create_cycle(&[], 1, 1));
    }

    #[test]
    fn should_detect_direct_cycle() {
        // 2 depends on 1, adding 1 -> 2 closes the loop
        assert!(would_create_cycle(&[(2, 1)], 1, 2));
    }

    #[test]
    fn should_detect_transitive_cycle() {
        let edges = [(2, 1), (3, 2), (4, 3)];

        assert!(would_create_cycle(&edges, 1, 4));
    }

    #[test]
    fn should_allow_diamond() {
        // 4 -> 2 -> 1, 4 -> 3 -> 1
        let edges = [(2, 1), (3, 1), (4, 2)];

        assert!(!would_create_cycle(&edges, 4, 3));
    }

    #[test]
    fn should_allow_unrelated_chain() {
        let edges = [(2, 1), (5, 4)];

        assert!(!would_create_cycle(&edges, 3, 2));
        assert!(!would_create_cycle(&edges, 1, 5));
    }
}
