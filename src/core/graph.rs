//! Pure graph algorithms over a waypoint snapshot.
//!
//! Everything here is side-effect free and deterministic: identical input
//! always yields identical output. The engine calls these after every
//! mutation; tests and display layers call them directly.

use std::collections::{HashMap, HashSet, VecDeque};

use super::domain::{DerivedStatus, Status};
use super::identity::WaypointId;
use super::waypoint::Waypoint;

/// Recompute every derived status from the current snapshot.
///
/// A waypoint with a derived status becomes ready iff each of its
/// dependencies resolves, within the snapshot, to a waypoint whose status
/// is done. Dangling ids count as never-done. Explicit statuses pass
/// through unchanged. Idempotent.
pub fn compute_statuses(waypoints: &mut [Waypoint]) {
    let done: HashSet<WaypointId> = waypoints
        .iter()
        .filter(|w| w.status.is_done())
        .map(|w| w.id.clone())
        .collect();

    for w in waypoints.iter_mut() {
        if w.status.is_explicit() {
            continue;
        }
        let ready = w.depends_on.iter().all(|dep| done.contains(dep));
        w.status = Status::Derived(if ready {
            DerivedStatus::Ready
        } else {
            DerivedStatus::Blocked
        });
    }
}

/// Topological order of the snapshot (Kahn's algorithm).
///
/// In-degree counts only edges whose target exists in the snapshot, so
/// dangling dependencies never wedge the sort. Seeds and all tie-breaks
/// follow storage order. A cyclic snapshot (possible only through external
/// edits; mutations reject cycles) degrades gracefully: the unconsumed
/// remainder is appended in storage order.
pub fn topo_sort(waypoints: &[Waypoint]) -> Vec<WaypointId> {
    let index: HashMap<&WaypointId, usize> = waypoints
        .iter()
        .enumerate()
        .map(|(i, w)| (&w.id, i))
        .collect();

    let mut in_degree = vec![0usize; waypoints.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); waypoints.len()];
    for (i, w) in waypoints.iter().enumerate() {
        for dep in &w.depends_on {
            if let Some(&j) = index.get(dep) {
                in_degree[i] += 1;
                dependents[j].push(i);
            }
        }
    }

    let mut queue: VecDeque<usize> = (0..waypoints.len())
        .filter(|&i| in_degree[i] == 0)
        .collect();

    let mut order = Vec::with_capacity(waypoints.len());
    let mut emitted = vec![false; waypoints.len()];
    while let Some(i) = queue.pop_front() {
        order.push(waypoints[i].id.clone());
        emitted[i] = true;
        for &d in &dependents[i] {
            in_degree[d] -= 1;
            if in_degree[d] == 0 {
                queue.push_back(d);
            }
        }
    }

    if order.len() < waypoints.len() {
        tracing::warn!(
            leftover = waypoints.len() - order.len(),
            "dependency graph contains a cycle; appending remainder in storage order"
        );
        for (i, w) in waypoints.iter().enumerate() {
            if !emitted[i] {
                order.push(w.id.clone());
            }
        }
    }

    order
}

/// Would the edge `from depends_on to` create a cycle?
///
/// True iff `from` is already reachable from `to` along existing
/// `depends_on` edges. Unknown ids are dead ends, not errors.
/// Self-dependency is a separate, cheaper precondition checked before
/// this runs.
pub fn would_cycle(waypoints: &[Waypoint], from: &WaypointId, to: &WaypointId) -> bool {
    let by_id: HashMap<&WaypointId, &Waypoint> =
        waypoints.iter().map(|w| (&w.id, w)).collect();

    let mut visited = HashSet::new();
    let mut stack = vec![to.clone()];

    while let Some(current) = stack.pop() {
        if &current == from {
            return true;
        }
        if !visited.insert(current.clone()) {
            continue;
        }
        if let Some(w) = by_id.get(&current) {
            for dep in &w.depends_on {
                if !visited.contains(dep) {
                    stack.push(dep.clone());
                }
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::BranchName;
    use crate::core::time::WallClock;

    fn wp(id: &str, deps: &[&str]) -> Waypoint {
        Waypoint {
            id: WaypointId::parse(id).unwrap(),
            title: id.to_string(),
            description: String::new(),
            status: Status::READY,
            depends_on: deps.iter().map(|d| WaypointId::parse(d).unwrap()).collect(),
            reasoning: String::new(),
            linked_note_ids: Vec::new(),
            branch: BranchName::default_branch(),
            created_at: WallClock(0),
            updated_at: WallClock(0),
        }
    }

    fn ids(order: &[WaypointId]) -> Vec<&str> {
        order.iter().map(|id| id.as_str()).collect()
    }

    #[test]
    fn statuses_follow_done_dependencies() {
        let mut ws = vec![wp("wp-a", &[]), wp("wp-b", &["wp-a"])];
        compute_statuses(&mut ws);
        assert!(ws[0].status.is_ready());
        assert!(ws[1].status.is_blocked());

        ws[0].status = Status::DONE;
        compute_statuses(&mut ws);
        assert_eq!(ws[0].status, Status::DONE);
        assert!(ws[1].status.is_ready());
    }

    #[test]
    fn dangling_dependency_blocks() {
        let mut ws = vec![wp("wp-b", &["wp-gone"])];
        compute_statuses(&mut ws);
        assert!(ws[0].status.is_blocked());
    }

    #[test]
    fn compute_statuses_is_idempotent() {
        let mut ws = vec![wp("wp-a", &[]), wp("wp-b", &["wp-a"]), wp("wp-c", &["wp-b"])];
        ws[0].status = Status::DONE;
        compute_statuses(&mut ws);
        let once = ws.clone();
        compute_statuses(&mut ws);
        assert_eq!(ws, once);
    }

    #[test]
    fn topo_sort_respects_edges() {
        // diamond: d depends on b and c, both depend on a
        let ws = vec![
            wp("wp-d", &["wp-b", "wp-c"]),
            wp("wp-b", &["wp-a"]),
            wp("wp-c", &["wp-a"]),
            wp("wp-a", &[]),
        ];
        let order = topo_sort(&ws);
        assert_eq!(order.len(), 4);
        let pos = |id: &str| order.iter().position(|o| o.as_str() == id).unwrap();
        assert!(pos("wp-a") < pos("wp-b"));
        assert!(pos("wp-a") < pos("wp-c"));
        assert!(pos("wp-b") < pos("wp-d"));
        assert!(pos("wp-c") < pos("wp-d"));
        // zero in-degree ties resolve in storage order
        assert!(pos("wp-b") < pos("wp-c"));
    }

    #[test]
    fn topo_sort_is_deterministic() {
        let ws = vec![wp("wp-x", &[]), wp("wp-y", &[]), wp("wp-z", &["wp-x"])];
        let first = topo_sort(&ws);
        assert_eq!(first, topo_sort(&ws));
        assert_eq!(ids(&first), vec!["wp-x", "wp-y", "wp-z"]);
    }

    #[test]
    fn topo_sort_ignores_dangling_edges() {
        let ws = vec![wp("wp-b", &["wp-gone"]), wp("wp-a", &[])];
        assert_eq!(ids(&topo_sort(&ws)), vec!["wp-b", "wp-a"]);
    }

    #[test]
    fn topo_sort_degrades_on_cyclic_snapshot() {
        // a <-> b smuggled in by an external edit; c is unaffected
        let ws = vec![wp("wp-a", &["wp-b"]), wp("wp-b", &["wp-a"]), wp("wp-c", &[])];
        let order = topo_sort(&ws);
        assert_eq!(ids(&order), vec!["wp-c", "wp-a", "wp-b"]);
    }

    #[test]
    fn would_cycle_on_chain() {
        // chain: c depends on b, b depends on a
        let ws = vec![wp("wp-a", &[]), wp("wp-b", &["wp-a"]), wp("wp-c", &["wp-b"])];
        let a = WaypointId::parse("wp-a").unwrap();
        let c = WaypointId::parse("wp-c").unwrap();
        // a depends_on c would close the loop
        assert!(would_cycle(&ws, &a, &c));
        // c depends_on a is just a shortcut edge
        assert!(!would_cycle(&ws, &c, &a));
    }

    #[test]
    fn would_cycle_diamond_and_no_path() {
        let ws = vec![
            wp("wp-a", &[]),
            wp("wp-b", &["wp-a"]),
            wp("wp-c", &["wp-a"]),
            wp("wp-d", &["wp-b", "wp-c"]),
        ];
        let a = WaypointId::parse("wp-a").unwrap();
        let b = WaypointId::parse("wp-b").unwrap();
        let c = WaypointId::parse("wp-c").unwrap();
        let d = WaypointId::parse("wp-d").unwrap();
        assert!(would_cycle(&ws, &a, &d));
        assert!(!would_cycle(&ws, &d, &a));
        // siblings: no path either way
        assert!(!would_cycle(&ws, &b, &c));
        assert!(!would_cycle(&ws, &c, &b));
    }

    #[test]
    fn would_cycle_unknown_ids_are_dead_ends() {
        let ws = vec![wp("wp-a", &["wp-gone"])];
        let a = WaypointId::parse("wp-a").unwrap();
        let ghost = WaypointId::parse("wp-ghost").unwrap();
        assert!(!would_cycle(&ws, &a, &ghost));
    }
}
