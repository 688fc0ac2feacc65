//! Engine scenarios over a temp workspace: create → route → status
//! cascade → dependency mutation → deletion repair → branch merge.

use tempfile::TempDir;

use wayline::engine::{FileEngine, Session, WaypointDraft};
use wayline::{BranchName, NoteId, Status, Waypoint, WaypointId};

fn workspace() -> (TempDir, FileEngine, Session) {
    let dir = TempDir::new().expect("temp workspace");
    let data = dir.path().join(".wayline");
    std::fs::create_dir_all(&data).expect("data dir");
    let (engine, session) = FileEngine::at(data);
    (dir, engine, session)
}

fn draft(title: &str, deps: &[&Waypoint]) -> WaypointDraft {
    WaypointDraft {
        title: title.to_string(),
        depends_on: deps.iter().map(|w| w.id.clone()).collect(),
        ..WaypointDraft::default()
    }
}

fn seed_notes(dir: &TempDir, ids: &[&str]) {
    let records: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| serde_json::json!({ "id": id, "waypoint_id": null }))
        .collect();
    std::fs::write(
        dir.path().join(".wayline/notes.json"),
        serde_json::to_vec_pretty(&records).unwrap(),
    )
    .unwrap();
}

#[test]
fn route_orders_dependencies_and_statuses_cascade() {
    let (_dir, mut engine, session) = workspace();
    let a = engine.create_waypoint(&session, draft("map the coastline", &[])).unwrap();
    let b = engine
        .create_waypoint(&session, draft("chart the reef", &[&a]))
        .unwrap();

    let route = engine.get_route(&session, None).unwrap();
    let ids: Vec<&str> = route.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, vec![a.id.as_str(), b.id.as_str()]);

    assert!(a.status.is_ready());
    assert!(b.status.is_blocked());

    engine.set_status(&a.id, Status::ACTIVE).unwrap();
    assert!(engine.get(&b.id).unwrap().status.is_blocked());

    engine.set_status(&a.id, Status::DONE).unwrap();
    assert!(engine.get(&b.id).unwrap().status.is_ready());

    // reopening the dependency re-blocks the dependent
    engine.set_status(&a.id, Status::ACTIVE).unwrap();
    assert!(engine.get(&b.id).unwrap().status.is_blocked());
}

#[test]
fn ready_and_blocked_queries_partition_the_branch() {
    let (_dir, mut engine, session) = workspace();
    let a = engine.create_waypoint(&session, draft("base camp", &[])).unwrap();
    let b = engine
        .create_waypoint(&session, draft("summit push", &[&a]))
        .unwrap();

    let ready = engine.get_ready(&session).unwrap();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].id, a.id);

    let blocked = engine.get_blocked(&session).unwrap();
    assert_eq!(blocked.len(), 1);
    assert_eq!(blocked[0].id, b.id);
}

#[test]
fn self_dependency_is_refused_with_no_state_change() {
    let (_dir, mut engine, session) = workspace();
    let a = engine.create_waypoint(&session, draft("solo step", &[])).unwrap();

    let err = engine.add_dependency(&a.id, &a.id).unwrap_err();
    assert_eq!(err.code(), "invalid_input");
    assert!(engine.get(&a.id).unwrap().depends_on.is_empty());
}

#[test]
fn cycle_creating_edge_is_refused() {
    let (_dir, mut engine, session) = workspace();
    let a = engine.create_waypoint(&session, draft("first", &[])).unwrap();
    let b = engine.create_waypoint(&session, draft("second", &[&a])).unwrap();
    let c = engine.create_waypoint(&session, draft("third", &[&b])).unwrap();

    let err = engine.add_dependency(&a.id, &c.id).unwrap_err();
    assert_eq!(err.code(), "would_cycle");
    assert!(engine.get(&a.id).unwrap().depends_on.is_empty());

    // the pure function agrees
    let all = engine.list(None).unwrap();
    assert!(wayline::would_cycle(&all, &a.id, &c.id));
    assert!(!wayline::would_cycle(&all, &c.id, &a.id));
}

#[test]
fn duplicate_dependency_is_a_conflict() {
    let (_dir, mut engine, session) = workspace();
    let a = engine.create_waypoint(&session, draft("one", &[])).unwrap();
    let b = engine.create_waypoint(&session, draft("two", &[&a])).unwrap();

    let err = engine.add_dependency(&b.id, &a.id).unwrap_err();
    assert_eq!(err.code(), "conflict");
}

#[test]
fn removing_an_absent_edge_fails() {
    let (_dir, mut engine, session) = workspace();
    let a = engine.create_waypoint(&session, draft("one", &[])).unwrap();
    let b = engine.create_waypoint(&session, draft("two", &[])).unwrap();

    let err = engine.remove_dependency(&b.id, &a.id).unwrap_err();
    assert_eq!(err.code(), "not_found");

    engine.add_dependency(&b.id, &a.id).unwrap();
    let updated = engine.remove_dependency(&b.id, &a.id).unwrap();
    assert!(updated.depends_on.is_empty());
    assert!(updated.status.is_ready());
}

#[test]
fn deletion_repairs_dependents() {
    let (_dir, mut engine, session) = workspace();
    let x = engine.create_waypoint(&session, draft("doomed", &[])).unwrap();
    let y = engine.create_waypoint(&session, draft("survivor", &[&x])).unwrap();

    engine.delete_waypoint(&x.id).unwrap();

    let y = engine.get(&y.id).unwrap();
    assert!(y.depends_on.is_empty());
    assert!(y.status.is_ready());

    let err = engine.get(&x.id).unwrap_err();
    assert_eq!(err.code(), "not_found");
}

#[test]
fn empty_title_is_refused() {
    let (_dir, mut engine, session) = workspace();
    let err = engine
        .create_waypoint(&session, draft("   ", &[]))
        .unwrap_err();
    assert_eq!(err.code(), "invalid_input");
    assert!(engine.list(None).unwrap().is_empty());
}

#[test]
fn unknown_status_name_reports_current_status() {
    let (_dir, mut engine, session) = workspace();
    let a = engine.create_waypoint(&session, draft("gate", &[])).unwrap();
    let b = engine.create_waypoint(&session, draft("held", &[&a])).unwrap();

    let err = engine.set_status_named(&b.id, "not-a-real-status").unwrap_err();
    assert_eq!(err.code(), "invalid_transition");
    let msg = err.to_string();
    assert!(msg.contains("blocked"), "message names current status: {msg}");
    assert!(msg.contains("not-a-real-status"));
}

#[test]
fn illegal_transition_is_refused() {
    let (_dir, mut engine, session) = workspace();
    let a = engine.create_waypoint(&session, draft("gate", &[])).unwrap();
    let b = engine.create_waypoint(&session, draft("held", &[&a])).unwrap();

    // blocked -> done is not in the table
    let err = engine.set_status(&b.id, Status::DONE).unwrap_err();
    assert_eq!(err.code(), "invalid_transition");
    assert!(engine.get(&b.id).unwrap().status.is_blocked());
}

#[test]
fn explicit_ready_hands_back_to_the_status_engine() {
    let (_dir, mut engine, session) = workspace();
    let a = engine.create_waypoint(&session, draft("dep", &[])).unwrap();
    let b = engine.create_waypoint(&session, draft("work", &[&a])).unwrap();

    engine.set_status(&a.id, Status::ACTIVE).unwrap();
    engine.set_status(&a.id, Status::DONE).unwrap();
    engine.set_status(&b.id, Status::ACTIVE).unwrap();

    // active -> ready is legal, but the graph decides the derived value
    let b = engine.set_status(&b.id, Status::READY).unwrap();
    assert!(b.status.is_ready());

    // reopen the dependency: the handed-back status derives to blocked
    engine.set_status(&a.id, Status::ACTIVE).unwrap();
    assert!(engine.get(&b.id).unwrap().status.is_blocked());
}

#[test]
fn update_patches_only_named_fields() {
    let (_dir, mut engine, session) = workspace();
    let a = engine
        .create_waypoint(
            &session,
            WaypointDraft {
                title: "old title".into(),
                description: "keep me".into(),
                ..WaypointDraft::default()
            },
        )
        .unwrap();

    let patch = wayline::WaypointPatch {
        title: wayline::Patch::Set("new title".into()),
        reasoning: wayline::Patch::Set("because".into()),
        ..wayline::WaypointPatch::default()
    };
    let updated = engine.update_waypoint(&a.id, patch).unwrap();
    assert_eq!(updated.title, "new title");
    assert_eq!(updated.description, "keep me");
    assert_eq!(updated.reasoning, "because");
    assert!(updated.updated_at > a.updated_at);

    let err = engine
        .update_waypoint(
            &a.id,
            wayline::WaypointPatch {
                title: wayline::Patch::Clear,
                ..wayline::WaypointPatch::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.code(), "invalid_input");
}

#[test]
fn note_links_maintain_both_sides() {
    let (dir, mut engine, session) = workspace();
    seed_notes(&dir, &["n1", "n2"]);
    let a = engine.create_waypoint(&session, draft("annotated", &[])).unwrap();
    let n1 = NoteId::new("n1").unwrap();

    let linked = engine.link_note(&n1, &a.id).unwrap();
    assert_eq!(linked.linked_note_ids, vec![n1.clone()]);

    // back-reference landed in the note directory
    let notes: Vec<serde_json::Value> = serde_json::from_slice(
        &std::fs::read(dir.path().join(".wayline/notes.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(notes[0]["waypoint_id"], a.id.as_str());

    // double link is a conflict
    let err = engine.link_note(&n1, &a.id).unwrap_err();
    assert_eq!(err.code(), "conflict");

    // unknown note is not found
    let ghost = NoteId::new("ghost").unwrap();
    let err = engine.link_note(&ghost, &a.id).unwrap_err();
    assert_eq!(err.code(), "not_found");

    let unlinked = engine.unlink_note(&n1, &a.id).unwrap();
    assert!(unlinked.linked_note_ids.is_empty());
    let notes: Vec<serde_json::Value> = serde_json::from_slice(
        &std::fs::read(dir.path().join(".wayline/notes.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(notes[0]["waypoint_id"], serde_json::Value::Null);

    let err = engine.unlink_note(&n1, &a.id).unwrap_err();
    assert_eq!(err.code(), "not_found");
}

#[test]
fn deleting_a_waypoint_clears_note_backrefs() {
    let (dir, mut engine, session) = workspace();
    seed_notes(&dir, &["n1"]);
    let a = engine.create_waypoint(&session, draft("annotated", &[])).unwrap();
    let n1 = NoteId::new("n1").unwrap();
    engine.link_note(&n1, &a.id).unwrap();

    engine.delete_waypoint(&a.id).unwrap();

    let notes: Vec<serde_json::Value> = serde_json::from_slice(
        &std::fs::read(dir.path().join(".wayline/notes.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(notes[0]["waypoint_id"], serde_json::Value::Null);
}

#[test]
fn branch_registry_and_switching() {
    let (_dir, mut engine, mut session) = workspace();
    assert_eq!(session.branch().as_str(), "main");

    engine.create_branch("northern-route", "try the ridge").unwrap();
    let err = engine.create_branch("northern-route", "").unwrap_err();
    assert_eq!(err.code(), "conflict");
    let err = engine.create_branch("main", "").unwrap_err();
    assert_eq!(err.code(), "conflict");
    let err = engine.create_branch("   ", "").unwrap_err();
    assert_eq!(err.code(), "invalid_input");

    engine.switch_branch(&mut session, "northern-route").unwrap();
    assert_eq!(session.branch().as_str(), "northern-route");

    let err = engine.switch_branch(&mut session, "nowhere").unwrap_err();
    assert_eq!(err.code(), "not_found");
    assert_eq!(session.branch().as_str(), "northern-route");
}

#[test]
fn branches_are_discovered_from_waypoints_in_order() {
    let (_dir, mut engine, session) = workspace();
    engine.create_branch("registered", "").unwrap();
    engine
        .create_waypoint(
            &session,
            WaypointDraft {
                title: "stray".into(),
                branch: Some(BranchName::new("observed-only").unwrap()),
                ..WaypointDraft::default()
            },
        )
        .unwrap();

    let names: Vec<String> = engine
        .list_branches()
        .unwrap()
        .into_iter()
        .map(|b| b.as_str().to_string())
        .collect();
    assert_eq!(names, vec!["main", "registered", "observed-only"]);
}

#[test]
fn merge_copies_structure_with_fresh_ids() {
    let (_dir, mut engine, mut session) = workspace();
    engine.create_branch("src", "").unwrap();
    engine.switch_branch(&mut session, "src").unwrap();

    let p = engine.create_waypoint(&session, draft("p", &[])).unwrap();
    let q = engine.create_waypoint(&session, draft("q", &[&p])).unwrap();
    engine.set_status(&p.id, Status::ACTIVE).unwrap();

    let src = BranchName::new("src").unwrap();
    let dest = BranchName::new("dest").unwrap();
    let outcome = engine.merge_branch(&src, &dest).unwrap();
    assert!(outcome.warning.is_none());
    assert_eq!(outcome.copied.len(), 2);

    let copies = engine.list(Some(&dest)).unwrap();
    assert_eq!(copies.len(), 2);
    let p_copy = copies.iter().find(|w| w.title == "p").unwrap();
    let q_copy = copies.iter().find(|w| w.title == "q").unwrap();

    // fresh ids, statuses reset, note links dropped
    assert_ne!(p_copy.id, p.id);
    assert_ne!(q_copy.id, q.id);
    assert!(p_copy.status.is_ready());
    assert!(q_copy.status.is_blocked());
    assert!(q_copy.linked_note_ids.is_empty());

    // the copied edge follows the copy, not the original
    assert_eq!(q_copy.depends_on, vec![p_copy.id.clone()]);

    // source untouched (still active / blocked on src)
    let p_src = engine.get(&p.id).unwrap();
    assert_eq!(p_src.branch, src);
    assert_eq!(p_src.status, Status::ACTIVE);
    assert_eq!(engine.get(&q.id).unwrap().depends_on, vec![p.id.clone()]);
}

#[test]
fn merge_keeps_edges_out_of_the_merged_set() {
    let (_dir, mut engine, mut session) = workspace();
    let shared = engine.create_waypoint(&session, draft("shared", &[])).unwrap();

    engine.create_branch("side", "").unwrap();
    engine.switch_branch(&mut session, "side").unwrap();
    let s = engine
        .create_waypoint(&session, draft("side work", &[&shared]))
        .unwrap();

    let side = BranchName::new("side").unwrap();
    let dest = BranchName::new("dest").unwrap();
    engine.merge_branch(&side, &dest).unwrap();

    let copies = engine.list(Some(&dest)).unwrap();
    assert_eq!(copies.len(), 1);
    // `shared` was not part of the merge; the copy still points at it
    assert_eq!(copies[0].depends_on, vec![shared.id.clone()]);
    assert_ne!(copies[0].id, s.id);
}

#[test]
fn merging_an_empty_branch_warns_and_changes_nothing() {
    let (_dir, mut engine, _session) = workspace();
    let ghost = BranchName::new("ghost").unwrap();
    let dest = BranchName::new("dest").unwrap();

    let outcome = engine.merge_branch(&ghost, &dest).unwrap();
    assert!(outcome.copied.is_empty());
    assert!(outcome.warning.is_some());
    assert!(engine.list(None).unwrap().is_empty());
}

#[test]
fn dangling_dependencies_block_but_never_fail() {
    let (dir, engine, _session) = workspace();
    // a persisted record pointing at a waypoint that no longer exists
    let records = serde_json::json!([{
        "id": "wp-orphan",
        "title": "stranded",
        "status": "ready",
        "depends_on": ["wp-gone"],
        "branch": "main",
        "created_at": 1,
        "updated_at": 1
    }]);
    std::fs::write(
        dir.path().join(".wayline/waypoints.json"),
        serde_json::to_vec_pretty(&records).unwrap(),
    )
    .unwrap();

    let id = WaypointId::parse("wp-orphan").unwrap();
    let w = engine.get(&id).unwrap();
    assert!(w.status.is_blocked());
}
