//! Human renderer for CLI outputs.
//!
//! Pure formatting; handlers gather any extra data needed.

use crate::core::{BranchName, Waypoint, WaypointId};
use crate::engine::MergeOutcome;

pub fn render_created(w: &Waypoint) -> String {
    let mut out = String::new();
    out.push_str(&format!("✓ Created waypoint: {}\n", w.id));
    out.push_str(&format!("  Title: {}\n", w.title));
    out.push_str(&format!("  Branch: {}\n", w.branch));
    out.push_str(&format!("  Status: {}", w.status));
    out
}

pub fn render_updated(id: &WaypointId) -> String {
    format!("✓ Updated waypoint: {id}")
}

pub fn render_deleted(id: &WaypointId) -> String {
    format!("✓ Deleted waypoint: {id}")
}

pub fn render_status(w: &Waypoint, from: &str) -> String {
    format!("✓ {}: {} → {}", w.id, from, w.status)
}

pub fn render_show(w: &Waypoint) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} [{}] {}\n", w.id, w.status, w.title));
    out.push_str(&format!("  Branch: {}\n", w.branch));
    if !w.description.is_empty() {
        out.push_str(&format!("  Description: {}\n", w.description));
    }
    if !w.reasoning.is_empty() {
        out.push_str(&format!("  Reasoning: {}\n", w.reasoning));
    }
    if !w.depends_on.is_empty() {
        let deps: Vec<&str> = w.depends_on.iter().map(|d| d.as_str()).collect();
        out.push_str(&format!("  Depends on: {}\n", deps.join(", ")));
    }
    if !w.linked_note_ids.is_empty() {
        let notes: Vec<&str> = w.linked_note_ids.iter().map(|n| n.as_str()).collect();
        out.push_str(&format!("  Notes: {}\n", notes.join(", ")));
    }
    out.push_str(&format!("  Created: {}\n", w.created_at.to_rfc3339()));
    out.push_str(&format!("  Updated: {}", w.updated_at.to_rfc3339()));
    out
}

pub fn render_list(ws: &[Waypoint]) -> String {
    if ws.is_empty() {
        return "no waypoints".into();
    }
    let mut out = String::new();
    for w in ws {
        out.push_str(&format!("{} [{}] {} ({})\n", w.id, w.status, w.title, w.branch));
    }
    out.pop();
    out
}

pub fn render_ready(ws: &[Waypoint]) -> String {
    if ws.is_empty() {
        return "\n✨ Nothing ready — everything is blocked, in flight, or done\n".into();
    }
    let mut out = String::new();
    out.push_str(&format!("\n📋 Ready waypoints ({}):\n\n", ws.len()));
    for (i, w) in ws.iter().enumerate() {
        out.push_str(&format!("{}. {}: {}\n", i + 1, w.id, w.title));
    }
    out
}

pub fn render_blocked(ws: &[Waypoint]) -> String {
    if ws.is_empty() {
        return "no blocked waypoints".into();
    }
    let mut out = String::new();
    for w in ws {
        let deps: Vec<&str> = w.depends_on.iter().map(|d| d.as_str()).collect();
        out.push_str(&format!("{} {} (waiting on: {})\n", w.id, w.title, deps.join(", ")));
    }
    out.pop();
    out
}

pub fn render_route(branch: &BranchName, ws: &[Waypoint]) -> String {
    if ws.is_empty() {
        return format!("route for `{branch}` is empty");
    }
    let mut out = String::new();
    out.push_str(&format!("Route for `{branch}`:\n"));
    for (i, w) in ws.iter().enumerate() {
        out.push_str(&format!("{:>3}. {} [{}] {}\n", i + 1, w.id, w.status, w.title));
    }
    out.pop();
    out
}

pub fn render_branches(names: &[BranchName], active: &BranchName) -> String {
    let mut out = String::new();
    for name in names {
        let marker = if name == active { "*" } else { " " };
        out.push_str(&format!("{marker} {name}\n"));
    }
    out.pop();
    out
}

pub fn render_merge(source: &str, target: &str, outcome: &MergeOutcome) -> String {
    if let Some(warning) = &outcome.warning {
        return format!("⚠ {warning}");
    }
    format!(
        "✓ Merged `{source}` onto `{target}`: {} waypoint(s) copied",
        outcome.copied.len()
    )
}
