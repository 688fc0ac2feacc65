use super::super::{Ctx, NoteCmd, parse_note_id, parse_waypoint_id, print_json};
use crate::Result;
use crate::engine::FileEngine;

pub(crate) fn handle(ctx: &Ctx, engine: &mut FileEngine, cmd: NoteCmd) -> Result<()> {
    match cmd {
        NoteCmd::Link { note, waypoint } => {
            let note = parse_note_id(&note)?;
            let waypoint = parse_waypoint_id(&waypoint)?;
            let updated = engine.link_note(&note, &waypoint)?;
            if ctx.json {
                print_json(&updated)
            } else {
                println!("✓ Linked note {} to {}", note, waypoint);
                Ok(())
            }
        }
        NoteCmd::Unlink { note, waypoint } => {
            let note = parse_note_id(&note)?;
            let waypoint = parse_waypoint_id(&waypoint)?;
            let updated = engine.unlink_note(&note, &waypoint)?;
            if ctx.json {
                print_json(&updated)
            } else {
                println!("✓ Unlinked note {} from {}", note, waypoint);
                Ok(())
            }
        }
    }
}
