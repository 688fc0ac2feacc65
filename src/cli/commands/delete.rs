use super::super::{Ctx, DeleteArgs, parse_waypoint_id, print_json, render};
use crate::Result;
use crate::engine::FileEngine;

pub(crate) fn handle(ctx: &Ctx, engine: &mut FileEngine, args: DeleteArgs) -> Result<()> {
    let id = parse_waypoint_id(&args.id)?;
    let removed = engine.delete_waypoint(&id)?;
    if ctx.json {
        print_json(&removed)
    } else {
        println!("{}", render::render_deleted(&removed.id));
        Ok(())
    }
}
