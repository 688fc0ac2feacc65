use super::super::{Ctx, StatusArgs, parse_waypoint_id, print_json, render};
use crate::Result;
use crate::engine::FileEngine;

pub(crate) fn handle(ctx: &Ctx, engine: &mut FileEngine, args: StatusArgs) -> Result<()> {
    let id = parse_waypoint_id(&args.id)?;
    let before = engine.get(&id)?.status;
    let updated = engine.set_status_named(&id, args.status.trim())?;
    if ctx.json {
        print_json(&updated)
    } else {
        println!("{}", render::render_status(&updated, before.as_str()));
        Ok(())
    }
}
