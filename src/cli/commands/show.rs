use super::super::{Ctx, ShowArgs, parse_waypoint_id, print_json, render};
use crate::Result;
use crate::engine::FileEngine;

pub(crate) fn handle(ctx: &Ctx, engine: &FileEngine, args: ShowArgs) -> Result<()> {
    let id = parse_waypoint_id(&args.id)?;
    let waypoint = engine.get(&id)?;
    if ctx.json {
        print_json(&waypoint)
    } else {
        println!("{}", render::render_show(&waypoint));
        Ok(())
    }
}
