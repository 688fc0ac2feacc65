use super::super::{Ctx, ListArgs, print_json, render};
use crate::Result;
use crate::engine::{FileEngine, Session};

pub(crate) fn handle(
    ctx: &Ctx,
    engine: &FileEngine,
    session: &Session,
    args: ListArgs,
) -> Result<()> {
    let branch = if args.all { None } else { Some(session.branch()) };
    let waypoints = engine.list(branch)?;
    if ctx.json {
        print_json(&waypoints)
    } else {
        println!("{}", render::render_list(&waypoints));
        Ok(())
    }
}
