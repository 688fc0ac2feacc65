use super::super::{Ctx, print_json, render};
use crate::Result;
use crate::engine::{FileEngine, Session};

pub(crate) fn handle_ready(ctx: &Ctx, engine: &FileEngine, session: &Session) -> Result<()> {
    let waypoints = engine.get_ready(session)?;
    if ctx.json {
        print_json(&waypoints)
    } else {
        println!("{}", render::render_ready(&waypoints));
        Ok(())
    }
}

pub(crate) fn handle_blocked(ctx: &Ctx, engine: &FileEngine, session: &Session) -> Result<()> {
    let waypoints = engine.get_blocked(session)?;
    if ctx.json {
        print_json(&waypoints)
    } else {
        println!("{}", render::render_blocked(&waypoints));
        Ok(())
    }
}
