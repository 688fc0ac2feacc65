use super::super::{CreateArgs, Ctx, parse_waypoint_id, print_json, render};
use crate::Result;
use crate::engine::{FileEngine, Session, WaypointDraft};

pub(crate) fn handle(
    ctx: &Ctx,
    engine: &mut FileEngine,
    session: &Session,
    args: CreateArgs,
) -> Result<()> {
    let depends_on = args
        .deps
        .iter()
        .map(|raw| parse_waypoint_id(raw))
        .collect::<Result<Vec<_>>>()?;

    let created = engine.create_waypoint(
        session,
        WaypointDraft {
            title: args.title,
            description: args.description,
            reasoning: args.reasoning,
            depends_on,
            branch: None,
        },
    )?;

    if ctx.json {
        print_json(&created)
    } else {
        println!("{}", render::render_created(&created));
        Ok(())
    }
}
