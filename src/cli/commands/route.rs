use super::super::{Ctx, RouteArgs, print_json, render};
use crate::Result;
use crate::core::BranchName;
use crate::engine::{FileEngine, Session};

pub(crate) fn handle(
    ctx: &Ctx,
    engine: &FileEngine,
    session: &Session,
    args: RouteArgs,
) -> Result<()> {
    let branch = args.branch.map(BranchName::new).transpose()?;
    let shown = branch.as_ref().unwrap_or_else(|| session.branch());
    let route = engine.get_route(session, branch.as_ref())?;
    if ctx.json {
        print_json(&route)
    } else {
        println!("{}", render::render_route(shown, &route));
        Ok(())
    }
}
