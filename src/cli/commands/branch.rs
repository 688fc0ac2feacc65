use super::super::{BranchCmd, Ctx, print_json, render};
use crate::Result;
use crate::engine::{FileEngine, Session};

pub(crate) fn handle(
    ctx: &Ctx,
    engine: &mut FileEngine,
    session: &mut Session,
    cmd: BranchCmd,
) -> Result<()> {
    match cmd {
        BranchCmd::Create { name, reasoning } => {
            let branch = engine.create_branch(&name, &reasoning)?;
            if ctx.json {
                print_json(&branch)
            } else {
                println!("✓ Created branch `{}`", branch.name);
                Ok(())
            }
        }
        BranchCmd::Switch { name } => {
            let branch = engine.switch_branch(session, &name)?;
            if ctx.json {
                print_json(&branch)
            } else {
                // Branch selection is session-scoped; this validates the
                // name and reports it for the current invocation only.
                println!("✓ On branch `{branch}`");
                Ok(())
            }
        }
        BranchCmd::List => {
            let names = engine.list_branches()?;
            if ctx.json {
                print_json(&names)
            } else {
                println!("{}", render::render_branches(&names, session.branch()));
                Ok(())
            }
        }
    }
}
