use super::super::{Ctx, MergeArgs, print_json, render};
use crate::Result;
use crate::core::BranchName;
use crate::engine::FileEngine;

pub(crate) fn handle(ctx: &Ctx, engine: &mut FileEngine, args: MergeArgs) -> Result<()> {
    let source = BranchName::new(args.source)?;
    let target = BranchName::new(args.target)?;
    let outcome = engine.merge_branch(&source, &target)?;
    if ctx.json {
        print_json(&outcome)
    } else {
        println!(
            "{}",
            render::render_merge(source.as_str(), target.as_str(), &outcome)
        );
        Ok(())
    }
}
