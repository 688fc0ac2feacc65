use super::super::{Ctx, UpdateArgs, parse_waypoint_id, print_json, render};
use crate::core::{BranchName, Patch, WaypointPatch};
use crate::engine::{FileEngine, OpError};
use crate::{Error, Result};

pub(crate) fn handle(ctx: &Ctx, engine: &mut FileEngine, args: UpdateArgs) -> Result<()> {
    let id = parse_waypoint_id(&args.id)?;

    let mut patch = WaypointPatch::default();
    if let Some(title) = args.title {
        patch.title = Patch::Set(title);
    }
    patch.description = match (args.clear_description, args.description) {
        (true, Some(_)) => {
            return Err(Error::Op(OpError::InvalidField {
                field: "description",
                reason: "--description conflicts with --clear-description".into(),
            }));
        }
        (true, None) => Patch::Clear,
        (false, Some(v)) => Patch::Set(v),
        (false, None) => Patch::Keep,
    };
    patch.reasoning = match (args.clear_reasoning, args.reasoning) {
        (true, Some(_)) => {
            return Err(Error::Op(OpError::InvalidField {
                field: "reasoning",
                reason: "--reasoning conflicts with --clear-reasoning".into(),
            }));
        }
        (true, None) => Patch::Clear,
        (false, Some(v)) => Patch::Set(v),
        (false, None) => Patch::Keep,
    };
    if let Some(branch) = args.branch {
        patch.branch = Patch::Set(BranchName::new(branch)?);
    }

    if patch.is_empty() {
        return Err(Error::Op(OpError::InvalidField {
            field: "update",
            reason: "no fields to update".into(),
        }));
    }

    let updated = engine.update_waypoint(&id, patch)?;
    if ctx.json {
        print_json(&updated)
    } else {
        println!("{}", render::render_updated(&updated.id));
        Ok(())
    }
}
