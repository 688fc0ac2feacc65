use super::super::{Ctx, DepCmd, parse_waypoint_id, print_json};
use crate::Result;
use crate::engine::FileEngine;

pub(crate) fn handle(ctx: &Ctx, engine: &mut FileEngine, cmd: DepCmd) -> Result<()> {
    match cmd {
        DepCmd::Add {
            waypoint,
            dependency,
        } => {
            let waypoint = parse_waypoint_id(&waypoint)?;
            let dependency = parse_waypoint_id(&dependency)?;
            let updated = engine.add_dependency(&waypoint, &dependency)?;
            if ctx.json {
                print_json(&updated)
            } else {
                println!("✓ {} now depends on {}", waypoint, dependency);
                Ok(())
            }
        }
        DepCmd::Rm {
            waypoint,
            dependency,
        } => {
            let waypoint = parse_waypoint_id(&waypoint)?;
            let dependency = parse_waypoint_id(&dependency)?;
            let updated = engine.remove_dependency(&waypoint, &dependency)?;
            if ctx.json {
                print_json(&updated)
            } else {
                println!("✓ {} no longer depends on {}", waypoint, dependency);
                Ok(())
            }
        }
    }
}
