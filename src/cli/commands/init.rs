use super::super::{Ctx, print_json};
use crate::Result;
use crate::engine::FileEngine;

pub(crate) fn handle(ctx: &Ctx) -> Result<()> {
    let cwd = std::env::current_dir().map_err(|e| {
        crate::store::StoreError::Read {
            path: ".".into(),
            source: e,
        }
    })?;
    let (engine, session) = FileEngine::init(&cwd)?;
    if ctx.json {
        print_json(&serde_json::json!({
            "initialized": cwd.join(crate::paths::DATA_DIR_NAME),
            "branch": session.branch(),
        }))
    } else {
        println!(
            "✓ Initialized wayline workspace (branch `{}`)",
            engine.active_branch(&session)
        );
        Ok(())
    }
}
