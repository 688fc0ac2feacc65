//! CLI surface for wayline.
//!
//! Command tree + thin handlers: each subcommand parses its arguments,
//! calls one engine operation, and prints either the JSON entity or the
//! human rendering. No business logic lives here.

use std::ffi::OsString;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::core::{NoteId, WaypointId};
use crate::engine::FileEngine;
use crate::{Error, Result};

mod commands;
mod render;

// =============================================================================
// Entry + global options
// =============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "wl",
    version,
    about = "Wayline waypoint route tracker",
    infer_subcommands = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Machine-readable JSON output.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Branch to operate on for this invocation (default: configured).
    #[arg(long, global = true, value_name = "NAME")]
    pub branch: Option<String>,

    /// Debug output (repeat for more).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a wayline workspace in this directory.
    Init,

    /// Create a new waypoint.
    #[command(alias = "new")]
    Create(CreateArgs),

    /// Show a waypoint.
    Show(ShowArgs),

    /// List waypoints.
    #[command(alias = "ls")]
    List(ListArgs),

    /// List waypoints that are ready to work on.
    Ready,

    /// Show blocked waypoints.
    Blocked,

    /// Show the route: the branch's waypoints in dependency order.
    Route(RouteArgs),

    /// Update waypoint fields.
    Update(UpdateArgs),

    /// Set a waypoint's status.
    Status(StatusArgs),

    /// Delete a waypoint.
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Manage dependency edges.
    #[command(subcommand)]
    Dep(DepCmd),

    /// Link or unlink notes.
    #[command(subcommand)]
    Note(NoteCmd),

    /// Manage branches.
    #[command(subcommand)]
    Branch(BranchCmd),

    /// Copy every waypoint from one branch onto another.
    Merge(MergeArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Waypoint title.
    pub title: String,

    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Why this waypoint exists.
    #[arg(short, long, default_value = "")]
    pub reasoning: String,

    /// Dependency (waypoint id); repeatable.
    #[arg(long = "dep", value_name = "ID")]
    pub deps: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    pub id: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// All branches, not just the active one.
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Branch to show (default: the active branch).
    pub branch: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub reasoning: Option<String>,

    /// Move the waypoint to another branch.
    #[arg(long)]
    pub branch: Option<String>,

    #[arg(long)]
    pub clear_description: bool,

    #[arg(long)]
    pub clear_reasoning: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    pub id: String,
    /// Target status: active, done, abandoned, or ready.
    pub status: String,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub id: String,
}

#[derive(Subcommand, Debug)]
pub enum DepCmd {
    /// Add a dependency: WAYPOINT waits for DEPENDENCY to be done.
    Add {
        waypoint: String,
        dependency: String,
    },
    /// Remove a dependency edge.
    Rm {
        waypoint: String,
        dependency: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum NoteCmd {
    /// Link a note to a waypoint.
    Link { note: String, waypoint: String },
    /// Unlink a note from a waypoint.
    Unlink { note: String, waypoint: String },
}

#[derive(Subcommand, Debug)]
pub enum BranchCmd {
    /// Register a new branch.
    Create {
        name: String,
        #[arg(short, long, default_value = "")]
        reasoning: String,
    },
    /// Validate that a branch exists and print it.
    Switch { name: String },
    /// List known branches.
    List,
}

#[derive(Args, Debug)]
pub struct MergeArgs {
    pub source: String,
    pub target: String,
}

// =============================================================================
// Dispatch
// =============================================================================

struct Ctx {
    json: bool,
}

pub fn parse_from<I, T>(args: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::parse_from(args)
}

pub fn run(cli: Cli) -> Result<()> {
    let ctx = Ctx { json: cli.json };

    if matches!(cli.command, Commands::Init) {
        return commands::init::handle(&ctx);
    }

    let (mut engine, mut session) = FileEngine::open()?;
    if let Some(name) = &cli.branch {
        engine.switch_branch(&mut session, name)?;
    }

    match cli.command {
        Commands::Init => Ok(()),
        Commands::Create(args) => commands::create::handle(&ctx, &mut engine, &session, args),
        Commands::Show(args) => commands::show::handle(&ctx, &engine, args),
        Commands::List(args) => commands::list::handle(&ctx, &engine, &session, args),
        Commands::Ready => commands::ready::handle_ready(&ctx, &engine, &session),
        Commands::Blocked => commands::ready::handle_blocked(&ctx, &engine, &session),
        Commands::Route(args) => commands::route::handle(&ctx, &engine, &session, args),
        Commands::Update(args) => commands::update::handle(&ctx, &mut engine, args),
        Commands::Status(args) => commands::status::handle(&ctx, &mut engine, args),
        Commands::Delete(args) => commands::delete::handle(&ctx, &mut engine, args),
        Commands::Dep(cmd) => commands::dep::handle(&ctx, &mut engine, cmd),
        Commands::Note(cmd) => commands::note::handle(&ctx, &mut engine, cmd),
        Commands::Branch(cmd) => commands::branch::handle(&ctx, &mut engine, &mut session, cmd),
        Commands::Merge(args) => commands::merge::handle(&ctx, &mut engine, args),
    }
}

// =============================================================================
// Shared helpers
// =============================================================================

fn parse_waypoint_id(raw: &str) -> Result<WaypointId> {
    Ok(WaypointId::parse(raw.trim())?)
}

fn parse_note_id(raw: &str) -> Result<NoteId> {
    Ok(NoteId::new(raw.trim())?)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value).map_err(Error::Output)?;
    println!("{s}");
    Ok(())
}
