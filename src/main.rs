//! Habit MCP Server - Main Entry Point
//!
//! This is the main entry point for the habit MCP server application.
//! The actual implementation is in the `habit_mcp` library.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use habit_mcp::HabitServerHandler;
use mcp_attr::server::serve_stdio;

/// Habit MCP Server - daily habit tracking with streaks via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the habit data file
    file: String,

    /// Enable git synchronization on save
    #[arg(long)]
    sync_git: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        // No arguments provided, show help and exit with error code
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!(); // Add a newline after help
        std::process::exit(2);
    }

    let args = Args::parse();
    let handler = HabitServerHandler::new(&args.file, args.sync_git)?;
    serve_stdio(handler).await?;
    Ok(())
}
