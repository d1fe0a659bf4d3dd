use std::path::PathBuf;

use bevy::prelude::Resource;
use clap::Parser;

#[derive(Parser, Debug, Resource, Clone)]
#[command(name = "windborne-server")]
#[command(about = "Headless simulation host for the Windborne flight core", long_about = None)]
pub struct Args {
    /// Path to a TOML config file; built-in defaults apply when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,
}
