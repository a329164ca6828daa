use clap::{Args, Subcommand};
use serde_json::Value;

use fin_analysis_core::tools;

use super::resolve_body;

/// Arguments for the tool catalog
#[derive(Args)]
pub struct ToolsArgs {
    #[command(subcommand)]
    pub command: ToolsCommand,
}

#[derive(Subcommand)]
pub enum ToolsCommand {
    /// List every tool with its input schema
    List,
    /// Call a tool by name with JSON arguments
    Call(CallArgs),
}

#[derive(Args)]
pub struct CallArgs {
    /// Tool name, e.g. analyze_lease
    #[arg(long)]
    pub name: String,

    /// Path to JSON or YAML arguments file
    #[arg(long)]
    pub input: Option<String>,

    /// Inline JSON arguments
    #[arg(long)]
    pub args: Option<String>,
}

pub fn run_tools(args: ToolsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    match args.command {
        ToolsCommand::List => Ok(serde_json::to_value(tools::list_tools())?),
        ToolsCommand::Call(call) => {
            let arguments = resolve_body(call.input.as_deref(), || match call.args {
                Some(ref inline) => Ok(serde_json::from_str(inline)?),
                None => Err("--input <file>, --args '<json>' or stdin required for tools call".into()),
            })?;
            tracing::debug!(tool = %call.name, "calling tool");
            let result = tools::call_tool(&call.name, &arguments)?;
            Ok(serde_json::to_value(result)?)
        }
    }
}
