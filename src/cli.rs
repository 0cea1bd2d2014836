// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "table-configurator")]
#[command(about = "Headless parametric table configurator", long_about = None)]
pub struct Cli {
    /// JSON config file (thickness, ranges, catalog, initial configuration)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory that relative accessory refs are resolved against
    #[arg(long = "asset-root")]
    pub asset_root: Option<PathBuf>,

    /// Parameter edit applied after the initial configuration, e.g.
    /// `--set width=1800 --set accessory="Type 2"`
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<String>,

    /// Print the final scene summary as JSON
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Print the accessory catalog and exit
    #[arg(long = "list-accessories", default_value = "false")]
    pub list_accessories: bool,

    /// Disable console output other than logging
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}
