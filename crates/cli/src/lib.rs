mod classify;
mod collect;

use clap::{ArgAction, Args, Parser, Subcommand};
use jlayout_api::OverrideEntry;
use jlayout_core::LayoutConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "jlayout",
    version,
    about = "Sorts resolved Java dependencies into module path and classpath directories",
    long_about = "jlayout reads a resolved dependency plan and places every archive according to \
                  how the module system will treat it: explicit modules, named automatic modules, \
                  or plain classpath jars. Each category is copied into its own directory."
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify every artifact of a plan and copy it into its category directory
    #[command(
        long_about = "Creates the configured output directories, then classifies and copies \
                            every artifact of the plan. Categories without a directory are \
                            classified but not copied. The first error aborts the run."
    )]
    Collect {
        #[command(flatten)]
        layout: LayoutArgs,

        /// Directory for explicit modules
        #[arg(long, value_name = "DIR")]
        modules_dir: Option<PathBuf>,

        /// Directory for named automatic modules
        #[arg(long, value_name = "DIR")]
        automatic_dir: Option<PathBuf>,

        /// Directory for classpath jars
        #[arg(long, value_name = "DIR")]
        classpath_dir: Option<PathBuf>,

        /// Process artifacts in parallel
        #[arg(long)]
        parallel: bool,
    },
    /// Show the category of every artifact without touching the filesystem
    Classify {
        #[command(flatten)]
        layout: LayoutArgs,
    },
}

/// Options shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    /// Resolved artifact plan (JSON)
    #[arg(long, value_name = "FILE")]
    pub plan: PathBuf,

    /// Configuration file (JSON); command line flags take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Force an artifact onto the classpath: group:artifact for any version,
    /// or group:artifact:version[:classifier] for one exact artifact
    #[arg(long = "classpath-artifact", value_name = "COORDINATE")]
    pub classpath_artifacts: Vec<OverrideEntry>,

    /// Local Maven repository used for plan entries without a path
    #[arg(long, value_name = "DIR")]
    pub repository: Option<PathBuf>,
}

impl LayoutArgs {
    /// Configuration file (if any) with command line values on top
    pub fn resolve_config(&self, cli: LayoutConfig) -> jlayout_core::Result<LayoutConfig> {
        let base = match &self.config {
            Some(path) => LayoutConfig::load(path)?,
            None => LayoutConfig::default(),
        };

        let cli = LayoutConfig {
            classpath_artifacts: self.classpath_artifacts.clone(),
            repository: self.repository.clone(),
            ..cli
        };
        Ok(base.merge(cli))
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = jlayout_runtime::init_logging("cli", cli.verbose);

    match cli.command {
        Commands::Collect {
            layout,
            modules_dir,
            automatic_dir,
            classpath_dir,
            parallel,
        } => {
            let config = layout.resolve_config(LayoutConfig {
                modules_dir,
                automatic_dir,
                classpath_dir,
                parallel,
                ..Default::default()
            })?;
            collect::run(&layout.plan, &config)
        }
        Commands::Classify { layout } => {
            let config = layout.resolve_config(LayoutConfig::default())?;
            classify::run(&layout.plan, &config)
        }
    }
}
