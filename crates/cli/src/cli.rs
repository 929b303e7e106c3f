use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{list_command, test_command};

#[derive(Parser, Debug)]
#[command(name = "pod-testing")]
#[command(version, about = "Run the unit tests of a pod checkout", long_about = None)]
pub struct Cli {
    /// Directory to search instead of the current one
    #[arg(long, global = true)]
    pub cwd: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build and test every unit-test target found in the checkout
    #[command(visible_alias = "t")]
    Test {
        /// Print the build commands without executing them
        #[arg(short, long)]
        dry_run: bool,

        /// Show the build driver's raw output instead of formatting it
        #[arg(short, long)]
        verbose: bool,

        /// Extra build actions to run after the defaults (e.g. analyze).
        ///
        /// Everything from the first action on is passed to the build driver,
        /// so --dry-run and --verbose must come before any action.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        actions: Vec<String>,
    },
    /// List the test targets and schemes that would be run
    #[command(visible_alias = "l")]
    List {
        /// Print the matches as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        self.command.execute(self.cwd.as_deref())
    }
}

impl Commands {
    pub fn execute(self, cwd: Option<&str>) -> Result<()> {
        match self {
            Commands::Test {
                dry_run,
                verbose,
                actions,
            } => test_command(cwd, dry_run, verbose, actions),
            Commands::List { json } => list_command(cwd, json),
        }
    }
}
