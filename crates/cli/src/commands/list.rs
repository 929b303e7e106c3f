use anyhow::{Context, Result};
use pod_testing_core::{Config, TestRunner};
use tracing::debug;

use crate::display::print_test_match;
use crate::utils::resolve_project_root;

pub fn list_command(cwd: Option<&str>, json: bool) -> Result<()> {
    let project_root = resolve_project_root(cwd)?;
    debug!("Listing test targets under {}", project_root.display());

    let config = Config::load(&project_root).context("Failed to load configuration")?;
    let runner = TestRunner::new(config);
    let matches = runner.discover(&project_root)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("❌ No suitable test targets found");
        return Ok(());
    }

    println!("🔍 Found {} test target(s):", matches.len());
    for test in &matches {
        println!();
        print_test_match(test, &project_root);
    }
    Ok(())
}
