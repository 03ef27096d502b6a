use anyhow::{Context, Result};
use curate::config::{Config, DEFAULT_CONFIG_FILE};
use std::path::PathBuf;

pub fn init_config(path: PathBuf) -> Result<()> {
    let config_path = path.join(DEFAULT_CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{} already exists", config_path.display());
    }

    std::fs::create_dir_all(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let content = format!(
        "# Curation configuration\n#\n# Every key is optional; removed keys fall back to the values below.\n\n{}",
        Config::default().to_toml()?
    );
    std::fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created configuration at: {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Point [store] root at the repository holding the catalog");
    println!("  2. Run: curate check-pending --report");
    Ok(())
}
