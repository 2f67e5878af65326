//! `parley config` — Configuration management commands.

use parley_config::{AppConfig, AssemblyLayout};

pub fn validate(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Validating configuration...");

    if let Err(e) = config.validate() {
        println!("   Config error: {e}");
        return Err(e.into());
    }
    println!("   Config parsed successfully");

    let mut warnings = Vec::new();

    if config.store.backend == "file" && !config.store_path().exists() {
        warnings.push(format!(
            "Store file {} does not exist yet; admin prompts and rules will be empty",
            config.store_path().display()
        ));
    }

    if config.store.backend == "in_memory" {
        warnings.push("The in_memory store starts empty on every run".to_string());
    }

    if warnings.is_empty() {
        println!("   All checks passed");
    } else {
        println!();
        for w in &warnings {
            println!("   Warning: {w}");
        }
    }

    let layout = match config.assembly.layout {
        AssemblyLayout::Layered => "layered",
        AssemblyLayout::MergedSystemPrompt => "merged_system_prompt",
    };

    println!();
    println!("   History:  {} message(s)", config.assembly.history_limit);
    println!("   Layout:   {layout}");
    println!("   Store:    {}", config.store.backend);

    Ok(())
}

pub fn show(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

pub fn path() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = AppConfig::config_dir().join("config.toml");
    println!("{}", config_path.display());
    Ok(())
}
