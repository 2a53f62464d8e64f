//! Preset management commands for Neurosim
//!
//! List the catalog as a table or JSON, show a single preset, and
//! demonstrate creation of a custom preset.

use crate::catalog::PresetCatalog;
use crate::error::Result;
use prettytable::{row, Table};

/// List available presets
///
/// # Arguments
///
/// * `catalog` - The catalog to list
/// * `json` - Print JSON instead of a table
pub fn list_presets(catalog: &PresetCatalog, json: bool) -> Result<()> {
    if json {
        let presets: Vec<_> = catalog.list().collect();
        println!("{}", serde_json::to_string_pretty(&presets)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row!["ID", "NAME", "CATEGORY", "DESCRIPTION", "SOURCE"]);
    for preset in catalog.list() {
        table.add_row(row![
            preset.id,
            preset.name,
            preset.category.to_string(),
            preset.description,
            if preset.builtin { "built-in" } else { "custom" },
        ]);
    }
    table.printstd();
    Ok(())
}

/// Show detailed information about a preset
///
/// Unknown ids resolve to the default preset, mirroring session behavior;
/// a note is printed when that happens.
pub fn show_preset(catalog: &PresetCatalog, id: &str) -> Result<()> {
    let preset = catalog.resolve(id);
    if preset.id != id {
        println!(
            "Preset '{}' not found; showing the default preset instead.",
            id
        );
    }

    println!("{} {} ({})", preset.category.glyph(), preset.name, preset.id);
    println!("  Category:    {}", preset.category);
    println!("  Description: {}", preset.description);
    println!(
        "  Source:      {}",
        if preset.builtin { "built-in" } else { "custom" }
    );
    Ok(())
}

/// Create a custom preset in a fresh catalog and print it
///
/// The catalog lives in memory only, so this demonstrates the creation
/// contract (generated id, default description) rather than persisting
/// anything.
pub fn create_preset(catalog: &mut PresetCatalog, name: &str, description: &str) -> Result<()> {
    let preset = catalog.create(name, description);
    println!("Created preset:");
    println!("{}", serde_json::to_string_pretty(&preset)?);
    println!("\nNote: presets live for the process lifetime only.");
    Ok(())
}
