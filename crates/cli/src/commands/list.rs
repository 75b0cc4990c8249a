use anyhow::Result;
use winfont_core::{FontRegistry, Scope, registrations};

pub fn list(registry: &dyn FontRegistry, scope: Scope) -> Result<()> {
    let entries = registrations(registry, scope)?;
    if entries.is_empty() {
        println!("No fonts registered at {scope} scope");
        return Ok(());
    }

    let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    for entry in &entries {
        println!("{:width$}  {}", entry.name, entry.value);
    }
    println!("\n{} fonts registered at {scope} scope", entries.len());
    Ok(())
}
