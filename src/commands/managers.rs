//! Managers Command
//!
//! Lists the registration table in dispatch order, with each manager's
//! capabilities and availability on this host.

use crate::config::settings::Settings;
use crate::error::Result;
use crate::managers::ManagerRegistry;
use crate::ui;

pub fn run(settings: &Settings) -> Result<()> {
    let registry = ManagerRegistry::with_defaults(settings);

    ui::header("Registered package managers");
    for manager in registry.iter() {
        let descriptor = manager.descriptor();

        let mut traits: Vec<&str> = Vec::new();
        if descriptor.resolves_transitively {
            traits.push("transitive resolution");
        }
        if descriptor.can_bootstrap {
            traits.push("self-bootstrap");
        }
        let traits = if traits.is_empty() {
            "no extra capabilities".to_string()
        } else {
            traits.join(", ")
        };

        let availability = if manager.is_available() {
            "available"
        } else {
            "not found on this host"
        };

        ui::info(&format!("{}: {} ({})", descriptor.kind, traits, availability));
    }

    Ok(())
}
