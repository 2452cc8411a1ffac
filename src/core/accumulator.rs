//! Dependency accumulation.
//!
//! Merges declaration batches into per-manager pending groups. Routing an
//! unknown tag is a configuration error, so accumulation fails fast —
//! unlike the install pipeline, which isolates failures per group.

use crate::core::types::{DeclarationBatch, DependencyDeclaration, DependencyGroup};
use crate::error::Result;
use crate::managers::ManagerRegistry;

pub struct DependencyAccumulator<'r> {
    registry: &'r ManagerRegistry,
    groups: Vec<DependencyGroup>,
}

impl<'r> DependencyAccumulator<'r> {
    pub fn new(registry: &'r ManagerRegistry) -> Self {
        Self {
            registry,
            groups: Vec::new(),
        }
    }

    pub fn add_batch(&mut self, batch: &DeclarationBatch) -> Result<()> {
        for declaration in &batch.declarations {
            self.add_declaration(declaration)?;
        }
        Ok(())
    }

    /// Route one declaration through the registry and append its names to
    /// the group keyed by the resolved manager kind (not the raw tag, so
    /// two tags claimed by the same manager merge into one group). Names
    /// are appended verbatim; duplicates are weeded out later by the
    /// per-name installed-check.
    pub fn add_declaration(&mut self, declaration: &DependencyDeclaration) -> Result<()> {
        let kind = self.registry.resolve(&declaration.tag)?.kind();
        let names = declaration.names.iter().cloned();

        match self.groups.iter_mut().find(|g| g.kind == kind) {
            Some(group) => group.pending.extend(names),
            None => {
                let mut group = DependencyGroup::new(kind);
                group.pending.extend(names);
                self.groups.push(group);
            }
        }

        Ok(())
    }

    /// Groups in first-reference order.
    pub fn into_groups(self) -> Vec<DependencyGroup> {
        self.groups
    }
}

pub fn accumulate(
    registry: &ManagerRegistry,
    batches: &[DeclarationBatch],
) -> Result<Vec<DependencyGroup>> {
    let mut accumulator = DependencyAccumulator::new(registry);
    for batch in batches {
        accumulator.add_batch(batch)?;
    }
    Ok(accumulator.into_groups())
}
