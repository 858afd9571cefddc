use chrono::{DateTime, Utc};

use super::Project;

/// Metadata computed from a loaded project for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    /// Backend identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Creation time, when the stored timestamp is representable.
    pub created: Option<DateTime<Utc>>,
    /// Number of proteins in the project.
    pub proteins: usize,
    /// Chains of the shown protein.
    pub chains: usize,
    /// Residues of the shown protein.
    pub residues: usize,
    /// Atoms of the shown protein.
    pub atoms: usize,
    /// Raw reconstruction level of the shown protein.
    pub reconstruction_level: Option<String>,
    /// Raw feature constants already computed.
    pub available_features: Vec<String>,
}

impl ProjectSummary {
    /// Summarize `project`, describing its first protein.
    #[must_use]
    pub fn of(project: &Project) -> Self {
        let protein = project.protein();
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            created: DateTime::from_timestamp_millis(project.date),
            proteins: project.proteins.len(),
            chains: protein.map_or(0, |p| p.chains.len()),
            residues: protein.map_or(0, |p| p.residues().count()),
            atoms: protein.map_or(0, super::Protein::atom_count),
            reconstruction_level: protein
                .and_then(|p| p.reconstruction_level.clone()),
            available_features: protein
                .map(|p| p.available_features.clone())
                .unwrap_or_default(),
        }
    }
}
