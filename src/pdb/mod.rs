//! PDB text for the viewer: assembly from atom records and parsing back
//! into a queryable [`Structure`].
//!
//! The backend stores one PDB line per atom. The client joins them in
//! chain → residue → atom order; the result is positionally meaningful,
//! so the walk must never reorder anything.

mod structure;

#[cfg(test)]
pub(crate) use structure::tests::atom_line;
pub use structure::{
    Structure, StructureAtom, StructureChain, StructureResidue,
};

use crate::model::Protein;

/// Join every atom record of `protein`, each followed by a newline.
///
/// The output has exactly one line per atom. A protein without atoms
/// yields an empty string.
#[must_use]
pub fn assemble(protein: &Protein) -> String {
    let records = protein
        .residues()
        .flat_map(|(_, residue)| residue.atoms.iter())
        .map(|atom| atom.pdb_representation.as_str());
    let mut text = String::new();
    for record in records {
        text.push_str(record);
        text.push('\n');
    }
    text
}

/// Assemble the PDB text of `protein` and store it on the protein.
pub fn compose(protein: &mut Protein) {
    protein.pdb_representation = assemble(protein);
    log::debug!(
        "composed PDB text for '{}': {} bytes",
        protein.name,
        protein.pdb_representation.len()
    );
}
