//! Residue graph of a protein: sequence neighbours and spatial contacts.

use rustc_hash::FxHashMap;

use crate::model::Protein;
use crate::settings::amino_acid_group;

/// Weight of a spatial contact edge.
pub const CONTACT_WEIGHT: u8 = 1;
/// Weight of an edge between sequence neighbours.
pub const SEQUENTIAL_WEIGHT: u8 = 3;

/// One residue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactNode {
    /// `chain-aminoAcid-number`, e.g. `A-GLY-12`.
    pub name: String,
    /// Chain identifier.
    pub chain_id: String,
    /// PDB residue number.
    pub residue_number: i32,
    /// Amino acid colour group, when known.
    pub group: Option<u8>,
}

impl ContactNode {
    /// Qualified name of this residue's alpha carbon (`A.12.CA`).
    #[must_use]
    pub fn ca_name(&self) -> String {
        format!("{}.{}.CA", self.chain_id, self.residue_number)
    }
}

/// An undirected weighted edge between two node indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactLink {
    /// First node.
    pub source: usize,
    /// Second node.
    pub target: usize,
    /// [`CONTACT_WEIGHT`] or [`SEQUENTIAL_WEIGHT`].
    pub weight: u8,
}

impl ContactLink {
    /// Whether the edge is a spatial contact rather than chain adjacency.
    #[must_use]
    pub fn is_direct(&self) -> bool {
        self.weight <= CONTACT_WEIGHT
    }
}

/// Residues as nodes, sequence and contact relations as edges.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactGraph {
    /// One node per residue, in chain order.
    pub nodes: Vec<ContactNode>,
    /// Sequential edges first, then contacts in payload order.
    pub links: Vec<ContactLink>,
}

impl ContactGraph {
    /// Build the graph of `protein`.
    ///
    /// Contacts naming a residue id that is not in the protein are skipped.
    #[must_use]
    pub fn build(protein: &Protein) -> Self {
        let mut graph = Self::default();
        let mut by_id: FxHashMap<i32, usize> = FxHashMap::default();

        for chain in &protein.chains {
            let mut previous: Option<usize> = None;
            for residue in &chain.residues {
                let idx = graph.nodes.len();
                graph.nodes.push(ContactNode {
                    name: format!(
                        "{}-{}-{}",
                        chain.chain_id, residue.amino_acid, residue.residue_number
                    ),
                    chain_id: chain.chain_id.clone(),
                    residue_number: residue.residue_number,
                    group: amino_acid_group(&residue.amino_acid),
                });
                let _ = by_id.insert(residue.residue_id, idx);
                if let Some(prev) = previous {
                    graph.links.push(ContactLink {
                        source: idx,
                        target: prev,
                        weight: SEQUENTIAL_WEIGHT,
                    });
                }
                previous = Some(idx);
            }
        }

        for contact in &protein.contacts {
            let Some((a, b)) = contact.pair() else {
                log::warn!("skipping contact with {} partners", contact.partners.len());
                continue;
            };
            match (by_id.get(&a), by_id.get(&b)) {
                (Some(&source), Some(&target)) => graph.links.push(ContactLink {
                    source,
                    target,
                    weight: CONTACT_WEIGHT,
                }),
                _ => log::warn!("skipping contact {a}-{b}: unknown residue"),
            }
        }
        graph
    }

    /// Edges between spatially interacting residues.
    pub fn direct_links(&self) -> impl Iterator<Item = &ContactLink> {
        self.links.iter().filter(|l| l.is_direct())
    }
}
