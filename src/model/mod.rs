//! Typed project payload returned by `GET /rest/project/{id}`.
//!
//! The backend serializes its project DTOs to JSON, sometimes wrapping the
//! document in a JSON string. [`Project::from_payload`] accepts both forms
//! and rejects anything that does not match these types.

mod summary;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize};

pub use summary::ProjectSummary;

use crate::error::PmwError;
use crate::rest::decode_json;

/// A modeling project: the unit created by a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Backend identifier of the project.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// Creation time in milliseconds since the Unix epoch.
    #[serde(default, deserialize_with = "nullable")]
    pub date: i64,
    /// Proteins in backend order. The first one is the one shown.
    #[serde(deserialize_with = "nullable")]
    pub proteins: Vec<Protein>,
}

/// A protein with its chains, contacts and optional membrane.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Protein {
    /// Short name.
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Descriptive title.
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    /// Residue count as reported by the backend.
    #[serde(deserialize_with = "nullable")]
    pub size: i32,
    /// Raw reconstruction level constant, e.g. `CALPHA`.
    pub reconstruction_level: Option<String>,
    /// Raw feature constants already computed for this protein.
    #[serde(deserialize_with = "nullable")]
    pub available_features: Vec<String>,
    /// Chains in file order.
    #[serde(deserialize_with = "nullable")]
    pub chains: Vec<Chain>,
    /// Membrane placement, when a topology feature was computed.
    pub membrane: Option<Membrane>,
    /// Residue-residue contacts.
    #[serde(deserialize_with = "nullable")]
    pub contacts: Vec<Interaction>,
    /// Typed residue interactions.
    #[serde(deserialize_with = "nullable")]
    pub interactions: Vec<Interaction>,
    /// Assembled PDB text. Written by [`crate::pdb::compose`].
    #[serde(deserialize_with = "nullable")]
    pub pdb_representation: String,
}

impl Protein {
    /// All residues across chains, in chain order.
    pub fn residues(&self) -> impl Iterator<Item = (&Chain, &Residue)> {
        self.chains
            .iter()
            .flat_map(|chain| chain.residues.iter().map(move |r| (chain, r)))
    }

    /// Total number of atoms across chains and residues.
    #[must_use]
    pub fn atom_count(&self) -> usize {
        self.residues().map(|(_, r)| r.atoms.len()).sum()
    }

    /// Whether the protein has atom coordinates to show.
    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        !self.pdb_representation.is_empty()
    }
}

/// One polypeptide chain.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Chain {
    /// Single-letter chain identifier.
    #[serde(deserialize_with = "nullable")]
    pub chain_id: String,
    /// Residues in sequence order.
    #[serde(deserialize_with = "nullable")]
    pub residues: Vec<Residue>,
}

/// One amino acid of a chain.
///
/// Sequence-only projects may omit the number and code; they read as
/// `0` and an empty string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Residue {
    /// Amino acid code as sent by the backend.
    #[serde(deserialize_with = "nullable")]
    pub amino_acid: String,
    /// PDB residue sequence number.
    #[serde(deserialize_with = "nullable")]
    pub residue_number: i32,
    /// Protein-wide residue key referenced by contacts.
    #[serde(deserialize_with = "nullable")]
    pub residue_id: i32,
    /// PDB insertion code.
    pub insertion_code: Option<String>,
    /// Per-residue feature values keyed by feature constant.
    #[serde(deserialize_with = "nullable")]
    pub features: FxHashMap<String, Vec<f64>>,
    /// Atoms in record order.
    #[serde(deserialize_with = "nullable")]
    pub atoms: Vec<Atom>,
}

/// One atom record. Only [`Atom::pdb_representation`] is used for
/// assembly; the rest is carried for display.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Atom {
    /// The full PDB `ATOM` line for this atom.
    #[serde(deserialize_with = "nullable")]
    pub pdb_representation: String,
    /// Atom name, e.g. `CA`.
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Element symbol.
    #[serde(deserialize_with = "nullable")]
    pub element: String,
    /// Serial number in the source PDB file.
    #[serde(deserialize_with = "nullable")]
    pub pdb_serial: i32,
    /// Occupancy.
    #[serde(deserialize_with = "nullable")]
    pub occupancy: f32,
    /// B-factor.
    #[serde(deserialize_with = "nullable")]
    pub temp_factor: f32,
    /// Cartesian coordinates, when known.
    pub xyz: Option<[f64; 3]>,
}

/// Membrane placement computed by the topology feature.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Membrane {
    /// Positions of the pseudo-atoms forming the membrane slabs.
    #[serde(deserialize_with = "nullable")]
    pub membrane_molecules: Vec<[f64; 3]>,
    /// Center of mass of the protein used for placement.
    pub center_of_mass: Option<[f64; 3]>,
    /// Membrane normal.
    pub normal_vector: Option<[f64; 3]>,
    /// Point on the first membrane plane.
    pub plane_point1: Option<[f64; 3]>,
    /// Point on the second membrane plane.
    pub plane_point2: Option<[f64; 3]>,
    /// Point on the enclosing sphere.
    pub sphere_point: Option<[f64; 3]>,
}

/// A pairwise residue interaction. `partners` hold residue ids.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Interaction {
    /// The interacting residue ids.
    #[serde(default, deserialize_with = "nullable")]
    pub partners: Vec<i32>,
    /// Raw interaction type constant.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl Interaction {
    /// The two partners, when exactly two are given.
    #[must_use]
    pub fn pair(&self) -> Option<(i32, i32)> {
        match self.partners.as_slice() {
            [a, b] => Some((*a, *b)),
            _ => None,
        }
    }
}

/// Read `null` as the field's default. The backend serializes unset
/// object fields as `null` rather than omitting them.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Project {
    /// Decode a project response body.
    ///
    /// The body is either the project object itself or a JSON string whose
    /// content is the project object. A project without proteins is an
    /// error.
    pub fn from_payload(body: &str) -> Result<Self, PmwError> {
        let project: Self = decode_json(body)?;
        if project.proteins.is_empty() {
            return Err(PmwError::EmptyProject(project.id));
        }
        Ok(project)
    }

    /// The protein shown by the client.
    #[must_use]
    pub fn protein(&self) -> Option<&Protein> {
        self.proteins.first()
    }

    /// Mutable access to the shown protein.
    pub fn protein_mut(&mut self) -> Option<&mut Protein> {
        self.proteins.first_mut()
    }
}
