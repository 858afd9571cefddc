//! Queryable structure read from PDB text through `pdbtbx`.

use std::io::BufReader;

use glam::{DVec3, Vec3};
use pdbtbx::{Format, PDBError, ReadOptions, StrictnessLevel, PDB};
use rustc_hash::FxHashMap;

use crate::error::PmwError;
use crate::secondary_structure::SsKind;

/// One parsed atom.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureAtom {
    /// Atom serial number.
    pub serial: i32,
    /// Atom name, trimmed (`CA`).
    pub name: String,
    /// Element symbol.
    pub element: String,
    /// Cartesian position in Angstroms.
    pub position: Vec3,
    /// Whether the record was `HETATM`.
    pub hetero: bool,
}

/// One parsed residue.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureResidue {
    /// Three-letter residue name.
    pub name: String,
    /// Residue sequence number.
    pub number: i32,
    /// Insertion code, if any.
    pub insertion_code: Option<char>,
    /// Atoms in record order.
    pub atoms: Vec<StructureAtom>,
    /// Assigned secondary structure. [`SsKind::Coil`] until assigned.
    pub ss: SsKind,
}

impl StructureResidue {
    /// Atom called `name`.
    #[must_use]
    pub fn atom(&self, name: &str) -> Option<&StructureAtom> {
        self.atoms.iter().find(|a| a.name == name)
    }

    /// Position of the alpha carbon.
    #[must_use]
    pub fn ca(&self) -> Option<Vec3> {
        self.atom("CA").map(|a| a.position)
    }
}

/// One parsed chain.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureChain {
    /// Chain identifier.
    pub id: String,
    /// Residues in record order.
    pub residues: Vec<StructureResidue>,
}

/// A parsed structure with atom lookup by qualified name.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    chains: Vec<StructureChain>,
    /// `chain.residue.atom` → (chain, residue, atom) indices.
    index: FxHashMap<String, (usize, usize, usize)>,
}

fn qualified_name(chain: &str, residue: i32, atom: &str) -> String {
    format!("{chain}.{residue}.{atom}")
}

fn parse_error(errors: &[PDBError]) -> PmwError {
    let messages: Vec<String> =
        errors.iter().map(ToString::to_string).collect();
    PmwError::StructureParse(messages.join("; "))
}

fn to_i32<T: TryInto<i32> + Copy + std::fmt::Display>(
    value: T,
    what: &str,
) -> Result<i32, PmwError> {
    value.try_into().map_err(|_| {
        PmwError::StructureParse(format!("{what} {value} out of range"))
    })
}

impl StructureAtom {
    fn from_pdbtbx(atom: &pdbtbx::Atom) -> Result<Self, PmwError> {
        let name = atom.name().trim().to_owned();
        let element = atom.element().map_or_else(
            || {
                name.chars()
                    .find(char::is_ascii_alphabetic)
                    .map(String::from)
                    .unwrap_or_default()
            },
            |e| e.symbol().to_owned(),
        );
        let (x, y, z) = atom.pos();
        Ok(Self {
            serial: to_i32(atom.serial_number(), "atom serial")?,
            name,
            element,
            position: DVec3::new(x, y, z).as_vec3(),
            hetero: atom.hetero(),
        })
    }
}

impl StructureResidue {
    fn from_pdbtbx(residue: &pdbtbx::Residue) -> Result<Self, PmwError> {
        Ok(Self {
            name: residue.name().unwrap_or_default().to_owned(),
            number: to_i32(residue.serial_number(), "residue number")?,
            insertion_code: residue
                .insertion_code()
                .and_then(|code| code.chars().next()),
            atoms: residue
                .atoms()
                .map(StructureAtom::from_pdbtbx)
                .collect::<Result<_, _>>()?,
            ss: SsKind::Coil,
        })
    }
}

impl Structure {
    /// Parse PDB text with `pdbtbx` in loose mode. Only the first model is
    /// read. Empty text yields an empty structure.
    pub fn parse(text: &str) -> Result<Self, PmwError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let (pdb, warnings) = ReadOptions::default()
            .set_format(Format::Pdb)
            .set_level(StrictnessLevel::Loose)
            .read_raw(BufReader::new(text.as_bytes()))
            .map_err(|errors| parse_error(&errors))?;
        for warning in &warnings {
            log::debug!("PDB warning: {warning}");
        }
        let structure = Self::from_pdb(&pdb)?;
        log::debug!(
            "parsed structure: {} chains, {} residues, {} atoms",
            structure.chains.len(),
            structure.residue_count(),
            structure.atom_count()
        );
        Ok(structure)
    }

    /// Copy the first model of `pdb` and index its atoms.
    pub fn from_pdb(pdb: &PDB) -> Result<Self, PmwError> {
        let mut structure = Self::default();
        for chain in pdb.chains() {
            let residues = chain
                .residues()
                .map(StructureResidue::from_pdbtbx)
                .collect::<Result<_, _>>()?;
            structure.push_chain(StructureChain {
                id: chain.id().to_owned(),
                residues,
            });
        }
        Ok(structure)
    }

    fn push_chain(&mut self, chain: StructureChain) {
        let c = self.chains.len();
        for (r, residue) in chain.residues.iter().enumerate() {
            for (a, atom) in residue.atoms.iter().enumerate() {
                let _ = self
                    .index
                    .entry(qualified_name(&chain.id, residue.number, &atom.name))
                    .or_insert((c, r, a));
            }
        }
        self.chains.push(chain);
    }

    /// Chains in record order.
    #[must_use]
    pub fn chains(&self) -> &[StructureChain] {
        &self.chains
    }

    pub(crate) fn chains_mut(&mut self) -> &mut [StructureChain] {
        &mut self.chains
    }

    /// Every residue, in chain order.
    pub fn residues(&self) -> impl Iterator<Item = &StructureResidue> {
        self.chains.iter().flat_map(|c| c.residues.iter())
    }

    /// Every atom, in record order.
    pub fn atoms(&self) -> impl Iterator<Item = &StructureAtom> {
        self.residues().flat_map(|r| r.atoms.iter())
    }

    /// Look up an atom by `chain.residueNumber.atomName`, e.g. `A.12.CA`.
    #[must_use]
    pub fn atom(&self, qualified: &str) -> Option<&StructureAtom> {
        let &(c, r, a) = self.index.get(qualified)?;
        self.chains.get(c)?.residues.get(r)?.atoms.get(a)
    }

    /// Look up an atom by its parts.
    #[must_use]
    pub fn atom_at(
        &self,
        chain: &str,
        residue: i32,
        name: &str,
    ) -> Option<&StructureAtom> {
        self.atom(&qualified_name(chain, residue, name))
    }

    /// Total number of atoms.
    #[must_use]
    pub fn atom_count(&self) -> usize {
        self.residues().map(|r| r.atoms.len()).sum()
    }

    /// Total number of residues.
    #[must_use]
    pub fn residue_count(&self) -> usize {
        self.chains.iter().map(|c| c.residues.len()).sum()
    }

    /// Whether no atoms were read.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atom_count() == 0
    }

    /// Mean atom position; `None` for an empty structure.
    #[must_use]
    pub fn centroid(&self) -> Option<Vec3> {
        let count = self.atom_count();
        if count == 0 {
            return None;
        }
        let sum: Vec3 = self.atoms().map(|a| a.position).sum();
        Some(sum / count as f32)
    }

    /// Largest distance from `center` to any atom.
    #[must_use]
    pub fn bounding_radius(&self, center: Vec3) -> f32 {
        self.atoms()
            .map(|a| a.position.distance(center))
            .fold(0.0, f32::max)
    }
}
