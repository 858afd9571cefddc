//! Secondary structure assignment from Cα geometry.
//!
//! Helices and strands are recognised from Cα-Cα distances alone, which is
//! all a Cα-only reconstruction offers. Runs that are too short to be real
//! elements are dropped.

use glam::Vec3;

use crate::pdb::Structure;

/// Helix: Cα(i)-Cα(i+3) window in Angstroms.
const HELIX_I3: (f32, f32) = (4.5, 6.0);
/// Helix: Cα(i)-Cα(i+4) window in Angstroms.
const HELIX_I4: (f32, f32) = (5.0, 7.0);
/// Strand: consecutive Cα distance window.
const STRAND_I1: (f32, f32) = (3.5, 4.1);
/// Strand: Cα(i)-Cα(i+2) window for an extended backbone.
const STRAND_I2: (f32, f32) = (6.0, 8.0);
/// Shortest helix kept after smoothing.
const MIN_HELIX_RUN: usize = 4;
/// Shortest strand kept after smoothing.
const MIN_SHEET_RUN: usize = 3;
/// Residues added after a helix run to cover its last turn.
const HELIX_TAIL: usize = 3;

/// Secondary structure class of one residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SsKind {
    /// Alpha helix.
    Helix,
    /// Beta strand.
    Sheet,
    /// Anything else.
    #[default]
    Coil,
}

fn within(d: f32, (lo, hi): (f32, f32)) -> bool {
    (lo..=hi).contains(&d)
}

fn classify(ca: &[Vec3], i: usize) -> SsKind {
    let n = ca.len();
    if i + 4 < n
        && within(ca[i].distance(ca[i + 3]), HELIX_I3)
        && within(ca[i].distance(ca[i + 4]), HELIX_I4)
    {
        return SsKind::Helix;
    }
    if i + 2 < n
        && within(ca[i].distance(ca[i + 1]), STRAND_I1)
        && within(ca[i].distance(ca[i + 2]), STRAND_I2)
    {
        return SsKind::Sheet;
    }
    SsKind::Coil
}

/// Maximal runs of `kind` in `raw` as half-open ranges.
fn runs(raw: &[SsKind], kind: SsKind) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, &ss) in raw.iter().enumerate() {
        match (ss == kind, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                out.push((s, i));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push((s, raw.len()));
    }
    out
}

/// Classify each residue of one chain from its Cα positions.
///
/// Returns one entry per position. Chains shorter than four residues are
/// all coil.
#[must_use]
pub fn detect_secondary_structure(ca: &[Vec3]) -> Vec<SsKind> {
    let n = ca.len();
    let mut smoothed = vec![SsKind::Coil; n];
    if n < 4 {
        return smoothed;
    }
    let raw: Vec<SsKind> = (0..n).map(|i| classify(ca, i)).collect();

    for (start, end) in runs(&raw, SsKind::Helix) {
        if end - start >= MIN_HELIX_RUN {
            let tail = (end + HELIX_TAIL).min(n);
            smoothed[start..tail].fill(SsKind::Helix);
        }
    }

    // Strand runs must not overlap an extended helix.
    let strand_raw: Vec<SsKind> = raw
        .iter()
        .zip(&smoothed)
        .map(|(&r, &s)| if s == SsKind::Helix { SsKind::Coil } else { r })
        .collect();
    for (start, end) in runs(&strand_raw, SsKind::Sheet) {
        if end - start >= MIN_SHEET_RUN {
            smoothed[start..end].fill(SsKind::Sheet);
        }
    }
    smoothed
}

/// Assign helix/sheet/coil to every residue of `structure`, chain by chain.
///
/// Residues without a Cα stay coil and do not break the chain's run.
pub fn assign_helix_sheet(structure: &mut Structure) {
    for chain in structure.chains_mut() {
        let with_ca: Vec<(usize, Vec3)> = chain
            .residues
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.ca().map(|p| (i, p)))
            .collect();
        let positions: Vec<Vec3> = with_ca.iter().map(|&(_, p)| p).collect();
        let classes = detect_secondary_structure(&positions);
        for residue in &mut chain.residues {
            residue.ss = SsKind::Coil;
        }
        for (&(i, _), ss) in with_ca.iter().zip(classes) {
            chain.residues[i].ss = ss;
        }
    }
}
