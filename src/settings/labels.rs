//! Text filters applied to server constants and residue codes.

/// Insert a space before every uppercase letter, then lower-case.
///
/// `ballsAndSticks` becomes `balls and sticks`. A leading capital does not
/// produce a leading space.
#[must_use]
pub fn split_at_uppercase(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    for c in input.chars() {
        if c.is_uppercase() && !out.is_empty() {
            out.push(' ');
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// Replace every underscore with a space.
#[must_use]
pub fn replace_underscores(input: &str) -> String {
    input.replace('_', " ")
}

/// One-letter code for a three-letter amino acid code; `X` when unknown.
#[must_use]
pub fn one_letter_code(three: &str) -> char {
    match three.to_ascii_uppercase().as_str() {
        "ALA" => 'A',
        "ARG" => 'R',
        "ASN" => 'N',
        "ASP" => 'D',
        "CYS" => 'C',
        "GLN" => 'Q',
        "GLU" => 'E',
        "GLY" => 'G',
        "HIS" => 'H',
        "ILE" => 'I',
        "LEU" => 'L',
        "LYS" => 'K',
        "MET" => 'M',
        "PHE" => 'F',
        "PRO" => 'P',
        "SER" => 'S',
        "THR" => 'T',
        "TRP" => 'W',
        "TYR" => 'Y',
        "VAL" => 'V',
        _ => 'X',
    }
}

const GROUP_ORDER: &str = "ARNDCQEGHILKMFPSTWYV";

/// Stable colour group (1..=20) of an amino acid, so the same residue type
/// is coloured the same regardless of sequence order.
///
/// Accepts one-letter or three-letter codes.
#[must_use]
pub fn amino_acid_group(code: &str) -> Option<u8> {
    let letter = match code.len() {
        1 => code.chars().next()?.to_ascii_uppercase(),
        3 => one_letter_code(code),
        _ => return None,
    };
    GROUP_ORDER
        .chars()
        .position(|c| c == letter)
        .and_then(|i| u8::try_from(i + 1).ok())
}

/// Typographic label for helix class names (`alpha helix` → `α-helix`).
#[must_use]
pub fn helix_label(input: &str) -> String {
    input
        .replacen("pi", "\u{03C0}-", 1)
        .replacen("alpha ", "\u{03B1}-", 1)
        .replacen("three10", "3-10-", 1)
}
