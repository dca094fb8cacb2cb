//! Source converters from the single-character dialects to the
//! three-digit opcode dialect.

/// Placeholder emitted for symbols with no three-digit equivalent. It is
/// not an opcode, so preprocessing strips it like any other junk.
const UNMAPPED: &str = "...";

/// Convert Loose Circular Brainfuck source to three-digit opcodes.
pub fn lcbf_to_ragaraja(source: &str) -> String {
    source
        .chars()
        .map(|symbol| match symbol {
            '>' => "000",
            '<' => "004",
            '+' => "008",
            '-' => "011",
            '.' => "020",
            ',' => "063",
            '[' => "014",
            ']' => "015",
            _ => UNMAPPED,
        })
        .collect()
}

/// Convert NucleotideBF source to three-digit opcodes. The ambiguity
/// codes map onto their equally ambiguous numeric equivalents, so a
/// translated program is just as nondeterministic as its original.
pub fn nbf_to_ragaraja(source: &str) -> String {
    source
        .chars()
        .map(|symbol| match symbol {
            'G' => "000",
            'C' => "004",
            'A' => "008",
            'T' => "011",
            '.' => "020",
            'R' => "050",
            'Y' => "051",
            'S' => "052",
            'W' => "053",
            'K' => "054",
            'M' => "055",
            'B' => "056",
            'D' => "057",
            'H' => "058",
            'V' => "059",
            'N' => "060",
            _ => UNMAPPED,
        })
        .collect()
}
