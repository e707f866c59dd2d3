//! ASCII substitution table for non-ASCII characters.
//!
//! Many SMS gateways only accept the GSM-7 / ASCII range, so names with
//! accents or typographic symbols are rewritten before sending. The table is
//! applied in order; every source character appears exactly once.

/// Ordered `(source, replacement)` pairs.
#[rustfmt::skip]
pub const DEFAULT_CHAR_MAP: &[(char, &str)] = &[
    // Spanish
    ('ñ', "n"), ('Ñ', "N"),
    // French and other Western European
    ('à', "a"), ('á', "a"), ('â', "a"), ('ã', "a"), ('ä', "a"), ('å', "a"),
    ('À', "A"), ('Á', "A"), ('Â', "A"), ('Ã', "A"), ('Ä', "A"), ('Å', "A"),
    ('è', "e"), ('é', "e"), ('ê', "e"), ('ë', "e"),
    ('È', "E"), ('É', "E"), ('Ê', "E"), ('Ë', "E"),
    ('ì', "i"), ('í', "i"), ('î', "i"), ('ï', "i"),
    ('Ì', "I"), ('Í', "I"), ('Î', "I"), ('Ï', "I"),
    ('ò', "o"), ('ó', "o"), ('ô', "o"), ('õ', "o"), ('ö', "o"),
    ('Ò', "O"), ('Ó', "O"), ('Ô', "O"), ('Õ', "O"), ('Ö', "O"),
    ('ù', "u"), ('ú', "u"), ('û', "u"), ('ü', "u"),
    ('Ù', "U"), ('Ú', "U"), ('Û', "U"), ('Ü', "U"),
    ('ý', "y"), ('ÿ', "y"),
    ('Ý', "Y"), ('Ÿ', "Y"),
    ('ç', "c"), ('Ç', "C"),
    // German
    ('ß', "ss"),
    // Polish
    ('ą', "a"), ('ć', "c"), ('ę', "e"), ('ł', "l"), ('ń', "n"), ('ś', "s"), ('ź', "z"), ('ż', "z"),
    ('Ą', "A"), ('Ć', "C"), ('Ę', "E"), ('Ł', "L"), ('Ń', "N"), ('Ś', "S"), ('Ź', "Z"), ('Ż', "Z"),
    // Czech
    ('č', "c"), ('ď', "d"), ('ě', "e"), ('ň', "n"), ('ř', "r"), ('š', "s"), ('ť', "t"), ('ů', "u"),
    ('ž', "z"),
    ('Č', "C"), ('Ď', "D"), ('Ě', "E"), ('Ň', "N"), ('Ř', "R"), ('Š', "S"), ('Ť', "T"), ('Ů', "U"),
    ('Ž', "Z"),
    // Romanian
    ('ă', "a"), ('ș', "s"), ('ț', "t"),
    ('Ă', "A"), ('Ș', "S"), ('Ț', "T"),
    // Hungarian
    ('ő', "o"), ('ű', "u"),
    ('Ő', "O"), ('Ű', "U"),
    // Turkish
    ('ğ', "g"), ('ı', "i"), ('ş', "s"),
    ('Ğ', "G"), ('İ', "I"), ('Ş', "S"),
    // Scandinavian
    ('æ', "ae"), ('ø', "o"),
    ('Æ', "AE"), ('Ø', "O"),
    // Other Latin
    ('œ', "oe"), ('Œ', "OE"),
    ('ð', "d"), ('Ð', "D"),
    ('þ', "th"), ('Þ', "TH"),
    // Currency and symbols
    ('€', "EUR"), ('£', "GBP"), ('¥', "JPY"),
    ('°', "deg"), ('±', "+/-"), ('×', "x"), ('÷', "/"),
    ('©', "(c)"), ('®', "(R)"), ('™', "(TM)"),
    // Typographic quotes and punctuation
    ('\u{201C}', "\""), ('\u{201D}', "\""), ('\u{2018}', "'"), ('\u{2019}', "'"),
    ('–', "-"), ('—', "-"), ('…', "..."),
    // Mathematical symbols
    ('≤', "<="), ('≥', ">="), ('≠', "!="), ('≈', "~="),
    ('∞', "inf"), ('√', "sqrt"), ('∑', "sum"),
    // Greek
    ('α', "alpha"), ('β', "beta"), ('γ', "gamma"), ('δ', "delta"), ('ε', "epsilon"),
    ('ζ', "zeta"), ('η', "eta"), ('θ', "theta"), ('ι', "iota"), ('κ', "kappa"),
    ('λ', "lambda"), ('μ', "mu"), ('ν', "nu"), ('ξ', "xi"), ('ο', "omicron"),
    ('π', "pi"), ('ρ', "rho"), ('σ', "sigma"), ('τ', "tau"), ('υ', "upsilon"),
    ('φ', "phi"), ('χ', "chi"), ('ψ', "psi"), ('ω', "omega"),
    ('Α', "Alpha"), ('Β', "Beta"), ('Γ', "Gamma"), ('Δ', "Delta"), ('Ε', "Epsilon"),
    ('Ζ', "Zeta"), ('Η', "Eta"), ('Θ', "Theta"), ('Ι', "Iota"), ('Κ', "Kappa"),
    ('Λ', "Lambda"), ('Μ', "Mu"), ('Ν', "Nu"), ('Ξ', "Xi"), ('Ο', "Omicron"),
    ('Π', "Pi"), ('Ρ', "Rho"), ('Σ', "Sigma"), ('Τ', "Tau"), ('Υ', "Upsilon"),
    ('Φ', "Phi"), ('Χ', "Chi"), ('Ψ', "Psi"), ('Ω', "Omega"),
];
