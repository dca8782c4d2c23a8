use lazy_static::lazy_static;

use super::TransliterationMap;

const GENERAL_PAIRS: &[(char, &str)] = &[
    ('А', "A"),
    ('Б', "B"),
    ('В', "V"),
    ('Г', "G"),
    ('Д', "D"),
    ('Е', "E"),
    ('Ё', "E"),
    ('Ж', "ZH"),
    ('З', "Z"),
    ('И', "I"),
    ('Й', "Y"),
    ('К', "K"),
    ('Л', "L"),
    ('М', "M"),
    ('Н', "N"),
    ('О', "O"),
    ('П', "P"),
    ('Р', "R"),
    ('С', "S"),
    ('Т', "T"),
    ('У', "U"),
    ('Ф', "F"),
    ('Х', "KH"),
    ('Ц', "TS"),
    ('Ч', "CH"),
    ('Ш', "SH"),
    ('Щ', "SHCH"),
    ('Ы', "Y"),
    ('Ъ', "IE"),
    ('Ь', ""),
    ('Э', "E"),
    ('Ю', "IU"),
    ('Я', "IA"),
    ('а', "A"),
    ('б', "B"),
    ('в', "V"),
    ('г', "G"),
    ('д', "D"),
    ('е', "E"),
    ('ё', "E"),
    ('ж', "ZH"),
    ('з', "Z"),
    ('и', "I"),
    ('й', "Y"),
    ('к', "K"),
    ('л', "L"),
    ('м', "M"),
    ('н', "N"),
    ('о', "O"),
    ('п', "P"),
    ('р', "R"),
    ('с', "S"),
    ('т', "T"),
    ('у', "U"),
    ('ф', "F"),
    ('х', "KH"),
    ('ц', "TS"),
    ('ч', "CH"),
    ('ш', "SH"),
    ('щ', "SHCH"),
    ('ы', "Y"),
    ('ъ', "IE"),
    ('ь', ""),
    ('э', "E"),
    ('ю', "IU"),
    ('я', "IA"),
    ('№', "No"),
];

// Plate letters are the Cyrillic glyphs that look like Latin ones (ГОСТ Р 50577-2018).
const PLATE_PAIRS: &[(char, &str)] = &[
    ('А', "A"),
    ('В', "B"),
    ('Е', "E"),
    ('К', "K"),
    ('М', "M"),
    ('Н', "H"),
    ('О', "O"),
    ('Р', "P"),
    ('С', "C"),
    ('Т', "T"),
    ('У', "Y"),
    ('Х', "X"),
    ('а', "A"),
    ('в', "B"),
    ('е', "E"),
    ('к', "K"),
    ('м', "M"),
    ('н', "H"),
    ('о', "O"),
    ('р', "P"),
    ('с', "C"),
    ('т', "T"),
    ('у', "Y"),
    ('х', "X"),
];

lazy_static! {
    /// Full Russian alphabet, multi-letter output allowed.
    pub static ref GENERAL_TEXT: TransliterationMap = TransliterationMap::from_pairs(GENERAL_PAIRS);
    /// The twelve plate letters, one Latin letter each.
    pub static ref PLATE_GLYPHS: TransliterationMap = TransliterationMap::from_pairs(PLATE_PAIRS);
}
