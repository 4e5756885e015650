//! Normalizer: folds competitor names into a canonical comparison form.
//!
//! Folding is: lowercase, substitute every letter in the diacritic table with
//! its base Latin letter, trim. Nothing else is touched; internal
//! punctuation and spacing survive as scraped.

/// Diacritic letters and their base Latin letters, both cases.
static FOLD: phf::Map<char, char> = phf::phf_map! {
    // Romanian, including the legacy cedilla forms
    'ă' => 'a', 'Ă' => 'A', 'â' => 'a', 'Â' => 'A', 'î' => 'i', 'Î' => 'I',
    'ș' => 's', 'Ș' => 'S', 'ş' => 's', 'Ş' => 'S',
    'ț' => 't', 'Ț' => 'T', 'ţ' => 't', 'Ţ' => 'T',
    // Latin-1
    'á' => 'a', 'Á' => 'A', 'à' => 'a', 'À' => 'A', 'ä' => 'a', 'Ä' => 'A', 'ã' => 'a', 'Ã' => 'A', 'å' => 'a', 'Å' => 'A',
    'é' => 'e', 'É' => 'E', 'è' => 'e', 'È' => 'E', 'ê' => 'e', 'Ê' => 'E', 'ë' => 'e', 'Ë' => 'E',
    'í' => 'i', 'Í' => 'I', 'ì' => 'i', 'Ì' => 'I', 'ï' => 'i', 'Ï' => 'I',
    'ó' => 'o', 'Ó' => 'O', 'ò' => 'o', 'Ò' => 'O', 'ô' => 'o', 'Ô' => 'O', 'ö' => 'o', 'Ö' => 'O', 'õ' => 'o', 'Õ' => 'O', 'ø' => 'o', 'Ø' => 'O',
    'ú' => 'u', 'Ú' => 'U', 'ù' => 'u', 'Ù' => 'U', 'û' => 'u', 'Û' => 'U', 'ü' => 'u', 'Ü' => 'U',
    'ñ' => 'n', 'Ñ' => 'N', 'ç' => 'c', 'Ç' => 'C', 'ý' => 'y', 'Ý' => 'Y',
    // Latin Extended-A
    'č' => 'c', 'Č' => 'C', 'ć' => 'c', 'Ć' => 'C', 'ď' => 'd', 'Ď' => 'D', 'đ' => 'd', 'Đ' => 'D',
    'ě' => 'e', 'Ě' => 'E', 'ę' => 'e', 'Ę' => 'E', 'ğ' => 'g', 'Ğ' => 'G', 'ı' => 'i', 'İ' => 'I',
    'ł' => 'l', 'Ł' => 'L', 'ń' => 'n', 'Ń' => 'N', 'ň' => 'n', 'Ň' => 'N', 'ő' => 'o', 'Ő' => 'O',
    'ř' => 'r', 'Ř' => 'R', 'ś' => 's', 'Ś' => 'S', 'š' => 's', 'Š' => 'S', 'ť' => 't', 'Ť' => 'T',
    'ů' => 'u', 'Ů' => 'U', 'ű' => 'u', 'Ű' => 'U', 'ź' => 'z', 'Ź' => 'Z', 'ż' => 'z', 'Ż' => 'Z',
    'ž' => 'z', 'Ž' => 'Z', 'ą' => 'a', 'Ą' => 'A',
};

/// Fold a single character through the diacritic table.
pub fn fold_char(c: char) -> char {
    FOLD.get(&c).copied().unwrap_or(c)
}

/// Lowercase, fold and trim `name`.
pub fn normalize(name: &str) -> String {
    // Folding first keeps `İ` from lowercasing into `i` plus a combining dot.
    name.chars()
        .map(fold_char)
        .flat_map(char::to_lowercase)
        .map(fold_char)
        .collect::<String>()
        .trim()
        .to_string()
}

/// A competitor name in canonical comparison form.
///
/// Built only through [`NormalizedName::new`], so every value has already
/// been folded; comparing two of them is diacritic- and case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedName(String);

impl NormalizedName {
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
