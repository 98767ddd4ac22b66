// shared/src/driver.rs
//
// Full driver name -> three letter code used by the analytics API.

use serde::{Deserialize, Serialize};
use std::fmt;

const CODE_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverCode(String);

impl DriverCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DriverCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DriverCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derive the three letter code for a full driver name.
///
/// Takes the three characters after the first space ("Max Verstappen" -> "VER"),
/// or the first three characters when no surname of that length exists.
/// Accented letters fold to ASCII and other non-word characters are dropped.
/// When folding leaves the code short the source widens to the rest of the
/// surname, then the whole name, then pads with `X`.
///
/// Returns `None` when the name holds no word character at all. Codes are not
/// guaranteed unique across a roster.
pub fn name_to_code(full_name: &str) -> Option<DriverCode> {
    let chars: Vec<char> = full_name.chars().collect();
    let space = chars.iter().position(|c| *c == ' ');

    let primary = match space {
        Some(i) if chars.len() - (i + 1) >= CODE_LEN => &chars[i + 1..i + 1 + CODE_LEN],
        _ => &chars[..chars.len().min(CODE_LEN)],
    };

    let mut code = normalize(primary);

    if code.len() < CODE_LEN
        && let Some(i) = space
    {
        code = widen(code, &chars[i + 1..]);
    }
    if code.len() < CODE_LEN {
        code = widen(code, &chars);
    }

    if code.is_empty() {
        return None;
    }
    while code.len() < CODE_LEN {
        code.push('X');
    }
    code.truncate(CODE_LEN);
    Some(DriverCode(code))
}

fn widen(current: String, source: &[char]) -> String {
    let candidate = normalize(source);
    if candidate.len() > current.len() {
        candidate
    } else {
        current
    }
}

fn normalize(chars: &[char]) -> String {
    chars
        .iter()
        .flat_map(|c| c.to_uppercase())
        .map(fold_accent)
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ą' => 'A',
        'Ç' | 'Ć' | 'Č' => 'C',
        'È' | 'É' | 'Ê' | 'Ë' | 'Ę' | 'Ě' => 'E',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'Ł' => 'L',
        'Ñ' | 'Ń' => 'N',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => 'O',
        'Š' | 'Ś' => 'S',
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ů' => 'U',
        'Ý' | 'Ÿ' => 'Y',
        'Ž' | 'Ź' | 'Ż' => 'Z',
        other => other,
    }
}

/// `{code}_{year}`, the key the charts and colour lookups share.
pub fn driver_year_key(code: &str, year: &str) -> String {
    format!("{code}_{year}")
}

/// Split a driver-year key into `(code, year)`.
///
/// The API emits both `VER_2023` and `2023_VER`; a four digit leading part is
/// treated as the year.
pub fn split_driver_year(key: &str) -> Option<(&str, &str)> {
    let (a, b) = key.split_once('_')?;
    if a.is_empty() || b.is_empty() {
        return None;
    }
    if a.len() == 4 && a.chars().all(|c| c.is_ascii_digit()) {
        Some((b, a))
    } else {
        Some((a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn code(name: &str) -> String {
        name_to_code(name).map(|c| c.to_string()).unwrap_or_default()
    }

    #[test]
    fn surname_prefix_is_used() {
        assert_eq!(code("Max Verstappen"), "VER");
        assert_eq!(code("Lando Norris"), "NOR");
        assert_eq!(code("Charles Leclerc"), "LEC");
    }

    #[test]
    fn accents_are_folded() {
        assert_eq!(code("Sergio Pérez"), "PER");
        assert_eq!(code("Nico Hülkenberg"), "HUL");
        assert_eq!(code("Kimi Räikkönen"), "RAI");
        assert_eq!(code("Éric Élan"), "ELA");
    }

    #[test]
    fn short_or_missing_surname_uses_first_letters() {
        assert_eq!(code("Zhou"), "ZHO");
        assert_eq!(code("Al Bo"), "ALB");
    }

    #[test]
    fn particles_widen_to_rest_of_surname() {
        assert_eq!(code("Nyck de Vries"), "DEV");
    }

    #[test]
    fn very_short_names_are_padded() {
        assert_eq!(code("Q"), "QXX");
    }

    #[test]
    fn names_without_word_characters_miss() {
        assert_eq!(name_to_code(""), None);
        assert_eq!(name_to_code("  - "), None);
    }

    #[test]
    fn driver_year_keys_split_both_ways() {
        assert_eq!(split_driver_year("VER_2023"), Some(("VER", "2023")));
        assert_eq!(split_driver_year("2024_NOR"), Some(("NOR", "2024")));
        assert_eq!(split_driver_year("VER"), None);
        assert_eq!(driver_year_key("LEC", "2022"), "LEC_2022");
    }

    proptest! {
        #[test]
        fn codes_are_three_uppercase_ascii(name in "\\PC{0,24}") {
            if let Some(c) = name_to_code(&name) {
                prop_assert_eq!(c.as_str().len(), 3);
                prop_assert!(c.as_str().chars().all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit() || ch == '_'));
            }
        }

        #[test]
        fn alphabetic_names_always_map(first in "[A-Za-z]{1,8}", last in "[A-Za-z]{0,10}") {
            let name = if last.is_empty() { first } else { format!("{first} {last}") };
            let c = name_to_code(&name);
            prop_assert!(c.is_some());
            prop_assert!(c.unwrap().as_str().chars().all(|ch| ch.is_ascii_uppercase()));
        }
    }
}
