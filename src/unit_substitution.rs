//! # Unit Substitution Module
//!
//! Rewrites English unit abbreviations left behind by machine translation
//! ("2 tbsp" → "2 colher de sopa"). Patterns are matched as whole words,
//! case-insensitively, and the alternation is ordered longest-first so that
//! "tablespoons" is never rewritten as "tablespoon" + "s" and "tbsp" never
//! loses to "tbs".

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// English unit → Portuguese equivalent
const PORTUGUESE_UNITS: &[(&str, &str)] = &[
    ("tablespoons", "colheres de sopa"),
    ("tablespoon", "colher de sopa"),
    ("tbsp", "colher de sopa"),
    ("tbs", "colher de sopa"),
    ("teaspoons", "colheres de chá"),
    ("teaspoon", "colher de chá"),
    ("tsp", "colher de chá"),
    ("cups", "xícaras"),
    ("cup", "xícara"),
    ("ounces", "onças"),
    ("ounce", "onça"),
    ("oz", "onça"),
    ("pounds", "libras"),
    ("pound", "libra"),
    ("lbs", "libras"),
    ("lb", "libra"),
    ("pinch", "pitada"),
    ("handful", "punhado"),
    ("cloves", "dentes"),
    ("clove", "dente"),
    ("slices", "fatias"),
    ("slice", "fatia"),
    ("tin", "lata"),
    ("can", "lata"),
    ("dash", "pitada"),
];

/// Compiled substitution table for one target language
#[derive(Debug)]
pub struct UnitSubstitution {
    pattern: Regex,
    replacements: HashMap<String, &'static str>,
}

impl UnitSubstitution {
    /// Build a table from `(unit, replacement)` pairs
    pub fn new(table: &[(&str, &'static str)]) -> Result<Self, regex::Error> {
        let mut units: Vec<&str> = table.iter().map(|(unit, _)| *unit).collect();
        units.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let alternation = units
            .iter()
            .map(|unit| regex::escape(unit))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))?;

        let replacements = table
            .iter()
            .map(|(unit, replacement)| (unit.to_lowercase(), *replacement))
            .collect();

        Ok(Self {
            pattern,
            replacements,
        })
    }

    /// Replace every known unit in `text`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chefmatch::unit_substitution::for_language;
    ///
    /// let units = for_language("pt").unwrap();
    /// assert_eq!(units.apply("2 Tbsp"), "2 colher de sopa");
    /// assert_eq!(units.apply("3 cups"), "3 xícaras");
    /// ```
    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures| {
                let matched = &caps[0];
                self.replacements
                    .get(&matched.to_lowercase())
                    .map(|replacement| replacement.to_string())
                    .unwrap_or_else(|| matched.to_string())
            })
            .into_owned()
    }
}

lazy_static! {
    static ref PORTUGUESE: UnitSubstitution =
        UnitSubstitution::new(PORTUGUESE_UNITS).expect("Portuguese unit table should compile");
}

/// Substitution table for a target language, if one exists
pub fn for_language(language: &str) -> Option<&'static UnitSubstitution> {
    match language.to_lowercase().as_str() {
        "pt" | "pt-br" | "pt-pt" => Some(&PORTUGUESE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_unit_wins() {
        let units = for_language("pt").unwrap();
        assert_eq!(units.apply("2 tablespoons"), "2 colheres de sopa");
        assert_eq!(units.apply("1 tablespoon"), "1 colher de sopa");
        assert_eq!(units.apply("1 tbsp"), "1 colher de sopa");
        assert_eq!(units.apply("1 tbs"), "1 colher de sopa");
    }

    #[test]
    fn test_whole_words_only() {
        let units = for_language("pt").unwrap();
        // "can" inside "pecans" and "cup" inside "cupcake" are left alone
        assert_eq!(units.apply("pecans"), "pecans");
        assert_eq!(units.apply("1 cupcake"), "1 cupcake");
        assert_eq!(units.apply("1 can"), "1 lata");
    }

    #[test]
    fn test_several_units_in_one_measure() {
        let units = for_language("pt").unwrap();
        assert_eq!(units.apply("1 cup + 2 tsp"), "1 xícara + 2 colher de chá");
    }

    #[test]
    fn test_case_insensitive() {
        let units = for_language("PT").unwrap();
        assert_eq!(units.apply("4 OZ"), "4 onça");
    }

    #[test]
    fn test_unknown_language() {
        assert!(for_language("fr").is_none());
    }

    #[test]
    fn test_table_order_does_not_matter() {
        let shuffled = UnitSubstitution::new(&[("cup", "xícara"), ("cups", "xícaras")]).unwrap();
        assert_eq!(shuffled.apply("2 cups"), "2 xícaras");
    }
}
