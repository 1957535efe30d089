use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::error::QuizError;

static DATA_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/data");

const CATALOG_FILE: &str = "ions.json";

/// Category label attached to catalog entries.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tag {
    Cation,
    Anion,
    Compound,
}

/// One ion: a formula and the names accepted for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IonEntry {
    /// Display formula in `_`/`^` markup, e.g. `SO_4^{2-}`.
    pub formula: String,
    /// First name is the canonical one shown in feedback.
    #[serde(rename = "names")]
    pub accepted_names: Vec<String>,
    pub tags: BTreeSet<Tag>,
}

impl IonEntry {
    pub fn canonical_name(&self) -> &str {
        self.accepted_names
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    ions: Vec<IonEntry>,
}

/// The fixed ion reference table. Never mutated by quiz play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<IonEntry>,
}

impl Catalog {
    /// Build a catalog, rejecting entries without names and duplicate formulas.
    pub fn new(entries: Vec<IonEntry>) -> Result<Self, QuizError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.accepted_names.is_empty() {
                return Err(QuizError::Catalog(format!(
                    "{} has no accepted names",
                    entry.formula
                )));
            }
            if !seen.insert(entry.formula.as_str()) {
                return Err(QuizError::Catalog(format!(
                    "{} is listed more than once",
                    entry.formula
                )));
            }
        }
        Ok(Self { entries })
    }

    /// The table compiled into the binary.
    pub fn builtin() -> Result<Self, QuizError> {
        let file = DATA_DIR
            .get_file(CATALOG_FILE)
            .ok_or_else(|| QuizError::Catalog(format!("{CATALOG_FILE} not embedded")))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| QuizError::Catalog(format!("{CATALOG_FILE} is not utf-8")))?;
        Self::from_json(contents)
    }

    pub fn from_json(json: &str) -> Result<Self, QuizError> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| QuizError::Catalog(e.to_string()))?;
        Self::new(file.ions)
    }

    /// Every formula in declaration order.
    pub fn all_formulas(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.formula.as_str()).collect()
    }

    /// Formulas carrying `tag`, in declaration order.
    pub fn entries_by_tag(&self, tag: Tag) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.has_tag(tag))
            .map(|e| e.formula.as_str())
            .collect()
    }

    pub fn lookup(&self, formula: &str) -> Result<&IonEntry, QuizError> {
        self.entries
            .iter()
            .find(|e| e.formula == formula)
            .ok_or_else(|| QuizError::UnknownFormula(formula.to_string()))
    }

    pub fn entries(&self) -> &[IonEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(formula: &str, names: &[&str], tags: &[Tag]) -> IonEntry {
        IonEntry {
            formula: formula.to_string(),
            accepted_names: names.iter().map(|n| n.to_string()).collect(),
            tags: tags.iter().copied().collect(),
        }
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.len(), catalog.all_formulas().len());
    }

    #[test]
    fn test_builtin_catalog_declaration_order() {
        let catalog = Catalog::builtin().unwrap();
        let formulas = catalog.all_formulas();
        assert_eq!(formulas[0], "H^+");
        assert_eq!(*formulas.last().unwrap(), "MnO_4^-");
    }

    #[test]
    fn test_every_builtin_entry_is_tagged() {
        let catalog = Catalog::builtin().unwrap();
        for entry in catalog.entries() {
            assert!(!entry.tags.is_empty(), "{} has no tags", entry.formula);
            assert!(!entry.accepted_names.is_empty());
            assert!(
                !(entry.has_tag(Tag::Cation) && entry.has_tag(Tag::Anion)),
                "{} cannot be both cation and anion",
                entry.formula
            );
        }
    }

    #[test]
    fn test_ammonium_is_cation_and_compound() {
        let catalog = Catalog::builtin().unwrap();
        let cations = catalog.entries_by_tag(Tag::Cation);
        let compounds = catalog.entries_by_tag(Tag::Compound);
        assert!(cations.contains(&"NH_4^+"));
        assert!(compounds.contains(&"NH_4^+"));
        assert!(!compounds.contains(&"Na^+"));
    }

    #[test]
    fn test_entries_by_tag_only_returns_tagged() {
        let catalog = Catalog::builtin().unwrap();
        for tag in [Tag::Cation, Tag::Anion, Tag::Compound] {
            let formulas = catalog.entries_by_tag(tag);
            assert!(!formulas.is_empty());
            for formula in formulas {
                assert!(catalog.lookup(formula).unwrap().has_tag(tag));
            }
        }
    }

    #[test]
    fn test_lookup_alternative_spellings() {
        let catalog = Catalog::builtin().unwrap();
        let sulfate = catalog.lookup("SO_4^{2-}").unwrap();
        assert_eq!(sulfate.canonical_name(), "sulfate");
        assert!(sulfate.accepted_names.contains(&"sulphate".to_string()));

        let permanganate = catalog.lookup("MnO_4^-").unwrap();
        assert_eq!(permanganate.accepted_names[0], "permanganate");
        assert_eq!(permanganate.accepted_names[1], "manganate(VII)");
    }

    #[test]
    fn test_lookup_unknown_formula() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(
            catalog.lookup("Xe^{8+}"),
            Err(QuizError::UnknownFormula("Xe^{8+}".to_string()))
        );
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let result = Catalog::new(vec![
            entry("Na^+", &["sodium"], &[Tag::Cation]),
            entry("Na^+", &["natrium"], &[Tag::Cation]),
        ]);
        assert!(matches!(result, Err(QuizError::Catalog(_))));
    }

    #[test]
    fn test_new_rejects_entry_without_names() {
        let result = Catalog::new(vec![entry("Na^+", &[], &[Tag::Cation])]);
        assert!(matches!(result, Err(QuizError::Catalog(_))));
    }

    #[test]
    fn test_entries_by_tag_empty_set() {
        let catalog = Catalog::new(vec![entry("Na^+", &["sodium"], &[Tag::Cation])]).unwrap();
        assert!(catalog.entries_by_tag(Tag::Compound).is_empty());
    }

    #[test]
    fn test_from_json() {
        let json = r#"
        {
            "ions": [
                { "formula": "K^+", "names": ["potassium"], "tags": ["cation"] },
                { "formula": "OH^-", "names": ["hydroxide"], "tags": ["anion", "compound"] }
            ]
        }
        "#;

        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.all_formulas(), vec!["K^+", "OH^-"]);
        assert_eq!(catalog.entries_by_tag(Tag::Compound), vec!["OH^-"]);
    }

    #[test]
    fn test_from_json_unknown_tag() {
        let json = r#"{ "ions": [ { "formula": "K^+", "names": ["potassium"], "tags": ["metal"] } ] }"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(QuizError::Catalog(_))
        ));
    }

    #[test]
    fn test_tag_display() {
        assert_eq!(Tag::Cation.to_string(), "cation");
        assert_eq!(Tag::Compound.to_string(), "compound");
    }
}
