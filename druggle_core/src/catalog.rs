//! Drug catalog: the fixed, ordered set of records a puzzle can draw from.
//!
//! The built-in catalog is cached; external catalogs can be loaded from a
//! JSON array of records.

use crate::types::*;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::Path;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

#[allow(clippy::too_many_arguments)]
fn drug(
    name: &str,
    therapeutic_class: &str,
    molecule_class: &str,
    route: &str,
    prescription: &str,
    mechanism: &str,
    target_system: &str,
    summary: &str,
) -> DrugRecord {
    DrugRecord {
        name: name.into(),
        therapeutic_class: therapeutic_class.into(),
        molecule_class: molecule_class.into(),
        route: route.into(),
        prescription: prescription.into(),
        mechanism: mechanism.into(),
        target_system: target_system.into(),
        summary: Some(summary.into()),
    }
}

fn build_default_catalog_internal() -> Catalog {
    // Order matters: the daily selector indexes into it.
    let drugs = vec![
        drug(
            "Aspirin",
            "NSAID",
            "Salicylate",
            "Oral",
            "OTC",
            "COX inhibitor",
            "Cardiovascular",
            "Did you know? Aspirin can reduce the risk of heart attacks and strokes in low doses.",
        ),
        drug(
            "Ibuprofen",
            "NSAID",
            "Propionic acid",
            "Oral",
            "OTC",
            "COX inhibitor",
            "Musculoskeletal",
            "Did you know? Ibuprofen is commonly used to reduce fever, pain, and inflammation.",
        ),
        drug(
            "Paracetamol",
            "Analgesic",
            "Aniline derivative",
            "Oral",
            "OTC",
            "COX inhibitor (central)",
            "Central nervous system",
            "Did you know? Paracetamol is safe for most people when taken at recommended doses and is widely used for pain relief.",
        ),
        drug(
            "Amoxicillin",
            "Antibiotic",
            "Penicillin",
            "Oral",
            "Rx",
            "Cell wall synthesis inhibitor",
            "Bacterial infections",
            "Did you know? Amoxicillin is effective against many common bacterial infections, including ear and throat infections.",
        ),
        drug(
            "Ciprofloxacin",
            "Antibiotic",
            "Fluoroquinolone",
            "Oral",
            "Rx",
            "DNA gyrase inhibitor",
            "Bacterial infections",
            "Did you know? Ciprofloxacin is a broad-spectrum antibiotic often used for urinary tract infections.",
        ),
        drug(
            "Insulin",
            "Antidiabetic",
            "Peptide hormone",
            "Subcutaneous",
            "Rx",
            "Glucose uptake stimulator",
            "Endocrine / Metabolic",
            "Did you know? Insulin regulates blood sugar and is essential for people with type 1 diabetes.",
        ),
        drug(
            "Metformin",
            "Antidiabetic",
            "Biguanide",
            "Oral",
            "Rx",
            "Reduces hepatic glucose production",
            "Endocrine / Metabolic",
            "Did you know? Metformin is the first-line treatment for type 2 diabetes and may also support weight management.",
        ),
        drug(
            "Omeprazole",
            "Proton pump inhibitor",
            "Benzimidazole",
            "Oral",
            "OTC",
            "Proton pump inhibitor",
            "Gastrointestinal",
            "Did you know? Omeprazole helps treat acid reflux and ulcers by reducing stomach acid production.",
        ),
        drug(
            "Losartan",
            "Antihypertensive",
            "ARB",
            "Oral",
            "Rx",
            "Angiotensin II receptor antagonist",
            "Cardiovascular",
            "Did you know? Losartan lowers blood pressure and can protect the kidneys in diabetes.",
        ),
        drug(
            "Amlodipine",
            "Antihypertensive",
            "Dihydropyridine CCB",
            "Oral",
            "Rx",
            "Calcium channel blocker",
            "Cardiovascular",
            "Did you know? Amlodipine relaxes blood vessels and helps prevent chest pain (angina).",
        ),
        drug(
            "Loratadine",
            "Antihistamine",
            "Piperidine",
            "Oral",
            "OTC",
            "H1 receptor antagonist",
            "Immune / Allergic",
            "Did you know? Loratadine is a non-drowsy antihistamine commonly used for seasonal allergies.",
        ),
        drug(
            "Salbutamol",
            "Bronchodilator",
            "Beta-2 agonist",
            "Inhalation",
            "OTC/Rx",
            "Beta-2 adrenergic receptor agonist",
            "Respiratory",
            "Did you know? Salbutamol provides rapid relief for asthma and other obstructive airway diseases.",
        ),
    ];

    Catalog { drugs }
}

/// Ordered, non-empty, read-only sequence of drug records
#[derive(Clone, Debug)]
pub struct Catalog {
    drugs: Vec<DrugRecord>,
}

impl Catalog {
    /// Create a catalog from records, preserving their order
    ///
    /// Fails if the list is empty; the daily selector needs at least one record.
    pub fn new(drugs: Vec<DrugRecord>) -> Result<Self> {
        if drugs.is_empty() {
            return Err(Error::CatalogValidation("Catalog has no drugs".into()));
        }
        Ok(Self { drugs })
    }

    /// Load a catalog from a JSON array of records
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let drugs: Vec<DrugRecord> = serde_json::from_str(&contents)?;
        let catalog = Self::new(drugs)?;
        tracing::info!("Loaded {} drugs from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.drugs.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.drugs.is_empty()
    }

    pub fn drugs(&self) -> &[DrugRecord] {
        &self.drugs
    }

    /// Record at a position, if any
    pub fn get(&self, index: usize) -> Option<&DrugRecord> {
        self.drugs.get(index)
    }

    /// Resolve a guess by name (case-insensitive, trimmed)
    pub fn find(&self, name: &str) -> Option<&DrugRecord> {
        let wanted = normalize(name);
        self.drugs.iter().find(|d| normalize(&d.name) == wanted)
    }

    /// Autocomplete candidates for partially typed input
    ///
    /// Names whose normalized form starts with the normalized prefix, excluding
    /// an exact match, in catalog order.
    pub fn suggest(&self, prefix: &str) -> Vec<&str> {
        let prefix = normalize(prefix);
        self.drugs
            .iter()
            .filter(|d| {
                let name = normalize(&d.name);
                name.starts_with(&prefix) && name != prefix
            })
            .map(|d| d.name.as_str())
            .collect()
    }

    /// Validate the catalog structurally
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for (idx, drug) in self.drugs.iter().enumerate() {
            let key = normalize(&drug.name);
            if key.is_empty() {
                errors.push(format!("Drug at position {} has empty name", idx));
                continue;
            }
            if !seen.insert(key) {
                errors.push(format!("Duplicate drug name '{}'", drug.name));
            }
        }

        errors
    }
}
