//! Hematology domain types and operations
//!
//! This module contains the core CBC sample types and the anemia
//! classification operations that Hemascope supports.

pub mod classifier;
pub mod ranges;

use serde::{Serialize, Deserialize};
use std::fmt;

/// Sex category; selects which hemoglobin reference floor applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Human-readable group label used in result messages.
    pub fn label(&self) -> &'static str {
        match self {
            Sex::Male => "men",
            Sex::Female => "women",
        }
    }
}

/// One set of measured values: hemoglobin plus the corpuscular indices.
///
/// Values arrive already parsed by the caller; they must be finite numbers.
/// Range sanity beyond that (e.g. negative volumes) is not checked here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CbcIndices {
    /// Hemoglobin concentration (g/dL)
    pub hemoglobin: f64,
    /// Mean corpuscular volume (fL)
    pub mcv: f64,
    /// Mean corpuscular hemoglobin (pg)
    pub mch: f64,
    /// Mean corpuscular hemoglobin concentration (g/dL)
    pub mchc: f64,
}

/// Red-cell size classification, from MCV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Microcytic,
    Macrocytic,
    Normocytic,
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeClass::Microcytic => write!(f, "Microcytic (low MCV)"),
            SizeClass::Macrocytic => write!(f, "Macrocytic (high MCV)"),
            SizeClass::Normocytic => write!(f, "Normocytic (normal MCV)"),
        }
    }
}

/// Red-cell hemoglobin-concentration classification, from MCHC and MCH.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChromaClass {
    Hypochromic,
    Hyperchromic,
    Normochromic,
}

impl fmt::Display for ChromaClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChromaClass::Hypochromic => write!(f, "Hypochromic (low MCHC)"),
            ChromaClass::Hyperchromic => write!(f, "Hyperchromic/Spherocytic (high MCHC/MCH)"),
            ChromaClass::Normochromic => write!(f, "Normochromic (normal MCHC/MCH)"),
        }
    }
}

/// Clinical reading typically associated with a morphological pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinicalSuggestion {
    IronDeficiencyOrThalassemia,
    Megaloblastic,
    ChronicDiseaseAplasticOrHemorrhage,
}

impl ClinicalSuggestion {
    /// The suggestion line shown to the clinician.
    pub fn text(&self) -> &'static str {
        match self {
            ClinicalSuggestion::IronDeficiencyOrThalassemia => {
                "Typical of iron-deficiency anemia or thalassemia."
            }
            ClinicalSuggestion::Megaloblastic => {
                "Typical of megaloblastic anemia (vitamin B12 or folate deficiency)."
            }
            ClinicalSuggestion::ChronicDiseaseAplasticOrHemorrhage => {
                "Typical of anemia of chronic disease, aplastic anemia, or acute hemorrhage."
            }
        }
    }
}

impl fmt::Display for ClinicalSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// Morphological subtype of an anemic sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Morphology {
    pub size: SizeClass,
    pub chroma: ChromaClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<ClinicalSuggestion>,
}

/// Structured outcome of one classification call. Created fresh per call
/// and owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnosis {
    pub anemic: bool,
    /// Headline message with the measured value and applicable floor.
    pub headline: String,
    /// Present only for anemic samples.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morphology: Option<Morphology>,
    /// Present only for non-anemic samples.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassifyError {
    /// A measurement was NaN or infinite; comparisons against it would
    /// silently produce wrong booleans, so the sample is rejected outright.
    NonFiniteMeasurement { field: &'static str, value: f64 },
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifyError::NonFiniteMeasurement { field, value } => {
                write!(f, "measurement '{}' is not a finite number: {}", field, value)
            }
        }
    }
}

impl std::error::Error for ClassifyError {}
