//! Anemia classification
//!
//! Two-stage decision over one sample: anemia presence from hemoglobin
//! against the sex-specific floor, then a morphological subtype from the
//! corpuscular indices. Every call is pure and O(1); identical inputs
//! always yield an identical `Diagnosis`.

use super::ranges::{ReferenceRanges, REFERENCE_RANGES};
use super::{
    CbcIndices, ChromaClass, ClassifyError, ClinicalSuggestion, Diagnosis, Morphology, Sex,
    SizeClass,
};

const NO_ANEMIA_ADVISORY: &str = "The remaining indices are normal and do not suggest anemia. \
     Review the upper ranges for polycythemia or other conditions.";

/// Classifies CBC samples against a reference table.
pub struct Classifier {
    ranges: ReferenceRanges,
}

impl Classifier {
    /// Classifier over the standard adult reference table.
    pub fn new() -> Self {
        Classifier {
            ranges: REFERENCE_RANGES,
        }
    }

    /// Classifier over a caller-supplied table.
    pub fn with_ranges(ranges: ReferenceRanges) -> Self {
        Classifier { ranges }
    }

    /// Classify one sample.
    ///
    /// Anemia presence is a strict comparison: hemoglobin exactly at the
    /// floor is not anemic. The morphological subtype is computed only for
    /// anemic samples; non-anemic samples carry a generic advisory instead.
    pub fn classify(&self, sex: Sex, indices: &CbcIndices) -> Result<Diagnosis, ClassifyError> {
        check_finite(indices)?;

        let floor = self.ranges.hemoglobin_floor(sex);
        if indices.hemoglobin < floor {
            let morphology = self.classify_morphology(indices);
            Ok(Diagnosis {
                anemic: true,
                headline: format!(
                    "ANEMIA: hemoglobin {} g/dL is below the normal limit of {} g/dL for {}.",
                    indices.hemoglobin,
                    floor,
                    sex.label()
                ),
                morphology: Some(morphology),
                advisory: None,
            })
        } else {
            Ok(Diagnosis {
                anemic: false,
                headline: format!(
                    "NO ANEMIA: hemoglobin {} g/dL is within the normal range.",
                    indices.hemoglobin
                ),
                morphology: None,
                advisory: Some(NO_ANEMIA_ADVISORY.to_string()),
            })
        }
    }

    /// Morphological subtype: size by MCV, chroma by MCHC/MCH, plus the
    /// first matching clinical suggestion if any.
    fn classify_morphology(&self, indices: &CbcIndices) -> Morphology {
        let size = self.size_class(indices.mcv);
        let chroma = self.chroma_class(indices.mch, indices.mchc);
        Morphology {
            size,
            chroma,
            suggestion: suggestion_for(size, chroma),
        }
    }

    /// Size classification by MCV. Values exactly at either cutoff count
    /// as normocytic.
    fn size_class(&self, mcv: f64) -> SizeClass {
        if mcv < self.ranges.mcv.microcytic {
            SizeClass::Microcytic
        } else if mcv > self.ranges.mcv.macrocytic {
            SizeClass::Macrocytic
        } else {
            SizeClass::Normocytic
        }
    }

    /// Chroma classification. MCHC is the primary hypochromia indicator;
    /// the MCH hypochromic floor in the table is not consulted here.
    /// Hyperchromia is rare and often artifactual, but it is flagged, and
    /// a high MCH alone is enough to flag it.
    fn chroma_class(&self, mch: f64, mchc: f64) -> ChromaClass {
        if mchc < self.ranges.mchc.hypochromic {
            ChromaClass::Hypochromic
        } else if mchc > self.ranges.mchc.normal_max || mch > self.ranges.mch.normal_max {
            ChromaClass::Hyperchromic
        } else {
            ChromaClass::Normochromic
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new()
    }
}

/// First matching suggestion rule wins; patterns outside the three known
/// presentations get no suggestion line.
fn suggestion_for(size: SizeClass, chroma: ChromaClass) -> Option<ClinicalSuggestion> {
    match (size, chroma) {
        (SizeClass::Microcytic, ChromaClass::Hypochromic) => {
            Some(ClinicalSuggestion::IronDeficiencyOrThalassemia)
        }
        (SizeClass::Macrocytic, _) => Some(ClinicalSuggestion::Megaloblastic),
        (SizeClass::Normocytic, ChromaClass::Normochromic) => {
            Some(ClinicalSuggestion::ChronicDiseaseAplasticOrHemorrhage)
        }
        _ => None,
    }
}

fn check_finite(indices: &CbcIndices) -> Result<(), ClassifyError> {
    let fields = [
        ("hemoglobin", indices.hemoglobin),
        ("mcv", indices.mcv),
        ("mch", indices.mch),
        ("mchc", indices.mchc),
    ];
    for (field, value) in fields {
        if !value.is_finite() {
            return Err(ClassifyError::NonFiniteMeasurement { field, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample(hemoglobin: f64, mcv: f64, mch: f64, mchc: f64) -> CbcIndices {
        CbcIndices {
            hemoglobin,
            mcv,
            mch,
            mchc,
        }
    }

    #[test]
    fn normal_male_sample_is_not_anemic() {
        // Scenario: male, Hb 14.0, MCV 90, MCH 30, MCHC 34
        let classifier = Classifier::new();
        let diagnosis = classifier
            .classify(Sex::Male, &sample(14.0, 90.0, 30.0, 34.0))
            .unwrap();

        assert!(!diagnosis.anemic);
        assert_eq!(diagnosis.morphology, None);
        assert!(diagnosis.advisory.unwrap().contains("polycythemia"));
    }

    #[test]
    fn hemoglobin_exactly_at_floor_is_not_anemic() {
        let classifier = Classifier::new();
        let male = classifier
            .classify(Sex::Male, &sample(13.5, 90.0, 30.0, 34.0))
            .unwrap();
        let female = classifier
            .classify(Sex::Female, &sample(12.0, 90.0, 30.0, 34.0))
            .unwrap();

        assert!(!male.anemic);
        assert!(!female.anemic);
    }

    #[test]
    fn hemoglobin_below_floor_is_anemic_per_sex() {
        let classifier = Classifier::new();
        let male = classifier
            .classify(Sex::Male, &sample(13.4, 90.0, 30.0, 34.0))
            .unwrap();
        // 13.4 is anemic for men but normal for women
        let female = classifier
            .classify(Sex::Female, &sample(13.4, 90.0, 30.0, 34.0))
            .unwrap();

        assert!(male.anemic);
        assert!(!female.anemic);
    }

    #[test]
    fn headline_interpolates_value_and_floor() {
        let classifier = Classifier::new();
        let diagnosis = classifier
            .classify(Sex::Female, &sample(10.0, 70.0, 25.0, 28.0))
            .unwrap();

        assert_eq!(
            diagnosis.headline,
            "ANEMIA: hemoglobin 10 g/dL is below the normal limit of 12 g/dL for women."
        );
        assert_eq!(diagnosis.advisory, None);
    }

    #[test]
    fn mcv_cutoffs_are_inclusive_on_the_normocytic_side() {
        let classifier = Classifier::new();
        assert_eq!(classifier.size_class(79.9), SizeClass::Microcytic);
        assert_eq!(classifier.size_class(80.0), SizeClass::Normocytic);
        assert_eq!(classifier.size_class(100.0), SizeClass::Normocytic);
        assert_eq!(classifier.size_class(100.1), SizeClass::Macrocytic);
    }

    #[test]
    fn low_mchc_is_hypochromic_regardless_of_mch() {
        let classifier = Classifier::new();
        assert_eq!(classifier.chroma_class(40.0, 31.9), ChromaClass::Hypochromic);
        assert_eq!(classifier.chroma_class(20.0, 30.0), ChromaClass::Hypochromic);
    }

    #[test]
    fn high_mch_alone_is_hyperchromic() {
        let classifier = Classifier::new();
        // MCHC in the normal band, MCH above its normal max
        assert_eq!(classifier.chroma_class(33.1, 34.0), ChromaClass::Hyperchromic);
        assert_eq!(classifier.chroma_class(36.1, 35.0), ChromaClass::Hyperchromic);
    }

    #[test]
    fn normal_band_is_normochromic() {
        let classifier = Classifier::new();
        assert_eq!(classifier.chroma_class(33.0, 32.0), ChromaClass::Normochromic);
        assert_eq!(classifier.chroma_class(30.0, 36.0), ChromaClass::Normochromic);
    }

    #[test]
    fn microcytic_hypochromic_suggests_iron_deficiency_or_thalassemia() {
        // Scenario: female, Hb 10.0, MCV 70, MCH 25, MCHC 28
        let classifier = Classifier::new();
        let diagnosis = classifier
            .classify(Sex::Female, &sample(10.0, 70.0, 25.0, 28.0))
            .unwrap();

        assert!(diagnosis.anemic);
        let morphology = diagnosis.morphology.unwrap();
        assert_eq!(morphology.size, SizeClass::Microcytic);
        assert_eq!(morphology.chroma, ChromaClass::Hypochromic);
        assert_eq!(
            morphology.suggestion,
            Some(ClinicalSuggestion::IronDeficiencyOrThalassemia)
        );
    }

    #[test]
    fn macrocytic_suggests_megaloblastic_whatever_the_chroma() {
        // Scenario: male, Hb 11.0, MCV 110, MCH 34, MCHC 34
        let classifier = Classifier::new();
        let diagnosis = classifier
            .classify(Sex::Male, &sample(11.0, 110.0, 34.0, 34.0))
            .unwrap();

        let morphology = diagnosis.morphology.unwrap();
        assert_eq!(morphology.size, SizeClass::Macrocytic);
        assert_eq!(morphology.suggestion, Some(ClinicalSuggestion::Megaloblastic));
    }

    #[test]
    fn normocytic_normochromic_suggests_chronic_disease_pattern() {
        // Scenario: female, Hb 11.0, MCV 90, MCH 30, MCHC 34
        let classifier = Classifier::new();
        let diagnosis = classifier
            .classify(Sex::Female, &sample(11.0, 90.0, 30.0, 34.0))
            .unwrap();

        let morphology = diagnosis.morphology.unwrap();
        assert_eq!(morphology.size, SizeClass::Normocytic);
        assert_eq!(morphology.chroma, ChromaClass::Normochromic);
        assert_eq!(
            morphology.suggestion,
            Some(ClinicalSuggestion::ChronicDiseaseAplasticOrHemorrhage)
        );
    }

    #[test]
    fn normocytic_hyperchromic_gets_no_suggestion() {
        // Scenario: male, Hb 12.0, MCV 85, MCH 36, MCHC 35. The high MCH
        // fires the hyperchromic branch despite a normal MCHC, and no
        // suggestion rule covers that pattern.
        let classifier = Classifier::new();
        let diagnosis = classifier
            .classify(Sex::Male, &sample(12.0, 85.0, 36.0, 35.0))
            .unwrap();

        assert!(diagnosis.anemic);
        let morphology = diagnosis.morphology.unwrap();
        assert_eq!(morphology.size, SizeClass::Normocytic);
        assert_eq!(morphology.chroma, ChromaClass::Hyperchromic);
        assert_eq!(morphology.suggestion, None);
    }

    #[test]
    fn microcytic_normochromic_gets_no_suggestion() {
        assert_eq!(
            suggestion_for(SizeClass::Microcytic, ChromaClass::Normochromic),
            None
        );
        assert_eq!(
            suggestion_for(SizeClass::Microcytic, ChromaClass::Hyperchromic),
            None
        );
    }

    #[test]
    fn identical_inputs_yield_identical_diagnoses() {
        let classifier = Classifier::new();
        let indices = sample(10.0, 70.0, 25.0, 28.0);
        let first = classifier.classify(Sex::Female, &indices).unwrap();
        let second = classifier.classify(Sex::Female, &indices).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn non_finite_measurements_are_rejected() {
        let classifier = Classifier::new();

        let err = classifier
            .classify(Sex::Male, &sample(f64::NAN, 90.0, 30.0, 34.0))
            .unwrap_err();
        let ClassifyError::NonFiniteMeasurement { field, value } = err;
        assert_eq!(field, "hemoglobin");
        assert!(value.is_nan());

        let err = classifier
            .classify(Sex::Male, &sample(14.0, 90.0, 30.0, f64::INFINITY))
            .unwrap_err();
        assert_eq!(
            err,
            ClassifyError::NonFiniteMeasurement {
                field: "mchc",
                value: f64::INFINITY
            }
        );
    }

    #[test]
    fn custom_ranges_shift_the_decision() {
        let mut ranges = REFERENCE_RANGES;
        ranges.hemoglobin.male_normal = 10.0;
        let classifier = Classifier::with_ranges(ranges);

        let diagnosis = classifier
            .classify(Sex::Male, &sample(12.0, 90.0, 30.0, 34.0))
            .unwrap();
        assert!(!diagnosis.anemic);
    }
}
