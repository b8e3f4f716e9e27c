//! Clinical reference ranges
//!
//! The fixed thresholds the classifier decides against. Values are
//! approximate, taken from standard clinical literature and adjusted to the
//! needs of classification. The table is a process-wide constant and is
//! safely shared read-only across callers.

use serde::Serialize;

use super::Sex;

/// Hemoglobin lower limits of normal (g/dL), per sex.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HemoglobinRange {
    /// Lower limit for men (normal span 13.5 - 17.5 g/dL)
    pub male_normal: f64,
    /// Lower limit for women (normal span 12.0 - 15.5 g/dL)
    pub female_normal: f64,
}

/// Mean corpuscular volume cutoffs (fL).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct McvRange {
    pub microcytic: f64,
    pub macrocytic: f64,
}

/// Mean corpuscular hemoglobin cutoffs (pg).
///
/// The hypochromic floor is part of the published table but the chroma rule
/// reads hypochromia from MCHC alone; see `Classifier::chroma_class`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MchRange {
    pub hypochromic: f64,
    pub normal_max: f64,
}

/// Mean corpuscular hemoglobin concentration cutoffs (g/dL).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MchcRange {
    pub hypochromic: f64,
    pub normal_max: f64,
}

/// The complete reference table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReferenceRanges {
    pub hemoglobin: HemoglobinRange,
    pub mcv: McvRange,
    pub mch: MchRange,
    pub mchc: MchcRange,
}

/// Standard adult reference table.
pub const REFERENCE_RANGES: ReferenceRanges = ReferenceRanges {
    hemoglobin: HemoglobinRange {
        male_normal: 13.5,
        female_normal: 12.0,
    },
    mcv: McvRange {
        microcytic: 80.0,
        macrocytic: 100.0,
    },
    mch: MchRange {
        hypochromic: 27.0,
        normal_max: 33.0,
    },
    mchc: MchcRange {
        hypochromic: 32.0,
        normal_max: 36.0,
    },
};

impl ReferenceRanges {
    /// Hemoglobin lower limit of normal for the given sex.
    pub fn hemoglobin_floor(&self, sex: Sex) -> f64 {
        match sex {
            Sex::Male => self.hemoglobin.male_normal,
            Sex::Female => self.hemoglobin.female_normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hemoglobin_floor_follows_sex() {
        assert_eq!(REFERENCE_RANGES.hemoglobin_floor(Sex::Male), 13.5);
        assert_eq!(REFERENCE_RANGES.hemoglobin_floor(Sex::Female), 12.0);
    }

    #[test]
    fn standard_table_values() {
        assert_eq!(REFERENCE_RANGES.mcv.microcytic, 80.0);
        assert_eq!(REFERENCE_RANGES.mcv.macrocytic, 100.0);
        assert_eq!(REFERENCE_RANGES.mch.hypochromic, 27.0);
        assert_eq!(REFERENCE_RANGES.mch.normal_max, 33.0);
        assert_eq!(REFERENCE_RANGES.mchc.hypochromic, 32.0);
        assert_eq!(REFERENCE_RANGES.mchc.normal_max, 36.0);
    }

    #[test]
    fn table_serializes_for_the_api() {
        let value = serde_json::to_value(REFERENCE_RANGES).unwrap();
        assert_eq!(value["hemoglobin"]["female_normal"], 12.0);
        assert_eq!(value["mchc"]["normal_max"], 36.0);
    }
}
