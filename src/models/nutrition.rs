use serde::{Deserialize, Serialize};

/// Daily nutrition targets derived from a user's physical profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionTargets {
    pub bmi: f64,
    pub protein_g: i64,
    pub fiber_g: i64,
    pub water_l: f64,
}

impl NutritionTargets {
    /// Derive targets from height (cm) and weight (kg).
    ///
    /// Returns `None` when either measurement is missing or non-positive;
    /// callers degrade to a workout-only checklist in that case.
    pub fn from_profile(height_cm: Option<f64>, weight_kg: Option<f64>) -> Option<Self> {
        let (height, weight) = match (height_cm, weight_kg) {
            (Some(h), Some(w)) if h > 0.0 && w > 0.0 => (h, w),
            _ => return None,
        };

        let height_m = height / 100.0;
        let bmi = weight / (height_m * height_m);

        Some(NutritionTargets {
            bmi: round_to_1(bmi),
            protein_g: (weight * 1.6).round() as i64,
            fiber_g: if weight >= 70.0 { 30 } else { 25 },
            water_l: round_to_1(weight * 0.035),
        })
    }
}

/// Compute BMI (kg / m²) rounded to one decimal, `None` unless both
/// measurements are positive.
pub fn compute_bmi(height_cm: Option<f64>, weight_kg: Option<f64>) -> Option<f64> {
    match (height_cm, weight_kg) {
        (Some(h), Some(w)) if h > 0.0 && w > 0.0 => {
            let height_m = h / 100.0;
            Some(round_to_1(w / (height_m * height_m)))
        }
        _ => None,
    }
}

fn round_to_1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_profile() {
        let targets = NutritionTargets::from_profile(Some(170.0), Some(65.0)).unwrap();
        assert_eq!(targets.bmi, 22.5);
        assert_eq!(targets.protein_g, 104);
        assert_eq!(targets.fiber_g, 25);
        assert_eq!(targets.water_l, 2.3);
    }

    #[test]
    fn heavier_profile_raises_fiber_goal() {
        let targets = NutritionTargets::from_profile(Some(180.0), Some(82.0)).unwrap();
        assert_eq!(targets.fiber_g, 30);
        assert_eq!(targets.protein_g, 131);
    }

    #[test]
    fn missing_or_invalid_measurements() {
        assert_eq!(NutritionTargets::from_profile(None, Some(65.0)), None);
        assert_eq!(NutritionTargets::from_profile(Some(170.0), None), None);
        assert_eq!(NutritionTargets::from_profile(Some(0.0), Some(65.0)), None);
        assert_eq!(NutritionTargets::from_profile(Some(170.0), Some(-2.0)), None);
    }

    #[test]
    fn bmi_helper_matches_targets() {
        assert_eq!(compute_bmi(Some(170.0), Some(65.0)), Some(22.5));
        assert_eq!(compute_bmi(None, None), None);
    }
}
