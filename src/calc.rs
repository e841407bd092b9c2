//! Closed-form health calculators - BMR, activity multiplier, macros, heart rate, body fat
//!
//! Pure functions with fixed constants. Each takes plain inputs and
//! returns a value, no state, no I/O.

use serde::{Deserialize, Serialize};

/// Selector for the Harris-Benedict branch. `Other` uses the female
/// coefficients.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

/// Lifestyle categories from the signup form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifestyle {
    LyingDown,
    AlmostNoMovement,
    StudentOrOffice,
    Active,
    VeryActive,
}

impl Lifestyle {
    /// Parse from the profile string; unknown labels fall back to the
    /// student/office default.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Lying down 15+ hours" => Lifestyle::LyingDown,
            "Almost no movement at home" => Lifestyle::AlmostNoMovement,
            "Student or office worker" => Lifestyle::StudentOrOffice,
            "Active" => Lifestyle::Active,
            "Very active" => Lifestyle::VeryActive,
            _ => Lifestyle::StudentOrOffice,
        }
    }

    pub fn base_multiplier(&self) -> f64 {
        match self {
            Lifestyle::LyingDown => 1.0,
            Lifestyle::AlmostNoMovement => 1.1,
            Lifestyle::StudentOrOffice => 1.2,
            Lifestyle::Active => 1.3,
            Lifestyle::VeryActive => 1.4,
        }
    }
}

/// Weekly exercise frequency categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExerciseFrequency {
    None,
    X1,
    X2,
    X3,
    X4,
    X5,
    X6,
    X7,
}

impl ExerciseFrequency {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "1x/week" => ExerciseFrequency::X1,
            "2x/week" => ExerciseFrequency::X2,
            "3x/week" => ExerciseFrequency::X3,
            "4x/week" => ExerciseFrequency::X4,
            "5x/week" => ExerciseFrequency::X5,
            "6x/week" => ExerciseFrequency::X6,
            "7x/week" => ExerciseFrequency::X7,
            _ => ExerciseFrequency::None,
        }
    }

    pub fn bonus(&self) -> f64 {
        match self {
            ExerciseFrequency::None => 0.0,
            ExerciseFrequency::X1 => 0.05,
            ExerciseFrequency::X2 => 0.1,
            ExerciseFrequency::X3 => 0.15,
            ExerciseFrequency::X4 => 0.2,
            ExerciseFrequency::X5 => 0.25,
            ExerciseFrequency::X6 => 0.3,
            ExerciseFrequency::X7 => 0.35,
        }
    }
}

/// Self-assessed fitness level, 7 buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FitnessLevel {
    VeryPoor,
    Poor,
    BelowAverage,
    Average,
    AboveAverage,
    Good,
    VeryGood,
}

impl FitnessLevel {
    /// Unknown labels fall back to Average.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Very poor" => FitnessLevel::VeryPoor,
            "Poor" => FitnessLevel::Poor,
            "Below average" => FitnessLevel::BelowAverage,
            "Average" => FitnessLevel::Average,
            "Above average" => FitnessLevel::AboveAverage,
            "Good" => FitnessLevel::Good,
            "Very good" => FitnessLevel::VeryGood,
            _ => FitnessLevel::Average,
        }
    }

    pub fn bonus(&self) -> f64 {
        match self {
            FitnessLevel::VeryPoor => 0.0,
            FitnessLevel::Poor => 0.02,
            FitnessLevel::BelowAverage => 0.05,
            FitnessLevel::Average => 0.08,
            FitnessLevel::AboveAverage => 0.12,
            FitnessLevel::Good => 0.15,
            FitnessLevel::VeryGood => 0.2,
        }
    }

    /// Maximal fat oxidation zone as a fraction pair of max heart rate.
    /// Heuristic table, not a clinical standard.
    pub fn mfo_zone(&self) -> (f64, f64) {
        match self {
            FitnessLevel::VeryPoor => (0.5, 0.6),
            FitnessLevel::Poor => (0.55, 0.65),
            FitnessLevel::BelowAverage => (0.6, 0.7),
            FitnessLevel::Average => (0.65, 0.75),
            FitnessLevel::AboveAverage => (0.7, 0.8),
            FitnessLevel::Good => (0.75, 0.85),
            FitnessLevel::VeryGood => (0.8, 0.9),
        }
    }
}

/// Calorie goal shifting the intake target by a flat 500 kcal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    WeightLoss,
    Maintenance,
    BulkUp,
}

/// Macro targets derived from a calorie figure
#[derive(Debug, Clone, PartialEq)]
pub struct Macros {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Basal metabolic rate via the Harris-Benedict equation.
/// Height in cm, weight in kg, result in kcal/day rounded to 1 decimal.
pub fn bmr(gender: Gender, age: u32, height_cm: f64, weight_kg: f64) -> f64 {
    let raw = match gender {
        Gender::Male => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age as f64,
        _ => 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age as f64,
    };
    round1(raw)
}

/// Total-energy multiplier: lifestyle base plus frequency and fitness bonuses.
pub fn activity_multiplier(
    lifestyle: Lifestyle,
    frequency: ExerciseFrequency,
    fitness: FitnessLevel,
) -> f64 {
    lifestyle.base_multiplier() + frequency.bonus() + fitness.bonus()
}

/// Split a calorie target into macros at the fixed 50/30/20 ratio.
/// The goal shifts the target by -500/+500 kcal first.
pub fn macros(calories: f64, goal: Goal) -> Macros {
    let calories = match goal {
        Goal::WeightLoss => calories - 500.0,
        Goal::Maintenance => calories,
        Goal::BulkUp => calories + 500.0,
    };

    Macros {
        calories,
        protein_g: round1(calories * 0.3 / 4.0),
        carbs_g: round1(calories * 0.5 / 4.0),
        fat_g: round1(calories * 0.2 / 9.0),
    }
}

/// Recommended fat-burning heart-rate range in bpm.
pub fn heart_rate_range(age: u32, fitness: FitnessLevel) -> (u32, u32) {
    let max_hr = (220 - age.min(220)) as f64;
    let (lo, hi) = fitness.mfo_zone();
    ((max_hr * lo) as u32, (max_hr * hi) as u32)
}

/// Display bands for a body-fat percentage, cutoffs per gender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFatBand {
    Essential,
    Athletic,
    Fit,
    Average,
    AboveAverage,
    Obese,
}

impl BodyFatBand {
    pub fn label(&self) -> &'static str {
        match self {
            BodyFatBand::Essential => "Essential fat",
            BodyFatBand::Athletic => "Athletic",
            BodyFatBand::Fit => "Fit",
            BodyFatBand::Average => "Average",
            BodyFatBand::AboveAverage => "Above average",
            BodyFatBand::Obese => "Obese",
        }
    }
}

/// Circumference inputs for the body-fat estimate, all in cm.
/// Whatever is missing pushes the estimate down the fallback chain.
#[derive(Debug, Clone, Default)]
pub struct BodyMeasurements {
    pub waist_cm: Option<f64>,
    pub neck_cm: Option<f64>,
    pub hip_cm: Option<f64>,
}

/// Best-effort body-fat percentage, clamped to [5, 50].
///
/// Uses the Navy circumference method when waist and neck are known
/// (hip additionally for non-male), otherwise the Deurenberg BMI
/// formula. The result is a display heuristic, not a clinical figure.
pub fn body_fat_percent(
    gender: Gender,
    age: u32,
    height_cm: f64,
    weight_kg: f64,
    measurements: &BodyMeasurements,
) -> f64 {
    let navy = navy_estimate(gender, height_cm, measurements);
    let raw = navy.unwrap_or_else(|| deurenberg_estimate(gender, age, height_cm, weight_kg));
    raw.clamp(5.0, 50.0)
}

fn navy_estimate(gender: Gender, height_cm: f64, m: &BodyMeasurements) -> Option<f64> {
    let waist = m.waist_cm?;
    let neck = m.neck_cm?;
    if height_cm <= 0.0 || waist <= neck {
        return None;
    }
    match gender {
        Gender::Male => Some(
            495.0 / (1.0324 - 0.19077 * (waist - neck).log10() + 0.15456 * height_cm.log10())
                - 450.0,
        ),
        _ => {
            let hip = m.hip_cm?;
            if waist + hip <= neck {
                return None;
            }
            Some(
                495.0
                    / (1.29579 - 0.35004 * (waist + hip - neck).log10()
                        + 0.22100 * height_cm.log10())
                    - 450.0,
            )
        }
    }
}

fn deurenberg_estimate(gender: Gender, age: u32, height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = (height_cm / 100.0).max(0.5);
    let bmi = weight_kg / (height_m * height_m);
    let sex = if gender == Gender::Male { 1.0 } else { 0.0 };
    1.20 * bmi + 0.23 * age as f64 - 10.8 * sex - 5.4
}

/// Categorize a clamped body-fat percentage for display coloring.
pub fn body_fat_band(gender: Gender, percent: f64) -> BodyFatBand {
    let cutoffs: [(f64, BodyFatBand); 5] = match gender {
        Gender::Male => [
            (6.0, BodyFatBand::Essential),
            (14.0, BodyFatBand::Athletic),
            (18.0, BodyFatBand::Fit),
            (25.0, BodyFatBand::Average),
            (32.0, BodyFatBand::AboveAverage),
        ],
        _ => [
            (14.0, BodyFatBand::Essential),
            (21.0, BodyFatBand::Athletic),
            (25.0, BodyFatBand::Fit),
            (32.0, BodyFatBand::Average),
            (39.0, BodyFatBand::AboveAverage),
        ],
    };

    for (limit, band) in cutoffs {
        if percent < limit {
            return band;
        }
    }
    BodyFatBand::Obese
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmr_male_reference_values() {
        // 88.362 + 13.397*70 + 4.799*175 - 5.677*20 = 1753.284
        assert_eq!(bmr(Gender::Male, 20, 175.0, 70.0), 1753.3);
    }

    #[test]
    fn test_bmr_female_reference_values() {
        // 447.593 + 9.247*60 + 3.098*165 - 4.330*25 = 1405.333
        assert_eq!(bmr(Gender::Female, 25, 165.0, 60.0), 1405.3);
    }

    #[test]
    fn test_bmr_other_uses_female_branch() {
        assert_eq!(
            bmr(Gender::Other, 25, 165.0, 60.0),
            bmr(Gender::Female, 25, 165.0, 60.0)
        );
    }

    #[test]
    fn test_bmr_rounded_to_one_decimal() {
        let value = bmr(Gender::Male, 33, 181.0, 77.7);
        assert_eq!(value, (value * 10.0).round() / 10.0);
    }

    #[test]
    fn test_activity_multiplier_known_categories() {
        let m = activity_multiplier(
            Lifestyle::StudentOrOffice,
            ExerciseFrequency::X3,
            FitnessLevel::Average,
        );
        assert!((m - 1.43).abs() < 1e-9);
    }

    #[test]
    fn test_activity_multiplier_unknown_labels_use_defaults() {
        let m = activity_multiplier(
            Lifestyle::from_label("couch potato"),
            ExerciseFrequency::from_label("sometimes"),
            FitnessLevel::from_label("heroic"),
        );
        // 1.2 base + 0 frequency + 0.08 average fitness
        assert!((m - 1.28).abs() < 1e-9);
    }

    #[test]
    fn test_activity_multiplier_monotone_in_frequency() {
        let freqs = [
            ExerciseFrequency::None,
            ExerciseFrequency::X1,
            ExerciseFrequency::X2,
            ExerciseFrequency::X3,
            ExerciseFrequency::X4,
            ExerciseFrequency::X5,
            ExerciseFrequency::X6,
            ExerciseFrequency::X7,
        ];
        let values: Vec<f64> = freqs
            .iter()
            .map(|f| activity_multiplier(Lifestyle::Active, *f, FitnessLevel::Good))
            .collect();
        for pair in values.windows(2) {
            assert!(pair[0] <= pair[1], "frequency bonus must not decrease");
        }
    }

    #[test]
    fn test_activity_multiplier_monotone_in_fitness() {
        let levels = [
            FitnessLevel::VeryPoor,
            FitnessLevel::Poor,
            FitnessLevel::BelowAverage,
            FitnessLevel::Average,
            FitnessLevel::AboveAverage,
            FitnessLevel::Good,
            FitnessLevel::VeryGood,
        ];
        let values: Vec<f64> = levels
            .iter()
            .map(|l| activity_multiplier(Lifestyle::Active, ExerciseFrequency::X2, *l))
            .collect();
        for pair in values.windows(2) {
            assert!(pair[0] <= pair[1], "fitness bonus must not decrease");
        }
    }

    #[test]
    fn test_macros_maintenance_energy_balance() {
        let m = macros(2000.0, Goal::Maintenance);
        let recomputed = m.protein_g * 4.0 + m.carbs_g * 4.0 + m.fat_g * 9.0;
        assert!(
            (recomputed - 2000.0).abs() < 2.0,
            "4/4/9 grams should re-sum to the calorie target, got {recomputed}"
        );
    }

    #[test]
    fn test_macros_goal_shifts() {
        assert_eq!(macros(2000.0, Goal::WeightLoss).calories, 1500.0);
        assert_eq!(macros(2000.0, Goal::Maintenance).calories, 2000.0);
        assert_eq!(macros(2000.0, Goal::BulkUp).calories, 2500.0);
    }

    #[test]
    fn test_macros_ratio() {
        let m = macros(2000.0, Goal::Maintenance);
        assert_eq!(m.carbs_g, 250.0); // 2000 * 0.5 / 4
        assert_eq!(m.protein_g, 150.0); // 2000 * 0.3 / 4
        assert_eq!(m.fat_g, 44.4); // 2000 * 0.2 / 9
    }

    #[test]
    fn test_heart_rate_range_average() {
        let (lo, hi) = heart_rate_range(20, FitnessLevel::Average);
        assert_eq!(lo, 130); // 200 * 0.65
        assert_eq!(hi, 150); // 200 * 0.75
    }

    #[test]
    fn test_heart_rate_range_zone_table() {
        let (lo, hi) = heart_rate_range(40, FitnessLevel::VeryGood);
        assert_eq!(lo, 144); // 180 * 0.8
        assert_eq!(hi, 162); // 180 * 0.9
    }

    #[test]
    fn test_body_fat_clamped_low() {
        let measurements = BodyMeasurements {
            waist_cm: Some(70.0),
            neck_cm: Some(45.0),
            hip_cm: None,
        };
        let pct = body_fat_percent(Gender::Male, 18, 190.0, 60.0, &measurements);
        assert!((5.0..=50.0).contains(&pct));
    }

    #[test]
    fn test_body_fat_clamped_high_for_extreme_inputs() {
        let pct = body_fat_percent(Gender::Female, 99, 140.0, 200.0, &BodyMeasurements::default());
        assert_eq!(pct, 50.0);
    }

    #[test]
    fn test_body_fat_clamped_for_out_of_range_age() {
        let pct = body_fat_percent(Gender::Male, 500, 175.0, 70.0, &BodyMeasurements::default());
        assert!((5.0..=50.0).contains(&pct));
    }

    #[test]
    fn test_body_fat_navy_requires_waist_above_neck() {
        // waist <= neck has no log argument, falls back to BMI formula
        let measurements = BodyMeasurements {
            waist_cm: Some(40.0),
            neck_cm: Some(45.0),
            hip_cm: None,
        };
        let with_bad_tape = body_fat_percent(Gender::Male, 20, 175.0, 70.0, &measurements);
        let bmi_only = body_fat_percent(Gender::Male, 20, 175.0, 70.0, &BodyMeasurements::default());
        assert_eq!(with_bad_tape, bmi_only);
    }

    #[test]
    fn test_body_fat_female_navy_needs_hip() {
        let no_hip = BodyMeasurements {
            waist_cm: Some(75.0),
            neck_cm: Some(33.0),
            hip_cm: None,
        };
        let bmi_only = body_fat_percent(Gender::Female, 25, 165.0, 60.0, &BodyMeasurements::default());
        assert_eq!(
            body_fat_percent(Gender::Female, 25, 165.0, 60.0, &no_hip),
            bmi_only
        );
    }

    #[test]
    fn test_body_fat_band_cutoffs_differ_by_gender() {
        assert_eq!(body_fat_band(Gender::Male, 15.0), BodyFatBand::Fit);
        assert_eq!(body_fat_band(Gender::Female, 15.0), BodyFatBand::Athletic);
    }

    #[test]
    fn test_body_fat_band_obese_is_terminal() {
        assert_eq!(body_fat_band(Gender::Male, 45.0), BodyFatBand::Obese);
        assert_eq!(body_fat_band(Gender::Female, 45.0), BodyFatBand::Obese);
    }

    #[test]
    fn test_gender_label_round_trip() {
        for g in [Gender::Male, Gender::Female, Gender::Other] {
            assert_eq!(Gender::from_label(g.label()), g);
        }
    }

    #[test]
    fn test_gender_from_label_case_insensitive() {
        assert_eq!(Gender::from_label("female"), Gender::Female);
        assert_eq!(Gender::from_label("MALE"), Gender::Male);
        assert_eq!(Gender::from_label(" Female "), Gender::Female);
        assert_eq!(Gender::from_label("nonbinary"), Gender::Other);
    }
}
