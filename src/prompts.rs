//! Workout request builders - canned plan prompts and the custom wizard
//!
//! Each plan kind expands to a full natural-language request with the
//! user's profile interpolated.

use clap::ValueEnum;

use crate::store::UserProfile;

/// The one-click plan requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlanKind {
    FullBody,
    UpperBody,
    LowerBody,
    WeeklySplit,
    Quick30,
    CardioStrength,
    Beginner,
    PushPullLegs,
    HighIntensity,
}

impl PlanKind {
    pub fn slug(&self) -> &'static str {
        match self {
            PlanKind::FullBody => "full-body",
            PlanKind::UpperBody => "upper-body",
            PlanKind::LowerBody => "lower-body",
            PlanKind::WeeklySplit => "weekly-split",
            PlanKind::Quick30 => "quick-30",
            PlanKind::CardioStrength => "cardio-strength",
            PlanKind::Beginner => "beginner",
            PlanKind::PushPullLegs => "push-pull-legs",
            PlanKind::HighIntensity => "high-intensity",
        }
    }

    /// Build the pre-filled question for this plan.
    pub fn request(&self, profile: &UserProfile) -> String {
        let about = about_me(profile);
        match self {
            PlanKind::FullBody => format!(
                "Create a full body workout routine for me using the available gym equipment. \
                 {about}. Focus on compound movements and include proper warm-up and cool-down."
            ),
            PlanKind::UpperBody => format!(
                "Create an upper body focused workout routine using the available gym equipment. \
                 {about}. Include chest, back, shoulders, and arms exercises."
            ),
            PlanKind::LowerBody => format!(
                "Create a lower body focused workout routine using the available gym equipment. \
                 {about}. Include legs, glutes, and core exercises."
            ),
            PlanKind::WeeklySplit => format!(
                "Create a complete weekly workout split for me using the available gym equipment. \
                 {about}. Plan out each day of the week with specific exercises, sets, reps, and \
                 rest days. Make it a balanced program that targets all muscle groups throughout \
                 the week."
            ),
            PlanKind::Quick30 => format!(
                "Create a quick 30-minute workout routine using the available gym equipment. \
                 {about}. Make it efficient and effective for busy students."
            ),
            PlanKind::CardioStrength => format!(
                "Create a cardio and strength combined workout using the available gym equipment. \
                 {about}. Include both cardio and strength training elements."
            ),
            PlanKind::Beginner => format!(
                "Create a beginner-friendly workout routine using the available gym equipment. \
                 {about}. Focus on proper form and progression."
            ),
            PlanKind::PushPullLegs => format!(
                "Create a push/pull/legs workout split using the available gym equipment. \
                 {about}. Include push day (chest, shoulders, triceps), pull day (back, biceps), \
                 and legs day with proper rest between muscle groups."
            ),
            PlanKind::HighIntensity => format!(
                "Create a high intensity training (HIT) workout using the available gym \
                 equipment. {about}. Focus on maximum effort with shorter rest periods and \
                 higher intensity."
            ),
        }
    }
}

/// "I'm a 20-year-old male, average fitness level, exercise 3x/week
/// and participate in Basketball" - the profile sentence every plan
/// request embeds.
fn about_me(profile: &UserProfile) -> String {
    format!(
        "I'm a {}-year-old {}, {} fitness level, exercise {}{}",
        profile.age_or_default(),
        profile.gender_or_default().to_lowercase(),
        profile.fitness_level_or_default().to_lowercase(),
        profile.exercise_frequency_or_default().to_lowercase(),
        sports_info(profile),
    )
}

fn sports_info(profile: &UserProfile) -> String {
    if profile.sports_activities.is_empty() {
        " and don't participate in any specific sports".to_string()
    } else {
        format!(" and participate in {}", profile.sports_activities.join(", "))
    }
}

/// Inputs of the three-step custom workout wizard
#[derive(Debug, Clone, Default)]
pub struct CustomWorkoutRequest {
    /// e.g. ["Mon", "Wed", "Fri"]
    pub workout_days: Vec<String>,
    /// e.g. "45 minutes"
    pub duration: String,
    /// e.g. "Build muscle / Gain strength"
    pub primary_goal: String,
    /// e.g. ["Chest", "Back"]
    pub focus_areas: Vec<String>,
    /// e.g. "Moderate intensity / Balanced"
    pub style: String,
    /// e.g. "Prefer free weights (dumbbells, barbells)"
    pub equipment_preference: String,
    /// e.g. "Intermediate"
    pub experience: String,
    pub limitations: Option<String>,
    pub additional_prefs: Option<String>,
}

impl CustomWorkoutRequest {
    /// Expand into the long-form personalized prompt.
    pub fn request(&self, profile: &UserProfile) -> String {
        let focus_str = if self.focus_areas.is_empty() {
            "Full Body".to_string()
        } else {
            self.focus_areas.join(", ")
        };
        let limitations_str = match self.limitations.as_deref() {
            Some(l) if !l.is_empty() => format!("\n\nIMPORTANT LIMITATIONS TO CONSIDER: {l}"),
            _ => String::new(),
        };
        let prefs_str = match self.additional_prefs.as_deref() {
            Some(p) if !p.is_empty() => format!("\n\nADDITIONAL PREFERENCES: {p}"),
            _ => String::new(),
        };
        let workout_days_str = if self.workout_days.is_empty() {
            "Not specified".to_string()
        } else {
            self.workout_days.join(", ")
        };
        let num_days = self.workout_days.len();
        let sports = if profile.sports_activities.is_empty() {
            "None".to_string()
        } else {
            profile.sports_activities.join(", ")
        };
        let height_cm = profile.height_cm_or_default();
        let feet = (height_cm / 30.48) as u32;
        let inches = ((height_cm % 30.48) / 2.54) as u32;

        format!(
            "Create a completely personalized and custom workout routine specifically designed \
             for me based on ALL the following information:\n\n\
             MY PROFILE:\n\
             - Age: {age} years old\n\
             - Gender: {gender}\n\
             - Height: {height_cm}cm ({feet}ft {inches}in)\n\
             - Weight: {weight_kg}kg ({weight_lbs}lbs)\n\
             - Current fitness level: {fitness}\n\
             - Exercise experience: {experience}\n\
             - Lifestyle: {lifestyle}\n\
             - Current exercise frequency: {frequency}\n\
             - Sports/Activities: {sports}\n\n\
             MY WORKOUT PREFERENCES:\n\
             - Desired workout days: {days} ({num_days} day(s) per week)\n\
             - Desired workout duration: {duration}\n\
             - Primary fitness goal: {goal}\n\
             - Focus areas: {focus}\n\
             - Preferred workout style: {style}\n\
             - Equipment preference: {equipment}\n\
             - Experience level for this workout: {workout_experience}{limitations}{prefs}\n\n\
             Please create a detailed, personalized workout plan using the available gym \
             equipment that:\n\
             1. Is scheduled for these specific days: {days} ({num_days} day(s) per week)\n\
             2. Matches my desired duration: {duration}\n\
             3. Aligns with my primary goal: {goal}\n\
             4. Focuses on: {focus}\n\
             5. Uses my preferred style: {style}\n\
             6. Respects my equipment preference: {equipment}\n\
             7. Is appropriate for my experience level: {workout_experience}\n\
             8. Includes specific exercises, sets, reps, rest periods, and progression\n\
             9. Considers all my profile information and preferences\n\
             10. Provides proper warm-up and cool-down\n\
             11. Is safe, effective, and tailored specifically for me\n\n\
             Make it the perfect workout routine for my needs!",
            age = profile.age_or_default(),
            gender = profile.gender_or_default(),
            height_cm = height_cm,
            feet = feet,
            inches = inches,
            weight_kg = profile.weight_kg_or_default(),
            weight_lbs = profile.weight_lbs_or_default(),
            fitness = profile.fitness_level_or_default(),
            experience = profile.exercise_experience_or_default(),
            lifestyle = profile.lifestyle_or_default(),
            frequency = profile.exercise_frequency_or_default(),
            sports = sports,
            days = workout_days_str,
            num_days = num_days,
            duration = self.duration,
            goal = self.primary_goal,
            focus = focus_str,
            style = self.style,
            equipment = self.equipment_preference,
            workout_experience = self.experience,
            limitations = limitations_str,
            prefs = prefs_str,
        )
    }
}
