//! User store - flat JSON file mapping email to profile
//!
//! Every read loads and deserializes the whole file; every write
//! serializes the whole map back with 2-space indentation. There is no
//! locking: two concurrent writers race and the last one wins. Known
//! gap, acceptable for a single-user tool.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Inches per foot and cm conversions used by the profile forms
const CM_PER_FOOT: f64 = 30.48;
const CM_PER_INCH: f64 = 2.54;
const KG_PER_LB: f64 = 0.453592;
const LB_PER_KG: f64 = 2.20462;

/// Named circumference measurements in inches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MuscleMeasurements {
    pub chest: Option<f64>,
    pub shoulders: Option<f64>,
    pub biceps_left: Option<f64>,
    pub biceps_right: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub thigh_left: Option<f64>,
    pub thigh_right: Option<f64>,
}

impl MuscleMeasurements {
    pub fn is_empty(&self) -> bool {
        *self == MuscleMeasurements::default()
    }
}

/// One generated workout recorded in the profile history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutEntry {
    /// RFC 3339 timestamp
    pub date: String,
    /// What was requested, e.g. "full-body" or "custom"
    pub request: String,
    /// Names of the parsed exercises, empty when parsing found none
    pub exercises: Vec<String>,
}

/// Display and notification preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub language: String,
    pub notifications: bool,
    pub theme: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: "English".to_string(),
            notifications: true,
            theme: "light".to_string(),
        }
    }
}

/// A user record. Every field beyond the signup basics is optional
/// with a named default, replacing the ad hoc get-or-default lookups
/// of a schemaless profile dictionary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub email: String,
    /// SHA-256 hex of the password. No salt, not production-grade.
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub height_feet: Option<u32>,
    pub height_inches: Option<u32>,
    pub height_cm: Option<f64>,
    pub weight_lbs: Option<f64>,
    pub weight_kg: Option<f64>,
    pub lifestyle: Option<String>,
    pub exercise_experience: Option<String>,
    pub exercise_frequency: Option<String>,
    pub fitness_level: Option<String>,
    pub sports_activities: Vec<String>,
    pub bench_press_pr: Option<f64>,
    pub squat_pr: Option<f64>,
    pub muscle_measurements: MuscleMeasurements,
    pub created_at: Option<String>,
    pub last_login: Option<String>,
    pub workout_history: Vec<WorkoutEntry>,
    pub preferences: Preferences,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            age: None,
            gender: None,
            height_feet: None,
            height_inches: None,
            height_cm: None,
            weight_lbs: None,
            weight_kg: None,
            lifestyle: None,
            exercise_experience: None,
            exercise_frequency: None,
            fitness_level: None,
            sports_activities: Vec::new(),
            bench_press_pr: None,
            squat_pr: None,
            muscle_measurements: MuscleMeasurements::default(),
            created_at: None,
            last_login: None,
            workout_history: Vec::new(),
            preferences: Preferences::default(),
        }
    }
}

impl UserProfile {
    // Named defaults used by calculators and prompt builders when the
    // profile was never completed.
    pub fn age_or_default(&self) -> u32 {
        self.age.unwrap_or(20)
    }

    pub fn gender_or_default(&self) -> &str {
        self.gender.as_deref().unwrap_or("Male")
    }

    pub fn height_cm_or_default(&self) -> f64 {
        self.height_cm.unwrap_or(175.0)
    }

    pub fn weight_kg_or_default(&self) -> f64 {
        self.weight_kg.unwrap_or(70.0)
    }

    pub fn lifestyle_or_default(&self) -> &str {
        self.lifestyle.as_deref().unwrap_or("Student or office worker")
    }

    pub fn exercise_frequency_or_default(&self) -> &str {
        self.exercise_frequency.as_deref().unwrap_or("3x/week")
    }

    pub fn fitness_level_or_default(&self) -> &str {
        self.fitness_level.as_deref().unwrap_or("Average")
    }

    pub fn exercise_experience_or_default(&self) -> &str {
        self.exercise_experience.as_deref().unwrap_or("Beginner")
    }

    /// Set height from feet/inches, deriving centimeters.
    pub fn set_height(&mut self, feet: u32, inches: u32) {
        self.height_feet = Some(feet);
        self.height_inches = Some(inches);
        self.height_cm = Some(feet as f64 * CM_PER_FOOT + inches as f64 * CM_PER_INCH);
    }

    /// Set weight in pounds, deriving kilograms.
    pub fn set_weight_lbs(&mut self, lbs: f64) {
        self.weight_lbs = Some((lbs * 10.0).round() / 10.0);
        self.weight_kg = Some((lbs * KG_PER_LB * 100.0).round() / 100.0);
    }

    pub fn weight_lbs_or_default(&self) -> f64 {
        self.weight_lbs
            .unwrap_or_else(|| ((self.weight_kg_or_default() * LB_PER_KG) * 10.0).round() / 10.0)
    }

    /// Imperial rendering of the effective height, rounded to the
    /// nearest inch so it always agrees with the stored centimeters.
    pub fn height_feet_inches(&self) -> (u32, u32) {
        let total_inches = (self.height_cm_or_default() / CM_PER_INCH).round() as u32;
        (total_inches / 12, total_inches % 12)
    }
}

/// Partial profile update merged by `UserStore::update_user`. Every
/// field is optional; an empty update means the caller only wants to
/// read.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub height_feet: Option<u32>,
    pub height_inches: Option<u32>,
    pub weight_lbs: Option<f64>,
    pub lifestyle: Option<String>,
    pub exercise_experience: Option<String>,
    pub exercise_frequency: Option<String>,
    pub fitness_level: Option<String>,
    pub sports_activities: Option<Vec<String>>,
    pub bench_press_pr: Option<f64>,
    pub squat_pr: Option<f64>,
    pub language: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.age.is_none()
            && self.gender.is_none()
            && self.height_feet.is_none()
            && self.height_inches.is_none()
            && self.weight_lbs.is_none()
            && self.lifestyle.is_none()
            && self.exercise_experience.is_none()
            && self.exercise_frequency.is_none()
            && self.fitness_level.is_none()
            && self.sports_activities.is_none()
            && self.bench_press_pr.is_none()
            && self.squat_pr.is_none()
            && self.language.is_none()
    }

    /// Merge into an existing profile. Height accepts either unit
    /// alone: the missing one falls back to the stored value.
    pub fn apply(self, p: &mut UserProfile) {
        if let Some(age) = self.age {
            p.age = Some(age);
        }
        if let Some(gender) = self.gender {
            p.gender = Some(gender);
        }
        if self.height_feet.is_some() || self.height_inches.is_some() {
            let feet = self.height_feet.or(p.height_feet).unwrap_or(5);
            let inches = self.height_inches.or(p.height_inches).unwrap_or(0);
            p.set_height(feet, inches);
        }
        if let Some(lbs) = self.weight_lbs {
            p.set_weight_lbs(lbs);
        }
        if let Some(v) = self.lifestyle {
            p.lifestyle = Some(v);
        }
        if let Some(v) = self.exercise_experience {
            p.exercise_experience = Some(v);
        }
        if let Some(v) = self.exercise_frequency {
            p.exercise_frequency = Some(v);
        }
        if let Some(v) = self.fitness_level {
            p.fitness_level = Some(v);
        }
        if let Some(v) = self.sports_activities {
            p.sports_activities = v;
        }
        if let Some(v) = self.bench_press_pr {
            p.bench_press_pr = Some(v);
        }
        if let Some(v) = self.squat_pr {
            p.squat_pr = Some(v);
        }
        if let Some(v) = self.language {
            p.preferences.language = v;
        }
    }
}

/// Flat-file user store
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the whole mapping. A missing file is an empty store; an
    /// unreadable or malformed file is an error rather than silent
    /// data loss on the next save.
    pub fn load(&self) -> Result<BTreeMap<String, UserProfile>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| Error::StoreRead {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| Error::StoreRead {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Serialize the whole mapping back with 2-space indentation.
    pub fn save(&self, users: &BTreeMap<String, UserProfile>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| Error::StoreWrite {
                    path: self.path.clone(),
                    source: e,
                })?;
            }
        }
        let json = serde_json::to_string_pretty(users)?;
        fs::write(&self.path, json).map_err(|e| Error::StoreWrite {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Insert a new record. Fails with `DuplicateEmail` and leaves the
    /// existing record untouched when the key is already present.
    pub fn create_user(&self, profile: UserProfile) -> Result<()> {
        let mut users = self.load()?;
        if users.contains_key(&profile.email) {
            warn!(email = %profile.email, "signup rejected, email exists");
            return Err(Error::DuplicateEmail);
        }
        info!(email = %profile.email, "creating user record");
        users.insert(profile.email.clone(), profile);
        self.save(&users)
    }

    pub fn get_user(&self, email: &str) -> Result<Option<UserProfile>> {
        Ok(self.load()?.get(email).cloned())
    }

    /// Read-modify-write of a single record.
    pub fn update_user<F>(&self, email: &str, mutate: F) -> Result<UserProfile>
    where
        F: FnOnce(&mut UserProfile),
    {
        let mut users = self.load()?;
        let profile = users.get_mut(email).ok_or_else(|| Error::UnknownUser {
            email: email.to_string(),
        })?;
        mutate(profile);
        let updated = profile.clone();
        self.save(&users)?;
        Ok(updated)
    }

    /// Append a workout entry to the user's history.
    pub fn record_workout(&self, email: &str, request: &str, exercises: Vec<String>) -> Result<()> {
        self.update_user(email, |profile| {
            profile.workout_history.push(WorkoutEntry {
                date: Utc::now().to_rfc3339(),
                request: request.to_string(),
                exercises,
            });
        })?;
        Ok(())
    }
}
