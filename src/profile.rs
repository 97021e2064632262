/// User profile driving personalization of nutrition advice
use enumset::{EnumSet, EnumSetType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ───────────────────────────────────────────────────────────────────────────────
// Fitness goals
// ───────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    /// Nothing chosen yet; kept selectable so a fresh session has a value.
    #[default]
    Unselected,
    WeightLoss,
    MuscleGain,
    Endurance,
    Maintenance,
}

impl FitnessGoal {
    pub const ALL: [FitnessGoal; 5] = [
        FitnessGoal::Unselected,
        FitnessGoal::WeightLoss,
        FitnessGoal::MuscleGain,
        FitnessGoal::Endurance,
        FitnessGoal::Maintenance,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            FitnessGoal::Unselected => "Select",
            FitnessGoal::WeightLoss => "Weight Loss",
            FitnessGoal::MuscleGain => "Muscle Gain",
            FitnessGoal::Endurance => "Endurance",
            FitnessGoal::Maintenance => "Maintenance",
        }
    }
}

impl fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FitnessGoal {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "select" | "unselected" => Ok(FitnessGoal::Unselected),
            "weightloss" | "loss" | "cut" => Ok(FitnessGoal::WeightLoss),
            "musclegain" | "gain" | "muscle" | "bulk" => Ok(FitnessGoal::MuscleGain),
            "endurance" => Ok(FitnessGoal::Endurance),
            "maintenance" | "maintain" => Ok(FitnessGoal::Maintenance),
            _ => Err(format!(
                "unknown goal '{s}' (valid: select, weight_loss, muscle_gain, endurance, maintenance)"
            )),
        }
    }
}

// ───────────────────────────────────────────────────────────────────────────────
// Fitness levels
// ───────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    pub const ALL: [FitnessLevel; 3] = [
        FitnessLevel::Beginner,
        FitnessLevel::Intermediate,
        FitnessLevel::Advanced,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "Beginner",
            FitnessLevel::Intermediate => "Intermediate",
            FitnessLevel::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FitnessLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "beginner" | "new" | "novice" => Ok(FitnessLevel::Beginner),
            "intermediate" | "mid" => Ok(FitnessLevel::Intermediate),
            "advanced" | "expert" | "pro" => Ok(FitnessLevel::Advanced),
            _ => Err(format!(
                "unknown level '{s}' (valid: beginner, intermediate, advanced)"
            )),
        }
    }
}

// ───────────────────────────────────────────────────────────────────────────────
// Dietary restrictions (multi-select)
// ───────────────────────────────────────────────────────────────────────────────

#[derive(EnumSetType, Debug)]
pub enum DietaryRestriction {
    None,
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
}

impl DietaryRestriction {
    pub const ALL: [DietaryRestriction; 5] = [
        DietaryRestriction::None,
        DietaryRestriction::Vegetarian,
        DietaryRestriction::Vegan,
        DietaryRestriction::GlutenFree,
        DietaryRestriction::DairyFree,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            DietaryRestriction::None => "None",
            DietaryRestriction::Vegetarian => "Vegetarian",
            DietaryRestriction::Vegan => "Vegan",
            DietaryRestriction::GlutenFree => "Gluten-free",
            DietaryRestriction::DairyFree => "Dairy-free",
        }
    }
}

impl fmt::Display for DietaryRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DietaryRestriction {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "none" => Ok(DietaryRestriction::None),
            "vegetarian" | "veggie" => Ok(DietaryRestriction::Vegetarian),
            "vegan" => Ok(DietaryRestriction::Vegan),
            "glutenfree" | "gf" => Ok(DietaryRestriction::GlutenFree),
            "dairyfree" | "df" => Ok(DietaryRestriction::DairyFree),
            _ => Err(format!(
                "unknown restriction '{s}' (valid: none, vegetarian, vegan, gluten-free, dairy-free)"
            )),
        }
    }
}

// Transparent set wrapper serialized as a list of display labels
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RestrictionSet(#[serde(with = "restriction_set_serde")] pub EnumSet<DietaryRestriction>);

impl Default for RestrictionSet {
    fn default() -> Self {
        RestrictionSet(EnumSet::empty())
    }
}

impl RestrictionSet {
    pub fn insert(&mut self, restriction: DietaryRestriction) {
        self.0.insert(restriction);
    }

    pub fn clear(&mut self) {
        self.0 = EnumSet::empty();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, restriction: DietaryRestriction) -> bool {
        self.0.contains(restriction)
    }

    /// Comma-joined labels in declaration order, or "None" when empty.
    pub fn labels(&self) -> String {
        if self.0.is_empty() {
            return "None".to_string();
        }
        DietaryRestriction::ALL
            .into_iter()
            .filter(|r| self.0.contains(*r))
            .map(|r| r.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

mod restriction_set_serde {
    use super::*;
    pub fn serialize<S>(set: &EnumSet<DietaryRestriction>, s: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let v: Vec<String> = DietaryRestriction::ALL
            .into_iter()
            .filter(|r| set.contains(*r))
            .map(|r| r.to_string())
            .collect();
        v.serialize(s)
    }
    pub fn deserialize<'de, D>(d: D) -> Result<EnumSet<DietaryRestriction>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = Vec::<String>::deserialize(d)?;
        let mut out = EnumSet::empty();
        for s in v {
            let r = DietaryRestriction::from_str(&s).map_err(serde::de::Error::custom)?;
            out.insert(r);
        }
        Ok(out)
    }
}

// ───────────────────────────────────────────────────────────────────────────────
// Profile
// ───────────────────────────────────────────────────────────────────────────────

/// Mutable per-session profile; the presentation layer may overwrite any
/// field at any time, and request assembly reads whatever is current.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UserProfile {
    pub goal: FitnessGoal,
    pub level: FitnessLevel,
    pub restrictions: RestrictionSet,
}

impl UserProfile {
    /// One-sentence summary injected into each outbound request as profile
    /// context for the model.
    pub fn context_sentence(&self) -> String {
        format!(
            "User is {} level with {} goals. Restrictions: {}.",
            self.level,
            self.goal,
            self.restrictions.labels()
        )
    }
}

fn normalize(s: &str) -> String {
    s.to_ascii_lowercase().replace(['_', '-', ' '], "")
}
