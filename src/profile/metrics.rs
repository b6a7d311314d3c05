//! Baseline targets derived from onboarding answers.
//!
//! Every value is rounded to two decimals with half-to-even rounding on the exact binary
//! value, so recomputing a profile reproduces the targets already stored for it.

use serde::{Deserialize, Serialize};
use time::{Date, Month};

/// Energy density of body fat, kcal per kg.
pub const KCAL_PER_KG: f64 = 7700.0;
pub const MIN_DAILY_CALORIES: f64 = 1200.0;
pub const WATER_L_PER_KG: f64 = 0.033;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Anything other than "male" selects the female equation.
    pub fn from_label(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("male") {
            Sex::Male
        } else {
            Sex::Female
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

impl Goal {
    /// Unrecognized goals keep the maintenance target.
    pub fn from_label(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "lose" => Goal::Lose,
            "gain" => Goal::Gain,
            _ => Goal::Maintain,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Lose => "lose",
            Goal::Maintain => "maintain",
            Goal::Gain => "gain",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifestyle {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

const LIFESTYLE_BREAKPOINTS: [(f64, Lifestyle); 5] = [
    (1.2, Lifestyle::Sedentary),
    (1.375, Lifestyle::Light),
    (1.55, Lifestyle::Moderate),
    (1.725, Lifestyle::Active),
    (1.9, Lifestyle::VeryActive),
];

impl Lifestyle {
    /// Exact match on the multiplier; any other value is `Moderate`.
    #[allow(clippy::float_cmp)]
    pub fn from_multiplier(activity_level: f64) -> Self {
        LIFESTYLE_BREAKPOINTS
            .iter()
            .find(|(multiplier, _)| *multiplier == activity_level)
            .map(|(_, lifestyle)| *lifestyle)
            .unwrap_or(Lifestyle::Moderate)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Lifestyle::Sedentary => "sedentary",
            Lifestyle::Light => "light",
            Lifestyle::Moderate => "moderate",
            Lifestyle::Active => "active",
            Lifestyle::VeryActive => "very_active",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsInput {
    pub sex: Sex,
    pub age: i32,
    pub height_cm: f64,
    pub weight_kg: f64,
    /// Continuous TDEE multiplier (1.2 ..= 1.9 in practice).
    pub activity_level: f64,
    pub goal: Goal,
    pub weight_change_rate_kg_per_week: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    /// January 1st of `today.year() - age`. A placeholder, not a real birth date.
    pub dob_estimate: Date,
    pub lifestyle: Lifestyle,
    pub bmi: f64,
    pub bmr: f64,
    pub tdee: f64,
    pub daily_calorie_target: f64,
    pub daily_water_target_l: f64,
}

pub fn calculate(input: &MetricsInput, today: Date) -> Metrics {
    let height_m = input.height_cm / 100.0;
    let bmi = round2(input.weight_kg / (height_m * height_m));

    // Mifflin-St Jeor
    let mut bmr = 10.0 * input.weight_kg + 6.25 * input.height_cm - 5.0 * f64::from(input.age);
    bmr += match input.sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    let bmr = round2(bmr);

    let tdee = round2(bmr * input.activity_level);

    let adjustment = (input.weight_change_rate_kg_per_week * KCAL_PER_KG) / 7.0;
    let raw_target = match input.goal {
        Goal::Lose => tdee - adjustment,
        Goal::Gain => tdee + adjustment,
        Goal::Maintain => tdee,
    };
    // Rounded before the floor is applied.
    let daily_calorie_target = round2(raw_target).max(MIN_DAILY_CALORIES);

    Metrics {
        dob_estimate: dob_estimate(input.age, today),
        lifestyle: Lifestyle::from_multiplier(input.activity_level),
        bmi,
        bmr,
        tdee,
        daily_calorie_target,
        daily_water_target_l: round2(input.weight_kg * WATER_L_PER_KG),
    }
}

fn dob_estimate(age: i32, today: Date) -> Date {
    let year = today.year().saturating_sub(age).clamp(-9999, 9999);
    Date::from_calendar_date(year, Month::January, 1).unwrap_or(today)
}

/// Two-decimal rounding, half-to-even on the exact binary value.
pub(crate) fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}
