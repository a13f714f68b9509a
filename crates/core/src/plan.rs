//! Consumption-plan vocabulary and weekly quota ceilings.
//!
//! The plan stamped onto a meal record at registration time drives quota
//! accounting for that record's week, even if the roster plan changes later.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Storage constants
// ---------------------------------------------------------------------------

pub const PLAN_UNLIMITED: &str = "unlimited";
pub const PLAN_WEEKLY_5: &str = "weekly_5";
pub const PLAN_WEEKLY_4: &str = "weekly_4";
pub const PLAN_WEEKLY_3: &str = "weekly_3";
pub const PLAN_WEEKLY_2: &str = "weekly_2";
pub const PLAN_ADHOC: &str = "adhoc";

/// All valid consumption plans.
pub const VALID_PLANS: &[&str] = &[
    PLAN_UNLIMITED,
    PLAN_WEEKLY_5,
    PLAN_WEEKLY_4,
    PLAN_WEEKLY_3,
    PLAN_WEEKLY_2,
    PLAN_ADHOC,
];

// ---------------------------------------------------------------------------
// ConsumptionPlan
// ---------------------------------------------------------------------------

/// A student's subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumptionPlan {
    Unlimited,
    Weekly5,
    Weekly4,
    Weekly3,
    Weekly2,
    /// Pay-per-meal, no subscription; quota never applies.
    Adhoc,
}

impl ConsumptionPlan {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unlimited => PLAN_UNLIMITED,
            Self::Weekly5 => PLAN_WEEKLY_5,
            Self::Weekly4 => PLAN_WEEKLY_4,
            Self::Weekly3 => PLAN_WEEKLY_3,
            Self::Weekly2 => PLAN_WEEKLY_2,
            Self::Adhoc => PLAN_ADHOC,
        }
    }

    /// Human-readable label for report tables.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unlimited => "Unlimited",
            Self::Weekly5 => "5x / week",
            Self::Weekly4 => "4x / week",
            Self::Weekly3 => "3x / week",
            Self::Weekly2 => "2x / week",
            Self::Adhoc => "Ad hoc",
        }
    }

    /// Parse from a storage string, rejecting unknown values.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            PLAN_UNLIMITED => Ok(Self::Unlimited),
            PLAN_WEEKLY_5 => Ok(Self::Weekly5),
            PLAN_WEEKLY_4 => Ok(Self::Weekly4),
            PLAN_WEEKLY_3 => Ok(Self::Weekly3),
            PLAN_WEEKLY_2 => Ok(Self::Weekly2),
            PLAN_ADHOC => Ok(Self::Adhoc),
            other => Err(CoreError::Validation(format!(
                "Unknown consumption plan: '{other}'. Valid plans: {}",
                VALID_PLANS.join(", ")
            ))),
        }
    }

    /// Weekly meal ceiling, or `None` when the plan is unbounded.
    pub fn weekly_ceiling(&self) -> Option<u32> {
        match self {
            Self::Unlimited | Self::Adhoc => None,
            Self::Weekly5 => Some(5),
            Self::Weekly4 => Some(4),
            Self::Weekly3 => Some(3),
            Self::Weekly2 => Some(2),
        }
    }

    /// Whether `count` meals in one week exceeds this plan's ceiling.
    ///
    /// The quota is advisory: callers surface the answer as a warning and
    /// never block the write on it.
    pub fn exceeds_quota(&self, count: u32) -> bool {
        match self.weekly_ceiling() {
            Some(ceiling) => count > ceiling,
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_storage_string() {
        for s in VALID_PLANS {
            assert_eq!(ConsumptionPlan::from_str(s).unwrap().as_str(), *s);
        }
    }

    #[test]
    fn rejects_unknown_plan() {
        assert!(ConsumptionPlan::from_str("weekly_7").is_err());
    }

    #[test]
    fn weekly_plans_have_matching_ceiling() {
        assert_eq!(ConsumptionPlan::Weekly5.weekly_ceiling(), Some(5));
        assert_eq!(ConsumptionPlan::Weekly4.weekly_ceiling(), Some(4));
        assert_eq!(ConsumptionPlan::Weekly3.weekly_ceiling(), Some(3));
        assert_eq!(ConsumptionPlan::Weekly2.weekly_ceiling(), Some(2));
    }

    #[test]
    fn unbounded_plans_have_no_ceiling() {
        assert_eq!(ConsumptionPlan::Unlimited.weekly_ceiling(), None);
        assert_eq!(ConsumptionPlan::Adhoc.weekly_ceiling(), None);
    }

    #[test]
    fn fourth_meal_exceeds_weekly_3() {
        assert!(ConsumptionPlan::Weekly3.exceeds_quota(4));
    }

    #[test]
    fn third_meal_within_weekly_3() {
        assert!(!ConsumptionPlan::Weekly3.exceeds_quota(3));
    }

    #[test]
    fn unlimited_never_exceeds() {
        assert!(!ConsumptionPlan::Unlimited.exceeds_quota(100));
        assert!(!ConsumptionPlan::Adhoc.exceeds_quota(100));
    }
}
