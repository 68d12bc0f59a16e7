//! Validation rule and rule table types.

use serde::{Deserialize, Serialize};

/// Length bound for strings, count bound for sequences, value bound for
/// numbers. An absent side is unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

impl ValidationRule {
    pub const fn new(min: Option<u32>, max: Option<u32>) -> Self {
        Self { min, max }
    }

    pub const fn between(min: u32, max: u32) -> Self {
        Self::new(Some(min), Some(max))
    }

    pub const fn at_least(min: u32) -> Self {
        Self::new(Some(min), None)
    }
}

/// Field name -> rule constraints shared by the actor and job workflows.
///
/// Built once at startup and handed to the workflows by reference; there is
/// no global instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    pub name: ValidationRule,
    pub description: ValidationRule,
    pub title: ValidationRule,
    pub budget: ValidationRule,
    pub categories: ValidationRule,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self {
            name: ValidationRule::between(2, 100),
            description: ValidationRule::between(10, 1000),
            title: ValidationRule::between(5, 200),
            budget: ValidationRule::at_least(1),
            categories: ValidationRule::between(1, 5),
        }
    }
}

impl RuleTable {
    /// Look up a rule by field name.
    pub fn get(&self, field: &str) -> Option<&ValidationRule> {
        match field {
            "name" => Some(&self.name),
            "description" => Some(&self.description),
            "title" => Some(&self.title),
            "budget" => Some(&self.budget),
            "categories" => Some(&self.categories),
            _ => None,
        }
    }
}
