use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::errors::SchemaValidationError;

/// A generated startup plan. Field order here is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    pub problem: String,
    pub audience: String,
    pub features: Vec<String>,
    pub revenue: String,
    pub roadmap: Vec<String>,
}

const STRING_FIELDS: [&str; 4] = ["name", "problem", "audience", "revenue"];
const LIST_FIELDS: [&str; 2] = ["features", "roadmap"];
const SCHEMA_ORDER: [&str; 6] = ["name", "problem", "audience", "features", "revenue", "roadmap"];

impl Plan {
    /// Validate an untyped JSON tree into a Plan.
    ///
    /// Every offending field is reported, in schema order. Unknown keys are ignored.
    pub fn from_value(v: &Value) -> Result<Plan, SchemaValidationError> {
        let obj = match v.as_object() {
            Some(o) => o,
            None => {
                return Err(SchemaValidationError {
                    fields: SCHEMA_ORDER.iter().map(|f| f.to_string()).collect(),
                })
            }
        };

        let mut bad = Vec::new();
        for field in SCHEMA_ORDER {
            let ok = match obj.get(field) {
                Some(Value::String(s)) if STRING_FIELDS.contains(&field) => field != "name" || !s.trim().is_empty(),
                Some(Value::Array(items)) if LIST_FIELDS.contains(&field) => {
                    items.iter().all(Value::is_string) && (field != "features" || !items.is_empty())
                }
                _ => false,
            };
            if !ok {
                bad.push(field.to_string());
            }
        }
        if !bad.is_empty() {
            return Err(SchemaValidationError { fields: bad });
        }

        let text = |k: &str| obj[k].as_str().unwrap_or_default().to_string();
        let list = |k: &str| -> Vec<String> {
            obj[k]
                .as_array()
                .map(|a| a.iter().filter_map(Value::as_str).map(str::to_string).collect())
                .unwrap_or_default()
        };

        Ok(Plan {
            name: text("name"),
            problem: text("problem"),
            audience: text("audience"),
            features: list("features"),
            revenue: text("revenue"),
            roadmap: list("roadmap"),
        })
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    App,
    #[value(alias = "ai")]
    AiTool,
    Marketplace,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::App, Category::AiTool, Category::Marketplace];

    pub fn label(self) -> &'static str {
        match self {
            Category::App => "App",
            Category::AiTool => "AI Tool",
            Category::Marketplace => "Marketplace",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// School grade the plan's vocabulary is pitched at, 6 through 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeLevel(u8);

impl GradeLevel {
    pub const MIN: u8 = 6;
    pub const MAX: u8 = 12;

    pub fn new(grade: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&grade).then_some(GradeLevel(grade))
    }

    #[cfg(test)]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for GradeLevel {
    fn default() -> Self {
        GradeLevel(8)
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full() -> Value {
        json!({
            "name": "X", "problem": "P", "audience": "A",
            "features": ["f1", "f2"], "revenue": "R", "roadmap": ["r1"]
        })
    }

    #[test]
    fn valid_mapping_decodes_to_equal_plan() {
        let plan = Plan::from_value(&full()).unwrap();
        assert_eq!(
            plan,
            Plan {
                name: "X".into(),
                problem: "P".into(),
                audience: "A".into(),
                features: vec!["f1".into(), "f2".into()],
                revenue: "R".into(),
                roadmap: vec!["r1".into()],
            }
        );
    }

    #[test]
    fn each_missing_field_is_named() {
        for field in SCHEMA_ORDER {
            let mut v = full();
            v.as_object_mut().unwrap().remove(field);
            let err = Plan::from_value(&v).unwrap_err();
            assert_eq!(err.fields, vec![field.to_string()], "removed {field}");
        }
    }

    #[test]
    fn features_must_be_a_list_of_strings() {
        let mut v = full();
        v["features"] = json!("just one string");
        assert_eq!(Plan::from_value(&v).unwrap_err().fields, vec!["features"]);

        v["features"] = json!(["ok", 3]);
        assert_eq!(Plan::from_value(&v).unwrap_err().fields, vec!["features"]);
    }

    #[test]
    fn null_and_mistyped_fields_are_rejected_together() {
        let mut v = full();
        v["problem"] = Value::Null;
        v["roadmap"] = json!({"q1": "launch"});
        assert_eq!(Plan::from_value(&v).unwrap_err().fields, vec!["problem", "roadmap"]);
    }

    #[test]
    fn blank_name_and_empty_features_violate_invariants() {
        let mut v = full();
        v["name"] = json!("  ");
        v["features"] = json!([]);
        assert_eq!(Plan::from_value(&v).unwrap_err().fields, vec!["name", "features"]);
    }

    #[test]
    fn non_object_reports_every_field() {
        assert_eq!(Plan::from_value(&json!([1, 2])).unwrap_err().fields.len(), 6);
    }

    #[test]
    fn extra_keys_are_ignored_and_wire_shape_round_trips() {
        let mut v = full();
        v["tagline"] = json!("extra");
        let plan = Plan::from_value(&v).unwrap();
        let back = serde_json::to_value(&plan).unwrap();
        assert_eq!(back, full());
    }

    #[test]
    fn grade_range_is_enforced() {
        assert!(GradeLevel::new(5).is_none());
        assert_eq!(GradeLevel::new(6).map(GradeLevel::get), Some(6));
        assert_eq!(GradeLevel::new(12).map(GradeLevel::get), Some(12));
        assert!(GradeLevel::new(13).is_none());
        assert_eq!(GradeLevel::default().get(), 8);
    }

    #[test]
    fn category_labels() {
        assert_eq!(Category::AiTool.to_string(), "AI Tool");
        assert_eq!(Category::from_str("ai-tool", true), Ok(Category::AiTool));
    }
}
