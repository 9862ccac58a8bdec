//! Project color resolution
//!
//! The Unified API reports a project's color either as a name (`"blue"`) or,
//! for data created by older API generations, as a numeric color id. Both
//! forms can coexist, so every read resolves to the name form.

use serde::{Deserialize, Serialize};

/// Legacy Todoist color ids and their names.
///
/// Append-only: ids are never reassigned.
const COLOR_TABLE: &[(i64, &str)] = &[
    (30, "berry_red"),
    (31, "red"),
    (32, "orange"),
    (33, "yellow"),
    (34, "olive_green"),
    (35, "lime_green"),
    (36, "green"),
    (37, "mint_green"),
    (38, "teal"),
    (39, "sky_blue"),
    (40, "light_blue"),
    (41, "blue"),
    (42, "grape"),
    (43, "violet"),
    (44, "lavender"),
    (45, "magenta"),
    (46, "salmon"),
    (47, "charcoal"),
    (48, "grey"),
    (49, "taupe"),
];

/// A color as it appears on the wire
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    /// Missing or `null`
    #[default]
    Absent,
    /// Color name, already canonical
    Name(String),
    /// Legacy numeric color id
    Id(i64),
    /// Anything else the server might send
    Other(serde_json::Value),
}

impl ColorValue {
    /// Resolve to a canonical color name.
    ///
    /// Never fails: unknown ids come back as their decimal string and
    /// unexpected JSON as its textual form.
    pub fn resolve(&self) -> String {
        match self {
            Self::Absent => String::new(),
            Self::Name(name) => name.clone(),
            Self::Id(id) => resolve_id(*id),
            Self::Other(value) => match value {
                serde_json::Value::Number(n) => match integral_id(n) {
                    Some(id) => resolve_id(id),
                    None => n.to_string(),
                },
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        }
    }
}

fn resolve_id(id: i64) -> String {
    color_name_for_id(id)
        .map(str::to_string)
        .unwrap_or_else(|| id.to_string())
}

/// Whole numbers written in float form (`37.0`) still name a color id
fn integral_id(n: &serde_json::Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

impl From<&str> for ColorValue {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<i64> for ColorValue {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

/// Look up the name for a legacy color id
pub fn color_name_for_id(id: i64) -> Option<&'static str> {
    COLOR_TABLE
        .iter()
        .find(|(known, _)| *known == id)
        .map(|(_, name)| *name)
}

/// All known color names, in id order
pub fn known_color_names() -> impl Iterator<Item = &'static str> {
    COLOR_TABLE.iter().map(|(_, name)| *name)
}
