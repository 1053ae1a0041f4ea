use serde::{Deserialize, Serialize};

use crate::models::WeatherVariable;

// =========================================================
// Variable catalog types
// =========================================================

/// Catalog entry describing one supported weather variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableInfo {
    /// Wire name (`wind_speed`)
    pub name: WeatherVariable,
    /// Display label ("Wind Speed")
    pub label: String,
    pub units: String,
    pub data_source: String,
    pub default_threshold: f64,
}

impl VariableInfo {
    pub fn for_variable(variable: WeatherVariable) -> Self {
        Self {
            name: variable,
            label: variable.display_name().to_string(),
            units: variable.units().to_string(),
            data_source: variable.data_source().to_string(),
            default_threshold: variable.default_threshold(),
        }
    }
}

/// Variable catalog response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableListResponse {
    pub variables: Vec<VariableInfo>,
    pub total: usize,
}

impl VariableListResponse {
    /// Catalog of every supported variable.
    pub fn catalog() -> Self {
        let variables: Vec<VariableInfo> = WeatherVariable::ALL
            .iter()
            .map(|v| VariableInfo::for_variable(*v))
            .collect();
        let total = variables.len();
        Self { variables, total }
    }
}
