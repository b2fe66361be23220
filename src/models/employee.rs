//! Employee record as returned by the API, and the draft sent to create one.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::table::TableRow;

/// Employee record from the list endpoint.
///
/// Every field is optional on the wire, and numbers are accepted anywhere a
/// string is expected (the service is not strict about `latitude`/`longitude`
/// types). Values are kept as their text form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Server-assigned identifier.
    #[serde(rename = "Hiring_TestID", default, deserialize_with = "de_text")]
    pub id: Option<String>,
    #[serde(rename = "firstName", default, deserialize_with = "de_text")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default, deserialize_with = "de_text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub email: Option<String>,
    #[serde(rename = "phoneNumber", default, deserialize_with = "de_text")]
    pub phone_number: Option<String>,
    /// User-supplied business identifier, distinct from `id`.
    #[serde(rename = "employeeID", default, deserialize_with = "de_text")]
    pub employee_id: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub latitude: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub longitude: Option<String>,
}

/// Accept a string, number or bool as text; null and anything else as absent.
fn de_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

impl EmployeeRecord {
    /// Field keys in wire order, as used by table column descriptors.
    pub const FIELD_KEYS: [&'static str; 10] = [
        "Hiring_TestID",
        "firstName",
        "lastName",
        "email",
        "phoneNumber",
        "employeeID",
        "city",
        "country",
        "latitude",
        "longitude",
    ];

    /// Look up a field by its wire key.
    pub fn field(&self, key: &str) -> Option<&str> {
        let value = match key {
            "Hiring_TestID" => &self.id,
            "firstName" => &self.first_name,
            "lastName" => &self.last_name,
            "email" => &self.email,
            "phoneNumber" => &self.phone_number,
            "employeeID" => &self.employee_id,
            "city" => &self.city,
            "country" => &self.country,
            "latitude" => &self.latitude,
            "longitude" => &self.longitude,
            _ => return None,
        };
        value.as_deref()
    }

    /// Display name for popups and logs.
    pub fn full_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect();
        if parts.is_empty() {
            "Employee".to_string()
        } else {
            parts.join(" ")
        }
    }
}

impl TableRow for EmployeeRecord {
    fn cell(&self, key: &str) -> Option<&str> {
        self.field(key)
    }

    fn values(&self) -> Vec<&str> {
        Self::FIELD_KEYS.iter().filter_map(|key| self.field(key)).collect()
    }
}

/// Add-employee form contents, serialized as the create payload.
///
/// `latitude`/`longitude` are only ever written by the location provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(rename = "employeeID")]
    pub employee_id: String,
    pub city: String,
    pub country: String,
    pub latitude: String,
    pub longitude: String,
}

impl FormDraft {
    /// Clear everything the user typed, keeping the last-known coordinates.
    pub fn clear_user_fields(&mut self) {
        *self = Self {
            latitude: std::mem::take(&mut self.latitude),
            longitude: std::mem::take(&mut self.longitude),
            ..Default::default()
        };
    }
}
