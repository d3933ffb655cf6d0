use std::fmt;

use serde::Serialize;

use super::error::ServiceError;

/// A validated desk identifier: one uppercase zone letter and four digits,
/// e.g. `D4001`. The second character doubles as the floor number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DeskId(String);

/// A floor number as encoded in desk identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct Floor(char);

impl DeskId {
    pub fn parse(raw: &str) -> Result<Self, ServiceError> {
        let raw = raw.trim();
        let mut chars = raw.chars();
        let well_formed = raw.len() == 5
            && chars.next().is_some_and(|c| c.is_ascii_uppercase())
            && chars.all(|c| c.is_ascii_digit());

        if !well_formed {
            return Err(ServiceError::Validation(format!(
                "'{}' is not a valid desk id (expected a capital letter followed by 4 digits)",
                raw
            )));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn floor(&self) -> Floor {
        Floor(self.0.as_bytes()[1] as char)
    }
}

impl Floor {
    pub fn parse(raw: &str) -> Result<Self, ServiceError> {
        let raw = raw.trim();
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_digit() => Ok(Self(c)),
            _ => Err(ServiceError::Validation(format!(
                "'{}' is not a valid floor (expected a single digit)",
                raw
            ))),
        }
    }

    /// `LIKE` pattern selecting the desk ids on this floor.
    pub fn desk_id_pattern(&self) -> String {
        format!("_{}%", self.0)
    }
}

impl fmt::Display for DeskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Floor> for String {
    fn from(floor: Floor) -> Self {
        floor.to_string()
    }
}

impl From<DeskId> for String {
    fn from(id: DeskId) -> Self {
        id.0
    }
}
