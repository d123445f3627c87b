use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// BloodGroup
///
/// The eight ABO/Rh groups. Serialized in display form (`"AB+"`), which is how
/// records store them. The donor search endpoint takes a different wire code
/// instead, see [`BloodGroup::wire_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    /// Dropdown order used by the request forms and filters.
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }

    pub fn is_positive(self) -> bool {
        self.as_str().ends_with('+')
    }

    /// wire_code
    ///
    /// Query-string encoding expected by `/search-donors`: the ABO letters followed
    /// by `p` for Rh+ or `n` for Rh-. `"AB+"` becomes `"ABp"`, `"O-"` becomes `"On"`.
    /// A raw `+` would otherwise be decoded as a space by the backend.
    pub fn wire_code(self) -> String {
        let display = self.as_str();
        let letters = &display[..display.len() - 1];
        let suffix = if self.is_positive() { 'p' } else { 'n' };
        format!("{letters}{suffix}")
    }

    /// Inverse of [`BloodGroup::wire_code`].
    pub fn from_wire_code(code: &str) -> Option<Self> {
        let (letters, sign) = match code.strip_suffix('p') {
            Some(letters) => (letters, '+'),
            None => (code.strip_suffix('n')?, '-'),
        };
        format!("{letters}{sign}").parse().ok()
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown blood group: {0}")]
pub struct UnknownBloodGroup(pub String);

impl FromStr for BloodGroup {
    type Err = UnknownBloodGroup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        BloodGroup::ALL
            .into_iter()
            .find(|group| group.as_str() == normalized)
            .ok_or_else(|| UnknownBloodGroup(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_code_uses_p_and_n_suffixes() {
        assert_eq!(BloodGroup::APositive.wire_code(), "Ap");
        assert_eq!(BloodGroup::ONegative.wire_code(), "On");
        assert_eq!(BloodGroup::AbPositive.wire_code(), "ABp");
        assert_eq!(BloodGroup::AbNegative.wire_code(), "ABn");
    }

    #[test]
    fn wire_code_is_reversible_for_every_group() {
        for group in BloodGroup::ALL {
            assert_eq!(BloodGroup::from_wire_code(&group.wire_code()), Some(group));
        }
        assert_eq!(BloodGroup::from_wire_code("Cp"), None);
        assert_eq!(BloodGroup::from_wire_code("AB"), None);
    }

    #[test]
    fn parses_display_form_case_insensitively() {
        assert_eq!("ab-".parse::<BloodGroup>(), Ok(BloodGroup::AbNegative));
        let err = "X+".parse::<BloodGroup>().unwrap_err();
        assert_eq!(err, UnknownBloodGroup("X+".to_string()));
        assert_eq!(err.to_string(), "unknown blood group: X+");
    }
}
