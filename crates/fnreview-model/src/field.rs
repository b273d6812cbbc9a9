use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed yes/no/unknown dimensions tracked for every function.
///
/// The set is closed: extraction only ever fills these four fields and never
/// invents new ones from document headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    /// The function is technically available in the software.
    TechnicalAvailability,
    /// The employer actually deploys the function.
    EmployerDeployment,
    /// The function is used for performance or behaviour monitoring.
    MonitoringControl,
    /// The function involves AI.
    AiInvolvement,
}

impl CanonicalField {
    /// All fields in declaration order.
    pub const ALL: [CanonicalField; 4] = [
        CanonicalField::TechnicalAvailability,
        CanonicalField::EmployerDeployment,
        CanonicalField::MonitoringControl,
        CanonicalField::AiInvolvement,
    ];

    /// Stable snake_case key used in configuration files and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::TechnicalAvailability => "technical_availability",
            CanonicalField::EmployerDeployment => "employer_deployment",
            CanonicalField::MonitoringControl => "monitoring_control",
            CanonicalField::AiInvolvement => "ai_involvement",
        }
    }

    /// Built-in header label that always resolves to this field.
    pub fn default_label(&self) -> &'static str {
        match self {
            CanonicalField::TechnicalAvailability => "technical availability",
            CanonicalField::EmployerDeployment => "employer deployment",
            CanonicalField::MonitoringControl => "monitoring control",
            CanonicalField::AiInvolvement => "ai involvement",
        }
    }

    /// Employer-facing facts where source documentation outranks AI inference.
    pub fn prefers_document(&self) -> bool {
        matches!(
            self,
            CanonicalField::EmployerDeployment | CanonicalField::MonitoringControl
        )
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CanonicalField {
    type Err = String;

    /// Accepts the snake_case key as well as space or hyphen separated spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "technical_availability" => Ok(CanonicalField::TechnicalAvailability),
            "employer_deployment" => Ok(CanonicalField::EmployerDeployment),
            "monitoring_control" => Ok(CanonicalField::MonitoringControl),
            "ai_involvement" => Ok(CanonicalField::AiInvolvement),
            _ => Err(format!("Unknown canonical field: {}", s)),
        }
    }
}

/// A boolean answer with an optional free-text annotation.
///
/// `value = None` means the field was present in the document but its answer
/// could not be determined, which is different from the field being absent
/// from a record altogether.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellValue {
    pub value: Option<bool>,
    pub note: Option<String>,
}

impl CellValue {
    pub fn new(value: Option<bool>, note: Option<String>) -> Self {
        Self { value, note }
    }

    /// A definite answer without annotation.
    pub fn answer(value: bool) -> Self {
        Self {
            value: Some(value),
            note: None,
        }
    }

    /// Present but indeterminate.
    pub fn indeterminate() -> Self {
        Self::default()
    }

    /// Attach a note; blank notes are dropped.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        let trimmed = note.trim();
        self.note = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub fn is_indeterminate(&self) -> bool {
        self.value.is_none()
    }
}
