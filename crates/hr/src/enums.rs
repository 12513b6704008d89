use serde::{Deserialize, Serialize};

/// Position in the organizational hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    Staff,
    TeamLead,
    Manager,
    SeniorManager,
    Director,
    Ceo,
}

/// Contract / work arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeClassification {
    FullTime,
    PartTime,
    Temporary,
    Seasonal,
    Freelance,
    Intern,
    Contract,
    Volunteer,
    OnCall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItSpecialization {
    Frontend,
    Backend,
    Fullstack,
    Ml,
    Devops,
    Qa,
    Mobile,
    Cloud,
    Data,
    Security,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItQualificationLevel {
    Junior,
    Middle,
    Senior,
}

/// Professional certifications held by finance staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FinancialQualification {
    Acca,
    Cima,
    Acpm,
    Cpa,
    Cia,
    Cfa,
}

impl FinancialQualification {
    /// Certifications that allow running an audit.
    pub fn qualifies_for_audit(self) -> bool {
        matches!(self, Self::Cpa | Self::Acca | Self::Cia)
    }
}
