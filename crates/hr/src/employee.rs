//! Employees as one struct with a closed set of profession variants.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

use holdco_core::Entity;
use holdco_finance::Money;

use crate::enums::{
    EmployeeClassification, EmployeeRole, FinancialQualification, ItQualificationLevel,
    ItSpecialization,
};
use crate::error::{HrError, HrResult};
use crate::factory::{EmployeeSpec, ProfessionSpec};

/// Personal number handed out by an [`holdco_core::IdGenerator`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u64);

impl core::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shared capability of every profession.
pub trait Work {
    /// Do a shift. Accidents and breakages are drawn from `rng`.
    fn work<R: Rng + ?Sized>(&mut self, rng: &mut R) -> WorkReport;

    fn can_work_remotely(&self) -> bool;

    /// Stable profession key, e.g. `"it_specialist"`.
    fn profession(&self) -> &'static str;
}

/// What happened during a shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkReport {
    Coded { overloaded: bool },
    Bookkeeping,
    Selling,
    Interviewing,
    Drove { accident: bool },
    Cleaned { broken_tool: Option<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    Idle,
    InProgress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItSpecialist {
    pub specialization: ItSpecialization,
    pub programming_langs: Vec<String>,
    pub qualification_level: ItQualificationLevel,
    active_projects: BTreeSet<String>,
}

impl ItSpecialist {
    pub fn assign_project(&mut self, project: impl Into<String>) {
        self.active_projects.insert(project.into());
    }

    pub fn complete_project(&mut self, project: &str) {
        self.active_projects.remove(project);
    }

    pub fn active_projects(&self) -> usize {
        self.active_projects.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accountant {
    pub erp_systems: Vec<String>,
    pub certifications: Vec<FinancialQualification>,
    audit_status: AuditStatus,
}

impl Accountant {
    pub fn can_handle_audit(&self) -> bool {
        self.certifications.iter().any(|c| c.qualifies_for_audit())
    }

    pub fn start_audit(&mut self) -> HrResult<()> {
        if !self.can_handle_audit() {
            return Err(HrError::Capability(
                "audits require a CPA, ACCA or CIA certification".into(),
            ));
        }
        self.audit_status = AuditStatus::InProgress;
        Ok(())
    }

    /// Returns `false` if no audit was running.
    pub fn end_audit(&mut self) -> bool {
        let was_running = self.audit_status == AuditStatus::InProgress;
        self.audit_status = AuditStatus::Idle;
        was_running
    }

    pub fn audit_status(&self) -> AuditStatus {
        self.audit_status
    }
}

/// On-site staff: protective gear and a yearly medical check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDetails {
    pub workwear: Vec<String>,
    pub medical_check_date: NaiveDate,
}

impl FieldDetails {
    /// The last check is at most 365 days old.
    pub fn is_medically_fit(&self, today: NaiveDate) -> bool {
        self.medical_check_date
            .checked_add_days(Days::new(365))
            .is_some_and(|valid_until| valid_until >= today)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    pub field: FieldDetails,
    pub license_category: String,
    pub license_expire_date: NaiveDate,
    accidents: u32,
    routes: BTreeSet<String>,
}

impl Driver {
    pub fn is_valid_license(&self, today: NaiveDate) -> bool {
        self.license_expire_date > today
    }

    pub fn assign_routes<I, S>(&mut self, routes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.routes.extend(routes.into_iter().map(Into::into));
    }

    pub fn unassign_routes<'a, I>(&mut self, routes: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for route in routes {
            self.routes.remove(route);
        }
    }

    pub fn routes(&self) -> Vec<String> {
        self.routes.iter().cloned().collect()
    }

    pub fn accidents(&self) -> u32 {
        self.accidents
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cleaner {
    pub field: FieldDetails,
    pub skills: Vec<String>,
    pub hazardous_waste_trained: bool,
    equipment: BTreeSet<String>,
}

impl Cleaner {
    pub fn give_equipment(&mut self, tool: impl Into<String>) {
        self.equipment.insert(tool.into());
    }

    pub fn take_equipment(&mut self, tool: &str) {
        self.equipment.remove(tool);
    }

    pub fn has_equipment(&self) -> bool {
        !self.equipment.is_empty()
    }

    pub fn equipment(&self) -> Vec<String> {
        self.equipment.iter().cloned().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Profession {
    ItSpecialist(ItSpecialist),
    Accountant(Accountant),
    Seller,
    HrSpecialist,
    Driver(Driver),
    Cleaner(Cleaner),
}

impl From<ProfessionSpec> for Profession {
    fn from(spec: ProfessionSpec) -> Self {
        match spec {
            ProfessionSpec::ItSpecialist {
                specialization,
                programming_langs,
                qualification_level,
            } => Profession::ItSpecialist(ItSpecialist {
                specialization,
                programming_langs,
                qualification_level,
                active_projects: BTreeSet::new(),
            }),
            ProfessionSpec::Accountant {
                erp_systems,
                certifications,
            } => Profession::Accountant(Accountant {
                erp_systems,
                certifications,
                audit_status: AuditStatus::Idle,
            }),
            ProfessionSpec::Seller => Profession::Seller,
            ProfessionSpec::HrSpecialist => Profession::HrSpecialist,
            ProfessionSpec::Driver {
                field,
                license_category,
                license_expire_date,
            } => Profession::Driver(Driver {
                field,
                license_category,
                license_expire_date,
                accidents: 0,
                routes: BTreeSet::new(),
            }),
            ProfessionSpec::Cleaner {
                field,
                skills,
                hazardous_waste_trained,
            } => Profession::Cleaner(Cleaner {
                field,
                skills,
                hazardous_waste_trained,
                equipment: BTreeSet::new(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    surname: String,
    role: EmployeeRole,
    classification: EmployeeClassification,
    experience: u32,
    salary: Money,
    profile: Profession,
}

impl Employee {
    /// Build from an already validated [`EmployeeSpec`]; see [`crate::EmployeeFactory`].
    pub(crate) fn from_spec(id: EmployeeId, spec: EmployeeSpec) -> Self {
        Self {
            id,
            name: spec.name,
            surname: spec.surname,
            role: spec.role,
            classification: spec.classification,
            experience: spec.experience,
            salary: spec.salary,
            profile: spec.profession.into(),
        }
    }

    pub fn id_typed(&self) -> EmployeeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }

    pub fn role(&self) -> EmployeeRole {
        self.role
    }

    pub fn classification(&self) -> EmployeeClassification {
        self.classification
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn salary(&self) -> Money {
        self.salary
    }

    pub fn profile(&self) -> &Profession {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut Profession {
        &mut self.profile
    }

    pub fn promote(&mut self, role: EmployeeRole) {
        self.role = role;
    }

    pub fn set_salary(&mut self, salary: Money) {
        self.salary = salary;
    }

    /// Present for drivers and cleaners only.
    pub fn field_details(&self) -> Option<&FieldDetails> {
        match &self.profile {
            Profession::Driver(d) => Some(&d.field),
            Profession::Cleaner(c) => Some(&c.field),
            _ => None,
        }
    }

    /// Chance of an incident per shift: `1 / (100 * years)`, years floored at 1.
    fn incident_probability(&self) -> f64 {
        1.0 / (100.0 * f64::from(self.experience.max(1)))
    }
}

impl Work for Employee {
    fn work<R: Rng + ?Sized>(&mut self, rng: &mut R) -> WorkReport {
        let incident = rng.random::<f64>() < self.incident_probability();

        let report = match &mut self.profile {
            Profession::ItSpecialist(it) => WorkReport::Coded {
                overloaded: it.active_projects() >= 2,
            },
            Profession::Accountant(_) => WorkReport::Bookkeeping,
            Profession::Seller => WorkReport::Selling,
            Profession::HrSpecialist => WorkReport::Interviewing,
            Profession::Driver(driver) => {
                if incident {
                    driver.accidents += 1;
                }
                WorkReport::Drove { accident: incident }
            }
            Profession::Cleaner(cleaner) => WorkReport::Cleaned {
                broken_tool: if incident {
                    cleaner.equipment.pop_first()
                } else {
                    None
                },
            },
        };

        tracing::debug!(employee = %self.id, report = ?report, "shift finished");
        report
    }

    fn can_work_remotely(&self) -> bool {
        self.field_details().is_none()
    }

    fn profession(&self) -> &'static str {
        match self.profile {
            Profession::ItSpecialist(_) => "it_specialist",
            Profession::Accountant(_) => "accountant",
            Profession::Seller => "seller",
            Profession::HrSpecialist => "hr_specialist",
            Profession::Driver(_) => "driver",
            Profession::Cleaner(_) => "cleaner",
        }
    }
}

impl Entity for Employee {
    type Id = EmployeeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Same person: same personal number and same name.
impl PartialEq for Employee {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name && self.surname == other.surname
    }
}

impl Eq for Employee {}

impl core::hash::Hash for Employee {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
