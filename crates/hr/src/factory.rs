//! Validated construction of employees.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use holdco_core::{DomainError, IdGenerator, SequentialIdGenerator, ensure_not_blank};
use holdco_finance::Money;

use crate::employee::{Employee, EmployeeId, FieldDetails};
use crate::enums::{
    EmployeeClassification, EmployeeRole, FinancialQualification, ItQualificationLevel,
    ItSpecialization,
};
use crate::error::HrResult;

/// Input for [`EmployeeFactory::create`].
///
/// JSON shape: common fields plus a `"profession"` tag selecting the variant
/// fields, e.g. `{"name": "...", ..., "profession": "seller"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSpec {
    pub name: String,
    pub surname: String,
    pub role: EmployeeRole,
    pub classification: EmployeeClassification,
    pub experience: u32,
    pub salary: Money,
    #[serde(flatten)]
    pub profession: ProfessionSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "profession", rename_all = "snake_case")]
pub enum ProfessionSpec {
    ItSpecialist {
        specialization: ItSpecialization,
        programming_langs: Vec<String>,
        qualification_level: ItQualificationLevel,
    },
    Accountant {
        erp_systems: Vec<String>,
        certifications: Vec<FinancialQualification>,
    },
    Seller,
    HrSpecialist,
    Driver {
        field: FieldDetails,
        license_category: String,
        license_expire_date: NaiveDate,
    },
    Cleaner {
        field: FieldDetails,
        skills: Vec<String>,
        hazardous_waste_trained: bool,
    },
}

/// Builds employees and hands out personal numbers from an injected generator.
#[derive(Debug, Clone)]
pub struct EmployeeFactory<G = SequentialIdGenerator> {
    ids: G,
}

impl<G: IdGenerator> EmployeeFactory<G> {
    pub fn new(ids: G) -> Self {
        Self { ids }
    }

    pub fn create(&mut self, spec: EmployeeSpec) -> HrResult<Employee> {
        ensure_not_blank("name", &spec.name)?;
        ensure_not_blank("surname", &spec.surname)?;
        if let ProfessionSpec::Driver {
            license_category, ..
        } = &spec.profession
        {
            ensure_not_blank("license category", license_category)?;
        }

        let id = EmployeeId(self.ids.next_id());
        tracing::debug!(employee = %id, name = %spec.name, "employee created");
        Ok(Employee::from_spec(id, spec))
    }

    pub fn create_from_json(&mut self, json: &str) -> HrResult<Employee> {
        let spec: EmployeeSpec = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("employee spec: {e}")))?;
        self.create(spec)
    }
}

impl Default for EmployeeFactory<SequentialIdGenerator> {
    fn default() -> Self {
        Self::new(SequentialIdGenerator::default())
    }
}
