//! HR module: employees, their professions and staff rosters.

pub mod employee;
pub mod enums;
pub mod error;
pub mod factory;
pub mod roster;

pub use employee::{
    Accountant, AuditStatus, Cleaner, Driver, Employee, EmployeeId, FieldDetails, ItSpecialist,
    Profession, Work, WorkReport,
};
pub use enums::{
    EmployeeClassification, EmployeeRole, FinancialQualification, ItQualificationLevel,
    ItSpecialization,
};
pub use error::{HrError, HrResult};
pub use factory::{EmployeeFactory, EmployeeSpec, ProfessionSpec};
pub use roster::RosterManager;
