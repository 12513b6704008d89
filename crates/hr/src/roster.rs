//! Staff lists held by companies, transports and warehouses.

use std::collections::BTreeMap;

use holdco_finance::{Currency, Money};

use crate::employee::{Employee, EmployeeId};
use crate::error::{HrError, HrResult};

#[derive(Debug, Clone, Default)]
pub struct RosterManager {
    employees: BTreeMap<EmployeeId, Employee>,
}

impl RosterManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hire(&mut self, employee: Employee) -> HrResult<()> {
        let id = employee.id_typed();
        if self.employees.contains_key(&id) {
            return Err(HrError::AlreadyHired {
                name: employee.full_name(),
            });
        }
        tracing::info!(employee = %id, name = %employee.full_name(), "employee hired");
        self.employees.insert(id, employee);
        Ok(())
    }

    /// Removes the employee and hands it back to the caller.
    pub fn fire(&mut self, id: EmployeeId) -> HrResult<Employee> {
        let employee = self.employees.remove(&id).ok_or(HrError::NotHired { id })?;
        tracing::info!(employee = %id, name = %employee.full_name(), "employee fired");
        Ok(employee)
    }

    pub fn has_employee(&self, id: EmployeeId) -> bool {
        self.employees.contains_key(&id)
    }

    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.get(&id)
    }

    pub fn employee_mut(&mut self, id: EmployeeId) -> Option<&mut Employee> {
        self.employees.get_mut(&id)
    }

    /// Snapshot ordered by personal number.
    pub fn employees(&self) -> Vec<Employee> {
        self.employees.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Sum of all salaries. Salaries in different currencies are an error;
    /// an empty roster costs `0 USD`.
    pub fn calculate_payroll(&self) -> HrResult<Money> {
        let mut salaries = self.employees.values().map(Employee::salary);
        let Some(first) = salaries.next() else {
            return Ok(Money::zero(Currency::Usd));
        };
        let total = salaries.try_fold(first, |total, salary| total.try_add(&salary))?;
        Ok(total)
    }
}
