//! A company: a budget, a staff roster and a place in the ownership hierarchy.

use holdco_core::{AccountId, Entity, Location, ensure_not_blank};
use holdco_finance::{Account, Budget, Currency, FinanceResult, Money};
use holdco_hr::{Employee, EmployeeId, RosterManager};

use crate::error::{CompanyError, CompanyResult};
use crate::ownership::Ownership;

/// Registration data shared by every kind of company.
#[derive(Debug, Clone)]
pub struct CompanyDetails {
    pub name: String,
    pub location: Location,
    pub director: Employee,
    /// `0 USD` when absent.
    pub starting_capital: Option<Money>,
}

#[derive(Debug, Clone)]
pub struct Company {
    id: AccountId,
    name: String,
    location: Location,
    director: Employee,
    budget: Budget,
    staff: RosterManager,
    ownership: Ownership,
}

impl Company {
    fn register(details: CompanyDetails, ownership: Ownership) -> CompanyResult<Self> {
        ensure_not_blank("company name", &details.name)?;
        let capital = details
            .starting_capital
            .unwrap_or_else(|| Money::zero(Currency::Usd));

        tracing::info!(company = %details.name, %capital, ?ownership, "company registered");
        Ok(Self {
            id: AccountId::new(),
            name: details.name,
            location: details.location,
            director: details.director,
            budget: Budget::new(capital),
            staff: RosterManager::new(),
            ownership,
        })
    }

    pub fn headquarters(details: CompanyDetails) -> CompanyResult<Self> {
        Self::register(details, Ownership::Headquarters)
    }

    /// `parent` must be a headquarters.
    pub fn subsidiary(
        details: CompanyDetails,
        stake: rust_decimal::Decimal,
        parent: &Company,
    ) -> CompanyResult<Self> {
        parent.ensure_headquarters()?;
        Self::register(details, Ownership::subsidiary(stake, parent.id)?)
    }

    /// `parent` must be a headquarters.
    pub fn associated(
        details: CompanyDetails,
        stake: rust_decimal::Decimal,
        parent: &Company,
    ) -> CompanyResult<Self> {
        parent.ensure_headquarters()?;
        Self::register(details, Ownership::associated(stake, parent.id)?)
    }

    fn ensure_headquarters(&self) -> CompanyResult<()> {
        if self.ownership != Ownership::Headquarters {
            return Err(CompanyError::stake(format!(
                "{} is not a headquarters and cannot own companies",
                self.name
            )));
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn director(&self) -> &Employee {
        &self.director
    }

    /// Returns the previous director.
    pub fn appoint_director(&mut self, director: Employee) -> Employee {
        tracing::info!(
            company = %self.name,
            director = %director.full_name(),
            "director appointed"
        );
        core::mem::replace(&mut self.director, director)
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    pub fn is_fully_owned(&self) -> bool {
        self.ownership.is_fully_owned()
    }

    pub fn staff(&self) -> &RosterManager {
        &self.staff
    }

    pub fn hire(&mut self, employee: Employee) -> CompanyResult<()> {
        self.staff.hire(employee)?;
        Ok(())
    }

    pub fn fire(&mut self, id: EmployeeId) -> CompanyResult<Employee> {
        Ok(self.staff.fire(id)?)
    }

    pub fn calculate_payroll(&self) -> CompanyResult<Money> {
        Ok(self.staff.calculate_payroll()?)
    }
}

impl Account for Company {
    fn account_id(&self) -> AccountId {
        self.id
    }

    fn balance(&self) -> Money {
        self.budget.balance()
    }

    fn withdraw(&mut self, money: Money) -> FinanceResult<()> {
        self.budget.withdraw(money)?;
        tracing::info!(company = %self.name, %money, "withdrawn");
        Ok(())
    }

    fn deposit(&mut self, money: Money) -> FinanceResult<()> {
        self.budget.deposit(money)?;
        tracing::info!(company = %self.name, %money, "deposited");
        Ok(())
    }
}

impl Entity for Company {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Same registration: same name at the same address.
impl PartialEq for Company {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.location == other.location
    }
}

impl Eq for Company {}

impl core::fmt::Display for Company {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.ownership {
            Ownership::Headquarters => write!(f, "Headquarters: {}", self.name),
            Ownership::Subsidiary { stake, .. } => {
                write!(f, "Subsidiary: {} ({stake}% owned)", self.name)
            }
            Ownership::Associated { stake, .. } => {
                write!(f, "Associated company: {} ({stake}% owned)", self.name)
            }
        }
    }
}
