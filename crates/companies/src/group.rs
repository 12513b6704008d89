//! A headquarters together with the companies it controls or influences.

use std::collections::BTreeMap;

use holdco_core::{AccountId, Entity};
use holdco_finance::{Account, Currency, Money};

use crate::company::Company;
use crate::error::{CompanyError, CompanyResult};
use crate::ownership::Ownership;

#[derive(Debug, Clone)]
pub struct CorporateGroup {
    headquarters: Company,
    subsidiaries: BTreeMap<AccountId, Company>,
    associated: BTreeMap<AccountId, Company>,
}

impl CorporateGroup {
    pub fn new(headquarters: Company) -> CompanyResult<Self> {
        if headquarters.ownership() != Ownership::Headquarters {
            return Err(CompanyError::stake(format!(
                "{} is not a headquarters",
                headquarters.name()
            )));
        }
        Ok(Self {
            headquarters,
            subsidiaries: BTreeMap::new(),
            associated: BTreeMap::new(),
        })
    }

    pub fn headquarters(&self) -> &Company {
        &self.headquarters
    }

    pub fn headquarters_mut(&mut self) -> &mut Company {
        &mut self.headquarters
    }

    fn is_member(&self, company: &Company) -> bool {
        self.subsidiaries
            .values()
            .chain(self.associated.values())
            .any(|member| member.same_entity(company) || member == company)
    }

    fn ensure_joinable(&self, company: &Company) -> CompanyResult<()> {
        if company.ownership().parent() != Some(self.headquarters.account_id()) {
            return Err(CompanyError::stake(format!(
                "{} is not owned by {}",
                company.name(),
                self.headquarters.name()
            )));
        }
        if self.is_member(company) {
            return Err(CompanyError::AlreadyCooperated {
                name: company.name().to_owned(),
            });
        }
        Ok(())
    }

    pub fn add_subsidiary(&mut self, company: Company) -> CompanyResult<()> {
        if !matches!(company.ownership(), Ownership::Subsidiary { .. }) {
            return Err(CompanyError::stake(format!(
                "{} is not a subsidiary",
                company.name()
            )));
        }
        self.ensure_joinable(&company)?;
        tracing::info!(company = %company.name(), "subsidiary added");
        self.subsidiaries.insert(company.account_id(), company);
        Ok(())
    }

    pub fn add_associated(&mut self, company: Company) -> CompanyResult<()> {
        if !matches!(company.ownership(), Ownership::Associated { .. }) {
            return Err(CompanyError::stake(format!(
                "{} is not an associated company",
                company.name()
            )));
        }
        self.ensure_joinable(&company)?;
        tracing::info!(company = %company.name(), "associated company added");
        self.associated.insert(company.account_id(), company);
        Ok(())
    }

    pub fn remove_subsidiary(&mut self, id: AccountId) -> CompanyResult<Company> {
        let company = self
            .subsidiaries
            .remove(&id)
            .ok_or(CompanyError::NotCooperated { id })?;
        tracing::info!(company = %company.name(), "subsidiary removed");
        Ok(company)
    }

    pub fn remove_associated(&mut self, id: AccountId) -> CompanyResult<Company> {
        let company = self
            .associated
            .remove(&id)
            .ok_or(CompanyError::NotCooperated { id })?;
        tracing::info!(company = %company.name(), "associated company removed");
        Ok(company)
    }

    /// Subsidiary or associated company.
    pub fn member(&self, id: AccountId) -> Option<&Company> {
        self.subsidiaries
            .get(&id)
            .or_else(|| self.associated.get(&id))
    }

    pub fn member_mut(&mut self, id: AccountId) -> Option<&mut Company> {
        match self.subsidiaries.get_mut(&id) {
            Some(company) => Some(company),
            None => self.associated.get_mut(&id),
        }
    }

    /// The headquarters and one member, both mutable, e.g. to move funds between them.
    pub fn split_mut(&mut self, id: AccountId) -> Option<(&mut Company, &mut Company)> {
        let member = match self.subsidiaries.get_mut(&id) {
            Some(company) => company,
            None => self.associated.get_mut(&id)?,
        };
        Some((&mut self.headquarters, member))
    }

    /// Owned copies of the subsidiaries and the associated companies.
    pub fn connected_companies(&self) -> (Vec<Company>, Vec<Company>) {
        (
            self.subsidiaries.values().cloned().collect(),
            self.associated.values().cloned().collect(),
        )
    }

    /// Per-currency total over the headquarters and its subsidiaries.
    ///
    /// Associated companies are not consolidated.
    pub fn consolidated_balance(&self) -> CompanyResult<BTreeMap<Currency, Money>> {
        let mut totals: BTreeMap<Currency, Money> = BTreeMap::new();
        let balances = core::iter::once(&self.headquarters)
            .chain(self.subsidiaries.values())
            .map(Account::balance);
        for balance in balances {
            let total = match totals.get(&balance.currency()) {
                Some(sum) => sum.try_add(&balance)?,
                None => balance,
            };
            totals.insert(balance.currency(), total);
        }
        Ok(totals)
    }
}
