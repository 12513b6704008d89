//! How a company relates to the headquarters that invested in it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use holdco_core::AccountId;

use crate::error::{CompanyError, CompanyResult};

/// Stake at which a subsidiary counts as wholly owned.
const FULL_OWNERSHIP: Decimal = Decimal::from_parts(999, 0, 0, false, 1);
const CONTROL_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
const INFLUENCE_THRESHOLD: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Stakes are percentages held by `parent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Ownership {
    Headquarters,
    /// Controlled: more than 50%.
    Subsidiary { stake: Decimal, parent: AccountId },
    /// Significant influence: 20% to 50% inclusive.
    Associated { stake: Decimal, parent: AccountId },
}

impl Ownership {
    pub fn subsidiary(stake: Decimal, parent: AccountId) -> CompanyResult<Self> {
        if stake <= CONTROL_THRESHOLD || stake > Decimal::ONE_HUNDRED {
            return Err(CompanyError::stake(format!(
                "subsidiary must be more than 50% owned, got {stake}%"
            )));
        }
        Ok(Self::Subsidiary { stake, parent })
    }

    pub fn associated(stake: Decimal, parent: AccountId) -> CompanyResult<Self> {
        if !(INFLUENCE_THRESHOLD..=CONTROL_THRESHOLD).contains(&stake) {
            return Err(CompanyError::stake(format!(
                "associated company stake must be between 20% and 50%, got {stake}%"
            )));
        }
        Ok(Self::Associated { stake, parent })
    }

    pub fn stake(&self) -> Option<Decimal> {
        match self {
            Self::Headquarters => None,
            Self::Subsidiary { stake, .. } | Self::Associated { stake, .. } => Some(*stake),
        }
    }

    pub fn parent(&self) -> Option<AccountId> {
        match self {
            Self::Headquarters => None,
            Self::Subsidiary { parent, .. } | Self::Associated { parent, .. } => Some(*parent),
        }
    }

    /// Subsidiaries with a stake of at least 99.9%.
    pub fn is_fully_owned(&self) -> bool {
        matches!(self, Self::Subsidiary { stake, .. } if *stake >= FULL_OWNERSHIP)
    }
}
