//! Capacity bookkeeping for anything that carries products.
//!
//! A [`CargoManager`] tracks how much volume and mass is in use and which
//! products occupy it. Every operation is all-or-nothing over the whole
//! manifest: it either applies completely or leaves the hold untouched.
//!
//! Multi-party exchanges (warehouse to transport and back) use the two-phase
//! API: [`CargoManager::plan_load`] / [`CargoManager::plan_unload`] check one
//! side without mutating it, and the matching `commit_*` applies a plan and
//! cannot fail. Committing is internal to this crate, so a plan only ever
//! reaches the hold that produced it, once.

use rust_decimal::Decimal;

use holdco_core::{DomainError, ensure_non_negative};

use crate::error::{CargoError, CargoResult};
use crate::product::{Manifest, Product};

/// Fraction of the free volume that packing can actually use.
pub const DEFAULT_FILL_RATE: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

/// Total volume and mass of a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Requirements {
    pub space: Decimal,
    pub mass: Decimal,
}

/// A checked manifest ready to be committed to the manager that produced it.
///
/// Plans cannot be copied or committed from outside the crate:
///
/// ```compile_fail
/// use holdco_logistics::{CargoManager, Manifest, Product};
/// use rust_decimal::Decimal;
///
/// let mut hold = CargoManager::new(Decimal::from(100), Decimal::from(1000)).unwrap();
/// let boxes: Manifest = [(Product::new("Box", Decimal::ONE, Decimal::TEN).unwrap(), 10)]
///     .into_iter()
///     .collect();
/// let plan = hold.plan_load(&boxes, Decimal::ONE).unwrap();
/// hold.commit_load(plan.clone());
/// hold.commit_load(plan);
/// ```
///
/// Use [`CargoManager::load_products`] instead:
///
/// ```
/// use holdco_logistics::{CargoManager, Manifest, Product};
/// use rust_decimal::Decimal;
///
/// let mut hold = CargoManager::new(Decimal::from(100), Decimal::from(1000)).unwrap();
/// let boxes: Manifest = [(Product::new("Box", Decimal::ONE, Decimal::TEN).unwrap(), 10)]
///     .into_iter()
///     .collect();
/// let plan = hold.plan_load(&boxes, Decimal::ONE).unwrap();
/// assert_eq!(plan.requirements().space, Decimal::from(10));
/// hold.load_products(&boxes, Decimal::ONE).unwrap();
/// assert_eq!(hold.free_space(), Decimal::from(90));
/// ```
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a plan does nothing until it is committed"]
pub struct CargoPlan {
    manifest: Manifest,
    requirements: Requirements,
}

impl CargoPlan {
    pub fn requirements(&self) -> Requirements {
        self.requirements
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CargoManager {
    capacity: Decimal,
    /// `None` means the hold has no mass limit.
    carrying_capacity: Option<Decimal>,
    used_space: Decimal,
    used_mass: Decimal,
    cargo: Manifest,
}

impl CargoManager {
    pub fn new(capacity: Decimal, carrying_capacity: Decimal) -> CargoResult<Self> {
        Ok(Self {
            capacity: ensure_non_negative("capacity", capacity)?,
            carrying_capacity: Some(ensure_non_negative(
                "carrying capacity",
                carrying_capacity,
            )?),
            used_space: Decimal::ZERO,
            used_mass: Decimal::ZERO,
            cargo: Manifest::new(),
        })
    }

    /// A hold limited by volume only.
    pub fn with_unbounded_mass(capacity: Decimal) -> CargoResult<Self> {
        Ok(Self {
            capacity: ensure_non_negative("capacity", capacity)?,
            carrying_capacity: None,
            used_space: Decimal::ZERO,
            used_mass: Decimal::ZERO,
            cargo: Manifest::new(),
        })
    }

    pub fn capacity(&self) -> Decimal {
        self.capacity
    }

    pub fn carrying_capacity(&self) -> Option<Decimal> {
        self.carrying_capacity
    }

    pub fn free_space(&self) -> Decimal {
        self.capacity - self.used_space
    }

    /// `None` for holds without a mass limit.
    pub fn free_mass(&self) -> Option<Decimal> {
        self.carrying_capacity.map(|limit| limit - self.used_mass)
    }

    pub fn used_space(&self) -> Decimal {
        self.used_space
    }

    pub fn used_mass(&self) -> Decimal {
        self.used_mass
    }

    /// Owned snapshot of the manifest.
    pub fn cargo(&self) -> Manifest {
        self.cargo.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.cargo.is_empty()
    }

    pub fn product_names(&self) -> Vec<String> {
        self.cargo.keys().map(|p| p.name().to_owned()).collect()
    }

    /// Sum of `volume * qty` and `mass * qty` over the manifest.
    pub fn get_requirements(products: &Manifest) -> CargoResult<Requirements> {
        let mut total = Requirements::default();
        for (product, &qty) in products {
            if qty == 0 {
                return Err(DomainError::validation(format!(
                    "quantity of {} must be positive",
                    product.name()
                ))
                .into());
            }
            let qty = Decimal::from(qty);
            total.space = product
                .volume()
                .checked_mul(qty)
                .and_then(|v| total.space.checked_add(v))
                .ok_or_else(|| overflow(product))?;
            total.mass = product
                .mass()
                .checked_mul(qty)
                .and_then(|m| total.mass.checked_add(m))
                .ok_or_else(|| overflow(product))?;
        }
        Ok(total)
    }

    /// Whether the manifest fits into `free_space * fill_rate` and the free mass.
    pub fn can_load(&self, products: &Manifest, fill_rate: Decimal) -> CargoResult<bool> {
        match self.plan_load(products, fill_rate) {
            Ok(_) => Ok(true),
            Err(CargoError::LoadingImpossible(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub fn plan_load(&self, products: &Manifest, fill_rate: Decimal) -> CargoResult<CargoPlan> {
        let fill_rate = ensure_non_negative("fill rate", fill_rate)?;
        let requirements = Self::get_requirements(products)?;

        for (product, &qty) in products {
            let held = self.cargo.get(product).copied().unwrap_or_default();
            if held.checked_add(qty).is_none() {
                return Err(CargoError::loading(format!(
                    "{held} of {} already on board, cannot add {qty} more",
                    product.name()
                )));
            }
        }

        let usable_space = self.free_space() * fill_rate;
        if requirements.space > usable_space {
            return Err(CargoError::loading(format!(
                "requires {} of space, {} usable",
                requirements.space, usable_space
            )));
        }
        if let Some(free_mass) = self.free_mass() {
            if requirements.mass > free_mass {
                return Err(CargoError::loading(format!(
                    "requires {} of mass, {} free",
                    requirements.mass, free_mass
                )));
            }
        }

        Ok(CargoPlan {
            manifest: products.clone(),
            requirements,
        })
    }

    /// Applies a plan from [`CargoManager::plan_load`] on this manager.
    pub(crate) fn commit_load(&mut self, plan: CargoPlan) {
        for (product, qty) in plan.manifest {
            let held = self.cargo.entry(product).or_default();
            *held = held.saturating_add(qty);
        }
        self.used_space += plan.requirements.space;
        self.used_mass += plan.requirements.mass;
    }

    pub fn load_products(&mut self, products: &Manifest, fill_rate: Decimal) -> CargoResult<()> {
        let plan = self.plan_load(products, fill_rate)?;
        tracing::debug!(
            space = %plan.requirements.space,
            mass = %plan.requirements.mass,
            "cargo loaded"
        );
        self.commit_load(plan);
        Ok(())
    }

    /// False if a product is absent or a requested quantity exceeds the held one.
    pub fn can_unload(&self, products: &Manifest) -> bool {
        self.missing_product(products).is_none()
    }

    fn missing_product<'a>(&self, products: &'a Manifest) -> Option<&'a Product> {
        products
            .iter()
            .find(|(product, qty)| self.cargo.get(*product).is_none_or(|held| held < *qty))
            .map(|(product, _)| product)
    }

    pub fn plan_unload(&self, products: &Manifest) -> CargoResult<CargoPlan> {
        let requirements = Self::get_requirements(products)?;
        if let Some(product) = self.missing_product(products) {
            return Err(CargoError::unloading(format!(
                "not enough {} on board",
                product.name()
            )));
        }
        Ok(CargoPlan {
            manifest: products.clone(),
            requirements,
        })
    }

    /// Applies a plan from [`CargoManager::plan_unload`] on this manager.
    pub(crate) fn commit_unload(&mut self, plan: CargoPlan) {
        for (product, qty) in plan.manifest {
            if let Some(held) = self.cargo.get_mut(&product) {
                *held -= qty;
                if *held == 0 {
                    self.cargo.remove(&product);
                }
            }
        }
        self.used_space -= plan.requirements.space;
        self.used_mass -= plan.requirements.mass;
    }

    pub fn unload_products(&mut self, products: &Manifest) -> CargoResult<()> {
        let plan = self.plan_unload(products)?;
        tracing::debug!(
            space = %plan.requirements.space,
            mass = %plan.requirements.mass,
            "cargo unloaded"
        );
        self.commit_unload(plan);
        Ok(())
    }

    /// Changes the limits of the hold. Fails if the loaded cargo would no longer fit.
    pub fn resize(
        &mut self,
        capacity: Decimal,
        carrying_capacity: Option<Decimal>,
    ) -> CargoResult<()> {
        let capacity = ensure_non_negative("capacity", capacity)?;
        if let Some(limit) = carrying_capacity {
            ensure_non_negative("carrying capacity", limit)?;
        }
        if capacity < self.used_space {
            return Err(CargoError::unloading(format!(
                "{} of cargo volume would not fit into {capacity}",
                self.used_space
            )));
        }
        if carrying_capacity.is_some_and(|limit| limit < self.used_mass) {
            return Err(CargoError::unloading(format!(
                "{} of cargo mass would not fit into the new carrying capacity",
                self.used_mass
            )));
        }
        self.capacity = capacity;
        self.carrying_capacity = carrying_capacity;
        Ok(())
    }
}

fn overflow(product: &Product) -> CargoError {
    DomainError::validation(format!("quantity of {} is too large", product.name())).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn boxed() -> Product {
        Product::new("Box", dec!(1), dec!(10)).unwrap()
    }

    fn manifest(items: &[(Product, u64)]) -> Manifest {
        items.iter().cloned().collect()
    }

    fn hold() -> CargoManager {
        CargoManager::new(dec!(100), dec!(1000)).unwrap()
    }

    #[test]
    fn load_then_unload_scenario() {
        let mut cm = hold();
        cm.load_products(&manifest(&[(boxed(), 10)]), DEFAULT_FILL_RATE)
            .unwrap();
        assert_eq!(cm.free_space(), dec!(90));
        assert_eq!(cm.free_mass(), Some(dec!(900)));

        cm.unload_products(&manifest(&[(boxed(), 5)])).unwrap();
        assert_eq!(cm.free_space(), dec!(95));
        assert_eq!(cm.free_mass(), Some(dec!(950)));

        let err = cm.unload_products(&manifest(&[(boxed(), 6)])).unwrap_err();
        assert!(matches!(err, CargoError::UnloadingImpossible(_)));
        assert_eq!(cm.free_space(), dec!(95));
        assert_eq!(cm.cargo()[&boxed()], 5);
    }

    #[test]
    fn fill_rate_limits_usable_space() {
        let cm = hold();
        let ninety = manifest(&[(boxed(), 90)]);
        let ninety_one = manifest(&[(boxed(), 91)]);
        assert!(cm.can_load(&ninety, DEFAULT_FILL_RATE).unwrap());
        assert!(!cm.can_load(&ninety_one, DEFAULT_FILL_RATE).unwrap());
        assert!(cm.can_load(&ninety_one, dec!(1)).unwrap());
    }

    #[test]
    fn fill_rate_above_one_is_not_clamped() {
        let cm = CargoManager::new(dec!(10), dec!(1000)).unwrap();
        assert!(cm.can_load(&manifest(&[(boxed(), 15)]), dec!(1.5)).unwrap());
    }

    #[test]
    fn negative_fill_rate_is_a_validation_error() {
        let err = hold()
            .can_load(&manifest(&[(boxed(), 1)]), dec!(-0.1))
            .unwrap_err();
        assert!(matches!(err, CargoError::Domain(DomainError::Validation(_))));
    }

    #[test]
    fn mass_limit_is_checked() {
        let mut cm = CargoManager::new(dec!(1000), dec!(50)).unwrap();
        let err = cm
            .load_products(&manifest(&[(boxed(), 6)]), dec!(1))
            .unwrap_err();
        assert!(matches!(err, CargoError::LoadingImpossible(_)));
        assert!(cm.is_empty());
        assert_eq!(cm.free_mass(), Some(dec!(50)));
    }

    #[test]
    fn unbounded_mass_only_checks_volume() {
        let mut cm = CargoManager::with_unbounded_mass(dec!(10)).unwrap();
        let anvil = Product::new("Anvil", dec!(1), dec!(1000000)).unwrap();
        cm.load_products(&manifest(&[(anvil, 9)]), DEFAULT_FILL_RATE)
            .unwrap();
        assert_eq!(cm.free_mass(), None);
        assert_eq!(cm.used_mass(), dec!(9000000));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut cm = hold();
        let err = cm
            .load_products(&manifest(&[(boxed(), 0)]), DEFAULT_FILL_RATE)
            .unwrap_err();
        assert!(matches!(err, CargoError::Domain(_)));
        assert!(matches!(
            cm.unload_products(&manifest(&[(boxed(), 0)])),
            Err(CargoError::Domain(_))
        ));
    }

    #[test]
    fn unloading_absent_product_fails() {
        let mut cm = hold();
        cm.load_products(&manifest(&[(boxed(), 1)]), DEFAULT_FILL_RATE)
            .unwrap();
        let other = Product::new("Barrel", dec!(1), dec!(1)).unwrap();
        assert!(!cm.can_unload(&manifest(&[(other, 1)])));
    }

    #[test]
    fn emptied_entries_are_removed() {
        let mut cm = hold();
        cm.load_products(&manifest(&[(boxed(), 3)]), DEFAULT_FILL_RATE)
            .unwrap();
        assert_eq!(cm.product_names(), vec!["Box".to_string()]);
        cm.unload_products(&manifest(&[(boxed(), 3)])).unwrap();
        assert!(cm.is_empty());
        assert!(cm.product_names().is_empty());
        assert_eq!(cm.free_space(), dec!(100));
    }

    #[test]
    fn cargo_snapshot_is_detached() {
        let mut cm = hold();
        cm.load_products(&manifest(&[(boxed(), 3)]), DEFAULT_FILL_RATE)
            .unwrap();
        let mut snapshot = cm.cargo();
        snapshot.clear();
        assert_eq!(cm.cargo(), manifest(&[(boxed(), 3)]));
    }

    #[test]
    fn negative_capacity_is_rejected() {
        assert!(CargoManager::new(dec!(-1), dec!(1)).is_err());
        assert!(CargoManager::new(dec!(1), dec!(-1)).is_err());
        assert!(CargoManager::with_unbounded_mass(dec!(-1)).is_err());
    }

    #[test]
    fn resize_keeps_loaded_cargo_inside() {
        let mut cm = hold();
        cm.load_products(&manifest(&[(boxed(), 40)]), DEFAULT_FILL_RATE)
            .unwrap();

        let err = cm.resize(dec!(39), Some(dec!(1000))).unwrap_err();
        assert!(matches!(err, CargoError::UnloadingImpossible(_)));
        assert!(matches!(
            cm.resize(dec!(100), Some(dec!(399))),
            Err(CargoError::UnloadingImpossible(_))
        ));
        assert_eq!(cm.capacity(), dec!(100));

        cm.resize(dec!(40), Some(dec!(400))).unwrap();
        assert_eq!(cm.free_space(), dec!(0));
        assert_eq!(cm.free_mass(), Some(dec!(0)));
    }

    #[test]
    fn plan_does_not_mutate() {
        let cm = hold();
        let plan = cm
            .plan_load(&manifest(&[(boxed(), 2)]), DEFAULT_FILL_RATE)
            .unwrap();
        assert_eq!(
            plan.requirements(),
            Requirements {
                space: dec!(2),
                mass: dec!(20)
            }
        );
        assert!(cm.is_empty());
    }

    #[test]
    fn held_quantity_cannot_overflow() {
        let mut cm = hold();
        let feather = Product::new("Feather", dec!(0), dec!(0)).unwrap();
        cm.load_products(&manifest(&[(feather.clone(), u64::MAX)]), DEFAULT_FILL_RATE)
            .unwrap();

        let one_more = manifest(&[(feather.clone(), 1)]);
        assert!(!cm.can_load(&one_more, DEFAULT_FILL_RATE).unwrap());
        let err = cm.load_products(&one_more, DEFAULT_FILL_RATE).unwrap_err();
        assert!(matches!(err, CargoError::LoadingImpossible(_)));
        assert_eq!(cm.cargo()[&feather], u64::MAX);
        assert_eq!(cm.free_space(), dec!(100));
    }

    #[test]
    fn committed_plan_matches_a_direct_load() {
        let boxes = manifest(&[(boxed(), 80)]);
        let mut planned = hold();
        let plan = planned.plan_load(&boxes, DEFAULT_FILL_RATE).unwrap();
        planned.commit_load(plan);

        let mut direct = hold();
        direct.load_products(&boxes, DEFAULT_FILL_RATE).unwrap();
        assert_eq!(planned, direct);

        let err = planned.plan_load(&boxes, DEFAULT_FILL_RATE).unwrap_err();
        assert!(matches!(err, CargoError::LoadingImpossible(_)));
        assert_eq!(planned.free_space(), dec!(20));
        assert_eq!(planned.free_mass(), Some(dec!(200)));
    }

    fn op() -> impl Strategy<Value = (bool, u8, u64)> {
        (any::<bool>(), 0u8..3, 1u64..20)
    }

    proptest! {
        #[test]
        fn volume_and_mass_are_conserved(ops in proptest::collection::vec(op(), 1..40)) {
            let products = [
                Product::new("Box", dec!(1), dec!(10)).unwrap(),
                Product::new("Crate", dec!(2.5), dec!(3.25)).unwrap(),
                Product::new("Feather", dec!(0.01), dec!(0)).unwrap(),
            ];
            let mut cm = CargoManager::new(dec!(100), dec!(500)).unwrap();

            for (load, which, qty) in ops {
                let m = manifest(&[(products[which as usize].clone(), qty)]);
                let before = cm.clone();
                let result = if load {
                    cm.load_products(&m, DEFAULT_FILL_RATE)
                } else {
                    cm.unload_products(&m)
                };
                if result.is_err() {
                    prop_assert_eq!(&cm, &before);
                }

                let held = CargoManager::get_requirements(&cm.cargo()).unwrap();
                prop_assert_eq!(cm.free_space() + held.space, cm.capacity());
                prop_assert_eq!(cm.free_mass().unwrap() + held.mass, dec!(500));
                prop_assert!(cm.free_space() >= Decimal::ZERO);
                prop_assert!(cm.free_mass().unwrap() >= Decimal::ZERO);
            }
        }
    }
}
