use rust_decimal::Decimal;

use holdco_core::Entity;
use holdco_hr::{Employee, EmployeeId, HrResult, RosterManager};

use crate::cargo::CargoManager;
use crate::error::CargoResult;
use crate::product::Manifest;
use crate::transport::Transport;

/// Storage limited by volume only, with its own staff.
#[derive(Debug, Clone)]
pub struct Warehouse {
    stock: CargoManager,
    staff: RosterManager,
}

impl Warehouse {
    pub fn new(capacity: Decimal) -> CargoResult<Self> {
        Ok(Self {
            stock: CargoManager::with_unbounded_mass(capacity)?,
            staff: RosterManager::new(),
        })
    }

    pub fn capacity(&self) -> Decimal {
        self.stock.capacity()
    }

    pub fn free_space(&self) -> Decimal {
        self.stock.free_space()
    }

    pub fn cargo(&self) -> Manifest {
        self.stock.cargo()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }

    pub fn product_names(&self) -> Vec<String> {
        self.stock.product_names()
    }

    /// Goods arriving from outside the logistics network.
    pub fn supply(&mut self, products: &Manifest, fill_rate: Decimal) -> CargoResult<()> {
        self.stock.load_products(products, fill_rate)?;
        tracing::info!(free_space = %self.stock.free_space(), "warehouse supplied");
        Ok(())
    }

    /// Moves products from the warehouse onto `transport`.
    ///
    /// The warehouse must hold the products and the transport must fit them;
    /// otherwise neither side changes.
    pub fn load_transport(
        &mut self,
        transport: &mut Transport,
        products: &Manifest,
        fill_rate: Decimal,
    ) -> CargoResult<()> {
        let outgoing = self.stock.plan_unload(products)?;
        let incoming = transport.plan_load(products, fill_rate)?;

        self.stock.commit_unload(outgoing);
        transport.commit_load(incoming);
        tracing::info!(
            transport = %transport.id(),
            products = products.len(),
            "transport loaded from warehouse"
        );
        Ok(())
    }

    /// Moves products from `transport` into the warehouse.
    pub fn unload_transport(
        &mut self,
        transport: &mut Transport,
        products: &Manifest,
        fill_rate: Decimal,
    ) -> CargoResult<()> {
        let outgoing = transport.plan_unload(products)?;
        let incoming = self.stock.plan_load(products, fill_rate)?;

        transport.commit_unload(outgoing);
        self.stock.commit_load(incoming);
        tracing::info!(
            transport = %transport.id(),
            products = products.len(),
            "transport unloaded into warehouse"
        );
        Ok(())
    }

    pub fn staff(&self) -> &RosterManager {
        &self.staff
    }

    pub fn hire(&mut self, employee: Employee) -> HrResult<()> {
        self.staff.hire(employee)
    }

    pub fn fire(&mut self, id: EmployeeId) -> HrResult<Employee> {
        self.staff.fire(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cargo::DEFAULT_FILL_RATE;
    use crate::error::CargoError;
    use crate::product::Product;
    use crate::transport::TransportStatus;
    use crate::transport::tests::truck;
    use holdco_finance::{Currency, Money};
    use holdco_hr::{
        EmployeeClassification, EmployeeFactory, EmployeeRole, EmployeeSpec, HrError,
        ProfessionSpec,
    };
    use rust_decimal_macros::dec;

    fn boxes(qty: u64) -> Manifest {
        [(Product::new("Box", dec!(1), dec!(10)).unwrap(), qty)]
            .into_iter()
            .collect()
    }

    fn stocked() -> Warehouse {
        let mut w = Warehouse::new(dec!(1000)).unwrap();
        w.supply(&boxes(100), DEFAULT_FILL_RATE).unwrap();
        w
    }

    #[test]
    fn supply_ignores_mass() {
        let mut w = Warehouse::new(dec!(10)).unwrap();
        let anvil = Product::new("Anvil", dec!(1), dec!(100000)).unwrap();
        w.supply(&[(anvil, 9)].into_iter().collect(), DEFAULT_FILL_RATE)
            .unwrap();
        assert_eq!(w.product_names(), vec!["Anvil".to_string()]);
        assert_eq!(w.free_space(), dec!(1));
    }

    #[test]
    fn supply_respects_fill_rate() {
        let mut w = Warehouse::new(dec!(10)).unwrap();
        let err = w.supply(&boxes(10), DEFAULT_FILL_RATE).unwrap_err();
        assert!(matches!(err, CargoError::LoadingImpossible(_)));
        assert!(w.is_empty());
    }

    #[test]
    fn load_transport_moves_both_sides() {
        let mut w = stocked();
        let mut t = truck(dec!(50), dec!(500));
        w.load_transport(&mut t, &boxes(40), DEFAULT_FILL_RATE)
            .unwrap();
        assert_eq!(w.cargo(), boxes(60));
        assert_eq!(t.cargo(), boxes(40));
        assert_eq!(t.status(), TransportStatus::Available);
        assert_eq!(w.free_space(), dec!(940));
    }

    #[test]
    fn load_transport_checks_the_warehouse_first() {
        let mut w = Warehouse::new(dec!(1000)).unwrap();
        let mut t = truck(dec!(1), dec!(1));
        let err = w
            .load_transport(&mut t, &boxes(5), DEFAULT_FILL_RATE)
            .unwrap_err();
        assert!(matches!(err, CargoError::UnloadingImpossible(_)));
        assert!(w.is_empty());
        assert_eq!(w.free_space(), dec!(1000));
        assert!(t.is_empty());
        assert_eq!(t.free_space(), dec!(1));
        assert_eq!(t.free_mass(), dec!(1));
        assert_eq!(t.status(), TransportStatus::Available);
    }

    #[test]
    fn failed_exchange_changes_nothing() {
        let mut w = stocked();
        let mut t = truck(dec!(50), dec!(100));
        let err = w
            .load_transport(&mut t, &boxes(20), DEFAULT_FILL_RATE)
            .unwrap_err();
        assert!(matches!(err, CargoError::LoadingImpossible(_)));
        assert_eq!(w.cargo(), boxes(100));
        assert!(t.is_empty());
        assert_eq!(t.free_space(), dec!(50));
    }

    #[test]
    fn unload_transport_round_trip() {
        let mut w = stocked();
        let mut t = truck(dec!(50), dec!(500));
        w.load_transport(&mut t, &boxes(40), DEFAULT_FILL_RATE)
            .unwrap();

        let err = w
            .unload_transport(&mut t, &boxes(41), DEFAULT_FILL_RATE)
            .unwrap_err();
        assert!(matches!(err, CargoError::UnloadingImpossible(_)));
        assert_eq!(t.cargo(), boxes(40));
        assert_eq!(t.free_space(), dec!(10));
        assert_eq!(t.free_mass(), dec!(100));
        assert_eq!(w.cargo(), boxes(60));
        assert_eq!(w.free_space(), dec!(940));

        w.unload_transport(&mut t, &boxes(40), DEFAULT_FILL_RATE)
            .unwrap();
        assert!(t.is_empty());
        assert_eq!(w.cargo(), boxes(100));
    }

    #[test]
    fn unload_transport_fails_when_warehouse_is_full() {
        let mut w = Warehouse::new(dec!(100)).unwrap();
        w.supply(&boxes(90), dec!(1)).unwrap();
        let mut t = truck(dec!(50), dec!(500));
        t.load_products(&boxes(20), dec!(1)).unwrap();

        let err = w
            .unload_transport(&mut t, &boxes(20), DEFAULT_FILL_RATE)
            .unwrap_err();
        assert!(matches!(err, CargoError::LoadingImpossible(_)));
        assert_eq!(t.cargo(), boxes(20));
        assert_eq!(w.cargo(), boxes(90));
    }

    #[test]
    fn exchange_with_busy_transport_is_refused() {
        let mut w = stocked();
        let mut t = truck(dec!(50), dec!(500));
        t.send_to_repair().unwrap();
        let err = w
            .load_transport(&mut t, &boxes(1), DEFAULT_FILL_RATE)
            .unwrap_err();
        assert_eq!(
            err,
            CargoError::TransportUnavailable {
                status: TransportStatus::InRepair
            }
        );
        assert_eq!(w.cargo(), boxes(100));
    }

    #[test]
    fn staff_roster() {
        let mut factory = EmployeeFactory::default();
        let e = factory
            .create(EmployeeSpec {
                name: "Oleg".into(),
                surname: "Ivanov".into(),
                role: EmployeeRole::Staff,
                classification: EmployeeClassification::FullTime,
                experience: 2,
                salary: Money::new(dec!(900), Currency::Byn).unwrap(),
                profession: ProfessionSpec::Seller,
            })
            .unwrap();
        let id = e.id_typed();

        let mut w = Warehouse::new(dec!(10)).unwrap();
        w.hire(e.clone()).unwrap();
        assert!(matches!(w.hire(e), Err(HrError::AlreadyHired { .. })));
        assert!(w.staff().has_employee(id));
        w.fire(id).unwrap();
        assert!(w.staff().is_empty());
    }
}
