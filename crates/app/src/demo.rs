//! End-to-end walk through the holding: staff, money and cargo.

use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;

use holdco_companies::{Company, CompanyDetails, CorporateGroup};
use holdco_core::{Location, Region};
use holdco_finance::{Account, BudgetManagementService, Currency, Money, TransactionStatus};
use holdco_hr::{EmployeeFactory, Work};
use holdco_logistics::{Manifest, Product, TransportFactory, Warehouse};

use crate::settings::Settings;

const DIRECTOR: &str = r#"{
    "name": "Olga", "surname": "Kovalenko", "role": "ceo",
    "classification": "full_time", "experience": 15,
    "salary": {"amount": "9000", "currency": "USD"},
    "profession": "hr_specialist"
}"#;

const DRIVER: &str = r#"{
    "name": "Ivan", "surname": "Petrov", "role": "staff",
    "classification": "full_time", "experience": 6,
    "salary": {"amount": "2100", "currency": "USD"},
    "profession": "driver",
    "field": {"workwear": ["vest", "boots"], "medical_check_date": "2025-02-10"},
    "license_category": "CE", "license_expire_date": "2030-08-01"
}"#;

const TRUCK: &str = r#"{
    "transport_type": "car",
    "transport_id": "TRK-001", "model": "Volvo FH16",
    "production_year": 2021, "tech_inspection_date": "2025-04-01",
    "capacity": "80", "carrying_capacity": "18000",
    "max_speed": 90, "fuel_consumption": 32,
    "current_location": {"region": "europe", "country": "Belarus", "city": "Minsk",
                         "street": "Partizansky", "building": "150"},
    "fuel_type": "diesel", "is_refrigerated": false
}"#;

/// What the run ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub ledger_entries: usize,
    pub headquarters_balance: Money,
    pub subsidiary_balance: Money,
    pub warehouse_free_space: Decimal,
    pub payroll: Money,
}

pub fn run(settings: &Settings) -> anyhow::Result<Summary> {
    let mut staff = EmployeeFactory::default();
    let director = staff.create_from_json(DIRECTOR).context("director")?;

    let hq = Company::headquarters(CompanyDetails {
        name: "Holdco".into(),
        location: Location::new(Region::Europe, "Belarus", "Minsk", "Nemiga", "5")?,
        director: director.clone(),
        starting_capital: Some(Money::new(Decimal::from(50_000), Currency::Usd)?),
    })?;
    let logistics = Company::subsidiary(
        CompanyDetails {
            name: "Holdco Logistics".into(),
            location: Location::new(Region::Europe, "Poland", "Warsaw", "Grojecka", "19")?,
            director,
            starting_capital: Some(Money::zero(Currency::Eur)),
        },
        Decimal::from(100),
        &hq,
    )?;
    let logistics_id = logistics.account_id();

    let mut group = CorporateGroup::new(hq)?;
    group.add_subsidiary(logistics)?;

    let driver = staff.create_from_json(DRIVER).context("driver")?;
    let (hq, subsidiary) = group
        .split_mut(logistics_id)
        .context("subsidiary is part of the group")?;
    subsidiary.hire(driver.clone())?;

    let mut ledger = BudgetManagementService::new(settings.rates.clone());
    let funding = ledger.transfer(
        Money::new(Decimal::from(11_000), Currency::Usd)?,
        hq,
        subsidiary,
        "fleet budget",
    )?;
    anyhow::ensure!(
        funding.status() == TransactionStatus::Completed,
        "funding transfer was not completed"
    );

    let overfunded = ledger.transfer(
        Money::new(Decimal::from(1_000), Currency::Usd)?,
        hq,
        subsidiary,
        "duplicate request",
    )?;
    ledger.refund(overfunded.id(), hq, subsidiary)?;
    tracing::info!(
        entries = ledger.transaction_history().len(),
        "ledger settled"
    );

    let mut truck = TransportFactory::new().create_from_json(TRUCK)?;
    truck.add_worker(driver)?;

    let pallet = Product::new("Pallet", Decimal::new(15, 1), Decimal::from(400))?;
    let manifest = |qty: u64| -> Manifest { [(pallet.clone(), qty)].into_iter().collect() };

    let mut warehouse = Warehouse::new(Decimal::from(500))?;
    warehouse.supply(&manifest(200), settings.fill_rate)?;
    warehouse.load_transport(&mut truck, &manifest(40), settings.fill_rate)?;

    if let Err(e) = warehouse.load_transport(&mut truck, &manifest(40), settings.fill_rate) {
        tracing::warn!(error = %e, "second load refused");
    }

    let brest = Location::new(Region::Europe, "Belarus", "Brest", "Moskovskaya", "2")?;
    truck.delivery(brest)?;
    let hours = truck.calculate_min_delivery_time(350.0);
    let fuel = truck.calculate_fuel_cost(350.0, 1.4);
    tracing::info!(hours, fuel, "truck on the road");

    let mut rng = StdRng::from_os_rng();
    if let Some(id) = truck.crew().employees().first().map(|e| e.id_typed()) {
        let mut crew_member = truck.remove_worker(id)?;
        let report = crew_member.work(&mut rng);
        tracing::info!(?report, "driver shift");
        truck.add_worker(crew_member)?;
    }
    truck.arrive()?;
    warehouse.unload_transport(&mut truck, &manifest(40), settings.fill_rate)?;

    let summary = Summary {
        ledger_entries: ledger.transaction_history().len(),
        headquarters_balance: group.headquarters().balance(),
        subsidiary_balance: group
            .member(logistics_id)
            .map(Account::balance)
            .context("subsidiary is part of the group")?,
        warehouse_free_space: warehouse.free_space(),
        payroll: group
            .member(logistics_id)
            .context("subsidiary is part of the group")?
            .calculate_payroll()?,
    };
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::default_rates;
    use rust_decimal_macros::dec;

    #[test]
    fn scenario_balances_out() {
        let settings = Settings {
            rates: default_rates().unwrap(),
            fill_rate: dec!(0.9),
        };
        let summary = run(&settings).unwrap();

        assert_eq!(summary.ledger_entries, 3);
        assert_eq!(
            summary.headquarters_balance,
            Money::new(dec!(39000), Currency::Usd).unwrap()
        );
        assert_eq!(
            summary.subsidiary_balance,
            Money::new(dec!(10000), Currency::Eur).unwrap()
        );
        assert_eq!(summary.warehouse_free_space, dec!(200));
        assert_eq!(
            summary.payroll,
            Money::new(dec!(2100), Currency::Usd).unwrap()
        );
    }
}
