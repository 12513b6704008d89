//! Vehicles: shared bookkeeping, a status machine and kind-specific data.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use holdco_core::{DomainError, Entity, Location, NonNegative, ValueObject, ensure_non_negative};
use holdco_hr::{Employee, EmployeeId, HrResult, RosterManager};

use crate::cargo::{CargoManager, CargoPlan};
use crate::error::{CargoError, CargoResult};
use crate::product::Manifest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportStatus {
    Available,
    Loading,
    Unloading,
    InTransit,
    InRepair,
    WrittenOff,
}

impl core::fmt::Display for TransportStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Self::Available => "available",
            Self::Loading => "loading",
            Self::Unloading => "unloading",
            Self::InTransit => "in transit",
            Self::InRepair => "in repair",
            Self::WrittenOff => "written off",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarFuelType {
    Benzin,
    Electricity,
    Diesel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipType {
    Tanker,
    Containership,
    Balker,
    Lash,
    Rollker,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub fuel_type: CarFuelType,
    pub is_refrigerated: bool,
}

impl Car {
    pub fn is_fuel_compatible(&self, fuel_type: CarFuelType) -> bool {
        self.fuel_type == fuel_type
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub max_height: NonNegative<f64>,
    pub max_range: NonNegative<f64>,
    pub runway_length_required: NonNegative<f64>,
}

impl Plane {
    pub fn can_take_off(&self, runway_length: f64) -> bool {
        runway_length >= self.runway_length_required.get()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub ship_type: ShipType,
    pub max_draft: NonNegative<f64>,
}

impl Ship {
    pub fn can_draft(&self, channel_depth: f64) -> bool {
        self.max_draft.get() > channel_depth
    }
}

/// Extra hold attached to a train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Wagon {
    capacity: Decimal,
    carrying_capacity: Decimal,
}

impl Wagon {
    pub fn new(capacity: Decimal, carrying_capacity: Decimal) -> CargoResult<Self> {
        Ok(Self {
            capacity: ensure_non_negative("wagon capacity", capacity)?,
            carrying_capacity: ensure_non_negative("wagon carrying capacity", carrying_capacity)?,
        })
    }

    pub fn capacity(&self) -> Decimal {
        self.capacity
    }

    pub fn carrying_capacity(&self) -> Decimal {
        self.carrying_capacity
    }
}

impl ValueObject for Wagon {}

#[derive(Deserialize)]
struct RawWagon {
    capacity: Decimal,
    carrying_capacity: Decimal,
}

impl<'de> Deserialize<'de> for Wagon {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawWagon::deserialize(deserializer)?;
        Wagon::new(raw.capacity, raw.carrying_capacity).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Train {
    wagons: Vec<Wagon>,
    pub track_gauge: NonNegative<f64>,
}

impl Train {
    pub fn new(wagons: Vec<Wagon>, track_gauge: NonNegative<f64>) -> Self {
        Self {
            wagons,
            track_gauge,
        }
    }

    pub fn wagons(&self) -> &[Wagon] {
        &self.wagons
    }

    pub fn wagon_count(&self) -> usize {
        self.wagons.len()
    }

    pub fn is_tracks_compatible(&self, track_gauge: f64) -> bool {
        (self.track_gauge.get() - track_gauge).abs() <= 1e-9 * track_gauge.abs().max(1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransportKind {
    Car(Car),
    Plane(Plane),
    Ship(Ship),
    Train(Train),
}

impl TransportKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Car(_) => "car",
            Self::Plane(_) => "plane",
            Self::Ship(_) => "ship",
            Self::Train(_) => "train",
        }
    }
}

/// Common vehicle data plus a [`TransportKind`] payload.
///
/// For trains the cargo hold covers the locomotive plus every attached wagon.
#[derive(Debug, Clone)]
pub struct Transport {
    id: String,
    model: String,
    production_year: u32,
    tech_inspection_date: NaiveDate,
    max_speed: f64,
    fuel_consumption: NonNegative<f64>,
    current_location: Location,
    status: TransportStatus,
    crew: RosterManager,
    hold: CargoManager,
    kind: TransportKind,
}

/// Common fields of a transport, already validated by the caller.
#[derive(Debug, Clone)]
pub(crate) struct TransportParts {
    pub id: String,
    pub model: String,
    pub production_year: u32,
    pub tech_inspection_date: NaiveDate,
    pub max_speed: f64,
    pub fuel_consumption: NonNegative<f64>,
    pub current_location: Location,
    pub hold: CargoManager,
}

impl Transport {
    pub(crate) fn from_parts(parts: TransportParts, kind: TransportKind) -> Self {
        Self {
            id: parts.id,
            model: parts.model,
            production_year: parts.production_year,
            tech_inspection_date: parts.tech_inspection_date,
            max_speed: parts.max_speed,
            fuel_consumption: parts.fuel_consumption,
            current_location: parts.current_location,
            status: TransportStatus::Available,
            crew: RosterManager::new(),
            hold: parts.hold,
            kind,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn production_year(&self) -> u32 {
        self.production_year
    }

    pub fn tech_inspection_date(&self) -> NaiveDate {
        self.tech_inspection_date
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn fuel_consumption(&self) -> f64 {
        self.fuel_consumption.get()
    }

    pub fn current_location(&self) -> &Location {
        &self.current_location
    }

    pub fn status(&self) -> TransportStatus {
        self.status
    }

    pub fn kind(&self) -> &TransportKind {
        &self.kind
    }

    pub fn capacity(&self) -> Decimal {
        self.hold.capacity()
    }

    pub fn carrying_capacity(&self) -> Decimal {
        self.hold.carrying_capacity().unwrap_or(Decimal::MAX)
    }

    pub fn free_space(&self) -> Decimal {
        self.hold.free_space()
    }

    pub fn free_mass(&self) -> Decimal {
        self.hold.free_mass().unwrap_or(Decimal::MAX)
    }

    pub fn can_work(&self) -> bool {
        self.status == TransportStatus::Available
    }

    fn ensure_available(&self) -> CargoResult<()> {
        if !self.can_work() {
            return Err(CargoError::TransportUnavailable {
                status: self.status,
            });
        }
        Ok(())
    }

    pub fn crew(&self) -> &RosterManager {
        &self.crew
    }

    pub fn add_worker(&mut self, worker: Employee) -> HrResult<()> {
        self.crew.hire(worker)
    }

    pub fn remove_worker(&mut self, id: EmployeeId) -> HrResult<Employee> {
        self.crew.fire(id)
    }

    /// Hours needed at top speed.
    pub fn calculate_min_delivery_time(&self, distance: f64) -> f64 {
        distance / self.max_speed
    }

    /// `fuel_consumption` is per 100 distance units.
    pub fn calculate_fuel_cost(&self, distance: f64, fuel_price: f64) -> f64 {
        distance / 100.0 * self.fuel_consumption.get() * fuel_price
    }

    pub fn can_load(&self, products: &Manifest, fill_rate: Decimal) -> CargoResult<bool> {
        self.hold.can_load(products, fill_rate)
    }

    pub fn can_unload(&self, products: &Manifest) -> bool {
        self.hold.can_unload(products)
    }

    pub fn load_products(&mut self, products: &Manifest, fill_rate: Decimal) -> CargoResult<()> {
        let plan = self.plan_load(products, fill_rate)?;
        self.commit_load(plan);
        Ok(())
    }

    pub fn unload_products(&mut self, products: &Manifest) -> CargoResult<()> {
        let plan = self.plan_unload(products)?;
        self.commit_unload(plan);
        Ok(())
    }

    pub(crate) fn plan_load(
        &self,
        products: &Manifest,
        fill_rate: Decimal,
    ) -> CargoResult<CargoPlan> {
        self.ensure_available()?;
        self.hold.plan_load(products, fill_rate)
    }

    pub(crate) fn plan_unload(&self, products: &Manifest) -> CargoResult<CargoPlan> {
        self.ensure_available()?;
        self.hold.plan_unload(products)
    }

    pub(crate) fn commit_load(&mut self, plan: CargoPlan) {
        self.status = TransportStatus::Loading;
        self.hold.commit_load(plan);
        tracing::info!(
            transport = %self.id,
            free_space = %self.hold.free_space(),
            "transport loaded"
        );
        self.status = TransportStatus::Available;
    }

    pub(crate) fn commit_unload(&mut self, plan: CargoPlan) {
        self.status = TransportStatus::Unloading;
        self.hold.commit_unload(plan);
        tracing::info!(
            transport = %self.id,
            free_space = %self.hold.free_space(),
            "transport unloaded"
        );
        self.status = TransportStatus::Available;
    }

    pub fn cargo(&self) -> Manifest {
        self.hold.cargo()
    }

    pub fn is_empty(&self) -> bool {
        self.hold.is_empty()
    }

    /// Leaves for `destination`; the transport is in transit until [`Transport::arrive`].
    pub fn delivery(&mut self, destination: Location) -> CargoResult<()> {
        self.ensure_available()?;
        tracing::info!(transport = %self.id, to = %destination, "transport departed");
        self.current_location = destination;
        self.status = TransportStatus::InTransit;
        Ok(())
    }

    pub fn arrive(&mut self) -> CargoResult<()> {
        self.transition(TransportStatus::InTransit, TransportStatus::Available)
    }

    pub fn send_to_repair(&mut self) -> CargoResult<()> {
        self.transition(TransportStatus::Available, TransportStatus::InRepair)
    }

    pub fn finish_repair(&mut self) -> CargoResult<()> {
        self.transition(TransportStatus::InRepair, TransportStatus::Available)
    }

    /// Terminal. Not allowed while the transport is on its way.
    pub fn write_off(&mut self) -> CargoResult<()> {
        if matches!(
            self.status,
            TransportStatus::InTransit | TransportStatus::WrittenOff
        ) {
            return Err(CargoError::TransportUnavailable {
                status: self.status,
            });
        }
        tracing::info!(transport = %self.id, "transport written off");
        self.status = TransportStatus::WrittenOff;
        Ok(())
    }

    fn transition(&mut self, from: TransportStatus, to: TransportStatus) -> CargoResult<()> {
        if self.status != from {
            return Err(CargoError::TransportUnavailable {
                status: self.status,
            });
        }
        tracing::debug!(transport = %self.id, %from, %to, "status changed");
        self.status = to;
        Ok(())
    }

    /// `max_range` scaled by the free share of the hold, never below half.
    ///
    /// `None` unless this is a plane. An empty-capacity hold counts as full.
    pub fn calculate_flight_range(&self) -> Option<f64> {
        let TransportKind::Plane(plane) = &self.kind else {
            return None;
        };
        let capacity = self.hold.capacity();
        let free_share = if capacity.is_zero() {
            0.0
        } else {
            (self.hold.free_space() / capacity).to_f64().unwrap_or(0.0)
        };
        Some(plane.max_range.get() * free_share.max(0.5))
    }

    fn train_mut(&mut self) -> CargoResult<&mut Train> {
        match &mut self.kind {
            TransportKind::Train(train) => Ok(train),
            other => Err(DomainError::invariant(format!(
                "{} {} has no wagons",
                other.name(),
                self.id
            ))
            .into()),
        }
    }

    pub fn attach_wagon(&mut self, wagon: Wagon) -> CargoResult<()> {
        let capacity = self.hold.capacity() + wagon.capacity;
        let carrying = self
            .hold
            .carrying_capacity()
            .map(|limit| limit + wagon.carrying_capacity);
        self.train_mut()?;
        self.hold.resize(capacity, carrying)?;
        self.train_mut()?.wagons.push(wagon);
        Ok(())
    }

    /// Removes the first wagon with exactly these limits.
    ///
    /// Fails without changes if the loaded cargo would not fit into what is left.
    pub fn detach_wagon(
        &mut self,
        capacity: Decimal,
        carrying_capacity: Decimal,
    ) -> CargoResult<Wagon> {
        let position = self
            .train_mut()?
            .wagons
            .iter()
            .position(|w| w.capacity == capacity && w.carrying_capacity == carrying_capacity)
            .ok_or(CargoError::WagonNotFound {
                capacity,
                carrying_capacity,
            })?;

        let new_capacity = self.hold.capacity() - capacity;
        let new_carrying = self
            .hold
            .carrying_capacity()
            .map(|limit| limit - carrying_capacity);
        self.hold.resize(new_capacity, new_carrying)?;

        let wagon = self.train_mut()?.wagons.remove(position);
        tracing::debug!(transport = %self.id, %capacity, "wagon detached");
        Ok(wagon)
    }
}

impl Entity for Transport {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
