//! Building transports from declarative specs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use holdco_core::{DomainError, Location, NonNegative, ensure_not_blank, ensure_positive};

use crate::cargo::CargoManager;
use crate::error::CargoResult;
use crate::transport::{
    Car, CarFuelType, Plane, Ship, ShipType, Train, Transport, TransportKind, TransportParts,
    Wagon,
};

/// Everything needed to put a vehicle into service.
///
/// JSON uses a `"transport_type"` tag (`car`, `plane`, `ship`, `train`) next to
/// the common fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportSpec {
    pub transport_id: String,
    pub model: String,
    pub production_year: u32,
    pub tech_inspection_date: NaiveDate,
    pub capacity: Decimal,
    pub carrying_capacity: Decimal,
    pub max_speed: f64,
    pub fuel_consumption: NonNegative<f64>,
    pub current_location: Location,
    #[serde(flatten)]
    pub kind: KindSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "transport_type", rename_all = "snake_case")]
pub enum KindSpec {
    Car {
        fuel_type: CarFuelType,
        is_refrigerated: bool,
    },
    Plane {
        max_height: NonNegative<f64>,
        max_range: NonNegative<f64>,
        runway_length_required: NonNegative<f64>,
    },
    Ship {
        ship_type: ShipType,
        max_draft: NonNegative<f64>,
    },
    Train {
        track_gauge: NonNegative<f64>,
        #[serde(default)]
        wagons: Vec<Wagon>,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TransportFactory;

impl TransportFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn create(&self, spec: TransportSpec) -> CargoResult<Transport> {
        ensure_not_blank("transport id", &spec.transport_id)?;
        ensure_not_blank("model", &spec.model)?;
        let max_speed = ensure_positive("max speed", spec.max_speed)?;

        let (capacity, carrying_capacity, kind) = match spec.kind {
            KindSpec::Car {
                fuel_type,
                is_refrigerated,
            } => (
                spec.capacity,
                spec.carrying_capacity,
                TransportKind::Car(Car {
                    fuel_type,
                    is_refrigerated,
                }),
            ),
            KindSpec::Plane {
                max_height,
                max_range,
                runway_length_required,
            } => (
                spec.capacity,
                spec.carrying_capacity,
                TransportKind::Plane(Plane {
                    max_height,
                    max_range,
                    runway_length_required,
                }),
            ),
            KindSpec::Ship {
                ship_type,
                max_draft,
            } => (
                spec.capacity,
                spec.carrying_capacity,
                TransportKind::Ship(Ship {
                    ship_type,
                    max_draft,
                }),
            ),
            KindSpec::Train {
                track_gauge,
                wagons,
            } => {
                let capacity = wagons
                    .iter()
                    .try_fold(spec.capacity, |acc, w| acc.checked_add(w.capacity()));
                let carrying = wagons.iter().try_fold(spec.carrying_capacity, |acc, w| {
                    acc.checked_add(w.carrying_capacity())
                });
                let (Some(capacity), Some(carrying)) = (capacity, carrying) else {
                    return Err(DomainError::validation("train capacity is too large").into());
                };
                (
                    capacity,
                    carrying,
                    TransportKind::Train(Train::new(wagons, track_gauge)),
                )
            }
        };

        let transport = Transport::from_parts(
            TransportParts {
                id: spec.transport_id,
                model: spec.model,
                production_year: spec.production_year,
                tech_inspection_date: spec.tech_inspection_date,
                max_speed,
                fuel_consumption: spec.fuel_consumption,
                current_location: spec.current_location,
                hold: CargoManager::new(capacity, carrying_capacity)?,
            },
            kind,
        );
        tracing::debug!(
            kind = transport.kind().name(),
            model = transport.model(),
            "transport created"
        );
        Ok(transport)
    }

    pub fn create_from_json(&self, json: &str) -> CargoResult<Transport> {
        let spec: TransportSpec = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("transport spec: {e}")))?;
        self.create(spec)
    }
}
