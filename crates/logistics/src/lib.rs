//! Logistics module: products, cargo holds, the transport fleet and warehouses.

pub mod cargo;
pub mod error;
pub mod factory;
pub mod product;
pub mod transport;
pub mod warehouse;

pub use cargo::{CargoManager, CargoPlan, DEFAULT_FILL_RATE, Requirements};
pub use error::{CargoError, CargoResult};
pub use factory::{KindSpec, TransportFactory, TransportSpec};
pub use product::{Manifest, Product};
pub use transport::{
    Car, CarFuelType, Plane, Ship, ShipType, Train, Transport, TransportKind, TransportStatus,
    Wagon,
};
pub use warehouse::Warehouse;
