pub mod car;
pub mod car_garage;
pub mod garage;
pub mod maintenance_request;

pub use car::{CarFilter, CarRepository};
pub use car_garage::CarGarageRepository;
pub use garage::GarageRepository;
pub use maintenance_request::{MaintenanceFilter, MaintenanceRequestRepository};
