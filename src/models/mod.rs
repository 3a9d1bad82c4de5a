pub mod car;
pub mod car_garage;
pub mod garage;
pub mod maintenance_request;

pub use car::{Car, CarTable};
pub use car_garage::{CarGarage, CarGarageTable};
pub use garage::{Garage, GarageTable};
pub use maintenance_request::{MaintenanceRequest, MaintenanceRequestTable};

pub trait Table {
    /// The name of the table
    fn name(&self) -> &'static str;

    /// The SQL statement to create the table
    fn create(&self) -> String;

    /// The SQL statement to dispose the table
    fn dispose(&self) -> String;

    /// The dependencies of the table
    fn dependencies(&self) -> Vec<&'static str>;
}
