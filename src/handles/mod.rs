pub mod car_handle;
pub mod garage_handle;
pub mod maintenance_handle;

pub use car_handle::*;
pub use garage_handle::*;
pub use maintenance_handle::*;
