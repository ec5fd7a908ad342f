//! Data models for rentdesk

pub mod bill;
pub mod customer;
pub mod enums;
pub mod rental;
pub mod user;
pub mod vehicle;

// Re-export commonly used types
pub use bill::{Bill, CreateBill};
pub use customer::{CreateCustomer, Customer, UpdateCustomer};
pub use enums::{PaymentMode, PaymentStatus, RentalStatus, Role, VehicleStatus};
pub use rental::{AdditionalCharges, CreateRental, Rental, UpdateRental};
pub use user::UserProfile;
pub use vehicle::{CreateVehicle, UpdateVehicle, Vehicle};
