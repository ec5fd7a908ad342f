//! Business logic services

pub mod billing;
pub mod customers;
pub mod ids;
pub mod pricing;
pub mod rentals;
pub mod search;
pub mod stats;
pub mod users;
pub mod vehicles;

use crate::{config::AppConfig, store::SharedStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub vehicles: vehicles::VehiclesService,
    pub customers: customers::CustomersService,
    pub rentals: rentals::RentalsService,
    pub billing: billing::BillingService,
    pub stats: stats::StatsService,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services against the given record store
    pub fn new(store: SharedStore, config: &AppConfig) -> Self {
        Self {
            vehicles: vehicles::VehiclesService::new(store.clone()),
            customers: customers::CustomersService::new(store.clone()),
            rentals: rentals::RentalsService::new(store.clone()),
            billing: billing::BillingService::new(store.clone()),
            stats: stats::StatsService::new(store.clone()),
            users: users::UsersService::new(store, config.auth.default_role),
        }
    }
}
