//! Search filters.
//!
//! Case-insensitive substring match of a query against a fixed set of
//! fields per entity. Result order preserves the input order; an empty
//! query matches everything.

use crate::models::{Bill, Customer, Rental, Vehicle};

fn matches(field: &str, query: &str) -> bool {
    field.to_lowercase().contains(query)
}

fn matches_opt(field: Option<&String>, query: &str) -> bool {
    field.map(|f| matches(f, query)).unwrap_or(false)
}

/// Filter vehicles on vehicleId / model / type
pub fn filter_vehicles(vehicles: &[Vehicle], query: &str) -> Vec<Vehicle> {
    let query = query.to_lowercase();
    vehicles
        .iter()
        .filter(|v| {
            matches(&v.vehicle_id, &query)
                || matches(&v.model, &query)
                || matches(&v.vehicle_type, &query)
        })
        .cloned()
        .collect()
}

/// Filter customers on name / phone / email
pub fn filter_customers(customers: &[Customer], query: &str) -> Vec<Customer> {
    let query = query.to_lowercase();
    customers
        .iter()
        .filter(|c| {
            matches(&c.name, &query)
                || matches(&c.phone, &query)
                || matches_opt(c.email.as_ref(), &query)
        })
        .cloned()
        .collect()
}

/// Filter rentals on the vehicle/customer name snapshots
pub fn filter_rentals(rentals: &[Rental], query: &str) -> Vec<Rental> {
    let query = query.to_lowercase();
    rentals
        .iter()
        .filter(|r| matches(&r.vehicle_name, &query) || matches(&r.customer_name, &query))
        .cloned()
        .collect()
}

/// Filter bills on customerName / vehicleName / billNumber
pub fn filter_bills(bills: &[Bill], query: &str) -> Vec<Bill> {
    let query = query.to_lowercase();
    bills
        .iter()
        .filter(|b| {
            matches(&b.customer_name, &query)
                || matches(&b.vehicle_name, &query)
                || matches(&b.bill_number, &query)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::VehicleStatus;
    use chrono::Utc;

    fn vehicle(id: &str, model: &str, vehicle_type: &str) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            vehicle_id: id.to_string(),
            model: model.to_string(),
            vehicle_type: vehicle_type.to_string(),
            condition: "Good".to_string(),
            status: VehicleStatus::Available,
            rent_rate: 5000,
            description: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn match_is_case_insensitive_substring() {
        let vehicles = vec![
            vehicle("JCB_3DX", "JCB 3DX", "JCB"),
            vehicle("EX_200", "Tata Hitachi EX 200", "Excavator"),
        ];
        let hits = filter_vehicles(&vehicles, "jcb");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].model, "JCB 3DX");
    }

    #[test]
    fn empty_query_returns_all_in_order() {
        let vehicles = vec![
            vehicle("B_1", "Bulldozer One", "Bulldozer"),
            vehicle("A_1", "Loader One", "Loader"),
        ];
        let hits = filter_vehicles(&vehicles, "");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "B_1");
        assert_eq!(hits[1].id, "A_1");
    }

    #[test]
    fn type_field_is_searched() {
        let vehicles = vec![vehicle("EX_200", "Tata Hitachi EX 200", "Excavator")];
        assert_eq!(filter_vehicles(&vehicles, "excav").len(), 1);
        assert!(filter_vehicles(&vehicles, "grader").is_empty());
    }
}
