//! Rental lifecycle service.
//!
//! Owns the cross-collection side effects: creating a rental flips the
//! vehicle to `On Rent`, completing it flips the vehicle back to
//! `Available`. The transition is one-way and a completed rental rejects
//! further completion, so side effects are never applied twice.

use chrono::Utc;
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        customer::Customer,
        enums::{RentalStatus, VehicleStatus},
        rental::{CreateRental, Rental, UpdateRental},
        vehicle::Vehicle,
    },
    services::{ids, pricing, search},
    store::{decode_record, decode_records, Collection, SharedStore, StoreError},
};

#[derive(Clone)]
pub struct RentalsService {
    store: SharedStore,
}

impl RentalsService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Rental>> {
        Ok(decode_records(
            self.store.snapshot(Collection::Rentals).await?,
        )?)
    }

    pub async fn get(&self, id: &str) -> AppResult<Rental> {
        let raw = self
            .store
            .get(Collection::Rentals, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Rental {} not found", id)))?;
        Ok(decode_record(raw)?)
    }

    /// Create a rental: snapshot vehicle and customer fields, compute the
    /// total, and put the vehicle on rent.
    pub async fn create(&self, payload: CreateRental) -> AppResult<Rental> {
        payload.validate()?;

        let vehicle: Vehicle = self
            .store
            .get(Collection::Vehicles, &payload.vehicle_id)
            .await?
            .map(decode_record)
            .transpose()?
            .ok_or_else(|| {
                AppError::NotFound(format!("Vehicle {} not found", payload.vehicle_id))
            })?;
        let customer: Customer = self
            .store
            .get(Collection::Customers, &payload.customer_id)
            .await?
            .map(decode_record)
            .transpose()?
            .ok_or_else(|| {
                AppError::NotFound(format!("Customer {} not found", payload.customer_id))
            })?;

        if vehicle.status != VehicleStatus::Available {
            return Err(AppError::BusinessRule(format!(
                "Vehicle {} is not available ({})",
                vehicle.id, vehicle.status
            )));
        }

        let total_rent = pricing::compute_total_rent(
            payload.start_date,
            payload.end_date,
            vehicle.rent_rate,
            &payload.additional_charges,
        )?;

        let key = ids::rental_key(&vehicle.id, &customer.id, payload.start_date);
        if self.store.get(Collection::Rentals, &key).await?.is_some() {
            return Err(AppError::Conflict(format!("Rental {} already exists", key)));
        }

        let rental = Rental {
            id: key.clone(),
            vehicle_id: vehicle.id.clone(),
            customer_id: customer.id,
            vehicle_name: vehicle.model,
            customer_name: customer.name,
            rent_rate: vehicle.rent_rate,
            start_date: payload.start_date,
            end_date: payload.end_date,
            additional_charges: payload.additional_charges,
            total_rent,
            status: RentalStatus::Active,
            notes: payload.notes,
            created_at: Utc::now(),
            completed_at: None,
            updated_at: None,
        };

        let record = serde_json::to_value(&rental).map_err(StoreError::from)?;
        self.store.write(Collection::Rentals, &key, record).await?;

        self.store
            .update(
                Collection::Vehicles,
                &vehicle.id,
                json!({ "status": VehicleStatus::OnRent, "updatedAt": Utc::now() }),
            )
            .await?;

        tracing::info!(rental = %key, vehicle = %vehicle.id, total_rent, "rental created");
        Ok(rental)
    }

    /// Mark an active rental as completed and return the vehicle to the
    /// available pool. Rejected for already-completed rentals.
    pub async fn complete(&self, id: &str) -> AppResult<Rental> {
        let rental = self.get(id).await?;
        if rental.status == RentalStatus::Completed {
            return Err(AppError::BusinessRule(format!(
                "Rental {} is already completed",
                id
            )));
        }

        let now = Utc::now();
        self.store
            .update(
                Collection::Rentals,
                id,
                json!({ "status": RentalStatus::Completed, "completedAt": now }),
            )
            .await?;

        // The vehicle may have been deleted since; references are weak and
        // the completion itself still stands.
        match self
            .store
            .update(
                Collection::Vehicles,
                &rental.vehicle_id,
                json!({ "status": VehicleStatus::Available, "updatedAt": now }),
            )
            .await
        {
            Ok(()) => {}
            Err(StoreError::NoSuchRecord { .. }) => {
                tracing::warn!(
                    rental = %id,
                    vehicle = %rental.vehicle_id,
                    "completed rental references a deleted vehicle"
                );
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(rental = %id, vehicle = %rental.vehicle_id, "rental completed");
        self.get(id).await
    }

    /// Edit dates, surcharges or notes; `totalRent` is recomputed against
    /// the rate snapshot taken at creation time.
    pub async fn update(&self, id: &str, changes: UpdateRental) -> AppResult<Rental> {
        changes.validate()?;
        let existing = self.get(id).await?;

        let start_date = changes.start_date.unwrap_or(existing.start_date);
        let end_date = changes.end_date.unwrap_or(existing.end_date);
        let additional_charges = changes
            .additional_charges
            .unwrap_or(existing.additional_charges);

        let total_rent = pricing::compute_total_rent(
            start_date,
            end_date,
            existing.rent_rate,
            &additional_charges,
        )?;

        let mut patch = serde_json::Map::new();
        patch.insert("startDate".into(), json!(start_date));
        patch.insert("endDate".into(), json!(end_date));
        patch.insert("additionalCharges".into(), json!(additional_charges));
        patch.insert("totalRent".into(), json!(total_rent));
        if let Some(notes) = changes.notes {
            patch.insert("notes".into(), json!(notes));
        }
        patch.insert("updatedAt".into(), json!(Utc::now()));

        self.store
            .update(Collection::Rentals, id, Value::Object(patch))
            .await?;
        self.get(id).await
    }

    /// Unconditional removal. Never cascades; bills referencing the rental
    /// keep their snapshots.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.store.delete(Collection::Rentals, id).await?;
        tracing::info!(rental = %id, "rental deleted");
        Ok(())
    }

    pub async fn search(&self, query: &str) -> AppResult<Vec<Rental>> {
        Ok(search::filter_rentals(&self.list().await?, query))
    }
}
