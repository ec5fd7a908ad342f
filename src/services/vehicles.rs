//! Vehicle management service

use chrono::Utc;
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::vehicle::{CreateVehicle, UpdateVehicle, Vehicle},
    services::{ids, search},
    store::{decode_record, decode_records, Collection, SharedStore, StoreError},
};

#[derive(Clone)]
pub struct VehiclesService {
    store: SharedStore,
}

impl VehiclesService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Vehicle>> {
        Ok(decode_records(
            self.store.snapshot(Collection::Vehicles).await?,
        )?)
    }

    pub async fn get(&self, id: &str) -> AppResult<Vehicle> {
        let raw = self
            .store
            .get(Collection::Vehicles, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle {} not found", id)))?;
        Ok(decode_record(raw)?)
    }

    /// Register a new vehicle under its derived key
    pub async fn create(&self, payload: CreateVehicle) -> AppResult<Vehicle> {
        payload.validate()?;

        let key = ids::vehicle_key(&payload.vehicle_id);
        if self.store.get(Collection::Vehicles, &key).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Vehicle {} already exists",
                key
            )));
        }

        let vehicle = Vehicle {
            id: key.clone(),
            vehicle_id: payload.vehicle_id,
            model: payload.model,
            vehicle_type: payload.vehicle_type,
            condition: payload.condition,
            status: payload.status,
            rent_rate: payload.rent_rate,
            description: payload.description,
            created_at: Utc::now(),
            updated_at: None,
        };

        let record = serde_json::to_value(&vehicle).map_err(StoreError::from)?;
        self.store.write(Collection::Vehicles, &key, record).await?;
        tracing::info!(vehicle = %key, "vehicle registered");
        Ok(vehicle)
    }

    /// Patch an existing vehicle. Status edits are allowed here even though
    /// rental lifecycle transitions also write status; a direct edit can
    /// therefore desynchronize status from actual rental state.
    pub async fn update(&self, id: &str, changes: UpdateVehicle) -> AppResult<Vehicle> {
        changes.validate()?;
        // Missing record is a NotFound, not a blind patch
        self.get(id).await?;

        let mut patch = serde_json::Map::new();
        if let Some(model) = changes.model {
            patch.insert("model".into(), json!(model));
        }
        if let Some(vehicle_type) = changes.vehicle_type {
            patch.insert("type".into(), json!(vehicle_type));
        }
        if let Some(condition) = changes.condition {
            patch.insert("condition".into(), json!(condition));
        }
        if let Some(status) = changes.status {
            patch.insert("status".into(), json!(status));
        }
        if let Some(rent_rate) = changes.rent_rate {
            patch.insert("rentRate".into(), json!(rent_rate));
        }
        if let Some(description) = changes.description {
            patch.insert("description".into(), json!(description));
        }
        patch.insert("updatedAt".into(), json!(Utc::now()));

        self.store
            .update(Collection::Vehicles, id, Value::Object(patch))
            .await?;
        self.get(id).await
    }

    /// Unconditional removal; a missing key is a store-level no-op
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.store.delete(Collection::Vehicles, id).await?;
        tracing::info!(vehicle = %id, "vehicle deleted");
        Ok(())
    }

    pub async fn search(&self, query: &str) -> AppResult<Vec<Vehicle>> {
        Ok(search::filter_vehicles(&self.list().await?, query))
    }
}
