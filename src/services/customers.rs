//! Customer management service

use chrono::Utc;
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::customer::{CreateCustomer, Customer, UpdateCustomer},
    services::{ids, search},
    store::{decode_record, decode_records, Collection, SharedStore, StoreError},
};

#[derive(Clone)]
pub struct CustomersService {
    store: SharedStore,
}

impl CustomersService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Customer>> {
        Ok(decode_records(
            self.store.snapshot(Collection::Customers).await?,
        )?)
    }

    pub async fn get(&self, id: &str) -> AppResult<Customer> {
        let raw = self
            .store
            .get(Collection::Customers, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer {} not found", id)))?;
        Ok(decode_record(raw)?)
    }

    /// Register a new customer, keyed by the digits of the phone number
    pub async fn create(&self, payload: CreateCustomer) -> AppResult<Customer> {
        payload.validate()?;

        let key = ids::customer_key(&payload.phone);
        if key == "CUST_" {
            return Err(AppError::Validation(
                "phone number must contain at least one digit".to_string(),
            ));
        }
        if self.store.get(Collection::Customers, &key).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Customer {} already exists",
                key
            )));
        }

        let customer = Customer {
            id: key.clone(),
            name: payload.name,
            phone: payload.phone,
            email: payload.email,
            address: payload.address,
            pan: payload.pan,
            gst: payload.gst,
            created_at: Utc::now(),
            updated_at: None,
        };

        let record = serde_json::to_value(&customer).map_err(StoreError::from)?;
        self.store
            .write(Collection::Customers, &key, record)
            .await?;
        tracing::info!(customer = %key, "customer registered");
        Ok(customer)
    }

    pub async fn update(&self, id: &str, changes: UpdateCustomer) -> AppResult<Customer> {
        changes.validate()?;
        self.get(id).await?;

        let mut patch = serde_json::Map::new();
        if let Some(name) = changes.name {
            patch.insert("name".into(), json!(name));
        }
        if let Some(email) = changes.email {
            patch.insert("email".into(), json!(email));
        }
        if let Some(address) = changes.address {
            patch.insert("address".into(), json!(address));
        }
        if let Some(pan) = changes.pan {
            patch.insert("pan".into(), json!(pan));
        }
        if let Some(gst) = changes.gst {
            patch.insert("gst".into(), json!(gst));
        }
        patch.insert("updatedAt".into(), json!(Utc::now()));

        self.store
            .update(Collection::Customers, id, Value::Object(patch))
            .await?;
        self.get(id).await
    }

    /// Unconditional removal; existing rentals keep their name snapshots
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.store.delete(Collection::Customers, id).await?;
        tracing::info!(customer = %id, "customer deleted");
        Ok(())
    }

    pub async fn search(&self, query: &str) -> AppResult<Vec<Customer>> {
        Ok(search::filter_customers(&self.list().await?, query))
    }
}
