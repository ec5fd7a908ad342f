//! Billing service.
//!
//! Bills are created from a rental's snapshot and keyed by the generated
//! bill number. Payments only ever increase `amountPaid`; status is always
//! re-derived rather than taken from the caller.

use chrono::{Local, Utc};
use serde_json::json;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        bill::{Bill, CreateBill},
        rental::Rental,
    },
    services::{ids, pricing, search},
    store::{decode_record, decode_records, Collection, SharedStore, StoreError},
};

#[derive(Clone)]
pub struct BillingService {
    store: SharedStore,
}

impl BillingService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Bill>> {
        Ok(decode_records(
            self.store.snapshot(Collection::Billing).await?,
        )?)
    }

    pub async fn get(&self, id: &str) -> AppResult<Bill> {
        let raw = self
            .store
            .get(Collection::Billing, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Bill {} not found", id)))?;
        Ok(decode_record(raw)?)
    }

    /// Generate a bill from a rental snapshot.
    ///
    /// The bill number is minute-granular; a second bill generated within
    /// the same minute lands on the same key and overwrites the first
    /// (known limitation of the numbering scheme).
    pub async fn create(&self, payload: CreateBill) -> AppResult<Bill> {
        payload.validate()?;

        let rental: Rental = self
            .store
            .get(Collection::Rentals, &payload.rental_id)
            .await?
            .map(decode_record)
            .transpose()?
            .ok_or_else(|| {
                AppError::NotFound(format!("Rental {} not found", payload.rental_id))
            })?;

        let number = ids::bill_number(Local::now());
        let status = pricing::derive_payment_status(rental.total_rent, payload.amount_paid);

        let bill = Bill {
            id: number.clone(),
            bill_number: number.clone(),
            rental_id: rental.id,
            vehicle_name: rental.vehicle_name,
            customer_name: rental.customer_name,
            total_amount: rental.total_rent,
            amount_paid: payload.amount_paid,
            due_amount: rental.total_rent - payload.amount_paid,
            status,
            payment_mode: payload.payment_mode,
            notes: payload.notes,
            created_at: Utc::now(),
            updated_at: None,
        };

        let record = serde_json::to_value(&bill).map_err(StoreError::from)?;
        self.store.write(Collection::Billing, &number, record).await?;
        tracing::info!(bill = %number, total = bill.total_amount, %status, "bill generated");
        Ok(bill)
    }

    /// Record a payment against a bill. The amount is added to what has
    /// already been paid and the status re-derived; `amountPaid` is
    /// monotonically increasing.
    pub async fn record_payment(&self, id: &str, amount: i64) -> AppResult<Bill> {
        if amount <= 0 {
            return Err(AppError::Validation(
                "payment amount must be positive".to_string(),
            ));
        }

        let bill = self.get(id).await?;
        let amount_paid = bill.amount_paid + amount;
        let due_amount = bill.total_amount - amount_paid;
        let status = pricing::derive_payment_status(bill.total_amount, amount_paid);

        self.store
            .update(
                Collection::Billing,
                id,
                json!({
                    "amountPaid": amount_paid,
                    "dueAmount": due_amount,
                    "status": status,
                    "updatedAt": Utc::now(),
                }),
            )
            .await?;

        tracing::info!(bill = %id, amount, %status, "payment recorded");
        self.get(id).await
    }

    pub async fn search(&self, query: &str) -> AppResult<Vec<Bill>> {
        Ok(search::filter_bills(&self.list().await?, query))
    }
}
