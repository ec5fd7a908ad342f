//! Service-level tests against the in-memory record store

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use serde_json::Value;

use rentdesk::{
    models::{
        enums::{PaymentStatus, RentalStatus, Role, VehicleStatus},
        AdditionalCharges, CreateBill, CreateCustomer, CreateRental, CreateVehicle, Customer,
        UpdateRental, UpdateVehicle, Vehicle,
    },
    services::Services,
    store::{Collection, MemoryStore, RecordStore, RecordStream, StoreError},
    AppConfig, AppError,
};

fn setup() -> (Arc<MemoryStore>, Services) {
    let store = Arc::new(MemoryStore::new());
    let services = Services::new(store.clone(), &AppConfig::default());
    (store, services)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn seed_vehicle(services: &Services, code: &str, model: &str, rent_rate: i64) -> Vehicle {
    services
        .vehicles
        .create(CreateVehicle {
            vehicle_id: code.to_string(),
            model: model.to_string(),
            vehicle_type: "JCB".to_string(),
            condition: "Good".to_string(),
            status: VehicleStatus::Available,
            rent_rate,
            description: None,
        })
        .await
        .unwrap()
}

async fn seed_customer(services: &Services, name: &str, phone: &str) -> Customer {
    services
        .customers
        .create(CreateCustomer {
            name: name.to_string(),
            phone: phone.to_string(),
            email: None,
            address: None,
            pan: None,
            gst: None,
        })
        .await
        .unwrap()
}

fn rental_payload(
    vehicle_id: &str,
    customer_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> CreateRental {
    CreateRental {
        vehicle_id: vehicle_id.to_string(),
        customer_id: customer_id.to_string(),
        start_date: start,
        end_date: end,
        additional_charges: AdditionalCharges {
            diesel: 200,
            transport: 100,
            driver_fee: 0,
        },
        notes: None,
    }
}

#[tokio::test]
async fn vehicle_create_derives_key_and_rejects_duplicates() {
    let (_store, services) = setup();

    let vehicle = seed_vehicle(&services, "jcb 3dx", "JCB 3DX", 5000).await;
    assert_eq!(vehicle.id, "JCB_3DX");
    assert_eq!(vehicle.status, VehicleStatus::Available);

    let duplicate = services
        .vehicles
        .create(CreateVehicle {
            vehicle_id: "JCB 3DX".to_string(),
            model: "JCB 3DX eco".to_string(),
            vehicle_type: "JCB".to_string(),
            condition: "Good".to_string(),
            status: VehicleStatus::Available,
            rent_rate: 4000,
            description: None,
        })
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn customer_key_comes_from_phone_digits() {
    let (_store, services) = setup();

    let customer = seed_customer(&services, "Ramesh Kumar", "+91 98765-43210").await;
    assert_eq!(customer.id, "CUST_919876543210");

    let no_digits = services
        .customers
        .create(CreateCustomer {
            name: "No Phone".to_string(),
            phone: "unknown".to_string(),
            email: None,
            address: None,
            pan: None,
            gst: None,
        })
        .await;
    assert!(matches!(no_digits, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn rental_creation_snapshots_fields_and_flips_vehicle() {
    let (_store, services) = setup();
    let vehicle = seed_vehicle(&services, "jcb 3dx", "JCB 3DX", 5000).await;
    let customer = seed_customer(&services, "Ramesh Kumar", "9876543210").await;

    let rental = services
        .rentals
        .create(rental_payload(
            &vehicle.id,
            &customer.id,
            date(2025, 1, 1),
            date(2025, 1, 3),
        ))
        .await
        .unwrap();

    assert_eq!(rental.id, "RENTAL_JCB_3DX_CUST_9876543210_20250101");
    assert_eq!(rental.vehicle_name, "JCB 3DX");
    assert_eq!(rental.customer_name, "Ramesh Kumar");
    assert_eq!(rental.rent_rate, 5000);
    // 3 days x 5000 + 300 surcharges
    assert_eq!(rental.total_rent, 15_300);
    assert_eq!(rental.status, RentalStatus::Active);

    let vehicle = services.vehicles.get(&vehicle.id).await.unwrap();
    assert_eq!(vehicle.status, VehicleStatus::OnRent);
}

#[tokio::test]
async fn renting_an_unavailable_vehicle_is_rejected() {
    let (_store, services) = setup();
    let vehicle = seed_vehicle(&services, "EX 200", "Tata Hitachi EX 200", 7000).await;
    let first = seed_customer(&services, "Ramesh Kumar", "9876543210").await;
    let second = seed_customer(&services, "Suresh Patel", "9123456780").await;

    services
        .rentals
        .create(rental_payload(
            &vehicle.id,
            &first.id,
            date(2025, 2, 1),
            date(2025, 2, 5),
        ))
        .await
        .unwrap();

    let overlapping = services
        .rentals
        .create(rental_payload(
            &vehicle.id,
            &second.id,
            date(2025, 2, 3),
            date(2025, 2, 4),
        ))
        .await;
    assert!(matches!(overlapping, Err(AppError::BusinessRule(_))));
}

#[tokio::test]
async fn inverted_date_range_is_rejected() {
    let (_store, services) = setup();
    let vehicle = seed_vehicle(&services, "jcb 3dx", "JCB 3DX", 5000).await;
    let customer = seed_customer(&services, "Ramesh Kumar", "9876543210").await;

    let inverted = services
        .rentals
        .create(rental_payload(
            &vehicle.id,
            &customer.id,
            date(2025, 1, 3),
            date(2025, 1, 1),
        ))
        .await;
    assert!(matches!(inverted, Err(AppError::Computation(_))));
}

#[tokio::test]
async fn completing_a_rental_is_one_way_and_frees_the_vehicle() {
    let (_store, services) = setup();
    let vehicle = seed_vehicle(&services, "jcb 3dx", "JCB 3DX", 5000).await;
    let customer = seed_customer(&services, "Ramesh Kumar", "9876543210").await;
    let rental = services
        .rentals
        .create(rental_payload(
            &vehicle.id,
            &customer.id,
            date(2025, 1, 1),
            date(2025, 1, 3),
        ))
        .await
        .unwrap();

    let completed = services.rentals.complete(&rental.id).await.unwrap();
    assert_eq!(completed.status, RentalStatus::Completed);
    assert!(completed.completed_at.is_some());

    let vehicle = services.vehicles.get(&vehicle.id).await.unwrap();
    assert_eq!(vehicle.status, VehicleStatus::Available);

    // Re-completing never re-applies side effects
    let again = services.rentals.complete(&rental.id).await;
    assert!(matches!(again, Err(AppError::BusinessRule(_))));
}

#[tokio::test]
async fn completion_survives_a_deleted_vehicle() {
    let (_store, services) = setup();
    let vehicle = seed_vehicle(&services, "jcb 3dx", "JCB 3DX", 5000).await;
    let customer = seed_customer(&services, "Ramesh Kumar", "9876543210").await;
    let rental = services
        .rentals
        .create(rental_payload(
            &vehicle.id,
            &customer.id,
            date(2025, 1, 1),
            date(2025, 1, 3),
        ))
        .await
        .unwrap();

    // References are weak; no cascade in either direction
    services.vehicles.delete(&vehicle.id).await.unwrap();

    let completed = services.rentals.complete(&rental.id).await.unwrap();
    assert_eq!(completed.status, RentalStatus::Completed);
}

#[tokio::test]
async fn rental_edit_recomputes_total_against_rate_snapshot() {
    let (_store, services) = setup();
    let vehicle = seed_vehicle(&services, "jcb 3dx", "JCB 3DX", 5000).await;
    let customer = seed_customer(&services, "Ramesh Kumar", "9876543210").await;
    let rental = services
        .rentals
        .create(rental_payload(
            &vehicle.id,
            &customer.id,
            date(2025, 1, 1),
            date(2025, 1, 3),
        ))
        .await
        .unwrap();

    let updated = services
        .rentals
        .update(
            &rental.id,
            UpdateRental {
                end_date: Some(date(2025, 1, 5)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // 5 days x 5000 + 300 surcharges
    assert_eq!(updated.total_rent, 25_300);
    assert!(updated.updated_at.is_some());
}

#[tokio::test]
async fn billing_flow_derives_status_and_keeps_payments_monotonic() {
    let (_store, services) = setup();
    let vehicle = seed_vehicle(&services, "jcb 3dx", "JCB 3DX", 5000).await;
    let customer = seed_customer(&services, "Ramesh Kumar", "9876543210").await;
    let rental = services
        .rentals
        .create(rental_payload(
            &vehicle.id,
            &customer.id,
            date(2025, 1, 1),
            date(2025, 1, 3),
        ))
        .await
        .unwrap();
    services.rentals.complete(&rental.id).await.unwrap();

    let bill = services
        .billing
        .create(CreateBill {
            rental_id: rental.id.clone(),
            payment_mode: Default::default(),
            amount_paid: 5000,
            notes: None,
        })
        .await
        .unwrap();
    assert_eq!(bill.total_amount, 15_300);
    assert_eq!(bill.due_amount, 10_300);
    assert_eq!(bill.status, PaymentStatus::Partial);

    let paid = services.billing.record_payment(&bill.id, 10_300).await.unwrap();
    assert_eq!(paid.amount_paid, 15_300);
    assert_eq!(paid.due_amount, 0);
    assert_eq!(paid.status, PaymentStatus::Paid);

    // Overpayment still resolves to Paid
    let overpaid = services.billing.record_payment(&bill.id, 1000).await.unwrap();
    assert_eq!(overpaid.status, PaymentStatus::Paid);
    assert_eq!(overpaid.due_amount, -1000);

    let rejected = services.billing.record_payment(&bill.id, 0).await;
    assert!(matches!(rejected, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn bill_for_a_missing_rental_is_not_found() {
    let (_store, services) = setup();
    let missing = services
        .billing
        .create(CreateBill {
            rental_id: "RENTAL_GHOST".to_string(),
            payment_mode: Default::default(),
            amount_paid: 0,
            notes: None,
        })
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn dashboard_reflects_store_changes() {
    let (store, services) = setup();
    let rented = seed_vehicle(&services, "jcb 3dx", "JCB 3DX", 5000).await;
    seed_vehicle(&services, "EX 200", "Tata Hitachi EX 200", 7000).await;
    let customer = seed_customer(&services, "Ramesh Kumar", "9876543210").await;
    let rental = services
        .rentals
        .create(rental_payload(
            &rented.id,
            &customer.id,
            date(2025, 1, 1),
            date(2025, 1, 3),
        ))
        .await
        .unwrap();

    // Paid bill created now, counted into today's revenue
    let paid_bill = services
        .billing
        .create(CreateBill {
            rental_id: rental.id.clone(),
            payment_mode: Default::default(),
            amount_paid: 15_300,
            notes: None,
        })
        .await
        .unwrap();
    assert_eq!(paid_bill.status, PaymentStatus::Paid);

    // A second service-side bill in the same minute would collide with the
    // first, so the pending bill is written under its own key.
    let mut pending_bill = paid_bill.clone();
    pending_bill.id = "BILL-20250101-0900".to_string();
    pending_bill.bill_number = pending_bill.id.clone();
    pending_bill.amount_paid = 0;
    pending_bill.due_amount = pending_bill.total_amount;
    pending_bill.status = PaymentStatus::Pending;
    store
        .write(
            Collection::Billing,
            &pending_bill.id,
            serde_json::to_value(&pending_bill).unwrap(),
        )
        .await
        .unwrap();

    let stats = services.stats.dashboard().await.unwrap();
    assert_eq!(stats.total_vehicles, 2);
    assert_eq!(stats.available_vehicles, 1);
    assert_eq!(stats.active_rentals, 1);
    assert_eq!(stats.total_customers, 1);
    assert_eq!(stats.pending_payments, 1);
    assert_eq!(stats.revenue_today, 15_300);

    // Pending count is recomputed after any bill mutation
    services
        .billing
        .record_payment(&pending_bill.id, 300)
        .await
        .unwrap();
    let stats = services.stats.dashboard().await.unwrap();
    assert_eq!(stats.pending_payments, 0);

    let recent = services.stats.recent_activity().await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, rental.id);
}

#[tokio::test]
async fn search_is_case_insensitive_on_model() {
    let (_store, services) = setup();
    seed_vehicle(&services, "jcb 3dx", "JCB 3DX", 5000).await;
    seed_vehicle(&services, "EX 200", "Tata Hitachi EX 200", 7000).await;

    let hits = services.vehicles.search("jcb").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].model, "JCB 3DX");
}

#[tokio::test]
async fn direct_status_edit_can_desync_vehicle_from_rental_state() {
    // Vehicle status is stored, editable state; nothing reconciles it with
    // actual rental state. This pins the known gap rather than endorsing it.
    let (_store, services) = setup();
    let vehicle = seed_vehicle(&services, "jcb 3dx", "JCB 3DX", 5000).await;
    let customer = seed_customer(&services, "Ramesh Kumar", "9876543210").await;
    let rental = services
        .rentals
        .create(rental_payload(
            &vehicle.id,
            &customer.id,
            date(2025, 1, 1),
            date(2025, 1, 3),
        ))
        .await
        .unwrap();

    services
        .vehicles
        .update(
            &vehicle.id,
            UpdateVehicle {
                status: Some(VehicleStatus::Available),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let vehicle = services.vehicles.get(&vehicle.id).await.unwrap();
    let rental = services.rentals.get(&rental.id).await.unwrap();
    assert_eq!(vehicle.status, VehicleStatus::Available);
    assert_eq!(rental.status, RentalStatus::Active);
}

#[tokio::test]
async fn first_sign_in_assigns_the_default_role() {
    let (_store, services) = setup();

    let session = services
        .users
        .sign_in("uid-1", "owner@example.com", "Owner")
        .await
        .unwrap();
    assert_eq!(session.role, Role::Admin);

    // Subsequent sign-ins read the stored role
    services.users.update_role("uid-1", Role::Staff).await.unwrap();
    let session = services
        .users
        .sign_in("uid-1", "owner@example.com", "Owner")
        .await
        .unwrap();
    assert_eq!(session.role, Role::Staff);

    services.users.sign_out(session);
}

mock! {
    Store {}

    #[async_trait]
    impl RecordStore for Store {
        async fn snapshot(&self, collection: Collection) -> Result<Vec<Value>, StoreError>;
        async fn get(&self, collection: Collection, key: &str) -> Result<Option<Value>, StoreError>;
        async fn write(&self, collection: Collection, key: &str, record: Value) -> Result<(), StoreError>;
        async fn update(&self, collection: Collection, key: &str, patch: Value) -> Result<(), StoreError>;
        async fn delete(&self, collection: Collection, key: &str) -> Result<(), StoreError>;
        async fn subscribe(&self, collection: Collection) -> Result<RecordStream, StoreError>;
    }
}

#[tokio::test]
async fn failed_writes_surface_as_store_errors() {
    let mut mock = MockStore::new();
    mock.expect_get().returning(|_, _| Ok(None));
    mock.expect_write().returning(|collection, key, _| {
        Err(StoreError::NotAnObject {
            collection,
            key: key.to_string(),
        })
    });

    let services = Services::new(Arc::new(mock), &AppConfig::default());
    let result = services
        .vehicles
        .create(CreateVehicle {
            vehicle_id: "JCB 3DX".to_string(),
            model: "JCB 3DX".to_string(),
            vehicle_type: "JCB".to_string(),
            condition: "Good".to_string(),
            status: VehicleStatus::Available,
            rent_rate: 5000,
            description: None,
        })
        .await;
    assert!(matches!(result, Err(AppError::Store(_))));
}
