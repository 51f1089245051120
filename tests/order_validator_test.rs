// ==========================================
// Order normalisation + validation tests
// ==========================================


use serde_json::json;
use test_helpers::RawRowBuilder;
use zuidplas_logistics::domain::types::LifecycleState;
use zuidplas_logistics::importer::{
    rows_from_json, FieldMapper, FieldMapperImpl, OrderValidator, OrderValidatorImpl,
};
use zuidplas_logistics::RejectionReason;

fn validate(rows: Vec<serde_json::Value>) -> zuidplas_logistics::ValidationReport {
    let mapped = FieldMapperImpl::new().map_rows(&rows);
    OrderValidatorImpl::default().validate(mapped)
}

#[test]
fn test_every_reason_is_counted() {
    let report = validate(vec![
        RawRowBuilder::new("A").assembly(0.0).build(),
        RawRowBuilder::new("B").without_bundles().build(),
        RawRowBuilder::new("C").without_location().build(),
        RawRowBuilder::new("D").without_customer_id().build(),
        RawRowBuilder::new("E").state("Geannuleerd").build(),
        RawRowBuilder::new("F").customer("C-7", "Demo Florist").build(),
        RawRowBuilder::new("G").contract().build(),
        RawRowBuilder::new("H").build(),
    ]);

    for reason in RejectionReason::ALL {
        assert_eq!(report.count(reason), 1, "reason {}", reason);
    }
    assert_eq!(report.valid_count(), 1);
    assert_eq!(report.rejected_count(), 7);
}

#[test]
fn test_first_failing_check_wins() {
    // missing location and cancelled: the location check comes first
    let report = validate(vec![RawRowBuilder::new("A").without_location().state("cancelled").build()]);
    assert_eq!(report.rejected[0].reason, RejectionReason::NoLocation);

    // test customer with a contract order: test data comes first
    let report = validate(vec![RawRowBuilder::new("B").customer("C-1", "TEST klant").contract().build()]);
    assert_eq!(report.rejected[0].reason, RejectionReason::TestData);
}

#[test]
fn test_zero_ids_count_as_missing() {
    let report = validate(vec![
        RawRowBuilder::new("A").location(0).build(),
        RawRowBuilder::new("B").customer("0", "Hermes Bloemen").build(),
        RawRowBuilder::new("C").build(),
    ]);

    assert_eq!(report.count(RejectionReason::NoLocation), 1);
    assert_eq!(report.count(RejectionReason::NoCustomer), 1);
    assert_eq!(report.valid_count(), 1);
}

#[test]
fn test_deleted_orders_are_cancelled() {
    let rows = vec![RawRowBuilder::new("A").deleted().build()];
    let mapped = FieldMapperImpl::new().map_rows(&rows);
    assert_eq!(mapped[0].lifecycle_state, LifecycleState::Deleted);

    let report = OrderValidatorImpl::default().validate(mapped);
    assert_eq!(report.count(RejectionReason::Cancelled), 1);
}

#[test]
fn test_stems_pair_counts_as_bundle_source() {
    let report = validate(vec![RawRowBuilder::new("A").without_bundles().stems(10.0, 80.0).build()]);
    assert_eq!(report.valid_count(), 1);
}

#[test]
fn test_duplicates_are_dropped_and_counted_apart() {
    let report = validate(vec![
        RawRowBuilder::new("A").row_id("R-1").build(),
        RawRowBuilder::new("A").row_id("R-1").build(),
        RawRowBuilder::new("A").row_id("R-1").assembly(11.0).build(),
        RawRowBuilder::new("A").row_id("R-2").build(),
    ]);

    assert_eq!(report.valid_count(), 3);
    assert_eq!(report.duplicate_count, 1);
    assert_eq!(report.rejected_count(), 0);
}

#[test]
fn test_nested_and_aliased_fields() {
    let rows = rows_from_json(
        &json!({
            "data": [{
                "orderrow_id": 5001,
                "order": {
                    "id": 77,
                    "customer_id": 12,
                    "delivery_location_id": "34",
                    "state": "open"
                },
                "customerName": "Kuipers",
                "assemblyAmount": "12,5",
                "nr_base_product": 50,
                "properties": [{"code": "901", "pivot": {"value": "575"}}]
            }]
        })
        .to_string(),
    )
    .unwrap();

    let mapped = FieldMapperImpl::new().map_rows(&rows);
    let row = &mapped[0];
    assert_eq!(row.order_id.as_deref(), Some("77"));
    assert_eq!(row.row_id.as_deref(), Some("5001"));
    assert_eq!(row.customer_id.as_deref(), Some("12"));
    assert_eq!(row.delivery_location_id, Some(34));
    assert_eq!(row.assembly_amount, 12.5);
    assert_eq!(row.fust_type_code.as_deref(), Some("575"));
    assert_eq!(row.row_number, 1);

    let report = OrderValidatorImpl::default().validate(mapped);
    assert_eq!(report.valid_count(), 1);
}

#[test]
fn test_empty_and_all_rejected_are_distinct() {
    let empty = validate(Vec::new());
    assert!(empty.is_empty_input());
    assert!(!empty.all_rejected());

    let rejected = validate(vec![RawRowBuilder::new("A").assembly(-1.0).build()]);
    assert!(!rejected.is_empty_input());
    assert!(rejected.all_rejected());
}

#[test]
fn test_custom_test_patterns() {
    let rows = vec![RawRowBuilder::new("A").customer("C-1", "Proefklant").build()];
    let mapped = FieldMapperImpl::new().map_rows(&rows);
    let report = OrderValidatorImpl::new(vec!["proef".to_string()]).validate(mapped);
    assert_eq!(report.count(RejectionReason::TestData), 1);
}
