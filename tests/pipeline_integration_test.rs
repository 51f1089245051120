// ==========================================
// Pipeline integration tests
// ==========================================
// raw ERP rows -> report, through the public API only
// ==========================================


use test_helpers::{expanded_batch, one_row_per_order, pipeline, RawRowBuilder};
use zuidplas_logistics::domain::types::CartType;
use zuidplas_logistics::export;
use zuidplas_logistics::{PipelineOptions, PipelineWarning, RejectionReason};

#[test]
fn test_missing_locations_are_counted_and_the_rest_proceeds() {
    let rows = one_row_per_order(396, 42);
    let report = pipeline().run(&rows, PipelineOptions::default());

    assert_eq!(report.validation.total, 396);
    assert_eq!(report.validation.count(RejectionReason::NoLocation), 42);
    assert_eq!(report.validation.rejected_count(), 42);
    assert_eq!(report.validation.valid_count(), 354);
    assert_eq!(report.validation.duplicate_count, 0);

    assert_eq!(report.diagnostics.statistics.rows, 354);
    assert_eq!(report.diagnostics.statistics.unique_orders, 354);
    assert_eq!(report.diagnostics.rejections.by_reason[&RejectionReason::NoLocation], 42);
    assert!(report.cart_result.total > 0);
}

#[test]
fn test_expanded_batch_is_idempotent() {
    let rows = expanded_batch(396, 18_861);
    let pipeline = pipeline();

    let first = pipeline.run(&rows, PipelineOptions::default());
    let second = pipeline.run(&rows, PipelineOptions::default());

    assert_eq!(first.validation.valid_count(), 18_861);
    assert_eq!(first.diagnostics.statistics.unique_orders, 396);
    assert_eq!(first.cart_result, second.cart_result);

    let first_ids: Vec<(&str, u32)> = first.options.iter().map(|o| (o.id.as_str(), o.score)).collect();
    let second_ids: Vec<(&str, u32)> = second.options.iter().map(|o| (o.id.as_str(), o.score)).collect();
    assert_eq!(first_ids, second_ids);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_fust_types_are_rounded_independently() {
    let rows = vec![
        RawRowBuilder::new("O-1")
            .row_id("R-1")
            .customer("C-1", "Fleura Metz")
            .location(32)
            .assembly(500.0)
            .build(),
        RawRowBuilder::new("O-1")
            .row_id("R-2")
            .customer("C-1", "Fleura Metz")
            .location(32)
            .fust_type("575")
            .assembly(250.0)
            .build(),
    ];
    let report = pipeline().run(&rows, PipelineOptions::default());

    // ceil(100 / 72) + ceil(50 / 32)
    assert_eq!(report.cart_result.by_route["aalsmeer"], 4);
    assert_eq!(report.cart_result.total, 4);
    assert_eq!(report.cart_result.trucks, 1);
}

#[test]
fn test_stems_ratio_beats_a_hint_of_one() {
    let rows = vec![RawRowBuilder::new("O-1")
        .stems(10.0, 100.0)
        .bundles_per_fust(1.0)
        .assembly(720.0)
        .build()];
    let report = pipeline().run(&rows, PipelineOptions::default());

    // 720 / 10 = 72 fust -> exactly one cart of 612
    let route = report.cart_result.route("rijnsburg").unwrap();
    assert_eq!(route.fust_breakdown[0].total_fust, 72.0);
    assert_eq!(route.carts, 1);
}

#[test]
fn test_zero_assembly_is_rejected_first() {
    let rows = vec![RawRowBuilder::new("O-1")
        .assembly(0.0)
        .without_location()
        .without_bundles()
        .state("cancelled")
        .build()];
    let report = pipeline().run(&rows, PipelineOptions::default());

    assert_eq!(report.validation.count(RejectionReason::NoAssembly), 1);
    assert!(report.validation.all_rejected());
    assert_eq!(report.cart_result.total, 0);
}

#[test]
fn test_unmapped_location_falls_back_with_warning() {
    let rows = vec![RawRowBuilder::new("O-1").location(99).build()];
    let report = pipeline().run(&rows, PipelineOptions::default());

    assert_eq!(report.cart_result.by_route["rijnsburg"], 1);
    assert!(report.warnings.contains(&PipelineWarning::UnmappedLocation {
        location_id: Some(99),
        rows: 1,
        fallback_route: "rijnsburg".to_string(),
    }));
    assert_eq!(report.diagnostics.warning_tally["unmapped_location"], 1);
}

#[test]
fn test_unknown_fust_type_uses_default_capacity() {
    let rows = vec![RawRowBuilder::new("O-1").fust_type("999").assembly(400.0).build()];
    let report = pipeline().run(&rows, PipelineOptions::default());

    // 80 fust against the default 72
    assert_eq!(report.cart_result.total, 2);
    assert!(report.warnings.iter().any(|w| w.kind() == "unknown_fust_type"));
}

#[test]
fn test_missing_fust_type_defaults_to_612() {
    let rows = vec![RawRowBuilder::new("O-1").without_fust_type().build()];
    let report = pipeline().run(&rows, PipelineOptions::default());

    let route = report.cart_result.route("rijnsburg").unwrap();
    assert_eq!(route.fust_breakdown[0].fust_type, "612");
    assert!(report.warnings.iter().any(|w| w.kind() == "missing_fust_type"));
}

#[test]
fn test_late_delivery_time_goes_to_evening_route() {
    let rows = vec![
        RawRowBuilder::new("O-1")
            .customer("C-1", "Fleura Metz")
            .location(32)
            .delivery_time("16:00")
            .build(),
        RawRowBuilder::new("O-2")
            .customer("C-1", "Fleura Metz")
            .location(32)
            .delivery_time("09:30")
            .build(),
    ];
    let report = pipeline().run(&rows, PipelineOptions::default());

    assert_eq!(report.cart_result.by_route["aalsmeer_evening"], 1);
    assert_eq!(report.cart_result.by_route["aalsmeer"], 1);
}

#[test]
fn test_danish_customer_uses_danish_carts() {
    let rows = vec![RawRowBuilder::new("O-1")
        .customer("C-9", "Superflora")
        .location(34)
        .assembly(680.0)
        .build()];
    let report = pipeline().run(&rows, PipelineOptions::default());

    // 136 fust against the Danish 612 capacity of 68
    let route = report.cart_result.route("naaldwijk").unwrap();
    assert_eq!(route.danish_carts, 2);
    assert_eq!(route.standard_carts, 0);
    assert_eq!(route.fust_breakdown[0].cart_type, CartType::Danish);
}

#[test]
fn test_overflowing_route_recommends_external_carrier() {
    let rows = vec![RawRowBuilder::new("O-1")
        .customer("C-1", "Fleura Metz")
        .location(32)
        .assembly(7200.0)
        .build()];
    let report = pipeline().run(&rows, PipelineOptions::default());

    assert_eq!(report.cart_result.by_route["aalsmeer"], 20);
    let best = report.best_option().unwrap();
    assert_eq!(best.id, "overflow_carrier_aalsmeer");
    assert!(best.recommended);
    assert!(report.options.iter().any(|o| o.id == "overflow_truck_aalsmeer"));
    assert!(report.options.iter().all(|o| o.id != "neighbor"));
}

#[test]
fn test_huge_amounts_saturate_instead_of_overflowing() {
    let rows = vec![
        RawRowBuilder::new("O-1").row_id("R-1").assembly(1e13).build(),
        RawRowBuilder::new("O-1")
            .row_id("R-2")
            .fust_type("575")
            .assembly(1e13)
            .build(),
    ];
    let report = pipeline().run(&rows, PipelineOptions::default());

    assert_eq!(report.cart_result.by_route["rijnsburg"], u32::MAX);
    assert_eq!(report.cart_result.total, u32::MAX);
    let standard = report.options.iter().find(|o| o.id == "default").unwrap();
    assert!(!standard.feasibility.fits);
    let truck = report
        .options
        .iter()
        .find(|o| o.id == "overflow_truck_rijnsburg")
        .unwrap();
    assert!(truck.feasibility.fits);
}

#[test]
fn test_skip_allocation_keeps_cart_result() {
    let rows = one_row_per_order(20, 0);
    let full = pipeline().run(&rows, PipelineOptions::default());
    let carts_only = pipeline().run(&rows, PipelineOptions { skip_allocation: true });

    assert!(carts_only.options.is_empty());
    assert_eq!(full.cart_result, carts_only.cart_result);
}

#[test]
fn test_breakdown_and_rejections_export() {
    let rows = vec![
        RawRowBuilder::new("O-1").build(),
        RawRowBuilder::new("O-2").without_customer_id().build(),
    ];
    let report = pipeline().run(&rows, PipelineOptions::default());

    let breakdown = export::breakdown_csv(&report.cart_result).unwrap();
    assert!(breakdown.starts_with("route,cart_type,fust_type,total_fust,capacity,carts\n"));
    assert!(breakdown.contains("rijnsburg,standard,612,2.0,72,1"));

    let rejections = export::rejections_csv(&report.validation).unwrap();
    assert!(rejections.lines().nth(1).unwrap().ends_with(",no_customer"));
}

#[test]
fn test_report_json_shape() {
    let rows = one_row_per_order(10, 0);
    let report = pipeline().run(&rows, PipelineOptions::default());
    let json = serde_json::to_value(&report).unwrap();

    assert!(json["cartResult"]["byRoute"].is_object());
    assert!(json["cartResult"]["breakdown"][0]["fustBreakdown"].is_array());
    assert!(json["options"][0]["feasibility"]["fits"].is_boolean());
    assert!(json.get("validation").is_none());
}
