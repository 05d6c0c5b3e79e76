// End-to-end audit flow as the CLI drives it: read a CSV from disk, run the
// engine, write the three tables, render the report.

use std::fs;

use freightlens_audit::config::AuditConfig;
use freightlens_audit::engine::{distinct_charge_types, load_charge_lines, run};
use freightlens_audit::output::{write_carrier_stats, write_shipments, write_worst};
use freightlens_audit::report;
use freightlens_audit::AuditError;

const INVOICE: &str = "\
Tracking Number,Charge Type,Charge,Carrier Name,Zones
T1,Base Rate,100,UPS,2
T1,Fuel Surcharge,15,UPS,2
T1,GST,9,UPS,2
T2,Base Rate,90,FedEx,5
T2,Weekend Delivery,20,FedEx,5
T3,Base Rate,80,FedEx,4
T4,Fuel Surcharge,5,UPS,2
";

#[test]
fn audit_writes_all_three_tables() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("invoices.csv");
    fs::write(&input, INVOICE).unwrap();

    let config = AuditConfig::default();
    let csv_data = fs::read_to_string(&input).unwrap();
    let lines = load_charge_lines(&csv_data, &config.source).unwrap();
    let result = run(&config, &lines).unwrap();

    let shipments_path = dir.path().join(&config.output.shipments_file);
    let carriers_path = dir.path().join(&config.output.carriers_file);
    let worst_path = dir.path().join(&config.output.worst_file);

    write_shipments(fs::File::create(&shipments_path).unwrap(), &result.shipments).unwrap();
    write_carrier_stats(fs::File::create(&carriers_path).unwrap(), &result.carriers).unwrap();
    write_worst(fs::File::create(&worst_path).unwrap(), &result.worst.shipments).unwrap();

    assert_eq!(fs::read_to_string(&shipments_path).unwrap().lines().count(), 5);
    assert_eq!(fs::read_to_string(&carriers_path).unwrap().lines().count(), 3);
    // 4 shipments -> k = 1
    assert_eq!(fs::read_to_string(&worst_path).unwrap().lines().count(), 2);

    let report = report::render(&result);
    assert!(report.contains("Loaded 7 charge lines."));
    assert!(report.contains("EXECUTIVE SUMMARY"));
}

#[test]
fn json_output_serializes_the_full_result() {
    let config = AuditConfig::default();
    let lines = load_charge_lines(INVOICE, &config.source).unwrap();
    let result = run(&config, &lines).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&serde_json::to_string_pretty(&result).unwrap()).unwrap();

    assert_eq!(json["counts"]["rows"], 7);
    assert_eq!(json["shipments"][0]["shipment_id"], "T1");
    assert_eq!(json["shipments"][0]["cost_normalized"], 115.0);
    assert_eq!(json["shipments"][0]["surcharge_ratio"], 0.15);
    // T4 has no core freight: its ratio is undefined and serializes as null.
    assert!(json["shipments"][3]["surcharge_ratio"].is_null());
    // T1 alone holds 115 of 290 normalized spend, above the 30% threshold.
    assert_eq!(json["narrative"]["risk"], "heavy_tail");
}

#[test]
fn charge_types_file_matches_source_order() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("charge_types.txt");

    let types = distinct_charge_types(INVOICE, &AuditConfig::default().source).unwrap();
    let mut text = types.join("\n");
    text.push('\n');
    fs::write(&out_path, text).unwrap();

    let written = fs::read_to_string(&out_path).unwrap();
    assert_eq!(
        written.lines().collect::<Vec<_>>(),
        vec!["Base Rate", "Fuel Surcharge", "GST", "Weekend Delivery"]
    );
}

#[test]
fn missing_identifier_column_reports_observed_headers() {
    let bad = "Waybill,Charge Type,Charge,Carrier Name,Zones\nX,Base Rate,1,UPS,2\n";
    let err = load_charge_lines(bad, &AuditConfig::default().source).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Tracking Number"));
    assert!(message.contains("Waybill"));
    assert!(matches!(err, AuditError::MissingColumn { .. }));
}
