use chrono::NaiveDate;
use rust_decimal::Decimal;
use sinkingfund::config::{Config, ConfigManager};
use sinkingfund::services::{CoreError, FixedClock};
use sinkingfund::storage::JsonBillStorage;
use sinkingfund::{Bill, Frequency, Planner, SinkingFundError};
use std::fs;
use tempfile::tempdir;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn config_in(dir: &std::path::Path) -> Config {
    Config {
        horizon_days: 60,
        bills_path: Some(dir.join("bills.json")),
        ..Config::default()
    }
}

#[test]
fn planner_starts_empty_without_a_bills_file() {
    let dir = tempdir().expect("tempdir");

    let planner = Planner::load(config_in(dir.path()), JsonBillStorage::new()).expect("load");

    assert!(planner.book().is_empty());
    assert!(planner
        .window(ymd(2025, 1, 1), ymd(2025, 12, 31))
        .expect("window")
        .is_empty());
}

#[test]
fn planner_saves_and_reloads_bills() {
    let dir = tempdir().expect("tempdir");
    let mut planner = Planner::new(config_in(dir.path()), JsonBillStorage::new());
    planner
        .add_bill(
            Bill::recurring("rent", Decimal::new(95000, 2), ymd(2025, 1, 31), Frequency::Monthly)
                .service("Landlord")
                .build()
                .unwrap(),
        )
        .expect("add rent");
    planner
        .add_bill(Bill::one_off("car-tax", Decimal::new(18000, 2), ymd(2025, 3, 15)).unwrap())
        .expect("add car tax");
    planner.save().expect("save");

    let reloaded = Planner::load(config_in(dir.path()), JsonBillStorage::new()).expect("reload");

    assert_eq!(reloaded.book().len(), 2);
    let upcoming = reloaded
        .upcoming(&FixedClock::on(ymd(2025, 2, 1)))
        .expect("upcoming");
    let rows: Vec<(NaiveDate, &str)> = upcoming
        .iter()
        .map(|i| (i.due_date(), i.bill_id()))
        .collect();
    assert_eq!(
        rows,
        vec![
            (ymd(2025, 2, 28), "rent"),
            (ymd(2025, 3, 15), "car-tax"),
            (ymd(2025, 3, 31), "rent"),
        ]
    );
    assert_eq!(
        reloaded
            .total_due(ymd(2025, 2, 1), ymd(2025, 4, 2))
            .expect("total"),
        Decimal::new(208000, 2)
    );
}

#[test]
fn planner_opens_through_the_config_manager() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    manager.save(&config_in(dir.path())).expect("save config");
    fs::write(
        dir.path().join("bills.json"),
        r#"[{"bill_id": "water", "amount_due": "45.50", "start_date": "2025-01-15",
             "frequency": "quarterly"}]"#,
    )
    .expect("write bills");

    let planner = Planner::open(&manager).expect("open");

    assert_eq!(planner.config().horizon_days, 60);
    let water = planner.book().require("water").expect("water");
    assert_eq!(water.interval(), 3);
}

#[test]
fn planner_surfaces_duplicate_ids_in_the_bills_file() {
    let dir = tempdir().expect("tempdir");
    fs::write(
        dir.path().join("bills.json"),
        r#"[{"bill_id": "a", "amount_due": "1.00", "due_date": "2025-01-01"},
            {"bill_id": "a", "amount_due": "2.00", "due_date": "2025-01-02"}]"#,
    )
    .expect("write bills");

    let err = Planner::load(config_in(dir.path()), JsonBillStorage::new())
        .err()
        .expect("duplicate ids fail");

    assert!(matches!(err, CoreError::DuplicateBill(ref id) if id == "a"));
}

#[test]
fn planner_open_reports_config_errors() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    fs::write(manager.config_path(), "not json").expect("write config");

    let err = Planner::open(&manager).err().expect("bad config fails");

    assert!(matches!(err, SinkingFundError::Config(_)));
}

#[test]
fn planner_edits_and_batch_deletes_persist() {
    let dir = tempdir().expect("tempdir");
    let mut planner = Planner::new(config_in(dir.path()), JsonBillStorage::new());
    for (id, day) in [("gym", 5), ("phone", 12), ("music", 20)] {
        planner
            .add_bill(
                Bill::recurring(id, Decimal::new(1000, 2), ymd(2025, 1, day), Frequency::Monthly)
                    .build()
                    .unwrap(),
            )
            .expect("add");
    }

    let edited = Bill::recurring("phone", Decimal::new(2500, 2), ymd(2025, 1, 12), Frequency::Monthly)
        .service("Carrier")
        .build()
        .unwrap();
    let previous = planner.update_bill(edited).expect("update");
    assert_eq!(previous.amount_due(), Decimal::new(1000, 2));
    assert!(matches!(
        planner.remove_bills(&["gym", "missing"]),
        Err(CoreError::BillNotFound(ref id)) if id == "missing"
    ));
    planner.remove_bills(&["gym", "music"]).expect("remove");
    planner.save().expect("save");

    let reloaded = Planner::load(config_in(dir.path()), JsonBillStorage::new()).expect("reload");

    assert_eq!(reloaded.book().len(), 1);
    let phone = reloaded.book().require("phone").expect("phone");
    assert_eq!(phone.service(), "Carrier");
    assert_eq!(phone.amount_due(), Decimal::new(2500, 2));
}
