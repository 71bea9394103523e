use std::path::PathBuf;

use clap::Parser;
use polars::prelude::*;
use vax_sim::cli::{Cli, run};
use vax_sim::{SimulationParameters, engine, pq};

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("vax-sim-pipeline-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

fn arg(path: &PathBuf) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn csv_dataset_matches_engine() {
    let output = scratch("survival.csv");
    let life = scratch("life.csv");
    let cli = Cli::try_parse_from([
        "vax-sim".to_string(),
        "--n".into(),
        "40".into(),
        "--tf".into(),
        "60".into(),
        "--lambda0".into(),
        "0.02".into(),
        "--beta".into(),
        "1.0".into(),
        "--te".into(),
        "30".into(),
        "--sigma-e".into(),
        "10".into(),
        "--output".into(),
        arg(&output),
        "--life-table".into(),
        arg(&life),
        "--summary".into(),
    ])
    .unwrap();
    run(&cli).unwrap();

    let written = pq::read_csv(&output).unwrap();
    assert_eq!(written.shape(), (40, 5));

    let params = SimulationParameters {
        n: 40,
        tf: 60,
        lambda0: 0.02,
        beta: 1.0,
        te: 30.0,
        sigma_e: 10.0,
        ..Default::default()
    };
    let cohort = engine(&params).unwrap();
    let expected = cohort.to_dataframe().unwrap();

    let times = written
        .column("time_of_event")
        .unwrap()
        .as_materialized_series()
        .i64()
        .unwrap()
        .clone();
    let status = written
        .column("status")
        .unwrap()
        .as_materialized_series()
        .i64()
        .unwrap()
        .clone();
    assert_eq!(
        times.into_no_null_iter().collect::<Vec<i64>>(),
        cohort.event_time().iter().map(|&t| t as i64).collect::<Vec<i64>>()
    );
    assert_eq!(
        status.into_no_null_iter().collect::<Vec<i64>>(),
        cohort.status().iter().map(|&s| s as i64).collect::<Vec<i64>>()
    );
    assert_eq!(expected.get_column_names(), written.get_column_names());

    let table = pq::read_csv(&life).unwrap();
    assert_eq!(table.height(), 61);
    let last_cumulative: i64 = table
        .column("cumulative_events")
        .unwrap()
        .get(60)
        .unwrap()
        .try_extract()
        .unwrap();
    assert_eq!(last_cumulative, cohort.n_events() as i64);
}

#[test]
fn parquet_dataset_round_trips() {
    let output = scratch("survival.parquet");
    let curves = scratch("curves.parquet");
    let cli = Cli::try_parse_from([
        "vax-sim".to_string(),
        "--n".into(),
        "25".into(),
        "--tf".into(),
        "30".into(),
        "--output".into(),
        arg(&output),
        "--curves".into(),
        arg(&curves),
    ])
    .unwrap();
    run(&cli).unwrap();

    let params = SimulationParameters { n: 25, tf: 30, ..Default::default() };
    let expected = engine(&params).unwrap().to_dataframe().unwrap();
    assert!(pq::read(&output).unwrap().equals(&expected));

    let wide = pq::read(&curves).unwrap();
    assert_eq!(wide.shape(), (25, 31));
}

#[test]
fn invalid_parameters_write_nothing() {
    let output = scratch("never.csv");
    let cli = Cli::try_parse_from([
        "vax-sim".to_string(),
        "--sigma-e".into(),
        "0".into(),
        "--output".into(),
        arg(&output),
    ])
    .unwrap();

    assert!(run(&cli).is_err());
    assert!(!output.exists());
}
