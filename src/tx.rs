// Transformation Module
use polars::prelude::*;
use rayon::prelude::*;

/// One-row description of a simulated cohort.
pub fn summary(table: &DataFrame) -> PolarsResult<DataFrame> {
    table
        .clone()
        .lazy()
        .select([
            len().cast(DataType::Int64).alias("n"),
            col("status").sum().alias("events"),
            (len().cast(DataType::Int64) - col("status").sum()).alias("censored"),
            col("status")
                .cast(DataType::Float64)
                .mean()
                .alias("event_fraction"),
            col("time_of_event")
                .cast(DataType::Float64)
                .mean()
                .alias("mean_time_of_event"),
            col("not_infected_prob")
                .mean()
                .alias("mean_not_infected_prob"),
        ])
        .collect()
}

/// Daily counts of individuals at risk, infected and censored over days
/// 0..=tf.
pub fn life_table(table: &DataFrame, tf: usize) -> PolarsResult<DataFrame> {
    let times = table.column("time_of_event")?.as_materialized_series().i64()?.clone();
    let status = table.column("status")?.as_materialized_series().i64()?.clone();

    let mut events = vec![0i64; tf + 1];
    let mut censored = vec![0i64; tf + 1];
    for (time, flag) in times.into_no_null_iter().zip(status.into_no_null_iter()) {
        let day = usize::try_from(time)
            .ok()
            .filter(|&d| d <= tf)
            .ok_or_else(|| {
                PolarsError::OutOfBounds(format!("time_of_event {time} outside 0..={tf}").into())
            })?;
        if flag == 1 {
            events[day] += 1;
        } else {
            censored[day] += 1;
        }
    }

    let n = table.height() as i64;
    let days = (0..=tf as i64).collect::<Vec<i64>>();

    DataFrame::new(vec![
        Column::new(PlSmallStr::from_str("day"), days),
        Column::new(PlSmallStr::from_str("events"), events),
        Column::new(PlSmallStr::from_str("censored"), censored),
    ])?
    .lazy()
    .with_column((col("events") + col("censored")).alias("exits"))
    .with_columns([
        (lit(n) - col("exits").cum_sum(false) + col("exits")).alias("at_risk"),
        col("events").cum_sum(false).alias("cumulative_events"),
    ])
    .select([
        col("day"),
        col("at_risk"),
        col("events"),
        col("censored"),
        col("cumulative_events"),
    ])
    .collect()
}

/// Wide survival-curve table: one row per individual, `day_0 .. day_TF`
/// columns.
pub fn curves_to_df(survival: &[Vec<f64>]) -> PolarsResult<DataFrame> {
    let series: Vec<Column> = transpose(survival)
        .into_par_iter()
        .enumerate()
        .map(|(day, values)| Column::new(PlSmallStr::from_str(&format!("day_{day}")), values))
        .collect();

    DataFrame::new(series)
}

pub fn transpose(v: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let wid = v.first().map_or(0, |row| row.len());

    (0..wid)
        .into_par_iter()
        .map(|i| v.iter().map(|row| row[i]).collect())
        .collect()
}
