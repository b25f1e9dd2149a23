use aws_cron::{Expression, Result};
use chrono::{DateTime, FixedOffset, Utc};

fn collect<I: Iterator<Item = DateTime<FixedOffset>>>(iter: I, n: usize) -> Vec<String> {
    iter.take(n).map(|t| t.to_rfc3339()).collect()
}

#[test]
fn iterator_from_now() -> Result<()> {
    let expression = Expression::parse("0 0 * * ? *")?;
    let now = Utc::now();

    // Get the next 10 timestamps starting from now
    expression.iter(&now).take(10).for_each(|t| println!("next: {t}"));

    Ok(())
}

#[test]
fn forward_series_every_23_minutes() -> Result<()> {
    let expression = Expression::parse("0/23 * * * ? *")?;
    let reference = DateTime::parse_from_rfc3339("2021-08-07T08:30:57Z").unwrap();

    assert_eq!(
        collect(expression.iter(&reference), 10),
        [
            "2021-08-07T08:46:00+00:00",
            "2021-08-07T09:00:00+00:00",
            "2021-08-07T09:23:00+00:00",
            "2021-08-07T09:46:00+00:00",
            "2021-08-07T10:00:00+00:00",
            "2021-08-07T10:23:00+00:00",
            "2021-08-07T10:46:00+00:00",
            "2021-08-07T11:00:00+00:00",
            "2021-08-07T11:23:00+00:00",
            "2021-08-07T11:46:00+00:00",
        ]
    );

    Ok(())
}

#[test]
fn backward_series_every_23_minutes() -> Result<()> {
    let expression = Expression::parse("0/23 * * * ? *")?;
    let reference = DateTime::parse_from_rfc3339("2021-08-07T11:50:57Z").unwrap();

    assert_eq!(
        collect(expression.iter_previous(&reference), 10),
        [
            "2021-08-07T11:46:00+00:00",
            "2021-08-07T11:23:00+00:00",
            "2021-08-07T11:00:00+00:00",
            "2021-08-07T10:46:00+00:00",
            "2021-08-07T10:23:00+00:00",
            "2021-08-07T10:00:00+00:00",
            "2021-08-07T09:46:00+00:00",
            "2021-08-07T09:23:00+00:00",
            "2021-08-07T09:00:00+00:00",
            "2021-08-07T08:46:00+00:00",
        ]
    );

    Ok(())
}

#[test]
fn series_between_two_instants() -> Result<()> {
    let expression = Expression::parse("0/23 * * * ? *")?;
    let from = DateTime::parse_from_rfc3339("2021-08-07T08:30:57Z").unwrap();
    let to = DateTime::parse_from_rfc3339("2021-08-07T11:30:57Z").unwrap();

    let series: Vec<String> = expression
        .iter(&from)
        .take_while(|t| *t <= to)
        .map(|t| t.to_rfc3339())
        .collect();

    assert_eq!(
        series,
        [
            "2021-08-07T08:46:00+00:00",
            "2021-08-07T09:00:00+00:00",
            "2021-08-07T09:23:00+00:00",
            "2021-08-07T09:46:00+00:00",
            "2021-08-07T10:00:00+00:00",
            "2021-08-07T10:23:00+00:00",
            "2021-08-07T10:46:00+00:00",
            "2021-08-07T11:00:00+00:00",
            "2021-08-07T11:23:00+00:00",
        ]
    );

    Ok(())
}

#[test]
fn iterator_exhausts_with_the_year_field() -> Result<()> {
    let expression = Expression::parse("0 12 ? 1 MON 2024")?;
    let reference = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap();
    let mut iter = expression.iter(&reference);

    assert_eq!(iter.next().unwrap().to_rfc3339(), "2024-01-01T12:00:00+00:00");
    assert_eq!(iter.next().unwrap().to_rfc3339(), "2024-01-08T12:00:00+00:00");
    assert_eq!(iter.next().unwrap().to_rfc3339(), "2024-01-15T12:00:00+00:00");
    assert_eq!(iter.next().unwrap().to_rfc3339(), "2024-01-22T12:00:00+00:00");
    assert_eq!(iter.next().unwrap().to_rfc3339(), "2024-01-29T12:00:00+00:00");
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);

    Ok(())
}

#[test]
fn backward_iterator_exhausts_at_the_horizon() -> Result<()> {
    let expression = Expression::parse("0 0 1 1 ? 1970-1972")?;
    let reference = DateTime::parse_from_rfc3339("1980-06-15T00:00:00Z").unwrap();
    let mut iter = expression.iter_previous(&reference);

    assert_eq!(iter.next().unwrap().to_rfc3339(), "1972-01-01T00:00:00+00:00");
    assert_eq!(iter.next().unwrap().to_rfc3339(), "1971-01-01T00:00:00+00:00");
    assert_eq!(iter.next().unwrap().to_rfc3339(), "1970-01-01T00:00:00+00:00");
    assert_eq!(iter.next(), None);

    Ok(())
}
