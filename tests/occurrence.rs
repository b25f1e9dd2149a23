use aws_cron::{Expression, Result};
use chrono::{DateTime, Utc};

#[test]
fn next_from_now() -> Result<()> {
    let expression = Expression::parse("0 0 * * ? *")?;
    let now = Utc::now();

    // Midnight occurs every day, so a next occurrence always exists.
    let next = expression.next(&now).unwrap();
    println!("next: {next}");
    assert!(next > now);

    Ok(())
}

#[test]
fn previous_from_now() -> Result<()> {
    let expression = Expression::parse("0 0 * * ? *")?;
    let now = Utc::now();

    let previous = expression.previous(&now).unwrap();
    println!("previous: {previous}");
    assert!(previous < now);

    Ok(())
}

#[test]
fn next_and_previous_are_adjacent() -> Result<()> {
    let expression = Expression::parse("30 */2 ? * SAT,SUN *")?;
    let reference = DateTime::parse_from_rfc3339("2024-05-10T17:20:00Z").unwrap();

    let next = expression.next(&reference).unwrap();
    let previous = expression.previous(&reference).unwrap();

    // No occurrence lies strictly between the two results.
    assert_eq!(expression.previous(&next).unwrap(), previous);
    assert_eq!(expression.next(&previous).unwrap(), next);

    Ok(())
}

#[test]
fn matches_agrees_with_search() -> Result<()> {
    let expression = Expression::parse("0 12 ? * 2#2 *")?;
    let reference = DateTime::parse_from_rfc3339("2024-03-01T00:00:00Z").unwrap();

    let next = expression.next(&reference).unwrap();
    assert_eq!(next.to_rfc3339(), "2024-03-12T12:00:00+00:00");
    assert!(expression.matches(&next));
    assert!(!expression.matches(&reference));

    Ok(())
}

#[test]
fn unsatisfiable_expression_is_not_found() -> Result<()> {
    let expression = Expression::parse("0 0 31 2 ? *")?;
    let reference = Utc::now();

    assert_eq!(expression.next(&reference), None);
    assert_eq!(expression.previous(&reference), None);

    Ok(())
}
