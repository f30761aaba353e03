//! Unit tests for the two-departure lookup.

use super::finder::*;
use crate::jorudan::{FetchError, MockFetcher};
use crate::scan::PageSignature;
use crate::scan::test_pages::{marker, page, route_row};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn results(time: &str) -> String {
    page(&[marker("A"), route_row("Red Line", time), marker("B")])
}

fn no_train() -> String {
    page(&[marker("A"), route_row("Blue Line", "7:10am"), marker("B")])
}

fn finder(fetcher: MockFetcher) -> ScheduleFinder<MockFetcher> {
    ScheduleFinder::new(
        fetcher,
        PageSignature::jorudan(),
        "A",
        "B",
        Regex::new("Red Line").unwrap(),
    )
}

#[tokio::test]
async fn single_departure() {
    let finder = finder(MockFetcher::new().with_page(706, results("7:10am")));
    let query = finder.query(at(7, 6));

    let found = finder.find_next_departure(&query).await.unwrap();
    assert_eq!(found, Some(at(7, 10)));
}

#[tokio::test]
async fn missing_line_is_not_an_error() {
    let finder = finder(MockFetcher::new().with_page(706, no_train()));
    let query = finder.query(at(7, 6));

    let found = finder.find_next_departure(&query).await.unwrap();
    assert_eq!(found, None);
}

#[tokio::test]
async fn second_search_starts_one_minute_after_first() {
    let fetcher = MockFetcher::new()
        .with_page(706, results("7:10am"))
        .with_page(711, results("7:15am"));
    let finder = finder(fetcher.clone());

    let pair = finder.find_next_two_departures(at(7, 6)).await.unwrap();
    assert_eq!(
        pair,
        Some(DeparturePair {
            first: at(7, 10),
            second: at(7, 15),
        })
    );

    let searched: Vec<_> = fetcher.queries().iter().map(|q| q.at).collect();
    assert_eq!(searched, vec![at(7, 6), at(7, 11)]);
}

#[tokio::test]
async fn first_miss_skips_second_search() {
    let fetcher = MockFetcher::new()
        .with_page(706, no_train())
        .with_page(711, results("7:15am"));
    let finder = finder(fetcher.clone());

    let pair = finder.find_next_two_departures(at(7, 6)).await.unwrap();
    assert_eq!(pair, None);
    assert_eq!(fetcher.queries().len(), 1);
}

#[tokio::test]
async fn second_miss_discards_first() {
    let fetcher = MockFetcher::new()
        .with_page(706, results("7:10am"))
        .with_page(711, no_train());
    let finder = finder(fetcher.clone());

    let pair = finder.find_next_two_departures(at(7, 6)).await.unwrap();
    assert_eq!(pair, None);
    assert_eq!(fetcher.queries().len(), 2);
}

#[tokio::test]
async fn fetch_failure_on_first_search() {
    let finder = finder(MockFetcher::new());

    let result = finder.find_next_two_departures(at(7, 6)).await;
    assert!(matches!(result, Err(FetchError::Unavailable(_))));
}

#[tokio::test]
async fn fetch_failure_on_second_search() {
    let finder = finder(MockFetcher::new().with_page(706, results("7:10am")));

    let result = finder.find_next_two_departures(at(7, 6)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn query_carries_stations_and_filter() {
    let finder = finder(MockFetcher::new());
    let query = finder.query(at(7, 6));

    assert_eq!(query.origin, "A");
    assert_eq!(query.destination, "B");
    assert_eq!(query.line_filter.as_str(), "Red Line");
    assert_eq!(query.at, at(7, 6));
}

#[tokio::test]
async fn departures_after_midnight() {
    let fetcher = MockFetcher::new()
        .with_page(2355, results("12:02am"))
        .with_page(3, results("12:12am"));
    let finder = finder(fetcher.clone());

    let pair = finder
        .find_next_two_departures(at(23, 55))
        .await
        .unwrap()
        .unwrap();

    let next_day = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
    assert_eq!(pair.first, next_day.and_hms_opt(0, 2, 0).unwrap());
    assert_eq!(pair.second, next_day.and_hms_opt(0, 12, 0).unwrap());
    assert_eq!(fetcher.queries()[1].at.date(), next_day);
}
