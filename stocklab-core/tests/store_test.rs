//! CSV store behaviour against real files.

use rust_decimal_macros::dec;
use stocklab_core::domain::{Portfolio, Position, StockNo};
use stocklab_core::{CsvStore, StoreError};

fn sample() -> Portfolio {
    let mut portfolio = Portfolio::new();
    portfolio
        .add(Position::new(StockNo(1), 10, dec!(100), dec!(110)).unwrap())
        .unwrap();
    portfolio
        .add(Position::new(StockNo(2), 5, dec!(200), dec!(190)).unwrap())
        .unwrap();
    portfolio
}

#[test]
fn missing_store_is_an_empty_portfolio() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = CsvStore::new(dir.path().join("nope.csv")).load();
    assert!(loaded.portfolio.is_empty());
    assert!(loaded.warning.is_none());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvStore::new(dir.path().join("portfolio.csv"));
    store.save(&sample()).unwrap();

    let loaded = store.load();
    assert!(loaded.warning.is_none());
    assert_eq!(loaded.portfolio, sample());
    assert_eq!(loaded.portfolio.ids(), vec![StockNo(1), StockNo(2)]);
}

#[test]
fn save_overwrites_previous_contents() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvStore::new(dir.path().join("portfolio.csv"));
    store.save(&sample()).unwrap();

    let mut smaller = sample();
    smaller.remove(StockNo(1)).unwrap();
    store.save(&smaller).unwrap();

    let content = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(content, "Stock No,Num Shares,Buy Price,Current Price\n2,5,200,190\n");
}

#[test]
fn save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvStore::new(dir.path().join("nested/deeper/portfolio.csv"));
    store.save(&sample()).unwrap();
    assert_eq!(store.load().portfolio.len(), 2);
}

#[test]
fn corrupt_row_loads_partially_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portfolio.csv");
    std::fs::write(
        &path,
        "Stock No,Num Shares,Buy Price,Current Price\n1,10,100,110\n2,5,abc,190\n",
    )
    .unwrap();

    let loaded = CsvStore::new(&path).load();
    assert_eq!(loaded.portfolio.ids(), vec![StockNo(1)]);
    match loaded.warning {
        Some(StoreError::Unreadable { path: p, reason }) => {
            assert_eq!(p, path);
            assert!(reason.contains("Buy Price"), "{reason}");
        }
        other => panic!("expected Unreadable warning, got {other:?}"),
    }
}

#[test]
fn store_written_by_python_csv_module_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portfolio.csv");
    std::fs::write(
        &path,
        "Stock No,Num Shares,Buy Price,Current Price\r\n1,10,100.0,110.0\r\n2,5,200.0,187.3412\r\n",
    )
    .unwrap();

    let loaded = CsvStore::new(&path).load();
    assert!(loaded.warning.is_none());
    assert_eq!(
        loaded.portfolio.find(StockNo(2)).unwrap().current_price(),
        dec!(187.3412)
    );
}

#[test]
fn unreadable_path_is_a_warning_not_a_panic() {
    let dir = tempfile::tempdir().unwrap();
    // Opening a directory as a file succeeds on some platforms and fails on
    // read on others; both must end as a warning.
    let loaded = CsvStore::new(dir.path()).load();
    assert!(loaded.portfolio.is_empty());
    assert!(matches!(loaded.warning, Some(StoreError::Unreadable { .. })));
}

#[test]
fn worked_example_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvStore::new(dir.path().join("portfolio.csv"));
    store.save(&sample()).unwrap();

    let mut portfolio = store.load().portfolio;
    let totals = portfolio.totals();
    assert_eq!(totals.investment, dec!(2000));
    assert_eq!(totals.current_value, dec!(2050));
    assert_eq!(totals.profit_loss, dec!(50));

    portfolio.update_price(StockNo(2), dec!(195)).unwrap();
    let totals = portfolio.totals();
    assert_eq!(totals.current_value, dec!(2075));
    assert_eq!(totals.profit_loss, dec!(75));
    assert!(portfolio.update_price(StockNo(99), dec!(50)).is_err());
}

#[test]
fn negative_stock_numbers_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portfolio.csv");
    std::fs::write(
        &path,
        "Stock No,Num Shares,Buy Price,Current Price\n-3,2,10,12\n",
    )
    .unwrap();

    let loaded = CsvStore::new(&path).load();
    assert!(loaded.warning.is_none());
    assert_eq!(loaded.portfolio.ids(), vec![StockNo(-3)]);
}

#[test]
fn oversized_holding_stops_the_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portfolio.csv");
    std::fs::write(
        &path,
        "Stock No,Num Shares,Buy Price,Current Price\n\
         1,10,100,110\n\
         2,1000000000,100000000000000000000,100000000000000000000\n",
    )
    .unwrap();

    let loaded = CsvStore::new(&path).load();
    assert_eq!(loaded.portfolio.ids(), vec![StockNo(1)]);
    match loaded.warning {
        Some(StoreError::Unreadable { reason, .. }) => {
            assert!(reason.contains("line 3"), "{reason}");
        }
        other => panic!("expected Unreadable warning, got {other:?}"),
    }
    // Rows before the bad one still report.
    assert!(stocklab_core::Report::new(&loaded.portfolio).render().contains("Stock#1"));
}
