// tests/catalog_tests.rs
mod common;

use common::*;
use nexmart::{inventory_report, search, Money, DEFAULT_LOW_STOCK_THRESHOLD};

#[test]
fn test_search_is_case_insensitive_substring() {
  let products = vec![
    product_named("visor", "Cyber-Visor X1", 79_999, 50),
    product_named("ssd", "Quantum-Drive SSD 2TB", 24_999, 200),
    product_named("kb", "Ergo-Flow Keyboard", 17_999, 75),
  ];

  let hits = search(products.clone(), "  sSd ");
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].name, "Quantum-Drive SSD 2TB");

  let hits = search(products, "o");
  let names: Vec<&str> = hits.iter().map(|p| p.name.as_str()).collect();
  assert_eq!(names, vec!["Cyber-Visor X1", "Ergo-Flow Keyboard"]);
}

#[test]
fn test_blank_search_returns_everything_in_order() {
  let products = vec![product("b", 1), product("a", 2)];
  assert_eq!(search(products.clone(), ""), products);
  assert_eq!(search(products.clone(), "   "), products);
  assert!(search(products, "zzz").is_empty());
}

#[test]
fn test_inventory_report() {
  let products = vec![
    product_named("visor", "Cyber-Visor X1", 79_999, 50),
    product_named("frame", "Aether-Frame", 59_999, 19),
    product_named("brew", "Auto-Brewer", 12_999, 20),
    product_named("gone", "Sold Out", 1_000, 0),
  ];

  let report = inventory_report(&products, DEFAULT_LOW_STOCK_THRESHOLD);

  assert_eq!(report.total_products, 4);
  assert_eq!(report.low_stock_threshold, 20);
  let low: Vec<&str> = report.low_stock_items.iter().map(|p| p.name.as_str()).collect();
  assert_eq!(low, vec!["Aether-Frame", "Sold Out"]);
  assert_eq!(report.low_stock_count(), 2);
  assert_eq!(
    report.total_inventory_value,
    Money::from_cents(79_999 * 50 + 59_999 * 19 + 12_999 * 20)
  );
}

#[test]
fn test_inventory_report_on_empty_catalog() {
  let report = inventory_report(&[], 5);
  assert_eq!(report.total_products, 0);
  assert!(report.low_stock_items.is_empty());
  assert_eq!(report.total_inventory_value.to_string(), "0.00");
}
