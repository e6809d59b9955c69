//! Exported rows keep the order of the groups they were built from

use multistock_reports::core::Currency;
use multistock_reports::modules::exports::models::CellValue;
use multistock_reports::modules::exports::ColumnSpec;
use multistock_reports::modules::reports::models::AggregateGroup;
use multistock_reports::{LineItem, ReportExporter};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn group(index: usize) -> AggregateGroup {
    let mut group = AggregateGroup::new(format!("group-{:03}", index));
    group.push(LineItem::new(
        "Producto",
        "SKU",
        (index % 7) as u32 + 1,
        Decimal::from(index as i64 * 10 + 5),
        None,
        "1",
    ));
    group
}

fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::key("Key"),
        ColumnSpec::quantity("Units"),
        ColumnSpec::amount("Total"),
    ]
}

fn exporter() -> ReportExporter {
    ReportExporter::new(Currency::CLP, 7, None)
}

proptest! {
    /// Whatever the order of the groups, the workbook rows follow it
    #[test]
    fn prop_workbook_preserves_order(
        order in Just((0..40usize).collect::<Vec<_>>()).prop_shuffle()
    ) {
        let groups: Vec<AggregateGroup> = order.iter().map(|i| group(*i)).collect();

        let workbook = exporter().to_workbook(&groups, &columns());

        let keys: Vec<CellValue> = workbook.sheets[0].rows.iter().map(|r| r[0].clone()).collect();
        let expected: Vec<CellValue> = groups.iter().map(|g| CellValue::Text(g.key.clone())).collect();
        prop_assert_eq!(keys, expected);
    }

    /// Same for the paginated document, across page breaks
    #[test]
    fn prop_document_preserves_order(
        order in Just((0..40usize).collect::<Vec<_>>()).prop_shuffle()
    ) {
        let groups: Vec<AggregateGroup> = order.iter().map(|i| group(*i)).collect();

        let document = exporter().to_document(&groups, &columns(), "Report");

        let keys: Vec<String> = document.rows().map(|r| r[0].clone()).collect();
        let expected: Vec<String> = groups.iter().map(|g| g.key.clone()).collect();
        prop_assert_eq!(keys, expected);
        prop_assert_eq!(document.pages.len(), 6);
    }
}

/// An empty export is header-only, not an error
#[test]
fn test_empty_export_is_header_only() {
    let workbook = exporter().to_workbook(&[], &columns());
    assert_eq!(workbook.sheets.len(), 1);
    assert_eq!(workbook.sheets[0].columns.len(), 3);
    assert!(workbook.sheets[0].rows.is_empty());

    let document = exporter().to_document(&[], &columns(), "Report");
    assert_eq!(document.headers, vec!["Key", "Units", "Total"]);
    assert_eq!(document.row_count(), 0);
}
