use chrono::NaiveDate;
use multistock_reports::modules::sales::LineItemStatus;
use multistock_reports::LineItem;
use rust_decimal_macros::dec;

pub const CLIENT_ID: &str = "1234567890";

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

/// A month of MercadoLibre sales across categories, payment methods and
/// companies, plus one refund and one cancellation
pub fn sample_items() -> Vec<LineItem> {
    vec![
        LineItem::new("Zapatilla Running", "ZAP-01", 2, dec!(1000), date(2024, 1, 15), "1001")
            .with_category("A")
            .with_payment_method("credit_card")
            .with_company("Ofertas Ya"),
        LineItem::new("Polera Dry Fit", "POL-02", 1, dec!(500), date(2024, 1, 31), "1002")
            .with_category("A")
            .with_payment_method("account_money")
            .with_company("Ofertas Ya"),
        LineItem::new("Botella Térmica", "BOT-03", 3, dec!(200), date(2024, 1, 20), "1003")
            .with_category("B")
            .with_payment_method("credit_card")
            .with_company("Mundo Hogar"),
        LineItem::new("Mochila", "MOC-04", 1, dec!(9990), date(2024, 1, 22), "1004")
            .with_category("B")
            .with_status(LineItemStatus::Refunded),
        LineItem::new("Gorro", "GOR-05", 4, dec!(2990), date(2024, 1, 23), "1005")
            .with_category("A")
            .with_status(LineItemStatus::Cancelled),
    ]
}
