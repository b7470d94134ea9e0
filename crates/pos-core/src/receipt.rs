//! Plain-text proof of a committed sale.
use crate::cart::SaleItem;
use crate::model::{Operator, RecordId};
use crate::warranty::WarrantyPeriod;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::fmt::Display;

const WIDTH: usize = 42;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub product_name: String,
    pub unique_id: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total: f64,
    pub warranty_end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub receipt_number: String,
    pub store_name: String,
    pub issued_at: DateTime<Utc>,
    pub operator: Operator,
    pub lines: Vec<ReceiptLine>,
    pub grand_total: f64,
    pub currency: String,
    pub warranty_period: WarrantyPeriod,
}

/// `"{date}-{first warranty record}"`, e.g. `20250115-0007`.
pub fn receipt_number(date_of_sale: NaiveDate, first_record: Option<RecordId>) -> String {
    let seq = first_record.map(|id| id.0).unwrap_or(0);
    format!("{}-{seq:04}", date_of_sale.format("%Y%m%d"))
}

impl Receipt {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        receipt_number: String,
        store_name: impl Into<String>,
        issued_at: DateTime<Utc>,
        operator: Operator,
        items: &[SaleItem],
        date_of_sale: NaiveDate,
        warranty_period: WarrantyPeriod,
        currency: impl Into<String>,
    ) -> Self {
        let lines: Vec<ReceiptLine> = items
            .iter()
            .map(|item| ReceiptLine {
                product_name: item.product.name.clone(),
                unique_id: item.product.unique_id.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price(),
                total: item.total_price,
                warranty_end_date: warranty_period.end_date(date_of_sale),
            })
            .collect();
        let grand_total = lines.iter().map(|l| l.total).sum();
        Self {
            receipt_number,
            store_name: store_name.into(),
            issued_at,
            operator,
            lines,
            grand_total,
            currency: currency.into(),
            warranty_period,
        }
    }

    pub fn units(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

impl Display for Receipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rule = "-".repeat(WIDTH);
        writeln!(f, "{:^w$}", self.store_name, w = WIDTH)?;
        writeln!(f, "{:^w$}", "SALES RECEIPT", w = WIDTH)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Receipt: {}", self.receipt_number)?;
        writeln!(f, "Date:    {}", self.issued_at.format("%Y-%m-%d %H:%M UTC"))?;
        writeln!(f, "Cashier: {}", self.operator.email)?;
        writeln!(f, "{rule}")?;
        for line in &self.lines {
            writeln!(f, "{}", line.product_name)?;
            let qty = format!("{} x {:.2}", line.quantity, line.unit_price);
            writeln!(f, "  {:<18}{:>10}{:>12.2}", line.unique_id, qty, line.total)?;
            writeln!(f, "  warranty until {}", line.warranty_end_date)?;
        }
        writeln!(f, "{rule}")?;
        let total = format!("{} {:.2}", self.currency, self.grand_total);
        writeln!(f, "{:<18}{:>24}", "TOTAL", total)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Warranty: {} from date of sale", self.warranty_period)?;
        write!(f, "{:^w$}", "Thank you for shopping with us!", w = WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Product, ProductDraft, ProductId};
    use chrono::TimeZone;

    fn receipt() -> Receipt {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let camera = Product::from_draft(
            ProductId(1),
            date,
            ProductDraft::new("Action Camera", "CAM-1001", "CAM-1001-0001", 250.0, 3),
        );
        let items = vec![SaleItem::new(camera, 2)];
        Receipt::new(
            receipt_number(date, Some(RecordId(7))),
            "FRIENDS IT ZONE",
            Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap(),
            Operator::new("u1", "seller@shop.test"),
            &items,
            date,
            WarrantyPeriod::years(1),
            "BDT",
        )
    }

    #[test]
    fn test_totals() {
        let receipt = receipt();
        assert_eq!(receipt.receipt_number, "20250115-0007");
        assert_eq!(receipt.grand_total, 500.0);
        assert_eq!(receipt.units(), 2);
        assert_eq!(
            receipt.lines[0].warranty_end_date,
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_layout() {
        let text = receipt().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0].trim(), "FRIENDS IT ZONE");
        assert!(text.contains("Receipt: 20250115-0007"));
        assert!(text.contains("Cashier: seller@shop.test"));
        assert!(text.contains("CAM-1001-0001"));
        assert!(text.contains("2 x 250.00"));
        assert!(text.contains("BDT 500.00"));
        assert!(text.contains("warranty until 2026-01-15"));
        assert_eq!(lines.last().map(|l| l.trim()), Some("Thank you for shopping with us!"));
    }
}
