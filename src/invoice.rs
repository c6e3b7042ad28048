//! Plain-text invoice rendering
//!
//! Fixed-layout bill for a placed order: header, billing block, item
//! table, totals and terms. Amounts come straight from the order record,
//! so the rendered grand total always matches `total_amount`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::aggregates::order::Order;

const WIDTH: usize = 72;

#[derive(Clone, Debug)]
pub struct InvoiceLine {
    pub description: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total: Decimal,
}

#[derive(Clone, Debug)]
pub struct Invoice {
    pub number: String,
    pub date: DateTime<Utc>,
    pub customer_name: String,
    pub customer_address: String,
    pub customer_phone: String,
    pub lines: Vec<InvoiceLine>,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub grand_total: Decimal,
}

impl Invoice {
    pub fn for_order(order: &Order, delivery_fee: Decimal) -> Self {
        let lines = order
            .items
            .iter()
            .map(|item| InvoiceLine {
                description: item.name.clone(),
                quantity: item.quantity,
                unit_price: item.price,
                total: item.line_total(),
            })
            .collect();
        let delivery = &order.delivery_details;
        Self {
            number: format!(
                "INV-{}-{}",
                order.created_at.format("%Y"),
                short_id(&order.id).to_uppercase()
            ),
            date: order.created_at,
            customer_name: delivery.name.clone(),
            customer_address: format!("{}, {}, {}", delivery.address, delivery.city, delivery.pincode),
            customer_phone: delivery.phone.clone(),
            lines,
            subtotal: order.subtotal(),
            delivery_fee,
            grand_total: order.total_amount,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let rule = "-".repeat(WIDTH);

        out.push_str("GREEN BASKET\n");
        out.push_str("GROW SMART. GROW MORE\n");
        out.push_str(&format!("{:>width$}\n", "INVOICE", width = WIDTH));
        out.push_str(&format!("{:>width$}\n", format!("Invoice # {}", self.number), width = WIDTH));
        out.push_str(&format!(
            "{:>width$}\n",
            format!("Date: {}", self.date.format("%B %e, %Y")),
            width = WIDTH
        ));
        out.push_str(&rule);
        out.push('\n');

        out.push_str("BILLING DETAILS\n");
        out.push_str(&format!("Customer: {}\n", self.customer_name));
        out.push_str(&format!("Address: {}\n", self.customer_address));
        out.push_str(&format!("Phone: {}\n", self.customer_phone));
        out.push_str(&rule);
        out.push('\n');

        out.push_str(&format!(
            "{:<34} {:>5} {:>14} {:>14}\n",
            "DESCRIPTION", "QTY", "UNIT PRICE", "TOTAL"
        ));
        for line in &self.lines {
            out.push_str(&format!(
                "{:<34} {:>5} {:>14} {:>14}\n",
                line.description,
                line.quantity,
                format!("₹{:.2}", line.unit_price),
                format!("₹{:.2}", line.total),
            ));
        }
        out.push_str(&rule);
        out.push('\n');

        out.push_str(&format!(
            "{:>55} {:>14}\n",
            "SUBTOTAL:",
            format!("₹{:.2}", self.subtotal)
        ));
        out.push_str(&format!(
            "{:>55} {:>14}\n",
            "DELIVERY FEE:",
            format!("₹{:.2}", self.delivery_fee)
        ));
        out.push_str(&format!(
            "{:>55} {:>14}\n",
            "GRAND TOTAL:",
            format!("₹{:.2}", self.grand_total)
        ));
        out.push_str(&rule);
        out.push('\n');

        out.push_str("TERMS & CONDITIONS\n");
        out.push_str("Payment due within 15 days. Thank you for your business!\n");
        out.push_str("UPI ID: GREENBASKET@UPI\n");
        out
    }
}

fn short_id(id: &str) -> &str {
    &id[..id.len().min(6)]
}
