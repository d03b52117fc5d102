//! PDF-less HTML receipts and email bodies.

use crate::models::{Customer, Vehicle, WorkOrder, WorkOrderItem};

fn dollars(cents: i64) -> String {
    format!("${}.{:02}", cents / 100, (cents % 100).abs())
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Full receipt for a work order, rendered as a standalone HTML document.
/// `timestamp_display` is pre-formatted by the time-override utility so the
/// shop's display timezone is honored.
pub fn render_receipt(
    order: &WorkOrder,
    customer: &Customer,
    vehicle: Option<&Vehicle>,
    items: &[WorkOrderItem],
    shop_name: &str,
    timestamp_display: &str,
) -> String {
    let mut rows = String::new();
    for item in items {
        let line_total = (item.unit_cost_cents as f64 * item.quantity).round() as i64;
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&item.description),
            item.kind,
            item.quantity,
            dollars(item.unit_cost_cents),
            dollars(line_total),
        ));
    }

    let vehicle_line = vehicle
        .map(|v| format!("{} {} {}", v.year, escape(&v.make), escape(&v.model)))
        .unwrap_or_else(|| "Estimate only".to_string());

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Receipt {id}</title></head>
<body>
<h1>{shop}</h1>
<p>Work order {id} &mdash; {status}</p>
<p>{first} {last}<br>{vehicle}</p>
<p>Date: {timestamp}</p>
<table border="1" cellspacing="0" cellpadding="4">
<tr><th>Item</th><th>Type</th><th>Qty</th><th>Unit</th><th>Total</th></tr>
{rows}</table>
<p>Subtotal: {subtotal}<br>
Tax ({tax_rate:.4}): {tax}<br>
<strong>Total: {total}</strong></p>
{notes}
</body>
</html>
"#,
        shop = escape(shop_name),
        id = order.id,
        status = order.status,
        first = escape(&customer.first_name),
        last = escape(&customer.last_name),
        vehicle = vehicle_line,
        timestamp = escape(timestamp_display),
        rows = rows,
        subtotal = dollars(order.subtotal_cents),
        tax_rate = order.tax_rate,
        tax = dollars(order.tax_cents),
        total = dollars(order.total_cents),
        notes = order
            .notes
            .as_deref()
            .map(|n| format!("<p>Notes: {}</p>", escape(n)))
            .unwrap_or_default(),
    )
}

/// Short completion notice sent when an order enters Complete.
pub fn render_completion_notice(
    order: &WorkOrder,
    customer: &Customer,
    shop_name: &str,
    timestamp_display: &str,
) -> String {
    format!(
        r#"<html><body>
<p>Hi {first},</p>
<p>Your vehicle is ready for pickup at {shop}. Work order {id} was completed on {timestamp}.</p>
<p>Amount due: <strong>{total}</strong></p>
</body></html>
"#,
        first = escape(&customer.first_name),
        shop = escape(shop_name),
        id = order.id,
        timestamp = escape(timestamp_display),
        total = dollars(order.total_cents),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkOrderStatus;
    use chrono::Utc;
    use uuid::Uuid;

    fn fixture() -> (WorkOrder, Customer, Vec<WorkOrderItem>) {
        let order_id = Uuid::new_v4();
        let customer_id = Uuid::new_v4();
        let order = WorkOrder {
            id: order_id,
            customer_id,
            vehicle_id: None,
            status: WorkOrderStatus::Complete,
            tax_rate: 0.0825,
            subtotal_cents: 9500,
            tax_cents: 784,
            total_cents: 10284,
            notes: Some("Customer waiting <on site>".into()),
            signature: None,
            created_in_dst: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let customer = Customer {
            id: customer_id,
            first_name: "Rosa".into(),
            last_name: "Delgado".into(),
            phone: None,
            email: Some("rosa@example.com".into()),
            address: None,
            city: None,
            state: None,
            postal_code: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let items = vec![WorkOrderItem {
            id: Uuid::new_v4(),
            work_order_id: order_id,
            kind: "labor".into(),
            part_id: None,
            labor_id: Some(Uuid::new_v4()),
            description: "Brake inspection".into(),
            quantity: 1.5,
            unit_cost_cents: 5000,
            position: 0,
        }];
        (order, customer, items)
    }

    #[test]
    fn receipt_carries_totals_and_escapes_notes() {
        let (order, customer, items) = fixture();
        let html = render_receipt(&order, &customer, None, &items, "Main St Auto", "July 4, 2025 12:00 PM CDT");
        assert!(html.contains("$95.00"));
        assert!(html.contains("$7.84"));
        assert!(html.contains("$102.84"));
        assert!(html.contains("Estimate only"));
        assert!(html.contains("&lt;on site&gt;"));
        assert!(!html.contains("<on site>"));
    }

    #[test]
    fn completion_notice_names_the_customer() {
        let (order, customer, _) = fixture();
        let html = render_completion_notice(&order, &customer, "Main St Auto", "today");
        assert!(html.contains("Hi Rosa"));
        assert!(html.contains("$102.84"));
    }
}
