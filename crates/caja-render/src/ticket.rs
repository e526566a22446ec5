//! # Thermal Ticket
//!
//! The narrow receipt printed after every sale: 32 fixed-width columns on an
//! 80 mm roll, Courier.
//!
//! ## Layout
//! ```text
//! ALMACEN BASILE
//! Avellaneda 123
//! CUIT: 30-12345678-9
//! --------------------------------
//! Fecha: 07/08/26 14:30
//! Ticket: #20260807042
//! Cliente: Consumidor Final
//! --------------------------------
//! CANT DESCRIPCION         PRECIO
//!    2 Yerba Mate 1kg     3000.00
//!      1500.00 x unidad
//! --------------------------------
//! SUBTOTAL:            3000.00
//! IVA 21%:              630.00
//! TOTAL:               3630.00
//! --------------------------------
//! FORMA DE PAGO: Efectivo
//! --------------------------------
//!
//!      ¡GRACIAS POR SU COMPRA!
//! ```

use caja_core::totals::format_amount;

use crate::pdf::DocRow;
use crate::snapshot::DocumentSnapshot;
use crate::EMPTY_CART_PLACEHOLDER;

/// Printable columns on the 80 mm roll.
pub const TICKET_WIDTH: usize = 32;

/// Item names are clipped to this width so the amount column stays aligned.
const NAME_WIDTH: usize = 18;

// =============================================================================
// Fixed-Width Helpers
// =============================================================================

fn separator() -> String {
    "-".repeat(TICKET_WIDTH)
}

fn pad_start(text: &str, width: usize) -> String {
    format!("{:>width$}", text, width = width)
}

fn pad_end_clipped(text: &str, width: usize) -> String {
    let clipped: String = text.chars().take(width).collect();
    format!("{:<width$}", clipped, width = width)
}

fn centered(text: &str) -> String {
    let len = text.chars().count();
    if len >= TICKET_WIDTH {
        return text.to_string();
    }
    let left = (TICKET_WIDTH - len) / 2;
    format!("{}{}", " ".repeat(left), text)
}

/// Formats the IVA percentage the way the operator typed it (no trailing
/// zeros for whole-number rates).
fn format_rate(rate_pct: f64) -> String {
    if rate_pct.fract() == 0.0 {
        format!("{:.0}", rate_pct)
    } else {
        format!("{}", rate_pct)
    }
}

// =============================================================================
// Ticket Lines
// =============================================================================

/// Renders the ticket as fixed-width text lines.
///
/// This is both the print payload and the content model the PDF variant is
/// built from. Never mutates the snapshot.
pub fn ticket_lines(snapshot: &DocumentSnapshot) -> Vec<String> {
    let mut lines = Vec::new();

    // Header
    lines.push(snapshot.company.name.to_uppercase());
    lines.push(snapshot.company.address.clone());
    lines.push(format!("CUIT: {}", snapshot.company.tax_id));
    lines.push(separator());

    // Sale info
    lines.push(format!(
        "Fecha: {}",
        snapshot.issued_at.format("%d/%m/%y %H:%M")
    ));
    lines.push(format!("Ticket: #{}", snapshot.number));
    lines.push(format!("Cliente: {}", snapshot.client.name));
    lines.push(separator());
    lines.push("CANT DESCRIPCION         PRECIO".to_string());

    // Items
    if snapshot.lines.is_empty() {
        lines.push(centered(EMPTY_CART_PLACEHOLDER));
    } else {
        for item in &snapshot.lines {
            lines.push(format!(
                "{} {} {}",
                pad_start(&item.quantity.to_string(), 4),
                pad_end_clipped(&item.name, NAME_WIDTH),
                pad_start(&format_amount(item.line_total), 7),
            ));
            lines.push(format!(
                "     {} x unidad",
                pad_start(&format_amount(item.unit_price), 7)
            ));
        }
    }

    // Totals
    lines.push(separator());
    lines.push(format!(
        "SUBTOTAL:      {}",
        pad_start(&format_amount(snapshot.totals.subtotal), 12)
    ));
    lines.push(format!(
        "IVA {}%:      {}",
        format_rate(snapshot.totals.tax_rate_pct),
        pad_start(&format_amount(snapshot.totals.tax_amount), 12)
    ));
    lines.push(format!(
        "TOTAL:         {}",
        pad_start(&format_amount(snapshot.totals.total), 12)
    ));
    lines.push(separator());
    lines.push(format!("FORMA DE PAGO: {}", snapshot.payment_method));
    lines.push(separator());
    lines.push(String::new());
    lines.push(centered("¡GRACIAS POR SU COMPRA!"));

    lines
}

/// Maps the ticket lines onto 80 mm roll rows for PDF emission.
pub fn ticket_rows(snapshot: &DocumentSnapshot) -> Vec<DocRow> {
    ticket_lines(snapshot)
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            // Company name a touch larger, everything else at body size.
            let size = if i == 0 { 12.0 } else { 10.0 };
            DocRow::text(line, 5.0, size, 5.0)
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{ClientSnapshot, CompanySnapshot};
    use caja_core::totals::compute_totals;
    use caja_core::types::LineSnapshot;
    use chrono::{TimeZone, Utc};

    fn snapshot(lines: Vec<LineSnapshot>) -> DocumentSnapshot {
        let totals = compute_totals(&lines, 21.0);
        DocumentSnapshot {
            number: "20260807042".to_string(),
            issued_at: Utc.with_ymd_and_hms(2026, 8, 7, 14, 30, 0).unwrap(),
            company: CompanySnapshot {
                name: "Almacén Basile".to_string(),
                address: "Avellaneda 123".to_string(),
                tax_id: "30-12345678-9".to_string(),
                email: "basile@example.com".to_string(),
            },
            client: ClientSnapshot::for_sale("Ana", "ana@example.com"),
            lines,
            totals,
            payment_method: "Efectivo".to_string(),
        }
    }

    fn item(name: &str, unit_price: f64, quantity: i64) -> LineSnapshot {
        LineSnapshot {
            product_id: "p".to_string(),
            barcode: "779".to_string(),
            name: name.to_string(),
            unit_price,
            quantity,
            line_total: unit_price * quantity as f64,
        }
    }

    #[test]
    fn test_ticket_header_and_footer() {
        let lines = ticket_lines(&snapshot(vec![item("Yerba Mate 1kg", 1500.0, 2)]));

        assert_eq!(lines[0], "ALMACÉN BASILE");
        assert_eq!(lines[2], "CUIT: 30-12345678-9");
        assert_eq!(lines[3], "-".repeat(32));
        assert_eq!(lines[4], "Fecha: 07/08/26 14:30");
        assert_eq!(lines[5], "Ticket: #20260807042");
        assert_eq!(lines[6], "Cliente: Ana");
        assert!(lines.last().unwrap().contains("¡GRACIAS POR SU COMPRA!"));
    }

    #[test]
    fn test_item_columns_are_aligned() {
        let lines = ticket_lines(&snapshot(vec![item("Yerba Mate 1kg", 1500.0, 2)]));

        let header = lines.iter().position(|l| l.starts_with("CANT")).unwrap();
        assert_eq!(lines[header + 1], "   2 Yerba Mate 1kg     3000.00");
        assert_eq!(lines[header + 2], "     1500.00 x unidad");
    }

    #[test]
    fn test_long_names_are_clipped_to_column() {
        let lines = ticket_lines(&snapshot(vec![item(
            "Gaseosa Cola Retornable 2.25L",
            900.0,
            1,
        )]));

        let row = lines
            .iter()
            .find(|l| l.contains("Gaseosa"))
            .unwrap();
        assert!(row.contains("Gaseosa Cola Retor"));
        assert!(!row.contains("Retornable"));
    }

    #[test]
    fn test_totals_block() {
        let lines = ticket_lines(&snapshot(vec![item("Yerba", 100.0, 2)]));

        let find = |prefix: &str| {
            lines
                .iter()
                .find(|l| l.starts_with(prefix))
                .unwrap_or_else(|| panic!("missing line: {}", prefix))
        };
        assert!(find("SUBTOTAL:").ends_with("200.00"));
        assert!(find("IVA 21%:").ends_with("42.00"));
        assert!(find("TOTAL:").ends_with("242.00"));
        assert_eq!(find("FORMA DE PAGO:").as_str(), "FORMA DE PAGO: Efectivo");
    }

    #[test]
    fn test_empty_cart_renders_placeholder() {
        let lines = ticket_lines(&snapshot(vec![]));
        assert!(lines.iter().any(|l| l.contains(EMPTY_CART_PLACEHOLDER)));
    }

    #[test]
    fn test_same_snapshot_same_content() {
        let snap = snapshot(vec![item("Yerba", 100.0, 2)]);
        assert_eq!(ticket_lines(&snap), ticket_lines(&snap));
    }
}
