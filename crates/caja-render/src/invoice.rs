//! # Invoice & Quote Documents
//!
//! The wide A4 documents: "FACTURA" for a completed sale and "PRESUPUESTO"
//! for a quote. Same snapshot shape as the ticket, different width and
//! verbosity.
//!
//! Column positions are millimetres from the left page edge; the table uses
//! four fixed columns (name / quantity / unit price / amount) like the
//! on-screen preview the document mirrors.

use caja_core::totals::format_amount;

use crate::pdf::{DocCell, DocRow};
use crate::snapshot::{DocumentSnapshot, QuoteTerms};
use crate::EMPTY_CART_PLACEHOLDER;

// Column layout (mm from left edge).
const COL_NAME: f32 = 15.0;
const COL_QTY: f32 = 100.0;
const COL_UNIT: f32 = 125.0;
const COL_AMOUNT: f32 = 165.0;
const COL_CLIENT_BLOCK: f32 = 120.0;
const COL_TITLE: f32 = 140.0;

/// Item names wider than this wrap the table, clip instead.
const NAME_CLIP: usize = 45;

// =============================================================================
// Shared Blocks
// =============================================================================

fn two_cells(
    left: impl Into<String>,
    right: impl Into<String>,
    size_pt: f32,
    bold: bool,
    advance_mm: f32,
) -> DocRow {
    DocRow {
        cells: vec![
            DocCell {
                text: left.into(),
                x_mm: COL_NAME,
                size_pt,
                bold,
            },
            DocCell {
                text: right.into(),
                x_mm: COL_CLIENT_BLOCK,
                size_pt,
                bold,
            },
        ],
        advance_mm,
    }
}

fn header(snapshot: &DocumentSnapshot, title: &str) -> Vec<DocRow> {
    vec![
        DocRow {
            cells: vec![
                DocCell {
                    text: snapshot.company.name.clone(),
                    x_mm: COL_NAME,
                    size_pt: 16.0,
                    bold: true,
                },
                DocCell {
                    text: title.to_string(),
                    x_mm: COL_TITLE,
                    size_pt: 16.0,
                    bold: true,
                },
            ],
            advance_mm: 12.0,
        },
        DocRow::gap(2.0),
    ]
}

fn items_table(snapshot: &DocumentSnapshot) -> Vec<DocRow> {
    let mut rows = vec![DocRow {
        cells: vec![
            DocCell {
                text: "Nombre".to_string(),
                x_mm: COL_NAME,
                size_pt: 10.0,
                bold: true,
            },
            DocCell {
                text: "Cantidad".to_string(),
                x_mm: COL_QTY,
                size_pt: 10.0,
                bold: true,
            },
            DocCell {
                text: "Precio Unit.".to_string(),
                x_mm: COL_UNIT,
                size_pt: 10.0,
                bold: true,
            },
            DocCell {
                text: "Importe".to_string(),
                x_mm: COL_AMOUNT,
                size_pt: 10.0,
                bold: true,
            },
        ],
        advance_mm: 7.0,
    }];

    if snapshot.lines.is_empty() {
        rows.push(DocRow::text(EMPTY_CART_PLACEHOLDER, COL_NAME, 10.0, 6.0));
        return rows;
    }

    for item in &snapshot.lines {
        let name: String = item.name.chars().take(NAME_CLIP).collect();
        rows.push(DocRow {
            cells: vec![
                DocCell {
                    text: name,
                    x_mm: COL_NAME,
                    size_pt: 10.0,
                    bold: false,
                },
                DocCell {
                    text: item.quantity.to_string(),
                    x_mm: COL_QTY,
                    size_pt: 10.0,
                    bold: false,
                },
                DocCell {
                    text: format!("${}", format_amount(item.unit_price)),
                    x_mm: COL_UNIT,
                    size_pt: 10.0,
                    bold: false,
                },
                DocCell {
                    text: format!("${}", format_amount(item.line_total)),
                    x_mm: COL_AMOUNT,
                    size_pt: 10.0,
                    bold: false,
                },
            ],
            advance_mm: 6.0,
        });
    }
    rows
}

fn totals_block(snapshot: &DocumentSnapshot) -> Vec<DocRow> {
    let t = &snapshot.totals;
    let rate = if t.tax_rate_pct.fract() == 0.0 {
        format!("{:.0}", t.tax_rate_pct)
    } else {
        format!("{}", t.tax_rate_pct)
    };
    vec![
        DocRow::gap(4.0),
        DocRow {
            cells: vec![
                DocCell {
                    text: "Subtotal:".to_string(),
                    x_mm: COL_UNIT,
                    size_pt: 10.0,
                    bold: false,
                },
                DocCell {
                    text: format!("${}", format_amount(t.subtotal)),
                    x_mm: COL_AMOUNT,
                    size_pt: 10.0,
                    bold: false,
                },
            ],
            advance_mm: 6.0,
        },
        DocRow {
            cells: vec![
                DocCell {
                    text: format!("IVA ({}%):", rate),
                    x_mm: COL_UNIT,
                    size_pt: 10.0,
                    bold: false,
                },
                DocCell {
                    text: format!("${}", format_amount(t.tax_amount)),
                    x_mm: COL_AMOUNT,
                    size_pt: 10.0,
                    bold: false,
                },
            ],
            advance_mm: 6.0,
        },
        DocRow {
            cells: vec![
                DocCell {
                    text: "TOTAL:".to_string(),
                    x_mm: COL_UNIT,
                    size_pt: 11.0,
                    bold: true,
                },
                DocCell {
                    text: format!("${}", format_amount(t.total)),
                    x_mm: COL_AMOUNT,
                    size_pt: 11.0,
                    bold: true,
                },
            ],
            advance_mm: 8.0,
        },
    ]
}

// =============================================================================
// Invoice
// =============================================================================

/// Lays out the FACTURA document for a completed sale.
pub fn invoice_rows(snapshot: &DocumentSnapshot) -> Vec<DocRow> {
    let mut rows = header(snapshot, "FACTURA");

    rows.push(two_cells(
        "Datos de la Empresa",
        "Datos del Cliente",
        12.0,
        true,
        7.0,
    ));
    rows.push(two_cells(
        snapshot.company.email.clone(),
        snapshot.client.name.clone(),
        10.0,
        false,
        5.0,
    ));
    rows.push(two_cells(
        format!("CUIT: {}", snapshot.company.tax_id),
        snapshot.client.email.clone(),
        10.0,
        false,
        5.0,
    ));
    rows.push(two_cells(
        snapshot.company.address.clone(),
        format!("Fecha: {}", snapshot.issued_at.format("%d/%m/%Y")),
        10.0,
        false,
        5.0,
    ));
    rows.push(DocRow::text(
        format!("Factura N° {}", snapshot.number),
        COL_NAME,
        10.0,
        8.0,
    ));

    rows.extend(items_table(snapshot));
    rows.extend(totals_block(snapshot));

    rows.push(DocRow::text(
        format!("Método de pago: {}", snapshot.payment_method),
        COL_NAME,
        10.0,
        6.0,
    ));

    rows
}

// =============================================================================
// Quote
// =============================================================================

/// Lays out the PRESUPUESTO document: same table, richer client block,
/// commercial terms at the bottom, no payment method line.
pub fn quote_rows(snapshot: &DocumentSnapshot, terms: &QuoteTerms) -> Vec<DocRow> {
    let mut rows = header(snapshot, "PRESUPUESTO");

    rows.push(two_cells(
        "Datos de la Empresa",
        "Datos del Cliente",
        12.0,
        true,
        7.0,
    ));
    rows.push(two_cells(
        snapshot.company.email.clone(),
        snapshot.client.name.clone(),
        10.0,
        false,
        5.0,
    ));
    rows.push(two_cells(
        format!("CUIT: {}", snapshot.company.tax_id),
        snapshot.client.address.clone().unwrap_or_default(),
        10.0,
        false,
        5.0,
    ));
    if let Some(phone) = &snapshot.client.phone {
        rows.push(two_cells("", format!("Tel: {}", phone), 10.0, false, 5.0));
    }
    if let Some(tax_code) = &snapshot.client.tax_code {
        rows.push(two_cells(
            "",
            format!("CIF/NIF: {}", tax_code),
            10.0,
            false,
            5.0,
        ));
    }
    rows.push(DocRow::gap(4.0));

    rows.extend(items_table(snapshot));
    rows.extend(totals_block(snapshot));

    rows.push(DocRow::bold("Condiciones de pago", COL_NAME, 11.0, 6.0));
    rows.push(DocRow::text(
        terms.payment_conditions.clone(),
        COL_NAME,
        10.0,
        6.0,
    ));
    rows.push(DocRow::text(
        format!("Validez del presupuesto: {} días", terms.validity_days),
        COL_NAME,
        10.0,
        6.0,
    ));
    if !terms.notes.trim().is_empty() {
        rows.push(DocRow::bold("Notas", COL_NAME, 11.0, 6.0));
        rows.push(DocRow::text(terms.notes.clone(), COL_NAME, 10.0, 6.0));
    }

    rows
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
            client: ClientSnapshot {
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
                address: Some("Mitre 450".to_string()),
                phone: Some("11-5555-0000".to_string()),
                tax_code: None,
            },
            lines,
            totals,
            payment_method: "Efectivo".to_string(),
        }
    }

    fn all_text(rows: &[DocRow]) -> String {
        rows.iter()
            .map(DocRow::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_invoice_contains_title_and_parties() {
        let text = all_text(&invoice_rows(&snapshot(vec![item("Yerba", 100.0, 2)])));

        assert!(text.contains("FACTURA"));
        assert!(text.contains("Almacén Basile"));
        assert!(text.contains("CUIT: 30-12345678-9"));
        assert!(text.contains("Ana"));
        assert!(text.contains("Factura N° 20260807042"));
        assert!(text.contains("Fecha: 07/08/2026"));
    }

    #[test]
    fn test_invoice_totals_and_payment() {
        let text = all_text(&invoice_rows(&snapshot(vec![item("Yerba", 100.0, 2)])));

        assert!(text.contains("Subtotal: $200.00"));
        assert!(text.contains("IVA (21%): $42.00"));
        assert!(text.contains("TOTAL: $242.00"));
        assert!(text.contains("Método de pago: Efectivo"));
    }

    #[test]
    fn test_empty_cart_renders_placeholder_instead_of_failing() {
        let text = all_text(&invoice_rows(&snapshot(vec![])));
        assert!(text.contains(EMPTY_CART_PLACEHOLDER));
    }

    #[test]
    fn test_quote_carries_terms_and_client_details() {
        let terms = QuoteTerms {
            payment_conditions: "50% al confirmar".to_string(),
            validity_days: 15,
            notes: "Entrega en 10 días hábiles".to_string(),
        };
        let text = all_text(&quote_rows(&snapshot(vec![item("Yerba", 100.0, 1)]), &terms));

        assert!(text.contains("PRESUPUESTO"));
        assert!(!text.contains("FACTURA"));
        assert!(text.contains("Mitre 450"));
        assert!(text.contains("Tel: 11-5555-0000"));
        assert!(text.contains("50% al confirmar"));
        assert!(text.contains("Validez del presupuesto: 15 días"));
        assert!(text.contains("Entrega en 10 días hábiles"));
        assert!(!text.contains("Método de pago"));
    }

    #[test]
    fn test_quote_skips_empty_optional_fields() {
        let mut snap = snapshot(vec![item("Yerba", 100.0, 1)]);
        snap.client.phone = None;
        snap.client.tax_code = None;
        let text = all_text(&quote_rows(&snap, &QuoteTerms::default()));

        assert!(!text.contains("Tel:"));
        assert!(!text.contains("CIF/NIF:"));
    }
}
