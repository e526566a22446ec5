//! Seeded end-to-end demo of the sale workflow.
//!
//! Runs against the in-process backend: registers an owner, configures the
//! company, stocks a few products, then walks one sale through the
//! finalizer with the log printer. Documents land in a temp folder.
//!
//! ```text
//! cargo run -p caja-terminal
//! ```

use caja_core::types::PaymentMethod;
use caja_core::validation::{CompanyForm, ProductForm, SignUpForm};
use caja_remote::memory::{MemoryAuth, MemoryStore};
use tracing::info;

use caja_terminal::checkout::{finalize_sale, Checkout, Peripherals};
use caja_terminal::printer::{LogPrinter, DEFAULT_THERMAL_PRINTER};
use caja_terminal::{directory, inventory, CatalogCache, InvoiceStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    caja_terminal::init_tracing();

    let store = MemoryStore::new();
    let auth = MemoryAuth::new();

    // Owner + company
    let session = directory::register_owner(
        &auth,
        &store,
        &SignUpForm {
            email: "basile@example.com".to_string(),
            password: "secreto".to_string(),
            business_name: "Almacén Basile".to_string(),
        },
    )
    .await?;

    directory::save_company(
        &store,
        &session,
        &CompanyForm {
            name: "Almacén Basile".to_string(),
            address: "Avellaneda 123".to_string(),
            tax_id: "30-12345678-9".to_string(),
            email: "basile@example.com".to_string(),
            branch: "Centro".to_string(),
        },
    )
    .await?;

    // Seed inventory
    let seed = [
        ("7790001", "Yerba Mate 1kg", 24, 800.0, 1500.0),
        ("7790002", "Fernet 750ml", 12, 3200.0, 4500.0),
        ("7790003", "Gaseosa Cola 2.25L", 30, 700.0, 1200.0),
    ];
    for (barcode, name, stock, cost, sale) in seed {
        inventory::add_product(
            &store,
            &session,
            &ProductForm {
                barcode: barcode.to_string(),
                name: name.to_string(),
                description: String::new(),
                stock,
                category: "Almacén".to_string(),
                branch: "Centro".to_string(),
                tax_rate_pct: 21.0,
                price_cost: cost,
                price_sale: sale,
            },
        )
        .await?;
    }

    // Page load
    let mut catalog = CatalogCache::load(&store, &session.user_id).await?;
    let branch = catalog.default_branch().unwrap_or("Centro").to_string();
    let mut checkout = Checkout::new(&branch);

    // Scan two products, one of them twice
    for barcode in ["7790001", "7790002", "7790001"] {
        let product = catalog.find_by_barcode(barcode, &branch)?.clone();
        checkout.cart.add_line(&product)?;
    }
    checkout.client.name = "Ana García".to_string();
    checkout.client.email = "ana@example.com".to_string();
    checkout.payment_method = Some(PaymentMethod::Cash);

    // Finalize
    let documents = InvoiceStorage::at(std::env::temp_dir().join("caja-facturas"));
    let printer = LogPrinter::new(vec!["XPrinter XP-58".to_string()]);
    let peripherals = Peripherals {
        printer: &printer,
        documents: &documents,
        preferred_printer: DEFAULT_THERMAL_PRINTER,
    };

    let outcome = finalize_sale(&store, &session, &peripherals, &mut catalog, &mut checkout).await?;

    info!(
        bill = %outcome.bill_number,
        total = outcome.total,
        printed = outcome.printed,
        "demo sale completed"
    );
    for warning in &outcome.warnings {
        info!(warning, "finalization warning");
    }
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
