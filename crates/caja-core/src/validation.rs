//! # Validation
//!
//! Typed form records with validation functions.
//!
//! Every form is an explicit record and `validate()` returns a `Result`;
//! nothing is carried as loose key/value state. Validation runs before any
//! remote write.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form record (this module)                                    │
//! │  ├── Required fields, lengths, ranges, charset                         │
//! │  └── Runs before any remote call                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Workflow preconditions (apps/terminal)                       │
//! │  ├── Cart non-empty, payment method selected                           │
//! │  └── Per-line stock re-check against the catalog cache                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote store                                                 │
//! │  └── Owner scoping, barcode uniqueness per owner                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a required text field (non-empty after trimming).
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a barcode.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Digits, letters, hyphens only (covers EAN/UPC and internal codes)
pub fn validate_barcode(barcode: &str) -> ValidationResult<()> {
    let barcode = barcode.trim();
    validate_required("barcode", barcode)?;
    if barcode.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "barcode".to_string(),
            max: 50,
        });
    }
    if !barcode.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ValidationError::InvalidFormat {
            field: "barcode".to_string(),
            reason: "must contain only letters, numbers and hyphens".to_string(),
        });
    }
    Ok(())
}

/// Validates a display name (product, client or company).
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();
    validate_required(field, name)?;
    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }
    Ok(())
}

/// Validates a minimal email shape: something@something, no spaces.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    validate_required("email", email)?;
    let well_formed = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && !domain.is_empty() && !email.contains(' ')
    });
    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain".to_string(),
        });
    }
    Ok(())
}

/// Validates an IVA percentage (0-100, the form's own bounds).
pub fn validate_tax_rate(rate_pct: f64) -> ValidationResult<()> {
    if !(0.0..=100.0).contains(&rate_pct) {
        return Err(ValidationError::OutOfRange {
            field: "tax rate".to_string(),
            min: 0,
            max: 100,
        });
    }
    Ok(())
}

/// Validates a price (zero allowed - free items exist).
pub fn validate_price(field: &str, price: f64) -> ValidationResult<()> {
    if price < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a stock level (never negative).
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }
    Ok(())
}

/// Validates a stock-adjustment quantity (strictly positive).
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::MAX,
        });
    }
    Ok(())
}

// =============================================================================
// Product Form
// =============================================================================

/// Input for creating or editing a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductForm {
    pub barcode: String,
    pub name: String,
    pub description: String,
    pub stock: i64,
    pub category: String,
    pub branch: String,
    pub tax_rate_pct: f64,
    pub price_cost: f64,
    pub price_sale: f64,
}

impl ProductForm {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_barcode(&self.barcode)?;
        validate_name("name", &self.name)?;
        validate_required("branch", &self.branch)?;
        validate_stock(self.stock)?;
        validate_tax_rate(self.tax_rate_pct)?;
        validate_price("cost price", self.price_cost)?;
        validate_price("sale price", self.price_sale)?;
        Ok(())
    }

    /// Sale price with the product's own IVA applied (form preview helper).
    pub fn price_with_tax(&self) -> f64 {
        self.price_sale + self.price_sale * (self.tax_rate_pct / 100.0)
    }
}

// =============================================================================
// Client Form
// =============================================================================

/// Client fields entered on the point-of-sale screen.
///
/// Both fields empty means a walk-in sale: the bill carries the
/// "Consumidor Final" placeholder and no client record is touched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientForm {
    pub name: String,
    pub email: String,
}

impl ClientForm {
    /// A walk-in sale: no client details entered.
    pub fn is_walk_in(&self) -> bool {
        self.name.trim().is_empty() || self.email.trim().is_empty()
    }

    /// Validates the form for a client upsert (both fields present).
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name("client name", &self.name)?;
        validate_email(&self.email)?;
        Ok(())
    }
}

// =============================================================================
// Company Form
// =============================================================================

/// Input for the company settings dialog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyForm {
    pub name: String,
    pub address: String,
    pub tax_id: String,
    pub email: String,
    pub branch: String,
}

impl CompanyForm {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name("company name", &self.name)?;
        validate_required("address", &self.address)?;
        validate_required("tax id", &self.tax_id)?;
        validate_email(&self.email)?;
        Ok(())
    }
}

// =============================================================================
// Sign-Up Form
// =============================================================================

/// Input for creating a new owner account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub business_name: String,
}

impl SignUpForm {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_email(&self.email)?;
        if self.password.len() < 6 {
            return Err(ValidationError::InvalidFormat {
                field: "password".to_string(),
                reason: "must be at least 6 characters".to_string(),
            });
        }
        validate_name("business name", &self.business_name)?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_product_form() -> ProductForm {
        ProductForm {
            barcode: "7791234567890".to_string(),
            name: "Yerba Mate 1kg".to_string(),
            description: "Suave".to_string(),
            stock: 12,
            category: "Almacén".to_string(),
            branch: "Centro".to_string(),
            tax_rate_pct: 21.0,
            price_cost: 800.0,
            price_sale: 1500.0,
        }
    }

    #[test]
    fn test_validate_barcode() {
        assert!(validate_barcode("7791234567890").is_ok());
        assert!(validate_barcode("INT-0042").is_ok());
        assert!(validate_barcode("").is_err());
        assert!(validate_barcode("has space").is_err());
        assert!(validate_barcode(&"9".repeat(60)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("cliente@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@domain").is_err());
        assert!(validate_email("a b@domain").is_err());
    }

    #[test]
    fn test_validate_tax_rate_bounds() {
        assert!(validate_tax_rate(0.0).is_ok());
        assert!(validate_tax_rate(21.0).is_ok());
        assert!(validate_tax_rate(100.0).is_ok());
        assert!(validate_tax_rate(-1.0).is_err());
        assert!(validate_tax_rate(100.5).is_err());
    }

    #[test]
    fn test_product_form() {
        assert!(valid_product_form().validate().is_ok());

        let mut form = valid_product_form();
        form.stock = -1;
        assert!(form.validate().is_err());

        let mut form = valid_product_form();
        form.price_sale = -10.0;
        assert!(form.validate().is_err());

        let mut form = valid_product_form();
        form.name = String::new();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_product_form_price_with_tax() {
        let form = valid_product_form();
        assert!((form.price_with_tax() - 1815.0).abs() < 1e-9);
    }

    #[test]
    fn test_client_form_walk_in() {
        assert!(ClientForm::default().is_walk_in());
        assert!(ClientForm {
            name: "Ana".to_string(),
            email: String::new(),
        }
        .is_walk_in());
        assert!(!ClientForm {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
        }
        .is_walk_in());
    }

    #[test]
    fn test_sign_up_form() {
        let form = SignUpForm {
            email: "dueño@example.com".to_string(),
            password: "secreto".to_string(),
            business_name: "Almacén Basile".to_string(),
        };
        assert!(form.validate().is_ok());

        let mut short = form.clone();
        short.password = "abc".to_string();
        assert!(short.validate().is_err());
    }
}
