//! # Params Sample
//!
//! Walks through a valid and an invalid [`ContactParams`]: binding, validation,
//! accessors and the values report.
//!
//! ```bash
//! RUST_LOG=debug cargo run -p params-sample
//! ```

use params_sample::model::ContactParams;
use plain_params::tracing::setup_tracing;
use plain_params::{fields, ParamsError, Value};
use tracing::{info, warn};

fn main() -> Result<(), ParamsError> {
    setup_tracing();

    info!("Starting contact params walkthrough");

    println!("=== Valid Contact ===");
    let mut contact = ContactParams::new(fields! {
        name: "Alice Smith",
        email: "alice@example.com",
        phone: "11987654321",
    })?;

    if contact.is_valid() {
        println!("Name: {}", show(&contact.name()));
        println!("Email: {}", show(&contact.email()));
        println!("Phone: {}", show(&contact.phone()));
        println!("Formatted Phone: {}", show(&contact.formatted_phone()));
        println!("Email Domain: {}", show(&contact.email_domain()));
        println!("\nAll values:");
        println!("{}", contact.to_json());
    } else {
        println!("Errors: {}", contact.errors());
    }

    println!("\n=== Invalid Contact ===");
    let mut invalid_contact = ContactParams::new(fields! {
        name: "Bob",
        email: "invalid-email",
        phone: "123",
    })?;

    if invalid_contact.is_valid() {
        println!("Valid!");
    } else {
        warn!(failures = invalid_contact.errors().len(), "Contact rejected");
        println!("Errors: {}", invalid_contact.errors());
    }

    println!("\n=== Unknown Field ===");
    match ContactParams::new(fields! { name: "Carol", fax: "555" }) {
        Ok(_) => println!("Accepted"),
        Err(e) => println!("Rejected: {}", e),
    }

    info!("Walkthrough completed");
    Ok(())
}

/// Strings print bare, everything else as JSON.
fn show(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
