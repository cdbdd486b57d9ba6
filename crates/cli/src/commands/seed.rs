//! Seed command: bootstrap the super-admin account and a sample catalog.
//!
//! The system is unbootstrappable without this (or `staff create`): user
//! management itself requires a super-admin token.

use rust_decimal::Decimal;

use bakehouse_api::db::ProductRepository;
use bakehouse_api::models::{NewProduct, Variant};
use bakehouse_api::services::{AuthError, AuthService};
use bakehouse_core::StaffRole;

/// Username of the seeded super-admin.
const ADMIN_USERNAME: &str = "admin";

/// Seed the initial super-admin and sample products.
///
/// Re-running is safe: an already-seeded admin is left untouched.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    let password = super::staff::generate_password();
    let auth = AuthService::new(&pool);
    match auth
        .create_user(ADMIN_USERNAME, &password, StaffRole::SuperAdmin)
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "super-admin created");
            #[allow(clippy::print_stdout)]
            {
                println!("Super-admin '{ADMIN_USERNAME}' created");
                println!("Generated password: {password}");
                println!("Store it now; it cannot be recovered.");
            }
        }
        Err(AuthError::DuplicateUsername) => {
            tracing::info!("super-admin already exists; skipping");
        }
        Err(e) => return Err(e.into()),
    }

    let products = ProductRepository::new(&pool);
    let existing = products.list().await?;
    if existing.is_empty() {
        for product in sample_catalog() {
            let created = products.create(&product).await?;
            tracing::info!(product_id = %created.id, title = %created.title, "product seeded");
        }
    } else {
        tracing::info!(count = existing.len(), "catalog already populated; skipping");
    }

    Ok(())
}

/// A handful of cakes to make a fresh environment browsable.
fn sample_catalog() -> Vec<NewProduct> {
    vec![
        NewProduct {
            title: "Chocolate Truffle".to_owned(),
            description: "Dark chocolate sponge layered with silky truffle ganache.".to_owned(),
            category: "Chocolate".to_owned(),
            image_url: "https://assets.bakehouse.example/cakes/chocolate-truffle.jpg".to_owned(),
            variants: vec![
                Variant {
                    weight: Decimal::new(5, 1),
                    price: Decimal::from(500),
                },
                Variant {
                    weight: Decimal::from(1),
                    price: Decimal::from(800),
                },
            ],
        },
        NewProduct {
            title: "Fresh Fruit Gateau".to_owned(),
            description: "Vanilla sponge with whipped cream and seasonal fruit.".to_owned(),
            category: "Fruit".to_owned(),
            image_url: "https://assets.bakehouse.example/cakes/fruit-gateau.jpg".to_owned(),
            variants: vec![
                Variant {
                    weight: Decimal::new(5, 1),
                    price: Decimal::from(450),
                },
                Variant {
                    weight: Decimal::from(1),
                    price: Decimal::from(750),
                },
            ],
        },
        NewProduct {
            title: "Red Velvet".to_owned(),
            description: "Classic red velvet with cream cheese frosting.".to_owned(),
            category: "Celebration".to_owned(),
            image_url: "https://assets.bakehouse.example/cakes/red-velvet.jpg".to_owned(),
            variants: vec![Variant {
                weight: Decimal::from(1),
                price: Decimal::from(900),
            }],
        },
    ]
}
