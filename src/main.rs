//! Green Basket storefront snapshot
//!
//! Small console front: loads the configured backend's catalog and the
//! signed-in user's cart and order history, and prints a summary.

use std::sync::Arc;

use anyhow::Result;
use greenbasket::domain::aggregates::order::Timeline;
use greenbasket::domain::value_objects::Money;
use greenbasket::{Catalog, CartStore, HttpApi, OrdersStore, StorefrontConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StorefrontConfig::from_env()?;
    tracing::info!(base_url = %config.api_base_url, "greenbasket storefront starting");
    let api = Arc::new(HttpApi::new(&config.api_base_url));

    let mut catalog = Catalog::new(api.clone());
    catalog.load().await?;
    println!("Catalog ({} products)", catalog.products().len());
    for product in catalog.products() {
        println!(
            "  {:<30} ₹{:<10.2} {:<12} {}",
            product.name,
            product.price,
            product.kind,
            if product.is_available() {
                "In Stock"
            } else {
                "Out of Stock"
            }
        );
    }

    let mut cart = CartStore::new(
        api.clone(),
        &config.user_id,
        Money::new(config.delivery_fee, &config.currency),
    );
    cart.load().await?;
    let totals = cart.totals();
    println!(
        "\nCart: {} items, subtotal {}, delivery {}, total {}",
        cart.items().len(),
        totals.subtotal,
        totals.delivery_fee,
        totals.total
    );

    let mut orders = OrdersStore::new(api);
    orders.load().await?;
    println!("\nOrders ({})", orders.orders().len());
    for order in orders.orders() {
        println!(
            "  #{:<12} {:<22} ₹{:.2}",
            &order.id[..order.id.len().min(10)],
            order.status().label(),
            order.total_amount
        );
        if let Timeline::Terminal { description, .. } = order.timeline() {
            println!("    {description}");
        }
    }

    Ok(())
}
