//! Demo session against the in-process stores: stock a few products, sell, restock,
//! take a return and print the receipt.

use chrono::Local;
use pos_core::config::PosConfig;
use pos_core::lifecycle::{setup_tracing, PosSystem};
use pos_core::model::{BrandCreate, CategoryCreate, Operator, ProductDraft};
use pos_core::terminal::Terminal;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let config = PosConfig::from_env()?;
    setup_tracing(config.log_format);

    info!(store = %config.store_name, "Starting POS demo");
    let system = PosSystem::from_config(&config);
    let today = Local::now().date_naive();

    {
        let operator = Operator::new("admin-1", "admin@friendsitzone.test");
        let mut terminal = Terminal::new(system.backend(), &config, operator);
        terminal.open(today).await?;

        let catalog = terminal.catalog_mut();
        catalog
            .add_brand(BrandCreate {
                name: "GoPro".into(),
                logo: None,
            })
            .await?;
        catalog
            .add_category(CategoryCreate {
                name: "Cameras".into(),
                description: Some("Action and compact cameras".into()),
            })
            .await?;

        let camera_id = catalog.next_unique_id("cam-1001");
        let camera = catalog
            .add_product(ProductDraft {
                brand: Some("GoPro".into()),
                category: "Cameras".into(),
                ..ProductDraft::new("Action Camera", "cam-1001", camera_id, 250.0, 5)
            })
            .await?;
        let tripod_id = catalog.next_unique_id("TRI-200");
        let tripod = catalog
            .add_product(ProductDraft::new("Tripod", "TRI-200", tripod_id, 40.0, 10))
            .await?;
        info!(registry = catalog.registry().len(), "Catalog stocked");

        let span = tracing::info_span!("sale");
        let receipt = async {
            terminal.add_to_sale(camera.id, 2)?;
            terminal.add_to_sale(tripod.id, 1)?;
            terminal.checkout_sale(today).await
        }
        .instrument(span)
        .await?;
        println!("{receipt}");

        terminal.add_to_purchase(tripod.id, 5, Some(28.0))?;
        let report = terminal.complete_purchase(today).await?;
        info!(%report, "Purchase done");

        terminal.add_to_return(camera.id, 1, Some("Dead pixel".into()))?;
        match terminal.complete_return(today).await {
            Ok(report) => info!(%report, "Return done"),
            Err(e) => error!(error = %e, "Return failed"),
        }

        if let Some((record, status)) = terminal.warranty_lookup(&camera.unique_id, today) {
            info!(
                unique_id = %record.entry.sale.product.unique_id,
                until = %record.entry.warranty_end_date,
                ?status,
                "Warranty lookup"
            );
        }

        let totals = terminal.today_totals(today).await?;
        info!(
            sales = totals.sales,
            units = totals.units,
            revenue = totals.revenue,
            "Today's totals"
        );
    }

    system.shutdown().await?;
    info!("POS demo finished");
    Ok(())
}
