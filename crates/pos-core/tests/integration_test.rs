use chrono::NaiveDate;
use pos_core::backend::InventoryBackend;
use pos_core::cart::CartError;
use pos_core::catalog::CatalogError;
use pos_core::config::PosConfig;
use pos_core::lifecycle::PosSystem;
use pos_core::model::{BrandCreate, Operator, ProductDraft, ProductUpdate};
use pos_core::terminal::{Terminal, TerminalError};
use pos_core::transaction::TransactionState;
use pos_core::warranty::WarrantyStatus;

// End-to-end: every store runs as a real actor.

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn operator() -> Operator {
    Operator::new("u1", "cashier@friendsitzone.test")
}

#[tokio::test]
async fn test_catalog_keeps_unique_ids_unique() {
    let config = PosConfig::default();
    let system = PosSystem::from_config(&config);
    let mut terminal = Terminal::new(system.backend(), &config, operator());
    terminal.open(day(2025, 1, 15)).await.unwrap();
    assert!(terminal.catalog().registry().is_initialized());

    let catalog = terminal.catalog_mut();
    let first_id = catalog.next_unique_id("ssd-500");
    assert_eq!(first_id, "SSD-500-0001");
    let first = catalog
        .add_product(ProductDraft::new("SSD 500GB", "ssd-500", first_id, 60.0, 3))
        .await
        .unwrap();
    assert_eq!(first.common_id, "SSD-500");

    let second_id = catalog.next_unique_id("SSD-500");
    assert_eq!(second_id, "SSD-500-0002");
    let second = catalog
        .add_product(ProductDraft::new("SSD 500GB", "SSD-500", second_id, 60.0, 2))
        .await
        .unwrap();

    // Same unit id again, lower-cased: normalized, then rejected before any write.
    let duplicate = catalog
        .add_product(ProductDraft::new("SSD 500GB", "SSD-500", "ssd-500-0001", 60.0, 1))
        .await;
    match duplicate {
        Err(CatalogError::InvalidId(validation)) => assert!(validation.is_duplicate),
        other => panic!("expected duplicate rejection, got {other:?}"),
    }
    assert_eq!(system.backend().list_products().await.unwrap().len(), 2);
    assert_eq!(catalog.units_of("ssd-500").len(), 2);

    // Keeping its own id is not a duplicate.
    let renamed = catalog
        .edit_product(
            first.id,
            ProductUpdate {
                name: Some("SSD 500GB NVMe".into()),
                unique_id: Some(first.unique_id.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "SSD 500GB NVMe");

    // Taking the other unit's id is.
    let clash = catalog
        .edit_product(
            first.id,
            ProductUpdate {
                unique_id: Some(second.unique_id.clone()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(clash, Err(CatalogError::InvalidId(_))));

    let moved = catalog
        .edit_product(
            first.id,
            ProductUpdate {
                unique_id: Some("ssd-500-0100".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.unique_id, "SSD-500-0100");
    assert!(!catalog.registry().is_used("SSD-500-0001"));
    assert!(catalog.registry().is_used("SSD-500-0100"));
    assert_eq!(catalog.next_unique_id("SSD-500"), "SSD-500-0101");

    // Both sides are normalized, so a lower-cased current id still excludes itself.
    assert!(catalog
        .validate_unique_id(" ssd-500-0100", Some("ssd-500-0100 "))
        .is_valid);
    assert!(catalog.validate_unique_id("ssd-500-0100", None).is_duplicate);
    assert!(catalog.validate_common_id(" ssd-500 ").is_valid);

    catalog.delete_product(second.id).await.unwrap();
    assert!(!catalog.registry().is_used("SSD-500-0002"));
    assert!(catalog.product(second.id).is_none());
    assert_eq!(catalog.registry().len(), 1);

    drop(terminal);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_sale_purchase_return_round_trip() {
    let config = PosConfig::default();
    let system = PosSystem::from_config(&config);
    let backend = system.backend();
    let today = day(2025, 1, 15);

    let mut terminal = Terminal::new(backend.clone(), &config, operator());
    terminal.open(today).await.unwrap();

    let catalog = terminal.catalog_mut();
    catalog
        .add_brand(BrandCreate {
            name: "GoPro".into(),
            logo: None,
        })
        .await
        .unwrap();
    assert_eq!(catalog.brands().await.unwrap().len(), 1);

    let camera = catalog
        .add_product(ProductDraft {
            brand: Some("GoPro".into()),
            ..ProductDraft::new("Action Camera", "CAM-1001", "CAM-1001-0001", 250.0, 5)
        })
        .await
        .unwrap();
    let tripod = catalog
        .add_product(ProductDraft::new("Tripod", "TRI-200", "TRI-200-0001", 40.0, 10))
        .await
        .unwrap();

    // Cart caps quantity at the loaded stock.
    let too_many = terminal.add_to_sale(camera.id, 6);
    assert!(matches!(
        too_many,
        Err(TerminalError::Cart(CartError::ExceedsStock { available: 5, .. }))
    ));

    terminal.add_to_sale(camera.id, 2).unwrap();
    terminal.add_to_sale(tripod.id, 1).unwrap();
    let receipt = terminal.checkout_sale(today).await.unwrap();

    assert_eq!(receipt.receipt_number, "20250115-0001");
    assert_eq!(receipt.store_name, "FRIENDS IT ZONE");
    assert_eq!(receipt.grand_total, 540.0);
    assert_eq!(receipt.units(), 3);
    assert!(receipt
        .lines
        .iter()
        .all(|line| line.warranty_end_date == day(2026, 1, 15)));
    assert!(receipt.to_string().contains("CAM-1001-0001"));

    assert!(terminal.sale_cart().is_empty());
    assert_eq!(terminal.coordinator().state(), TransactionState::Committed);
    assert_eq!(terminal.catalog().product(camera.id).unwrap().stock, 3);
    assert_eq!(terminal.catalog().product(tripod.id).unwrap().stock, 9);
    assert_eq!(backend.list_warranty_sales().await.unwrap().len(), 2);
    assert_eq!(backend.list_sales().await.unwrap().len(), 2);

    let totals = terminal.cached_totals().unwrap();
    assert_eq!((totals.sales, totals.units, totals.revenue), (2, 3, 540.0));
    let tomorrow = terminal.today_totals(day(2025, 1, 16)).await.unwrap();
    assert_eq!(tomorrow.sales, 0);

    let (record, status) = terminal
        .warranty_lookup("cam-1001-0001", day(2025, 6, 1))
        .unwrap();
    assert_eq!(record.entry.sale.quantity, 2);
    assert!(status.is_active());
    let (_, later) = terminal
        .warranty_lookup("CAM-1001-0001", day(2026, 1, 20))
        .unwrap();
    assert_eq!(later, WarrantyStatus::Expired { days_since: 5 });
    assert!(terminal.warranty_lookup("NOPE-0001", today).is_none());

    // Restock the tripod at cost.
    terminal.add_to_purchase(tripod.id, 5, Some(28.0)).unwrap();
    let purchase = terminal.complete_purchase(today).await.unwrap();
    assert!(purchase.is_committed());
    assert_eq!(terminal.catalog().product(tripod.id).unwrap().stock, 14);
    let purchases = backend.list_purchases().await.unwrap();
    assert_eq!(purchases[0].entry.total_cost, 140.0);

    // Return one camera.
    terminal
        .add_to_return(camera.id, 1, Some("Dead pixel".into()))
        .unwrap();
    let returned = terminal.complete_return(today).await.unwrap();
    assert!(returned.is_committed());
    assert_eq!(terminal.catalog().product(camera.id).unwrap().stock, 4);
    let returns = backend.list_returns().await.unwrap();
    assert_eq!(returns[0].entry.refund_amount, 250.0);
    assert_eq!(returns[0].entry.reason.as_deref(), Some("Dead pixel"));

    // Clearing the logs leaves stock alone.
    terminal.clear_transactions().await.unwrap();
    assert!(backend.list_warranty_sales().await.unwrap().is_empty());
    assert!(backend.list_purchases().await.unwrap().is_empty());
    assert!(terminal.warranty_lookup("CAM-1001-0001", today).is_none());
    assert_eq!(terminal.cached_totals().unwrap().sales, 0);
    let stock: Vec<u32> = backend
        .list_products()
        .await
        .unwrap()
        .iter()
        .map(|p| p.stock)
        .collect();
    assert_eq!(stock, vec![4, 14]);

    drop(terminal);
    drop(backend);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_empty_checkout_is_rejected() {
    let config = PosConfig::default();
    let system = PosSystem::new(8);
    let mut terminal = Terminal::new(system.backend(), &config, operator());
    terminal.open(day(2025, 1, 15)).await.unwrap();

    let result = terminal.checkout_sale(day(2025, 1, 15)).await;
    assert!(matches!(result, Err(TerminalError::Transaction(_))));
    assert_eq!(terminal.coordinator().state(), TransactionState::Idle);

    drop(terminal);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_back_to_back_transactions_on_one_terminal() {
    let config = PosConfig::default();
    let system = PosSystem::from_config(&config);
    let backend = system.backend();
    let today = day(2025, 1, 15);

    let mut terminal = Terminal::new(backend.clone(), &config, operator());
    terminal.open(today).await.unwrap();
    let drive = terminal
        .catalog_mut()
        .add_product(ProductDraft::new("SSD 1TB", "SSD-1000", "SSD-1000-0001", 90.0, 5))
        .await
        .unwrap();

    // Three carts open at once.
    terminal.add_to_sale(drive.id, 1).unwrap();
    terminal.add_to_purchase(drive.id, 10, None).unwrap();
    terminal.add_to_return(drive.id, 2, None).unwrap();

    terminal.complete_purchase(today).await.unwrap();
    assert_eq!(terminal.catalog().product(drive.id).unwrap().stock, 15);
    // The open carts now see the restocked level.
    assert_eq!(terminal.sale_cart().lines()[0].product.stock, 15);
    assert_eq!(terminal.return_cart().lines()[0].product.stock, 15);

    // The sale cap follows the reload too.
    terminal.add_to_sale(drive.id, 7).unwrap();
    let receipt = terminal.checkout_sale(today).await.unwrap();
    assert_eq!(receipt.units(), 8);
    assert_eq!(terminal.catalog().product(drive.id).unwrap().stock, 7);

    terminal.complete_return(today).await.unwrap();
    assert_eq!(terminal.catalog().product(drive.id).unwrap().stock, 9);

    let stored = backend.list_products().await.unwrap();
    assert_eq!(stored[0].stock, 9);
    assert!(!terminal.is_stale());

    drop(terminal);
    drop(backend);
    system.shutdown().await.unwrap();
}
