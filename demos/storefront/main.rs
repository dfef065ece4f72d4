//! Storefront walkthrough
//!
//! This example demonstrates:
//! - Loading configuration (from `MOTOMART_CONFIG` when set)
//! - Searching, browsing and grouping the seeded catalog
//! - Debounced live search
//! - Signing in and unlocking the listing flow
//! - Creating a listing and booking a test ride
//!
//! Run with `RUST_LOG=motomart=debug` to see the library's traces.

use motomart::prelude::*;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("motomart=info")),
        )
        .init();

    println!("🏍️  Motomart Storefront Example");
    println!("==============================\n");

    let config = match std::env::var("MOTOMART_CONFIG") {
        Ok(path) => StorefrontConfig::from_yaml_file(&path)?,
        Err(_) => StorefrontConfig::default(),
    };

    let catalog = Arc::new(Catalog::seeded()?);
    let events = EventBus::default();
    let mut storefront = Storefront::new(catalog.clone())
        .with_browse_config(config.browse.clone())
        .with_events(events.clone());
    println!("✅ Catalog seeded with {} vehicles\n", catalog.len());

    // Search
    let spec = QuerySpec::from_params("", "ev", "1l-2l");
    let results = storefront.search(spec).len();
    println!("🔎 {} results{}", results, storefront.filter_summary());

    // Browse, sorted and grouped
    let browse = storefront.browse(&QuerySpec::new(), SortKey::from_param("price-high-low"));
    println!("📋 {}", browse.summary());
    let grouped = storefront.browse_grouped(&QuerySpec::new(), Some(SortKey::PriceLowHigh));
    for (category, vehicles) in grouped {
        let cheapest = vehicles.first().map(|v| v.name.as_str()).unwrap_or("-");
        println!("   {}: {} (from {})", category.display_name(), vehicles.len(), cheapest);
    }

    // Wishlist
    storefront.toggle_wishlist("5")?;
    storefront.toggle_wishlist("2")?;
    let wishlist: Vec<&str> = storefront.wishlist().iter().map(|v| v.name.as_str()).collect();
    println!("\n❤️  Wishlist: {}", wishlist.join(", "));

    // Live search: only the last keystroke of a burst is applied
    let live = LiveSearch::new(catalog.clone(), config.debounce()).with_events(events.clone());
    let mut outcomes = live.subscribe();
    for text in ["k", "kt", "ktm"] {
        live.input(QuerySpec::new().with_text(text));
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    outcomes.changed().await?;
    let outcome = outcomes.borrow_and_update().clone();
    println!(
        "\n⌨️  Live search{}: {:?}",
        outcome.summary,
        outcome.vehicles.iter().map(|v| &v.name).collect::<Vec<_>>()
    );

    // Identity and the seller gate
    let identity = MockIdentityProvider::new();
    let user = identity.sign_in("rider@example.com", "demo-password").await?;
    let gate = Arc::new(SellerGate::new(config.seller.clone()).with_events(events.clone()));
    let gate_watch = gate.clone().watch_session(identity.subscribe());
    gate.authorize(Some(&user), "", "")?;
    println!("\n🔐 Signed in as {}, seller access: {}", user.email, gate.is_authorized());

    // Local storage
    let store: Arc<dyn LocalStore> = match &config.storage.dir {
        Some(dir) => Arc::new(FileLocalStore::new(dir)),
        None => Arc::new(InMemoryLocalStore::new()),
    };

    // Listings
    gate.require()?;
    let listings = ListingBook::open(store.clone(), &config.listings)?.with_events(events.clone());
    let listing = listings.create(&ListingDraft {
        name: "Pulsar 150".to_string(),
        brand: "Bajaj".to_string(),
        price: "65000".to_string(),
        year: "2019".to_string(),
        ..Default::default()
    })?;
    let stats = listings.stats();
    println!(
        "\n🏷️  Listed {} ({} listings, average price ₹{:.0})",
        listing.name, stats.count, stats.average_price
    );

    // Bookings
    let bookings = BookingBook::open(catalog.clone(), store.clone(), &config.bookings)?
        .with_events(events.clone());
    let tomorrow = Utc::now().date_naive().succ_opt().unwrap_or_else(|| Utc::now().date_naive());
    let booking = bookings.book(&BookingRequest {
        name: "Asha Rao".to_string(),
        phone: "+91 98765 43210".to_string(),
        email: user.email.clone(),
        vehicle_id: "9".to_string(),
        date: Some(tomorrow),
        time: "10:00 AM".to_string(),
    })?;
    println!(
        "\n📅 Test ride booked: {} on {} at {}",
        booking.vehicle.name, booking.date, booking.time
    );
    println!(
        "   Still free that day: {}",
        bookings.available_slots("9", tomorrow).join(", ")
    );
    let similar: Vec<String> = bookings.suggest_similar("9").into_iter().map(|v| v.name).collect();
    println!("   Similar vehicles: {}", similar.join(", "));

    // Signing out revokes seller access
    identity.sign_out().await?;
    tokio::time::sleep(Duration::from_millis(10)).await;
    println!("\n👋 Signed out, seller access: {}", gate.is_authorized());
    gate_watch.abort();

    Ok(())
}
