// gestio-client/examples/vente_flow.rs
// Minimal sale session against a running GestioStock backend

use gestio_client::{
    Cart, CatalogCache, CheckoutPipeline, ClientConfig, GestioApi, LineInput, SaleDraft,
};
use tokio::sync::Mutex;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:5000".to_string());

    let config = ClientConfig::new(&base_url)
        .with_timeout(10)
        .with_active_products_only(true);
    let api = GestioApi::new(config.build_backend()?);

    let catalog = CatalogCache::from_config(&config);
    let snapshot = catalog.reload(&api).await?;
    tracing::info!(products = snapshot.products().len(), "catalog loaded");

    let Some(product) = snapshot.sellable_products().next() else {
        tracing::warn!("no sellable product available, nothing to do");
        return Ok(());
    };
    tracing::info!(name = %product.name, stock = product.stock_on_hand, "selling one unit");

    let cart = Mutex::new(Cart::new());
    cart.lock()
        .await
        .add_or_merge(LineInput::sale(product, 1.0, 0.0), &snapshot)?;
    let totals = cart.lock().await.totals();
    tracing::info!(total = %totals.grand_total_rounded(), "cart ready");

    let pipeline = CheckoutPipeline::new();
    let sale_id = pipeline
        .submit_sale(&cart, &SaleDraft::default(), &catalog, &api)
        .await?;
    tracing::info!(sale_id, "sale recorded");

    Ok(())
}
