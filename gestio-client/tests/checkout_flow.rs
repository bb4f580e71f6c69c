// gestio-client/tests/checkout_flow.rs
// End-to-end submission pipeline against an in-memory backend

mod support;

use gestio_client::{
    Cart, CatalogCache, CheckoutError, CheckoutPipeline, CheckoutState, GestioApi, LineInput,
    PurchaseDraft, SaleDraft,
};
use serde_json::json;
use shared::models::{PurchaseOrderStatus, SaleStatus};
use std::time::Duration;
use support::{MockBackend, product_json};
use tokio::sync::Mutex;

fn api() -> GestioApi<MockBackend> {
    GestioApi::new(MockBackend::new())
}

async fn loaded_cache(api: &GestioApi<MockBackend>) -> CatalogCache {
    let cache = CatalogCache::new();
    cache.reload(api).await.unwrap();
    cache
}

fn sale_line(product_id: i64, quantity: f64, price: f64, discount: f64) -> LineInput {
    LineInput {
        product_id,
        product_name: format!("Produit {product_id}"),
        quantity,
        unit_price: price,
        discount_percent: discount,
    }
}

fn created_sale(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "numero_facture": format!("FAC202608-{id:05}"),
        "statut": "confirmée"
    })
}

#[tokio::test]
async fn empty_cart_is_rejected_before_any_network_call() {
    let api = api();
    api.backend()
        .seed_catalog(json!([]), json!([]), json!([]));
    let catalog = loaded_cache(&api).await;
    let gets_after_load = api.backend().get_count();

    let cart = Mutex::new(Cart::new());
    let pipeline = CheckoutPipeline::new();
    let result = pipeline
        .submit_sale(&cart, &SaleDraft::default(), &catalog, &api)
        .await;

    assert_eq!(result, Err(CheckoutError::EmptyCart));
    assert!(api.backend().posts().is_empty());
    assert_eq!(api.backend().get_count(), gets_after_load);
    assert_eq!(pipeline.state(), CheckoutState::Idle);
}

#[tokio::test]
async fn successful_sale_posts_once_clears_cart_and_reloads() {
    let api = api();
    api.backend().seed_catalog(
        json!([product_json(1, "Riz", 1000.0, 10)]),
        json!([]),
        json!([]),
    );
    let catalog = loaded_cache(&api).await;

    let cart = Mutex::new(Cart::new());
    cart.lock()
        .await
        .add_or_merge(sale_line(1, 3.0, 1000.0, 10.0), &catalog.snapshot())
        .unwrap();

    // The backend will report the decremented stock on the post-submit reload
    api.backend()
        .set_get("api/produits", json!([product_json(1, "Riz", 1000.0, 7)]));
    api.backend().set_post("api/ventes", created_sale(55));

    let pipeline = CheckoutPipeline::new();
    let id = pipeline
        .submit_sale(&cart, &SaleDraft::default(), &catalog, &api)
        .await
        .unwrap();

    assert_eq!(id, 55);
    assert!(cart.lock().await.is_empty());
    assert_eq!(catalog.snapshot().product(1).unwrap().stock_on_hand, 7);

    let posts = api.backend().posts();
    assert_eq!(posts.len(), 1);
    let (path, body) = &posts[0];
    assert_eq!(path, "api/ventes");
    assert_eq!(body["mode_paiement"], "espèces");
    assert_eq!(body["devise"], "XOF");
    assert_eq!(body["items"][0]["produit_id"], 1);
    assert_eq!(body["items"][0]["quantite"], 3);
    assert_eq!(body["items"][0]["prix_unitaire"], 1000.0);
    assert_eq!(body["items"][0]["remise"], 10.0);
}

#[tokio::test]
async fn rejected_sale_keeps_cart_for_retry() {
    let api = api();
    api.backend().seed_catalog(
        json!([product_json(1, "Riz", 1000.0, 10)]),
        json!([]),
        json!([]),
    );
    let catalog = loaded_cache(&api).await;

    let cart = Mutex::new(Cart::new());
    cart.lock()
        .await
        .add_or_merge(sale_line(1, 2.0, 1000.0, 0.0), &catalog.snapshot())
        .unwrap();

    api.backend()
        .fail_post("api/ventes", 400, "Stock insuffisant");

    let pipeline = CheckoutPipeline::new();
    let result = pipeline
        .submit_sale(&cart, &SaleDraft::default(), &catalog, &api)
        .await;

    // Server wording is surfaced verbatim
    assert_eq!(
        result,
        Err(CheckoutError::SubmissionRejected(
            "Stock insuffisant".to_string()
        ))
    );
    assert_eq!(cart.lock().await.len(), 1);
    assert_eq!(pipeline.state(), CheckoutState::Idle);
}

#[tokio::test]
async fn timeout_is_surfaced_as_rejection() {
    let api = api();
    api.backend().seed_catalog(
        json!([product_json(1, "Riz", 1000.0, 10)]),
        json!([]),
        json!([]),
    );
    let catalog = loaded_cache(&api).await;

    let cart = Mutex::new(Cart::new());
    cart.lock()
        .await
        .add_or_merge(sale_line(1, 1.0, 1000.0, 0.0), &catalog.snapshot())
        .unwrap();
    api.backend().time_out_posts();

    let pipeline = CheckoutPipeline::new();
    let result = pipeline
        .submit_sale(&cart, &SaleDraft::default(), &catalog, &api)
        .await;

    assert_eq!(
        result,
        Err(CheckoutError::SubmissionRejected(
            "request timed out".to_string()
        ))
    );
    assert_eq!(cart.lock().await.len(), 1);
}

#[tokio::test]
async fn stale_stock_blocks_submission_after_reload() {
    let api = api();
    api.backend().seed_catalog(
        json!([product_json(5, "Sucre", 500.0, 5)]),
        json!([]),
        json!([]),
    );
    let catalog = loaded_cache(&api).await;

    let cart = Mutex::new(Cart::new());
    cart.lock()
        .await
        .add_or_merge(sale_line(5, 2.0, 500.0, 0.0), &catalog.snapshot())
        .unwrap();

    // Stock drops to 1 behind our back
    api.backend()
        .set_get("api/produits", json!([product_json(5, "Sucre", 500.0, 1)]));
    catalog.reload(&api).await.unwrap();

    let pipeline = CheckoutPipeline::new();
    let result = pipeline
        .submit_sale(&cart, &SaleDraft::default(), &catalog, &api)
        .await;

    assert_eq!(
        result,
        Err(CheckoutError::StockInsufficient {
            product_id: 5,
            requested: 2,
            available: 1
        })
    );
    assert!(api.backend().posts().is_empty());
}

#[tokio::test]
async fn purchase_order_requires_supplier_then_posts() {
    let api = api();
    api.backend().seed_catalog(
        json!([product_json(1, "Riz", 1000.0, 2)]),
        json!([]),
        json!([{"id": 7, "nom": "SODICA"}]),
    );
    let catalog = loaded_cache(&api).await;

    // Replenishment carts may exceed current stock
    let cart = Mutex::new(Cart::replenishment());
    cart.lock()
        .await
        .add_or_merge(sale_line(1, 50.0, 800.0, 0.0), &catalog.snapshot())
        .unwrap();

    let pipeline = CheckoutPipeline::new();
    let missing = pipeline
        .submit_purchase(&cart, &PurchaseDraft::default(), &catalog, &api)
        .await;
    assert_eq!(
        missing,
        Err(CheckoutError::MissingRequiredField("fournisseur_id"))
    );
    assert!(api.backend().posts().is_empty());

    api.backend().set_post(
        "api/commandes",
        json!({"id": 9, "numero_commande": "CMD202608-00009", "statut": "en_attente"}),
    );
    let draft = PurchaseDraft {
        supplier_id: Some(7),
        ..Default::default()
    };
    let id = pipeline
        .submit_purchase(&cart, &draft, &catalog, &api)
        .await
        .unwrap();

    assert_eq!(id, 9);
    assert!(cart.lock().await.is_empty());
    let posts = api.backend().posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].0, "api/commandes");
    assert_eq!(posts[0].1["fournisseur_id"], 7);
    assert_eq!(posts[0].1["items"][0]["quantite"], 50);
}

#[tokio::test]
async fn state_is_submitting_while_the_post_is_in_flight() {
    let api = api();
    api.backend().seed_catalog(
        json!([product_json(1, "Riz", 1000.0, 10)]),
        json!([]),
        json!([]),
    );
    let catalog = loaded_cache(&api).await;

    let cart = Mutex::new(Cart::new());
    cart.lock()
        .await
        .add_or_merge(sale_line(1, 1.0, 1000.0, 0.0), &catalog.snapshot())
        .unwrap();

    api.backend().delay_posts(Duration::from_millis(50));
    api.backend().set_post("api/ventes", created_sale(60));

    let pipeline = CheckoutPipeline::new();
    let draft = SaleDraft::default();
    let (result, observed) = tokio::join!(
        pipeline.submit_sale(&cart, &draft, &catalog, &api),
        async {
            // Sample the state while the delayed POST is still pending
            tokio::time::sleep(Duration::from_millis(10)).await;
            pipeline.state()
        },
    );

    assert_eq!(observed, CheckoutState::Submitting);
    assert_eq!(result.unwrap(), 60);
    assert_eq!(pipeline.state(), CheckoutState::Idle);
}

#[tokio::test]
async fn newer_submission_supersedes_the_in_flight_one() {
    let api = api();
    api.backend().seed_catalog(
        json!([product_json(1, "Riz", 1000.0, 10)]),
        json!([]),
        json!([]),
    );
    let catalog = loaded_cache(&api).await;

    let cart = Mutex::new(Cart::new());
    cart.lock()
        .await
        .add_or_merge(sale_line(1, 2.0, 1000.0, 0.0), &catalog.snapshot())
        .unwrap();

    api.backend().delay_posts(Duration::from_millis(20));
    api.backend().set_post("api/ventes", created_sale(70));

    let pipeline = CheckoutPipeline::new();
    let draft = SaleDraft::default();
    let (first, second) = tokio::join!(
        pipeline.submit_sale(&cart, &draft, &catalog, &api),
        pipeline.submit_sale(&cart, &draft, &catalog, &api),
    );

    // Exactly one attempt wins; the other's response is discarded
    assert_eq!(first, Err(CheckoutError::Superseded));
    assert_eq!(second.unwrap(), 70);
    assert!(cart.lock().await.is_empty());
    assert_eq!(pipeline.state(), CheckoutState::Idle);
}

#[tokio::test]
async fn sale_listing_passes_wire_filters() {
    let api = api();
    api.backend().set_get(
        "api/ventes?client_id=9&statut=confirmée",
        json!([{"id": 12, "numero_facture": "FAC202608-00012", "statut": "confirmée"}]),
    );

    let filter = gestio_client::SaleFilter {
        client_id: Some(9),
        status: Some(SaleStatus::Confirmed),
        ..Default::default()
    };
    let sales = api.list_sales(&filter).await.unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].invoice_number, "FAC202608-00012");
}

#[tokio::test]
async fn status_transition_endpoints_hit_expected_paths() {
    let api = api();
    api.backend().set_post(
        "api/commandes/4/recevoir",
        json!({"id": 4, "numero_commande": "CMD202608-00004", "statut": "reçue"}),
    );
    api.backend().set_post(
        "api/ventes/12/annuler",
        json!({"id": 12, "numero_facture": "FAC202608-00012", "statut": "annulée"}),
    );

    let order = api.receive_purchase_order(4).await.unwrap();
    assert_eq!(order.status, PurchaseOrderStatus::Received);

    let sale = api.cancel_sale(12).await.unwrap();
    assert_eq!(sale.status, SaleStatus::Cancelled);

    let paths: Vec<String> = api.backend().posts().into_iter().map(|(p, _)| p).collect();
    assert_eq!(paths, vec!["api/commandes/4/recevoir", "api/ventes/12/annuler"]);
}
