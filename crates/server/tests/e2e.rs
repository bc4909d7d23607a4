use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes;
use server::state::build_state;

fn cors() -> CorsLayer { CorsLayer::very_permissive() }

struct TestApp {
    base_url: String,
    store_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.store_path);
    }
}

async fn start_server(store: configs::StoreConfig) -> anyhow::Result<TestApp> {
    let store_path = store.path.clone();
    let state = build_state(&store).await?;

    let app: Router = routes::build_router(state, cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, store_path })
}

fn store_config() -> configs::StoreConfig {
    configs::StoreConfig {
        path: std::env::temp_dir().join(format!("catalog_e2e_{}.json", Uuid::new_v4())),
        ..configs::StoreConfig::default()
    }
}

fn leche() -> Value {
    json!({
        "title": "Leche",
        "description": "Leche entera",
        "price": 2.5,
        "thumbnail": "img1.jpg",
        "code": "001",
        "stock": 10
    })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server(store_config()).await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_leche_scenario() -> anyhow::Result<()> {
    let app = start_server(store_config()).await?;
    let c = reqwest::Client::new();

    // empty store lists nothing
    let res = c.get(format!("{}/products", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!([]));

    // insert -> id 1
    let res = c.post(format!("{}/products", app.base_url)).json(&leche()).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    assert_eq!(created["id"], 1);

    // duplicate code rejected
    let res = c.post(format!("{}/products", app.base_url)).json(&leche()).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert!(body["error"].as_str().unwrap_or_default().contains("001"));

    // GET /products/1 -> 200 with the record
    let res = c.get(format!("{}/products/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, created);

    // GET /products/99 -> 404 with the documented body
    let res = c.get(format!("{}/products/99", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(
        res.json::<Value>().await?,
        json!({ "error": "El producto con el id 99 no se ha encontrado" })
    );
    Ok(())
}

#[tokio::test]
async fn e2e_limit_and_unparsable_id() -> anyhow::Result<()> {
    let app = start_server(store_config()).await?;
    let c = reqwest::Client::new();

    for i in 1..=5 {
        let mut body = leche();
        body["code"] = json!(format!("00{i}"));
        let res = c.post(format!("{}/products", app.base_url)).json(&body).send().await?;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
    }

    let res = c.get(format!("{}/products/?limit=3", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let ids: Vec<u64> = res
        .json::<Vec<Value>>()
        .await?
        .iter()
        .filter_map(|p| p["id"].as_u64())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let res = c.get(format!("{}/products?limit=abc", app.base_url)).send().await?;
    assert_eq!(res.json::<Vec<Value>>().await?.len(), 0);

    let res = c.get(format!("{}/products?limit=", app.base_url)).send().await?;
    assert_eq!(res.json::<Vec<Value>>().await?.len(), 5);

    let res = c.get(format!("{}/products/abc", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(
        res.json::<Value>().await?["error"],
        "El producto con el id NaN no se ha encontrado"
    );

    // parseInt-style prefix: "2abc" resolves to product 2
    let res = c.get(format!("{}/products/2abc", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["id"], 2);
    Ok(())
}

#[tokio::test]
async fn e2e_update_and_delete() -> anyhow::Result<()> {
    let app = start_server(store_config()).await?;
    let c = reqwest::Client::new();
    c.post(format!("{}/products", app.base_url)).json(&leche()).send().await?;

    let res = c
        .put(format!("{}/products/1", app.base_url))
        .json(&json!({ "price": 40 }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<Value>().await?;
    assert_eq!(updated["price"], 40);
    assert_eq!(updated["title"], "Leche");
    assert_eq!(updated["code"], "001");

    let res = c
        .put(format!("{}/products/1", app.base_url))
        .json(&json!({ "stock": 0 }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c
        .put(format!("{}/products/1", app.base_url))
        .json(&json!({ "id": 5 }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c.delete(format!("{}/products/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({ "deleted": 1 }));

    let res = c.delete(format!("{}/products/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(
        res.json::<Value>().await?["error"],
        "El producto con el id 1 no se ha encontrado"
    );
    Ok(())
}

#[tokio::test]
async fn e2e_zero_stock_allowed_when_configured() -> anyhow::Result<()> {
    let store = configs::StoreConfig { reject_zero_numbers: false, ..store_config() };
    let app = start_server(store).await?;
    let mut body = leche();
    body["stock"] = json!(0);

    let res = reqwest::Client::new()
        .post(format!("{}/products", app.base_url))
        .json(&body)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    assert_eq!(res.json::<Value>().await?["stock"], 0);
    Ok(())
}

#[tokio::test]
async fn e2e_metrics_exposes_store_counters() -> anyhow::Result<()> {
    let app = start_server(store_config()).await?;
    reqwest::get(format!("{}/products", app.base_url)).await?;

    let res = reqwest::get(format!("{}/metrics", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.text().await?.contains("catalog_store_operations_total"));
    Ok(())
}
