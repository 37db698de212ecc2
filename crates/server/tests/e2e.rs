use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use uuid::Uuid;

use server::routes;
use server::startup::{build_cors, build_state};

struct TestApp {
    base_url: String,
}

// Real MySQL behind a real socket; skipped when no database is reachable.
async fn start_server() -> anyhow::Result<TestApp> {
    std::env::set_var("CONFIG_PATH", "/nonexistent-config-for-tests.toml");
    let cfg = AppConfig::load_and_validate()?;

    let db = models::db::connect(&cfg.database).await?;
    db.ping().await?;
    migration::Migrator::up(&db, None).await?;

    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_usuario_lifecycle() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let app = match start_server().await {
        Ok(a) => a,
        Err(e) => {
            eprintln!("skip e2e: {}", e);
            return Ok(());
        }
    };
    let c = reqwest::Client::new();
    let id = format!("E2E-{}", Uuid::new_v4().simple());
    let url = format!("{}/api/usuarios/{}", app.base_url, id);

    let res = c.post(format!("{}/api/usuarios", app.base_url))
        .json(&json!({"id_expediente": id, "nombre": "Ana", "area": "Ventas"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = c.post(format!("{}/api/usuarios", app.base_url))
        .json(&json!({"id_expediente": id, "nombre": "Ana", "area": "Ventas"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Error al insertar el usuario.");
    assert!(body["detalle"].as_str().unwrap_or_default().contains("Duplicate entry"));

    let body = c.get(&url).send().await?.json::<serde_json::Value>().await?;
    assert_eq!(body["nombre"], "Ana");
    assert!(body["created_at"].is_string());

    let res = c.patch(&url).json(&json!({"area": "Compras"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = c.get(&url).send().await?.json::<serde_json::Value>().await?;
    assert_eq!(body["nombre"], "Ana");
    assert_eq!(body["area"], "Compras");

    // Same values again: the row still matches.
    let res = c.patch(&url).json(&json!({"area": "Compras"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.patch(format!("{}/api/usuarios/E2E-missing-{}", app.base_url, Uuid::new_v4().simple()))
        .json(&json!({"area": "Compras"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.delete(&url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = c.delete(&url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = c.get(&url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}
