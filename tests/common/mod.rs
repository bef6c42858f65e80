use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

// Drop never runs for a value parked in a static OnceLock, so the spawned
// server is not killed here; it exits with the test binary. The database
// file is keyed to the test binary name and replaced on the next run.
static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub base_url: String,
    _child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Each test binary gets its own throwaway database file; removing it
        // up front also cleans up after the previous run
        let exe_stem = std::env::current_exe()
            .ok()
            .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "shared".to_string());
        let db_path = std::env::temp_dir().join(format!("atende-test-{}.db", exe_stem));
        let _ = std::fs::remove_file(&db_path);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_atende-api"));
        cmd.env("ATENDE_PORT", port.to_string())
            .env("ATENDE_DATABASE_PATH", &db_path)
            .env("ATENDE_JWT_SECRET", "segredo-de-teste")
            // Minimum bcrypt cost keeps the suite fast
            .env("ATENDE_BCRYPT_COST", "4")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            base_url,
            _child: child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Unique username per test so tests within one binary don't collide.
pub fn unique_username(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

/// Register a fresh user and return its bearer token.
pub async fn register_user(
    client: &reqwest::Client,
    base_url: &str,
    username: &str,
) -> Result<String> {
    let res = client
        .post(format!("{}/auth/cadastro", base_url))
        .json(&json!({
            "username": username,
            "nome": "Profissional de Teste",
            "senha": "senha123",
            "pergunta_seguranca": "Nome do primeiro animal de estimação?",
            "resposta_seguranca": "Rex"
        }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "cadastro failed: {}",
        res.status()
    );

    let body = res.json::<Value>().await?;
    let token = body["access_token"]
        .as_str()
        .context("missing access_token")?
        .to_string();
    Ok(token)
}

/// Create a client for the given token and return the response body.
pub async fn create_cliente(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    nome_completo: &str,
    data_nascimento: &str,
) -> Result<Value> {
    let res = client
        .post(format!("{}/clientes/", base_url))
        .bearer_auth(token)
        .json(&json!({
            "nome_completo": nome_completo,
            "email": Value::Null,
            "telefone": "11999990000",
            "data_nascimento": data_nascimento,
            "endereco": "Rua das Flores, 1"
        }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "criação de cliente failed: {}",
        res.status()
    );
    Ok(res.json::<Value>().await?)
}
