use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::DatabaseConfig;

pub mod models;

/// Open the pooled SQLite database, creating the file on first start.
/// Connections are checked out per request and returned on every exit path.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
}

/// Create tables and indexes if they do not exist yet.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS usuarios (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            nome TEXT NOT NULL,
            senha_hash TEXT NOT NULL,
            pergunta_seguranca TEXT NOT NULL,
            resposta_seguranca_hash TEXT NOT NULL,
            data_criacao TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS clientes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            usuario_id INTEGER NOT NULL,
            codigo_cliente TEXT NOT NULL,
            nome_completo TEXT NOT NULL,
            email TEXT UNIQUE,
            telefone TEXT,
            data_nascimento DATE NOT NULL,
            endereco TEXT,
            status TEXT NOT NULL DEFAULT 'ativo',
            data_registro TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (usuario_id) REFERENCES usuarios (id),
            UNIQUE (usuario_id, codigo_cliente)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS atendimentos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            usuario_id INTEGER NOT NULL,
            cliente_id INTEGER NOT NULL,
            data_atendimento DATE NOT NULL,
            conteudo TEXT NOT NULL,
            duracao_minutos INTEGER NOT NULL,
            data_registro TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (usuario_id) REFERENCES usuarios (id),
            FOREIGN KEY (cliente_id) REFERENCES clientes (id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_clientes_usuario ON clientes(usuario_id)",
        "CREATE INDEX IF NOT EXISTS idx_clientes_status ON clientes(status)",
        "CREATE INDEX IF NOT EXISTS idx_atendimentos_usuario ON atendimentos(usuario_id)",
        "CREATE INDEX IF NOT EXISTS idx_atendimentos_cliente ON atendimentos(cliente_id)",
        "CREATE INDEX IF NOT EXISTS idx_atendimentos_usuario_cliente ON atendimentos(usuario_id, cliente_id)",
        "CREATE INDEX IF NOT EXISTS idx_atendimentos_data ON atendimentos(data_atendimento DESC)",
    ];

    for index in indexes {
        sqlx::query(index).execute(pool).await?;
    }

    Ok(())
}
