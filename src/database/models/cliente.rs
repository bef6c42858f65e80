use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full clientes table row.
#[derive(Debug, Clone, FromRow)]
pub struct ClienteRow {
    pub id: i64,
    pub usuario_id: i64,
    pub codigo_cliente: String,
    pub nome_completo: String,
    pub email: Option<String>,
    pub telefone: String,
    pub data_nascimento: NaiveDate,
    pub endereco: Option<String>,
    pub status: String,
    pub data_registro: DateTime<Utc>,
}

/// Client shape returned to the API caller; the owner id and registration
/// timestamp stay internal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClienteResponse {
    pub id: i64,
    pub codigo_cliente: String,
    pub nome_completo: String,
    pub email: Option<String>,
    pub telefone: String,
    pub data_nascimento: NaiveDate,
    pub endereco: Option<String>,
    pub status: String,
}

impl From<ClienteRow> for ClienteResponse {
    fn from(row: ClienteRow) -> Self {
        Self {
            id: row.id,
            codigo_cliente: row.codigo_cliente,
            nome_completo: row.nome_completo,
            email: row.email,
            telefone: row.telefone,
            data_nascimento: row.data_nascimento,
            endereco: row.endereco,
            status: row.status,
        }
    }
}
