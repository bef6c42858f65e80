use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full atendimentos table row.
#[derive(Debug, Clone, FromRow)]
pub struct AtendimentoRow {
    pub id: i64,
    pub usuario_id: i64,
    pub cliente_id: i64,
    pub data_atendimento: NaiveDate,
    pub conteudo: String,
    pub duracao_minutos: i64,
    pub data_registro: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtendimentoResponse {
    pub id: i64,
    pub cliente_id: i64,
    pub data_atendimento: NaiveDate,
    pub conteudo: String,
    pub duracao_minutos: i64,
    pub data_registro: DateTime<Utc>,
}

impl From<AtendimentoRow> for AtendimentoResponse {
    fn from(row: AtendimentoRow) -> Self {
        Self {
            id: row.id,
            cliente_id: row.cliente_id,
            data_atendimento: row.data_atendimento,
            conteudo: row.conteudo,
            duracao_minutos: row.duracao_minutos,
            data_registro: row.data_registro,
        }
    }
}
