pub mod atendimento;
pub mod cliente;
pub mod usuario;
