//! Registro binário da interface de dados.
//!
//! Cada leitura entrega exatamente um registro de 16 bytes, sem padding,
//! na ordem de bytes do host:
//!
//! ```text
//! ┌──────────────────┬───────────────┬──────────┐
//! │ timestamp_ns (8) │ temp_mC (4)   │ flags (4)│
//! └──────────────────┴───────────────┴──────────┘
//! ```
//!
//! Serializado com bincode em modo de inteiros de largura fixa, o que
//! reproduz a struct empacotada do lado do cliente byte a byte.

use crate::types::Sample;
use bincode::Options;

/// Tamanho do registro de amostra.
pub const SAMPLE_SIZE: usize = 16;

/// Erros do codec de amostra.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("Registro muito curto ({0} bytes, mínimo {SAMPLE_SIZE})")]
    TooShort(usize),

    #[error("Erro de serialização: {0}")]
    Serialize(String),

    #[error("Erro de deserialização: {0}")]
    Deserialize(String),
}

fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_native_endian()
}

/// Codifica uma [`Sample`] no registro de 16 bytes.
pub fn encode_sample(sample: &Sample) -> Result<[u8; SAMPLE_SIZE], ProtocolError> {
    let mut record = [0u8; SAMPLE_SIZE];
    codec()
        .serialize_into(&mut record[..], sample)
        .map_err(|e| ProtocolError::Serialize(e.to_string()))?;
    Ok(record)
}

/// Decodifica o início de `data` como uma [`Sample`].
///
/// Bytes além dos 16 primeiros são ignorados.
pub fn decode_sample(data: &[u8]) -> Result<Sample, ProtocolError> {
    if data.len() < SAMPLE_SIZE {
        return Err(ProtocolError::TooShort(data.len()));
    }

    codec()
        .deserialize(&data[..SAMPLE_SIZE])
        .map_err(|e| ProtocolError::Deserialize(e.to_string()))
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────
