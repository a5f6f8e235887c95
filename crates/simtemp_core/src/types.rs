//! Definição de tipos do sensor simulado.
//!
//! `Sample` é o valor entregue a cada leitura da interface de dados;
//! `Mode` é o algoritmo que decide a próxima temperatura.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bit 0 de `flags`: amostra nova. Sempre ligado por este núcleo.
pub const FLAG_NEW_SAMPLE: u32 = 0x1;

// ──────────────────────────────────────────────
// Modo de operação
// ──────────────────────────────────────────────

/// Modo de geração da temperatura simulada.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Caminhada que converge para a faixa `threshold ± 200`.
    #[default]
    Normal,
    /// Valor uniforme em `[20000, 30000)`, sem memória.
    Noisy,
    /// Onda triangular entre 10 °C e 50 °C, passo de 0.5 °C.
    Ramp,
}

impl Mode {
    /// Todos os modos, na ordem dos nomes canônicos.
    pub const ALL: [Mode; 3] = [Mode::Normal, Mode::Noisy, Mode::Ramp];

    /// Nome canônico usado na interface de controle.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Noisy => "noisy",
            Mode::Ramp => "ramp",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nome de modo não reconhecido.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Modo desconhecido: {0:?} (esperado normal|noisy|ramp)")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    /// Comparação exata e sensível a maiúsculas. Um único `\n` final é
    /// aceito, como em `echo ramp > mode`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_suffix('\n').unwrap_or(s);
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str() == name)
            .ok_or_else(|| UnknownMode(name.to_string()))
    }
}

// ──────────────────────────────────────────────
// Amostra
// ──────────────────────────────────────────────

/// Uma leitura do sensor simulado.
///
/// A ordem dos campos é a ordem do registro binário de 16 bytes
/// (ver [`crate::protocol`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Tempo monotônico da geração (ns)
    pub timestamp_ns: u64,
    /// Temperatura (m°C)
    pub temp_milli_c: i32,
    /// Bits de evento; bit 0 = amostra nova
    pub flags: u32,
}

impl Sample {
    pub fn new(timestamp_ns: u64, temp_milli_c: i32) -> Self {
        Self {
            timestamp_ns,
            temp_milli_c,
            flags: FLAG_NEW_SAMPLE,
        }
    }

    pub fn is_new(&self) -> bool {
        self.flags & FLAG_NEW_SAMPLE != 0
    }

    /// Temperatura em °C, para exibição.
    pub fn temperature_celsius(&self) -> f64 {
        f64::from(self.temp_milli_c) / 1000.0
    }
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────
