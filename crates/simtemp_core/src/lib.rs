//! # SimTemp Core
//!
//! Núcleo do sensor de temperatura simulado: configuração, gerador de
//! amostras e estatísticas, expostos por uma interface de dados binária
//! e uma interface de controle textual.
//!
//! ## Módulos
//! - [`types`] – `Sample` e `Mode`
//! - [`protocol`] – Registro binário de 16 bytes
//! - [`config`] – Configuração de bootstrap via TOML
//! - [`generator`] – Máquina de estados normal/noisy/ramp
//! - [`stats`] – Contadores de amostras, alertas e erros
//! - [`device`] – Contexto do dispositivo (lock único) e leitura de amostras
//! - [`control`] – Entradas de texto chave/valor

pub mod types;
pub mod protocol;
pub mod config;
pub mod generator;
pub mod stats;
pub mod device;
pub mod control;

// Re-exports convenientes
pub use types::{Mode, Sample};
pub use protocol::{SAMPLE_SIZE, decode_sample, encode_sample};
pub use config::{AppConfig, ClientConfig, DeviceConfig};
pub use stats::StatsSnapshot;
pub use device::{DeviceError, SampleSink, SimTemp};
pub use control::ControlEntry;
