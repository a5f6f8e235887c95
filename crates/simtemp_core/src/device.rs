//! Contexto do dispositivo simulado.
//!
//! Um único [`SimTemp`] possui configuração, estado do gerador e
//! estatísticas, todos atrás de um só lock. Toda mutação passa pelos
//! métodos daqui (ou de [`crate::control`]).

use crate::config::DeviceConfig;
use crate::generator::{self, GeneratorState};
use crate::protocol::{ProtocolError, SAMPLE_SIZE, decode_sample, encode_sample};
use crate::stats::{Statistics, StatsSnapshot};
use crate::types::{Mode, Sample, UnknownMode};
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Erros visíveis ao chamador. Nenhum deles corrompe o estado interno.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error(transparent)]
    InvalidMode(#[from] UnknownMode),

    #[error("Valor inteiro inválido: {0:?}")]
    InvalidInteger(String),

    #[error("Buffer muito pequeno ({got} bytes, mínimo {needed})")]
    BufferTooSmall { needed: usize, got: usize },

    #[error("Falha ao copiar amostra para o destino: {0}")]
    CopyFault(#[source] io::Error),

    #[error("Entrada de controle desconhecida: {0:?}")]
    UnknownEntry(String),

    #[error("Entrada {0} não permite leitura")]
    NotReadable(&'static str),

    #[error("Entrada {0} não permite escrita")]
    NotWritable(&'static str),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

// ──────────────────────────────────────────────
// Destino da leitura
// ──────────────────────────────────────────────

/// Destino de um registro de amostra (o buffer do leitor).
///
/// A cópia acontece com o lock do dispositivo tomado, então
/// implementações não devem bloquear.
pub trait SampleSink {
    /// Bytes disponíveis no destino.
    fn capacity(&self) -> usize;

    /// Copia o registro. Um erro aqui vira [`DeviceError::CopyFault`].
    fn copy_record(&mut self, record: &[u8; SAMPLE_SIZE]) -> io::Result<()>;
}

impl SampleSink for [u8] {
    fn capacity(&self) -> usize {
        self.len()
    }

    fn copy_record(&mut self, record: &[u8; SAMPLE_SIZE]) -> io::Result<()> {
        let dest = self
            .get_mut(..SAMPLE_SIZE)
            .ok_or_else(|| io::Error::from(io::ErrorKind::WriteZero))?;
        dest.copy_from_slice(record);
        Ok(())
    }
}

// ──────────────────────────────────────────────
// Dispositivo
// ──────────────────────────────────────────────

struct DeviceState {
    config: DeviceConfig,
    generator: GeneratorState,
    rng: StdRng,
    stats: Statistics,
}

/// O sensor de temperatura simulado.
///
/// Compartilhe entre threads com `Arc<SimTemp>`; todas as operações são
/// síncronas, O(1) e serializadas pelo mesmo lock.
pub struct SimTemp {
    state: Mutex<DeviceState>,
    epoch: Instant,
}

impl SimTemp {
    /// Cria o dispositivo com gerador semeado pelo sistema operacional.
    pub fn new(config: DeviceConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Cria o dispositivo com semente fixa (sequências reproduzíveis).
    pub fn with_seed(config: DeviceConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: DeviceConfig, rng: StdRng) -> Self {
        info!(
            "SimTemp inicializado: período {} ms, threshold {} m°C, modo {}",
            config.sampling_period_ms, config.threshold_milli_c, config.mode
        );
        Self {
            state: Mutex::new(DeviceState {
                config,
                generator: GeneratorState::default(),
                rng,
                stats: Statistics::new(),
            }),
            epoch: Instant::now(),
        }
    }

    fn now_ns(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    // ── Configuração ──

    /// Cópia da configuração corrente.
    pub fn config(&self) -> DeviceConfig {
        self.state.lock().config
    }

    pub fn sampling_period(&self) -> i32 {
        self.state.lock().config.sampling_period_ms
    }

    /// Aceita qualquer valor; o ritmo de leitura é problema do chamador.
    pub fn set_sampling_period(&self, value: i32) {
        self.state.lock().config.sampling_period_ms = value;
        info!("sampling_period_ms = {value}");
    }

    pub fn threshold(&self) -> i32 {
        self.state.lock().config.threshold_milli_c
    }

    pub fn set_threshold(&self, value: i32) {
        self.state.lock().config.threshold_milli_c = value;
        info!("threshold_milli_c = {value}");
    }

    pub fn mode(&self) -> Mode {
        self.state.lock().config.mode
    }

    /// Troca o modo pelo nome canônico.
    ///
    /// Nome desconhecido deixa o modo intacto e incrementa o contador de
    /// erros, dentro do mesmo lock.
    pub fn set_mode(&self, name: &str) -> Result<Mode, DeviceError> {
        let mut state = self.state.lock();
        match name.parse::<Mode>() {
            Ok(mode) => {
                state.config.mode = mode;
                info!("mode = {mode}");
                Ok(mode)
            }
            Err(e) => {
                state.stats.record_error();
                warn!("Escrita de modo rejeitada: {e}");
                Err(e.into())
            }
        }
    }

    pub fn set_mode_variant(&self, mode: Mode) {
        self.state.lock().config.mode = mode;
        info!("mode = {mode}");
    }

    // ── Dados ──

    /// Gera uma amostra nova e copia o registro de 16 bytes para `dest`.
    ///
    /// Destino pequeno demais é rejeitado antes de gerar qualquer coisa e
    /// não conta como erro. Falha na cópia conta como erro e descarta a
    /// amostra: o estado do gerador só avança quando a cópia dá certo.
    pub fn read_sample<S: SampleSink + ?Sized>(&self, dest: &mut S) -> Result<usize, DeviceError> {
        let got = dest.capacity();
        if got < SAMPLE_SIZE {
            debug!("Leitura com buffer de {got} bytes rejeitada");
            return Err(DeviceError::BufferTooSmall {
                needed: SAMPLE_SIZE,
                got,
            });
        }

        let mut guard = self.state.lock();
        let state = &mut *guard;

        let mut next = state.generator;
        let sample = generator::generate(&state.config, &mut next, &mut state.rng, self.now_ns());

        let record = match encode_sample(&sample) {
            Ok(record) => record,
            Err(e) => {
                state.stats.record_error();
                return Err(e.into());
            }
        };

        if let Err(e) = dest.copy_record(&record) {
            state.stats.record_error();
            warn!("Falha ao copiar amostra: {e}");
            return Err(DeviceError::CopyFault(e));
        }

        state.generator = next;
        state.stats.record_sample(&sample, state.config.threshold_milli_c);
        debug!(
            "Amostra {} m°C @ {} ns ({})",
            sample.temp_milli_c, sample.timestamp_ns, state.config.mode
        );

        Ok(SAMPLE_SIZE)
    }

    /// Lê uma amostra pela interface de dados e decodifica o registro.
    pub fn next_sample(&self) -> Result<Sample, DeviceError> {
        let mut buf = [0u8; SAMPLE_SIZE];
        self.read_sample(&mut buf[..])?;
        Ok(decode_sample(&buf)?)
    }

    // ── Estatísticas ──

    /// Contabiliza uma requisição malformada rejeitada pela camada externa.
    pub fn record_error(&self) {
        self.state.lock().stats.record_error();
    }

    pub fn reset_stats(&self) {
        self.state.lock().stats.reset();
        info!("Estatísticas zeradas");
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.state.lock().stats.snapshot()
    }
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────
