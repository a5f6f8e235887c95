//! Interface de controle: entradas de texto chave/valor.
//!
//! | Entrada              | Acesso | Formato                                  |
//! |----------------------|--------|------------------------------------------|
//! | `sampling_period_ms` | rw     | inteiro decimal + `\n`                   |
//! | `threshold_milli_c`  | rw     | inteiro decimal + `\n`                   |
//! | `mode`               | rw     | `normal` \| `noisy` \| `ramp` + `\n`     |
//! | `stats`              | ro     | `samples=<n> alerts=<n> errors=<n>\n`    |
//! | `reset`              | wo     | `1` zera as estatísticas, resto ignorado |
//!
//! Cada leitura/escrita toma o lock do dispositivo de forma independente.

use crate::device::{DeviceError, SimTemp};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Uma entrada da interface de controle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEntry {
    SamplingPeriodMs,
    ThresholdMilliC,
    Mode,
    Stats,
    Reset,
}

impl ControlEntry {
    pub const ALL: [ControlEntry; 5] = [
        ControlEntry::SamplingPeriodMs,
        ControlEntry::ThresholdMilliC,
        ControlEntry::Mode,
        ControlEntry::Stats,
        ControlEntry::Reset,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ControlEntry::SamplingPeriodMs => "sampling_period_ms",
            ControlEntry::ThresholdMilliC => "threshold_milli_c",
            ControlEntry::Mode => "mode",
            ControlEntry::Stats => "stats",
            ControlEntry::Reset => "reset",
        }
    }

    pub fn is_readable(self) -> bool {
        !matches!(self, ControlEntry::Reset)
    }

    pub fn is_writable(self) -> bool {
        !matches!(self, ControlEntry::Stats)
    }
}

impl fmt::Display for ControlEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ControlEntry {
    type Err = DeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ControlEntry::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| DeviceError::UnknownEntry(s.to_string()))
    }
}

/// Inteiro decimal com sinal opcional e no máximo um `\n` final.
fn parse_int(input: &str) -> Option<i32> {
    input.strip_suffix('\n').unwrap_or(input).parse().ok()
}

impl SimTemp {
    /// Conteúdo textual de uma entrada, sempre terminado em `\n`.
    pub fn show(&self, entry: ControlEntry) -> Result<String, DeviceError> {
        let text = match entry {
            ControlEntry::SamplingPeriodMs => format!("{}\n", self.sampling_period()),
            ControlEntry::ThresholdMilliC => format!("{}\n", self.threshold()),
            ControlEntry::Mode => format!("{}\n", self.mode()),
            ControlEntry::Stats => format!("{}\n", self.stats()),
            ControlEntry::Reset => return Err(DeviceError::NotReadable(entry.name())),
        };
        Ok(text)
    }

    /// Escreve `input` em uma entrada. Retorna os bytes consumidos.
    ///
    /// Valor malformado (inteiro ou modo) é rejeitado sem alterar a
    /// configuração e conta como erro. Escrita em entrada somente leitura
    /// é recusada sem contar.
    pub fn store(&self, entry: ControlEntry, input: &str) -> Result<usize, DeviceError> {
        match entry {
            ControlEntry::SamplingPeriodMs => {
                let value = self.parse_or_count(entry, input)?;
                self.set_sampling_period(value);
            }
            ControlEntry::ThresholdMilliC => {
                let value = self.parse_or_count(entry, input)?;
                self.set_threshold(value);
            }
            ControlEntry::Mode => {
                self.set_mode(input)?;
            }
            ControlEntry::Stats => return Err(DeviceError::NotWritable(entry.name())),
            ControlEntry::Reset => {
                if parse_int(input) == Some(1) {
                    self.reset_stats();
                } else {
                    debug!("Escrita em reset ignorada: {input:?}");
                }
            }
        }
        Ok(input.len())
    }

    fn parse_or_count(&self, entry: ControlEntry, input: &str) -> Result<i32, DeviceError> {
        parse_int(input).ok_or_else(|| {
            self.record_error();
            warn!("Valor inválido para {entry}: {input:?}");
            DeviceError::InvalidInteger(input.to_string())
        })
    }

    /// [`SimTemp::show`] pelo nome da entrada.
    pub fn show_by_name(&self, name: &str) -> Result<String, DeviceError> {
        self.show(name.parse()?)
    }

    /// [`SimTemp::store`] pelo nome da entrada.
    pub fn store_by_name(&self, name: &str, input: &str) -> Result<usize, DeviceError> {
        self.store(name.parse()?, input)
    }
}
