//! Configuração de bootstrap via TOML.
//!
//! A seção `[device]` faz o papel dos parâmetros de plataforma lidos na
//! inicialização do dispositivo; `[client]` controla o laço de leitura.

use crate::types::Mode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuração do dispositivo simulado.
///
/// É também o valor vivo guardado pelo núcleo: os setters da interface de
/// controle escrevem diretamente nestes campos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Período sugerido entre leituras (ms). Apenas informativo.
    pub sampling_period_ms: i32,
    /// Amostras acima deste valor contam como alerta (m°C)
    pub threshold_milli_c: i32,
    /// Modo inicial
    pub mode: Mode,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            sampling_period_ms: 100,
            threshold_milli_c: 45_000,
            mode: Mode::Normal,
        }
    }
}

/// Configuração do cliente de leitura.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Quantas amostras ler (0 = sem limite)
    pub samples: u64,
    /// Imprime as entradas de controle ao final
    pub show_entries: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            samples: 1,
            show_entries: true,
        }
    }
}

/// Configuração raiz do aplicativo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub device: DeviceConfig,
    pub client: ClientConfig,
}

impl AppConfig {
    /// Carrega configuração de um arquivo TOML.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str::<AppConfig>(&content) {
                    Ok(config) => {
                        info!("Configuração carregada de {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        warn!("Erro ao parsear {}: {}", path.display(), e);
                    }
                },
                Err(e) => {
                    warn!("Erro ao ler {}: {}", path.display(), e);
                }
            }
        }

        info!("Usando configuração padrão");
        AppConfig::default()
    }

    /// Salva configuração em arquivo TOML.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(path, content).map_err(|e| e.to_string())?;
        info!("Configuração salva em {}", path.display());
        Ok(())
    }

    /// Retorna o caminho padrão do simtemp.toml.
    pub fn default_path() -> PathBuf {
        let exe_dir = std::env::current_exe()
            .map(|p| p.parent().unwrap_or(Path::new(".")).to_path_buf())
            .unwrap_or_else(|_| PathBuf::from("."));
        exe_dir.join("simtemp.toml")
    }

    /// Valida a configuração e retorna lista de avisos.
    ///
    /// O núcleo aceita qualquer valor; isto só sinaliza configurações
    /// que provavelmente são engano.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.device.sampling_period_ms <= 0 {
            warnings.push(format!(
                "Período de amostragem não positivo: {} ms (leituras sem pausa)",
                self.device.sampling_period_ms
            ));
        }

        warnings
    }
}
