//! Argumentos de linha de comando.
//!
//! As opções `--sampling-ms`, `--threshold` e `--mode` fazem o papel dos
//! parâmetros de módulo: sobrescrevem o `[device]` do arquivo TOML.

use clap::Parser;
use simtemp_core::{AppConfig, Mode};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "simtemp")]
#[command(version)]
#[command(about = "SimTemp - sensor de temperatura simulado")]
#[command(long_about = "SimTemp - sensor de temperatura simulado

Inicializa o dispositivo a partir do simtemp.toml (e das opções abaixo),
lê amostras pela interface de dados e mostra as entradas de controle.

EXEMPLOS:
    simtemp                                  Uma amostra + entradas
    simtemp -n 0 --mode ramp                 Lê para sempre no modo ramp
    simtemp --set threshold_milli_c=30000    Escreve uma entrada antes de ler
    simtemp --shell                          Shell interativo

VARIÁVEIS DE AMBIENTE:
    RUST_LOG=debug         Log de cada amostra gerada")]
pub struct Cli {
    /// Arquivo de configuração (padrão: simtemp.toml ao lado do executável)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Período de amostragem inicial (ms)
    #[arg(long, value_name = "MS", allow_negative_numbers = true)]
    pub sampling_ms: Option<i32>,

    /// Threshold de alerta inicial (m°C)
    #[arg(long, value_name = "MILLI_C", allow_negative_numbers = true)]
    pub threshold: Option<i32>,

    /// Modo inicial: normal, noisy ou ramp
    #[arg(long)]
    pub mode: Option<Mode>,

    /// Quantidade de amostras a ler (0 = sem limite)
    #[arg(short = 'n', long)]
    pub count: Option<u64>,

    /// Escreve uma entrada de controle antes de ler (repetível)
    #[arg(long = "set", value_name = "ENTRY=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, String)>,

    /// Não imprime as entradas de controle ao final
    #[arg(long)]
    pub no_entries: bool,

    /// Abre o shell de controle interativo em vez do laço de leitura
    #[arg(long)]
    pub shell: bool,
}

impl Cli {
    /// Aplica as opções de linha de comando sobre a configuração carregada.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(ms) = self.sampling_ms {
            config.device.sampling_period_ms = ms;
        }
        if let Some(threshold) = self.threshold {
            config.device.threshold_milli_c = threshold;
        }
        if let Some(mode) = self.mode {
            config.device.mode = mode;
        }
        if let Some(count) = self.count {
            config.client.samples = count;
        }
        if self.no_entries {
            config.client.show_entries = false;
        }
    }
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (entry, value) = s
        .split_once('=')
        .ok_or_else(|| format!("esperado ENTRY=VALUE, recebido {s:?}"))?;
    if entry.is_empty() {
        return Err(format!("nome de entrada vazio em {s:?}"));
    }
    Ok((entry.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_file_values() {
        let cli = Cli::parse_from([
            "simtemp",
            "--sampling-ms",
            "-1",
            "--threshold",
            "30000",
            "--mode",
            "noisy",
            "-n",
            "0",
            "--no-entries",
        ]);
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.device.sampling_period_ms, -1);
        assert_eq!(config.device.threshold_milli_c, 30_000);
        assert_eq!(config.device.mode, Mode::Noisy);
        assert_eq!(config.client.samples, 0);
        assert!(!config.client.show_entries);
    }

    #[test]
    fn no_flags_keep_config() {
        let cli = Cli::parse_from(["simtemp"]);
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.device, AppConfig::default().device);
    }

    #[test]
    fn set_is_repeatable() {
        let cli = Cli::parse_from([
            "simtemp",
            "--set",
            "mode=ramp",
            "--set",
            "threshold_milli_c=-5",
        ]);
        assert_eq!(
            cli.set,
            vec![
                ("mode".to_string(), "ramp".to_string()),
                ("threshold_milli_c".to_string(), "-5".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(Cli::try_parse_from(["simtemp", "--mode", "Turbo"]).is_err());
        assert!(Cli::try_parse_from(["simtemp", "--set", "mode"]).is_err());
        assert!(Cli::try_parse_from(["simtemp", "--set", "=1"]).is_err());
    }
}
