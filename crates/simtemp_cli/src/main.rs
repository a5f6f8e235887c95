//! # SimTemp
//!
//! Inicializa o sensor de temperatura simulado e lê amostras dele, como
//! um cliente do nó de dispositivo faria.
//!
//! ## Uso
//! ```bash
//! simtemp                    # Uma amostra + entradas de controle
//! simtemp -n 0               # Lê para sempre, no ritmo de sampling_period_ms
//! simtemp --shell            # Shell de controle interativo
//! ```

mod cli;
mod monitor;
mod shell;

use clap::Parser;
use cli::Cli;
use monitor::{SampleMonitor, format_entries, format_sample};
use simtemp_core::{AppConfig, SimTemp};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // ── Carregar config ──
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);
    let mut config = AppConfig::load(&config_path);

    // Salva config padrão se não existir
    if !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            warn!("Não foi possível salvar config padrão: {e}");
        }
    }

    cli.apply_overrides(&mut config);
    for warning in config.validate() {
        warn!("{warning}");
    }

    // ── Dispositivo ──
    let device = SimTemp::new(config.device);

    for (entry, value) in &cli.set {
        if let Err(e) = device.store_by_name(entry, value) {
            error!("Falha ao escrever {entry}={value}: {e}");
            return ExitCode::FAILURE;
        }
    }

    if cli.shell {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        return match shell::run_shell(&device, stdin.lock(), &mut stdout) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("Erro de E/S no shell: {e}");
                ExitCode::FAILURE
            }
        };
    }

    // ── Banner ──
    let current = device.config();
    println!();
    println!("══════════════════════════════════════════════");
    println!("   🌡  SIMTEMP – SENSOR SIMULADO");
    println!("══════════════════════════════════════════════");
    println!("  Modo:      {}", current.mode);
    println!("  Período:   {} ms", current.sampling_period_ms);
    println!("  Threshold: {} m°C", current.threshold_milli_c);
    if config.client.samples == 0 {
        println!("  Amostras:  sem limite");
    } else {
        println!("  Amostras:  {}", config.client.samples);
    }
    println!("══════════════════════════════════════════════");
    println!();

    // ── Loop principal ──
    let mut monitor = SampleMonitor::new(&device);
    let mut read = 0u64;
    loop {
        let cycle_start = Instant::now();

        match monitor.collect() {
            Ok(sample) => println!("{}", format_sample(&sample)),
            Err(e) => {
                error!("Erro ao ler amostra: {e}");
                return ExitCode::FAILURE;
            }
        }

        read += 1;
        if config.client.samples != 0 && read >= config.client.samples {
            break;
        }

        // Dormir pelo tempo restante do período
        if let Some(period) = monitor.pacing() {
            let elapsed = cycle_start.elapsed();
            if elapsed < period {
                std::thread::sleep(period - elapsed);
            }
        }
    }

    info!("{read} amostras lidas");

    if config.client.show_entries {
        println!();
        print!("{}", format_entries(&device));
    }

    ExitCode::SUCCESS
}
