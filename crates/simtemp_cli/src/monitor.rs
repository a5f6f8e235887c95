//! Leitor de amostras – o lado cliente da interface de dados.
//!
//! Lê registros de 16 bytes do dispositivo exatamente como um leitor do
//! nó de dispositivo faria e decodifica para exibição.

use simtemp_core::control::ControlEntry;
use simtemp_core::stats::is_alert;
use simtemp_core::{DeviceError, SAMPLE_SIZE, Sample, SimTemp, decode_sample};
use std::fmt::Write as _;
use std::time::Duration;
use tracing::warn;

/// Monitor de amostras sobre um dispositivo.
pub struct SampleMonitor<'a> {
    device: &'a SimTemp,
    buf: [u8; SAMPLE_SIZE],
}

impl<'a> SampleMonitor<'a> {
    pub fn new(device: &'a SimTemp) -> Self {
        Self {
            device,
            buf: [0; SAMPLE_SIZE],
        }
    }

    /// Lê e decodifica uma amostra.
    pub fn collect(&mut self) -> Result<Sample, DeviceError> {
        self.device.read_sample(&mut self.buf[..])?;
        let sample = decode_sample(&self.buf)?;

        let threshold = self.device.threshold();
        if is_alert(sample.temp_milli_c, threshold) {
            warn!(
                "ALERTA: {:.3} °C acima do threshold {:.3} °C",
                sample.temperature_celsius(),
                f64::from(threshold) / 1000.0
            );
        }
        Ok(sample)
    }

    /// Pausa sugerida entre leituras; `None` quando o período não é positivo.
    pub fn pacing(&self) -> Option<Duration> {
        let ms = self.device.sampling_period();
        u64::try_from(ms)
            .ok()
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
    }
}

/// Uma linha por amostra.
pub fn format_sample(sample: &Sample) -> String {
    format!(
        "Timestamp: {} ns | Temperature: {:.3} °C | Flags: 0x{:x}",
        sample.timestamp_ns,
        sample.temperature_celsius(),
        sample.flags
    )
}

/// Todas as entradas legíveis, no formato `nome: valor`.
pub fn format_entries(device: &SimTemp) -> String {
    let mut out = String::new();
    for entry in ControlEntry::ALL.into_iter().filter(|e| e.is_readable()) {
        match device.show(entry) {
            Ok(text) => {
                let _ = write!(out, "{entry}: {text}");
            }
            Err(e) => {
                let _ = writeln!(out, "{entry}: <{e}>");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use simtemp_core::{DeviceConfig, Mode};

    fn device(mode: Mode) -> SimTemp {
        SimTemp::with_seed(
            DeviceConfig {
                mode,
                ..Default::default()
            },
            3,
        )
    }

    #[test]
    fn collect_goes_through_data_interface() {
        let dev = device(Mode::Ramp);
        let mut monitor = SampleMonitor::new(&dev);
        assert_eq!(monitor.collect().unwrap().temp_milli_c, 20_500);
        assert_eq!(monitor.collect().unwrap().temp_milli_c, 21_000);
        assert_eq!(dev.stats().samples, 2);
    }

    #[test]
    fn pacing_follows_sampling_period() {
        let dev = device(Mode::Normal);
        let monitor = SampleMonitor::new(&dev);
        assert_eq!(monitor.pacing(), Some(Duration::from_millis(100)));
        dev.set_sampling_period(0);
        assert_eq!(monitor.pacing(), None);
        dev.set_sampling_period(-10);
        assert_eq!(monitor.pacing(), None);
    }

    #[test]
    fn sample_line_format() {
        let line = format_sample(&Sample::new(123, 21_500));
        assert_eq!(line, "Timestamp: 123 ns | Temperature: 21.500 °C | Flags: 0x1");
    }

    #[test]
    fn entries_skip_write_only() {
        let dev = device(Mode::Noisy);
        let text = format_entries(&dev);
        assert_eq!(
            text,
            "sampling_period_ms: 100\n\
             threshold_milli_c: 45000\n\
             mode: noisy\n\
             stats: samples=0 alerts=0 errors=0\n"
        );
    }
}
