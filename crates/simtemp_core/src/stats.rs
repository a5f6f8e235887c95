//! Estatísticas do dispositivo: amostras, alertas e erros.
//!
//! Os contadores não têm lock próprio; vivem dentro do estado protegido
//! pelo lock único de [`crate::device::SimTemp`].

use crate::types::Sample;
use std::fmt;

/// Uma amostra é alerta quando passa estritamente do threshold.
pub fn is_alert(temp_milli_c: i32, threshold_milli_c: i32) -> bool {
    temp_milli_c > threshold_milli_c
}

/// Contadores acumulados desde a inicialização ou o último reset.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    sample_count: u64,
    alert_count: u64,
    error_count: u64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contabiliza uma amostra entregue.
    pub fn record_sample(&mut self, sample: &Sample, threshold_milli_c: i32) {
        self.sample_count += 1;
        if is_alert(sample.temp_milli_c, threshold_milli_c) {
            self.alert_count += 1;
        }
    }

    /// Contabiliza uma requisição rejeitada.
    pub fn record_error(&mut self) {
        self.error_count += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            samples: self.sample_count,
            alerts: self.alert_count,
            errors: self.error_count,
        }
    }
}

/// Leitura pontual dos três contadores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub samples: u64,
    pub alerts: u64,
    pub errors: u64,
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "samples={} alerts={} errors={}",
            self.samples, self.alerts, self.errors
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_is_strictly_above_threshold() {
        assert!(!is_alert(45_000, 45_000));
        assert!(is_alert(45_001, 45_000));
        assert!(!is_alert(-1, 0));
    }

    #[test]
    fn counts_samples_and_alerts() {
        let mut stats = Statistics::new();
        stats.record_sample(&Sample::new(1, 29_999), 30_000);
        stats.record_sample(&Sample::new(2, 30_000), 30_000);
        stats.record_sample(&Sample::new(3, 30_001), 30_000);
        stats.record_error();

        let snap = stats.snapshot();
        assert_eq!(snap, StatsSnapshot { samples: 3, alerts: 1, errors: 1 });
        assert!(snap.alerts <= snap.samples);
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut stats = Statistics::new();
        for i in 0..10 {
            stats.record_sample(&Sample::new(i, 50_000), 0);
            stats.record_error();
        }
        stats.reset();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn display_format() {
        let snap = StatsSnapshot { samples: 12, alerts: 3, errors: 1 };
        assert_eq!(snap.to_string(), "samples=12 alerts=3 errors=1");
    }
}
