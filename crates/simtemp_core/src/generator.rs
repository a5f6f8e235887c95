//! Gerador de amostras.
//!
//! Máquina de estados pura: (modo, estado anterior, configuração) →
//! próxima temperatura. Todos os valores em m°C.

use crate::config::DeviceConfig;
use crate::types::{Mode, Sample};
use rand::Rng;

/// Limite inferior dos modos normal e ramp (10 °C).
pub const MIN_TEMP_MILLI_C: i32 = 10_000;
/// Limite superior dos modos normal e ramp (50 °C).
pub const MAX_TEMP_MILLI_C: i32 = 50_000;
/// Temperatura inicial (20 °C).
pub const INITIAL_TEMP_MILLI_C: i32 = 20_000;

/// Passo e meia-largura da faixa do modo normal.
pub const NORMAL_STEP_MILLI_C: i32 = 200;
/// Passo do modo ramp.
pub const RAMP_STEP_MILLI_C: i32 = 500;

const NOISY_CENTER_MILLI_C: i32 = 25_000;
const NOISY_SPREAD_MILLI_C: i32 = 5_000;

/// Estado interno do gerador. Um por dispositivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorState {
    /// Última temperatura produzida
    pub current_milli_c: i32,
    /// Direção da rampa (só usada no modo ramp)
    pub ramp_ascending: bool,
}

impl Default for GeneratorState {
    fn default() -> Self {
        Self {
            current_milli_c: INITIAL_TEMP_MILLI_C,
            ramp_ascending: true,
        }
    }
}

/// Calcula a próxima temperatura e atualiza `state`.
pub fn next_temperature<R: Rng + ?Sized>(
    mode: Mode,
    threshold_milli_c: i32,
    state: &mut GeneratorState,
    rng: &mut R,
) -> i32 {
    let next = match mode {
        Mode::Normal => {
            let low = threshold_milli_c.saturating_sub(NORMAL_STEP_MILLI_C);
            let high = threshold_milli_c.saturating_add(NORMAL_STEP_MILLI_C);
            let t = state.current_milli_c;

            let moved = if t < low {
                t + NORMAL_STEP_MILLI_C
            } else if t > high {
                t - NORMAL_STEP_MILLI_C
            } else {
                t + rng.random_range(-NORMAL_STEP_MILLI_C..NORMAL_STEP_MILLI_C)
            };
            moved.clamp(MIN_TEMP_MILLI_C, MAX_TEMP_MILLI_C)
        }

        Mode::Noisy => {
            NOISY_CENTER_MILLI_C + rng.random_range(-NOISY_SPREAD_MILLI_C..NOISY_SPREAD_MILLI_C)
        }

        Mode::Ramp => {
            let moved = if state.ramp_ascending {
                state.current_milli_c.saturating_add(RAMP_STEP_MILLI_C)
            } else {
                state.current_milli_c.saturating_sub(RAMP_STEP_MILLI_C)
            };

            if moved >= MAX_TEMP_MILLI_C {
                state.ramp_ascending = false;
                MAX_TEMP_MILLI_C
            } else if moved <= MIN_TEMP_MILLI_C {
                state.ramp_ascending = true;
                MIN_TEMP_MILLI_C
            } else {
                moved
            }
        }
    };

    state.current_milli_c = next;
    next
}

/// Gera uma [`Sample`] a partir da configuração corrente.
pub fn generate<R: Rng + ?Sized>(
    config: &DeviceConfig,
    state: &mut GeneratorState,
    rng: &mut R,
    timestamp_ns: u64,
) -> Sample {
    let temp = next_temperature(config.mode, config.threshold_milli_c, state, rng);
    Sample::new(timestamp_ns, temp)
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn noisy_stays_in_range() {
        let mut rng = rng();
        let mut state = GeneratorState::default();
        let (mut lo, mut hi) = (i32::MAX, i32::MIN);

        for _ in 0..10_000 {
            let t = next_temperature(Mode::Noisy, 45_000, &mut state, &mut rng);
            assert!((20_000..30_000).contains(&t), "fora da faixa: {t}");
            lo = lo.min(t);
            hi = hi.max(t);
        }
        // Distribuição uniforme cobre praticamente toda a faixa
        assert!(lo < 20_500 && hi >= 29_500, "cobertura ruim: {lo}..{hi}");
    }

    #[test]
    fn noisy_mean_is_centered() {
        let mut rng = rng();
        let mut state = GeneratorState::default();
        let n = 10_000;
        let sum: i64 = (0..n)
            .map(|_| i64::from(next_temperature(Mode::Noisy, 0, &mut state, &mut rng)))
            .sum();
        let mean = sum / n;
        assert!((24_800..25_200).contains(&mean), "média {mean}");
    }

    #[test]
    fn normal_climbs_toward_band() {
        let mut rng = rng();
        let mut state = GeneratorState::default();
        let t = next_temperature(Mode::Normal, 45_000, &mut state, &mut rng);
        assert_eq!(t, 20_200);
        assert_eq!(state.current_milli_c, 20_200);
    }

    #[test]
    fn normal_descends_toward_band() {
        let mut rng = rng();
        let mut state = GeneratorState {
            current_milli_c: 40_000,
            ramp_ascending: true,
        };
        assert_eq!(next_temperature(Mode::Normal, 30_000, &mut state, &mut rng), 39_800);
    }

    #[test]
    fn normal_converges_to_threshold_band() {
        let mut rng = rng();
        let mut state = GeneratorState::default();
        let threshold = 30_000;

        // 20000 → 29800 em 49 passos
        for _ in 0..60 {
            next_temperature(Mode::Normal, threshold, &mut state, &mut rng);
        }

        let n = 5_000;
        let mut in_band = 0;
        for _ in 0..n {
            let t = next_temperature(Mode::Normal, threshold, &mut state, &mut rng);
            assert!(
                (threshold - 400..threshold + 400).contains(&t),
                "escapou da vizinhança: {t}"
            );
            if (threshold - 200..=threshold + 200).contains(&t) {
                in_band += 1;
            }
        }
        let fraction = in_band as f64 / n as f64;
        assert!(fraction > 0.6, "fração na faixa: {fraction}");
    }

    #[test]
    fn normal_clamps_to_bounds() {
        let mut rng = rng();
        let mut state = GeneratorState {
            current_milli_c: MAX_TEMP_MILLI_C,
            ramp_ascending: true,
        };
        for _ in 0..1_000 {
            let t = next_temperature(Mode::Normal, 90_000, &mut state, &mut rng);
            assert!(t <= MAX_TEMP_MILLI_C);
        }
        assert!(state.current_milli_c >= MAX_TEMP_MILLI_C - NORMAL_STEP_MILLI_C);

        state.current_milli_c = MIN_TEMP_MILLI_C;
        for _ in 0..1_000 {
            let t = next_temperature(Mode::Normal, -90_000, &mut state, &mut rng);
            assert_eq!(t, MIN_TEMP_MILLI_C);
        }
    }

    #[test]
    fn normal_survives_extreme_thresholds() {
        let mut rng = rng();
        let mut state = GeneratorState::default();
        for threshold in [i32::MIN, i32::MAX] {
            for _ in 0..10 {
                let t = next_temperature(Mode::Normal, threshold, &mut state, &mut rng);
                assert!((MIN_TEMP_MILLI_C..=MAX_TEMP_MILLI_C).contains(&t));
            }
        }
    }

    #[test]
    fn ramp_is_a_triangle_wave() {
        let mut rng = rng();
        let mut state = GeneratorState::default();
        let mut prev = state.current_milli_c;
        let mut hit_top = false;
        let mut hit_bottom = false;

        // Um período completo tem 160 passos
        for _ in 0..400 {
            let t = next_temperature(Mode::Ramp, 45_000, &mut state, &mut rng);
            assert!((MIN_TEMP_MILLI_C..=MAX_TEMP_MILLI_C).contains(&t));
            assert_eq!((t - prev).abs(), RAMP_STEP_MILLI_C);
            hit_top |= t == MAX_TEMP_MILLI_C;
            hit_bottom |= t == MIN_TEMP_MILLI_C;
            prev = t;
        }
        assert!(hit_top && hit_bottom);
    }

    #[test]
    fn ramp_flips_direction_at_bounds() {
        let mut rng = rng();
        let mut state = GeneratorState {
            current_milli_c: 49_800,
            ramp_ascending: true,
        };
        assert_eq!(next_temperature(Mode::Ramp, 0, &mut state, &mut rng), MAX_TEMP_MILLI_C);
        assert!(!state.ramp_ascending);
        assert_eq!(next_temperature(Mode::Ramp, 0, &mut state, &mut rng), 49_500);

        state.current_milli_c = 10_300;
        assert_eq!(next_temperature(Mode::Ramp, 0, &mut state, &mut rng), MIN_TEMP_MILLI_C);
        assert!(state.ramp_ascending);
    }

    #[test]
    fn generate_stamps_sample() {
        let mut rng = rng();
        let mut state = GeneratorState::default();
        let config = DeviceConfig {
            mode: Mode::Ramp,
            ..Default::default()
        };
        let s = generate(&config, &mut state, &mut rng, 1234);
        assert_eq!(s.timestamp_ns, 1234);
        assert_eq!(s.temp_milli_c, 20_500);
        assert_eq!(s.flags, 0x1);
    }
}
