use std::collections::VecDeque;

use crate::{
    dsp::stream_operator::{StreamOperator, StreamOperatorManagement},
    prelude::ErrorsFirgen,
};

/// Streaming integer-ratio resampler: upsample by `up_rate` -> FIR -> keep every `down_rate`-th sample.
///
/// The zero-stuffed sequence is never materialized; the history holds `None` for stuffed zeros so
/// they are skipped in the dot product. The taps are used as given, so an upsampling table must
/// already carry its gain of `up_rate`.
pub struct PolyphaseIntegerResampler {
    up_rate: usize,
    down_rate: usize,
    taps: Vec<f64>,
    // Most recent sample at the front, so history[i] lines up with taps[i].
    history: VecDeque<Option<f64>>,
    phase: usize,
}

impl PolyphaseIntegerResampler {
    pub fn new(up_rate: usize, down_rate: usize, taps: &[f64]) -> Result<Self, ErrorsFirgen> {
        if up_rate == 0 || down_rate == 0 {
            return Err(ErrorsFirgen::InvalidInputRange(
                "up_rate and down_rate must both be > 0",
            ));
        }
        if taps.is_empty() {
            return Err(ErrorsFirgen::InvalidInputRange("taps must be non-empty"));
        }
        Ok(Self {
            up_rate,
            down_rate,
            taps: taps.to_vec(),
            history: VecDeque::from(vec![None; taps.len()]),
            phase: 0,
        })
    }

    fn push_slot(&mut self, slot: Option<f64>, out: &mut Vec<f64>) {
        self.history.pop_back();
        self.history.push_front(slot);
        if self.phase == 0 {
            let acc: f64 = self
                .taps
                .iter()
                .zip(self.history.iter())
                .filter_map(|(h, x)| x.map(|x| h * x))
                .sum();
            out.push(acc);
        }
        self.phase = (self.phase + 1) % self.down_rate;
    }

    fn step(&mut self, input: f64, out: &mut Vec<f64>) {
        self.push_slot(Some(input), out);
        for _ in 1..self.up_rate {
            self.push_slot(None, out);
        }
    }
}

impl StreamOperatorManagement for PolyphaseIntegerResampler {
    fn reset(&mut self) -> Result<(), ErrorsFirgen> {
        self.history.iter_mut().for_each(|x| *x = None);
        self.phase = 0;
        Ok(())
    }
}

impl StreamOperator<f64, f64> for PolyphaseIntegerResampler {
    fn process(&mut self, data_in: &[f64]) -> Result<Option<Vec<f64>>, ErrorsFirgen> {
        if data_in.is_empty() {
            return Ok(None);
        }
        let mut result = Vec::with_capacity(data_in.len() * self.up_rate / self.down_rate + 1);
        for &x in data_in {
            self.step(x, &mut result);
        }
        if result.is_empty() {
            Ok(None)
        } else {
            Ok(Some(result))
        }
    }

    fn flush(&mut self) -> Result<Option<Vec<f64>>, ErrorsFirgen> {
        let zeros = vec![0.0; self.taps.len().div_ceil(self.up_rate)];
        self.process(&zeros)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_decimation() {
        let mut resampler = PolyphaseIntegerResampler::new(1, 3, &[1.0]).unwrap();
        let input = (0..10).map(|x| x as f64).collect::<Vec<f64>>();
        let output = resampler.process(&input).unwrap().unwrap();
        assert_eq!(output, vec![0.0, 3.0, 6.0, 9.0]);
    }

    #[test]
    fn test_zero_stuffing_with_hold_taps() {
        // Taps [1, 1] after stuffing one zero repeat every sample once.
        let mut resampler = PolyphaseIntegerResampler::new(2, 1, &[1.0, 1.0]).unwrap();
        let output = resampler.process(&[1.0, 2.0, 3.0]).unwrap().unwrap();
        assert_eq!(output, vec![1.0, 1.0, 2.0, 2.0, 3.0, 3.0]);
    }

    #[test]
    fn test_chunked_matches_whole() {
        let taps = [0.25, 0.5, 0.25, -0.125];
        let input: Vec<f64> = (0..17).map(|x| (x as f64 * 0.3).sin()).collect();
        let mut whole = PolyphaseIntegerResampler::new(3, 2, &taps).unwrap();
        let expected = whole.process(&input).unwrap().unwrap();

        let mut chunked = PolyphaseIntegerResampler::new(3, 2, &taps).unwrap();
        let mut actual = Vec::new();
        for chunk in input.chunks(5) {
            if let Some(out) = chunked.process(chunk).unwrap() {
                actual.extend(out);
            }
        }
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_reset_and_flush() {
        let mut resampler = PolyphaseIntegerResampler::new(1, 1, &[0.5, 0.5]).unwrap();
        assert_eq!(resampler.process(&[2.0]).unwrap(), Some(vec![1.0]));
        assert_eq!(resampler.flush().unwrap(), Some(vec![1.0, 0.0]));
        resampler.process(&[4.0]).unwrap();
        resampler.reset().unwrap();
        assert_eq!(resampler.process(&[2.0]).unwrap(), Some(vec![1.0]));
        assert_eq!(resampler.process(&[]).unwrap(), None);
    }

    #[test]
    fn test_rejects_bad_configuration() {
        assert!(PolyphaseIntegerResampler::new(0, 1, &[1.0]).is_err());
        assert!(PolyphaseIntegerResampler::new(1, 0, &[1.0]).is_err());
        assert!(PolyphaseIntegerResampler::new(1, 1, &[]).is_err());
    }
}
