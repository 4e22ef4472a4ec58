//! Scales - Map data values onto pixel ranges

/// Evenly spaced bands for categorical axes
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    count: usize,
    origin: f64,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// `count` bands across `start..end`; `padding` is the inner gap as a
    /// fraction of each step
    pub fn new(count: usize, start: f64, end: f64, padding: f64) -> Self {
        let step = if count == 0 {
            0.0
        } else {
            (end - start) / count as f64
        };
        let padding = padding.clamp(0.0, 1.0);
        Self {
            count,
            origin: start,
            start: start + step * padding / 2.0,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    /// Leading edge of band `index`
    pub fn position(&self, index: usize) -> f64 {
        self.start + self.step * index as f64
    }

    /// Centre of band `index`
    pub fn center(&self, index: usize) -> f64 {
        self.position(index) + self.bandwidth / 2.0
    }

    /// Edge between band `index - 1` and band `index`, ignoring padding
    pub fn boundary(&self, index: usize) -> f64 {
        self.origin + self.step * index as f64
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// Continuous linear scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Extend the domain to round tick boundaries
    pub fn nice(mut self, ticks: usize) -> Self {
        let (d0, d1) = self.domain;
        let step = tick_step(d0, d1, ticks);
        if step > 0.0 {
            self.domain = ((d0 / step).floor() * step, (d1 / step).ceil() * step);
        }
        self
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Round tick values inside the domain
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        let step = tick_step(d0, d1, count);
        if step <= 0.0 {
            return vec![d0];
        }
        let first = (d0 / step).ceil() as i64;
        let last = (d1 / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

/// Step of 1, 2 or 5 times a power of ten giving about `count` ticks
fn tick_step(d0: f64, d1: f64, count: usize) -> f64 {
    let span = d1 - d0;
    if !span.is_finite() || span <= 0.0 || count == 0 {
        return 0.0;
    }
    let raw = span / count as f64;
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 7.07 {
        10.0
    } else if error >= 3.16 {
        5.0
    } else if error >= 1.41 {
        2.0
    } else {
        1.0
    };
    factor * power
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_positions() {
        let band = BandScale::new(4, 0.0, 400.0, 0.5);
        assert_eq!(band.position(0), 25.0);
        assert_eq!(band.position(1), 125.0);
        assert_eq!(band.bandwidth(), 50.0);
        assert_eq!(band.center(0), 50.0);
        assert_eq!(band.boundary(2), 200.0);
    }

    #[test]
    fn test_nice_rounds_out() {
        let scale = LinearScale::new((0.0, 93.0 * 1.1), (0.0, 500.0)).nice(5);
        assert_eq!(scale.domain(), (0.0, 120.0));
        assert_eq!(scale.ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0, 120.0]);
        assert_eq!(scale.map(60.0), 250.0);
    }

    #[test]
    fn test_empty_domain_maps_to_start() {
        let scale = LinearScale::new((0.0, 0.0), (300.0, 0.0)).nice(5);
        assert_eq!(scale.map(0.0), 300.0);
        assert_eq!(scale.ticks(5), vec![0.0]);
    }
}
