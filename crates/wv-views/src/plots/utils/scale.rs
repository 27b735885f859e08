//! Continuous scales mapping data values onto screen ranges

/// How values are transformed before linear interpolation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScaleKind {
    Linear,
    Log,
    Sqrt,
}

/// A continuous scale from `domain` to `range`
///
/// Values outside the domain extrapolate; nothing is clamped. A degenerate
/// domain maps every value to the middle of the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    kind: ScaleKind,
    domain: (f64, f64),
    range: (f64, f64),
}

impl Scale {
    pub fn linear(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { kind: ScaleKind::Linear, domain, range }
    }

    /// Logarithmic scale; the domain must be strictly positive
    pub fn log(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { kind: ScaleKind::Log, domain, range }
    }

    /// Square-root scale, used for areas
    pub fn sqrt(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { kind: ScaleKind::Sqrt, domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn with_domain(mut self, domain: (f64, f64)) -> Self {
        self.domain = domain;
        self
    }

    fn transform(&self, value: f64) -> f64 {
        match self.kind {
            ScaleKind::Linear => value,
            ScaleKind::Log => value.ln(),
            ScaleKind::Sqrt => value.signum() * value.abs().sqrt(),
        }
    }

    fn untransform(&self, value: f64) -> f64 {
        match self.kind {
            ScaleKind::Linear => value,
            ScaleKind::Log => value.exp(),
            ScaleKind::Sqrt => value.signum() * value * value,
        }
    }

    /// Position of `value` within the domain, 0 at the start and 1 at the end
    pub fn normalize(&self, value: f64) -> f64 {
        let start = self.transform(self.domain.0);
        let span = self.transform(self.domain.1) - start;
        if span == 0.0 || !span.is_finite() {
            return 0.5;
        }
        (self.transform(value) - start) / span
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (r0, r1) = self.range;
        r0 + self.normalize(value) * (r1 - r0)
    }

    pub fn invert(&self, position: f64) -> f64 {
        let (r0, r1) = self.range;
        let t = if r1 == r0 { 0.5 } else { (position - r0) / (r1 - r0) };
        let start = self.transform(self.domain.0);
        let end = self.transform(self.domain.1);
        self.untransform(start + t * (end - start))
    }

    /// Roughly `count` human-friendly tick values inside the domain
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = ordered(self.domain);
        match self.kind {
            ScaleKind::Log => log_ticks(lo, hi, count),
            ScaleKind::Linear | ScaleKind::Sqrt => linear_ticks(lo, hi, count),
        }
    }
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Step of 1, 2 or 5 times a power of ten giving about `count` intervals
pub fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo).abs() / count.max(1) as f64;
    let mut step = 10f64.powf(raw.log10().floor());
    let error = raw / step;
    if error >= 50f64.sqrt() {
        step *= 10.0;
    } else if error >= 10f64.sqrt() {
        step *= 5.0;
    } else if error >= 2f64.sqrt() {
        step *= 2.0;
    }
    step
}

pub fn linear_ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    if !lo.is_finite() || !hi.is_finite() {
        return Vec::new();
    }
    if lo == hi {
        return vec![lo];
    }

    let step = tick_step(lo, hi, count);
    if !(step > 0.0 && step.is_finite()) {
        return Vec::new();
    }

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last)
        .map(|i| {
            // Divide by the inverse for fractional steps to avoid 0.30000000000000004
            if step < 1.0 {
                i as f64 / (1.0 / step).round()
            } else {
                i as f64 * step
            }
        })
        .collect()
}

/// Powers of ten, with 2x and 5x multiples when few decades are covered
pub fn log_ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    if !(lo > 0.0) || !hi.is_finite() {
        return Vec::new();
    }

    let first = lo.log10().floor() as i32;
    let last = hi.log10().ceil() as i32;
    let multiples: &[f64] = if ((last - first) as usize) < count.max(2) / 2 {
        &[1.0, 2.0, 5.0]
    } else {
        &[1.0]
    };

    let mut ticks = Vec::new();
    for exponent in first..=last {
        let base = 10f64.powi(exponent);
        for m in multiples {
            let value = m * base;
            if value >= lo * (1.0 - 1e-12) && value <= hi * (1.0 + 1e-12) {
                ticks.push(value);
            }
        }
    }
    ticks
}
