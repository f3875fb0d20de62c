/// Linear value axis with "nice number" ticks and data→pixel mapping.
#[derive(Debug, Clone)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub label: String,
    pub tick_positions: Vec<f64>,
    pub tick_labels: Vec<String>,
}

impl Axis {
    /// Auto-scale with ticks at multiples of 1, 2 or 5 × 10ⁿ.
    pub fn auto_linear(data_min: f64, data_max: f64, target_ticks: usize) -> Self {
        let (nice_min, nice_max, step) = nice_range(data_min, data_max, target_ticks);
        let n_steps = ((nice_max - nice_min) / step).round() as usize;
        let tick_positions: Vec<f64> = (0..=n_steps).map(|i| nice_min + i as f64 * step).collect();
        let tick_labels = tick_positions.iter().map(|&v| format_tick(v, step)).collect();
        Self { min: nice_min, max: nice_max, label: String::new(), tick_positions, tick_labels }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Map a data value to a pixel coordinate.
    pub fn data_to_pixel(&self, value: f64, px_min: f64, px_max: f64) -> f64 {
        let frac = (value - self.min) / (self.max - self.min);
        px_min + frac * (px_max - px_min)
    }
}

fn nice_range(data_min: f64, data_max: f64, target_ticks: usize) -> (f64, f64, f64) {
    if (data_max - data_min).abs() < 1e-12 * data_max.abs().max(1.0) {
        let step = nice_step(data_max.abs().max(1.0) * 0.1);
        let centre = (data_min / step).round() * step;
        return (centre - step, centre + step, step);
    }
    let rough_step = (data_max - data_min) / (target_ticks.max(2) - 1) as f64;
    let step = nice_step(rough_step);
    let nice_min = (data_min / step).floor() * step;
    let nice_max = (data_max / step).ceil() * step;
    (nice_min, nice_max, step)
}

fn nice_step(rough: f64) -> f64 {
    let exp = rough.abs().log10().floor();
    let frac = rough / 10.0_f64.powf(exp);
    let nice_frac = if frac <= 1.5 {
        1.0
    } else if frac <= 3.5 {
        2.0
    } else if frac <= 7.5 {
        5.0
    } else {
        10.0
    };
    nice_frac * 10.0_f64.powf(exp)
}

fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 { 0 } else { (-step.log10().floor()) as usize };
    // Snap near-zero to avoid "-0".
    let v = if value.abs() < step * 0.01 { 0.0 } else { value };
    format!("{:.prec$}", v, prec = decimals)
}
