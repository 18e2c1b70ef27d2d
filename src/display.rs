use crate::{
    core::{function::Evaluable, helpers::linspace},
    errors::IntegError,
};

/// Samples of the weighted integrand `e^(-x) * f(x)`, ready for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedPlot {
    pub title: String,
    pub xv: Vec<f64>,
    pub yv: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub x_min: f64,
    pub x_max: f64,
    pub samples: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            x_min: 0f64,
            x_max: 10f64,
            samples: 1000,
        }
    }
}

impl PlotConfig {
    pub fn sample(&self, func: &dyn Evaluable) -> Result<WeightedPlot, IntegError> {
        if self.samples < 2 {
            return Err(IntegError::BadInput(format!(
                "Expected at least 2 samples, but found {}",
                self.samples
            )));
        }
        if !(self.x_min < self.x_max) {
            return Err(IntegError::BadInput(format!(
                "Expected x_min < x_max, but found [{}, {}]",
                self.x_min, self.x_max
            )));
        }

        let xv = linspace(self.x_min, self.x_max, self.samples);
        let yv = xv.iter().map(|&x| (-x).exp() * func.evaluate(x)).collect();
        Ok(WeightedPlot {
            title: format!(r"e^{{-x}} \cdot {}", func.latex()),
            xv,
            yv,
        })
    }
}
