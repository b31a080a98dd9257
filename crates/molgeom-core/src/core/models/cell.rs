use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CellError {
    #[error("Cell length {name} must be positive (value: {value})")]
    InvalidLength { name: &'static str, value: f64 },
    #[error("Cell angle {name} must lie strictly between 0 and 180 degrees (value: {value})")]
    InvalidAngle { name: &'static str, value: f64 },
    #[error("Cell angles ({alpha}, {beta}, {gamma}) do not describe a cell with positive volume")]
    DegenerateAngles { alpha: f64, beta: f64, gamma: f64 },
}

/// Parameters of a periodic (triclinic) unit cell.
///
/// Lengths are in Angstroms, angles in degrees, following the crystallographic
/// convention: `alpha` is the angle between b and c, `beta` between a and c, and
/// `gamma` between a and b.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct UnitCell {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl UnitCell {
    /// Creates a validated unit cell.
    ///
    /// # Errors
    ///
    /// Returns [`CellError`] if a length is not positive, an angle is outside (0, 180),
    /// or the three angles cannot close a cell of positive volume.
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Result<Self, CellError> {
        let cell = Self {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        };
        cell.validate()?;
        Ok(cell)
    }

    /// Creates a cell from the six-value `(a, b, c, alpha, beta, gamma)` layout used by
    /// structure files and the command line.
    pub fn from_params(params: [f64; 6]) -> Result<Self, CellError> {
        let [a, b, c, alpha, beta, gamma] = params;
        Self::new(a, b, c, alpha, beta, gamma)
    }

    /// A cubic cell of edge `length`.
    pub fn cubic(length: f64) -> Result<Self, CellError> {
        Self::new(length, length, length, 90.0, 90.0, 90.0)
    }

    pub fn params(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.alpha, self.beta, self.gamma]
    }

    /// The dimensionless angular factor `sqrt(1 - cos²α - cos²β - cos²γ + 2 cosα cosβ cosγ)`.
    ///
    /// It equals 1 for orthogonal cells and scales the product `a·b·c` to the cell volume.
    pub fn angular_volume_factor(&self) -> f64 {
        self.angular_volume_factor_squared().max(0.0).sqrt()
    }

    pub fn volume(&self) -> f64 {
        self.a * self.b * self.c * self.angular_volume_factor()
    }

    fn angular_volume_factor_squared(&self) -> f64 {
        let cos_alpha = self.alpha.to_radians().cos();
        let cos_beta = self.beta.to_radians().cos();
        let cos_gamma = self.gamma.to_radians().cos();
        1.0 - cos_alpha.powi(2) - cos_beta.powi(2) - cos_gamma.powi(2)
            + 2.0 * cos_alpha * cos_beta * cos_gamma
    }

    fn validate(&self) -> Result<(), CellError> {
        for (name, value) in [("a", self.a), ("b", self.b), ("c", self.c)] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(CellError::InvalidLength { name, value });
            }
        }
        for (name, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
        ] {
            if !(value > 0.0 && value < 180.0) {
                return Err(CellError::InvalidAngle { name, value });
            }
        }
        if self.angular_volume_factor_squared() <= 0.0 {
            return Err(CellError::DegenerateAngles {
                alpha: self.alpha,
                beta: self.beta,
                gamma: self.gamma,
            });
        }
        Ok(())
    }
}
