use std::path::Path;

use nalgebra::DMatrix;

use crate::error::ConfigError;

/// Intrinsics handed to the marker detector.
///
/// The file format is two whitespace-separated matrices, each written as
/// `rows cols v00 v01 ...` in row-major order: the camera matrix first, then
/// the distortion coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraCalibration {
    pub camera_matrix: DMatrix<f64>,
    pub distortion: DMatrix<f64>,
}

impl CameraCalibration {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut tokens = text.split_whitespace();
        let camera_matrix = read_matrix(&mut tokens, "camera matrix")?;
        let distortion = read_matrix(&mut tokens, "distortion coefficients")?;
        if camera_matrix.nrows() != 3 || camera_matrix.ncols() != 3 {
            return Err(ConfigError::Invalid(format!(
                "camera matrix must be 3x3, got {}x{}",
                camera_matrix.nrows(),
                camera_matrix.ncols()
            )));
        }
        Ok(Self {
            camera_matrix,
            distortion,
        })
    }
}

impl Default for CameraCalibration {
    /// Unit pinhole with no distortion.
    fn default() -> Self {
        Self {
            camera_matrix: DMatrix::identity(3, 3),
            distortion: DMatrix::zeros(1, 5),
        }
    }
}

const MAX_DIMENSION: usize = 64;

fn read_matrix<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    what: &str,
) -> Result<DMatrix<f64>, ConfigError> {
    let rows = read_dimension(tokens, what)?;
    let cols = read_dimension(tokens, what)?;
    let mut values = Vec::with_capacity(rows * cols);
    for _ in 0..rows * cols {
        let token = tokens
            .next()
            .ok_or_else(|| ConfigError::Parse(format!("{} ended early", what)))?;
        let value: f64 = token
            .parse()
            .map_err(|_| ConfigError::Parse(format!("'{}' in {} is not a number", token, what)))?;
        values.push(value);
    }
    Ok(DMatrix::from_row_slice(rows, cols, &values))
}

fn read_dimension<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    what: &str,
) -> Result<usize, ConfigError> {
    let token = tokens
        .next()
        .ok_or_else(|| ConfigError::Parse(format!("missing dimensions for {}", what)))?;
    match token.parse::<usize>() {
        Ok(n) if (1..=MAX_DIMENSION).contains(&n) => Ok(n),
        _ => Err(ConfigError::Parse(format!("bad dimension '{}' for {}", token, what))),
    }
}
