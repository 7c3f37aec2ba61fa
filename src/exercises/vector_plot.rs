//! 2D vector plotting on a 400x400 canvas.
//!
//! Vectors are drawn as segments from the canvas centre, scaled by 20
//! pixels per unit with y pointing up.

use std::str::FromStr;

use cgmath::{InnerSpace, Vector3};
use thiserror::Error;

use crate::math::{angle_between, triangle_area, try_normalize};

pub const CENTER: (f32, f32) = (200.0, 200.0);
pub const SCALE: f32 = 20.0;

#[derive(Debug, Error, PartialEq)]
pub enum VectorOpError {
    #[error("unknown vector operation {0:?}")]
    UnknownOperation(String),
    #[error("cannot divide by zero")]
    DivideByZero,
    #[error("{0} is undefined for a zero-length vector")]
    ZeroLength(&'static str),
}

/// Operation selectable on the plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorOp {
    Add,
    Sub,
    Mul,
    Div,
    Magnitude,
    Normalize,
    Angle,
    Area,
}

impl FromStr for VectorOp {
    type Err = VectorOpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "add" => VectorOp::Add,
            "sub" => VectorOp::Sub,
            "mul" => VectorOp::Mul,
            "div" => VectorOp::Div,
            "magnitude" => VectorOp::Magnitude,
            "normalize" => VectorOp::Normalize,
            "angle" => VectorOp::Angle,
            "area" => VectorOp::Area,
            other => return Err(VectorOpError::UnknownOperation(other.to_string())),
        })
    }
}

/// What an operation produces: vectors to draw or numbers to report.
#[derive(Debug, Clone, PartialEq)]
pub enum OpOutcome {
    Vectors(Vec<Vector3<f32>>),
    Scalars(Vec<f32>),
}

/// Canvas endpoint of `v` drawn from the centre.
pub fn endpoint(v: Vector3<f32>) -> (f32, f32) {
    (CENTER.0 + v.x * SCALE, CENTER.1 - v.y * SCALE)
}

/// Applies `op` to the pair; `scalar` is used by `Mul` and `Div`.
pub fn apply(
    op: VectorOp,
    v1: Vector3<f32>,
    v2: Vector3<f32>,
    scalar: f32,
) -> Result<OpOutcome, VectorOpError> {
    let outcome = match op {
        VectorOp::Add => OpOutcome::Vectors(vec![v1 + v2]),
        VectorOp::Sub => OpOutcome::Vectors(vec![v1 - v2]),
        VectorOp::Mul => OpOutcome::Vectors(vec![v1 * scalar, v2 * scalar]),
        VectorOp::Div => {
            if scalar == 0.0 {
                return Err(VectorOpError::DivideByZero);
            }
            OpOutcome::Vectors(vec![v1 / scalar, v2 / scalar])
        }
        VectorOp::Magnitude => OpOutcome::Scalars(vec![v1.magnitude(), v2.magnitude()]),
        VectorOp::Normalize => {
            let n1 = try_normalize(v1).ok_or(VectorOpError::ZeroLength("normalize"))?;
            let n2 = try_normalize(v2).ok_or(VectorOpError::ZeroLength("normalize"))?;
            OpOutcome::Vectors(vec![n1, n2])
        }
        VectorOp::Angle => {
            let angle = angle_between(v1, v2).ok_or(VectorOpError::ZeroLength("angle"))?;
            OpOutcome::Scalars(vec![angle])
        }
        VectorOp::Area => OpOutcome::Scalars(vec![triangle_area(v1, v2)]),
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_flips_y() {
        assert_eq!(endpoint(Vector3::new(1.0, 1.0, 0.0)), (220.0, 180.0));
        assert_eq!(endpoint(Vector3::new(-2.0, -1.0, 0.0)), (160.0, 220.0));
    }

    #[test]
    fn test_parse_ops() {
        assert_eq!("area".parse::<VectorOp>(), Ok(VectorOp::Area));
        assert_eq!(
            "cross".parse::<VectorOp>(),
            Err(VectorOpError::UnknownOperation("cross".into()))
        );
    }

    #[test]
    fn test_apply_ops() {
        let v1 = Vector3::new(3.0, 0.0, 0.0);
        let v2 = Vector3::new(0.0, 4.0, 0.0);
        assert_eq!(
            apply(VectorOp::Add, v1, v2, 0.0),
            Ok(OpOutcome::Vectors(vec![Vector3::new(3.0, 4.0, 0.0)]))
        );
        assert_eq!(
            apply(VectorOp::Magnitude, v1, v2, 0.0),
            Ok(OpOutcome::Scalars(vec![3.0, 4.0]))
        );
        assert_eq!(apply(VectorOp::Area, v1, v2, 0.0), Ok(OpOutcome::Scalars(vec![6.0])));
        assert_eq!(
            apply(VectorOp::Mul, v1, v2, 2.0),
            Ok(OpOutcome::Vectors(vec![v1 * 2.0, v2 * 2.0]))
        );
    }

    #[test]
    fn test_degenerate_ops() {
        let zero = Vector3::new(0.0, 0.0, 0.0);
        let v = Vector3::new(1.0, 0.0, 0.0);
        assert_eq!(apply(VectorOp::Div, v, v, 0.0), Err(VectorOpError::DivideByZero));
        assert_eq!(
            apply(VectorOp::Normalize, zero, v, 0.0),
            Err(VectorOpError::ZeroLength("normalize"))
        );
        assert_eq!(apply(VectorOp::Angle, zero, v, 0.0), Err(VectorOpError::ZeroLength("angle")));
    }
}
