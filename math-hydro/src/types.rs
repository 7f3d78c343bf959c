//! Basic types shared by the coefficient store and the engines

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Degrees of freedom per rigid body
pub const NDOF: usize = 6;

/// Short names of the six rigid-body DOFs
pub const DOF_NAMES: [&str; NDOF] = ["surge", "sway", "heave", "roll", "pitch", "yaw"];

/// `true` for surge, sway, heave
#[inline]
pub fn is_translation(idof: usize) -> bool {
    idof % NDOF < 3
}

/// 3D point or vector
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Point3D {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Point3D {
    /// Create a new 3D point
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Cross product
    pub fn cross(&self, other: &Point3D) -> Point3D {
        Point3D {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Skew-symmetric matrix `R` with `R·v = self × v`
    pub fn skew(&self) -> Array2<f64> {
        ndarray::array![
            [0.0, -self.z, self.y],
            [self.z, 0.0, -self.x],
            [-self.y, self.x, 0.0],
        ]
    }

    /// Components as an array
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// `true` when all components are within `tol` of zero
    pub fn is_zero(&self, tol: f64) -> bool {
        self.x.abs() <= tol && self.y.abs() <= tol && self.z.abs() <= tol
    }
}

impl std::ops::Add for Point3D {
    type Output = Point3D;
    fn add(self, other: Point3D) -> Point3D {
        Point3D::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::Sub for Point3D {
    type Output = Point3D;
    fn sub(self, other: Point3D) -> Point3D {
        Point3D::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

/// Incident/outgoing heading pair (degrees) indexing QTF and mean drift data
///
/// First order data and unidirectional second order data use `h1 == h2`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct HeadingPair {
    /// First heading
    pub h1: f64,
    /// Second heading
    pub h2: f64,
}

impl HeadingPair {
    /// Pair from two headings
    pub fn new(h1: f64, h2: f64) -> Self {
        Self { h1, h2 }
    }

    /// Unidirectional pair
    pub fn uni(h: f64) -> Self {
        Self { h1: h, h2: h }
    }

    /// `true` when the two headings differ
    pub fn is_crossed(&self) -> bool {
        (self.h1 - self.h2).abs() > 1e-8
    }
}

/// Water depth
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub enum WaterDepth {
    /// Not provided by the source
    #[default]
    Unknown,
    /// Deep water
    Infinite,
    /// Finite depth (m)
    Finite(f64),
}

impl WaterDepth {
    /// `true` unless unknown
    pub fn is_known(&self) -> bool {
        !matches!(self, WaterDepth::Unknown)
    }
}

/// Rigid data of one body
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Body {
    /// Body name
    pub name: String,
    /// Reference point of the coefficients
    pub c0: Point3D,
    /// Center of gravity
    pub cg: Point3D,
    /// Center of buoyancy
    pub cb: Point3D,
    /// Displaced volume (m³)
    pub volume: Option<f64>,
    /// 6×6 mass matrix about `c0`
    pub m: Option<Array2<f64>>,
    /// 6×6 hydrostatic stiffness about `c0`
    pub c: Option<Array2<f64>>,
    /// Mooring stiffness
    pub c_moor: Option<Array2<f64>>,
    /// Additional stiffness
    pub c_add: Option<Array2<f64>>,
    /// Additional linear damping
    pub d_lin: Option<Array2<f64>>,
    /// Quadratic damping
    pub d_quad: Option<Array2<f64>>,
}

impl Body {
    /// Body with a name and a reference point
    pub fn new(name: impl Into<String>, c0: Point3D) -> Self {
        Self {
            name: name.into(),
            c0,
            ..Default::default()
        }
    }

    /// Rigid-body mass matrix of a point mass with diagonal inertia about `cg`,
    /// expressed about `c0`
    pub fn rigid_mass(mass: f64, inertia: [f64; 3], cg: Point3D, c0: Point3D) -> Array2<f64> {
        let r = (cg - c0).skew();
        let mut m = Array2::zeros((NDOF, NDOF));
        for i in 0..3 {
            m[[i, i]] = mass;
        }
        for i in 0..3 {
            for j in 0..3 {
                m[[i, 3 + j]] = -mass * r[[i, j]];
                m[[3 + i, j]] = mass * r[[i, j]];
                let rr: f64 = (0..3).map(|k| r[[i, k]] * r[[k, j]]).sum();
                m[[3 + i, 3 + j]] = -mass * rr;
            }
            m[[3 + i, 3 + i]] += inertia[i];
        }
        m
    }
}
