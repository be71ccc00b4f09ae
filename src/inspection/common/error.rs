use thiserror::Error;

use crate::inspection::geometry::{Region, RegionKind};

#[derive(Error, Debug)]
pub enum InspectionError {
    #[error("Derived {kind} region has zero area: {region}")]
    Geometry { kind: RegionKind, region: Region },

    #[error("{kind} region {region} lies outside the {width}x{height} frame")]
    OutOfBounds {
        kind: RegionKind,
        region: Region,
        width: u32,
        height: u32,
    },

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Failed to encode overlay: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(u32, u32),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InspectionError>;
