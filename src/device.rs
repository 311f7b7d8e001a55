//! Device identification for tensor storage
//!
//! Every buffer currently lives in host memory. `Device` exists so that the
//! migration entry points (`Tensor::to_device` and friends) have a stable
//! argument type for backends added later.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Where a tensor's buffer lives
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Device {
    /// Host memory
    #[default]
    Cpu,
    /// CUDA device with the given ordinal
    Cuda(usize),
}

impl Device {
    /// Unique identifier within the device kind
    pub fn id(&self) -> usize {
        match self {
            Self::Cpu => 0,
            Self::Cuda(ordinal) => *ordinal,
        }
    }

    /// Check if two devices are the same
    pub fn is_same(&self, other: &Self) -> bool {
        self == other
    }

    /// Human-readable name
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => f.write_str("cpu"),
            Self::Cuda(ordinal) => write!(f, "cuda:{ordinal}"),
        }
    }
}

impl FromStr for Device {
    type Err = Error;

    /// Parse `"cpu"`, `"cuda"` (ordinal 0) or `"cuda:N"`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        match s.split_once(':') {
            None if s == "cpu" => Ok(Self::Cpu),
            None if s == "cuda" => Ok(Self::Cuda(0)),
            Some(("cuda", ordinal)) => ordinal
                .parse()
                .map(Self::Cuda)
                .map_err(|_| Error::invalid_argument("device", format!("bad ordinal '{ordinal}'"))),
            _ => Err(Error::invalid_argument(
                "device",
                format!("unknown device '{s}'"),
            )),
        }
    }
}
