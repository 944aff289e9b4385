use std::error;
use std::fmt;

#[derive(Debug)]

/**
 * Error to represent invalid integrator input, a failed time step, or a
 * closure returning unphysical values.
 */
pub enum Error {
    InvalidArgument(String),
    InvalidConfiguration(String),
    ReactionNotConverged {
        cell: usize,
        iterations: usize,
        residual: f64,
    },
    InvalidClosure {
        quantity: &'static str,
        cell: usize,
        value: f64,
    },
    CausalityViolation {
        cell: usize,
        flux: f64,
        bound: f64,
    },
    InvalidReference(String),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        use Error::*;

        match self {
            InvalidArgument(what) => write!(fmt, "invalid argument: {}", what),
            InvalidConfiguration(what) => write!(fmt, "invalid configuration: {}", what),
            ReactionNotConverged { cell, iterations, residual } => write!(
                fmt,
                "energy exchange did not converge in cell {} after {} iterations (residual {:e})",
                cell, iterations, residual
            ),
            InvalidClosure { quantity, cell, value } => {
                write!(fmt, "closure returned invalid {} in cell {}: {}", quantity, cell, value)
            }
            CausalityViolation { cell, flux, bound } => write!(
                fmt,
                "radiation flux {:e} exceeds causal bound {:e} in cell {}",
                flux, bound, cell
            ),
            InvalidReference(what) => write!(fmt, "invalid reference data: {}", what),
            Io(e) => write!(fmt, "i/o error: {}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
