//!
//! Error type of the HMM engine
//!
use thiserror::Error;

///
/// Which parameter of a model an error refers to
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    /// initial state distribution `pi`
    Init,
    /// transition matrix `A`
    Trans,
    /// emission matrix `B`
    Emit,
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Component::Init => write!(f, "initial distribution"),
            Component::Trans => write!(f, "transition matrix"),
            Component::Emit => write!(f, "emission matrix"),
        }
    }
}

#[derive(Debug, Error)]
pub enum HmmError {
    /// zero states/symbols, or a matrix of the wrong shape
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    #[error("{component} row {row} sums to {sum}, not 1")]
    NotStochastic {
        component: Component,
        row: usize,
        sum: f64,
    },

    #[error("{component} has invalid probability {value} at ({row}, {col})")]
    InvalidProbability {
        component: Component,
        row: usize,
        col: usize,
        value: f64,
    },

    #[error("observation {symbol} at t={t} is out of range (n_symbols={n_symbols})")]
    OutOfRangeSymbol {
        t: usize,
        symbol: usize,
        n_symbols: usize,
    },

    #[error("observation sequence is empty")]
    EmptySequence,

    /// the observations up to `t` have probability zero under the model
    #[error("observation sequence has zero likelihood under the model (at t={t})")]
    ZeroLikelihood { t: usize },

    /// a forward scale factor that is not a positive finite number
    #[error("invalid scale factor {value} at t={t}")]
    InvalidScale { t: usize, value: f64 },

    #[error("sampling error: {0}")]
    Sampling(#[from] rand::distributions::WeightedError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, HmmError>;
