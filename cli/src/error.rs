use std::{fmt, io};

#[derive(Debug)]
pub enum CliError {
    InfNat(infnat::Error),
    Io(io::Error),
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<infnat::Error> for CliError {
    fn from(e: infnat::Error) -> Self {
        Self::InfNat(e)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CliError::InfNat(e) => write!(f, "{}", e),
            CliError::Io(e) => write!(f, "io error: {}", e),
        }
    }
}
