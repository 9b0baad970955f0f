use thiserror::Error;

/// Errors surfaced while loading a ROM. Executing instructions never fails.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unable to read ROM")]
    Io(#[from] std::io::Error),
    #[error("ROM is {size} bytes but only {max_size} bytes fit after the load address")]
    RomTooLarge { size: usize, max_size: usize },
}
