//! Error types for the Diary Service.

/// Errors that can stop the service.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Model(#[from] diary_models::error::Error),

    #[error(transparent)]
    Web(#[from] diary_web::error::Error),

    #[error("Invalid listen address: {0}")]
    InvalidAddr(#[from] std::net::AddrParseError),

    #[error("Env Variable '{0}' missing")]
    MissingEnv(&'static str),
}
