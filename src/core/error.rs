use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("Invalid strategy config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Profile parse error: {0}")]
    ProfileError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ArenaError>;
