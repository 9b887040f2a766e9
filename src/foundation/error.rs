pub type LumyteResult<T> = Result<T, LumyteError>;

#[derive(thiserror::Error, Debug)]
pub enum LumyteError {
    #[error("config error: {0}")]
    Config(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("input error: {0}")]
    Input(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LumyteError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }
}
