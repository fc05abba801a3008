pub type FolioResult<T> = Result<T, FolioError>;

#[derive(thiserror::Error, Debug)]
pub enum FolioError {
    #[error("asset error: {0}")]
    Asset(String),

    #[error("model error: {0}")]
    Model(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("mail error: {0}")]
    Mail(String),

    #[error("gpu error: {0}")]
    Gpu(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),
}

impl FolioError {
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn mail(msg: impl Into<String>) -> Self {
        Self::Mail(msg.into())
    }

    pub fn gpu(msg: impl Into<String>) -> Self {
        Self::Gpu(msg.into())
    }
}
