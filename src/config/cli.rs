use crate::adapters::presentation::OutputFormat;
use crate::config::toml_config::AppConfig;
use crate::domain::model::ImageRef;
use crate::utils::error::{CropCareError, Result};
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "crop-care")]
#[command(about = "Diagnose plant leaf diseases from a photo")]
pub struct CliConfig {
    /// Image of a single leaf to analyze
    #[arg(short, long)]
    pub image: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Inference workflow URL (overrides config)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Inference service API key (overrides config and CROPCARE_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Retries after a failed request
    #[arg(long)]
    pub retries: Option<u32>,

    /// Output format: text or json
    #[arg(long)]
    pub format: Option<OutputFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 載入設定檔後套用命令列覆蓋
    pub fn load_app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                AppConfig::from_file(path)?
            }
            None => AppConfig::default(),
        };

        if let Some(endpoint) = &self.endpoint {
            config.service.endpoint = endpoint.clone();
        }
        if let Some(api_key) = &self.api_key {
            config.service.api_key = api_key.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.service.timeout_seconds = Some(timeout);
        }
        if let Some(retries) = self.retries {
            config.service.retry_attempts = Some(retries);
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }

        Ok(config)
    }

    pub fn image_ref(&self) -> Result<ImageRef> {
        self.image
            .as_deref()
            .map(ImageRef::from_path)
            .ok_or(CropCareError::NoImageSelected)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_path("config", path)?;
        }
        if let Some(image) = &self.image {
            validate_path("image", image)?;
        }
        Ok(())
    }
}
