use clap::Parser;
use crop_care::adapters::presentation;
use crop_care::utils::{logger, validation::Validate};
use crop_care::{
    AnalysisSession, CliConfig, CropCareError, DiagnosisEngine, HttpInferenceClient,
    LocalImageSource,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🌱 Starting crop-care");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Analysis failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        std::process::exit(e.exit_code());
    }

    Ok(())
}

async fn run(cli: &CliConfig) -> Result<(), CropCareError> {
    cli.validate()?;

    // 沒選圖片就不做任何事
    let image = cli.image_ref()?;

    let config = cli.load_app_config()?;
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");

    let mut session = AnalysisSession::new();
    session.pick_image(image.clone())?;

    let client = HttpInferenceClient::new(config.inference_settings()?);
    let engine = DiagnosisEngine::new(LocalImageSource::default(), client);

    let cancel = async {
        if tokio::signal::ctrl_c().await.is_err() {
            // 無法監聽訊號就永遠不取消
            std::future::pending::<()>().await;
        }
    };

    let diagnosis = engine.analyze_until_cancelled(&mut session, cancel).await?;

    let output = presentation::render(config.output.format, &image.uri, &diagnosis)?;
    println!("{}", output);

    Ok(())
}
