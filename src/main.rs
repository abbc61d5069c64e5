use clap::Parser;
use tomba_etl::core::ConfigProvider;
use tomba_etl::utils::error::{ActorError, ErrorSeverity};
use tomba_etl::utils::{logger, validation::Validate};
use tomba_etl::{
    ActorInput, ActorRunner, BatchProcessor, CliConfig, LocalStorage, SearchErrorPolicy,
    StorageSink, TombaClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting tomba-etl CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    match run(&config).await {
        Ok(summary) => {
            println!(
                "✅ Processed {} domain(s), {} result(s)",
                summary.total_domains, summary.total_results
            );
            println!("📁 Output saved to: {}", config.output_path());
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}

async fn run(config: &CliConfig) -> tomba_etl::Result<tomba_etl::Summary> {
    let input = ActorInput::from_file(&config.input)?;
    tracing::debug!("Actor input: {:?}", input);

    // 先驗證輸入再建立 API 客戶端
    input.validate()?;
    let client = TombaClient::from_config(config, input.credentials()?)?;

    let processor =
        BatchProcessor::new(client).with_policy(SearchErrorPolicy::from_config(config));
    let sink = StorageSink::new(LocalStorage::new(config.output_path()));

    let runner = ActorRunner::new_with_monitoring(processor, sink, config.monitor);
    runner.run(&input).await
}

fn exit_with(e: &ActorError) -> ! {
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
