use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::Client as S3Client;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Serialize;
use tomba_etl::core::ConfigProvider;
use tomba_etl::utils::{logger, validation::Validate};
use tomba_etl::{
    ActorInput, ActorRunner, BatchProcessor, LambdaConfig, S3Storage, SearchErrorPolicy,
    StorageSink, TombaClient,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub message: String,
    pub output_prefix: String,
    pub total_domains: usize,
    pub total_results: usize,
}

// 事件內容就是 actor 的輸入
async fn function_handler(event: LambdaEvent<ActorInput>) -> Result<Response, Error> {
    let input = event.payload;

    let lambda_config = LambdaConfig::from_env()?;
    lambda_config.validate()?;

    input.validate()?;
    let client = TombaClient::from_config(&lambda_config, input.credentials()?)?;

    // 建立 AWS 設定和 S3 客戶端
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let region = Region::new(lambda_config.s3_region.clone());
    let config = aws_sdk_s3::config::Builder::from(&config)
        .region(region)
        .force_path_style(true)
        .build();
    let s3_client = S3Client::from_conf(config);

    let storage = S3Storage::new(
        s3_client,
        lambda_config.s3_bucket.clone(),
        lambda_config.output_path().to_string(),
    );

    let processor =
        BatchProcessor::new(client).with_policy(SearchErrorPolicy::from_config(&lambda_config));
    let runner = ActorRunner::new(processor, StorageSink::new(storage));

    let summary = runner.run(&input).await?;

    Ok(Response {
        message: "Domain search completed successfully".to_string(),
        output_prefix: format!("s3://{}/{}", lambda_config.s3_bucket, lambda_config.output_path()),
        total_domains: summary.total_domains,
        total_results: summary.total_results,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
