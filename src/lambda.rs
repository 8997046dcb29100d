#[cfg(feature = "lambda")]
use ecocharge::app::compliance::{acknowledge, Acknowledgement, WebhookNotification};
#[cfg(feature = "lambda")]
use ecocharge::config::LambdaConfig;
#[cfg(feature = "lambda")]
use ecocharge::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

/// Signature verification happens upstream (API gateway authorizer); this
/// handler only sees verified notifications.
#[cfg(feature = "lambda")]
async fn function_handler(
    config: &LambdaConfig,
    event: LambdaEvent<WebhookNotification>,
) -> Result<Acknowledgement, Error> {
    let notification = event.payload;
    tracing::info!(request_id = %event.context.request_id, "Compliance webhook invoked");

    if !config.is_expected_shop(notification.shop_domain.as_deref()) {
        tracing::warn!(
            shop = ?notification.shop_domain,
            "⚠️ Webhook from an unexpected shop domain"
        );
    }
    if config.log_payloads {
        tracing::debug!(payload = %notification.payload, "Webhook payload");
    }

    Ok(acknowledge(&notification))
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 從環境變數載入配置
    let config = LambdaConfig::from_env()?;
    config.validate()?;
    tracing::info!("Lambda config: {:?}", config);

    let config = &config;
    run(service_fn(move |event| function_handler(config, event))).await
}
