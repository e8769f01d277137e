use std::sync::Arc;

use chat_relay::{
    bootstrap::build_relay,
    config::Settings,
    function::{FunctionEvent, handle_event},
    services::prompt::PromptStyle,
    telemetry::init_tracing,
};
use lambda_runtime::{Error, LambdaEvent, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing()?;

    let settings = Settings::load()?;
    let relay = Arc::new(build_relay(&settings, PromptStyle::Plain).await?);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<FunctionEvent>| {
        let relay = relay.clone();
        async move { Ok::<_, Error>(handle_event(&relay, event.payload).await) }
    }))
    .await
}
