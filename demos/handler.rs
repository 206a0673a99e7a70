use std::io::Read;

use request_log::diagnostics::TracingDiagnostics;
use request_log::init::init_diagnostics;
use request_log::{ApiGatewayRequest, Logger};
use serde_json::json;

/// Minimal request handler: reads one API Gateway proxy event from stdin,
/// logs with request context and answers with a 200 response.
///
/// echo '{"httpMethod":"GET","path":"/","requestContext":{"stage":"dev"}}' \
///     | cargo run --example handler
fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_diagnostics()?;

    let mut event = String::new();
    std::io::stdin().read_to_string(&mut event)?;
    let req: ApiGatewayRequest = serde_json::from_str(&event)?;

    let mut log = Logger::from_request(&req).with_diagnostics(TracingDiagnostics);
    log.bind_env().bind_string("someKey", "test value");
    log.println("All good");

    let resp = json!({
        "statusCode": 200,
        "headers": null,
        "body": "",
        "isBase64Encoded": false,
    });
    println!("{}", resp);
    Ok(())
}
