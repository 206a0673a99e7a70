pub mod error;
pub mod value;
pub mod context;
pub mod record;
pub mod serializer;
pub mod sink;
pub mod diagnostics;

pub mod env;
pub mod request;
pub mod logger;
pub mod init;

pub use logger::Logger;
pub use request::ApiGatewayRequest;
pub use value::FieldValue;
