use crate::{ConversionError, ResponseEnvelope};
use aws_lambda_events::encodings::Body as EventBody;
use aws_lambda_events::event::apigw::ApiGatewayProxyResponse;
use aws_lambda_events::http::{HeaderMap, HeaderName, HeaderValue};
use lambda_http::{Body, Response};

impl From<ResponseEnvelope> for ApiGatewayProxyResponse {
    fn from(envelope: ResponseEnvelope) -> Self {
        let headers = envelope
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
                    (Ok(name), Ok(value)) => Some((name, value)),
                    _ => {
                        tracing::warn!(header = %name, "skipping header that is not valid HTTP");
                        None
                    }
                }
            })
            .collect::<HeaderMap>();
        ApiGatewayProxyResponse {
            status_code: envelope.status_code(),
            headers,
            body: Some(EventBody::Text(envelope.into_body())),
            is_base64_encoded: false,
            ..Default::default()
        }
    }
}

impl TryFrom<ResponseEnvelope> for Response<Body> {
    type Error = ConversionError;

    fn try_from(envelope: ResponseEnvelope) -> Result<Self, Self::Error> {
        let status = envelope.status_code();
        let status = u16::try_from(status)
            .ok()
            .filter(|code| (100..1000).contains(code))
            .ok_or(ConversionError::InvalidStatus(status))?;
        let mut builder = Response::builder().status(status);
        for (name, value) in envelope.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        Ok(builder.body(Body::Text(envelope.into_body()))?)
    }
}
