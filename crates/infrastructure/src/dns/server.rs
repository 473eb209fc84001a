use crate::dns::record_type_map::RecordTypeMapper;
use dns_repeater_application::ports::DnsResolution;
use dns_repeater_application::use_cases::HandleDnsQueryUseCase;
use dns_repeater_domain::{DnsName, DnsQuery, DomainError};
use hickory_proto::op::{Header, OpCode, ResponseCode};
use hickory_proto::rr::Record;
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Wire front-end: decodes the question, hands it to the resolution
/// pipeline and encodes whatever comes back.
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    fn response_code_for(error: &DomainError) -> ResponseCode {
        match error {
            DomainError::NotFound(_) => ResponseCode::NXDomain,
            _ => ResponseCode::ServFail,
        }
    }
}

#[async_trait::async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        if request.header().op_code() != OpCode::Query {
            warn!(op_code = ?request.header().op_code(), "Unsupported DNS operation");
            return send_error_response(request, &mut response_handle, ResponseCode::NotImp).await;
        }

        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to parse request info");
                return send_error_response(request, &mut response_handle, ResponseCode::FormErr)
                    .await;
            }
        };

        // The original question keeps the caller's spelling; the lowered
        // one would defeat exact label matching.
        let question = request_info.query.original();
        let name = DnsName::from_labels(question.name().iter());
        let record_type = RecordTypeMapper::from_hickory(question.query_type());
        let client_ip = request_info.src.ip();

        info!(domain = %name, record_type = %record_type, client = %client_ip, "DNS query received");

        let query = DnsQuery::new(name, record_type);

        match self.use_case.execute(&query).await {
            Ok(resolution) => send_resolution(request, &mut response_handle, &resolution).await,
            Err(e) => {
                let code = Self::response_code_for(&e);
                if code == ResponseCode::NXDomain {
                    debug!(domain = %query.name, error = %e, "Answering NXDOMAIN");
                } else {
                    error!(domain = %query.name, error = %e, "Query resolution failed");
                }
                send_error_response(request, &mut response_handle, code).await
            }
        }
    }
}

async fn send_resolution<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    resolution: &DnsResolution,
) -> ResponseInfo {
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = Header::response_from_request(request.header());
    header.set_recursion_available(true);

    debug!(
        answers = resolution.answers.len(),
        authority = resolution.authority.len(),
        "Sending response"
    );

    let response = builder.build(
        header,
        resolution.answers.iter(),
        resolution.authority.iter(),
        &[] as &[Record],
        resolution.additional.iter(),
    );

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send response");
            ResponseInfo::from(header)
        }
    }
}

async fn send_error_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
) -> ResponseInfo {
    debug!(code = ?code, "Sending error response");
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = Header::response_from_request(request.header());
    header.set_response_code(code);
    header.set_recursion_available(true);
    let response = builder.build(header, &[], &[], &[], &[]);

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send error response");
            ResponseInfo::from(header)
        }
    }
}
