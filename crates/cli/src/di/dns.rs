use dns_repeater_application::events::ResolutionEventEmitter;
use dns_repeater_application::services::SuffixRegistry;
use dns_repeater_application::use_cases::HandleDnsQueryUseCase;
use dns_repeater_domain::Config;
use dns_repeater_infrastructure::dns::{ResolutionEventLogger, ResolvConfUpstream};
use dns_repeater_infrastructure::system::{load_system_conf, log_system_conf, BlockingSystemResolver};
use std::sync::Arc;

pub struct DnsServices {
    pub handler_use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServices {
    pub fn new(config: &Config) -> Self {
        // getaddrinfo reads /etc/resolv.conf on its own; the upstream leg
        // reads the same file here.
        let (resolv_conf, mut resolv_opts) = load_system_conf();
        if let Some(timeout) = config.resolver.upstream_timeout() {
            resolv_opts.timeout = timeout;
        }
        log_system_conf(&resolv_conf, &resolv_opts);

        let system = Arc::new(BlockingSystemResolver::new(config.resolver.worker_threads));
        let upstream = Arc::new(ResolvConfUpstream::new(resolv_conf, resolv_opts));

        let use_case = HandleDnsQueryUseCase::new(system, upstream, Arc::new(SuffixRegistry::new()))
            .with_events(Self::setup_event_logger())
            .with_strip_timeout(config.resolver.strip_timeout());

        Self {
            handler_use_case: Arc::new(use_case),
        }
    }

    fn setup_event_logger() -> ResolutionEventEmitter {
        let (emitter, rx) = ResolutionEventEmitter::new_enabled();
        ResolutionEventLogger::new().start(rx);
        emitter
    }
}
