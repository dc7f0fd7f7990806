use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};

#[derive(Clone)]
pub struct DispatchMetrics {
    pub rx_frames: IntCounter,
    pub decoded_frames: IntCounter,
    pub truncated_frames: IntCounter,
    pub unknown_added: IntCounter,
    pub unknown_dropped: IntCounter,
    pub unknown_tracked: IntGauge,
}

#[derive(Clone)]
pub struct MetricsHub {
    pub registry: Registry,
    pub dispatch: DispatchMetrics,
}

fn counter(name: &str, help: &str) -> Result<IntCounter, String> {
    IntCounter::new(name, help).map_err(|e| format!("metrics init error: {e}"))
}

impl MetricsHub {
    pub fn new() -> Result<Self, String> {
        let registry = Registry::new();
        let dispatch = DispatchMetrics {
            rx_frames: counter("can_dash_rx_frames", "Total CAN frames dispatched")?,
            decoded_frames: counter("can_dash_decoded_frames", "Frames decoded with a known layout")?,
            truncated_frames: counter(
                "can_dash_truncated_frames",
                "Known frames discarded for a short payload",
            )?,
            unknown_added: counter("can_dash_unknown_added", "Unknown identifiers first seen")?,
            unknown_dropped: counter(
                "can_dash_unknown_dropped",
                "Unknown frames not tracked because the tracker is full",
            )?,
            unknown_tracked: IntGauge::new(
                "can_dash_unknown_tracked",
                "Unknown identifiers currently tracked",
            )
            .map_err(|e| format!("metrics init error: {e}"))?,
        };
        let _ = registry.register(Box::new(dispatch.rx_frames.clone()));
        let _ = registry.register(Box::new(dispatch.decoded_frames.clone()));
        let _ = registry.register(Box::new(dispatch.truncated_frames.clone()));
        let _ = registry.register(Box::new(dispatch.unknown_added.clone()));
        let _ = registry.register(Box::new(dispatch.unknown_dropped.clone()));
        let _ = registry.register(Box::new(dispatch.unknown_tracked.clone()));
        Ok(Self { registry, dispatch })
    }

    pub fn encode_text(&self) -> String {
        let mut buf = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buf) {
            return format!("error encoding metrics: {e}");
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_text_output() {
        let hub = MetricsHub::new().unwrap();
        hub.dispatch.rx_frames.inc_by(3);
        hub.dispatch.unknown_tracked.set(2);
        let text = hub.encode_text();
        assert!(text.contains("can_dash_rx_frames 3"));
        assert!(text.contains("can_dash_unknown_tracked 2"));
        assert!(text.contains("can_dash_truncated_frames 0"));
    }
}
