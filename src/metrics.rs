use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

const COMMANDS: [&str; 3] = ["prediction", "ping", "help"];
const ENDPOINTS: [&str; 2] = ["fixtures", "predictions"];

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> PrometheusHandle {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");
    register_metrics();
    handle
}

/// Describe every series and seed it so a scrape shows it before first use.
/// Goes to whichever recorder is current.
pub fn register_metrics() {
    describe_counter!("commands_total", "Chat commands handled, by command");
    describe_counter!(
        "upstream_failures_total",
        "Failed API-Football requests, by endpoint"
    );
    describe_counter!("fixtures_fetched_total", "Fixtures returned by API-Football");
    describe_counter!("replies_sent_total", "Prediction embeds delivered to Discord");
    describe_histogram!(
        "command_latency_seconds",
        Unit::Seconds,
        "Time from parsed command to last reply"
    );
    describe_histogram!(
        "fixture_search_days",
        "Days examined per fixture search, start day included"
    );

    for command in COMMANDS {
        counter!("commands_total", "command" => command).absolute(0);
    }
    for endpoint in ENDPOINTS {
        counter!("upstream_failures_total", "endpoint" => endpoint).absolute(0);
    }
    counter!("fixtures_fetched_total").absolute(0);
    counter!("replies_sent_total").absolute(0);

    // Histograms only render once they hold a sample.
    histogram!("command_latency_seconds").record(0.0);
    histogram!("fixture_search_days").record(0.0);
}
