pub mod api;
pub mod commands;
pub mod config;
pub mod discord;
pub mod errors;
pub mod football;
pub mod metrics;
pub mod models;
pub mod services;

use crate::discord::GatewayStatus;

#[derive(Clone)]
pub struct AppState {
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
    pub gateway: GatewayStatus,
}
