use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use dotenvy::dotenv;

use bus_terminal_ticketing::{
    build_router,
    config::{DatabaseConfig, EnvironmentConfig},
    database,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging (RUST_LOG, por defecto info); también recoge los registros de `log`
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚌 Terminal de buses - Núcleo de venta de boletos");
    info!("================================================");

    let config = EnvironmentConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;

    // Inicializar base de datos
    let pool = match database::connect(&db_config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    database::run_migrations(&pool).await?;

    info!(
        "💵 Tasa de uso de terminal: {} | medio de pago por defecto: {}",
        config.ticketing.terminal_use_fee, config.ticketing.default_payment_method
    );
    if config.cors_origins.is_empty() {
        if config.is_development() {
            info!("🌍 CORS permisivo (CORS_ORIGINS vacío)");
        } else {
            warn!("⚠️ CORS permisivo en entorno '{}': configure CORS_ORIGINS", config.environment);
        }
    }

    let addr: SocketAddr = config.server_url().parse()?;
    let app = build_router(AppState::new(pool, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /api/health");
    info!("   POST /api/purchases - Iniciar compra");
    info!("   POST /api/purchases/:id/pay - Confirmar pago");
    info!("   GET  /api/tickets/mine - Mis boletos");
    info!("   GET  /api/tickets/:id - Boleto digital");
    info!("   GET  /api/tickets/sold - Boletos vendidos de la empresa");
    info!("   GET|POST /api/schedules - Horarios de la empresa");
    info!("   PATCH /api/schedules/:id - Actualizar horario");
    info!("   POST /api/schedules/:id/deactivate - Desactivar horario");
    info!("   PUT  /api/schedules/:id/price - Ajustar precio");
    info!("   GET  /api/schedules/:id/price-history - Historial de precios");
    info!("   GET|PUT /api/admin/pricing-policies/:company_id - Política de precios");
    info!("   POST /api/terminal/validate - Validar uso de terminal");
    info!("   GET  /api/public/schedules/search - Buscar horarios");
    info!("   GET  /api/public/schedules/:id/seats - Mapa de asientos");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => error!("❌ No se pudo instalar el handler de SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
