//! Repositorios
//!
//! Acceso a datos con sqlx. Las funciones reciben `&mut PgConnection` para que
//! el servicio decida si corren dentro de una transacción o sobre el pool.

pub mod bus_repository;
pub mod company_repository;
pub mod passenger_repository;
pub mod price_adjustment_repository;
pub mod pricing_policy_repository;
pub mod purchase_repository;
pub mod route_repository;
pub mod schedule_repository;
pub mod seat_repository;
pub mod terminal_use_repository;
pub mod ticket_repository;

pub use bus_repository::BusRepository;
pub use company_repository::CompanyRepository;
pub use passenger_repository::PassengerRepository;
pub use price_adjustment_repository::PriceAdjustmentRepository;
pub use pricing_policy_repository::PricingPolicyRepository;
pub use purchase_repository::PurchaseRepository;
pub use route_repository::RouteRepository;
pub use schedule_repository::ScheduleRepository;
pub use seat_repository::SeatRepository;
pub use terminal_use_repository::TerminalUseRepository;
pub use ticket_repository::TicketRepository;
