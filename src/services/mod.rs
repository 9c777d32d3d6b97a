//! Services module
//! 
//! Este módulo contiene la lógica de negocio de la venta de boletos. Los
//! servicios abren las transacciones y coordinan los repositorios.

pub mod authorization_service;
pub mod fare_resolver;
pub mod pricing_service;
pub mod purchase_service;
pub mod schedule_admin_service;
pub mod schedule_search_service;
pub mod seat_availability;
pub mod terminal_service;
pub mod ticket_service;

pub use pricing_service::PricingService;
pub use purchase_service::PurchaseService;
pub use schedule_admin_service::ScheduleAdminService;
pub use schedule_search_service::ScheduleSearchService;
pub use terminal_service::TerminalService;
pub use ticket_service::TicketService;
