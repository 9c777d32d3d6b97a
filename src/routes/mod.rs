pub mod pricing_policy_routes;
pub mod public_routes;
pub mod purchase_routes;
pub mod schedule_routes;
pub mod terminal_routes;
pub mod ticket_routes;
