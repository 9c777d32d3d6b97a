//! DTOs de requests y responses de la API

pub mod pricing_policy_dto;
pub mod purchase_dto;
pub mod schedule_dto;
pub mod terminal_dto;
pub mod ticket_dto;
