//! Database models and DTOs for all domain entities.

pub mod card;
pub mod customer;
pub mod invoice;
pub mod revenue;
