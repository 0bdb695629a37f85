pub mod cart;
pub mod message;
pub mod order;
pub mod product;
pub mod session;
pub mod shopper;
