pub mod user;
pub mod product;
pub mod review;
pub mod cart_item;
pub mod purchase;
